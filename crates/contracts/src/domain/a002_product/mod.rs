pub mod aggregate;
pub mod combo;
pub mod draft;
pub mod enums;
pub mod form;
pub mod pricing;

pub use aggregate::{
    ComboLine, InitialStock, Product, ProductId, ProductSearchItem, TaxRef, WarehousePrice,
    LIST_SPEC,
};
pub use combo::ComboEditor;
pub use draft::{ProductDraft, ProductVariant, StockKeeping};
pub use enums::{BarcodeSymbology, PeriodUnit, ProductType, StockFilter, TaxMethod};
pub use form::ProductForm;
