pub mod column_toggle;
pub mod combobox;
pub mod data_table;
pub mod error_panel;
pub mod facet_filter;
pub mod file_field;
pub mod filter_panel;
pub mod list_actions;
pub mod pagination_controls;
pub mod row_actions;
pub mod table;
pub mod ui;

pub use column_toggle::ColumnToggle;
pub use combobox::{Combobox, DropdownCombobox};
pub use data_table::DataTable;
pub use error_panel::ErrorPanel;
pub use facet_filter::FacetFilterGroup;
pub use file_field::FileField;
pub use filter_panel::{FilterPanel, FilterTag};
pub use list_actions::ListActions;
pub use pagination_controls::PaginationControls;
pub use row_actions::RowActions;
