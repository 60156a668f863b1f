use crate::shared::http;
use contracts::domain::a003_unit::Unit;
use contracts::shared::error::ApiError;

/// `GET /units/base`: units without a base unit of their own.
pub async fn fetch_base_units() -> Result<Vec<Unit>, ApiError> {
    http::get_data("units/base", &[]).await
}
