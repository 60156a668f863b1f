//! REST calls shared by every entity, keyed by [`AggregateRoot::collection_name`].

use super::http;
use contracts::domain::common::api_response::MutationResponse;
use contracts::domain::common::{AggregateId, AggregateRoot, DropdownItem, ImportSummary, ListPage};
use contracts::shared::error::ApiError;
use contracts::shared::export::ExportRequest;
use contracts::shared::form_payload::FormPayload;
use contracts::shared::list_query::ListQuery;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct BulkDeleteRequest<'a> {
    ids: &'a [i64],
}

pub async fn fetch_list<T>(query: ListQuery) -> Result<ListPage<T>, ApiError>
where
    T: AggregateRoot + DeserializeOwned,
{
    http::get_list(T::collection_name(), &query.api_params()).await
}

pub async fn fetch_one<T>(id: T::Id) -> Result<T, ApiError>
where
    T: AggregateRoot + DeserializeOwned,
{
    http::get_data(&format!("{}/{}", T::collection_name(), id.as_string()), &[]).await
}

pub async fn create<T: AggregateRoot>(
    payload: &FormPayload,
    files: &[(String, web_sys::File)],
) -> Result<MutationResponse, ApiError> {
    http::post_form(T::collection_name(), payload, files).await
}

/// Multipart cannot ride a real PUT, so the verb travels as `_method`.
pub async fn update<T: AggregateRoot>(
    id: T::Id,
    payload: &FormPayload,
    files: &[(String, web_sys::File)],
) -> Result<MutationResponse, ApiError> {
    let mut payload = payload.clone();
    payload.method_override("PUT");
    http::post_form(
        &format!("{}/{}", T::collection_name(), id.as_string()),
        &payload,
        files,
    )
    .await
}

pub async fn delete<T: AggregateRoot>(id: T::Id) -> Result<MutationResponse, ApiError> {
    http::delete(&format!("{}/{}", T::collection_name(), id.as_string())).await
}

pub async fn bulk_delete<T: AggregateRoot>(ids: &[i64]) -> Result<MutationResponse, ApiError> {
    http::post_json(
        &format!("{}/bulk-delete", T::collection_name()),
        &BulkDeleteRequest { ids },
    )
    .await
}

pub async fn import<T: AggregateRoot>(file: web_sys::File) -> Result<ImportSummary, ApiError> {
    http::upload_import(&format!("{}/import", T::collection_name()), file).await
}

/// Email or scheduled delivery; downloads are rendered in the browser.
pub async fn request_export<T: AggregateRoot>(
    request: &ExportRequest,
) -> Result<MutationResponse, ApiError> {
    http::post_json(&format!("{}/export", T::collection_name()), request).await
}

/// `/{resource}/dropdown` for resources this panel does not manage
/// (brands, taxes, warehouses) as well as its own entities.
pub async fn fetch_dropdown(resource: &str) -> Result<Vec<DropdownItem>, ApiError> {
    http::get_data(&format!("{resource}/dropdown"), &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_delete_body() {
        let json = serde_json::to_string(&BulkDeleteRequest { ids: &[3, 5] }).unwrap();
        assert_eq!(json, r#"{"ids":[3,5]}"#);
    }
}
