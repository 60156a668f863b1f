//! gloo-net wrappers that turn every response into `Result<_, ApiError>`.
//!
//! Bodies are read as text first so a non-2xx response can be classified
//! from its JSON error body and a 2xx body can be validated against the
//! expected envelope.

use super::api_utils::{api_url, with_query};
use contracts::domain::common::api_response::{parse_envelope, parse_list, MutationResponse};
use contracts::domain::common::{ImportSummary, ListPage};
use contracts::shared::error::ApiError;
use contracts::shared::form_payload::FormPayload;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::FormData;

async fn read_body(method: &str, path: &str, response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(ApiError::network)?;
    if response.ok() {
        log::debug!("{method} {path} -> {status}");
        Ok(body)
    } else {
        let err = ApiError::from_response(status, &body);
        log::warn!("{method} {path} -> {status}: {err}");
        Err(err)
    }
}

async fn send(method: &str, path: &str, request: Request) -> Result<String, ApiError> {
    let response = request.send().await.map_err(|e| {
        log::error!("{method} {path} failed: {e}");
        ApiError::network(e)
    })?;
    read_body(method, path, response).await
}

/// `GET /{path}?{params}` returning one page of rows with its `meta`.
pub async fn get_list<T: DeserializeOwned>(
    path: &str,
    params: &[(String, String)],
) -> Result<ListPage<T>, ApiError> {
    let url = with_query(&api_url(path), params);
    let body = send("GET", path, Request::get(&url).build().map_err(ApiError::network)?).await?;
    parse_list(&body)
}

/// `GET /{path}` returning the `data` of the envelope.
pub async fn get_data<T: DeserializeOwned>(
    path: &str,
    params: &[(String, String)],
) -> Result<T, ApiError> {
    let url = with_query(&api_url(path), params);
    let body = send("GET", path, Request::get(&url).build().map_err(ApiError::network)?).await?;
    Ok(parse_envelope::<T>(&body)?.data)
}

fn mutation_response(body: &str) -> MutationResponse {
    serde_json::from_str(body).unwrap_or_default()
}

fn to_form_data(
    payload: &FormPayload,
    files: &[(String, web_sys::File)],
) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::network(format!("{e:?}")))?;
    for (key, value) in payload.iter() {
        form.append_with_str(key, value)
            .map_err(|e| ApiError::network(format!("{e:?}")))?;
    }
    for (key, file) in files {
        form.append_with_blob_and_filename(key, file, &file.name())
            .map_err(|e| ApiError::network(format!("{e:?}")))?;
    }
    Ok(form)
}

/// Multipart `POST`; updates carry `_method=PUT` inside the payload.
pub async fn post_form(
    path: &str,
    payload: &FormPayload,
    files: &[(String, web_sys::File)],
) -> Result<MutationResponse, ApiError> {
    let form = to_form_data(payload, files)?;
    let request = Request::post(&api_url(path))
        .body(form)
        .map_err(ApiError::network)?;
    let body = send("POST", path, request).await?;
    Ok(mutation_response(&body))
}

pub async fn post_json<B: Serialize>(path: &str, payload: &B) -> Result<MutationResponse, ApiError> {
    let request = Request::post(&api_url(path))
        .json(payload)
        .map_err(ApiError::schema)?;
    let body = send("POST", path, request).await?;
    Ok(mutation_response(&body))
}

pub async fn delete(path: &str) -> Result<MutationResponse, ApiError> {
    let request = Request::delete(&api_url(path))
        .build()
        .map_err(ApiError::network)?;
    let body = send("DELETE", path, request).await?;
    Ok(mutation_response(&body))
}

/// Upload one file under `file`; the backend answers with an import summary.
pub async fn upload_import(path: &str, file: web_sys::File) -> Result<ImportSummary, ApiError> {
    let form = to_form_data(&FormPayload::new(), &[("file".to_string(), file)])?;
    let request = Request::post(&api_url(path))
        .body(form)
        .map_err(ApiError::network)?;
    let body = send("POST", path, request).await?;
    parse_import_summary(&body)
}

/// The summary may come wrapped in the usual envelope or bare.
fn parse_import_summary(body: &str) -> Result<ImportSummary, ApiError> {
    if let Ok(envelope) = parse_envelope::<ImportSummary>(body) {
        return Ok(envelope.data);
    }
    serde_json::from_str(body).map_err(ApiError::schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_summary_in_envelope() {
        let body = r#"{"data":{"imported":3,"errors":[]},"message":"done"}"#;
        let summary = parse_import_summary(body).unwrap();
        assert_eq!(summary.imported, 3);
        assert!(summary.is_clean());
    }

    #[test]
    fn test_import_summary_bare() {
        let body = r#"{"imported":1,"errors":["Row 2: code is required"]}"#;
        let summary = parse_import_summary(body).unwrap();
        assert_eq!(summary.errors.len(), 1);
    }

    #[test]
    fn test_mutation_response_tolerates_empty_body() {
        assert_eq!(mutation_response("").message_or("Saved"), "Saved");
        assert_eq!(
            mutation_response(r#"{"message":"Unit deleted"}"#).message_or("x"),
            "Unit deleted"
        );
    }
}
