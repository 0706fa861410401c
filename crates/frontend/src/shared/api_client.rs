//! Authenticated JSON client.
//!
//! Every call attaches the stored bearer token, unwraps the
//! `{ success, data, error }` envelope and returns [`ApiResult`]. Nothing is
//! retried here; callers decide what to show.

use std::collections::BTreeMap;

use contracts::shared::api::{decode_ack, decode_envelope, ApiError, ApiResult};
use contracts::shared::pagination::Paginated;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api_utils::api_url;
use super::pagination::FilterState;
use crate::system::auth::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

fn builder(method: Method, url: &str) -> RequestBuilder {
    let builder = match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    };
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Raw status and body text of one request.
async fn send(method: Method, path: &str, body: Option<String>) -> ApiResult<(u16, String)> {
    let url = api_url(path);
    log::debug!("{} {}", method.as_str(), url);

    let builder = builder(method, &url);
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(json),
        None => builder.build(),
    }
    .map_err(|e| ApiError::network(format!("Failed to build request: {}", e)))?;

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::network(format!("Failed to send request: {}", e)))?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::network(format!("Failed to read response: {}", e)))?;

    if !(200..300).contains(&status) {
        log::warn!("{} {} -> {}", method.as_str(), path, status);
    }
    Ok((status, text))
}

fn to_json<B: Serialize>(body: &B) -> ApiResult<String> {
    serde_json::to_string(body)
        .map_err(|e| ApiError::decode(format!("Failed to serialize request: {}", e)))
}

/// `path?k=v&...`, filters serialised with `serde_qs`.
pub fn with_query(path: &str, pairs: &[(String, String)]) -> ApiResult<String> {
    if pairs.is_empty() {
        return Ok(path.to_string());
    }
    let map: BTreeMap<&str, &str> = pairs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let query = serde_qs::to_string(&map)
        .map_err(|e| ApiError::validation(format!("Invalid filter: {}", e)))?;
    Ok(format!("{}?{}", path, query))
}

pub async fn get<T: DeserializeOwned>(path: &str) -> ApiResult<T> {
    let (status, body) = send(Method::Get, path, None).await?;
    decode_envelope(status, &body)
}

/// One page of a list endpoint with the screen's filters applied.
pub async fn get_page<T: DeserializeOwned>(
    path: &str,
    filters: &FilterState,
) -> ApiResult<Paginated<T>> {
    let path = with_query(path, &filters.query_pairs())?;
    get(&path).await
}

pub async fn post<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> ApiResult<T> {
    let (status, text) = send(Method::Post, path, Some(to_json(body)?)).await?;
    decode_envelope(status, &text)
}

pub async fn post_ack<B: Serialize>(path: &str, body: &B) -> ApiResult<()> {
    let (status, text) = send(Method::Post, path, Some(to_json(body)?)).await?;
    decode_ack(status, &text)
}

pub async fn put<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> ApiResult<T> {
    let (status, text) = send(Method::Put, path, Some(to_json(body)?)).await?;
    decode_envelope(status, &text)
}

pub async fn patch<T: DeserializeOwned>(path: &str) -> ApiResult<T> {
    let (status, text) = send(Method::Patch, path, None).await?;
    decode_envelope(status, &text)
}

pub async fn delete(path: &str) -> ApiResult<()> {
    let (status, text) = send(Method::Delete, path, None).await?;
    decode_ack(status, &text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_encodes_values() {
        let pairs = vec![
            ("search".to_string(), "ann lee".to_string()),
            ("page".to_string(), "2".to_string()),
        ];
        let url = with_query("/org/members", &pairs).unwrap();
        assert!(url.starts_with("/org/members?"));
        assert!(url.contains("page=2"));
        assert!(url.contains("search=ann+lee") || url.contains("search=ann%20lee"));

        assert_eq!(with_query("/org/mine", &[]).unwrap(), "/org/mine");
    }
}
