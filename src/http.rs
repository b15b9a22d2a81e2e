use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::ApiError;
use crate::upload::UploadSource;

const HTTP_TIMEOUT_SECS: u64 = 30;
const HTTP_USER_AGENT: &str = "ShelfAdmin/0.1";
const ERROR_BODY_LIMIT: usize = 200;

/// Authenticated wrapper around the blocking HTTP client. One request per
/// call: no retry, no caching. The bearer token is set after login and
/// cleared on logout; requests without one simply go out unauthenticated
/// and come back 401.
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Mutex<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::from_transport)?;
        Ok(ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: Mutex::new(None),
        })
    }

    pub fn set_token(&self, token: &str) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
    }

    pub fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = self.build_url(path, query);
        self.execute_json(self.client.get(url), "GET", path)
    }

    pub fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.build_url(path, &[]);
        self.execute_json(self.client.post(url).json(body), "POST", path)
    }

    pub fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.build_url(path, &[]);
        self.execute_json(self.client.put(url).json(body), "PUT", path)
    }

    /// Success is the 2xx status alone; the body is not required to carry
    /// entity data.
    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.build_url(path, &[]);
        self.send(self.client.delete(url), "DELETE", path)?;
        Ok(())
    }

    /// Multipart upload of one binary payload under a fixed field name,
    /// with the original filename carried on the part.
    pub fn upload_multipart(
        &self,
        path: &str,
        field: &str,
        source: UploadSource,
        filename: &str,
    ) -> Result<Value, ApiError> {
        let part = match source {
            UploadSource::Path(file_path) => multipart::Part::file(&file_path)
                .map_err(|err| {
                    log::warn!("upload source {} unreadable: {}", file_path.display(), err);
                    ApiError::Transport(err.to_string())
                })?
                .file_name(filename.to_string()),
            UploadSource::Bytes(bytes) => {
                multipart::Part::bytes(bytes).file_name(filename.to_string())
            }
        };
        let form = multipart::Form::new().part(field.to_string(), part);
        let url = self.build_url(path, &[]);
        self.execute_json(self.client.post(url).multipart(form), "POST", path)
    }

    fn execute_json(
        &self,
        request: RequestBuilder,
        method: &str,
        path: &str,
    ) -> Result<Value, ApiError> {
        let response = self.send(request, method, path)?;
        response
            .json::<Value>()
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn send(
        &self,
        mut request: RequestBuilder,
        method: &str,
        path: &str,
    ) -> Result<Response, ApiError> {
        request = request
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::USER_AGENT, HTTP_USER_AGENT);
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|err| {
            log::warn!("{} {} transport error: {}", method, path, err);
            ApiError::from_transport(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        log::warn!("{} {} returned {}", method, path, status);
        let body = response.text().unwrap_or_default();
        Err(classify_status(status.as_u16(), &body))
    }

    pub(crate) fn bearer(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn build_url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let encoded = query
                .iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }
}

/// Map a non-2xx response to the uniform error shape. 401/403 propagate
/// as-is; token refresh is the auth controller's business, not ours. The
/// backend reports rejections as `{"message": ...}`; anything else falls
/// back to the raw body.
pub(crate) fn classify_status(status: u16, body: &str) -> ApiError {
    if status == 401 || status == 403 {
        return ApiError::Unauthorized { status };
    }
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|entry| entry.as_str())
                .map(|text| text.to_string())
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no error detail".to_string()
            } else {
                trimmed.chars().take(ERROR_BODY_LIMIT).collect()
            }
        });
    ApiError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_maps_auth_statuses() {
        assert!(classify_status(401, "").is_unauthorized());
        assert!(classify_status(403, "{\"message\":\"forbidden\"}").is_unauthorized());
        assert!(!classify_status(404, "").is_unauthorized());
    }

    #[test]
    fn classify_extracts_backend_message() {
        let err = classify_status(422, "{\"message\":\"year must be 1..4\"}");
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "year must be 1..4");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn classify_falls_back_to_raw_body() {
        let err = classify_status(500, "gateway blew up");
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "gateway blew up");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn classify_handles_empty_body() {
        match classify_status(502, "  ") {
            ApiError::Status { message, .. } => assert_eq!(message, "no error detail"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn build_url_encodes_query_values() {
        let client = ApiClient::new("https://api.example.com/").expect("client should build");
        let url = client.build_url(
            "/books",
            &[
                ("page", "2".to_string()),
                ("search", "data structures & algorithms".to_string()),
            ],
        );
        assert_eq!(
            url,
            "https://api.example.com/books?page=2&search=data%20structures%20%26%20algorithms"
        );
    }

    #[test]
    fn build_url_without_query_has_no_separator() {
        let client = ApiClient::new("https://api.example.com").expect("client should build");
        assert_eq!(client.build_url("/books/b1", &[]), "https://api.example.com/books/b1");
    }
}
