use std::collections::BTreeMap;

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::log::warn;
use url::Url;

pub const REQUEST_ID_HEADER: &str = "x-pulseback-request-id";

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    message: String,
    params: Option<BTreeMap<String, Vec<String>>>,
}

/// An error reported by the service itself, i.e. a non-2xx response that made
/// it back over the wire. `params` carries field-level validation messages
/// when the server includes them.
#[derive(Debug, Clone)]
pub struct ApiError {
    status_code: StatusCode,
    message: String,
    params: Option<BTreeMap<String, Vec<String>>>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "({}) {}", self.status_code, self.message)?;
        if let Some(ref params) = self.params {
            for (key, errors) in params {
                writeln!(f, "  [{}]:", key)?;
                for error in errors {
                    writeln!(f, "    - {}", error)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// The outcome of a single API call: the deserialized payload (or the
/// server-reported error) along with the response metadata the service
/// attaches to every call.
#[derive(Debug, Clone)]
pub struct Response<T> {
    inner: Result<T, ApiError>,
    url: Url,
    request_id: Option<String>,
    status_code: StatusCode,
    headers: http::HeaderMap,
}

impl<T> Response<T> {
    pub fn into_inner(self) -> Result<T, ApiError> {
        self.inner
    }

    pub fn inner(&self) -> &Result<T, ApiError> {
        &self.inner
    }

    pub fn request_id(&self) -> &Option<String> {
        &self.request_id
    }

    pub fn headers(&self) -> &http::HeaderMap {
        &self.headers
    }

    pub fn status_code(&self) -> http::StatusCode {
        self.status_code
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn is_err(&self) -> bool {
        self.inner.is_err()
    }

    pub fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }
}

impl<T> Response<T>
where
    T: DeserializeOwned,
{
    pub(crate) async fn from_raw_response(
        raw: reqwest::Response,
    ) -> Result<Self, crate::Error> {
        let url = raw.url().clone();
        let status_code = raw.status();
        let headers = raw.headers().clone();
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_owned());

        let body = raw.text().await?;

        let inner = if status_code.is_success() {
            // Some successful calls (e.g. revoke) have nothing to say. An
            // empty body stands for `null` so that unit payloads parse.
            let body = if body.is_empty() { "null" } else { &body };
            Ok(serde_json::from_str(body)?)
        } else {
            // Attempt to parse the error as json
            let error_body: Result<ApiErrorBody, serde_json::Error> =
                serde_json::from_str(&body);
            match error_body {
                | Ok(error_body) => {
                    Err(ApiError {
                        status_code,
                        message: error_body.message,
                        params: error_body.params,
                    })
                }
                | Err(e) => {
                    warn!(
                        "Response error body is not json. Error: {}. Body: {}",
                        e, body
                    );
                    Err(ApiError {
                        status_code,
                        message: body,
                        params: None,
                    })
                }
            }
        };

        Ok(Self {
            inner,
            url,
            request_id,
            status_code,
            headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Payload {
        key: String,
    }

    fn raw(status: u16, body: &str) -> reqwest::Response {
        let raw = http::Response::builder()
            .status(status)
            .header(REQUEST_ID_HEADER, "req_test")
            .body(body.to_owned())
            .unwrap();
        reqwest::Response::from(raw)
    }

    #[tokio::test]
    async fn success_body_is_deserialized() {
        let response: Response<Payload> =
            Response::from_raw_response(raw(200, r#"{"key":"abc123"}"#))
                .await
                .unwrap();

        assert!(response.is_ok());
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.request_id().as_deref(), Some("req_test"));
        let payload = response.into_inner().unwrap();
        assert_eq!(payload.key, "abc123");
    }

    #[tokio::test]
    async fn empty_success_body_parses_as_unit() {
        let response: Response<()> =
            Response::from_raw_response(raw(200, "")).await.unwrap();

        assert!(response.is_ok());
        response.into_inner().unwrap();
    }

    #[tokio::test]
    async fn json_error_body_becomes_api_error() {
        let body = r#"{
            "message": "Request does not conform to schema",
            "params": { "name": ["name must be between 2 and 64 characters"] },
            "hint": "ignored by older clients"
        }"#;
        let response: Response<Payload> =
            Response::from_raw_response(raw(422, body)).await.unwrap();

        assert!(response.is_err());
        assert_eq!(
            response.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        let error = response.into_inner().unwrap_err();
        let rendered = error.to_string();
        assert!(rendered.contains("Request does not conform to schema"));
        assert!(rendered
            .contains("name must be between 2 and 64 characters"));
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_verbatim() {
        let response: Response<Payload> =
            Response::from_raw_response(raw(502, "upstream exploded"))
                .await
                .unwrap();

        assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
        let error = response.into_inner().unwrap_err();
        assert!(error.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn mismatched_success_body_is_a_protocol_error() {
        let result: Result<Response<Payload>, crate::Error> =
            Response::from_raw_response(raw(200, "")).await;

        assert!(matches!(result, Err(crate::Error::ProtocolError(_))));
    }
}
