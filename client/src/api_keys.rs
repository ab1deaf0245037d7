use http::Method;
use pulseback_api_model::{
    ApiKey,
    CreateApiKeyRequest,
    CreateApiKeyResponse,
    Paginated,
};

use crate::client::RequestRunner;
use crate::{Response, Result};

/// Generates a new API key
pub async fn gen<T>(
    client: &impl RequestRunner,
    name: T,
) -> Result<Response<CreateApiKeyResponse>>
where
    T: AsRef<str>,
{
    let path = "/v1/api_keys";
    let path = client.make_url(path)?;

    let body = CreateApiKeyRequest {
        name: name.as_ref().to_owned(),
    };

    client.run_with_body(Method::POST, path, body).await
}

/// Lists all api keys associated with this account
pub async fn list(
    client: &impl RequestRunner,
) -> Result<Response<Paginated<ApiKey>>> {
    let path = "/v1/api_keys";
    let path = client.make_url(path)?;

    client.run(Method::GET, path).await
}

/// Revokes an API key given its id
pub async fn revoke<T>(
    client: &impl RequestRunner,
    key_id: T,
) -> Result<Response<()>>
where
    T: AsRef<str>,
{
    let path = format!("/v1/api_keys/{}", key_id.as_ref());
    let path = client.make_url(&path)?;

    client.run(Method::DELETE, path).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::RequestBuilder;
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use url::Url;

    use super::*;

    struct RecordedCall {
        method: Method,
        path: String,
        body: Option<serde_json::Value>,
    }

    /// Serves a canned response and records every call it sees.
    struct RecordingRunner {
        status: u16,
        body: String,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl RecordingRunner {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_owned(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(
            &self,
            method: Method,
            url: Url,
            body: Option<serde_json::Value>,
        ) {
            self.calls.lock().unwrap().push(RecordedCall {
                method,
                path: url.path().to_owned(),
                body,
            });
        }

        async fn respond<T: DeserializeOwned>(&self) -> Result<Response<T>> {
            let raw = http::Response::builder()
                .status(self.status)
                .body(self.body.clone())
                .unwrap();
            Response::from_raw_response(reqwest::Response::from(raw)).await
        }
    }

    #[async_trait]
    impl RequestRunner for RecordingRunner {
        fn make_url(&self, path: &str) -> Result<Url> {
            Ok(Url::parse("http://testing.local")?.join(path)?)
        }

        fn prepare_request(
            &self,
            _method: Method,
            _url: Url,
        ) -> Result<RequestBuilder> {
            unimplemented!("calls are intercepted in run/run_with_body")
        }

        async fn process_response<T>(
            &self,
            response: reqwest::Response,
        ) -> Result<Response<T>>
        where
            T: DeserializeOwned + Send,
        {
            Response::from_raw_response(response).await
        }

        async fn run<T>(
            &self,
            method: Method,
            url: Url,
        ) -> Result<Response<T>>
        where
            T: DeserializeOwned + Send,
        {
            self.record(method, url, None);
            self.respond().await
        }

        async fn run_with_body<T, B>(
            &self,
            method: Method,
            url: Url,
            body: B,
        ) -> Result<Response<T>>
        where
            T: DeserializeOwned + Send,
            B: Serialize + Send + Sync,
        {
            let body = serde_json::to_value(&body).unwrap();
            self.record(method, url, Some(body));
            self.respond().await
        }
    }

    #[tokio::test]
    async fn gen_posts_the_name_and_returns_the_key() {
        let runner = RecordingRunner::new(
            201,
            r#"{"key":"sk_01HQX_c2VjcmV0cGFydA"}"#,
        );

        let response = gen(&runner, "Jenkins Key").await.unwrap();
        let created = response.into_inner().unwrap();
        assert_eq!(created.key, "sk_01HQX_c2VjcmV0cGFydA");

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].path, "/v1/api_keys");
        assert_eq!(
            calls[0].body,
            Some(serde_json::json!({"name": "Jenkins Key"}))
        );
    }

    #[tokio::test]
    async fn gen_surfaces_server_rejections() {
        let runner = RecordingRunner::new(
            403,
            r#"{"message":"Insufficient permissions"}"#,
        );

        let response = gen(&runner, "Jenkins Key").await.unwrap();
        assert_eq!(response.status_code(), http::StatusCode::FORBIDDEN);
        let error = response.into_inner().map(|_| ()).unwrap_err();
        assert!(error.to_string().contains("Insufficient permissions"));
    }

    #[tokio::test]
    async fn list_fetches_the_whole_collection() {
        let runner = RecordingRunner::new(
            200,
            r#"{
                "next_cursor": null,
                "has_more": false,
                "data": [
                    {
                        "id": "key_01HQX",
                        "name": "Jenkins Key",
                        "created_at": "2023-06-02T11:02:45Z"
                    }
                ]
            }"#,
        );

        let response = list(&runner).await.unwrap();
        let page = response.into_inner().unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "Jenkins Key");

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0].method, Method::GET);
        assert_eq!(calls[0].path, "/v1/api_keys");
        assert_eq!(calls[0].body, None);
    }

    #[tokio::test]
    async fn revoke_deletes_by_id() {
        let runner = RecordingRunner::new(200, "");

        let response = revoke(&runner, "key_01HQX").await.unwrap();
        assert!(response.is_ok());

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0].method, Method::DELETE);
        assert_eq!(calls[0].path, "/v1/api_keys/key_01HQX");
    }
}
