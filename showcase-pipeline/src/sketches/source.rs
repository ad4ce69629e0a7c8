//! Where sketch bytes come from.

use super::FetchError;
use std::time::Duration;
use url::Url;

/// Fetches the raw bytes behind a URL.
#[allow(async_fn_in_trait)]
pub trait SketchSource {
    /// Performs one attempt; any failure is reported, never retried.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// HTTP source with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpSketchSource {
    client: reqwest::Client,
}

impl HttpSketchSource {
    /// Creates a source whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl SketchSource for HttpSketchSource {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| classify(url, e))?;
        Ok(body.to_vec())
    }
}

fn classify(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const SKETCH: &str = "/UBC-MDS/DSCI-532_2026_7_dash/main/img/sketch.png";

    async fn setup_api(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SKETCH))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    fn source() -> HttpSketchSource {
        HttpSketchSource::new(Duration::from_millis(300)).unwrap()
    }

    fn sketch_url(server: &MockServer) -> Url {
        Url::parse(&format!("{}{SKETCH}", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn returns_body_on_success() {
        let server = setup_api(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec())).await;

        let bytes = source().fetch(&sketch_url(&server)).await.unwrap();

        assert_eq!(bytes, b"png");
    }

    #[tokio::test]
    async fn missing_file_is_a_status_error() {
        let server = setup_api(ResponseTemplate::new(404)).await;

        let result = source().fetch(&sketch_url(&server)).await;

        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn stalled_response_is_a_timeout() {
        let server = setup_api(
            ResponseTemplate::new(200)
                .set_body_bytes(b"png".to_vec())
                .set_delay(Duration::from_secs(5)),
        )
        .await;

        let result = source().fetch(&sketch_url(&server)).await;

        assert!(matches!(result, Err(FetchError::Timeout { .. })));
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = Url::parse(&format!("http://127.0.0.1:{port}{SKETCH}")).unwrap();

        let result = source().fetch(&url).await;

        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
