use crate::{
    error::{BuildHttpClientSnafu, PortalResult},
    lookup::{LookupError, VerifiedStudent, VerifyClient},
};
use async_trait::async_trait;
use reqwest::Client;
use snafu::ResultExt;

/// Talks to the backend's `/verify` endpoint. No retries and no client-side timeout.
#[derive(Clone, Debug)]
pub struct HttpVerifyClient {
    http: Client,
}

impl HttpVerifyClient {
    pub fn new() -> PortalResult<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(BuildHttpClientSnafu)?;

        Ok(Self { http })
    }
}

#[async_trait]
impl VerifyClient for HttpVerifyClient {
    async fn verify(&self, url: &str) -> Result<VerifiedStudent, LookupError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            // 400, 404 and 5xx all read as "not found" to the student
            debug!(%status, "verify rejected");
            return Err(LookupError::NotFound {
                status: status.as_u16(),
            });
        }

        response
            .json::<VerifiedStudent>()
            .await
            .map_err(|e| transport(&e))
    }
}

// logged once by the caller, alongside the lookup that failed
fn transport(e: &reqwest::Error) -> LookupError {
    LookupError::Transport {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::HttpVerifyClient;
    use crate::lookup::{LookupError, VerifyClient};
    use crate::test_support::serve;
    use axum::{
        Json, Router,
        extract::Query,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
    };
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize)]
    struct VerifyQuery {
        name: String,
        student_id: String,
    }

    #[derive(Serialize)]
    struct Found {
        name: String,
        email: String,
        student_id: String,
        course: String,
        certificate_id: String,
        valid: bool,
    }

    async fn fake_verify(Query(VerifyQuery { name, student_id }): Query<VerifyQuery>) -> Response {
        match (name.to_lowercase().as_str(), student_id.as_str()) {
            ("alice smith", "123") => Json(Found {
                name: "Alice Smith".into(),
                email: "alice@example.com".into(),
                student_id,
                course: "Rust Workshop".into(),
                certificate_id: "CERT-123".into(),
                valid: true,
            })
            .into_response(),
            ("broken", _) => "not json".into_response(),
            ("crash", _) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    fn fake_backend() -> Router {
        Router::new().route("/verify", get(fake_verify))
    }

    #[tokio::test]
    async fn reads_canonical_name_and_extras() {
        let addr = serve(fake_backend()).await;
        let client = HttpVerifyClient::new().unwrap();

        let student = client
            .verify(&format!("http://{addr}/verify?name=alice%20smith&student_id=123"))
            .await
            .unwrap();

        assert_eq!(student.name, "Alice Smith");
        assert_eq!(student.course.as_deref(), Some("Rust Workshop"));
        assert_eq!(student.certificate_id.as_deref(), Some("CERT-123"));
    }

    #[tokio::test]
    async fn non_success_status_is_not_found() {
        let addr = serve(fake_backend()).await;
        let client = HttpVerifyClient::new().unwrap();

        let err = client
            .verify(&format!("http://{addr}/verify?name=Bob&student_id=9"))
            .await
            .unwrap_err();

        assert_eq!(err, LookupError::NotFound { status: 404 });
    }

    #[tokio::test]
    async fn server_error_is_not_found() {
        let addr = serve(fake_backend()).await;
        let client = HttpVerifyClient::new().unwrap();

        let err = client
            .verify(&format!("http://{addr}/verify?name=crash&student_id=1"))
            .await
            .unwrap_err();

        assert_eq!(err, LookupError::NotFound { status: 500 });
        assert_eq!(
            err.user_message(),
            "Student not found. Please check your name and student ID."
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_transport_error() {
        let addr = serve(fake_backend()).await;
        let client = HttpVerifyClient::new().unwrap();

        let err = client
            .verify(&format!("http://{addr}/verify?name=broken&student_id=1"))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Transport { ref message } if !message.is_empty()));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let addr = serve(fake_backend()).await;
        let client = HttpVerifyClient::new().unwrap();

        // nothing listens on port 9 locally
        let err = client
            .verify(&format!("http://{}:9/verify?name=a&student_id=1", addr.ip()))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Transport { .. }));
    }
}
