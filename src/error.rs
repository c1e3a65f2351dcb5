use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::net::AddrParseError;

pub type PortalResult<T> = Result<T, PortalError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PortalError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse server address {:?}", original))]
    ParseServerAddress {
        source: AddrParseError,
        original: String,
    },
    #[snafu(display("Public origin {:?} must be an absolute http(s) origin", original))]
    InvalidPublicOrigin { original: String },
    #[snafu(display(
        "No backend to verify against: set CERTPORTAL_BACKEND_ORIGIN, or CERTPORTAL_PUBLIC_ORIGIN when a reverse proxy serves the backend on the portal's origin"
    ))]
    NoVerifyTarget,
    #[snafu(display("Error building HTTP client"))]
    BuildHttpClient { source: reqwest::Error },
    #[snafu(display("Nothing lives at {:?}", path))]
    UnknownRoute { path: String },
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found

        let basic_error = |desc: String| {
            html! {
                div class="mx-auto mt-32 max-w-md rounded-2xl border border-rose-400/30 bg-rose-500/10 px-4 py-3 text-sm text-rose-200" role="alert" {
                    strong class="font-bold" {"Certificate Portal Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. }
            | Self::ParseServerAddress { .. }
            | Self::InvalidPublicOrigin { .. }
            | Self::NoVerifyTarget
            | Self::BuildHttpClient { .. } => ISE,
            Self::UnknownRoute { .. } => NF,
        };

        if status_code == NF {
            debug!(?self, "Not found");
        } else {
            error!(?self, "Error!");
        }
        (status_code, basic_error(self.to_string())).into_response()
    }
}
