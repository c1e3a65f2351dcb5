use crate::backend::BackendOrigin;
use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use snafu::Snafu;
use std::fmt::Debug;

/// Everything `encodeURIComponent` leaves alone stays literal, so a space becomes `%20` rather than `+`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const FALLBACK_MESSAGE: &str = "Something went wrong.";

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(visibility(pub))]
pub enum LookupError {
    #[snafu(display("Please enter both name and student ID."))]
    Validation,
    #[snafu(display("Student not found. Please check your name and student ID."))]
    NotFound { status: u16 },
    #[snafu(display("{message}"))]
    Transport { message: String },
}

impl LookupError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { message } if message.trim().is_empty() => FALLBACK_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}

/// A trimmed, non-empty name and student ID pair, ready to be forwarded to the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupRequest {
    name: String,
    student_id: String,
}

impl LookupRequest {
    pub fn new(name: &str, student_id: &str) -> Result<Self, LookupError> {
        let (name, student_id) = (name.trim(), student_id.trim());
        if name.is_empty() || student_id.is_empty() {
            return ValidationSnafu.fail();
        }

        Ok(Self {
            name: name.to_string(),
            student_id: student_id.to_string(),
        })
    }

    pub fn query_string(&self) -> String {
        format!(
            "name={}&student_id={}",
            utf8_percent_encode(&self.name, URI_COMPONENT),
            utf8_percent_encode(&self.student_id, URI_COMPONENT)
        )
    }

    pub fn verify_path(&self) -> String {
        format!("/verify?{}", self.query_string())
    }

    pub fn certificate_path(&self) -> String {
        format!("/certificate?{}", self.query_string())
    }
}

/// Body of a successful verify call. Only `name` is required; the rest is informational.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct VerifiedStudent {
    pub name: String,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub certificate_id: Option<String>,
}

#[async_trait]
pub trait VerifyClient: Debug + Send + Sync {
    /// Issues exactly one verify request against `url`. Never retries.
    async fn verify(&self, url: &str) -> Result<VerifiedStudent, LookupError>;
}

/// Where the verify call and the download navigation are sent for one page.
///
/// `public_origin` is the configured origin the portal is published on, used to make the verify URL
/// absolute when the backend shares that origin. The download URL is left for the browser to resolve.
#[derive(Clone, Copy, Debug)]
pub struct Endpoints<'a> {
    origin: &'a BackendOrigin,
    public_origin: Option<&'a str>,
}

impl<'a> Endpoints<'a> {
    pub const fn new(origin: &'a BackendOrigin, public_origin: Option<&'a str>) -> Self {
        Self {
            origin,
            public_origin,
        }
    }

    pub fn verify_url(&self, request: &LookupRequest) -> String {
        let url = self.origin.qualify(&request.verify_path());
        match self.public_origin {
            Some(base) if url.starts_with('/') => format!("{}{url}", base.trim_end_matches('/')),
            _ => url,
        }
    }

    pub fn download_url(&self, request: &LookupRequest) -> String {
        self.origin.qualify(&request.certificate_path())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl Phase {
    pub fn message(&self) -> Option<(MessageKind, &str)> {
        match self {
            Self::Succeeded(msg) => Some((MessageKind::Success, msg.as_str())),
            Self::Failed(msg) => Some((MessageKind::Error, msg.as_str())),
            Self::Idle | Self::Submitting => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight on this form; nothing was sent.
    Busy,
    Failed(LookupError),
    Succeeded { download_url: String },
}

impl SubmitOutcome {
    pub fn download_url(&self) -> Option<&str> {
        match self {
            Self::Succeeded { download_url } => Some(download_url.as_str()),
            Self::Busy | Self::Failed(_) => None,
        }
    }
}

/// State of one lookup form. Owned by a single page, never shared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CertificateForm {
    name: String,
    student_id: String,
    phase: Phase,
}

impl CertificateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(name: impl Into<String>, student_id: impl Into<String>) -> Self {
        let mut form = Self::new();
        form.set_name(name);
        form.set_student_id(student_id);
        form
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.clear_result();
    }

    pub fn set_student_id(&mut self, student_id: impl Into<String>) {
        self.student_id = student_id.into();
        self.clear_result();
    }

    // the rendered page evaluates the same rule in its form sync script
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.name.trim().is_empty() && !self.student_id.trim().is_empty()
    }

    fn clear_result(&mut self) {
        if !self.is_submitting() {
            self.phase = Phase::Idle;
        }
    }

    pub async fn submit(
        &mut self,
        client: &dyn VerifyClient,
        endpoints: Endpoints<'_>,
    ) -> SubmitOutcome {
        if self.is_submitting() {
            debug!("lookup already in flight, ignoring submit");
            return SubmitOutcome::Busy;
        }
        self.phase = Phase::Idle;

        let request = match LookupRequest::new(&self.name, &self.student_id) {
            Ok(request) => request,
            Err(e) => return self.fail(e),
        };

        self.phase = Phase::Submitting;
        let verify_url = endpoints.verify_url(&request);
        debug!(?verify_url, "verifying student");

        match client.verify(&verify_url).await {
            Ok(student) => {
                let download_url = endpoints.download_url(&request);
                info!(name = %student.name, course = ?student.course, certificate_id = ?student.certificate_id, "certificate found");
                self.phase = Phase::Succeeded(format!(
                    "Certificate found for {}. Download starting...",
                    student.name
                ));
                SubmitOutcome::Succeeded { download_url }
            }
            Err(e) => {
                match &e {
                    LookupError::NotFound { status } => info!(status, "no matching student"),
                    _ => warn!(?e, "lookup failed"),
                }
                self.fail(e)
            }
        }
    }

    fn fail(&mut self, error: LookupError) -> SubmitOutcome {
        self.phase = Phase::Failed(error.user_message());
        SubmitOutcome::Failed(error)
    }
}
