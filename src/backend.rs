use dotenvy::var;

pub const BACKEND_ORIGIN_VAR: &str = "CERTPORTAL_BACKEND_ORIGIN";

/// Base URL prefixed onto relative API paths when the backend lives on another origin.
///
/// An empty origin means the backend is served alongside the portal, so paths stay relative.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackendOrigin(String);

impl BackendOrigin {
    pub fn resolve(raw: Option<&str>) -> Self {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        Self(trimmed.trim_end_matches('/').to_string())
    }

    /// Runtime environment (including `.env`) wins over the value baked in at build time.
    pub fn from_env() -> Self {
        match var(BACKEND_ORIGIN_VAR) {
            Ok(raw) => Self::resolve(Some(&raw)),
            Err(_) => Self::resolve(option_env!("CERTPORTAL_BACKEND_ORIGIN")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_same_origin(&self) -> bool {
        self.0.is_empty()
    }

    pub fn qualify(&self, path: &str) -> String {
        if self.is_same_origin() || path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        if path.starts_with('/') {
            format!("{}{path}", self.0)
        } else {
            format!("{}/{path}", self.0)
        }
    }
}
