use crate::{
    backend::BackendOrigin,
    error::{
        BadEnvVarSnafu, InvalidPublicOriginSnafu, NoVerifyTargetSnafu, ParseServerAddressSnafu,
        PortalResult,
    },
};
use dotenvy::var;
use snafu::{ResultExt, ensure};
use std::{env::VarError, net::SocketAddr, path::PathBuf, sync::Arc};

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_ASSETS_DIR: &str = "public";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_config: Arc<ServerConfig>,
    backend_origin: Arc<BackendOrigin>,
    public_origin: Option<Arc<str>>,
}

impl RuntimeConfiguration {
    pub fn new() -> PortalResult<Self> {
        let public_origin = optional_env_var("CERTPORTAL_PUBLIC_ORIGIN")?
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_public_origin(&raw))
            .transpose()?;

        Self::from_parts(ServerConfig::new()?, BackendOrigin::from_env(), public_origin)
    }

    /// The verify call is made by this process, so a same-origin backend is only reachable
    /// through an explicitly configured public origin. Request headers are never trusted for it.
    pub fn from_parts(
        server_config: ServerConfig,
        backend_origin: BackendOrigin,
        public_origin: Option<String>,
    ) -> PortalResult<Self> {
        ensure!(
            !backend_origin.is_same_origin() || public_origin.is_some(),
            NoVerifyTargetSnafu
        );

        Ok(Self {
            server_config: Arc::new(server_config),
            backend_origin: Arc::new(backend_origin),
            public_origin: public_origin.map(Arc::from),
        })
    }

    pub fn server_config(&self) -> Arc<ServerConfig> {
        self.server_config.clone()
    }

    pub fn backend_origin(&self) -> &BackendOrigin {
        &self.backend_origin
    }

    /// Origin the browser reaches the portal (and a same-origin backend) on, e.g. the reverse proxy.
    pub fn public_origin(&self) -> Option<&str> {
        self.public_origin.as_deref()
    }
}

pub fn parse_public_origin(raw: &str) -> PortalResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or_default();

    ensure!(
        !host.is_empty() && !host.contains(['/', '?', '#', ' ']),
        InvalidPublicOriginSnafu { original: raw }
    );
    Ok(trimmed.to_string())
}

#[derive(Debug)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub assets_dir: PathBuf,
}

impl ServerConfig {
    pub fn new() -> PortalResult<Self> {
        let address = optional_env_var("CERTPORTAL_SERVER_IP")?
            .unwrap_or_else(|| DEFAULT_SERVER_IP.to_string());
        let assets_dir = optional_env_var("CERTPORTAL_ASSETS_DIR")?
            .unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string());

        Ok(Self {
            address: address
                .parse()
                .context(ParseServerAddressSnafu { original: address })?,
            assets_dir: PathBuf::from(assets_dir),
        })
    }
}

fn optional_env_var(name: &'static str) -> PortalResult<Option<String>> {
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(e) => Err(e).context(BadEnvVarSnafu { name }),
    }
}
