//! Google Cloud project id resolution.
//!
//! Answers the standard "managed compute or developer workstation"
//! question: inside Cloud Run (and other managed runtimes) the local
//! metadata server knows the project without any credential material;
//! everywhere else the project comes from application default
//! credentials. The metadata probe is bounded to five seconds; off
//! managed compute the address is a dead link-local host.

use crate::error::{AgentError, Result};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Default base address of the Google Cloud metadata server.
pub const METADATA_HOST: &str = "http://metadata.google.internal";

const METADATA_PROJECT_ID_PATH: &str = "/computeMetadata/v1/project/project-id";
const METADATA_FLAVOR_HEADER: &str = "Metadata-Flavor";
const METADATA_FLAVOR_VALUE: &str = "Google";
const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variable pointing at an explicit credentials file.
pub const ENV_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Which resolution path produced the project id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectIdSource {
    /// The metadata server answered the probe.
    MetadataServer,
    /// Application default credentials supplied the project.
    ApplicationDefault,
}

/// A resolved project id together with its provenance.
#[derive(Debug, Clone)]
pub struct ResolvedProject {
    pub project_id: String,
    pub source: ProjectIdSource,
}

/// Resolves the Google Cloud project id for this process.
pub struct IdentityResolver {
    http: reqwest::Client,
    metadata_host: String,
    credentials_path: Option<PathBuf>,
}

impl IdentityResolver {
    /// Create a resolver with the production metadata address and
    /// credential discovery from the ambient environment.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            metadata_host: METADATA_HOST.to_string(),
            credentials_path: None,
        }
    }

    /// Override the metadata server base address.
    pub fn with_metadata_host(mut self, host: impl Into<String>) -> Self {
        self.metadata_host = host.into();
        self
    }

    /// Override the application default credentials file location.
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Resolve the project id, probing the metadata server first and
    /// falling back to application default credentials.
    ///
    /// A metadata failure only triggers the fallback; a fallback failure
    /// is returned to the caller and is fatal at startup.
    pub async fn resolve(&self) -> Result<ResolvedProject> {
        match self.probe_metadata().await {
            Ok(project_id) => Ok(ResolvedProject {
                project_id,
                source: ProjectIdSource::MetadataServer,
            }),
            Err(err) => {
                debug!(
                    error = %err,
                    "metadata server probe failed, falling back to application default credentials"
                );
                let project_id = self.application_default_project()?;
                Ok(ResolvedProject {
                    project_id,
                    source: ProjectIdSource::ApplicationDefault,
                })
            }
        }
    }

    /// Ask the metadata server for the project id.
    async fn probe_metadata(&self) -> Result<String> {
        let url = format!(
            "{}{}",
            self.metadata_host.trim_end_matches('/'),
            METADATA_PROJECT_ID_PATH
        );

        let response = self
            .http
            .get(&url)
            .header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE)
            .timeout(METADATA_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::metadata(format!(
                "metadata server returned status {}",
                status
            )));
        }

        // The body is the project id, returned verbatim.
        let project_id = response.text().await?;
        if project_id.is_empty() {
            return Err(AgentError::metadata("metadata server returned an empty project id"));
        }
        Ok(project_id)
    }

    /// Read the project id associated with application default credentials.
    fn application_default_project(&self) -> Result<String> {
        let path = self
            .credentials_path
            .clone()
            .or_else(default_credentials_path)
            .ok_or_else(|| {
                AgentError::credentials("no application default credentials location found")
            })?;

        let raw = fs::read_to_string(&path).map_err(|err| {
            AgentError::credentials(format!("failed to read {}: {}", path.display(), err))
        })?;

        project_from_credentials(&raw)
    }
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Locate the application default credentials file: an explicit
/// `GOOGLE_APPLICATION_CREDENTIALS` path wins, else the well-known
/// gcloud location under the user config directory.
fn default_credentials_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(ENV_APPLICATION_CREDENTIALS) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("gcloud/application_default_credentials.json"))
}

/// Extract the project id from a credentials JSON document.
///
/// Authorized-user credentials (the `gcloud auth application-default
/// login` shape) carry it as `quota_project_id`; service-account keys
/// carry it as `project_id`.
fn project_from_credentials(raw: &str) -> Result<String> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| AgentError::credentials(format!("malformed credentials file: {}", err)))?;

    let project_id = value
        .get("quota_project_id")
        .and_then(Value::as_str)
        .or_else(|| value.get("project_id").and_then(Value::as_str))
        .ok_or_else(|| {
            AgentError::credentials("application default credentials carry no project id")
        })?;

    if project_id.is_empty() {
        return Err(AgentError::credentials("credentials project id is empty"));
    }
    Ok(project_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_from_authorized_user_credentials() {
        let raw = r#"{"type":"authorized_user","client_id":"x","quota_project_id":"dev-proj"}"#;
        assert_eq!(project_from_credentials(raw).unwrap(), "dev-proj");
    }

    #[test]
    fn test_project_from_service_account_credentials() {
        let raw = r#"{"type":"service_account","project_id":"sa-proj","private_key_id":"x"}"#;
        assert_eq!(project_from_credentials(raw).unwrap(), "sa-proj");
    }

    #[test]
    fn test_quota_project_wins_over_project() {
        let raw = r#"{"quota_project_id":"quota-proj","project_id":"sa-proj"}"#;
        assert_eq!(project_from_credentials(raw).unwrap(), "quota-proj");
    }

    #[test]
    fn test_credentials_without_project_id() {
        let err = project_from_credentials(r#"{"type":"authorized_user"}"#).unwrap_err();
        assert!(matches!(err, AgentError::Credentials(_)));

        let err = project_from_credentials("not json").unwrap_err();
        assert!(matches!(err, AgentError::Credentials(_)));
    }
}
