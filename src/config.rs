use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

pub const AZURE_DEVOPS_PAT: &str = "AZURE_DEVOPS_PAT";
pub const AZURE_DEVOPS_ORGANIZATION: &str = "AZURE_DEVOPS_ORGANIZATION";
pub const AZURE_DEVOPS_PROJECT: &str = "AZURE_DEVOPS_PROJECT";
pub const AZURE_DEVOPS_REPOSITORY_ID: &str = "AZURE_DEVOPS_REPOSITORY_ID";
pub const AZURE_DEVOPS_BASE_URL: &str = "AZURE_DEVOPS_BASE_URL";
pub const AZURE_OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const AZURE_OPENAI_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const AZURE_OPENAI_MODEL: &str = "AZURE_OPENAI_MODEL";

const DEFAULT_BASE_URL: &str = "https://dev.azure.com";
const DEFAULT_PLANNER_MODEL: &str = "o3-mini";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingKey(&'static str),
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("Failed to read env file: {0}")]
    EnvFile(#[from] dotenv::Error),
}

/// How requests to Azure DevOps are authenticated.
#[derive(Clone, PartialEq, Eq)]
pub enum DevOpsCredential {
    /// Basic auth with an empty user name and the PAT as password
    PersonalAccessToken(String),
    /// Bearer tokens from `azure_identity::DefaultAzureCredential`
    DefaultAzure,
}

impl fmt::Debug for DevOpsCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PersonalAccessToken(_) => f.write_str("PersonalAccessToken(<redacted>)"),
            Self::DefaultAzure => f.write_str("DefaultAzure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevOpsConfig {
    pub base_url: String,
    pub organization: String,
    pub project: String,
    /// Repository whose pull requests are reviewed. Optional so the work item
    /// tool can run against projects without a fixed repository.
    pub repository_id: Option<String>,
    pub credential: DevOpsCredential,
}

#[derive(Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

impl fmt::Debug for PlannerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannerConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

/// Process-wide settings, loaded once at startup and handed to each client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub devops: DevOpsConfig,
    pub planner: Option<PlannerConfig>,
}

impl Config {
    /// Load settings from the process environment, falling back to `env_file`
    /// for a section whose credential is not exported.
    pub fn load(env_file: &Path) -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok(), env_file)
    }

    /// Same as [`Config::load`] with an injectable environment lookup.
    ///
    /// The env file is read into memory; the process environment is never
    /// modified. Environment values always win over file values, and a
    /// section only consults the file when its trigger key
    /// (`AZURE_DEVOPS_PAT` or `AZURE_OPENAI_API_KEY`) is absent from the
    /// environment.
    pub fn load_with<F>(env: F, env_file: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let devops_from_env = from_env(AZURE_DEVOPS_PAT).is_some();
        let planner_from_env = from_env(AZURE_OPENAI_API_KEY).is_some();

        let file_values = if devops_from_env && planner_from_env {
            HashMap::new()
        } else {
            read_env_file(env_file)?
        };

        let devops_lookup = |key: &str| {
            from_env(key).or_else(|| {
                if devops_from_env {
                    None
                } else {
                    file_values.get(key).cloned()
                }
            })
        };
        let planner_lookup = |key: &str| {
            from_env(key).or_else(|| {
                if planner_from_env {
                    None
                } else {
                    file_values.get(key).cloned()
                }
            })
        };

        Ok(Self {
            devops: DevOpsConfig::from_lookup(devops_lookup)?,
            planner: PlannerConfig::from_lookup(planner_lookup)?,
        })
    }
}

impl DevOpsConfig {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(AZURE_DEVOPS_BASE_URL)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: AZURE_DEVOPS_BASE_URL,
                reason: format!("'{}' is not an http(s) URL", base_url),
            });
        }

        let credential = match lookup(AZURE_DEVOPS_PAT) {
            Some(pat) => DevOpsCredential::PersonalAccessToken(pat),
            None => {
                log::info!(
                    "{} not set, falling back to DefaultAzureCredential",
                    AZURE_DEVOPS_PAT
                );
                DevOpsCredential::DefaultAzure
            }
        };

        Ok(Self {
            base_url,
            organization: lookup(AZURE_DEVOPS_ORGANIZATION)
                .ok_or(ConfigError::MissingKey(AZURE_DEVOPS_ORGANIZATION))?,
            project: lookup(AZURE_DEVOPS_PROJECT)
                .ok_or(ConfigError::MissingKey(AZURE_DEVOPS_PROJECT))?,
            repository_id: lookup(AZURE_DEVOPS_REPOSITORY_ID),
            credential,
        })
    }
}

impl PlannerConfig {
    /// Returns `None` when neither the endpoint nor the key is configured.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let endpoint = lookup(AZURE_OPENAI_ENDPOINT);
        let api_key = lookup(AZURE_OPENAI_API_KEY);

        match (endpoint, api_key) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingKey(AZURE_OPENAI_API_KEY)),
            (None, Some(_)) => Err(ConfigError::MissingKey(AZURE_OPENAI_ENDPOINT)),
            (Some(endpoint), Some(api_key)) => Ok(Some(Self {
                endpoint,
                api_key,
                model: lookup(AZURE_OPENAI_MODEL)
                    .unwrap_or_else(|| DEFAULT_PLANNER_MODEL.to_string()),
            })),
        }
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.is_file() {
        log::debug!("Env file {} not found, skipping", path.display());
        return Ok(HashMap::new());
    }

    log::debug!("Reading settings from {}", path.display());
    let mut values = HashMap::new();
    for entry in dotenv::from_path_iter(path)? {
        let (key, value) = entry?;
        values.insert(key, value);
    }
    Ok(values)
}
