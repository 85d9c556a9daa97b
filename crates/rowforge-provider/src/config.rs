use std::path::Path;

use serde::{Deserialize, Serialize};

use rowforge_core::{Error, ProviderFormats, Result};

/// Connection and dialect configuration for one provider, read from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderConfig {
    pub provider_name: String,
    pub address: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub formats: ProviderFormats,
}

impl ProviderConfig {
    /// Read and deserialize a TOML config file.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| Error::Config {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        toml::from_str(&contents).map_err(|err| Error::Config {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }

    /// Connection URL for this config. Never log the result: it carries
    /// credentials.
    pub fn connection_url(&self) -> String {
        format!(
            "postgresql://{}:{}/{}?user={}&password={}",
            self.address, self.port, self.database, self.user, self.password
        )
    }
}
