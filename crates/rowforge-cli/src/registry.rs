use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use rowforge_core::Provider;
use rowforge_provider::PostgresProvider;

/// Providers available to the current process, keyed by configured name.
///
/// Built once at startup from explicit config paths and passed by reference
/// into command handlers; there is no ambient global provider state. A config
/// that fails to load or connect is logged and skipped, so one broken
/// provider does not take the others down.
pub struct ProviderRegistry {
    providers: HashMap<String, Box<dyn Provider>>,
}

impl ProviderRegistry {
    pub async fn from_configs(paths: &[impl AsRef<Path>]) -> Self {
        let mut providers: HashMap<String, Box<dyn Provider>> = HashMap::new();
        for path in paths {
            let path = path.as_ref();
            match PostgresProvider::new(path).await {
                Ok(provider) => {
                    providers.insert(provider.name().to_string(), Box::new(provider));
                }
                Err(err) => {
                    warn!(config = %path.display(), error = %err, "skipping provider");
                }
            }
        }
        Self { providers }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Provider> {
        self.providers.get(name).map(Box::as_ref)
    }

    /// The sole registered provider, if exactly one config loaded.
    pub fn sole(&self) -> Option<&dyn Provider> {
        if self.providers.len() == 1 {
            self.providers.values().next().map(Box::as_ref)
        } else {
            None
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
