use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the gene-name (HGNC) service; lookups append `/<key>`
    pub gene_service_url: String,
    /// Base URL of the HPO term service, used for names of unknown cancers
    #[serde(default = "default_term_service_url")]
    pub term_service_url: String,
    /// Patient record edited by the application
    #[serde(default)]
    pub data_file: String,
    /// Pedigree node the record belongs to
    #[serde(default)]
    pub subject_id: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_term_service_url() -> String {
    "http://localhost:8080/rest/vocabularies/hpo/terms".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gene_service_url: "http://localhost:8080/rest/vocabularies/hgnc/terms".to_string(),
            term_service_url: default_term_service_url(),
            data_file: String::new(),
            subject_id: 0,
            log_level: default_log_level(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".pedigree-details"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config, falling back to defaults when absent or unreadable
    pub fn load() -> Config {
        let Some(config_path) = Self::config_path() else {
            return Config::default();
        };
        if !config_path.exists() {
            return Config::default();
        }

        match fs::read_to_string(&config_path)
            .map_err(anyhow::Error::from)
            .and_then(|contents| serde_json::from_str(&contents).map_err(anyhow::Error::from))
        {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Patient record path; defaults to `patient.json` in the config directory
    pub fn data_path(&self) -> Option<PathBuf> {
        if !self.data_file.is_empty() {
            return Some(PathBuf::from(&self.data_file));
        }
        Self::config_dir().map(|dir| dir.join("patient.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("pedigree-details.log"))
    }

    pub fn endpoints(&self) -> ExternalEndpoints {
        ExternalEndpoints {
            gene_service_url: self.gene_service_url.trim_end_matches('/').to_string(),
            term_service_url: self.term_service_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Addresses of the services the widgets talk to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEndpoints {
    pub gene_service_url: String,
    pub term_service_url: String,
}

impl ExternalEndpoints {
    pub fn gene_lookup_url(&self, key: &str) -> String {
        format!("{}/{}", self.gene_service_url, key)
    }

    pub fn term_lookup_url(&self, id: &str) -> String {
        format!("{}/{}", self.term_service_url, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"gene_service_url":"http://genes.test/hgnc/"}"#).unwrap();
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.endpoints().gene_lookup_url("GSG1L"),
            "http://genes.test/hgnc/GSG1L"
        );
        assert_eq!(
            config.endpoints().term_lookup_url("HP:0100570"),
            "http://localhost:8080/rest/vocabularies/hpo/terms/HP:0100570"
        );
    }

    #[test]
    fn test_explicit_data_file_wins() {
        let config = Config {
            data_file: "/tmp/p.json".to_string(),
            ..Config::default()
        };
        assert_eq!(config.data_path(), Some(PathBuf::from("/tmp/p.json")));
    }
}
