//! Configuration loading for the intake service
//!
//! Resolution priority, highest first:
//! 1. Command-line `--config` argument
//! 2. `RDC_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/rdc/config.toml`)
//! 4. Compiled defaults (local storage under the platform data directory)
//!
//! Individual environment variables override whatever the file said, so a
//! deployment can flip the storage backend without editing the file.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Per-file upload ceiling (10 MiB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Listen address, e.g. "127.0.0.1:5810"
    pub bind_addr: String,
    pub database_path: PathBuf,
    pub max_file_size: usize,
    pub storage: StorageConfig,
}

/// Image storage backend, selected once at startup
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Development: files under a local upload root, served statically
    Local { upload_root: PathBuf },
    /// Production: S3-compatible object store; local serving disabled
    Object {
        bucket: String,
        region: String,
        /// Override for S3-compatible gateways; defaults to the
        /// virtual-host AWS endpoint when absent
        endpoint: Option<String>,
        access_token: Option<String>,
    },
}

/// On-disk config file shape
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    bind: Option<String>,
    database: Option<PathBuf>,
    #[serde(default)]
    storage: StorageFile,
}

#[derive(Debug, Default, Deserialize)]
struct StorageFile {
    mode: Option<String>,
    upload_root: Option<PathBuf>,
    bucket: Option<String>,
    region: Option<String>,
    endpoint: Option<String>,
    access_token: Option<String>,
}

impl IntakeConfig {
    /// Load configuration following the resolution priority above
    pub fn load(cli_config: Option<&Path>) -> Result<Self> {
        let mut file = ConfigFile::default();

        if let Some(path) = resolve_config_file(cli_config) {
            info!("Loading config file: {}", path.display());
            let raw = std::fs::read_to_string(&path)?;
            file = toml::from_str(&raw)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        }

        let bind_addr = std::env::var("RDC_BIND")
            .ok()
            .or(file.bind)
            .unwrap_or_else(|| "127.0.0.1:5810".to_string());

        let database_path = std::env::var("RDC_DATABASE")
            .ok()
            .map(PathBuf::from)
            .or(file.database)
            .unwrap_or_else(|| default_data_dir().join("rdc.db"));

        let mode = std::env::var("RDC_STORAGE_MODE")
            .ok()
            .or(file.storage.mode)
            .unwrap_or_else(|| "local".to_string());

        let storage = match mode.as_str() {
            "local" => StorageConfig::Local {
                upload_root: file
                    .storage
                    .upload_root
                    .unwrap_or_else(|| default_data_dir().join("uploads").join("images")),
            },
            "object" => StorageConfig::Object {
                bucket: std::env::var("S3_BUCKET")
                    .ok()
                    .or(file.storage.bucket)
                    .ok_or_else(|| {
                        Error::Config("S3_BUCKET must be set for object storage".to_string())
                    })?,
                region: std::env::var("AWS_REGION")
                    .ok()
                    .or(file.storage.region)
                    .ok_or_else(|| {
                        Error::Config("AWS_REGION must be set for object storage".to_string())
                    })?,
                endpoint: std::env::var("S3_ENDPOINT").ok().or(file.storage.endpoint),
                access_token: std::env::var("S3_ACCESS_TOKEN")
                    .ok()
                    .or(file.storage.access_token),
            },
            other => {
                return Err(Error::Config(format!(
                    "Unknown storage mode '{}' (expected 'local' or 'object')",
                    other
                )))
            }
        };

        Ok(Self {
            bind_addr,
            database_path,
            max_file_size: MAX_FILE_SIZE,
            storage,
        })
    }
}

/// Locate the config file, if any exists
fn resolve_config_file(cli_config: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_config {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("RDC_CONFIG") {
        return Some(PathBuf::from(path));
    }

    let default = dirs::config_dir()?.join("rdc").join("config.toml");
    default.exists().then_some(default)
}

/// Platform data directory fallback
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("rdc"))
        .unwrap_or_else(|| PathBuf::from("./rdc_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_parses_local_mode() {
        let file: ConfigFile = toml::from_str(
            r#"
            bind = "0.0.0.0:8080"
            database = "/var/lib/rdc/rdc.db"

            [storage]
            mode = "local"
            upload_root = "/var/lib/rdc/uploads"
            "#,
        )
        .unwrap();

        assert_eq!(file.bind.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(file.storage.mode.as_deref(), Some("local"));
        assert_eq!(
            file.storage.upload_root,
            Some(PathBuf::from("/var/lib/rdc/uploads"))
        );
    }

    #[test]
    fn config_file_parses_object_mode() {
        let file: ConfigFile = toml::from_str(
            r#"
            [storage]
            mode = "object"
            bucket = "research-intake"
            region = "eu-west-1"
            "#,
        )
        .unwrap();

        assert_eq!(file.storage.mode.as_deref(), Some("object"));
        assert_eq!(file.storage.bucket.as_deref(), Some("research-intake"));
        assert_eq!(file.storage.region.as_deref(), Some("eu-west-1"));
        assert_eq!(file.storage.endpoint, None);
    }

    #[test]
    fn empty_file_is_valid() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert!(file.bind.is_none());
        assert!(file.storage.mode.is_none());
    }
}
