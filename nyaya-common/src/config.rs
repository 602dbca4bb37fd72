//! Configuration loading and root folder resolution
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`NYAYA_ROOT_FOLDER`, then `NYAYA_ROOT`)
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "nyaya.db";

/// Default port of the REST backend
pub const DEFAULT_PORT: u16 = 5810;

/// Default upload limit for voice recordings (25 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub log_level: Option<String>,
    pub server: ServerConfig,
    pub speech: SpeechConfig,
    pub client: ClientConfig,
}

/// `[server]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            cors_origins: vec!["*".to_string()],
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// `[speech]` table. A missing URL disables the corresponding engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whisper-compatible transcription endpoint
    pub stt_url: Option<String>,
    /// Text-to-speech endpoint returning audio bytes
    pub tts_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_url: None,
            tts_url: None,
            timeout_secs: 60,
        }
    }
}

/// `[client]` table used by the `nyaya` CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: format!("http://127.0.0.1:{}", DEFAULT_PORT),
        }
    }
}

/// Parse a TOML config file.
///
/// A missing file is not an error and yields the defaults; a malformed file is.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        debug!("Config file {} not found, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Load the platform config file, falling back to defaults with a warning when
/// the file is unreadable.
pub fn load_default_toml_config() -> TomlConfig {
    match config_file_path() {
        Some(path) => match load_toml_config(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                TomlConfig::default()
            }
        },
        None => TomlConfig::default(),
    }
}

/// Locate the config file for the platform, if any exists
pub fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("nyaya").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/nyaya/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("nyaya"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/nyaya"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("nyaya"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/nyaya"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("nyaya"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\nyaya"))
    } else {
        PathBuf::from("./nyaya_data")
    }
}

/// Resolves the root folder holding the database
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
    config_file: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            cli_arg: None,
            config_file: None,
        }
    }

    /// Command-line override
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    /// Read the TOML layer from an explicit file instead of the platform path
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Resolve the root folder. Never fails; each layer falls through to the next.
    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            debug!("[{}] root folder from command line", self.module_name);
            return path.clone();
        }

        for var in ["NYAYA_ROOT_FOLDER", "NYAYA_ROOT"] {
            if let Ok(path) = std::env::var(var) {
                if !path.is_empty() {
                    debug!("[{}] root folder from {}", self.module_name, var);
                    return PathBuf::from(path);
                }
            }
        }

        let config_path = self.config_file.clone().or_else(config_file_path);
        if let Some(path) = config_path {
            match load_toml_config(&path) {
                Ok(TomlConfig {
                    root_folder: Some(root),
                    ..
                }) => {
                    debug!("[{}] root folder from {}", self.module_name, path.display());
                    return root;
                }
                Ok(_) => {}
                Err(e) => warn!("[{}] {}", self.module_name, e),
            }
        }

        default_root_folder()
    }
}

/// Creates the root folder and derives paths inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }
}
