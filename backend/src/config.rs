//! Configuration management.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix under which the management endpoints are mounted by default.
pub const DEFAULT_MANAGEMENT_PREFIX: &str = "/actuator";

/// Configuration structure that matches the TOML file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    git: GitConfig,
    #[serde(default)]
    resource: ResourceConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_management_prefix")]
    management_prefix: String,
    /// Allowed CORS origins; empty means any origin is allowed
    #[serde(default)]
    cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            management_prefix: default_management_prefix(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// The five optional build metadata values.
///
/// The nesting reproduces the dotted key names exactly: `git.branch`,
/// `git.commit.id`, `git.commit.time`, `git.tags`,
/// `git.commit.message.short`. An unset value stays `None` and is
/// reported as `null`, never substituted with a sentinel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitConfig {
    pub branch: Option<String>,
    pub tags: Option<String>,
    #[serde(default)]
    pub commit: CommitConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitConfig {
    pub id: Option<String>,
    pub time: Option<String>,
    #[serde(default)]
    pub message: MessageConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageConfig {
    pub short: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ResourceConfig {
    /// Path to the bundled properties file
    properties_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoggingConfig {
    /// Path to log file (if set, logs will be written to file in addition to stdout)
    log_file: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    log_level: Option<String>,
}

fn default_port() -> u16 {
    gitinfo_types::DEFAULT_PORT
}

fn default_management_prefix() -> String {
    DEFAULT_MANAGEMENT_PREFIX.to_string()
}

fn default_properties_path() -> PathBuf {
    PathBuf::from("git.properties")
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,
    /// Prefix under which the management endpoints are mounted
    pub management_prefix: String,
    /// Allowed CORS origins (empty = any)
    pub cors_allowed_origins: Vec<String>,
    /// Configured build metadata values
    pub git: GitConfig,
    /// Location of the bundled properties file
    pub properties_path: PathBuf,
    /// Path to log file (if set, logs will be written to file in addition to stdout)
    pub log_file: Option<PathBuf>,
    /// Log level (if set, overrides RUST_LOG environment variable)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with full priority chain: CLI args > env vars > config files > defaults.
    ///
    /// Config files are searched in this order:
    /// 1. `.gitinfo.toml` in current directory
    /// 2. `config.toml` in user config directory (~/.config/gitinfo/ on Linux)
    pub fn from_figment(
        port: Option<u16>,
        management_prefix: Option<String>,
        properties_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        // Find config file paths
        let local_config = std::env::current_dir().ok().map(|d| d.join(".gitinfo.toml"));
        let user_config = directories::ProjectDirs::from("", "", "gitinfo")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        // Build figment with priority: defaults < user config < local config < env vars < CLI args
        let mut figment = Figment::new();

        // 1. Start with defaults
        figment = figment.merge(Serialized::defaults(ConfigFile {
            server: ServerConfig::default(),
            git: GitConfig::default(),
            resource: ResourceConfig::default(),
            logging: LoggingConfig::default(),
        }));

        // 2. Merge user config file if it exists
        if let Some(ref path) = user_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // 3. Merge local config file if it exists
        if let Some(ref path) = local_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // 4. Merge environment variables (GITINFO_* prefix)
        figment = figment.merge(
            Env::prefixed("GITINFO_")
                .map(|key| key.as_str().replace("__", ".").into())
                .split("_"),
        );

        // 5. Merge CLI arguments (highest priority)
        if let Some(p) = port {
            figment = figment.merge(Serialized::default("server.port", p));
        }
        if let Some(ref mp) = management_prefix {
            figment = figment.merge(Serialized::default("server.management_prefix", mp));
        }
        if let Some(ref pp) = properties_path {
            figment = figment.merge(Serialized::default("resource.properties_path", pp));
        }

        // Extract the configuration
        let config_file: ConfigFile = figment.extract()?;

        Ok(Self {
            port: config_file.server.port,
            management_prefix: config_file.server.management_prefix,
            cors_allowed_origins: config_file.server.cors_allowed_origins,
            git: config_file.git,
            properties_path: config_file
                .resource
                .properties_path
                .unwrap_or_else(default_properties_path),
            log_file: config_file.logging.log_file,
            log_level: config_file.logging.log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            management_prefix: default_management_prefix(),
            cors_allowed_origins: Vec::new(),
            git: GitConfig::default(),
            properties_path: default_properties_path(),
            log_file: None,
            log_level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        std::env::remove_var("GITINFO_SERVER_PORT");
        std::env::remove_var("GITINFO_GIT_BRANCH");
        std::env::remove_var("GITINFO_GIT_COMMIT_ID");
        std::env::remove_var("GITINFO_GIT_COMMIT_MESSAGE_SHORT");
        std::env::remove_var("GITINFO_RESOURCE_PROPERTIES_PATH");
    }

    #[test]
    #[serial]
    fn test_from_figment_defaults() {
        clear_env();

        // Run in a temp directory to avoid picking up project .gitinfo.toml
        let temp_dir = TempDir::new().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let config = Config::from_figment(None, None, None).unwrap();

        // Restore (ignore errors)
        let _ = std::env::set_current_dir(original_dir);

        assert_eq!(config.port, gitinfo_types::DEFAULT_PORT);
        assert_eq!(config.management_prefix, DEFAULT_MANAGEMENT_PREFIX);
        assert_eq!(config.properties_path, PathBuf::from("git.properties"));
        assert!(config.git.branch.is_none());
        assert!(config.git.commit.id.is_none());
        assert!(config.git.commit.message.short.is_none());
    }

    #[test]
    #[serial]
    fn test_from_figment_cli_args_override() {
        clear_env();

        let temp_dir = TempDir::new().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let config = Config::from_figment(
            Some(9000),
            Some("/manage".to_string()),
            Some(PathBuf::from("build/git.properties")),
        )
        .unwrap();

        let _ = std::env::set_current_dir(original_dir);

        assert_eq!(config.port, 9000);
        assert_eq!(config.management_prefix, "/manage");
        assert_eq!(config.properties_path, PathBuf::from("build/git.properties"));
    }

    #[test]
    #[serial]
    fn test_from_figment_config_file() {
        clear_env();

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join(".gitinfo.toml");

        // Create a test config file
        let config_content = r#"
[server]
port = 7777

[git]
branch = "release/1.2"
tags = "v1.2.0"

[git.commit]
id = "deadbeef"
time = "2024-05-01T12:00:00Z"

[git.commit.message]
short = "cut release"
"#;
        fs::write(&config_file, config_content).unwrap();

        // Change to temp directory to make config file discoverable
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let config = Config::from_figment(None, None, None).unwrap();

        // Restore original directory (ignore errors if it fails)
        let _ = std::env::set_current_dir(original_dir);

        assert_eq!(config.port, 7777);
        assert_eq!(config.git.branch.as_deref(), Some("release/1.2"));
        assert_eq!(config.git.tags.as_deref(), Some("v1.2.0"));
        assert_eq!(config.git.commit.id.as_deref(), Some("deadbeef"));
        assert_eq!(
            config.git.commit.time.as_deref(),
            Some("2024-05-01T12:00:00Z")
        );
        assert_eq!(
            config.git.commit.message.short.as_deref(),
            Some("cut release")
        );
    }

    #[test]
    #[serial]
    fn test_from_figment_env_vars_override_config_file() {
        clear_env();

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join(".gitinfo.toml");

        fs::write(&config_file, "[git]\nbranch = \"from-file\"").unwrap();

        std::env::set_var("GITINFO_GIT_BRANCH", "from-env");
        std::env::set_var("GITINFO_GIT_COMMIT_MESSAGE_SHORT", "env message");

        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let config = Config::from_figment(None, None, None).unwrap();

        let _ = std::env::set_current_dir(&original_dir);
        clear_env();

        // Env var should override config file
        assert_eq!(config.git.branch.as_deref(), Some("from-env"));
        assert_eq!(
            config.git.commit.message.short.as_deref(),
            Some("env message")
        );
    }

    #[test]
    #[serial]
    fn test_from_figment_cli_overrides_env_and_config() {
        clear_env();

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join(".gitinfo.toml");

        fs::write(&config_file, "[server]\nport = 7777").unwrap();
        std::env::set_var("GITINFO_SERVER_PORT", "8888");

        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let config = Config::from_figment(Some(9999), None, None).unwrap();

        let _ = std::env::set_current_dir(&original_dir);
        clear_env();

        // CLI should have highest priority
        assert_eq!(config.port, 9999);
    }
}
