// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Command-line arguments and the TOML tracker configuration.

use std::path::{Path, PathBuf};

use clap::Parser;
use cloudtools_analytics::{EventMetadata, SettingsError, TrackerSettings, TrackingManager};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

/// Name used in the default User-Agent.
pub const PRODUCT_NAME: &str = "cloudtools-usage-ping";

/// Environment variable that overrides `tracking_enabled` from the config file
/// in either direction: `0`/`false`/`no`/`off` switch tracking off,
/// `1`/`true`/`yes`/`on` switch it on. Other values are ignored. Re-read
/// before every ping.
pub const TRACKING_ENV: &str = "CLOUDTOOLS_USAGE_TRACKING";

/// Send one anonymous usage ping.
#[derive(Parser, Debug)]
#[command(name = "cloudtools-usage-ping", version)]
pub struct Args {
	/// Event action, e.g. `app.deploy`
	pub action: String,

	/// Event category (defaults to the configured plugin name)
	#[arg(long)]
	pub category: Option<String>,

	/// Metadata entry as `key=value`; may be repeated
	#[arg(long = "meta", value_parser = parse_key_value)]
	pub metadata: Vec<(String, String)>,

	/// Tracker configuration file
	#[arg(long, env = "CLOUDTOOLS_USAGE_CONFIG")]
	pub config: Option<PathBuf>,

	/// Collector URL override
	#[arg(long, env = "CLOUDTOOLS_USAGE_ENDPOINT")]
	pub endpoint: Option<String>,
}

impl Args {
	pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
		match &self.config {
			Some(path) => Ok(path.clone()),
			None => default_config_path(),
		}
	}

	pub fn event_metadata(&self) -> EventMetadata {
		self.metadata.iter().cloned().collect()
	}
}

/// Splits `key=value` on the first `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
	raw
		.split_once('=')
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.filter(|(k, _)| !k.is_empty())
		.ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

/// `<config_dir>/cloudtools/usage.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
	dirs::config_dir()
		.map(|dir| dir.join("cloudtools").join("usage.toml"))
		.ok_or(ConfigError::ConfigDirNotFound)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("I/O error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("could not determine configuration directory")]
	ConfigDirNotFound,

	#[error(transparent)]
	Settings(#[from] SettingsError),
}

/// Contents of `usage.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UsageConfig {
	pub tracking_enabled: Option<bool>,
	pub analytics_id: String,
	pub client_id: Option<String>,
	pub page_host: String,
	pub platform_name: String,
	pub platform_version: String,
	pub plugin_name: String,
	pub plugin_version: String,
	pub user_agent: Option<String>,
}

impl UsageConfig {
	/// Reads the config file; a missing file yields the defaults.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		if !path.exists() {
			debug!(path = %path.display(), "No usage config file, using defaults");
			return Ok(Self::default());
		}

		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::parse(&content, path)
	}

	pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
		toml::from_str(content).map_err(|source| ConfigError::TomlParse {
			path: path.to_path_buf(),
			source,
		})
	}

	/// Builds tracker settings, generating a client id when none is configured.
	pub fn into_settings(self) -> Result<TrackerSettings, ConfigError> {
		let client_id = self
			.client_id
			.unwrap_or_else(|| Uuid::new_v4().to_string());
		let user_agent = self
			.user_agent
			.unwrap_or_else(|| cloudtools_common_http::default_user_agent(PRODUCT_NAME));

		let settings = TrackerSettings::builder()
			.manager(EnvTrackingManager::new(self.tracking_enabled.unwrap_or(true)))
			.analytics_id(self.analytics_id)
			.client_id(client_id)
			.page_host(self.page_host)
			.platform_name(self.platform_name)
			.platform_version(self.platform_version)
			.plugin_name(self.plugin_name)
			.plugin_version(self.plugin_version)
			.user_agent(user_agent)
			.build()?;
		Ok(settings)
	}
}

/// Tracking preference from the config file, overridable through [`TRACKING_ENV`].
#[derive(Debug, Clone, Copy)]
pub struct EnvTrackingManager {
	configured: bool,
}

impl EnvTrackingManager {
	pub fn new(configured: bool) -> Self {
		Self { configured }
	}

	/// Applies an override value (the contents of [`TRACKING_ENV`]) to the
	/// configured preference.
	fn resolve(&self, override_value: Option<&str>) -> bool {
		override_value
			.and_then(parse_toggle)
			.unwrap_or(self.configured)
	}
}

impl TrackingManager for EnvTrackingManager {
	fn is_tracking_enabled(&self) -> bool {
		self.resolve(std::env::var(TRACKING_ENV).ok().as_deref())
	}
}

fn parse_toggle(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn parse_key_value_splits_on_first_equals() {
		assert_eq!(
			parse_key_value("region=us=central"),
			Ok(("region".to_string(), "us=central".to_string()))
		);
		assert_eq!(parse_key_value("k="), Ok(("k".to_string(), String::new())));
	}

	#[test]
	fn parse_key_value_rejects_missing_key() {
		assert!(parse_key_value("novalue").is_err());
		assert!(parse_key_value("=v").is_err());
	}

	#[test]
	fn args_collect_repeated_metadata() {
		let args = Args::try_parse_from([
			"cloudtools-usage-ping",
			"app.deploy",
			"--meta",
			"region=us-central1",
			"--meta",
			"runtime=java8",
			"--category",
			"gcloud-intellij",
		])
		.unwrap();

		assert_eq!(args.action, "app.deploy");
		assert_eq!(args.category.as_deref(), Some("gcloud-intellij"));
		let metadata = args.event_metadata();
		assert_eq!(metadata.len(), 2);
		assert_eq!(metadata["runtime"], "java8");
	}

	#[test]
	fn parse_full_config() {
		let content = r#"
tracking_enabled = false
analytics_id = "UA-36037335-1"
client_id = "123454321"
page_host = "virtual.intellij"
platform_name = "idea"
platform_version = "2018.2.0.0"
plugin_name = "gcloud-intellij"
plugin_version = "18.4.2-SNAPSHOT"
user_agent = "gcloud-intellij-cloud-tools-plugin/18.4.2-SNAPSHOT"
"#;
		let config = UsageConfig::parse(content, Path::new("usage.toml")).unwrap();
		assert_eq!(config.tracking_enabled, Some(false));
		assert_eq!(config.analytics_id, "UA-36037335-1");
		assert_eq!(config.client_id.as_deref(), Some("123454321"));
		assert_eq!(config.plugin_name, "gcloud-intellij");
	}

	#[test]
	fn parse_rejects_invalid_toml() {
		let err = UsageConfig::parse("analytics_id = [", Path::new("bad.toml")).unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
		assert!(err.to_string().contains("bad.toml"));
	}

	#[test]
	fn load_missing_file_yields_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let config = UsageConfig::load(&dir.path().join("absent.toml")).unwrap();
		assert_eq!(config, UsageConfig::default());
	}

	#[test]
	fn load_reads_file_from_disk() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "plugin_name = \"gcloud-intellij\"").unwrap();
		let config = UsageConfig::load(file.path()).unwrap();
		assert_eq!(config.plugin_name, "gcloud-intellij");
	}

	#[test]
	fn into_settings_generates_client_id_and_user_agent() {
		let settings = UsageConfig::default().into_settings().unwrap();
		assert!(Uuid::parse_str(&settings.client_id).is_ok());
		assert!(settings.user_agent.starts_with("cloudtools-usage-ping/"));
		assert!(settings
			.user_agent
			.contains(cloudtools_common_version::PLATFORM));
	}

	#[test]
	fn into_settings_keeps_configured_values() {
		let config = UsageConfig {
			client_id: Some("fixed".to_string()),
			user_agent: Some("agent/1.0".to_string()),
			plugin_name: "plugin".to_string(),
			..UsageConfig::default()
		};
		let settings = config.into_settings().unwrap();
		assert_eq!(settings.client_id, "fixed");
		assert_eq!(settings.user_agent, "agent/1.0");
		assert_eq!(settings.plugin_name, "plugin");
	}

	#[test]
	fn parse_toggle_recognises_common_spellings() {
		assert_eq!(parse_toggle("0"), Some(false));
		assert_eq!(parse_toggle(" OFF "), Some(false));
		assert_eq!(parse_toggle("true"), Some(true));
		assert_eq!(parse_toggle("maybe"), None);
	}

	#[test]
	fn env_override_switches_tracking_either_way() {
		assert!(EnvTrackingManager::new(false).resolve(Some("on")));
		assert!(EnvTrackingManager::new(false).resolve(Some("1")));
		assert!(!EnvTrackingManager::new(true).resolve(Some("off")));
		assert!(!EnvTrackingManager::new(true).resolve(Some("false")));
	}

	#[test]
	fn unset_or_unrecognised_override_keeps_configured_value() {
		assert!(EnvTrackingManager::new(true).resolve(None));
		assert!(!EnvTrackingManager::new(false).resolve(None));
		assert!(!EnvTrackingManager::new(false).resolve(Some("maybe")));
		assert!(EnvTrackingManager::new(true).resolve(Some("")));
	}

	proptest! {
		#[test]
		fn parse_key_value_roundtrips(key in "[a-z_]{1,12}", value in "[a-z0-9=,]{0,12}") {
			let parsed = parse_key_value(&format!("{key}={value}")).unwrap();
			prop_assert_eq!(parsed, (key, value));
		}
	}
}
