// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Static platform metadata attached to every ping.

use cloudtools_common_version::BuildInfo;
use sysinfo::System;

use crate::escape::join_escaped;
use crate::settings::TrackerSettings;

pub const PLATFORM_NAME_KEY: &str = "applicationName";
pub const PLATFORM_VERSION_KEY: &str = "applicationVersion";
/// Collector dashboards group on this key name, so it is kept even though it
/// carries the Rust toolchain version.
pub const RUNTIME_VERSION_KEY: &str = "jdkVersion";
pub const OPERATING_SYSTEM_KEY: &str = "operatingSystem";
pub const PLUGIN_VERSION_KEY: &str = "pluginVersion";

/// Number of entries in the static metadata string.
pub const STATIC_METADATA_FIELDS: usize = 5;

/// Process environment captured once when a tracker is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEnvironment {
	pub runtime_version: String,
	pub operating_system: String,
}

impl PlatformEnvironment {
	/// Reads the toolchain version and the host OS name and version.
	pub fn detect() -> Self {
		Self {
			runtime_version: BuildInfo::current().rust_version.to_string(),
			operating_system: operating_system(System::name(), System::os_version()),
		}
	}
}

/// OS name followed directly by the lower-cased OS version, e.g. `Linux22.04`.
fn operating_system(name: Option<String>, version: Option<String>) -> String {
	let name = name.unwrap_or_else(|| std::env::consts::OS.to_string());
	let version = version.unwrap_or_default().to_lowercase();
	format!("{name}{version}")
}

/// The pre-joined, escaped static metadata of one tracker.
///
/// Computed once and shared read-only by every event the tracker encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMetadata {
	encoded: String,
}

impl StaticMetadata {
	pub fn new(settings: &TrackerSettings, env: &PlatformEnvironment) -> Self {
		Self {
			encoded: build_static_metadata_string(settings, env),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.encoded
	}
}

/// Escapes the five platform values and joins them in a fixed key order.
pub fn build_static_metadata_string(settings: &TrackerSettings, env: &PlatformEnvironment) -> String {
	let mut encoded = String::new();
	join_escaped(
		&mut encoded,
		[
			(PLATFORM_NAME_KEY, settings.platform_name.as_str()),
			(PLATFORM_VERSION_KEY, settings.platform_version.as_str()),
			(RUNTIME_VERSION_KEY, env.runtime_version.as_str()),
			(OPERATING_SYSTEM_KEY, env.operating_system.as_str()),
			(PLUGIN_VERSION_KEY, settings.plugin_version.as_str()),
		],
	);
	encoded
}
