// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host-supplied tracker configuration.

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SettingsError};

/// Decides whether usage tracking is currently allowed.
///
/// Hosts typically back this with a user preference, so the answer may change
/// while the application runs.
pub trait TrackingManager: Send + Sync {
	fn is_tracking_enabled(&self) -> bool;
}

impl<F> TrackingManager for F
where
	F: Fn() -> bool + Send + Sync,
{
	fn is_tracking_enabled(&self) -> bool {
		self()
	}
}

/// Immutable settings describing the host application and analytics property.
#[derive(Clone)]
pub struct TrackerSettings {
	manager: Arc<dyn TrackingManager>,
	pub analytics_id: String,
	pub client_id: String,
	pub page_host: String,
	pub platform_name: String,
	pub platform_version: String,
	pub plugin_name: String,
	pub plugin_version: String,
	pub user_agent: String,
}

impl TrackerSettings {
	pub fn builder() -> TrackerSettingsBuilder {
		TrackerSettingsBuilder::default()
	}

	/// Asks the host whether tracking is enabled right now.
	pub fn is_tracking_enabled(&self) -> bool {
		self.manager.is_tracking_enabled()
	}
}

impl fmt::Debug for TrackerSettings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TrackerSettings")
			.field("analytics_id", &self.analytics_id)
			.field("client_id", &self.client_id)
			.field("page_host", &self.page_host)
			.field("platform_name", &self.platform_name)
			.field("platform_version", &self.platform_version)
			.field("plugin_name", &self.plugin_name)
			.field("plugin_version", &self.plugin_version)
			.field("user_agent", &self.user_agent)
			.finish_non_exhaustive()
	}
}

/// Builder for [`TrackerSettings`].
///
/// Only the manager is required; unset strings default to empty.
#[derive(Default)]
pub struct TrackerSettingsBuilder {
	manager: Option<Arc<dyn TrackingManager>>,
	analytics_id: String,
	client_id: String,
	page_host: String,
	platform_name: String,
	platform_version: String,
	plugin_name: String,
	plugin_version: String,
	user_agent: String,
}

impl TrackerSettingsBuilder {
	pub fn manager(mut self, manager: impl TrackingManager + 'static) -> Self {
		self.manager = Some(Arc::new(manager));
		self
	}

	/// Analytics property id, e.g. `UA-36037335-1`.
	pub fn analytics_id(mut self, id: impl Into<String>) -> Self {
		self.analytics_id = id.into();
		self
	}

	/// Anonymous, stable identifier of this installation.
	pub fn client_id(mut self, id: impl Into<String>) -> Self {
		self.client_id = id.into();
		self
	}

	pub fn page_host(mut self, host: impl Into<String>) -> Self {
		self.page_host = host.into();
		self
	}

	pub fn platform_name(mut self, name: impl Into<String>) -> Self {
		self.platform_name = name.into();
		self
	}

	pub fn platform_version(mut self, version: impl Into<String>) -> Self {
		self.platform_version = version.into();
		self
	}

	/// Plugin name; also the category of events created through `track_event`.
	pub fn plugin_name(mut self, name: impl Into<String>) -> Self {
		self.plugin_name = name.into();
		self
	}

	pub fn plugin_version(mut self, version: impl Into<String>) -> Self {
		self.plugin_version = version.into();
		self
	}

	pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
		self.user_agent = agent.into();
		self
	}

	pub fn build(self) -> Result<TrackerSettings> {
		let manager = self.manager.ok_or(SettingsError::MissingManager)?;
		Ok(TrackerSettings {
			manager,
			analytics_id: self.analytics_id,
			client_id: self.client_id,
			page_host: self.page_host,
			platform_name: self.platform_name,
			platform_version: self.platform_version,
			plugin_name: self.plugin_name,
			plugin_version: self.plugin_version,
			user_agent: self.user_agent,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicBool, Ordering};

	#[test]
	fn build_without_manager_fails() {
		let result = TrackerSettings::builder().analytics_id("UA-1").build();
		assert_eq!(result.err(), Some(SettingsError::MissingManager));
	}

	#[test]
	fn build_with_manager_only_succeeds() {
		let settings = TrackerSettings::builder().manager(|| true).build().unwrap();
		assert!(settings.is_tracking_enabled());
		assert!(settings.analytics_id.is_empty());
		assert!(settings.user_agent.is_empty());
	}

	#[test]
	fn builder_sets_every_field() {
		let settings = TrackerSettings::builder()
			.manager(|| false)
			.analytics_id("UA-36037335-1")
			.client_id("123454321")
			.page_host("virtual.intellij")
			.platform_name("idea")
			.platform_version("2018.2.0.0")
			.plugin_name("gcloud-intellij")
			.plugin_version("18.4.2-SNAPSHOT")
			.user_agent("gcloud-intellij-cloud-tools-plugin/18.4.2-SNAPSHOT")
			.build()
			.unwrap();

		assert!(!settings.is_tracking_enabled());
		assert_eq!(settings.analytics_id, "UA-36037335-1");
		assert_eq!(settings.client_id, "123454321");
		assert_eq!(settings.page_host, "virtual.intellij");
		assert_eq!(settings.platform_name, "idea");
		assert_eq!(settings.platform_version, "2018.2.0.0");
		assert_eq!(settings.plugin_name, "gcloud-intellij");
		assert_eq!(settings.plugin_version, "18.4.2-SNAPSHOT");
		assert_eq!(
			settings.user_agent,
			"gcloud-intellij-cloud-tools-plugin/18.4.2-SNAPSHOT"
		);
	}

	#[test]
	fn manager_is_consulted_on_every_call() {
		let flag = Arc::new(AtomicBool::new(true));
		let observed = Arc::clone(&flag);
		let settings = TrackerSettings::builder()
			.manager(move || observed.load(Ordering::SeqCst))
			.build()
			.unwrap();

		assert!(settings.is_tracking_enabled());
		flag.store(false, Ordering::SeqCst);
		assert!(!settings.is_tracking_enabled());
	}

	#[test]
	fn debug_output_omits_manager() {
		let settings = TrackerSettings::builder()
			.manager(|| true)
			.plugin_name("plugin")
			.build()
			.unwrap();
		let debug = format!("{settings:?}");
		assert!(debug.contains("plugin"));
		assert!(!debug.contains("manager"));
	}
}
