// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracker front-end used by host applications.

use std::sync::Arc;

use cloudtools_analytics_core::{
	EventEncoder, EventMetadata, PlatformEnvironment, StaticMetadata, TrackerSettings,
	COLLECTOR_URL,
};
use tracing::{info, trace};

use crate::dispatcher::PingDispatcher;
use crate::error::Result;
use crate::event::EventBuilder;

/// Sends anonymous usage pings on behalf of a host application.
///
/// Created once per host from [`TrackerSettings`]. When the host reports
/// tracking as disabled at creation time the tracker is [`UsageTracker::Disabled`]
/// and never builds a payload, an HTTP client or a runtime.
///
/// # Example
///
/// ```ignore
/// use cloudtools_analytics::{TrackerSettings, UsageTracker};
///
/// let settings = TrackerSettings::builder()
///     .manager(|| user_prefs.usage_tracking())
///     .analytics_id("UA-36037335-1")
///     .plugin_name("gcloud-intellij")
///     .user_agent("gcloud-intellij-cloud-tools-plugin/18.4.2")
///     .build()?;
///
/// let tracker = UsageTracker::create(settings)?;
/// tracker
///     .track_event("app.deploy")
///     .add_metadata("region", "us-central1")
///     .ping();
/// ```
#[derive(Clone)]
pub enum UsageTracker {
	Active(ActiveTracker),
	Disabled,
}

impl UsageTracker {
	/// Creates a tracker reporting to the standard collector.
	pub fn create(settings: TrackerSettings) -> Result<Self> {
		Self::create_with_endpoint(settings, COLLECTOR_URL)
	}

	/// Creates a tracker reporting to `collector_url`.
	pub fn create_with_endpoint(
		settings: TrackerSettings,
		collector_url: impl Into<String>,
	) -> Result<Self> {
		if !settings.is_tracking_enabled() {
			info!("Usage tracking disabled");
			return Ok(UsageTracker::Disabled);
		}

		let tracker = ActiveTracker::new(settings, collector_url.into())?;
		info!(
			plugin = %tracker.inner.settings.plugin_name,
			collector_url = %tracker.inner.dispatcher.collector_url(),
			"Usage tracking enabled"
		);
		Ok(UsageTracker::Active(tracker))
	}

	pub fn is_active(&self) -> bool {
		matches!(self, UsageTracker::Active(_))
	}

	/// Starts an event in the plugin's category.
	pub fn track_event(&self, action: impl Into<String>) -> EventBuilder<'_> {
		let category = match self {
			UsageTracker::Active(tracker) => tracker.inner.settings.plugin_name.clone(),
			UsageTracker::Disabled => String::new(),
		};
		EventBuilder::new(self, category, action.into())
	}

	/// Sends one ping. Returns immediately and never fails.
	pub fn send_event(&self, category: &str, action: &str, metadata: Option<&EventMetadata>) {
		match self {
			UsageTracker::Active(tracker) => tracker.send_event(category, action, metadata),
			UsageTracker::Disabled => {
				trace!(
					category = %category,
					action = %action,
					"Usage tracking disabled, ping skipped"
				);
			}
		}
	}

	/// Waits for pings already sent to finish. Optional; see [`PingDispatcher::drain`].
	pub async fn drain(&self) {
		if let UsageTracker::Active(tracker) = self {
			tracker.inner.dispatcher.drain().await;
		}
	}
}

/// The enabled variant of [`UsageTracker`]. Cheap to clone.
#[derive(Clone)]
pub struct ActiveTracker {
	inner: Arc<TrackerInner>,
}

struct TrackerInner {
	settings: TrackerSettings,
	encoder: EventEncoder,
	dispatcher: PingDispatcher,
}

impl ActiveTracker {
	fn new(settings: TrackerSettings, collector_url: String) -> Result<Self> {
		let static_metadata = StaticMetadata::new(&settings, &PlatformEnvironment::detect());
		let encoder = EventEncoder::new(&settings, static_metadata);
		let dispatcher = PingDispatcher::new(&settings.user_agent, collector_url)?;

		Ok(Self {
			inner: Arc::new(TrackerInner {
				settings,
				encoder,
				dispatcher,
			}),
		})
	}

	pub fn settings(&self) -> &TrackerSettings {
		&self.inner.settings
	}

	pub fn encoder(&self) -> &EventEncoder {
		&self.inner.encoder
	}

	pub fn dispatcher(&self) -> &PingDispatcher {
		&self.inner.dispatcher
	}

	fn send_event(&self, category: &str, action: &str, metadata: Option<&EventMetadata>) {
		// The host may have switched tracking off since creation.
		if !self.inner.settings.is_tracking_enabled() {
			trace!(
				category = %category,
				action = %action,
				"Usage tracking switched off, ping skipped"
			);
			return;
		}

		let payload = self.inner.encoder.build_payload(category, action, metadata);
		self.inner.dispatcher.send(payload);
	}
}
