// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Usage-ping client for cloudtools IDE plugins.
//!
//! A [`UsageTracker`] reports anonymous feature usage as virtual page views.
//! Sending is fire-and-forget: `send_event` and `ping` encode the event on the
//! caller's thread, hand it to a background task and return. Delivery failures
//! are logged at debug level and otherwise ignored, so analytics can never
//! block or break the host.
//!
//! # Quick Start
//!
//! ```ignore
//! use cloudtools_analytics::{TrackerSettings, UsageTracker};
//!
//! let settings = TrackerSettings::builder()
//!     .manager(|| true)
//!     .analytics_id("UA-36037335-1")
//!     .client_id("123454321")
//!     .page_host("virtual.intellij")
//!     .platform_name("idea")
//!     .platform_version("2018.2.0.0")
//!     .plugin_name("gcloud-intellij")
//!     .plugin_version("18.4.2")
//!     .user_agent("gcloud-intellij-cloud-tools-plugin/18.4.2")
//!     .build()?;
//!
//! let tracker = UsageTracker::create(settings)?;
//!
//! // Category defaults to the plugin name.
//! tracker.track_event("just-a-test").add_metadata("foo", "bar").ping();
//!
//! // Or spell everything out.
//! tracker.send_event("gcloud-intellij", "app.deploy", None);
//! ```
//!
//! # Disabling
//!
//! The settings' [`TrackingManager`] is asked once when the tracker is created
//! and again before every event. A tracker created while tracking is off is
//! inert for its whole lifetime.

pub mod dispatcher;
pub mod error;
pub mod event;
pub mod tracker;

pub use dispatcher::PingDispatcher;
pub use error::{AnalyticsError, Result};
pub use event::EventBuilder;
pub use tracker::{ActiveTracker, UsageTracker};

pub use cloudtools_analytics_core::{
	EventMetadata, Payload, SettingsError, TrackerSettings, TrackerSettingsBuilder,
	TrackingManager, COLLECTOR_URL,
};
