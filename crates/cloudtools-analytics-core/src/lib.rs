// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event encoding for cloudtools usage analytics.
//!
//! This crate turns a category, an action and optional metadata into the form
//! payload of one usage ping. It performs no I/O; delivery lives in the
//! `cloudtools-analytics` client crate.
//!
//! # Example
//!
//! ```
//! use cloudtools_analytics_core::{
//!     EventEncoder, EventMetadata, PlatformEnvironment, StaticMetadata, TrackerSettings,
//! };
//!
//! let settings = TrackerSettings::builder()
//!     .manager(|| true)
//!     .analytics_id("UA-36037335-1")
//!     .platform_name("idea")
//!     .plugin_name("gcloud-intellij")
//!     .build()
//!     .unwrap();
//!
//! let static_metadata = StaticMetadata::new(&settings, &PlatformEnvironment::detect());
//! let encoder = EventEncoder::new(&settings, static_metadata);
//!
//! let mut metadata = EventMetadata::new();
//! metadata.insert("region".to_string(), "us-central1".to_string());
//! let payload = encoder.build_payload("gcloud-intellij", "app.deploy", Some(&metadata));
//!
//! assert_eq!(payload.get("dp"), Some("/virtual/gcloud-intellij/app.deploy"));
//! ```

pub mod error;
pub mod escape;
pub mod metadata;
pub mod payload;
pub mod settings;

pub use error::{Result, SettingsError};
pub use escape::{escape, parse_metadata, unescape};
pub use metadata::{
	build_static_metadata_string, PlatformEnvironment, StaticMetadata, STATIC_METADATA_FIELDS,
};
pub use payload::{
	keys, virtual_page_url, EventEncoder, EventMetadata, Payload, COLLECTOR_URL, PAYLOAD_FIELDS,
};
pub use settings::{TrackerSettings, TrackerSettingsBuilder, TrackingManager};
