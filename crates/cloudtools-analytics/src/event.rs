// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fluent construction of a single usage event.

use cloudtools_analytics_core::EventMetadata;

use crate::tracker::UsageTracker;

/// An event being assembled by [`UsageTracker::track_event`].
///
/// ```ignore
/// tracker
///     .track_event("app.deploy")
///     .add_metadata("region", "us-central1")
///     .add_metadata("runtime", "java8")
///     .ping();
/// ```
#[must_use = "an event is only sent when `ping` is called"]
pub struct EventBuilder<'a> {
	tracker: &'a UsageTracker,
	category: String,
	action: String,
	metadata: EventMetadata,
}

impl<'a> EventBuilder<'a> {
	pub(crate) fn new(tracker: &'a UsageTracker, category: String, action: String) -> Self {
		Self {
			tracker,
			category,
			action,
			metadata: EventMetadata::new(),
		}
	}

	/// Attaches a metadata entry. A repeated key replaces the earlier value.
	pub fn add_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.metadata.insert(key.into(), value.into());
		self
	}

	pub fn category(&self) -> &str {
		&self.category
	}

	pub fn action(&self) -> &str {
		&self.action
	}

	pub fn metadata(&self) -> &EventMetadata {
		&self.metadata
	}

	/// Sends the event.
	pub fn ping(self) {
		self
			.tracker
			.send_event(&self.category, &self.action, Some(&self.metadata));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn add_metadata_accumulates_entries() {
		let tracker = UsageTracker::Disabled;
		let event = tracker
			.track_event("deploy")
			.add_metadata("region", "us-central1")
			.add_metadata("runtime", "java8");

		assert_eq!(event.action(), "deploy");
		assert_eq!(event.metadata().len(), 2);
		assert_eq!(
			event.metadata().get("region").map(String::as_str),
			Some("us-central1")
		);
	}

	#[test]
	fn repeated_key_keeps_last_value() {
		let tracker = UsageTracker::Disabled;
		let event = tracker
			.track_event("a")
			.add_metadata("k", "first")
			.add_metadata("k", "second");

		assert_eq!(event.metadata().len(), 1);
		assert_eq!(event.metadata().get("k").map(String::as_str), Some("second"));
	}

	proptest! {
		#[test]
		fn metadata_len_matches_unique_keys(keys in proptest::collection::vec("[a-z]{1,8}", 0..16)) {
			let tracker = UsageTracker::Disabled;
			let unique: std::collections::HashSet<_> = keys.iter().cloned().collect();
			let mut event = tracker.track_event("a");
			for key in &keys {
				event = event.add_metadata(key.clone(), "v");
			}
			prop_assert_eq!(event.metadata().len(), unique.len());
		}
	}
}
