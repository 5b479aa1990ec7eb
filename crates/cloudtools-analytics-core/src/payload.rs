// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Form payload of a single usage ping.
//!
//! Pings are reported as virtual page views using the Measurement Protocol
//! (v1). The field set is fixed; only the values differ between events.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::escape::join_escaped;
use crate::metadata::StaticMetadata;
use crate::settings::TrackerSettings;

/// Endpoint that receives every ping.
pub const COLLECTOR_URL: &str = "https://ssl.google-analytics.com/collect";

/// Measurement Protocol parameter names.
pub mod keys {
	pub const PROTOCOL_VERSION: &str = "v";
	pub const HIT_TYPE: &str = "t";
	pub const IS_NON_INTERACTIVE: &str = "ni";
	pub const UNIQUE_CLIENT_ID: &str = "cid";
	pub const PAGE_HOST: &str = "dh";
	pub const PROPERTY_ID: &str = "tid";
	pub const EVENT_TYPE: &str = "cd19";
	pub const EVENT_NAME: &str = "cd20";
	pub const IS_INTERNAL_USER: &str = "cd16";
	pub const IS_USER_SIGNED_IN: &str = "cd17";
	pub const PAGE_URL: &str = "dp";
	pub const IS_VIRTUAL: &str = "cd21";
	pub const PAGE_TITLE: &str = "dt";
}

const PROTOCOL_VERSION_VALUE: &str = "1";
// The collector only groups virtual pages for `pageview` hits.
const PAGE_VIEW_VALUE: &str = "pageview";
const FALSE_VALUE: &str = "0";
const TRUE_VALUE: &str = "1";

/// Number of fields in every payload.
pub const PAYLOAD_FIELDS: usize = 13;

/// Caller-supplied metadata for one event. Ordered by key so encoding is stable.
pub type EventMetadata = BTreeMap<String, String>;

/// Ordered key/value fields of one form-encoded POST body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
	fields: Vec<(&'static str, String)>,
}

impl Payload {
	/// Returns the value of a protocol field.
	pub fn get(&self, key: &str) -> Option<&str> {
		self
			.fields
			.iter()
			.find(|(k, _)| *k == key)
			.map(|(_, v)| v.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
		self.fields.iter().map(|(k, v)| (*k, v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl Serialize for Payload {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.fields.serialize(serializer)
	}
}

/// `/virtual/<category>/<action>`; category and action are not escaped.
pub fn virtual_page_url(category: &str, action: &str) -> String {
	format!("/virtual/{category}/{action}")
}

/// Builds payloads for one tracker from its settings and static metadata.
#[derive(Debug, Clone)]
pub struct EventEncoder {
	client_id: String,
	page_host: String,
	analytics_id: String,
	static_metadata: StaticMetadata,
}

impl EventEncoder {
	pub fn new(settings: &TrackerSettings, static_metadata: StaticMetadata) -> Self {
		Self {
			client_id: settings.client_id.clone(),
			page_host: settings.page_host.clone(),
			analytics_id: settings.analytics_id.clone(),
			static_metadata,
		}
	}

	pub fn static_metadata(&self) -> &StaticMetadata {
		&self.static_metadata
	}

	/// Encodes one event.
	///
	/// The page title carries the static metadata followed by the escaped
	/// per-event metadata, if any.
	pub fn build_payload(
		&self,
		category: &str,
		action: &str,
		metadata: Option<&EventMetadata>,
	) -> Payload {
		let mut title = self.static_metadata.as_str().to_string();
		if let Some(metadata) = metadata.filter(|m| !m.is_empty()) {
			join_escaped(
				&mut title,
				metadata.iter().map(|(k, v)| (k.as_str(), v.as_str())),
			);
		}

		let fields = vec![
			(keys::PROTOCOL_VERSION, PROTOCOL_VERSION_VALUE.to_string()),
			(keys::HIT_TYPE, PAGE_VIEW_VALUE.to_string()),
			(keys::IS_NON_INTERACTIVE, FALSE_VALUE.to_string()),
			(keys::UNIQUE_CLIENT_ID, self.client_id.clone()),
			(keys::PAGE_HOST, self.page_host.clone()),
			(keys::PROPERTY_ID, self.analytics_id.clone()),
			(keys::EVENT_TYPE, category.to_string()),
			(keys::EVENT_NAME, action.to_string()),
			(keys::IS_INTERNAL_USER, FALSE_VALUE.to_string()),
			(keys::IS_USER_SIGNED_IN, FALSE_VALUE.to_string()),
			(keys::PAGE_URL, virtual_page_url(category, action)),
			(keys::IS_VIRTUAL, TRUE_VALUE.to_string()),
			(keys::PAGE_TITLE, title),
		];

		Payload { fields }
	}
}
