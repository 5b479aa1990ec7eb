// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the usage tracker.

use cloudtools_analytics_core::SettingsError;
use thiserror::Error;

/// Usage tracker errors.
///
/// Only tracker construction can fail. Sending a ping never reports an error.
#[derive(Debug, Error)]
pub enum AnalyticsError {
	/// Settings could not be assembled.
	#[error("invalid tracker settings: {0}")]
	Settings(#[from] SettingsError),

	/// The HTTP client could not be built (TLS backend initialisation).
	#[error("failed to build HTTP client: {0}")]
	HttpClient(#[from] reqwest::Error),

	/// No async runtime was available and a dedicated one could not be started.
	#[error("failed to start ping runtime: {0}")]
	Runtime(#[from] std::io::Error),
}

/// Result type alias for tracker construction.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
