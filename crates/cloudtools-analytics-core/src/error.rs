// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for tracker settings.

use thiserror::Error;

/// Errors raised while assembling [`TrackerSettings`](crate::TrackerSettings).
///
/// These are the only failures the analytics stack ever reports; once a
/// tracker exists nothing it does can fail from the caller's point of view.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
	#[error("a tracking manager is required to decide whether tracking is enabled")]
	MissingManager,
}

/// A specialized `Result` type for settings construction.
pub type Result<T> = std::result::Result<T, SettingsError>;
