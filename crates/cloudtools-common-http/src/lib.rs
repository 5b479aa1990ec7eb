// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction for cloudtools.
//!
//! Every outbound client carries an explicit User-Agent header. IDE plugins
//! supply their own; standalone tools use [`default_user_agent`].

mod client;

pub use client::{
	builder_with_user_agent, default_user_agent, new_client_with_user_agent,
	DEFAULT_REQUEST_TIMEOUT,
};
