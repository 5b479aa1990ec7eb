// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client construction with an explicit User-Agent.

use cloudtools_common_version::BuildInfo;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Request timeout applied by [`new_client_with_user_agent`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Creates a client builder that sends `user_agent` on every request.
///
/// Use this when requests are made on behalf of a host application, e.g.
/// `"gcloud-intellij-cloud-tools-plugin/18.4.2 (IntelliJ IDEA/IU-182.3684.90)"`.
pub fn builder_with_user_agent(user_agent: impl Into<String>) -> ClientBuilder {
	Client::builder().user_agent(user_agent.into())
}

/// Creates a client with a custom User-Agent and [`DEFAULT_REQUEST_TIMEOUT`].
///
/// Fails only if the TLS backend cannot be initialised.
pub fn new_client_with_user_agent(user_agent: impl Into<String>) -> reqwest::Result<Client> {
	builder_with_user_agent(user_agent)
		.timeout(DEFAULT_REQUEST_TIMEOUT)
		.build()
}

/// User-Agent for tools that do not report on behalf of a host application.
///
/// Format: `{product}/{version} ({platform}; {git_sha})`, e.g.
/// `cloudtools-usage-ping/0.1.0 (linux-x86_64; 1a2b3c4)`.
pub fn default_user_agent(product: &str) -> String {
	let info = BuildInfo::current();
	format!(
		"{product}/{} ({}; {})",
		info.version, info.platform, info.git_sha
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_user_agent_names_product_platform_and_commit() {
		let ua = default_user_agent("cloudtools-usage-ping");
		let info = BuildInfo::current();
		assert!(ua.starts_with("cloudtools-usage-ping/"));
		assert!(ua.contains(info.platform));
		assert!(ua.ends_with(&format!("; {})", info.git_sha)));
	}

	#[test]
	fn builder_accepts_host_user_agent() {
		let ua = "gcloud-intellij/18.4.2 (IntelliJ IDEA Ultimate Edition)";
		assert!(builder_with_user_agent(ua).build().is_ok());
	}

	#[tokio::test]
	async fn client_with_user_agent_builds_inside_runtime() {
		assert!(new_client_with_user_agent("agent").is_ok());
	}
}
