// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `cloudtools-usage-ping`: sends a single usage ping and waits for delivery.

mod config;

use clap::Parser;
use cloudtools_analytics::{UsageTracker, COLLECTOR_URL};
use cloudtools_common_version::BuildInfo;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{Args, UsageConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let build = BuildInfo::current();
	debug!(
		version = build.version,
		git_sha = build.git_sha,
		platform = build.platform,
		"Starting cloudtools-usage-ping"
	);

	let args = Args::parse();

	let config_path = args.config_path()?;
	let config = UsageConfig::load(&config_path)?;
	info!(path = %config_path.display(), "Loaded usage config");

	let settings = config.into_settings()?;
	let category = args
		.category
		.clone()
		.unwrap_or_else(|| settings.plugin_name.clone());
	let endpoint = args.endpoint.as_deref().unwrap_or(COLLECTOR_URL);

	let tracker = UsageTracker::create_with_endpoint(settings, endpoint)?;
	if !tracker.is_active() {
		info!("Usage tracking is disabled, nothing sent");
		return Ok(());
	}

	let metadata = args.event_metadata();
	tracker.send_event(&category, &args.action, Some(&metadata));
	tracker.drain().await;

	info!(category = %category, action = %args.action, "Usage ping sent");
	Ok(())
}
