// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Background delivery of encoded pings.
//!
//! Each ping is posted from its own task. Nothing is queued, retried or
//! reported back: a failed ping is logged at debug level and forgotten.

use std::sync::Arc;

use cloudtools_analytics_core::Payload;
use reqwest::Client;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio_util::task::TaskTracker;
use tracing::{debug, trace};

use crate::error::Result;

const RUNTIME_THREAD_NAME: &str = "cloudtools-usage-ping";

/// Single-worker runtime that runs every ping task of one dispatcher.
///
/// Independent of any runtime the host happens to be running, so the
/// dispatcher keeps working after that runtime is gone.
struct PingRuntime {
	runtime: Option<Runtime>,
	handle: Handle,
}

impl PingRuntime {
	fn start() -> std::io::Result<Self> {
		let runtime = Builder::new_multi_thread()
			.worker_threads(1)
			.thread_name(RUNTIME_THREAD_NAME)
			.enable_all()
			.build()?;
		let handle = runtime.handle().clone();
		debug!("Started runtime for usage pings");
		Ok(Self {
			runtime: Some(runtime),
			handle,
		})
	}
}

impl Drop for PingRuntime {
	fn drop(&mut self) {
		// Never block the host on shutdown; pings still in flight are abandoned.
		if let Some(runtime) = self.runtime.take() {
			runtime.shutdown_background();
		}
	}
}

/// Posts payloads to the collector without blocking the caller.
pub struct PingDispatcher {
	http_client: Client,
	collector_url: Arc<str>,
	runtime: PingRuntime,
	in_flight: TaskTracker,
}

impl PingDispatcher {
	/// Creates a dispatcher whose requests carry `user_agent`.
	///
	/// Starts the dispatcher's own runtime; works both inside and outside a
	/// tokio runtime.
	pub fn new(user_agent: &str, collector_url: impl Into<String>) -> Result<Self> {
		let runtime = PingRuntime::start()?;
		let http_client = cloudtools_common_http::new_client_with_user_agent(user_agent)?;
		let collector_url: Arc<str> = Arc::from(collector_url.into());

		debug!(collector_url = %collector_url, "Ping dispatcher ready");

		Ok(Self {
			http_client,
			collector_url,
			runtime,
			in_flight: TaskTracker::new(),
		})
	}

	pub fn collector_url(&self) -> &str {
		&self.collector_url
	}

	/// Schedules delivery of `payload` and returns immediately.
	pub fn send(&self, payload: Payload) {
		let client = self.http_client.clone();
		let url = Arc::clone(&self.collector_url);
		self
			.in_flight
			.spawn_on(deliver(client, url, payload), &self.runtime.handle);
	}

	/// Number of pings that have been scheduled but not finished.
	pub fn in_flight(&self) -> usize {
		self.in_flight.len()
	}

	/// Waits until every ping scheduled so far has finished.
	///
	/// Pings sent while draining are waited for as well.
	pub async fn drain(&self) {
		self.in_flight.close();
		self.in_flight.wait().await;
		self.in_flight.reopen();
	}
}

async fn deliver(client: Client, url: Arc<str>, payload: Payload) {
	match client.post(&*url).form(&payload).send().await {
		Ok(response) => {
			let status = response.status();
			if status.as_u16() >= 300 {
				debug!(
					status = status.as_u16(),
					reason = status.canonical_reason().unwrap_or_default(),
					"Non 2xx status from analytics collector"
				);
			} else {
				trace!(status = status.as_u16(), "Analytics ping delivered");
			}
		}
		Err(e) => {
			debug!(error = %e, "Analytics ping failed");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const UNREACHABLE: &str = "http://127.0.0.1:1/collect";

	#[test]
	fn builds_outside_tokio() {
		let dispatcher = PingDispatcher::new("agent", UNREACHABLE).unwrap();
		assert_eq!(dispatcher.in_flight(), 0);
	}

	#[tokio::test]
	async fn builds_inside_tokio() {
		let dispatcher = PingDispatcher::new("agent", UNREACHABLE).unwrap();
		assert_eq!(dispatcher.collector_url(), UNREACHABLE);
	}

	#[tokio::test]
	async fn drain_with_nothing_in_flight_returns() {
		let dispatcher = PingDispatcher::new("agent", UNREACHABLE).unwrap();
		dispatcher.drain().await;
		dispatcher.drain().await;
		assert_eq!(dispatcher.in_flight(), 0);
	}

	#[tokio::test]
	async fn dropping_inside_async_context_does_not_panic() {
		let dispatcher = PingDispatcher::new("agent", UNREACHABLE).unwrap();
		drop(dispatcher);
	}
}
