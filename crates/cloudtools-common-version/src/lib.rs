// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build and toolchain information shared by the cloudtools crates.
//!
//! Usage pings report the compiler version as the host's runtime version, and
//! the default User-Agent names the target platform and commit.

shadow_rs::shadow!(build);

/// Target platform in `{os}-{arch}` format, e.g. "linux-x86_64".
pub const PLATFORM: &str = env!("CLOUDTOOLS_PLATFORM");

/// Facts about the binary, fixed at compile time.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
	pub version: &'static str,
	pub git_sha: &'static str,
	pub platform: &'static str,
	pub rust_version: &'static str,
}

impl BuildInfo {
	#[allow(clippy::const_is_empty)]
	pub const fn current() -> Self {
		Self {
			version: build::PKG_VERSION,
			git_sha: if build::SHORT_COMMIT.is_empty() {
				"unknown"
			} else {
				build::SHORT_COMMIT
			},
			platform: PLATFORM,
			rust_version: build::RUST_VERSION,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn platform_names_target_os_first() {
		assert!(PLATFORM.starts_with(std::env::consts::OS));
		assert!(PLATFORM.ends_with(std::env::consts::ARCH));
	}

	#[test]
	fn rust_version_names_the_compiler() {
		assert!(BuildInfo::current().rust_version.starts_with("rustc"));
	}

	#[test]
	fn git_sha_falls_back_to_unknown() {
		let sha = BuildInfo::current().git_sha;
		assert!(!sha.is_empty());
		assert!(!sha.contains(char::is_whitespace));
	}

	#[test]
	fn version_is_this_crate_version() {
		assert_eq!(BuildInfo::current().version, env!("CARGO_PKG_VERSION"));
	}
}
