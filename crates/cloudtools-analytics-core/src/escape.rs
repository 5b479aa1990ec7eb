// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Escaping for the `key=value,key=value` metadata encoding.
//!
//! The delimiters `,` and `=` and the escape character `\` are each prefixed
//! with a backslash. Every other character passes through untouched, so
//! splitting an encoded string on unescaped delimiters recovers the original
//! pairs exactly (see [`parse_metadata`]).

/// Separator between metadata entries.
pub const ENTRY_SEPARATOR: char = ',';
/// Separator between a metadata key and its value.
pub const KEY_VALUE_SEPARATOR: char = '=';
const ESCAPE_CHAR: char = '\\';

fn needs_escape(c: char) -> bool {
	matches!(c, ENTRY_SEPARATOR | KEY_VALUE_SEPARATOR | ESCAPE_CHAR)
}

/// Escapes a single metadata key or value.
pub fn escape(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	for c in raw.chars() {
		if needs_escape(c) {
			out.push(ESCAPE_CHAR);
		}
		out.push(c);
	}
	out
}

/// Reverses [`escape`]. A trailing lone backslash is kept as-is.
pub fn unescape(escaped: &str) -> String {
	let mut out = String::with_capacity(escaped.len());
	let mut chars = escaped.chars();
	while let Some(c) = chars.next() {
		if c == ESCAPE_CHAR {
			match chars.next() {
				Some(next) => out.push(next),
				None => out.push(ESCAPE_CHAR),
			}
		} else {
			out.push(c);
		}
	}
	out
}

/// Appends `key=value` pairs to `out`, escaping both sides of each pair.
///
/// A separator is written before every pair when `out` is non-empty.
pub fn join_escaped<'a, I>(out: &mut String, pairs: I)
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	for (key, value) in pairs {
		if !out.is_empty() {
			out.push(ENTRY_SEPARATOR);
		}
		out.push_str(&escape(key));
		out.push(KEY_VALUE_SEPARATOR);
		out.push_str(&escape(value));
	}
}

/// Splits `s` on every unescaped occurrence of `delim`, returning the raw
/// (still escaped) pieces.
fn split_unescaped(s: &str, delim: char, limit: Option<usize>) -> Vec<&str> {
	let mut parts = Vec::new();
	let mut start = 0;
	let mut escaped = false;
	for (idx, c) in s.char_indices() {
		if escaped {
			escaped = false;
			continue;
		}
		if c == ESCAPE_CHAR {
			escaped = true;
		} else if c == delim && limit.map_or(true, |max| parts.len() + 1 < max) {
			parts.push(&s[start..idx]);
			start = idx + c.len_utf8();
		}
	}
	parts.push(&s[start..]);
	parts
}

/// Decodes a metadata string produced by [`join_escaped`].
///
/// Entries without an unescaped `=` decode to a key with an empty value. An
/// empty input decodes to no entries.
pub fn parse_metadata(encoded: &str) -> Vec<(String, String)> {
	if encoded.is_empty() {
		return Vec::new();
	}

	split_unescaped(encoded, ENTRY_SEPARATOR, None)
		.into_iter()
		.map(|entry| {
			let mut kv = split_unescaped(entry, KEY_VALUE_SEPARATOR, Some(2)).into_iter();
			let key = kv.next().unwrap_or_default();
			let value = kv.next().unwrap_or_default();
			(unescape(key), unescape(value))
		})
		.collect()
}
