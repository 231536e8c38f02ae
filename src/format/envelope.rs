// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The `Search.setIndex(...)` script wrapper.

/// Prefix of the script flavour.
pub const JS_PREFIX: &str = "Search.setIndex(";

/// Suffix of the script flavour.
pub const JS_SUFFIX: &str = ")";

/// Return the JSON inside a script wrapper, or the trimmed input if there is none.
///
/// Tolerates surrounding whitespace and a trailing `;`.
pub fn strip_js_wrapper(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix(JS_PREFIX) else {
        return trimmed;
    };
    let inner = inner.trim_end();
    let inner = inner.strip_suffix(';').unwrap_or(inner).trim_end();
    inner.strip_suffix(JS_SUFFIX).unwrap_or(inner)
}
