// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Titles beat bodies, exact stems beat prefixes, rare terms beat common
//! ones, and ties fall back to document order.

mod core;
pub mod ranking;

pub use core::*;
