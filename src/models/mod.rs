//! Data models
//!
//! This module contains the Google API error shapes and the search outcome.

pub mod google;
pub mod search;
