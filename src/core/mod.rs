//! Core application modules
//!
//! This module contains configuration, constants, logging, the search
//! provider abstraction, the Custom Search client and the invoker.

pub mod client;
pub mod config;
pub mod constants;
pub mod invoker;
pub mod logging;
pub mod provider;
