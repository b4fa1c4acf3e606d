//! Core library components.
//!
//! This module contains the reusable synchronization logic. Nothing here
//! prompts the user; callers pass in already-resolved inputs.

pub mod config;
pub mod constants;
pub mod domain;
pub mod git;
pub mod reconcile;
pub mod remote;
pub mod session;
pub mod snapshot;
pub mod types;
