/// State management module
///
/// This module handles all gallery state, including:
/// - The media library and detail view cursor (library.rs)
/// - Shared data structures (data.rs)
/// - Gallery configuration (config.rs)

pub mod config;
pub mod data;
pub mod library;
