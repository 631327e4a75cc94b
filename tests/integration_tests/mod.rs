//! Integration tests module
//!
//! End-to-end tests for the assistant, including:
//! - Question -> route -> store / catalog -> reply
//! - Context carried across turns and sessions
//! - Store and translation failures degrading to apologies

pub mod error_scenarios;
pub mod fixtures;
pub mod pipeline_test;
