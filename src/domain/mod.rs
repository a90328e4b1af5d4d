//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (channel, sentiment, validation errors)
//! - `draft` - Configuration snapshots, prompt builder and result parser

pub mod draft;
pub mod foundation;
