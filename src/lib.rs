//! Reply Drafter - AI-drafted replies to inbound messages
//!
//! Drafts a reply to an incoming email, LinkedIn DM or Instagram DM,
//! tailored to the sender, the replying company and a style profile. Each
//! draft is one prompt sent to a chat-completion endpoint under a bounded
//! exponential-backoff retry policy, with the model's answer parsed into a
//! channel-shaped result.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
