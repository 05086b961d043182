//! agentpulse Types - Data model for the agent activity dashboard
//!
//! This crate has no dependencies on other agentpulse crates. It defines:
//!
//! - Activity records (thoughts, actions, user messages, agent replies)
//! - The metrics snapshot shown in the stats panel
//! - Language selection for the phrase tables
//! - Chat backend messages and conversation identifiers
//! - Agent holdings (NFT and token contracts)
//!
//! # Record lifecycle
//!
//! ```text
//! generator / user submit / chat reply → ActivityRecord → StreamBuffer → render
//! ```

pub mod chat;
pub mod error;
pub mod holdings;
pub mod language;
pub mod metrics;
pub mod record;

pub use chat::*;
pub use error::*;
pub use holdings::*;
pub use language::*;
pub use metrics::*;
pub use record::*;
