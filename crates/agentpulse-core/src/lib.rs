//! agentpulse Core - Dashboard state and the logic that drives it
//!
//! Everything in this crate is synchronous and clock-free. Timers live in
//! `agentpulse-engine`; each timer tick calls exactly one `DashboardState`
//! method, so every update is a single indivisible transition.
//!
//! ```text
//! generator tick ──► begin_thinking ──(delay)──► complete_thinking
//! metrics tick   ──► apply_drift
//! liveness tick  ──► toggle_liveness
//! user submit    ──► submit ──► chat client ──► apply_chat_reply
//! ```

pub mod buffer;
pub mod generator;
pub mod indicators;
pub mod input;
pub mod markdown;
pub mod metrics;
pub mod phrases;
pub mod reply;
pub mod state;

pub use buffer::*;
pub use generator::*;
pub use indicators::*;
pub use input::*;
pub use markdown::*;
pub use metrics::*;
pub use phrases::*;
pub use reply::*;
pub use state::*;
