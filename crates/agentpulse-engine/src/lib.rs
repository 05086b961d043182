//! agentpulse Engine - Runs the dashboard timers on tokio
//!
//! The engine owns the `DashboardState` behind one mutex and drives it from
//! independent tasks:
//!
//! | task      | period   | transition                                   |
//! |-----------|----------|----------------------------------------------|
//! | generator | 3000 ms  | `begin_thinking`, +1500 ms `complete_thinking` |
//! | metrics   | 2000 ms  | `apply_drift`                                |
//! | liveness  | 1000 ms  | `toggle_liveness`                            |
//! | dots      | 500 ms   | `advance_dots`                               |
//! | observe   | 500 ms   | default prompt → `apply_chat_reply`          |
//!
//! Chat submissions run as short-lived tasks. `stop` cancels every task and
//! closes the state so nothing lands after teardown.

pub mod config;
pub mod engine;
pub mod events;
mod timer;

pub use config::*;
pub use engine::*;
pub use events::*;
