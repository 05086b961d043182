//! agentpulse Chat - Clients for the agent chat backend
//!
//! The dashboard talks to its agent through a single `ChatClient` trait:
//!
//! - `HttpChatClient`: posts to a running agent backend (`/api/chat`)
//! - `DeterministicChatClient`: offline canned agent, no network
//!
//! `ChatRouter` picks one for a configured backend kind, falling back to the
//! deterministic client when the HTTP backend is not configured.
//! `ChatSession` binds a client to one conversation identifier.
//!
//! Holdings (NFT and token contracts) are read through `AssetSource`.

pub mod assets;
pub mod client;
pub mod deterministic;
pub mod error;
pub mod http;
pub mod router;

pub use assets::*;
pub use client::*;
pub use deterministic::*;
pub use error::*;
pub use http::*;
pub use router::*;
