//! Activity records
//!
//! An `ActivityRecord` is one timestamped unit of agent output shown in the
//! stream. Records are built once and never mutated; the stream buffer only
//! appends and evicts them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// On-chain action the simulated agent reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateWallet,
    RequestFaucetFunds,
    GetBalance,
    TransferToken,
    TransferNft,
    SwapToken,
}

impl ActionKind {
    /// Every action, in phrase-table order
    pub const ALL: [ActionKind; 6] = [
        ActionKind::CreateWallet,
        ActionKind::RequestFaucetFunds,
        ActionKind::GetBalance,
        ActionKind::TransferToken,
        ActionKind::TransferNft,
        ActionKind::SwapToken,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateWallet => "create_wallet",
            Self::RequestFaucetFunds => "request_faucet_funds",
            Self::GetBalance => "get_balance",
            Self::TransferToken => "transfer_token",
            Self::TransferNft => "transfer_nft",
            Self::SwapToken => "swap_token",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TypesError::UnknownAction {
                name: s.to_string(),
            })
    }
}

/// What produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "action", rename_all = "snake_case")]
pub enum RecordKind {
    /// Simulated agent thought (no subtype)
    Thought,
    /// Simulated agent action, carrying its subtype
    Action(ActionKind),
    /// Message typed by the user
    User,
    /// Reply from the chat backend
    Agent,
    /// Error event from the chat backend
    Error,
}

impl RecordKind {
    /// The action subtype, if this record is an action
    pub fn subtype(&self) -> Option<ActionKind> {
        match self {
            Self::Action(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_thought(&self) -> bool {
        matches!(self, Self::Thought)
    }

    /// Short label used by renderers
    pub fn label(&self) -> &'static str {
        match self {
            Self::Thought => "thought",
            Self::Action(kind) => kind.as_str(),
            Self::User => "user",
            Self::Agent => "agent",
            Self::Error => "error",
        }
    }
}

/// A single entry of the activity stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    timestamp: DateTime<Utc>,
    content: String,
    kind: RecordKind,
}

impl ActivityRecord {
    /// Create a record stamped with the current time
    pub fn new(kind: RecordKind, content: impl Into<String>) -> Self {
        Self::at(Utc::now(), kind, content)
    }

    /// Create a record with an explicit timestamp
    pub fn at(timestamp: DateTime<Utc>, kind: RecordKind, content: impl Into<String>) -> Self {
        Self {
            timestamp,
            content: content.into(),
            kind,
        }
    }

    pub fn thought(content: impl Into<String>) -> Self {
        Self::new(RecordKind::Thought, content)
    }

    pub fn action(kind: ActionKind, content: impl Into<String>) -> Self {
        Self::new(RecordKind::Action(kind), content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(RecordKind::User, content)
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self::new(RecordKind::Agent, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(RecordKind::Error, content)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind_round_trips_through_name() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.as_str().parse::<ActionKind>().unwrap(), kind);
        }
        assert!("mint_everything".parse::<ActionKind>().is_err());
    }

    #[test]
    fn test_subtype_only_for_actions() {
        assert_eq!(RecordKind::Thought.subtype(), None);
        assert_eq!(RecordKind::User.subtype(), None);
        assert_eq!(
            RecordKind::Action(ActionKind::SwapToken).subtype(),
            Some(ActionKind::SwapToken)
        );
    }

    #[test]
    fn test_record_serializes_kind_with_subtype() {
        let record = ActivityRecord::action(ActionKind::TransferNft, "Transferred NFT #1234");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"]["kind"], "action");
        assert_eq!(json["kind"]["action"], "transfer_nft");
        assert_eq!(json["content"], "Transferred NFT #1234");
    }
}
