//! Engine events for headless consumers

use agentpulse_types::{ActivityRecord, Holdings, Language, MetricsSnapshot};

/// Broadcast whenever the engine changes the dashboard state
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A record was appended to the stream
    RecordAppended(ActivityRecord),
    ThinkingChanged(bool),
    MetricsUpdated(MetricsSnapshot),
    /// Language switched; the stream was cleared
    LanguageChanged(Language),
    HoldingsUpdated(Holdings),
    ObservingChanged(bool),
    Stopped,
}
