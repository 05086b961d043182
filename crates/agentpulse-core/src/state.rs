//! Dashboard state
//!
//! `DashboardState` is the single owner of everything the dashboard shows.
//! Each public `&mut self` method is one transition, called from exactly one
//! timer or input event. Callers hold the state for the duration of a call,
//! so concurrent sources never interleave inside a transition.

use agentpulse_types::{
    ActivityRecord, ChatEventKind, ChatMessage, Holdings, Language, MetricsDelta, MetricsSnapshot,
};
use tracing::debug;

use crate::buffer::{Capacity, StreamBuffer};
use crate::indicators::{LivenessIndicator, LoadingDots};
use crate::input::{ChatInput, EnterAction, PREMADE_PROMPTS};
use crate::reply::{reply_record, select_reply_message, RefetchRequest};

/// Simulated stream capacity
pub const SIMULATED_CAPACITY: usize = 10;

/// Which flavour of dashboard is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Standalone demo: generated activity, local-only chat
    Simulated,
    /// Wired to a chat backend
    Chat,
}

impl Variant {
    pub fn default_capacity(&self) -> Capacity {
        match self {
            Self::Simulated => Capacity::Bounded(SIMULATED_CAPACITY),
            Self::Chat => Capacity::Unbounded,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::Chat => "chat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simulated" | "sim" | "demo" => Some(Self::Simulated),
            "chat" | "live" => Some(Self::Chat),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardOptions {
    pub variant: Variant,
    pub capacity: Capacity,
    pub language: Language,
    /// Run the activity generator and metrics drift
    pub simulate: bool,
}

impl DashboardOptions {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            capacity: variant.default_capacity(),
            language: Language::default(),
            simulate: variant == Variant::Simulated,
        }
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_simulation(mut self, simulate: bool) -> Self {
        self.simulate = simulate;
        self
    }
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::for_variant(Variant::Simulated)
    }
}

/// Proof that a thinking phase was started in the current epoch.
///
/// Language changes and teardown move the state to a new epoch; tickets from
/// an older epoch are refused by `complete_thinking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct ThinkingTicket {
    epoch: u64,
}

/// Who asked the chat backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOrigin {
    /// The user submitted the input field
    User,
    /// Observe mode posted the default prompt
    Observe,
}

/// Text accepted for forwarding to the chat backend
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Raw input, untrimmed
    pub text: String,
    /// The user record appended for it
    pub record: ActivityRecord,
    /// Whether the chat backend should be called
    pub forward: bool,
}

/// Result of applying a chat reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyOutcome {
    pub record: Option<ActivityRecord>,
    pub refetch: RefetchRequest,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    options: DashboardOptions,
    stream: StreamBuffer,
    metrics: MetricsSnapshot,
    language: Language,
    liveness: LivenessIndicator,
    dots: LoadingDots,
    thinking: bool,
    epoch: u64,
    input: ChatInput,
    observing: bool,
    observe_in_flight: bool,
    holdings: Holdings,
    closed: bool,
}

impl DashboardState {
    pub fn new(options: DashboardOptions) -> Self {
        Self {
            options,
            stream: StreamBuffer::new(options.capacity),
            metrics: MetricsSnapshot::default(),
            language: options.language,
            liveness: LivenessIndicator::default(),
            dots: LoadingDots::default(),
            thinking: options.simulate,
            epoch: 0,
            input: ChatInput::default(),
            observing: false,
            observe_in_flight: false,
            holdings: Holdings::default(),
            closed: false,
        }
    }

    // ------------------------------------------------------------------
    // Activity generator
    // ------------------------------------------------------------------

    /// Start the "thinking" phase of a generator tick.
    pub fn begin_thinking(&mut self) -> Option<ThinkingTicket> {
        if self.closed {
            return None;
        }
        self.thinking = true;
        Some(ThinkingTicket { epoch: self.epoch })
    }

    /// Finish a thinking phase: append the record and count it.
    ///
    /// Returns `false` (and changes nothing) for a ticket from an older epoch.
    pub fn complete_thinking(&mut self, ticket: ThinkingTicket, record: ActivityRecord) -> bool {
        if self.closed || ticket.epoch != self.epoch {
            debug!(ticket = ticket.epoch, epoch = self.epoch, "dropping stale emission");
            return false;
        }
        self.metrics = self.metrics.after_record(&record.kind());
        self.stream.push(record);
        self.thinking = false;
        true
    }

    // ------------------------------------------------------------------
    // Metrics, indicators
    // ------------------------------------------------------------------

    pub fn apply_drift(&mut self, delta: &MetricsDelta) {
        if self.closed {
            return;
        }
        self.metrics = self.metrics.drifted(delta);
    }

    pub fn toggle_liveness(&mut self) {
        if !self.closed {
            self.liveness.toggle();
        }
    }

    pub fn advance_dots(&mut self) {
        if !self.closed {
            self.dots.advance();
        }
    }

    // ------------------------------------------------------------------
    // Language
    // ------------------------------------------------------------------

    /// Switch phrase tables. Clears the stream and invalidates pending emissions.
    pub fn set_language(&mut self, language: Language) -> bool {
        if self.closed || language == self.language {
            return false;
        }
        self.language = language;
        self.stream.clear();
        self.epoch += 1;
        self.thinking = false;
        true
    }

    // ------------------------------------------------------------------
    // Chat input
    // ------------------------------------------------------------------

    pub fn input_mut(&mut self) -> &mut ChatInput {
        &mut self.input
    }

    /// Fill the input with premade prompt `index`
    pub fn use_premade_prompt(&mut self, index: usize) -> bool {
        match PREMADE_PROMPTS.get(index) {
            Some(prompt) => {
                self.input.set_text(*prompt);
                true
            }
            None => false,
        }
    }

    /// Submit the input field. `None` when blank or a request is pending.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.closed {
            return None;
        }
        let text = self.input.take_submission()?;
        Some(self.accept_submission(text))
    }

    /// Enter key: newline with a modifier, otherwise submit.
    pub fn press_enter(&mut self, with_modifier: bool) -> Option<Submission> {
        if self.closed {
            return None;
        }
        match self.input.on_enter(with_modifier) {
            EnterAction::Submit(text) => Some(self.accept_submission(text)),
            EnterAction::Newline | EnterAction::Ignored => None,
        }
    }

    fn accept_submission(&mut self, text: String) -> Submission {
        let record = ActivityRecord::user(text.trim());
        self.stream.push(record.clone());
        let forward = self.options.variant == Variant::Chat;
        if forward {
            self.input.mark_pending();
        }
        Submission {
            text,
            record,
            forward,
        }
    }

    // ------------------------------------------------------------------
    // Observe mode
    // ------------------------------------------------------------------

    pub fn toggle_observing(&mut self) -> bool {
        self.observing = !self.observing;
        self.observing
    }

    /// Claim the observe request slot. `false` if one is already in flight.
    pub fn begin_observe_request(&mut self) -> bool {
        if self.closed || self.observe_in_flight {
            return false;
        }
        self.observe_in_flight = true;
        true
    }

    // ------------------------------------------------------------------
    // Chat replies
    // ------------------------------------------------------------------

    /// Apply a chat backend reply.
    ///
    /// User requests append the highest-priority message (agent, tools,
    /// error). Observe requests only append agent messages.
    pub fn apply_chat_reply(
        &mut self,
        origin: RequestOrigin,
        messages: &[ChatMessage],
    ) -> ReplyOutcome {
        if self.closed {
            return ReplyOutcome::default();
        }
        // Only user submissions refresh holdings
        let (record, refetch) = match origin {
            RequestOrigin::User => {
                self.input.finish();
                (
                    Some(reply_record(messages)),
                    RefetchRequest::from_messages(messages),
                )
            }
            RequestOrigin::Observe => {
                self.observe_in_flight = false;
                let record = select_reply_message(messages)
                    .filter(|m| m.event == ChatEventKind::Agent)
                    .map(|_| reply_record(messages));
                (record, RefetchRequest::default())
            }
        };
        if let Some(record) = &record {
            self.stream.push(record.clone());
        }
        ReplyOutcome { record, refetch }
    }

    // ------------------------------------------------------------------
    // Holdings
    // ------------------------------------------------------------------

    pub fn set_nfts(&mut self, nfts: Vec<String>) {
        if !self.closed {
            self.holdings.nfts = nfts;
        }
    }

    pub fn set_tokens(&mut self, tokens: Vec<String>) {
        if !self.closed {
            self.holdings.tokens = tokens;
        }
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// End the session. Every later transition is a no-op.
    pub fn close(&mut self) {
        self.closed = true;
        self.epoch += 1;
        self.thinking = false;
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    pub fn records(&self) -> &StreamBuffer {
        &self.stream
    }

    pub fn metrics(&self) -> &MetricsSnapshot {
        &self.metrics
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_live_dot_visible(&self) -> bool {
        self.liveness.is_visible()
    }

    pub fn loading_dots(&self) -> &'static str {
        self.dots.as_str()
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn input(&self) -> &ChatInput {
        &self.input
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn is_observe_in_flight(&self) -> bool {
        self.observe_in_flight
    }

    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ActivityGenerator;
    use crate::input::InputPhase;
    use agentpulse_types::{ActionKind, RecordKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn simulated() -> DashboardState {
        DashboardState::new(DashboardOptions::for_variant(Variant::Simulated))
    }

    fn chat() -> DashboardState {
        DashboardState::new(DashboardOptions::for_variant(Variant::Chat))
    }

    #[test]
    fn test_thinking_cycle_appends_and_counts() {
        let mut state = simulated();
        let ticket = state.begin_thinking().unwrap();
        assert!(state.is_thinking());
        assert!(state.complete_thinking(ticket, ActivityRecord::thought("hmm")));
        assert!(!state.is_thinking());
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.metrics().thoughts, 901);

        let ticket = state.begin_thinking().unwrap();
        assert!(state.complete_thinking(
            ticket,
            ActivityRecord::action(ActionKind::SwapToken, "swap")
        ));
        assert_eq!(state.metrics().transactions, 1);
    }

    #[test]
    fn test_simulated_stream_caps_at_ten() {
        let mut state = simulated();
        let mut rng = StdRng::seed_from_u64(1);
        let generator = ActivityGenerator::new(Language::En);
        for _ in 0..25 {
            let ticket = state.begin_thinking().unwrap();
            assert!(state.complete_thinking(ticket, generator.generate(&mut rng)));
        }
        assert_eq!(state.records().len(), SIMULATED_CAPACITY);
        let m = state.metrics();
        assert_eq!((m.thoughts - 900) + m.transactions, 25);
    }

    #[test]
    fn test_language_change_clears_and_invalidates_ticket() {
        let mut state = simulated();
        let ticket = state.begin_thinking().unwrap();
        state.complete_thinking(ticket, ActivityRecord::thought("old"));

        let pending = state.begin_thinking().unwrap();
        assert!(state.set_language(Language::Es));
        assert!(state.records().is_empty());
        assert!(!state.is_thinking());
        assert!(!state.complete_thinking(pending, ActivityRecord::thought("stale")));
        assert!(state.records().is_empty());
        assert_eq!(state.metrics().thoughts, 901);

        assert!(!state.set_language(Language::Es));
    }

    #[test]
    fn test_drift_and_record_counts_compose() {
        let mut state = simulated();
        let ticket = state.begin_thinking().unwrap();
        state.apply_drift(&MetricsDelta {
            earned: 1.0,
            ..MetricsDelta::default()
        });
        state.complete_thinking(ticket, ActivityRecord::thought("t"));
        state.apply_drift(&MetricsDelta {
            spent: 2.0,
            ..MetricsDelta::default()
        });
        let m = state.metrics();
        assert_eq!(m.earned, 10_001.0);
        assert_eq!(m.spent, 4_002.0);
        assert_eq!(m.thoughts, 901);
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut state = simulated();
        assert!(state.submit().is_none());
        state.input_mut().set_text("   ");
        assert!(state.submit().is_none());
        assert!(state.records().is_empty());
        assert_eq!(state.input().text(), "   ");
    }

    #[test]
    fn test_simulated_submit_stays_local() {
        let mut state = simulated();
        state.input_mut().set_text("  gm agent  ");
        let submission = state.submit().unwrap();
        assert!(!submission.forward);
        assert_eq!(submission.text, "  gm agent  ");
        assert_eq!(state.records().last().unwrap().content(), "gm agent");
        assert_eq!(state.input().phase(), InputPhase::Idle);
    }

    #[test]
    fn test_chat_submit_then_reply() {
        let mut state = chat();
        assert!(state.use_premade_prompt(1));
        let submission = state.press_enter(false).unwrap();
        assert!(submission.forward);
        assert_eq!(submission.text, "Deploy an NFT");
        assert_eq!(state.input().phase(), InputPhase::Submitting);

        state.input_mut().set_text("again");
        assert!(state.submit().is_none());

        let outcome = state.apply_chat_reply(
            RequestOrigin::User,
            &[
                ChatMessage::tools("deployed", vec!["deploy_nft".into()]),
                ChatMessage::agent("NFT is live"),
            ],
        );
        assert!(outcome.refetch.nfts);
        assert!(!outcome.refetch.tokens);
        assert_eq!(outcome.record.unwrap().content(), "NFT is live");

        let kinds: Vec<RecordKind> = state.records().iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec![RecordKind::User, RecordKind::Agent]);
        assert!(!state.input().is_pending());
    }

    #[test]
    fn test_observe_reply_requires_agent_message() {
        let mut state = chat();
        assert!(state.begin_observe_request());
        assert!(!state.begin_observe_request());
        let outcome = state.apply_chat_reply(RequestOrigin::Observe, &[ChatMessage::error("down")]);
        assert!(outcome.record.is_none());
        assert!(state.records().is_empty());
        assert!(state.begin_observe_request());
        state.apply_chat_reply(RequestOrigin::Observe, &[ChatMessage::agent("watching")]);
        assert_eq!(state.records().len(), 1);
    }

    #[test]
    fn test_observe_reply_never_refetches() {
        let mut state = chat();
        assert!(state.begin_observe_request());
        let outcome = state.apply_chat_reply(
            RequestOrigin::Observe,
            &[
                ChatMessage::tools("deployed", vec!["deploy_nft".into(), "deploy_token".into()]),
                ChatMessage::agent("deployed both"),
            ],
        );
        assert!(outcome.record.is_some());
        assert!(outcome.refetch.is_empty());
    }

    #[test]
    fn test_closed_state_ignores_everything() {
        let mut state = chat();
        let ticket = state.begin_thinking().unwrap();
        state.close();
        assert!(state.begin_thinking().is_none());
        assert!(!state.complete_thinking(ticket, ActivityRecord::thought("late")));
        let before = *state.metrics();
        state.apply_drift(&MetricsDelta {
            earned: 5.0,
            ..MetricsDelta::default()
        });
        assert_eq!(*state.metrics(), before);
        let outcome = state.apply_chat_reply(RequestOrigin::User, &[ChatMessage::agent("late")]);
        assert!(outcome.record.is_none());
        assert!(state.records().is_empty());
    }
}
