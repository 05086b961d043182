use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agentpulse_chat::{AssetSource, ChatSession};
use agentpulse_core::{
    ActivityGenerator, DashboardOptions, DashboardState, DriftModel, RefetchRequest,
    RequestOrigin, Submission, Variant,
};
use agentpulse_types::{ActivityRecord, ChatMessage, Language};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::config::EngineConfig;
use crate::events::EngineEvent;
use crate::timer::TimerHandle;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine is already running")]
    AlreadyRunning,
    #[error("engine is not running")]
    NotRunning,
    #[error("session has ended")]
    Closed,
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}

pub struct EngineBuilder {
    options: DashboardOptions,
    config: EngineConfig,
    chat: Option<ChatSession>,
    assets: Option<Arc<dyn AssetSource>>,
}

impl EngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn chat(mut self, chat: ChatSession) -> Self {
        self.chat = Some(chat);
        self
    }

    pub fn assets(mut self, assets: Arc<dyn AssetSource>) -> Self {
        self.assets = Some(assets);
        self
    }

    pub fn build(self) -> DashboardEngine {
        let (events, _) = broadcast::channel(256);
        DashboardEngine {
            state: Arc::new(Mutex::new(DashboardState::new(self.options))),
            config: Arc::new(self.config),
            chat: self.chat,
            assets: self.assets,
            events,
            generator: Arc::new(Mutex::new(None)),
            timers: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            running: Arc::new(AtomicBool::new(false)),
            generations: Arc::new(AtomicU64::new(0)),
        }
    }
}

/// Drives one dashboard session
#[derive(Clone)]
pub struct DashboardEngine {
    state: Arc<Mutex<DashboardState>>,
    config: Arc<EngineConfig>,
    chat: Option<ChatSession>,
    assets: Option<Arc<dyn AssetSource>>,
    events: broadcast::Sender<EngineEvent>,
    generator: Arc<Mutex<Option<TimerHandle>>>,
    timers: Arc<Mutex<Vec<TimerHandle>>>,
    requests: Arc<Mutex<Vec<JoinHandle<()>>>>,
    running: Arc<AtomicBool>,
    generations: Arc<AtomicU64>,
}

impl DashboardEngine {
    pub fn builder(options: DashboardOptions) -> EngineBuilder {
        EngineBuilder {
            options,
            config: EngineConfig::default(),
            chat: None,
            assets: None,
        }
    }

    pub fn new(options: DashboardOptions) -> Self {
        Self::builder(options).build()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn chat(&self) -> Option<&ChatSession> {
        self.chat.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    pub async fn start(&self) -> Result<(), EngineError> {
        if self.is_running() {
            return Err(EngineError::AlreadyRunning);
        }
        self.config.validate()?;
        let options = {
            let state = self.state.lock().await;
            if state.is_closed() {
                return Err(EngineError::Closed);
            }
            *state.options()
        };
        self.running.store(true, Ordering::Relaxed);

        if options.simulate {
            *self.generator.lock().await = Some(self.spawn_generator());
        }

        let mut timers = self.timers.lock().await;
        if options.simulate {
            timers.push(self.spawn_metrics());
        }
        timers.push(self.spawn_indicator("liveness", self.config.liveness_period, |state| {
            state.toggle_liveness()
        }));
        timers.push(self.spawn_indicator("dots", self.config.dots_period, |state| {
            state.advance_dots()
        }));
        if options.variant == Variant::Chat && self.chat.is_some() {
            timers.push(self.spawn_observer());
        }
        drop(timers);

        if self.assets.is_some() {
            let engine = self.clone();
            let handle = tokio::spawn(async move {
                engine
                    .refresh_assets(RefetchRequest {
                        nfts: true,
                        tokens: true,
                    })
                    .await;
            });
            self.track_request(handle).await;
        }

        tracing::info!(
            variant = options.variant.as_str(),
            language = %options.language,
            simulate = options.simulate,
            "dashboard engine started"
        );
        Ok(())
    }

    /// End the session: close the state, then stop every task.
    pub async fn stop(&self) -> Result<(), EngineError> {
        if !self.is_running() {
            return Err(EngineError::NotRunning);
        }
        self.running.store(false, Ordering::Relaxed);
        self.state.lock().await.close();

        if let Some(generator) = self.generator.lock().await.take() {
            generator.cancel().await;
        }
        let timers: Vec<TimerHandle> = self.timers.lock().await.drain(..).collect();
        for timer in timers {
            timer.cancel().await;
        }
        for request in self.requests.lock().await.drain(..) {
            request.abort();
        }

        self.emit(EngineEvent::Stopped);
        tracing::info!("dashboard engine stopped");
        Ok(())
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    /// Switch language: clears the stream and restarts the generator.
    pub async fn set_language(&self, language: Language) -> Result<bool, EngineError> {
        let simulate = {
            let mut state = self.state.lock().await;
            if state.is_closed() {
                return Err(EngineError::Closed);
            }
            if !state.set_language(language) {
                return Ok(false);
            }
            state.options().simulate
        };
        self.emit(EngineEvent::LanguageChanged(language));
        self.emit(EngineEvent::ThinkingChanged(false));

        let mut generator = self.generator.lock().await;
        if let Some(handle) = generator.take() {
            handle.cancel().await;
        }
        if simulate && self.is_running() {
            *generator = Some(self.spawn_generator());
        }
        tracing::info!(language = %language, "language changed");
        Ok(true)
    }

    pub async fn cycle_language(&self) -> Result<Language, EngineError> {
        let next = self.state.lock().await.language().next();
        self.set_language(next).await?;
        Ok(next)
    }

    pub async fn toggle_observing(&self) -> bool {
        let observing = self.state.lock().await.toggle_observing();
        self.emit(EngineEvent::ObservingChanged(observing));
        observing
    }

    pub async fn insert_char(&self, c: char) {
        self.state.lock().await.input_mut().insert_char(c);
    }

    pub async fn insert_newline(&self) {
        self.state.lock().await.input_mut().insert_newline();
    }

    pub async fn backspace(&self) {
        self.state.lock().await.input_mut().backspace();
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        self.state.lock().await.input_mut().set_text(text);
    }

    pub async fn use_premade_prompt(&self, index: usize) -> bool {
        self.state.lock().await.use_premade_prompt(index)
    }

    /// Submit the input field. Returns the user record when accepted.
    pub async fn submit(&self) -> Option<ActivityRecord> {
        let submission = self.state.lock().await.submit()?;
        Some(self.dispatch(submission).await)
    }

    /// Enter key handling; see `DashboardState::press_enter`.
    pub async fn press_enter(&self, with_modifier: bool) -> Option<ActivityRecord> {
        let submission = self.state.lock().await.press_enter(with_modifier)?;
        Some(self.dispatch(submission).await)
    }

    async fn dispatch(&self, submission: Submission) -> ActivityRecord {
        self.emit(EngineEvent::RecordAppended(submission.record.clone()));
        if submission.forward {
            self.spawn_request(RequestOrigin::User, submission.text).await;
        }
        submission.record
    }

    // ------------------------------------------------------------------
    // Chat
    // ------------------------------------------------------------------

    async fn spawn_request(&self, origin: RequestOrigin, text: String) {
        let engine = self.clone();
        let handle = tokio::spawn(async move {
            let messages = engine.post(&text).await;
            engine.finish_request(origin, &messages).await;
        });
        self.track_request(handle).await;
    }

    async fn track_request(&self, handle: JoinHandle<()>) {
        let mut requests = self.requests.lock().await;
        requests.retain(|h| !h.is_finished());
        requests.push(handle);
    }

    async fn post(&self, text: &str) -> Vec<ChatMessage> {
        match &self.chat {
            Some(chat) => chat.send(text).await,
            None => vec![ChatMessage::error("no chat backend configured")],
        }
    }

    async fn finish_request(&self, origin: RequestOrigin, messages: &[ChatMessage]) {
        let outcome = self.state.lock().await.apply_chat_reply(origin, messages);
        if let Some(record) = outcome.record {
            self.emit(EngineEvent::RecordAppended(record));
        }
        if !outcome.refetch.is_empty() {
            self.refresh_assets(outcome.refetch).await;
        }
    }

    /// Fetch the requested holdings and store them in the state.
    pub async fn refresh_assets(&self, request: RefetchRequest) {
        let Some(assets) = &self.assets else {
            return;
        };
        if request.nfts {
            match assets.fetch_nfts().await {
                Ok(nfts) => self.state.lock().await.set_nfts(nfts),
                Err(e) => tracing::warn!("failed to fetch NFTs: {}", e),
            }
        }
        if request.tokens {
            match assets.fetch_tokens().await {
                Ok(tokens) => self.state.lock().await.set_tokens(tokens),
                Err(e) => tracing::warn!("failed to fetch tokens: {}", e),
            }
        }
        let holdings = self.state.lock().await.holdings().clone();
        self.emit(EngineEvent::HoldingsUpdated(holdings));
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    fn emit(&self, event: EngineEvent) {
        // Ignore send errors (no receivers)
        let _ = self.events.send(event);
    }

    fn spawn_generator(&self) -> TimerHandle {
        let engine = self.clone();
        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let seed = self.config.seed.wrapping_add(generation);

        TimerHandle::spawn("generator", move |mut stop_rx| async move {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ticker = ticker(engine.config.generator_period);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let ticket = match engine.state.lock().await.begin_thinking() {
                            Some(ticket) => ticket,
                            None => break,
                        };
                        engine.emit(EngineEvent::ThinkingChanged(true));

                        tokio::select! {
                            _ = &mut stop_rx => break,
                            _ = tokio::time::sleep(engine.config.thinking_delay) => {}
                        }

                        let appended = {
                            let mut state = engine.state.lock().await;
                            let record = ActivityGenerator::new(state.language())
                                .with_thought_probability(engine.config.thought_probability)
                                .generate(&mut rng);
                            state
                                .complete_thinking(ticket, record.clone())
                                .then(|| (record, *state.metrics()))
                        };
                        if let Some((record, metrics)) = appended {
                            tracing::debug!(kind = record.kind().label(), "activity emitted");
                            engine.emit(EngineEvent::RecordAppended(record));
                            engine.emit(EngineEvent::ThinkingChanged(false));
                            engine.emit(EngineEvent::MetricsUpdated(metrics));
                        }
                    }
                }
            }
        })
    }

    fn spawn_metrics(&self) -> TimerHandle {
        let engine = self.clone();
        let seed = self.config.seed ^ 0x6d65_7472_6963_73;
        let model = DriftModel::default();

        TimerHandle::spawn("metrics", move |mut stop_rx| async move {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ticker = ticker(engine.config.metrics_period);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let delta = model.sample(&mut rng);
                        let metrics = {
                            let mut state = engine.state.lock().await;
                            state.apply_drift(&delta);
                            *state.metrics()
                        };
                        engine.emit(EngineEvent::MetricsUpdated(metrics));
                    }
                }
            }
        })
    }

    fn spawn_indicator(
        &self,
        name: &'static str,
        period: Duration,
        transition: fn(&mut DashboardState),
    ) -> TimerHandle {
        let state = self.state.clone();

        TimerHandle::spawn(name, move |mut stop_rx| async move {
            let mut ticker = ticker(period);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => transition(&mut *state.lock().await),
                }
            }
        })
    }

    fn spawn_observer(&self) -> TimerHandle {
        let engine = self.clone();

        TimerHandle::spawn("observe", move |mut stop_rx| async move {
            let prompt = engine.config.default_prompt.clone();

            if engine.config.observe_on_start && engine.state.lock().await.begin_observe_request() {
                tokio::select! {
                    _ = &mut stop_rx => return,
                    _ = engine.observe_once(&prompt) => {}
                }
            }

            let mut ticker = ticker(engine.config.observe_poll);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let claimed = {
                            let mut state = engine.state.lock().await;
                            state.is_observing() && state.begin_observe_request()
                        };
                        if claimed {
                            tokio::select! {
                                _ = &mut stop_rx => break,
                                _ = engine.observe_once(&prompt) => {}
                            }
                        }
                    }
                }
            }
        })
    }

    async fn observe_once(&self, prompt: &str) {
        let messages = self.post(prompt).await;
        self.finish_request(RequestOrigin::Observe, &messages).await;
    }
}

/// Interval whose first tick is one full period away
fn ticker(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
