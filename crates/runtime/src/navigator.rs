//! High-level navigation orchestrator.
//!
//! The navigator owns the session stores (scan cache, rolling log, command
//! history, progress), the single-flight command queue, and the skill
//! registry, and exposes a builder-based API for clients to drive marches.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use client_chain_core::{CommandPayload, WorldTransport};
use nav_core::{Direction, ScanSummary, plan_march};

use crate::config::NavConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, MovementEvent, ScanEvent, SkillEvent, Topic};
use crate::history::{CommandHistory, HistoryEntry};
use crate::progress::{MemoryProgressRepository, PlayerProgress, ProgressRepository};
use crate::queue::{CommandQueue, CommandTask};
use crate::scan::{ScanCache, ScanLogBuffer, ScanObservation, ScanSource, digest};
use crate::skills::{SkillCheck, SkillContext, SkillDescriptor, SkillOutcome, SkillRegistry};

/// Caller-supplied summary override consulted between the cache and the
/// rolling log.
pub type SummaryAccessor = Arc<dyn Fn(Direction) -> Option<ScanSummary> + Send + Sync>;

/// Result of one planning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarchOutcome {
    /// A compound command was computed and queued.
    Done {
        direction: Direction,
        steps: u8,
        command: String,
    },

    /// Nothing was queued; the reason has already been published.
    Blocked { direction: Direction, reason: String },
}

/// Owner of the navigation session state.
///
/// Methods take `&self`; the navigator is designed to sit behind an `Arc`
/// shared between a frontend and its event-echo tasks. All world mutations
/// are serialized through the internal command queue.
pub struct Navigator {
    actor: String,
    config: NavConfig,
    transport: Arc<dyn WorldTransport>,
    scan_source: Arc<dyn ScanSource>,
    summary_accessor: Option<SummaryAccessor>,
    cache: Mutex<ScanCache>,
    scan_log: Mutex<ScanLogBuffer>,
    history: Arc<Mutex<CommandHistory>>,
    queue: CommandQueue,
    queue_join: JoinHandle<()>,
    events: EventBus,
    registry: SkillRegistry,
    progress: Arc<Mutex<PlayerProgress>>,
    progress_repo: Arc<dyn ProgressRepository>,
}

impl Navigator {
    /// Create a new navigator builder
    pub fn builder() -> NavigatorBuilder {
        NavigatorBuilder::new()
    }

    /// Acting entity identifier as the transport knows it.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.events
    }

    // ========================================================================
    // Scan surface
    // ========================================================================

    /// Latest cached summary for a direction, if any.
    pub fn cached(&self, direction: Direction) -> Option<ScanSummary> {
        self.cache.lock().unwrap().get(direction)
    }

    /// Store a summary, replacing any previous entry for its direction.
    pub fn cache_summary(&self, summary: ScanSummary) {
        self.cache.lock().unwrap().set(summary);
    }

    /// Drop every cached summary.
    pub fn clear_cache(&self) {
        self.cache.lock().unwrap().clear();
        self.events.publish(Event::Scan(ScanEvent::CacheCleared));
    }

    /// Feed raw frontend output into the rolling scan log.
    pub fn append_log(&self, text: &str) {
        self.scan_log.lock().unwrap().push_text(text);
    }

    /// Digest an observation, cache the summary, and record raw tables in
    /// the rolling log. Returns `None` for malformed input.
    pub fn ingest(&self, direction: Direction, observation: &ScanObservation) -> Option<ScanSummary> {
        if let ScanObservation::Table(text) = observation {
            let mut log = self.scan_log.lock().unwrap();
            log.push(format!("scan {direction}:"));
            log.push_text(text);
        }

        let summary = digest(observation, direction)?;
        self.cache.lock().unwrap().set(summary);
        self.events.publish(Event::Scan(ScanEvent::Digested {
            direction,
            safe_len: summary.safe_len,
        }));
        Some(summary)
    }

    /// Force a fresh scan of a direction and cache its digest.
    pub async fn refresh_scan(&self, direction: Direction) -> Option<ScanSummary> {
        self.request_fresh_scan(direction).await
    }

    // ========================================================================
    // Planning
    // ========================================================================

    /// Plan a march and queue its compound command.
    ///
    /// Summary acquisition order: cache, caller-supplied accessor,
    /// backwards re-parse of the rolling log, and finally one fresh scan
    /// request bounded by the configured wait. Every blocked outcome is
    /// published with a reason; an unsafe or exhausted plan additionally
    /// triggers a re-scan of the direction.
    pub async fn plan(&self, direction: Direction) -> Result<MarchOutcome> {
        let Some(summary) = self.acquire_summary(direction).await else {
            return Ok(self.blocked(direction, format!("no scan data for {direction}")));
        };

        let consumed = self.history.lock().unwrap().consumed_since_scan(direction);
        let plan = match plan_march(&summary, consumed) {
            Ok(plan) => plan,
            Err(err) => {
                let outcome = self.blocked(direction, err.to_string());
                // The remembered scan no longer covers safe ground ahead.
                self.request_fresh_scan(direction).await;
                return Ok(outcome);
            }
        };

        let command = plan.compound_command();
        let payload = CommandPayload::new(&self.actor, command.clone());
        let steps = plan.steps;

        let transport = Arc::clone(&self.transport);
        let history = Arc::clone(&self.history);
        let progress = Arc::clone(&self.progress);
        let repository = Arc::clone(&self.progress_repo);
        let events = self.events.clone();
        let actor = self.actor.clone();
        let program = command.clone();

        let task = CommandTask::new(command.clone(), async move {
            match transport.submit(payload).await {
                Ok(receipt) => {
                    history.lock().unwrap().push(HistoryEntry::March { direction, steps });
                    let snapshot = {
                        let mut progress = progress.lock().unwrap();
                        progress.record_distance(steps as u64);
                        progress.clone()
                    };
                    repository.save(&actor, &snapshot)?;
                    events.publish(Event::Movement(MovementEvent::Submitted {
                        program: program.clone(),
                        gas_used: receipt.gas_used,
                    }));
                    Ok(())
                }
                Err(error) => {
                    // The actor never moved; the interruption entry makes
                    // the consumed-run restart from here.
                    history
                        .lock()
                        .unwrap()
                        .push(HistoryEntry::Other(format!("failed: {program}")));
                    events.publish(Event::Movement(MovementEvent::SubmissionFailed {
                        program: program.clone(),
                        error: error.to_string(),
                    }));
                    Err(error.into())
                }
            }
        });

        self.queue.enqueue(task)?;
        self.events.publish(Event::Movement(MovementEvent::Planned {
            direction,
            steps,
            command: command.clone(),
        }));
        debug!(%direction, steps, %command, "march queued");

        Ok(MarchOutcome::Done {
            direction,
            steps,
            command,
        })
    }

    async fn acquire_summary(&self, direction: Direction) -> Option<ScanSummary> {
        if let Some(summary) = self.cache.lock().unwrap().get(direction) {
            return Some(summary);
        }

        if let Some(accessor) = &self.summary_accessor
            && let Some(summary) = accessor.as_ref()(direction)
        {
            self.cache.lock().unwrap().set(summary);
            return Some(summary);
        }

        let lines = self.scan_log.lock().unwrap().snapshot();
        if let Some(summary) = self
            .cache
            .lock()
            .unwrap()
            .update_from_log(&lines, Some(direction))
        {
            return Some(summary);
        }

        self.request_fresh_scan(direction).await
    }

    async fn request_fresh_scan(&self, direction: Direction) -> Option<ScanSummary> {
        self.history
            .lock()
            .unwrap()
            .push(HistoryEntry::ScanIssued(direction));
        self.events
            .publish(Event::Scan(ScanEvent::Requested { direction }));
        debug!(%direction, "requesting fresh scan");

        let fetched =
            tokio::time::timeout(self.config.scan_wait, self.scan_source.fetch(direction)).await;
        let observation = match fetched {
            Ok(Ok(observation)) => observation,
            Ok(Err(err)) => {
                warn!(%direction, error = %err, "scan source failed");
                return None;
            }
            Err(_) => {
                warn!(%direction, "scan request timed out");
                return None;
            }
        };

        self.ingest(direction, &observation)
    }

    fn blocked(&self, direction: Direction, reason: String) -> MarchOutcome {
        warn!(%direction, %reason, "march blocked");
        self.events.publish(Event::Movement(MovementEvent::Blocked {
            direction,
            reason: reason.clone(),
        }));
        MarchOutcome::Blocked { direction, reason }
    }

    // ========================================================================
    // Queue and history
    // ========================================================================

    /// Submit an arbitrary task to the single-flight queue.
    pub fn enqueue(&self, task: CommandTask) -> Result<()> {
        self.queue.enqueue(task)
    }

    /// Recent command history, oldest first.
    pub fn history_snapshot(&self) -> Vec<HistoryEntry> {
        self.history.lock().unwrap().snapshot()
    }

    // ========================================================================
    // Skills and progress
    // ========================================================================

    /// Check the gate and, only on pass, invoke the skill's behavior.
    pub async fn dispatch_skill(&self, name: &str, args: &[String]) -> SkillOutcome {
        let snapshot = self.progress_snapshot();
        match self.registry.check(name, &snapshot) {
            SkillCheck::Denied { reason } => {
                warn!(skill = name, %reason, "skill locked");
                self.events.publish(Event::Skill(SkillEvent::Rejected {
                    name: name.to_string(),
                    reason: reason.clone(),
                }));
                SkillOutcome::Locked(reason)
            }
            SkillCheck::Ok => {
                // check() rejects unregistered names, so the entry exists.
                let Some(descriptor) = self.registry.get(name) else {
                    return SkillOutcome::Locked("unknown".into());
                };
                let behavior = Arc::clone(&descriptor.behavior);
                self.events.publish(Event::Skill(SkillEvent::Dispatched {
                    name: name.to_string(),
                }));
                behavior.invoke(SkillContext { navigator: self }, args).await
            }
        }
    }

    /// Gate decision for a skill against the current progress snapshot,
    /// without invoking anything.
    pub fn check_skill(&self, name: &str) -> SkillCheck {
        self.registry.check(name, &self.progress_snapshot())
    }

    /// Registered skill names, sorted.
    pub fn skill_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Clone of the current progress state.
    pub fn progress_snapshot(&self) -> PlayerProgress {
        self.progress.lock().unwrap().clone()
    }

    /// Mutate progress and persist the result.
    pub fn update_progress(
        &self,
        mutate: impl FnOnce(&mut PlayerProgress),
    ) -> Result<PlayerProgress> {
        let snapshot = {
            let mut progress = self.progress.lock().unwrap();
            mutate(&mut progress);
            progress.clone()
        };
        self.progress_repo.save(&self.actor, &snapshot)?;
        Ok(snapshot)
    }

    /// Shutdown the navigator gracefully, draining the queue first.
    pub async fn shutdown(self) -> Result<()> {
        let Navigator {
            queue, queue_join, ..
        } = self;
        drop(queue);
        queue_join.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Navigator`] with flexible configuration.
pub struct NavigatorBuilder {
    actor: String,
    config: NavConfig,
    transport: Option<Arc<dyn WorldTransport>>,
    scan_source: Option<Arc<dyn ScanSource>>,
    progress_repository: Option<Arc<dyn ProgressRepository>>,
    summary_accessor: Option<SummaryAccessor>,
    registry: SkillRegistry,
}

impl NavigatorBuilder {
    fn new() -> Self {
        Self {
            actor: "wayfarer".to_string(),
            config: NavConfig::default(),
            transport: None,
            scan_source: None,
            progress_repository: None,
            summary_accessor: None,
            registry: SkillRegistry::new(),
        }
    }

    /// Set the acting entity identifier.
    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Override runtime configuration
    pub fn config(mut self, config: NavConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required world transport.
    pub fn transport(mut self, transport: impl WorldTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Set the required scan source.
    pub fn scan_source(mut self, source: impl ScanSource + 'static) -> Self {
        self.scan_source = Some(Arc::new(source));
        self
    }

    /// Set the progress repository (defaults to in-memory).
    pub fn progress_repository(mut self, repository: impl ProgressRepository + 'static) -> Self {
        self.progress_repository = Some(Arc::new(repository));
        self
    }

    /// Install a caller-supplied summary accessor, consulted between the
    /// cache and the rolling-log re-parse.
    pub fn summary_accessor(
        mut self,
        accessor: impl Fn(Direction) -> Option<ScanSummary> + Send + Sync + 'static,
    ) -> Self {
        self.summary_accessor = Some(Arc::new(accessor));
        self
    }

    /// Register a skill.
    pub fn register_skill(mut self, descriptor: SkillDescriptor) -> Self {
        self.registry.register(descriptor);
        self
    }

    /// Build the navigator
    pub async fn build(self) -> Result<Navigator> {
        let transport = self.transport.ok_or(RuntimeError::MissingTransport)?;
        let scan_source = self.scan_source.ok_or(RuntimeError::MissingScanSource)?;
        let progress_repo = self
            .progress_repository
            .unwrap_or_else(|| Arc::new(MemoryProgressRepository::new()));

        let progress = progress_repo.load(&self.actor)?.unwrap_or_default();

        let events = EventBus::with_capacity(self.config.event_buffer_size);
        let (queue, queue_join) = CommandQueue::start();

        Ok(Navigator {
            cache: Mutex::new(ScanCache::new()),
            scan_log: Mutex::new(ScanLogBuffer::new(self.config.scan_log_capacity)),
            history: Arc::new(Mutex::new(CommandHistory::new(self.config.history_capacity))),
            progress: Arc::new(Mutex::new(progress)),
            actor: self.actor,
            config: self.config,
            transport,
            scan_source,
            summary_accessor: self.summary_accessor,
            queue,
            queue_join,
            events,
            registry: self.registry,
            progress_repo,
        })
    }
}
