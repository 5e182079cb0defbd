//! Navigation runtime: scan digestion, planning, queueing, and skill gating.
//!
//! The runtime owns the mutable session state (scan cache, rolling scan
//! log, command history, player progress) and the single-flight command
//! queue. Clients drive it through [`Navigator`], built via
//! [`NavigatorBuilder`]; all world mutations funnel through the queue so no
//! two compound commands ever interleave.
pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod navigator;
pub mod progress;
pub mod queue;
pub mod scan;
pub mod skills;

pub use config::NavConfig;
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, MovementEvent, ScanEvent, SkillEvent, Topic};
pub use history::{CommandHistory, HistoryEntry};
pub use navigator::{MarchOutcome, Navigator, NavigatorBuilder};
pub use progress::{
    FileProgressRepository, MemoryProgressRepository, PlayerProgress, ProgressRepository,
    RepositoryError,
};
pub use queue::{CommandQueue, CommandTask};
pub use scan::{
    BlockSample, RecordScanSource, ScanCache, ScanLogBuffer, ScanObservation, ScanSource,
    ScanSourceError, TableScanSource, digest, digest_from_log,
};
pub use skills::{
    MarchSkill, SkillBehavior, SkillCheck, SkillContext, SkillDescriptor, SkillOutcome,
    SkillRegistry, SkillRequirement, SurveySkill,
};
