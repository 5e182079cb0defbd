//! Event surface of the navigation runtime.
//!
//! Every externally interesting outcome (scan requested, summary cached,
//! march planned or blocked, submission result, gate rejection) is
//! published here so frontends can render status lines without the core
//! depending on any particular UI event bus.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{MovementEvent, ScanEvent, SkillEvent};
