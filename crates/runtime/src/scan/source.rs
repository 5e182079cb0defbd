//! Pluggable scan sources.
//!
//! The sensor behind a scan differs per frontend: some expose the raw
//! textual table, others a list of decoded block records. Both feed the
//! same parser entry point ([`super::digest`]), so sources only decide the
//! observation shape, never the judgement.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use nav_core::Direction;

/// One decoded terrain record from a structured sensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSample {
    /// Horizontal distance from the actor, 1-based.
    pub distance: u8,
    /// Vertical layer offset relative to foot level (+2..-3).
    pub layer: i8,
    /// Raw terrain label as reported by the oracle.
    pub label: String,
}

impl BlockSample {
    pub fn new(distance: u8, layer: i8, label: impl Into<String>) -> Self {
        Self {
            distance,
            layer,
            label: label.into(),
        }
    }
}

/// Raw sensor output in one of the two supported shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanObservation {
    /// Textual table: six rows labeled `+2:` down to `-3:`.
    Table(String),

    /// Discrete decoded records; missing entries are simply absent.
    Records(Vec<BlockSample>),
}

/// Scan source errors.
#[derive(Debug, thiserror::Error)]
pub enum ScanSourceError {
    #[error("sensor unavailable: {0}")]
    Unavailable(String),

    #[error("sensor produced no output for {0}")]
    Empty(Direction),
}

/// Asynchronous provider of fresh scans.
#[async_trait]
pub trait ScanSource: Send + Sync {
    /// Request a fresh scan of the given direction.
    async fn fetch(&self, direction: Direction) -> Result<ScanObservation, ScanSourceError>;
}

/// Scan source backed by textual tables, one per direction.
///
/// Frontends that scrape the game's text output preload (or continuously
/// refresh) the latest table per direction here.
#[derive(Clone, Default)]
pub struct TableScanSource {
    tables: Arc<Mutex<HashMap<Direction, String>>>,
}

impl TableScanSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest table for a direction, replacing any previous one.
    pub fn insert(&self, direction: Direction, table: impl Into<String>) {
        self.tables.lock().unwrap().insert(direction, table.into());
    }
}

#[async_trait]
impl ScanSource for TableScanSource {
    async fn fetch(&self, direction: Direction) -> Result<ScanObservation, ScanSourceError> {
        self.tables
            .lock()
            .unwrap()
            .get(&direction)
            .cloned()
            .map(ScanObservation::Table)
            .ok_or(ScanSourceError::Empty(direction))
    }
}

/// Scan source backed by decoded block records, one batch per direction.
///
/// Frontends with access to structured sensor elements feed decoded
/// records here instead of raw text.
#[derive(Clone, Default)]
pub struct RecordScanSource {
    records: Arc<Mutex<HashMap<Direction, Vec<BlockSample>>>>,
}

impl RecordScanSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest record batch for a direction.
    pub fn insert(&self, direction: Direction, records: Vec<BlockSample>) {
        self.records.lock().unwrap().insert(direction, records);
    }
}

#[async_trait]
impl ScanSource for RecordScanSource {
    async fn fetch(&self, direction: Direction) -> Result<ScanObservation, ScanSourceError> {
        self.records
            .lock()
            .unwrap()
            .get(&direction)
            .cloned()
            .map(ScanObservation::Records)
            .ok_or(ScanSourceError::Empty(direction))
    }
}
