//! Scan acquisition and digestion.
//!
//! A scan arrives either as a six-row textual table or as a list of
//! discrete block records; both shapes normalise through [`digest`] into a
//! [`nav_core::ScanSummary`]. The cache keeps the latest summary per
//! direction, the rolling log buffers raw textual output for backwards
//! re-parsing, and [`ScanSource`] abstracts where fresh scans come from.

mod cache;
mod digest;
mod log;
mod source;

pub use cache::ScanCache;
pub use digest::{digest, digest_from_log};
pub use log::ScanLogBuffer;
pub use source::{
    BlockSample, RecordScanSource, ScanObservation, ScanSource, ScanSourceError, TableScanSource,
};
