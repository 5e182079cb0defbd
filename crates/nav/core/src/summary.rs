//! Aggregated judgement for one scanned direction.

use crate::column::StepInfo;
use crate::direction::Direction;

/// Number of columns sampled ahead of the actor per scan.
pub const SCAN_RANGE: usize = 5;

/// Digested scan for one direction: five ordered column judgements plus the
/// derived safe prefix and first-hazard indices.
///
/// Invariants:
/// - `safe_len <= SCAN_RANGE`, and no column inside the safe prefix fails
///   [`StepInfo::safe`];
/// - `water_at` / `hazard_at` are 1-based indices in `1..=SCAN_RANGE` or
///   `None`, computed independently of the prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanSummary {
    pub direction: Direction,
    /// Column judgements; index 0 is one step away, index 4 five steps.
    pub steps: [StepInfo; SCAN_RANGE],
    /// Length of the leading run of safe columns.
    pub safe_len: u8,
    /// 1-based index of the first water-flagged column.
    pub water_at: Option<u8>,
    /// 1-based index of the first lava-flagged column.
    pub hazard_at: Option<u8>,
}

impl ScanSummary {
    /// Derive the prefix and hazard indices from classified columns.
    ///
    /// The safe prefix counts left to right while columns are enterable and
    /// hazard-free, stopping at the first failure; columns beyond it are
    /// not consulted. The hazard indices scan the full range.
    pub fn from_steps(direction: Direction, steps: [StepInfo; SCAN_RANGE]) -> Self {
        let mut safe_len = 0u8;
        for step in &steps {
            if !step.safe() {
                break;
            }
            safe_len += 1;
        }

        let water_at = first_index(&steps, |step| step.has_water());
        let hazard_at = first_index(&steps, |step| step.has_lava());

        Self {
            direction,
            steps,
            safe_len,
            water_at,
            hazard_at,
        }
    }
}

fn first_index(steps: &[StepInfo; SCAN_RANGE], flagged: impl Fn(&StepInfo) -> bool) -> Option<u8> {
    steps
        .iter()
        .position(flagged)
        .map(|index| (index + 1) as u8)
}
