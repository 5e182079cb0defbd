//! March plan computation.
//!
//! Turns a digested [`ScanSummary`] plus the count of steps already marched
//! since the scan into an ordered sequence of movement primitives. The
//! caller submits the rendered compound command as a single queued task so
//! two plans can never interleave mid-sequence.

use arrayvec::ArrayVec;
use std::fmt;

use crate::column::StepInfo;
use crate::direction::Direction;
use crate::summary::{SCAN_RANGE, ScanSummary};

/// Candidate starting elevations for the continuity search, tried in fixed
/// priority order; ties favor the earlier candidate.
pub const START_CANDIDATES: [i8; 4] = [0, 1, -1, -2];

/// Upper bound on emitted tokens: two tokens to reach the start elevation,
/// then per step one directional token plus at most three vertical tokens.
pub const MAX_PLAN_TOKENS: usize = 2 + SCAN_RANGE * 4;

/// One atomic movement primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveToken {
    /// One column of horizontal travel.
    Step(Direction),
    /// One block of ascent.
    Up,
    /// One block of descent.
    Down,
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveToken::Step(direction) => write!(f, "{direction}"),
            MoveToken::Up => write!(f, "up"),
            MoveToken::Down => write!(f, "down"),
        }
    }
}

/// Ordered, non-empty movement primitive sequence for one march.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarchPlan {
    pub direction: Direction,
    /// Elevation the plan assumes before the first directional token.
    pub start_elevation: i8,
    /// Number of columns the plan advances.
    pub steps: u8,
    pub tokens: ArrayVec<MoveToken, MAX_PLAN_TOKENS>,
}

impl MarchPlan {
    /// Render the plan as one compound movement command.
    pub fn compound_command(&self) -> String {
        let mut command = String::from("move");
        for token in &self.tokens {
            command.push(' ');
            command.push_str(&token.to_string());
        }
        command
    }
}

/// Reasons a plan cannot be produced from the given summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Every scanned-safe column has already been marched.
    #[error("no unconsumed safe steps remain in the scanned range")]
    Exhausted,

    /// A column inside the unconsumed slice is not safely enterable.
    #[error("column {column} ahead is not safely enterable")]
    UnsafeStep { column: u8 },

    /// No starting elevation yields even one reachable step.
    #[error("no elevation-continuous route through the scanned columns")]
    Discontinuous,
}

/// Compute a march plan from a summary and the consumed-step count.
///
/// Slices the remaining steps to `min(SCAN_RANGE, consumed + safe_len)`,
/// rejects the slice if it is empty or contains an unsafe column, then runs
/// the elevation continuity search: for each candidate start in
/// [`START_CANDIDATES`] order, count consecutive steps whose offset differs
/// from the previous accepted offset (or the start) by at least -2 —
/// ascent is unbounded per transition, descent capped at two blocks,
/// mirroring the classifier's floor search. The candidate maximising the
/// count wins.
pub fn plan_march(summary: &ScanSummary, consumed: u8) -> Result<MarchPlan, PlanError> {
    let consumed = consumed as usize;
    let end = SCAN_RANGE.min(consumed + summary.safe_len as usize);
    if consumed >= end {
        return Err(PlanError::Exhausted);
    }

    let remaining = &summary.steps[consumed..end];
    for (index, step) in remaining.iter().enumerate() {
        if !step.safe() {
            return Err(PlanError::UnsafeStep {
                column: (consumed + index + 1) as u8,
            });
        }
    }

    let (start_elevation, count) = best_start(remaining);
    if count == 0 {
        return Err(PlanError::Discontinuous);
    }

    let mut tokens = ArrayVec::new();
    for _ in 0..start_elevation.unsigned_abs() {
        tokens.push(if start_elevation > 0 {
            MoveToken::Up
        } else {
            MoveToken::Down
        });
    }

    let mut elevation = start_elevation;
    for (index, step) in remaining[..count].iter().enumerate() {
        let Some(dy) = step.dy else {
            // Unreachable after the safety pass above, but never trust it
            // silently: surface the column instead of panicking.
            return Err(PlanError::UnsafeStep {
                column: (consumed + index + 1) as u8,
            });
        };

        tokens.push(MoveToken::Step(summary.direction));
        while elevation < dy {
            tokens.push(MoveToken::Up);
            elevation += 1;
        }
        while elevation > dy {
            tokens.push(MoveToken::Down);
            elevation -= 1;
        }
    }

    Ok(MarchPlan {
        direction: summary.direction,
        start_elevation,
        steps: count as u8,
        tokens,
    })
}

/// Elevation continuity search over the unconsumed slice.
fn best_start(remaining: &[StepInfo]) -> (i8, usize) {
    let mut best = (START_CANDIDATES[0], 0usize);

    for candidate in START_CANDIDATES {
        let mut previous = candidate;
        let mut count = 0usize;

        for step in remaining {
            let Some(dy) = step.dy else { break };
            if dy - previous < -2 {
                break;
            }
            previous = dy;
            count += 1;
        }

        if count > best.1 {
            best = (candidate, count);
        }
    }

    best
}
