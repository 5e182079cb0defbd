//! Per-column traversability judgement.
//!
//! A column is the vertical slice of terrain samples at one horizontal
//! distance from the actor. The classifier decides whether a two-cell body
//! (feet + head) can occupy the column at some vertical offset with solid
//! ground beneath, and independently flags fluid hazards anywhere in the
//! sampled span.

use crate::terrain::BlockClass;

/// Highest sampled layer offset relative to the actor's foot level.
pub const LAYER_MAX: i8 = 2;
/// Lowest sampled layer offset relative to the actor's foot level.
pub const LAYER_MIN: i8 = -3;
/// Number of sampled layers per column.
pub const LAYER_COUNT: usize = 6;

/// Candidate vertical offsets, tried in fixed priority order.
///
/// The first candidate with walkable body layers and a supporting floor
/// wins; the search never continues looking for a "better" offset.
pub const DY_CANDIDATES: [i8; 4] = [0, 1, -1, -2];

/// Fluid hazards observed anywhere in a column's sampled span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardFlags(u8);

bitflags::bitflags! {
    impl HazardFlags: u8 {
        const WATER = 1 << 0;
        const LAVA = 1 << 1;
    }
}

/// Terrain samples for one column, indexed by layer offset (+2..-3).
///
/// Entries may be absent when the scan source only produced partial
/// records; an absent layer simply fails the walkability/floor checks, it
/// is not an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanColumn {
    layers: [Option<BlockClass>; LAYER_COUNT],
}

impl ScanColumn {
    /// Column with no samples at all.
    pub const EMPTY: Self = Self {
        layers: [None; LAYER_COUNT],
    };

    /// Build a column from fully sampled layers ordered top to bottom
    /// (+2 first, -3 last), matching the textual scan table.
    pub fn from_layers(layers: [BlockClass; LAYER_COUNT]) -> Self {
        let mut column = Self::EMPTY;
        for (index, class) in layers.into_iter().enumerate() {
            column.layers[index] = Some(class);
        }
        column
    }

    /// Sample at the given layer offset, or `None` when absent or out of
    /// the sampled span.
    pub fn layer(&self, offset: i8) -> Option<BlockClass> {
        if !(LAYER_MIN..=LAYER_MAX).contains(&offset) {
            return None;
        }
        self.layers[(LAYER_MAX - offset) as usize]
    }

    /// Record a sample at the given layer offset. Offsets outside the
    /// sampled span are ignored.
    pub fn set_layer(&mut self, offset: i8, class: BlockClass) {
        if (LAYER_MIN..=LAYER_MAX).contains(&offset) {
            self.layers[(LAYER_MAX - offset) as usize] = Some(class);
        }
    }
}

/// Traversability judgement for one column at horizontal distance 1..5.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepInfo {
    /// Vertical offset the body would occupy, or `None` when no candidate
    /// offset has walkable body layers over a supporting floor.
    pub dy: Option<i8>,
    /// Fluid hazards anywhere in the sampled span, independent of `dy`.
    pub hazards: HazardFlags,
}

impl StepInfo {
    pub fn has_water(&self) -> bool {
        self.hazards.contains(HazardFlags::WATER)
    }

    pub fn has_lava(&self) -> bool {
        self.hazards.contains(HazardFlags::LAVA)
    }

    /// Whether the actor may enter the column at all.
    ///
    /// Lava anywhere in the span vetoes entry; water does not, it is
    /// reported separately so planners can treat it as unsafe-but-not-fatal.
    pub fn enterable(&self) -> bool {
        !self.has_lava() && self.dy.is_some()
    }

    /// Enterable and free of every flagged hazard — the predicate the safe
    /// prefix is counted with.
    pub fn safe(&self) -> bool {
        self.enterable() && self.hazards.is_empty()
    }
}

/// Judge one column: find the body offset and flag hazards.
///
/// Offset search: for each candidate `dy` in [`DY_CANDIDATES`] order, the
/// body occupies layers `dy` (feet) and `dy + 1` (head) over a floor at
/// `dy - 1`. The first candidate with both body layers walkable and a
/// present, non-air, non-water floor is accepted.
///
/// Hazard detection scans all six layers regardless of the chosen span, so
/// a column is flagged even when the selected offset never touches the
/// hazardous layer.
pub fn classify_column(column: &ScanColumn) -> StepInfo {
    let mut hazards = HazardFlags::empty();
    for offset in LAYER_MIN..=LAYER_MAX {
        match column.layer(offset) {
            Some(BlockClass::Water) => hazards |= HazardFlags::WATER,
            Some(BlockClass::Lava) => hazards |= HazardFlags::LAVA,
            _ => {}
        }
    }

    let mut dy = None;
    for candidate in DY_CANDIDATES {
        let feet_walkable = column.layer(candidate).is_some_and(BlockClass::is_walkable);
        let head_walkable = column
            .layer(candidate + 1)
            .is_some_and(BlockClass::is_walkable);
        let floor_solid = column.layer(candidate - 1).is_some_and(BlockClass::is_floor);

        if feet_walkable && head_walkable && floor_solid {
            dy = Some(candidate);
            break;
        }
    }

    StepInfo { dy, hazards }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::BlockClass::{Air, Lava, Solid, Vegetation, Water};

    fn column(layers: [BlockClass; LAYER_COUNT]) -> ScanColumn {
        ScanColumn::from_layers(layers)
    }

    #[test]
    fn flat_ground_is_level_entry() {
        // +2..-3: air, air, air(feet), solid(floor), solid, solid
        let info = classify_column(&column([Air, Air, Air, Solid, Solid, Solid]));
        assert_eq!(info.dy, Some(0));
        assert!(info.safe());
    }

    #[test]
    fn one_block_rise_steps_up() {
        // Feet level blocked, +1 open with floor at 0.
        let info = classify_column(&column([Air, Air, Solid, Solid, Solid, Solid]));
        assert_eq!(info.dy, Some(1));
    }

    #[test]
    fn drop_of_two_is_accepted() {
        // Open all the way down, first floor at -3 => body at -2.
        let info = classify_column(&column([Air, Air, Air, Air, Air, Solid]));
        assert_eq!(info.dy, Some(-2));
    }

    #[test]
    fn level_entry_wins_over_step_up() {
        // Both dy=0 and dy=+1 would be valid; priority order keeps 0.
        let info = classify_column(&column([Air, Air, Air, Solid, Solid, Solid]));
        assert_eq!(info.dy, Some(0));
    }

    #[test]
    fn sheer_wall_has_no_offset() {
        let info = classify_column(&column([Solid, Solid, Solid, Solid, Solid, Solid]));
        assert_eq!(info.dy, None);
        assert!(!info.enterable());
    }

    #[test]
    fn vegetation_is_body_passable() {
        let info = classify_column(&column([Air, Air, Vegetation, Solid, Solid, Solid]));
        assert_eq!(info.dy, Some(0));
    }

    #[test]
    fn water_floor_does_not_support() {
        // Floor at -1 is water: dy=0 rejected, -1 feet in water rejected,
        // -2 floor water rejected => no offset, water flagged.
        let info = classify_column(&column([Air, Air, Air, Water, Water, Water]));
        assert_eq!(info.dy, None);
        assert!(info.has_water());
        assert!(!info.enterable());
    }

    #[test]
    fn lava_anywhere_vetoes_entry() {
        // Valid dy=0 span, but lava at the bottom of the column.
        let info = classify_column(&column([Air, Air, Air, Solid, Solid, Lava]));
        assert_eq!(info.dy, Some(0));
        assert!(info.has_lava());
        assert!(!info.enterable());
    }

    #[test]
    fn water_flags_but_does_not_veto() {
        // Water at +2, body span at 0 never touches it.
        let info = classify_column(&column([Water, Air, Air, Solid, Solid, Solid]));
        assert_eq!(info.dy, Some(0));
        assert!(info.has_water());
        assert!(info.enterable());
        assert!(!info.safe());
    }

    #[test]
    fn absent_layers_fail_candidates_silently() {
        let mut partial = ScanColumn::EMPTY;
        // Only feet and head sampled; floor unknown => no acceptance.
        partial.set_layer(0, Air);
        partial.set_layer(1, Air);
        let info = classify_column(&partial);
        assert_eq!(info.dy, None);
        assert!(info.hazards.is_empty());
    }

    #[test]
    fn enterable_implies_no_lava_and_defined_dy() {
        let infos = [
            classify_column(&column([Air, Air, Air, Solid, Solid, Solid])),
            classify_column(&column([Air, Air, Air, Solid, Solid, Lava])),
            classify_column(&column([Solid; LAYER_COUNT])),
            classify_column(&column([Water, Air, Air, Solid, Solid, Solid])),
        ];
        for info in infos {
            if info.enterable() {
                assert!(!info.has_lava());
                assert!(info.dy.is_some());
            }
        }
    }
}
