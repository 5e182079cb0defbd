/// Coarse classification of an oracle terrain label.
///
/// The terrain oracle reports blocks as free-form labels (`"Air"`,
/// `"Water"`, `"MossyCobblestone"`, ...). Navigation only cares about a
/// handful of behavioral classes, so labels are collapsed here before any
/// judgement is made. Anything present that is not air, fluid, or passable
/// vegetation counts as [`BlockClass::Solid`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BlockClass {
    /// Empty space a body cell may occupy.
    Air,
    /// Water in any form. Unsafe to march through, but survivable.
    Water,
    /// Lava or magma in any form. Fatal; vetoes entry outright.
    Lava,
    /// Thin plant cover a body cell may pass through.
    Vegetation,
    /// Any other present block. Blocks the body, supports the feet.
    Solid,
}

/// Labels a body cell may occupy besides plain air.
const PASSABLE_VEGETATION: &[&str] = &[
    "grass",
    "short_grass",
    "tall_grass",
    "fern",
    "flower",
    "sapling",
    "mushroom",
];

impl BlockClass {
    /// Collapse a raw oracle label into its behavioral class.
    ///
    /// Matching is case-insensitive. Fluid labels match on their stem so
    /// variants like `FlowingWater` or `MagmaBlock` classify correctly.
    pub fn from_label(label: &str) -> Self {
        let normalized = normalize(label);

        if normalized == "air" || normalized.ends_with("_air") {
            return BlockClass::Air;
        }
        if normalized.contains("water") {
            return BlockClass::Water;
        }
        if normalized.contains("lava") || normalized.contains("magma") {
            return BlockClass::Lava;
        }
        if PASSABLE_VEGETATION.contains(&normalized.as_str()) {
            return BlockClass::Vegetation;
        }

        BlockClass::Solid
    }

    /// True if a body cell (feet or head) can occupy this block.
    pub fn is_walkable(self) -> bool {
        matches!(self, BlockClass::Air | BlockClass::Vegetation)
    }

    /// True if this block can support the actor's feet.
    ///
    /// Lava passes this check; it is rejected via the hazard flags instead,
    /// so a column over magma still reports the offset it would need.
    pub fn is_floor(self) -> bool {
        !matches!(self, BlockClass::Air | BlockClass::Water)
    }
}

/// Lowercase and convert CamelCase oracle labels to snake_case.
fn normalize(label: &str) -> String {
    let label = label.trim();
    let mut out = String::with_capacity(label.len() + 4);
    for (i, ch) in label.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == ' ' || ch == '-' {
            out.push('_');
        } else {
            out.push(ch);
        }
    }
    out
}
