/// Horizontal march direction, one of the 8 compass points.
///
/// Each direction maps to a fixed unit offset on the two horizontal axes
/// (`x` grows east, `z` grows south).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    North,
    #[strum(to_string = "northeast", serialize = "ne")]
    NorthEast,
    East,
    #[strum(to_string = "southeast", serialize = "se")]
    SouthEast,
    South,
    #[strum(to_string = "southwest", serialize = "sw")]
    SouthWest,
    West,
    #[strum(to_string = "northwest", serialize = "nw")]
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit offset on the horizontal axes.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Parse a direction from user or log text (`"east"`, `"ne"`, `"NORTH"`).
    pub fn parse(text: &str) -> Result<Self, UnknownDirection> {
        text.trim()
            .parse()
            .map_err(|_| UnknownDirection(text.trim().to_string()))
    }
}

/// Error returned when a direction name cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0}")]
pub struct UnknownDirection(pub String);
