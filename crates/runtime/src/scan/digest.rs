//! Scan digestion: raw sensor output to [`ScanSummary`].
//!
//! Malformed input is never an error here. A table missing a required row
//! label, or with a short row, digests to `None` ("no summary") and the
//! caller treats it like missing data.

use nav_core::{
    BlockClass, Direction, LAYER_MAX, LAYER_MIN, SCAN_RANGE, ScanColumn, ScanSummary,
    classify_column,
};

use super::source::{BlockSample, ScanObservation};

/// Required row labels of the textual table, top layer first.
const ROW_LABELS: [(&str, i8); 6] = [
    ("+2:", 2),
    ("+1:", 1),
    ("0:", 0),
    ("-1:", -1),
    ("-2:", -2),
    ("-3:", -3),
];

/// Lines inspected after a scan header when re-parsing the rolling log.
/// Generous enough for interleaved status lines between table rows.
const LOG_WINDOW: usize = 12;

/// Digest one observation into a summary for the given direction.
///
/// Returns `None` when the observation does not contain a well-formed
/// table (all six labeled rows with at least five cells each). Structured
/// records cannot be malformed — absent entries just leave their layers
/// unsampled.
pub fn digest(observation: &ScanObservation, direction: Direction) -> Option<ScanSummary> {
    let columns = match observation {
        ScanObservation::Table(text) => parse_table(text.lines())?,
        ScanObservation::Records(records) => columns_from_records(records),
    };

    Some(summarize(direction, columns))
}

/// Search a rolling log backwards for the most recent digestible scan.
///
/// A scan lands in the log as a `scan <direction>:` header followed by the
/// six labeled rows within a bounded window. With `direction` given, only
/// headers for that direction match; otherwise the most recent valid scan
/// of any direction wins. Returns `None` when nothing valid is found in
/// the searched history.
pub fn digest_from_log(lines: &[String], direction: Option<Direction>) -> Option<ScanSummary> {
    for (index, line) in lines.iter().enumerate().rev() {
        let Some(header_direction) = parse_scan_header(line) else {
            continue;
        };
        if let Some(wanted) = direction
            && header_direction != wanted
        {
            continue;
        }

        let mut window_end = lines.len().min(index + 1 + LOG_WINDOW);
        // A later scan header ends this scan's window; its rows must not
        // bleed into the older table.
        if let Some(next_header) = lines[index + 1..window_end]
            .iter()
            .position(|line| parse_scan_header(line).is_some())
        {
            window_end = index + 1 + next_header;
        }
        let window = &lines[index + 1..window_end];
        if let Some(columns) = parse_table(window.iter().map(String::as_str)) {
            return Some(summarize(header_direction, columns));
        }
        // A header without a complete table beneath it is skipped; an
        // older scan further back may still be valid.
    }

    None
}

/// Parse a `scan <direction>:` header line.
fn parse_scan_header(line: &str) -> Option<Direction> {
    let rest = line.trim().strip_prefix("scan ")?;
    let name = rest.strip_suffix(':')?;
    Direction::parse(name).ok()
}

/// Extract the five scan columns from labeled table rows.
///
/// Rows may appear in any order and be interleaved with unrelated lines.
/// Fails when any required label is missing or any labeled row has fewer
/// than five cells.
fn parse_table<'a>(lines: impl Iterator<Item = &'a str>) -> Option<[ScanColumn; SCAN_RANGE]> {
    let mut columns = [ScanColumn::EMPTY; SCAN_RANGE];
    let mut seen = [false; ROW_LABELS.len()];

    for line in lines {
        let trimmed = line.trim();
        for (row, (label, offset)) in ROW_LABELS.iter().enumerate() {
            let Some(cells) = trimmed.strip_prefix(label) else {
                continue;
            };

            let mut cells = cells.split_whitespace();
            for column in columns.iter_mut() {
                let cell = cells.next()?;
                column.set_layer(*offset, BlockClass::from_label(cell));
            }
            seen[row] = true;
            break;
        }
    }

    seen.iter().all(|present| *present).then_some(columns)
}

/// Index structured records into columns by (distance, layer).
fn columns_from_records(records: &[BlockSample]) -> [ScanColumn; SCAN_RANGE] {
    let mut columns = [ScanColumn::EMPTY; SCAN_RANGE];

    for record in records {
        let distance = record.distance as usize;
        if !(1..=SCAN_RANGE).contains(&distance) {
            continue;
        }
        if !(LAYER_MIN..=LAYER_MAX).contains(&record.layer) {
            continue;
        }
        columns[distance - 1].set_layer(record.layer, BlockClass::from_label(&record.label));
    }

    columns
}

fn summarize(direction: Direction, columns: [ScanColumn; SCAN_RANGE]) -> ScanSummary {
    let steps = columns.map(|column| classify_column(&column));
    ScanSummary::from_steps(direction, steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAT_TABLE: &str = "\
+2: Air Air Air Air Air
+1: Air Air Air Air Air
0: Air Air Air Air Air
-1: Stone Stone Stone Stone Stone
-2: Stone Stone Stone Stone Stone
-3: Stone Stone Stone Stone Stone";

    #[test]
    fn well_formed_table_always_digests() {
        let observation = ScanObservation::Table(FLAT_TABLE.to_string());
        let summary = digest(&observation, Direction::East).unwrap();
        assert_eq!(summary.direction, Direction::East);
        assert_eq!(summary.safe_len, 5);
    }

    #[test]
    fn missing_row_label_gives_no_summary() {
        let truncated: String = FLAT_TABLE
            .lines()
            .filter(|line| !line.starts_with("-3:"))
            .collect::<Vec<_>>()
            .join("\n");
        let observation = ScanObservation::Table(truncated);
        assert_eq!(digest(&observation, Direction::East), None);
    }

    #[test]
    fn short_row_gives_no_summary() {
        let short = FLAT_TABLE.replace(
            "0: Air Air Air Air Air",
            "0: Air Air Air",
        );
        let observation = ScanObservation::Table(short);
        assert_eq!(digest(&observation, Direction::East), None);
    }

    #[test]
    fn water_at_column_three_cuts_prefix() {
        let table = FLAT_TABLE.replace(
            "0: Air Air Air Air Air",
            "0: Air Air Water Air Air",
        );
        let observation = ScanObservation::Table(table);
        let summary = digest(&observation, Direction::East).unwrap();
        assert_eq!(summary.water_at, Some(3));
        assert_eq!(summary.safe_len, 2);
    }

    #[test]
    fn extra_cells_beyond_range_are_ignored() {
        let wide = FLAT_TABLE.replace(
            "0: Air Air Air Air Air",
            "0: Air Air Air Air Air Air Air",
        );
        let observation = ScanObservation::Table(wide);
        let summary = digest(&observation, Direction::East).unwrap();
        assert_eq!(summary.safe_len, 5);
    }

    #[test]
    fn records_digest_like_the_equivalent_table() {
        let mut records = Vec::new();
        for distance in 1..=5u8 {
            for layer in [2, 1, 0] {
                records.push(BlockSample::new(distance, layer, "Air"));
            }
            for layer in [-1, -2, -3] {
                records.push(BlockSample::new(distance, layer, "Stone"));
            }
        }
        let summary = digest(&ScanObservation::Records(records), Direction::North).unwrap();
        assert_eq!(summary.safe_len, 5);
    }

    #[test]
    fn absent_records_leave_columns_unenterable() {
        // Only column 1 sampled; the rest classify with no candidate.
        let records = vec![
            BlockSample::new(1, 1, "Air"),
            BlockSample::new(1, 0, "Air"),
            BlockSample::new(1, -1, "Stone"),
        ];
        let summary = digest(&ScanObservation::Records(records), Direction::South).unwrap();
        assert_eq!(summary.safe_len, 1);
        assert!(!summary.steps[1].enterable());
    }

    #[test]
    fn out_of_range_records_are_dropped() {
        let records = vec![
            BlockSample::new(0, 0, "Lava"),
            BlockSample::new(6, 0, "Lava"),
            BlockSample::new(3, 3, "Lava"),
            BlockSample::new(3, -4, "Lava"),
        ];
        let summary = digest(&ScanObservation::Records(records), Direction::West).unwrap();
        assert_eq!(summary.hazard_at, None);
    }

    #[test]
    fn log_search_finds_most_recent_matching_scan() {
        let mut lines: Vec<String> = Vec::new();
        lines.push("scan east:".into());
        for row in FLAT_TABLE.replace("0: Air Air Air Air Air", "0: Air Water Air Air Air").lines() {
            lines.push(row.into());
        }
        lines.push("move east".into());
        lines.push("scan east:".into());
        for row in FLAT_TABLE.lines() {
            lines.push(row.into());
        }

        // The later scan wins over the earlier watery one.
        let summary = digest_from_log(&lines, Some(Direction::East)).unwrap();
        assert_eq!(summary.safe_len, 5);
        assert_eq!(summary.water_at, None);
    }

    #[test]
    fn log_search_respects_requested_direction() {
        let mut lines: Vec<String> = vec!["scan north:".into()];
        for row in FLAT_TABLE.lines() {
            lines.push(row.into());
        }

        assert!(digest_from_log(&lines, Some(Direction::East)).is_none());
        let summary = digest_from_log(&lines, None).unwrap();
        assert_eq!(summary.direction, Direction::North);
    }

    #[test]
    fn header_without_table_is_skipped_for_older_scans() {
        let mut lines: Vec<String> = vec!["scan east:".into()];
        for row in FLAT_TABLE.lines() {
            lines.push(row.into());
        }
        // A fresher header whose table never materialised.
        lines.push("scan east:".into());
        lines.push("connection lost".into());

        let summary = digest_from_log(&lines, Some(Direction::East)).unwrap();
        assert_eq!(summary.safe_len, 5);
    }

    #[test]
    fn adjacent_scans_do_not_bleed_into_each_other() {
        // An east scan immediately followed by a watery north scan: the
        // north rows sit inside the east window but must not clobber it.
        let mut lines: Vec<String> = vec!["scan east:".into()];
        for row in FLAT_TABLE.lines() {
            lines.push(row.into());
        }
        lines.push("scan north:".into());
        for row in FLAT_TABLE
            .replace("0: Air Air Air Air Air", "0: Water Water Water Water Water")
            .lines()
        {
            lines.push(row.into());
        }

        let east = digest_from_log(&lines, Some(Direction::East)).unwrap();
        assert_eq!(east.safe_len, 5);
        assert_eq!(east.water_at, None);
    }

    #[test]
    fn empty_log_yields_nothing() {
        assert!(digest_from_log(&[], None).is_none());
    }
}
