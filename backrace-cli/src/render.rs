//! Console board rendering
//!
//! Points 13-24 run left to right along the top with Black's bar (25) at the
//! end; points 12-1 run along the bottom with White's bar (0) at the end.

use backrace_core::{BoardSnapshot, Colour, Location, BLACK_BAR, WHITE_BAR};

const TOP_LABELS: &str = "  13                  18   19                  24   25";
const BOTTOM_LABELS: &str = "  12                  7    6                   1    0";
const RULE: &str = "---------------------------------------------------";
const SPACER: &str = "|                        |                        |";

/// Render a snapshot as the multi-line console board
pub fn render_board(snapshot: &BoardSnapshot) -> String {
    let mut lines = Vec::with_capacity(9);
    lines.push(TOP_LABELS.to_string());
    lines.push(RULE.to_string());
    lines.push(half_row(snapshot, 13..=18, 19..=24, BLACK_BAR));
    for _ in 0..3 {
        lines.push(SPACER.to_string());
    }
    lines.push(half_row(snapshot, (7..=12).rev(), (1..=6).rev(), WHITE_BAR));
    lines.push(RULE.to_string());
    lines.push(BOTTOM_LABELS.to_string());
    lines.join("\n")
}

fn half_row(
    snapshot: &BoardSnapshot,
    outer: impl Iterator<Item = Location>,
    inner: impl Iterator<Item = Location>,
    bar: Location,
) -> String {
    let mut line = String::from("|");
    line.extend(outer.map(|loc| cell(snapshot, loc)));
    line.push('|');
    line.extend(inner.map(|loc| cell(snapshot, loc)));
    line.push('|');
    line.push_str(&cell(snapshot, bar));
    line
}

fn cell(snapshot: &BoardSnapshot, location: Location) -> String {
    match snapshot.get(location) {
        Some(point) => {
            let tag = match point.colour {
                Colour::White => 'W',
                Colour::Black => 'B',
            };
            format!(" {}{} ", point.count, tag)
        }
        None => " .  ".to_string(),
    }
}
