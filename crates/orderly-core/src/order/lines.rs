//! Grouping of positioned fragments into logical lines.

use std::collections::HashMap;

use crate::models::order::{LogicalLine, PageItem};

/// Hashable key for an exact vertical position.
///
/// `0.0` and `-0.0` describe the same position and share a key.
fn position_key(y: f32) -> u32 {
    if y == 0.0 { 0.0f32.to_bits() } else { y.to_bits() }
}

/// Group text fragments into lines by exact vertical position.
///
/// Fragments keep their encounter order within a line; lines are returned
/// top of page first. Marked-content items are skipped.
pub fn assemble_lines(items: &[PageItem]) -> Vec<LogicalLine> {
    let mut index: HashMap<u32, usize> = HashMap::new();
    let mut lines: Vec<LogicalLine> = Vec::new();

    for fragment in items.iter().filter_map(PageItem::as_text) {
        let slot = *index.entry(position_key(fragment.y)).or_insert_with(|| {
            lines.push(LogicalLine {
                y: fragment.y,
                fragments: Vec::new(),
            });
            lines.len() - 1
        });
        lines[slot].fragments.push(fragment.text.clone());
    }

    lines.sort_by(|a, b| b.y.total_cmp(&a.y));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::TextFragment;
    use pretty_assertions::assert_eq;

    fn text(s: &str, y: f32) -> PageItem {
        PageItem::Text(TextFragment::new(s, y))
    }

    fn strings(lines: &[LogicalLine]) -> Vec<Vec<&str>> {
        lines
            .iter()
            .map(|l| l.fragments.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_one_line_per_distinct_position_sorted_descending() {
        let items = vec![
            text("c", 100.0),
            text("a", 300.0),
            text("b", 200.0),
            text("d", 50.5),
        ];
        let lines = assemble_lines(&items);
        assert_eq!(lines.len(), 4);
        assert!(lines.windows(2).all(|w| w[0].y > w[1].y));
        assert_eq!(strings(&lines), vec![vec!["a"], vec!["b"], vec!["c"], vec!["d"]]);
    }

    #[test]
    fn test_fragment_order_is_insertion_order() {
        let items = vec![
            text("1", 400.0),
            text("5 lb", 400.0),
            text("x", 380.0),
            text("ea", 400.0),
            text("whole milk", 400.0),
        ];
        let lines = assemble_lines(&items);
        assert_eq!(strings(&lines), vec![vec!["1", "5 lb", "ea", "whole milk"], vec!["x"]]);
    }

    #[test]
    fn test_near_positions_are_distinct_lines() {
        let items = vec![text("a", 100.0), text("b", 100.25)];
        let lines = assemble_lines(&items);
        assert_eq!(strings(&lines), vec![vec!["b"], vec!["a"]]);
    }

    #[test]
    fn test_marked_content_is_skipped() {
        let items = vec![
            PageItem::MarkedContent,
            text("a", 10.0),
            PageItem::MarkedContent,
            text("b", 10.0),
        ];
        assert_eq!(strings(&assemble_lines(&items)), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_signed_zero_shares_a_line() {
        let items = vec![text("a", 0.0), text("b", -0.0)];
        assert_eq!(assemble_lines(&items).len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(assemble_lines(&[]).is_empty());
    }
}
