use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Placeholder shown in table cells where a left join produced no row.
pub(crate) const EMPTY_CELL: &str = "-";

/// Substitute the placeholder for a missing or blank cell value.
pub(crate) fn cell_or_dash(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_missing_cells_become_the_placeholder() {
        assert_eq!(cell_or_dash(None), EMPTY_CELL);
        assert_eq!(cell_or_dash(Some("  ")), EMPTY_CELL);
        assert_eq!(cell_or_dash(Some("CS101")), "CS101");
    }
}
