//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;

/// Main screen layout areas
pub struct MainLayout {
    pub terms: Rect,
    pub dialogue: Rect,
    pub legend: Rect,
    pub events: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = (area.width.saturating_sub(width)) / 2;
    let popup_y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    // Vertical: panels + event log + (optional status) + help bar
    let mut constraints = vec![Constraint::Min(0), Constraint::Length(7)];
    if has_status {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(3));

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    // Terms (30%) | dialogue (40%) | legend (30%)
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(main_chunks[0]);

    let (status, help) = if has_status {
        (Some(main_chunks[2]), main_chunks[3])
    } else {
        (None, main_chunks[2])
    };

    MainLayout {
        terms: panels[0],
        dialogue: panels[1],
        legend: panels[2],
        events: main_chunks[1],
        status,
        help,
    }
}

/// Parse a `#rrggbb` legend color; anything else renders gray
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return Color::Gray;
    }
    match u32::from_str_radix(digits, 16) {
        Ok(rgb) => Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        Err(_) => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#008080"), Color::Rgb(0, 128, 128));
        assert_eq!(hex_color("#F5DEB3"), Color::Rgb(245, 222, 179));
        assert_eq!(hex_color("teal"), Color::Gray);
    }

    #[test]
    fn test_status_line_only_when_requested() {
        let area = Rect::new(0, 0, 120, 40);
        assert!(calculate_main_layout(area, false).status.is_none());
        let layout = calculate_main_layout(area, true);
        assert_eq!(layout.status.map(|r| r.height), Some(1));
        assert_eq!(layout.help.height, 3);
    }
}
