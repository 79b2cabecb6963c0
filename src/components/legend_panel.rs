//! Legend panel - cancer colors with case counts, and the patient's genes

use crate::action::Action;
use crate::component::Component;
use crate::components::hex_color;
use crate::model::{Focus, Gene};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// One cancer entry of the legend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendRow {
    pub id: String,
    pub label: String,
    /// `None` until the cancer is first used
    pub color: Option<String>,
    pub cases: usize,
}

pub struct LegendPanel {
    pub list_state: ListState,
}

impl Default for LegendPanel {
    fn default() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }
}

impl LegendPanel {
    pub fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    pub fn next(&mut self, len: usize) {
        if self.selected() + 1 < len {
            self.list_state.select(Some(self.selected() + 1));
        }
    }

    pub fn previous(&mut self) {
        self.list_state
            .select(Some(self.selected().saturating_sub(1)));
    }

    pub fn draw_with_legend(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        rows: &[LegendRow],
        genes: &[Gene],
        focused: bool,
    ) -> Result<()> {
        let gene_height = (genes.len() as u16).clamp(1, 8) + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(gene_height)])
            .split(area);

        // Inside the borders, after the swatch
        let row_width = chunks[0].width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let swatch = match &row.color {
                    Some(color) => Span::styled("■ ", Style::default().fg(hex_color(color))),
                    None => Span::styled("□ ", Style::default().fg(Color::DarkGray)),
                };
                let mut spans = vec![
                    swatch,
                    Span::raw(row.label.clone()),
                ];
                if row.cases > 0 {
                    let count = format!("×{}", row.cases);
                    let padding = row_width.saturating_sub(row.label.width() + count.width()).max(1);
                    spans.push(Span::raw(" ".repeat(padding)));
                    spans.push(Span::styled(count, Style::default().fg(Color::Yellow)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color))
                    .title(format!(" {} ", title)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let gene_lines: Vec<Line> = if genes.is_empty() {
            vec![Line::from(Span::styled(
                "No genes. Press 'g' to add one.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            genes.iter().map(gene_line).collect()
        };
        let paragraph = Paragraph::new(gene_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Genes "),
        );
        frame.render_widget(paragraph, chunks[1]);
        Ok(())
    }
}

fn gene_line(gene: &Gene) -> Line<'static> {
    let state = if gene.is_loading() {
        Span::styled("… ", Style::default().fg(Color::Yellow))
    } else if gene.is_resolved() {
        Span::styled("✓ ", Style::default().fg(Color::Green))
    } else {
        Span::styled("? ", Style::default().fg(Color::DarkGray))
    };
    let mut spans = vec![
        state,
        Span::styled(
            gene.symbol().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if gene.id() != gene.symbol() {
        spans.push(Span::styled(
            format!("  {}", gene.id()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

impl Component for LegendPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextLegendItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevLegendItem),
            KeyCode::Enter | KeyCode::Char('d') => Some(Action::DropOnSubject),
            KeyCode::Char('u') => Some(Action::RefreshGenes),
            KeyCode::Esc => Some(Action::FocusPanel(Focus::Terms)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawn through draw_with_legend, which needs legend rows and genes
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_stops_at_ends() {
        let mut panel = LegendPanel::default();
        panel.previous();
        assert_eq!(panel.selected(), 0);
        panel.next(2);
        panel.next(2);
        assert_eq!(panel.selected(), 1);
    }
}
