//! Term list - one row per cancer term with its checkbox and details count

use crate::action::Action;
use crate::component::Component;
use crate::components::hex_color;
use crate::model::{CancerLegend, DetailsDialogueGroup, Focus, Legend};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub struct TermListComponent {
    pub list_state: ListState,
}

impl Default for TermListComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl TermListComponent {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    pub fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = (self.selected() + 1) % len;
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = if self.selected() == 0 {
            len - 1
        } else {
            self.selected() - 1
        };
        self.list_state.select(Some(i));
    }

    /// Keep the selection inside a list that shrank
    pub fn clamp(&mut self, len: usize) {
        if self.selected() >= len {
            self.list_state.select(Some(len.saturating_sub(1)));
        }
    }

    pub fn draw_with_terms(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        groups: &[DetailsDialogueGroup],
        legend: &CancerLegend,
        focused: bool,
    ) -> Result<()> {
        let items: Vec<ListItem> = groups
            .iter()
            .map(|group| {
                let affected = group.is_affected();
                let checkbox = match (group.is_selectable(), affected) {
                    (false, _) => "   ",
                    (true, true) => "[x]",
                    (true, false) => "[ ]",
                };
                let swatch = match legend.legend().object_color(group.term_id()) {
                    Some(color) if affected => {
                        Span::styled("■ ", Style::default().fg(hex_color(color)))
                    }
                    _ => Span::raw("  "),
                };
                let label_style = if affected {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let mut spans = vec![
                    Span::styled(format!("{} ", checkbox), Style::default().fg(Color::Cyan)),
                    swatch,
                    Span::styled(legend.resolve_label(group.term_id()), label_style),
                ];
                let details = group.dialogues().len();
                if details > 0 {
                    spans.push(Span::styled(
                        format!(" ({})", details),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                if group.affordances().add_details {
                    spans.push(Span::styled(" +", Style::default().fg(Color::Green)));
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
                    .title(format!(" {} ", Focus::Terms.name())),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
        Ok(())
    }
}

impl Component for TermListComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextTerm),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevTerm),
            KeyCode::Char(' ') => Some(Action::ToggleStatus),
            KeyCode::Char('a') => Some(Action::AddDialogue),
            KeyCode::Char('c') => Some(Action::ClearDetails),
            KeyCode::Char('D') => Some(Action::DeleteTerm),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                Some(Action::FocusPanel(Focus::Dialogue))
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawn through draw_with_terms, which needs the groups
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut list = TermListComponent::new();
        list.previous(3);
        assert_eq!(list.selected(), 2);
        list.next(3);
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn test_clamp_after_removal() {
        let mut list = TermListComponent::new();
        list.list_state.select(Some(4));
        list.clamp(3);
        assert_eq!(list.selected(), 2);
        list.clamp(0);
        assert_eq!(list.selected(), 0);
    }
}
