//! Dialogue panel - renders and edits the details dialogues of one term

use crate::action::Action;
use crate::component::Component;
use crate::model::qualifier::QualifierField;
use crate::model::{DetailsDialogue, DetailsDialogueGroup, Focus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Dialogue being edited: the focused one, else the first
pub fn current_dialogue(group: &DetailsDialogueGroup) -> Option<&DetailsDialogue> {
    group
        .focused_dialogue_id()
        .and_then(|id| group.dialogue(id))
        .or_else(|| group.dialogues().first())
}

#[derive(Default)]
pub struct DialoguePanel {
    /// Focused field takes free text, so plain keys are typed rather than bound
    pub text_mode: bool,
}

impl Component for DialoguePanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::FocusPanel(Focus::Terms)),
            KeyCode::Down | KeyCode::Enter if self.text_mode => Some(Action::NextField),
            KeyCode::Up => Some(Action::PrevField),
            KeyCode::Down => Some(Action::NextField),
            KeyCode::Right => Some(Action::NextChoice),
            KeyCode::Left => Some(Action::PrevChoice),
            KeyCode::Backspace if self.text_mode => Some(Action::TextBackspace),
            KeyCode::Char(c) if self.text_mode => Some(Action::TextInput(c)),
            KeyCode::Char('j') => Some(Action::NextField),
            KeyCode::Char('k') => Some(Action::PrevField),
            KeyCode::Char('l') => Some(Action::NextChoice),
            KeyCode::Char('h') => Some(Action::PrevChoice),
            KeyCode::Char(']') => Some(Action::NextDialogue),
            KeyCode::Char('[') => Some(Action::PrevDialogue),
            KeyCode::Char('x') => Some(Action::DeleteDialogue),
            KeyCode::Char('a') => Some(Action::AddDialogue),
            KeyCode::Char('z') | KeyCode::Enter => Some(Action::ToggleCollapse),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawn through draw_with_group, which needs the term
        Ok(())
    }
}

impl DialoguePanel {
    pub fn draw_with_group(
        &self,
        frame: &mut Frame,
        area: Rect,
        group: Option<&DetailsDialogueGroup>,
        title: &str,
        focused: bool,
    ) -> Result<()> {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {}: {} ", Focus::Dialogue.name(), title));

        let lines = match group {
            Some(group) if !group.dialogues().is_empty() => {
                let current = current_dialogue(group).map(DetailsDialogue::id);
                let mut lines = Vec::new();
                for dialogue in group.dialogues() {
                    let is_current = Some(dialogue.id()) == current;
                    dialogue_lines(&mut lines, dialogue, is_current, focused && is_current);
                }
                lines
            }
            Some(group) => empty_hint(group),
            None => vec![Line::from(Span::styled(
                "No term selected",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        Ok(())
    }
}

fn empty_hint(group: &DetailsDialogueGroup) -> Vec<Line<'static>> {
    let hint = if group.affordances().add_details {
        "No details yet. Press 'a' to add."
    } else if group.is_deleted() {
        "Term deleted."
    } else {
        "Mark the term as affected (Space) to add details."
    };
    vec![Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    ))]
}

fn dialogue_lines(
    lines: &mut Vec<Line<'static>>,
    dialogue: &DetailsDialogue,
    is_current: bool,
    editing: bool,
) {
    let header_style = if is_current {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut header = vec![Span::styled(format!("── {} ", dialogue.id()), header_style)];
    if dialogue.has_delete_action() {
        header.push(Span::styled("[x] Delete", Style::default().fg(Color::Red)));
    }
    lines.push(Line::from(header));

    for (index, field) in dialogue.fields().iter().enumerate() {
        let active = editing && index == dialogue.focused_field_index();
        field_lines(lines, field, active);
    }
    lines.push(Line::from(""));
}

fn field_lines(lines: &mut Vec<Line<'static>>, field: &QualifierField, active: bool) {
    let marker = if active { "› " } else { "  " };
    let label_style = if active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let element = field.element();

    if field.is_inline() {
        let arrows = if active { ("◂ ", " ▸") } else { ("", "") };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{}: ", field.label()), label_style),
            Span::raw(arrows.0),
            Span::styled(element.display_value(), Style::default().fg(Color::Green)),
            Span::raw(arrows.1),
        ]));
        return;
    }

    let mut label = vec![Span::raw(marker)];
    if field.is_collapsible() {
        let toggle = if field.is_collapsed() { "▸ " } else { "▾ " };
        label.push(Span::styled(toggle, Style::default().fg(Color::DarkGray)));
    }
    label.push(Span::styled(field.label().to_string(), label_style));
    if let Some(caption) = field.caption() {
        let caption_style = if field.caption_is_selection() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        label.push(Span::styled(format!(" ({})", caption), caption_style));
    }
    lines.push(Line::from(label));

    if field.is_collapsed() {
        return;
    }
    match element.choices() {
        Some((choices, selected)) => {
            for (i, choice) in choices.iter().enumerate() {
                let mark = if Some(i) == selected { "(•)" } else { "( )" };
                lines.push(Line::from(format!("      {} {}", mark, choice.label)));
            }
        }
        None => {
            let cursor = if active && element.accepts_text() { "_" } else { "" };
            for line in format!("{}{}", element.display_value(), cursor).split('\n') {
                lines.push(Line::from(Span::styled(
                    format!("      {}", line),
                    Style::default().fg(Color::Green),
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letters_are_typed_in_text_mode() {
        let mut panel = DialoguePanel { text_mode: true };
        assert_eq!(
            panel.handle_key_event(key(KeyCode::Char('x'))).unwrap(),
            Some(Action::TextInput('x'))
        );
        assert_eq!(
            panel.handle_key_event(key(KeyCode::Backspace)).unwrap(),
            Some(Action::TextBackspace)
        );
        assert_eq!(
            panel.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::NextField)
        );
    }

    #[test]
    fn test_letters_are_bindings_otherwise() {
        let mut panel = DialoguePanel::default();
        assert_eq!(
            panel.handle_key_event(key(KeyCode::Char('x'))).unwrap(),
            Some(Action::DeleteDialogue)
        );
        assert_eq!(
            panel.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::FocusPanel(Focus::Terms))
        );
    }
}
