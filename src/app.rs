//! Root application component
//!
//! The App owns the details model (one dialogue group per cancer term, the
//! cancer legend, the genes) and coordinates the panels that show it. It
//! drains widget notifications on every tick and keeps the subject's cancer
//! cases in the legend in step with the term checkboxes.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, current_dialogue, DialoguePanel, GeneDialog, HelpDialog, LegendPanel,
    LegendRow, MessageDialog, QuitDialog, TermListComponent,
};
use crate::config::Config;
use crate::error::QualifierError;
use crate::model::cancer_legend::{TermNameService, SUPPORTED_CANCERS};
use crate::model::gene::Completion;
use crate::model::modal::{Modal, ModalStack};
use crate::model::qualifier::QualifierField;
use crate::model::{
    CancerLegend, CancerStatusMap, DetailsDialogue, DetailsDialogueGroup, FieldOptions, Focus,
    Gene, GeneEntry, GeneNameService, GroupOptions, Legend, Notification, Notifier, NumericRange,
    PatientRecord, TermRecord,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

/// Data name of the cancer groups, prefix of their notifications
const DATA_NAME: &str = "cancers";

/// Notifications kept for the event panel
const EVENT_LOG_SIZE: usize = 5;

// ═══════════════════════════════════════════════════════════════════════════════
// Cancer Terms
// ═══════════════════════════════════════════════════════════════════════════════

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A cancer term with its qualifier schema
///
/// Terms outside the supported list may be deleted; supported ones stay.
fn cancer_group(
    id: &str,
    label: &str,
    deletable: bool,
    notifier: Notifier,
) -> Result<DetailsDialogueGroup, QualifierError> {
    let options = GroupOptions {
        allow_multi_dialogues: false,
        disable_term_delete: !deletable,
    };
    let mut group = DetailsDialogueGroup::new(DATA_NAME, options, notifier);
    group
        .with_label(label, Some(id), true)
        .dialogues_add_numeric_select(
            NumericRange::new(1, 100, 10)?,
            FieldOptions::new("ageAtDiagnosis", "Age at diagnosis"),
        )
        .dialogues_add_radio_list(
            strings(&["Primary", "Metastasized"]),
            FieldOptions::new("primary", "Type").collapsible(true),
        )
        .dialogues_add_item_select(
            strings(&["", "Left", "Right", "Bilateral", "Unknown"]),
            FieldOptions::new("laterality", "Laterality"),
        )
        .dialogues_add_text_box(FieldOptions::new("notes", "Notes"))
        .dialogues_add_delete_action(None);
    Ok(group)
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    pub config: Config,

    /// Panel receiving navigation keys
    pub focus: Focus,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Most recent notifications, oldest first
    pub events: VecDeque<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Details Model
    // ─────────────────────────────────────────────────────────────────────────
    pub groups: Vec<DetailsDialogueGroup>,
    pub legend: CancerLegend,
    /// Cancer statuses of the subject, as last stored on the pedigree node
    pub subject_cancers: CancerStatusMap,
    pub genes: Vec<Gene>,
    gene_service: Arc<dyn GeneNameService>,
    notifier: Notifier,
    notifications: Receiver<Notification>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub term_list: TermListComponent,
    pub dialogue_panel: DialoguePanel,
    pub legend_panel: LegendPanel,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub gene_dialog: GeneDialog,
    pub message_dialog: MessageDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(
        config: Config,
        gene_service: Arc<dyn GeneNameService>,
        term_service: Arc<dyn TermNameService>,
    ) -> Result<App> {
        let (notifier, notifications) = Notifier::channel();

        let groups = SUPPORTED_CANCERS
            .iter()
            .map(|(id, _, name)| cancer_group(id, name, false, notifier.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(App {
            config,
            focus: Focus::Terms,
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            events: VecDeque::with_capacity(EVENT_LOG_SIZE),
            groups,
            legend: CancerLegend::new(notifier.clone()).with_term_service(term_service),
            subject_cancers: CancerStatusMap::new(),
            genes: Vec::new(),
            gene_service,
            notifier,
            notifications,
            term_list: TermListComponent::new(),
            dialogue_panel: DialoguePanel::default(),
            legend_panel: LegendPanel::default(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            gene_dialog: GeneDialog,
            message_dialog: MessageDialog,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn selected_group(&self) -> Option<&DetailsDialogueGroup> {
        self.groups.get(self.term_list.selected())
    }

    fn selected_group_mut(&mut self) -> Option<&mut DetailsDialogueGroup> {
        let index = self.term_list.selected();
        self.groups.get_mut(index)
    }

    fn current_dialogue_id(&self) -> Option<String> {
        self.selected_group()
            .and_then(current_dialogue)
            .map(|d| d.id().to_string())
    }

    fn focused_field_accepts_text(&self) -> bool {
        self.selected_group()
            .and_then(current_dialogue)
            .and_then(|d| d.fields().get(d.focused_field_index()))
            .is_some_and(|f| f.element().accepts_text() && !f.is_collapsed())
    }

    fn edit_current_dialogue(&mut self, edit: impl FnOnce(&mut DetailsDialogue)) {
        let Some(id) = self.current_dialogue_id() else {
            return;
        };
        if let Some(dialogue) = self.selected_group_mut().and_then(|g| g.dialogue_mut(&id)) {
            edit(dialogue);
        }
    }

    fn edit_current_field(&mut self, edit: impl FnOnce(&mut QualifierField)) {
        self.edit_current_dialogue(|dialogue| {
            if let Some(field) = dialogue.focused_field_mut() {
                edit(field);
            }
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────────────────

    fn set_focus(&mut self, focus: Focus) {
        if self.focus == focus {
            return;
        }
        if self.focus == Focus::Dialogue {
            if let Some(group) = self.selected_group_mut() {
                group.blur();
            }
        }
        if focus == Focus::Dialogue {
            if let Some(id) = self.current_dialogue_id() {
                if let Some(group) = self.selected_group_mut() {
                    group.focus_dialogue(&id);
                }
            }
        }
        self.focus = focus;
    }

    fn cycle_dialogue(&mut self, forward: bool) {
        let Some(current) = self.current_dialogue_id() else {
            return;
        };
        let Some(group) = self.selected_group_mut() else {
            return;
        };
        let ids: Vec<String> = group.dialogues().iter().map(|d| d.id().to_string()).collect();
        let Some(pos) = ids.iter().position(|id| *id == current) else {
            return;
        };
        let next = if forward {
            (pos + 1) % ids.len()
        } else {
            (pos + ids.len() - 1) % ids.len()
        };
        if next != pos {
            group.focus_dialogue(&ids[next]);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Terms and Subject
    // ─────────────────────────────────────────────────────────────────────────

    /// Mirror the term checkboxes into the legend cases and the subject
    fn sync_subject(&mut self) {
        let subject_id = self.config.subject_id;
        for group in &self.groups {
            let id = group.term_id();
            if group.is_affected() {
                self.legend.register_case(id, group.label(), subject_id);
                self.subject_cancers
                    .entry(id.to_string())
                    .or_default()
                    .affected = true;
            } else {
                self.legend.remove_case(id, subject_id);
                if let Some(status) = self.subject_cancers.get_mut(id) {
                    status.affected = false;
                }
            }
        }
    }

    fn toggle_status(&mut self) {
        if let Some(group) = self.selected_group_mut() {
            let checked = !group.is_affected();
            group.toggle_status(checked);
        }
        self.sync_subject();
    }

    fn add_dialogue(&mut self) {
        let added = self
            .selected_group_mut()
            .and_then(|g| g.add_dialogue(false))
            .is_some();
        if added {
            // The new dialogue is already focused by its group
            self.focus = Focus::Dialogue;
        } else if let Some(group) = self.selected_group() {
            self.status_message = Some(format!(
                "Cannot add details to {}",
                self.legend.resolve_label(group.term_id())
            ));
        }
    }

    fn delete_dialogue(&mut self) {
        let Some(id) = self.current_dialogue_id() else {
            return;
        };
        let deleted = self
            .selected_group_mut()
            .is_some_and(|g| g.delete_dialogue(&id));
        if !deleted {
            self.status_message = Some("This dialogue cannot be deleted".to_string());
        }
    }

    fn delete_term(&mut self) {
        let index = self.term_list.selected();
        let Some(group) = self.groups.get_mut(index) else {
            return;
        };
        match group.delete_term() {
            Some(id) => {
                self.groups.remove(index);
                self.legend.remove_case(&id, self.config.subject_id);
                self.subject_cancers.remove(&id);
                self.term_list.clamp(self.groups.len());
                self.set_focus(Focus::Terms);
                self.status_message = Some(format!("Deleted {}", id));
            }
            None => {
                self.status_message = Some("Supported cancers cannot be deleted".to_string());
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Legend
    // ─────────────────────────────────────────────────────────────────────────

    /// Legend contents as currently stored; colors are assigned only by cases
    fn legend_rows(&self) -> Vec<LegendRow> {
        self.groups
            .iter()
            .map(|group| {
                let id = group.term_id();
                LegendRow {
                    id: id.to_string(),
                    label: self.legend.resolve_label(id),
                    color: self.legend.display_color(id),
                    cases: self.legend.legend().cases(id).len(),
                }
            })
            .collect()
    }

    fn drop_selected_cancer(&mut self) {
        let rows = self.legend_rows();
        let Some(row) = rows.get(self.legend_panel.selected()) else {
            return;
        };
        match self
            .legend
            .on_drop_object(self.config.subject_id, &self.subject_cancers, &row.id)
        {
            Ok(cancers) => {
                for group in &mut self.groups {
                    let marked = cancers
                        .get(group.term_id())
                        .is_some_and(|status| status.affected);
                    if marked && !group.is_affected() {
                        group.toggle_status(true);
                    }
                }
                self.subject_cancers = cancers;
                self.sync_subject();
                self.status_message = Some(format!("{} marked as affected", row.label));
            }
            Err(rejected) => self.modals.push(Modal::Message {
                title: rejected.title,
                text: rejected.message,
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Genes
    // ─────────────────────────────────────────────────────────────────────────

    fn make_gene(&self, id: Option<&str>, symbol: Option<&str>) -> Option<Gene> {
        let on_complete: Completion = Box::new(|gene: &Gene| {
            tracing::debug!(gene = %gene.id(), symbol = %gene.symbol(), "gene refresh settled");
        });
        match Gene::new(
            id,
            symbol,
            Arc::clone(&self.gene_service),
            self.notifier.clone(),
            Some(on_complete),
        ) {
            Ok(gene) => Some(gene),
            Err(err) => {
                tracing::warn!(error = %err, "skipping gene");
                None
            }
        }
    }

    fn add_gene(&mut self, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }
        let listed = self.genes.iter().any(|g| {
            g.id().eq_ignore_ascii_case(input) || g.symbol().eq_ignore_ascii_case(input)
        });
        if listed {
            self.status_message = Some(format!("{} is already listed", input));
            return;
        }
        if let Some(gene) = self.make_gene(Some(input), None) {
            self.status_message = Some(format!("Looking up {}...", input));
            self.genes.push(gene);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────

    fn drain_notifications(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            if let Notification::GeneLoaded {
                old_id,
                new_id,
                symbol,
            } = &notification
            {
                self.status_message =
                    Some(format!("Gene {} resolved to {} ({})", old_id, symbol, new_id));
            }
            let memo = notification.memo();
            let entry = if memo.is_null() {
                notification.name()
            } else {
                format!("{} {}", notification.name(), memo)
            };
            if self.events.len() == EVENT_LOG_SIZE {
                self.events.pop_front();
            }
            self.events.push_back(entry);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Patient Record
    // ─────────────────────────────────────────────────────────────────────────

    fn save_record(&mut self) {
        let Some(path) = self.config.data_path() else {
            self.error = Some("Could not determine the patient record path".to_string());
            return;
        };
        let cancers = self
            .groups
            .iter()
            .filter(|g| g.is_affected())
            .map(DetailsDialogueGroup::get_values)
            .collect();
        let genes = self
            .genes
            .iter()
            .map(|g| GeneEntry {
                id: g.id().to_string(),
                symbol: g.symbol().to_string(),
            })
            .collect();

        match PatientRecord::new(cancers, genes).save_to(&path) {
            Ok(()) => {
                self.error = None;
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => self.error = Some(format!("Failed to save {}: {}", path.display(), e)),
        }
    }

    fn reload_record(&mut self) {
        let Some(path) = self.config.data_path() else {
            self.error = Some("Could not determine the patient record path".to_string());
            return;
        };
        match PatientRecord::load_from(&path) {
            Ok(Some(record)) => {
                self.error = None;
                self.apply_record(&record);
                self.status_message = Some(format!(
                    "Loaded {} (saved {})",
                    path.display(),
                    record.saved_at.format("%Y-%m-%d %H:%M")
                ));
            }
            Ok(None) => {
                self.status_message = Some(format!("New patient record: {}", path.display()));
            }
            Err(e) => self.error = Some(format!("Failed to load {}: {}", path.display(), e)),
        }
    }

    fn apply_record(&mut self, record: &PatientRecord) {
        // Stored terms outside the supported list get their own group
        for stored in &record.cancers {
            if self.groups.iter().any(|g| g.term_id() == stored.id) {
                continue;
            }
            match cancer_group(&stored.id, &stored.label, true, self.notifier.clone()) {
                Ok(group) => self.groups.push(group),
                Err(err) => tracing::warn!(term = %stored.id, error = %err, "skipping stored term"),
            }
        }

        let blank = TermRecord::default();
        for group in &mut self.groups {
            let stored = record.cancer(group.term_id()).unwrap_or(&blank);
            group.set_values(Some(stored));
        }

        let genes: Vec<Gene> = record
            .genes
            .iter()
            .filter_map(|entry| self.make_gene(Some(&entry.id), Some(&entry.symbol)))
            .collect();
        self.genes = genes;

        self.focus = Focus::Terms;
        self.term_list.clamp(self.groups.len());
        self.sync_subject();
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.reload_record();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }
        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }
        if key.code == KeyCode::Tab {
            return Ok(Some(Action::FocusNextPanel));
        }

        let text_mode = self.focus == Focus::Dialogue && self.focused_field_accepts_text();
        if !text_mode {
            if let Some(action) = global_action(key.code) {
                return Ok(Some(action));
            }
        }

        match self.focus {
            Focus::Terms => self.term_list.handle_key_event(key),
            Focus::Dialogue => {
                self.dialogue_panel.text_mode = text_mode;
                self.dialogue_panel.handle_key_event(key)
            }
            Focus::Legend => self.legend_panel.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.drain_notifications();
                if self.legend.labels_pending() && self.legend.poll_labels() {
                    tracing::debug!("legend labels updated");
                }
                let mut settled = false;
                for gene in &mut self.genes {
                    settled |= gene.poll();
                }
                if settled {
                    self.drain_notifications();
                }
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Panels
            // ─────────────────────────────────────────────────────────────────
            Action::FocusNextPanel => self.set_focus(self.focus.next()),
            Action::FocusPanel(focus) => self.set_focus(focus),

            // ─────────────────────────────────────────────────────────────────
            // Terms
            // ─────────────────────────────────────────────────────────────────
            Action::NextTerm => self.term_list.next(self.groups.len()),
            Action::PrevTerm => self.term_list.previous(self.groups.len()),
            Action::ToggleStatus => self.toggle_status(),
            Action::AddDialogue => self.add_dialogue(),
            Action::ClearDetails => {
                if let Some(group) = self.selected_group_mut() {
                    group.clear_details();
                }
            }
            Action::DeleteTerm => self.delete_term(),

            // ─────────────────────────────────────────────────────────────────
            // Dialogue Editing
            // ─────────────────────────────────────────────────────────────────
            Action::NextDialogue => self.cycle_dialogue(true),
            Action::PrevDialogue => self.cycle_dialogue(false),
            Action::DeleteDialogue => self.delete_dialogue(),
            Action::NextField => self.edit_current_dialogue(DetailsDialogue::focus_next_field),
            Action::PrevField => self.edit_current_dialogue(DetailsDialogue::focus_prev_field),
            Action::NextChoice => self.edit_current_field(|f| f.element_mut().select_next()),
            Action::PrevChoice => self.edit_current_field(|f| f.element_mut().select_prev()),
            Action::ToggleCollapse => self.edit_current_field(QualifierField::toggle_collapsed),
            Action::TextInput(c) => {
                if let Some(id) = self.current_dialogue_id() {
                    if let Some(group) = self.selected_group_mut() {
                        group.input_char(&id, c);
                    }
                }
            }
            Action::TextBackspace => {
                if let Some(id) = self.current_dialogue_id() {
                    if let Some(group) = self.selected_group_mut() {
                        group.backspace(&id);
                    }
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Legend and Genes
            // ─────────────────────────────────────────────────────────────────
            Action::NextLegendItem => self.legend_panel.next(self.groups.len()),
            Action::PrevLegendItem => self.legend_panel.previous(),
            Action::DropOnSubject => self.drop_selected_cancer(),
            Action::RefreshGenes => {
                for gene in &mut self.genes {
                    gene.refresh(None);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenGeneInput => {
                self.modals.push(Modal::GeneInput {
                    input: String::new(),
                });
            }
            Action::GeneInput(c) => {
                if let Some(Modal::GeneInput { input }) = self.modals.top_mut() {
                    input.push(c);
                }
            }
            Action::GeneBackspace => {
                if let Some(Modal::GeneInput { input }) = self.modals.top_mut() {
                    input.pop();
                }
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => match self.modals.pop() {
                Some(Modal::QuitConfirm) => {
                    self.save_record();
                    self.should_quit = self.error.is_none();
                }
                Some(Modal::GeneInput { input }) => self.add_gene(&input),
                Some(_) | None => {}
            },

            // ─────────────────────────────────────────────────────────────────
            // Record
            // ─────────────────────────────────────────────────────────────────
            Action::SaveRecord => self.save_record(),
            Action::ReloadRecord => self.reload_record(),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let rows = self.legend_rows();
        let legend_title = format!(
            "{} ({} in use)",
            self.legend.legend().title(),
            self.legend.legend().object_ids().len()
        );

        let has_status = self.error.is_some() || self.status_message.is_some();
        let layout = calculate_main_layout(area, has_status);

        self.term_list.draw_with_terms(
            frame,
            layout.terms,
            &self.groups,
            &self.legend,
            self.focus == Focus::Terms,
        )?;

        let group = self.groups.get(self.term_list.selected());
        let title = group
            .map(|g| self.legend.resolve_label(g.term_id()))
            .unwrap_or_default();
        self.dialogue_panel.draw_with_group(
            frame,
            layout.dialogue,
            group,
            &title,
            self.focus == Focus::Dialogue,
        )?;

        self.legend_panel.draw_with_legend(
            frame,
            layout.legend,
            &legend_title,
            &rows,
            &self.genes,
            self.focus == Focus::Legend,
        )?;

        self.draw_events(frame, layout.events);
        if let Some(status_area) = layout.status {
            self.draw_status(frame, status_area);
        }
        self.draw_help_bar(frame, layout.help);

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

/// Keys bound everywhere except while typing into a text box
fn global_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') => Some(Action::OpenQuitDialog),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('g') => Some(Action::OpenGeneInput),
        KeyCode::Char('s') => Some(Action::SaveRecord),
        KeyCode::Char('r') => Some(Action::ReloadRecord),
        _ => None,
    }
}

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::GeneInput { .. } => self.gene_dialog.handle_key_event(key),
            Modal::Message { .. } => self.message_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
            Modal::GeneInput { input } => self.gene_dialog.draw_with_input(frame, area, input)?,
            Modal::Message { title, text } => {
                self.message_dialog
                    .draw_with_message(frame, area, title, text)?
            }
        }
        Ok(())
    }

    fn draw_events(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .events
            .iter()
            .map(|event| Line::from(Span::styled(event.clone(), Style::default().fg(Color::Gray))))
            .collect();
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Events "),
        );
        frame.render_widget(paragraph, area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let line = match (&self.error, &self.status_message) {
            (Some(error), _) => Line::from(Span::styled(
                format!(" {}", error),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            (None, Some(message)) => Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(Color::Green),
            )),
            (None, None) => Line::from(""),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &str| {
            Span::styled(
                format!(" {} ", k),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        };
        let mut spans = match self.focus {
            Focus::Terms => vec![
                key("Space"),
                Span::raw("Affected  "),
                key("a"),
                Span::raw("Add details  "),
                key("c"),
                Span::raw("Clear  "),
            ],
            Focus::Dialogue => vec![
                key("↑↓"),
                Span::raw("Field  "),
                key("←→"),
                Span::raw("Select  "),
                key("x"),
                Span::raw("Delete  "),
                key("Esc"),
                Span::raw("Back  "),
            ],
            Focus::Legend => vec![
                key("Enter"),
                Span::raw("Drop onto patient  "),
                key("u"),
                Span::raw("Refresh genes  "),
            ],
        };
        spans.extend([
            key("Tab"),
            Span::raw("Panel  "),
            key("s"),
            Span::raw("Save  "),
            key("?"),
            Span::raw("Help  "),
            key("q"),
            Span::raw("Quit"),
        ]);

        let help = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::model::cancer_legend::supported_cancers;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    /// Gene-name service that is never reachable
    struct OfflineService;

    impl GeneNameService for OfflineService {
        fn lookup(&self, key: &str) -> Result<String, LookupError> {
            Err(LookupError::Status {
                status: 503,
                key: key.to_string(),
            })
        }
    }

    impl TermNameService for OfflineService {
        fn lookup(&self, id: &str) -> Result<String, LookupError> {
            Err(LookupError::Status {
                status: 503,
                key: id.to_string(),
            })
        }
    }

    fn test_app(dir: &tempfile::TempDir) -> App {
        let config = Config {
            data_file: dir.path().join("patient.json").to_string_lossy().to_string(),
            subject_id: 3,
            ..Config::default()
        };
        App::new(config, Arc::new(OfflineService), Arc::new(OfflineService)).unwrap()
    }

    fn apply(app: &mut App, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            app.update(action).unwrap();
        }
    }

    #[test]
    fn test_supported_cancers_are_listed_unaffected() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir);
        let ids: Vec<&str> = app.groups.iter().map(|g| g.term_id()).collect();
        assert_eq!(ids, supported_cancers());
        assert!(app.groups.iter().all(|g| !g.is_affected()));
    }

    #[test]
    fn test_drawing_leaves_legend_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal
            .draw(|frame| app.draw(frame, frame.area()).unwrap())
            .unwrap();

        assert!(app.legend.legend().assigned_colors().is_empty());
        assert!(app.notifications.try_recv().is_err());

        apply(&mut app, [Action::ToggleStatus]);
        assert_eq!(app.legend.legend().assigned_colors(), vec!["#e267a3"]);
    }

    #[test]
    fn test_details_survive_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        apply(&mut app, [Action::ToggleStatus, Action::AddDialogue]);
        assert_eq!(app.focus, Focus::Dialogue);

        // age, type, laterality, notes
        apply(&mut app, [Action::NextField, Action::NextField, Action::NextField]);
        apply(&mut app, "left".chars().map(Action::TextInput));
        apply(&mut app, [Action::SaveRecord]);
        assert!(app.error.is_none());

        let mut reloaded = test_app(&dir);
        reloaded.init().unwrap();
        let record = reloaded.groups[0].get_values();
        assert!(record.affected);
        assert_eq!(record.qualifiers.len(), 1);
        assert_eq!(record.qualifiers[0]["notes"], "left");
        assert!(reloaded.subject_cancers["HP:0100013"].affected);
        assert_eq!(reloaded.legend.legend().cases("HP:0100013"), &[3]);
    }

    #[test]
    fn test_text_box_swallows_global_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        apply(
            &mut app,
            [
                Action::ToggleStatus,
                Action::AddDialogue,
                Action::NextField,
                Action::NextField,
                Action::NextField,
            ],
        );
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(
            app.handle_key_event(key).unwrap(),
            Some(Action::TextInput('q'))
        );

        app.update(Action::FocusPanel(Focus::Terms)).unwrap();
        assert_eq!(
            app.handle_key_event(key).unwrap(),
            Some(Action::OpenQuitDialog)
        );
    }

    #[test]
    fn test_unchecking_removes_case() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        apply(&mut app, [Action::ToggleStatus]);
        assert_eq!(app.legend.legend().cases("HP:0100013"), &[3]);

        apply(&mut app, [Action::ToggleStatus]);
        assert!(app.legend.legend().cases("HP:0100013").is_empty());
        assert!(!app.subject_cancers["HP:0100013"].affected);
    }

    #[test]
    fn test_drop_marks_term_and_refuses_repeat() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        apply(&mut app, [Action::NextLegendItem, Action::DropOnSubject]);
        assert!(app.groups[1].is_affected());
        assert!(app.modals.is_empty());

        apply(&mut app, [Action::DropOnSubject]);
        assert_eq!(
            app.modals.top(),
            Some(&Modal::Message {
                title: "Can't drag this cancer to this person".to_string(),
                text: "This person is already marked as affected by the selected cancer"
                    .to_string(),
            })
        );
    }

    #[test]
    fn test_tick_records_notifications() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        apply(&mut app, [Action::ToggleStatus, Action::Tick]);
        assert!(app
            .events
            .iter()
            .any(|e| e == r#"cancers:status:changed {"id":"HP:0100013"}"#));
        assert!(app.events.len() <= EVENT_LOG_SIZE);
    }

    #[test]
    fn test_genes_are_added_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        apply(&mut app, [Action::OpenGeneInput]);
        apply(&mut app, "GSG1L".chars().map(Action::GeneInput));
        apply(&mut app, [Action::ConfirmModal]);
        assert_eq!(app.genes.len(), 1);
        assert!(app.modals.is_empty());

        assert!(app.genes[0].wait(Duration::from_secs(5)));
        assert_eq!(app.genes[0].symbol(), "GSG1L");

        apply(&mut app, [Action::OpenGeneInput]);
        apply(&mut app, "gsg1l".chars().map(Action::GeneInput));
        apply(&mut app, [Action::ConfirmModal]);
        assert_eq!(app.genes.len(), 1);
    }

    #[test]
    fn test_supported_terms_cannot_be_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        apply(&mut app, [Action::DeleteTerm]);
        assert_eq!(app.groups.len(), SUPPORTED_CANCERS.len());
    }
}
