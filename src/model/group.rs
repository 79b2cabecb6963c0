//! Details dialogue group - all qualifier dialogues attached to one term
//!
//! A group owns the term identity, the dialogues created for it and a list of
//! deferred "dialogue options": builders applied to every new dialogue so the
//! group can declare one schema for all of them.

use super::dialogue::DetailsDialogue;
use super::notification::{Notification, Notifier};
use super::qualifier::{FieldOptions, NumericRange, QualifierElement, QualifierValues};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Builder applied to every dialogue created by a group
pub type DialogueOption = Box<dyn Fn(&mut DetailsDialogue)>;

/// Stored shape of one term's clinical data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub affected: bool,
    #[serde(default)]
    pub qualifiers: Vec<QualifierValues>,
}

/// Construction-time switches of a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupOptions {
    /// More than one dialogue per term
    pub allow_multi_dialogues: bool,
    /// Hide the "Delete" affordance of the term
    pub disable_term_delete: bool,
}

/// Which actions the group currently offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Affordances {
    pub add_details: bool,
    pub clear_details: bool,
    pub delete_term: bool,
}

pub struct DetailsDialogueGroup {
    data_name: String,
    term_id: String,
    label: String,
    options: GroupOptions,
    /// Selection checkbox state; `None` for non-selectable terms
    status: Option<bool>,
    /// Sequence used to mint dialogue ids, reset when details are cleared
    qualifier_no: usize,
    dialogue_options: Vec<DialogueOption>,
    dialogues: Vec<DetailsDialogue>,
    focused: Option<String>,
    affordances: Affordances,
    deleted: bool,
    notifier: Notifier,
}

impl fmt::Debug for DetailsDialogueGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetailsDialogueGroup")
            .field("data_name", &self.data_name)
            .field("term_id", &self.term_id)
            .field("label", &self.label)
            .field("options", &self.options)
            .field("status", &self.status)
            .field("qualifier_no", &self.qualifier_no)
            .field("dialogue_options", &self.dialogue_options.len())
            .field("dialogues", &self.dialogues)
            .field("affordances", &self.affordances)
            .finish()
    }
}

impl DetailsDialogueGroup {
    /// Empty group; `data_name` prefixes every notification it emits
    pub fn new(data_name: impl Into<String>, options: GroupOptions, notifier: Notifier) -> Self {
        Self {
            data_name: data_name.into(),
            term_id: String::new(),
            label: String::new(),
            options,
            status: None,
            qualifier_no: 0,
            dialogue_options: Vec::new(),
            dialogues: Vec::new(),
            focused: None,
            affordances: Affordances::default(),
            deleted: false,
            notifier,
        }
    }

    /// Associate the group with a term
    ///
    /// The term id falls back to the trimmed label. When both are empty the
    /// group is left untouched and stays unusable.
    pub fn with_label(&mut self, label: &str, term_id: Option<&str>, selectable: bool) -> &mut Self {
        let trimmed_id = term_id.map(str::trim).unwrap_or_default();
        let trimmed_label = label.trim();
        let resolved = if trimmed_id.is_empty() {
            trimmed_label
        } else {
            trimmed_id
        };
        if resolved.is_empty() {
            tracing::debug!(data_name = %self.data_name, "ignoring empty term identity");
            return self;
        }
        self.term_id = resolved.to_string();
        self.label = trimmed_label.to_string();
        self.status = selectable.then_some(false);
        self.affordances = Affordances {
            add_details: false,
            clear_details: false,
            delete_term: !self.options.disable_term_delete,
        };
        self.refresh_add_details();
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogue Schema
    // ─────────────────────────────────────────────────────────────────────────

    /// Every new dialogue gets a numeric range select
    pub fn dialogues_add_numeric_select(&mut self, range: NumericRange, options: FieldOptions) -> &mut Self {
        self.push_option(move |d| {
            d.with_numeric_select(range, &options);
        })
    }

    /// Every new dialogue gets an item select
    pub fn dialogues_add_item_select(&mut self, items: Vec<String>, options: FieldOptions) -> &mut Self {
        self.push_option(move |d| {
            d.with_item_select(items.clone(), &options);
        })
    }

    /// Every new dialogue gets a radio list
    pub fn dialogues_add_radio_list(&mut self, items: Vec<String>, options: FieldOptions) -> &mut Self {
        self.push_option(move |d| {
            d.with_radio_list(items.clone(), &options);
        })
    }

    /// Every new dialogue gets a text box
    pub fn dialogues_add_text_box(&mut self, options: FieldOptions) -> &mut Self {
        self.push_option(move |d| {
            d.with_text_box(&options);
        })
    }

    /// Custom elements are built per dialogue by `factory`
    pub fn dialogues_add_custom_element<F>(&mut self, factory: F, options: FieldOptions) -> &mut Self
    where
        F: Fn() -> Box<dyn QualifierElement> + 'static,
    {
        self.push_option(move |d| {
            d.with_qualifier_element(factory(), &options);
        })
    }

    /// Every new dialogue gets a delete action
    pub fn dialogues_add_delete_action(&mut self, removal_token: Option<String>) -> &mut Self {
        self.push_option(move |d| {
            d.with_delete_action(removal_token.as_deref());
        })
    }

    /// Forget the schema; existing dialogues keep their fields
    pub fn clear_dialogue_options(&mut self) -> &mut Self {
        self.dialogue_options.clear();
        self
    }

    fn push_option(&mut self, option: impl Fn(&mut DetailsDialogue) + 'static) -> &mut Self {
        self.dialogue_options.push(Box::new(option));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identity and Status
    // ─────────────────────────────────────────────────────────────────────────

    /// Term identity, empty until `with_label` succeeds
    pub fn term_id(&self) -> &str {
        &self.term_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Actions currently offered to the user
    pub fn affordances(&self) -> Affordances {
        self.affordances
    }

    /// Whether the term shows a selection checkbox
    pub fn is_selectable(&self) -> bool {
        self.status.is_some()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Checkbox state, or whether a term id is set for non-selectable terms
    pub fn is_affected(&self) -> bool {
        match self.status {
            Some(checked) => checked,
            None => !self.term_id.is_empty(),
        }
    }

    /// Set the checkbox without the side effects of a user toggle
    pub fn set_affected(&mut self, affected: bool) {
        if let Some(status) = self.status.as_mut() {
            *status = affected;
            self.refresh_add_details();
        }
    }

    /// User toggle of the selection checkbox
    ///
    /// Checking offers "add"; unchecking clears all details and withdraws it.
    pub fn toggle_status(&mut self, checked: bool) {
        if self.status.is_none() || self.term_id.is_empty() || self.deleted {
            return;
        }
        self.status = Some(checked);
        if checked {
            self.refresh_add_details();
        } else {
            self.clear_details();
        }
        self.notifier.notify(Notification::StatusChanged {
            data_name: self.data_name.clone(),
            id: self.term_id.clone(),
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogues
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of dialogue ids minted since the last clear
    pub fn size(&self) -> usize {
        self.qualifier_no
    }

    /// Live dialogues in creation order
    pub fn dialogues(&self) -> &[DetailsDialogue] {
        &self.dialogues
    }

    pub fn dialogue(&self, id: &str) -> Option<&DetailsDialogue> {
        self.dialogues.iter().find(|d| d.id() == id)
    }

    pub fn dialogue_mut(&mut self, id: &str) -> Option<&mut DetailsDialogue> {
        self.dialogues.iter_mut().find(|d| d.id() == id)
    }

    /// Dialogue holding focus, if any
    pub fn focused_dialogue_id(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Create a dialogue, apply the schema and register it
    ///
    /// Returns `None` without side effects when the term identity is empty,
    /// the term was deleted, or a single-dialogue group already holds one.
    pub fn add_dialogue(&mut self, silent: bool) -> Option<&mut DetailsDialogue> {
        if self.term_id.is_empty() || self.deleted {
            tracing::warn!(data_name = %self.data_name, "cannot add a dialogue without a term");
            return None;
        }
        if !self.options.allow_multi_dialogues && !self.dialogues.is_empty() {
            tracing::warn!(term = %self.term_id, "term allows a single details dialogue");
            return None;
        }

        let id = format!("{}_{}", self.term_id, self.qualifier_no);
        self.qualifier_no += 1;

        let mut dialogue = DetailsDialogue::new(id.clone(), self.data_name.clone());
        for option in &self.dialogue_options {
            option(&mut dialogue);
        }
        self.dialogues.push(dialogue);
        self.affordances.clear_details = true;
        self.refresh_add_details();

        if !silent {
            self.notifier.notify(Notification::DialogueAdded {
                data_name: self.data_name.clone(),
            });
            self.focused = Some(id);
            self.notifier.notify(Notification::DialogueFocused {
                data_name: self.data_name.clone(),
            });
        }
        self.dialogues.last_mut()
    }

    /// Fire the delete action of a dialogue and drop it from the group
    pub fn delete_dialogue(&mut self, id: &str) -> bool {
        let Some(dialogue) = self.dialogues.iter_mut().find(|d| d.id() == id) else {
            return false;
        };
        let Some(deleted_id) = dialogue.delete() else {
            return false;
        };
        self.notifier.notify(Notification::QualifierDeleted {
            data_name: self.data_name.clone(),
            id: deleted_id.clone(),
        });
        self.on_qualifier_deleted(&deleted_id);
        true
    }

    fn on_qualifier_deleted(&mut self, id: &str) {
        self.dialogues.retain(|d| d.id() != id);
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
        if self.dialogues.is_empty() {
            self.clear_details();
        }
        self.refresh_add_details();
    }

    /// Destroy all dialogues and reset the id sequence
    pub fn clear_details(&mut self) {
        self.reset_details();
        self.notifier.notify(Notification::QualifiersCleared {
            data_name: self.data_name.clone(),
        });
    }

    fn reset_details(&mut self) {
        self.qualifier_no = 0;
        self.dialogues.clear();
        self.focused = None;
        self.affordances.clear_details = false;
        self.refresh_add_details();
    }

    /// Delete the whole term; refused when term deletion is disabled
    pub fn delete_term(&mut self) -> Option<String> {
        if !self.affordances.delete_term || self.deleted {
            return None;
        }
        self.deleted = true;
        self.dialogues.clear();
        self.focused = None;
        self.affordances = Affordances::default();
        self.notifier.notify(Notification::TermDeleted {
            data_name: self.data_name.clone(),
            id: self.term_id.clone(),
        });
        Some(self.term_id.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Focus and Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Move focus to dialogue `id`, blurring the previous one
    pub fn focus_dialogue(&mut self, id: &str) -> bool {
        if self.dialogue(id).is_none() {
            return false;
        }
        self.blur();
        self.focused = Some(id.to_string());
        self.notifier.notify(Notification::DialogueFocused {
            data_name: self.data_name.clone(),
        });
        true
    }

    /// Drop dialogue focus; notifies only when something was focused
    pub fn blur(&mut self) {
        if self.focused.take().is_some() {
            self.notifier.notify(Notification::DialogueBlurred {
                data_name: self.data_name.clone(),
            });
        }
    }

    /// Type into the focused field of a dialogue
    pub fn input_char(&mut self, dialogue_id: &str, c: char) -> bool {
        self.edit_text(dialogue_id, |element| element.input_char(c))
    }

    /// Delete backwards in the focused field of a dialogue
    pub fn backspace(&mut self, dialogue_id: &str) -> bool {
        self.edit_text(dialogue_id, |element| element.backspace())
    }

    fn edit_text(
        &mut self,
        dialogue_id: &str,
        edit: impl FnOnce(&mut dyn QualifierElement) -> bool,
    ) -> bool {
        let Some(field) = self
            .dialogue_mut(dialogue_id)
            .and_then(|d| d.focused_field_mut())
        else {
            return false;
        };
        if !field.element().accepts_text() || !edit(field.element_mut()) {
            return false;
        }
        let qualifier = field.name().unwrap_or_default().to_string();
        self.notifier.notify(Notification::NotesUpdated {
            data_name: self.data_name.clone(),
            id: dialogue_id.to_string(),
            qualifier,
        });
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Values
    // ─────────────────────────────────────────────────────────────────────────

    pub fn get_values(&self) -> TermRecord {
        TermRecord {
            id: self.term_id.clone(),
            label: self.label.clone(),
            affected: self.is_affected(),
            qualifiers: self.dialogues.iter().map(DetailsDialogue::get_values).collect(),
        }
    }

    /// Replace all details with a stored record
    ///
    /// Qualifiers are restored only for affected terms; in a single-dialogue
    /// group only the first qualifier entry is kept.
    pub fn set_values(&mut self, values: Option<&TermRecord>) {
        let Some(values) = values else {
            return;
        };
        self.reset_details();
        self.set_affected(values.affected);
        if !values.affected {
            return;
        }
        for qualifiers in &values.qualifiers {
            match self.add_dialogue(true) {
                Some(dialogue) => dialogue.set_values(qualifiers),
                None => break,
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Affordances
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the term can take details at all
    fn accepts_details(&self) -> bool {
        !self.term_id.is_empty() && !self.deleted && self.status != Some(false)
    }

    fn refresh_add_details(&mut self) {
        let offer = self.accepts_details()
            && (self.options.allow_multi_dialogues || self.dialogues.is_empty());
        if offer == self.affordances.add_details {
            return;
        }
        self.affordances.add_details = offer;
        tracing::trace!(term = %self.term_id, offer, "add details affordance");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::qualifier::TextBoxElement;
    use std::sync::mpsc::Receiver;

    fn single_group() -> (DetailsDialogueGroup, Receiver<Notification>) {
        let (notifier, receiver) = Notifier::channel();
        let mut group = DetailsDialogueGroup::new("cancers", GroupOptions::default(), notifier);
        group
            .with_label("Breast", Some("HP:0100013"), false)
            .dialogues_add_text_box(FieldOptions::new("notes", "Notes"))
            .dialogues_add_delete_action(None);
        (group, receiver)
    }

    fn names(receiver: &Receiver<Notification>) -> Vec<String> {
        receiver.try_iter().map(|n| n.name()).collect()
    }

    #[test]
    fn test_cleared_options_stop_applying_to_new_dialogues() {
        let (notifier, _rx) = Notifier::channel();
        let options = GroupOptions {
            allow_multi_dialogues: true,
            disable_term_delete: false,
        };
        let mut group = DetailsDialogueGroup::new("cancers", options, notifier);
        group
            .with_label("Lung", Some("HP:0100526"), false)
            .dialogues_add_custom_element(
                || Box::new(TextBoxElement::new(Some("stage".to_string()))),
                FieldOptions::new("stage", "Stage"),
            );

        let first = group.add_dialogue(false).map(|d| d.fields().len());
        assert_eq!(first, Some(1));

        group.clear_dialogue_options();
        let second = group.add_dialogue(false).map(|d| d.fields().len());
        assert_eq!(second, Some(0));
        assert_eq!(group.dialogues()[0].fields()[0].label(), "Stage");
    }

    #[test]
    fn test_term_id_falls_back_to_label() {
        let (notifier, _rx) = Notifier::channel();
        let mut group = DetailsDialogueGroup::new("cancers", GroupOptions::default(), notifier);
        group.with_label("  Lung  ", Some("   "), true);
        assert_eq!(group.term_id(), "Lung");
        assert_eq!(group.label(), "Lung");
    }

    #[test]
    fn test_empty_identity_is_a_no_op() {
        let (notifier, rx) = Notifier::channel();
        let mut group = DetailsDialogueGroup::new("cancers", GroupOptions::default(), notifier);
        group.with_label("   ", None, false);
        assert_eq!(group.term_id(), "");
        assert!(!group.is_affected());
        assert!(group.add_dialogue(false).is_none());
        assert!(names(&rx).is_empty());
    }

    #[test]
    fn test_single_group_text_box_scenario() {
        let (notifier, _rx) = Notifier::channel();
        let mut group = DetailsDialogueGroup::new("cancers", GroupOptions::default(), notifier);
        group
            .with_label("Term", Some("HP:0001"), false)
            .dialogues_add_text_box(FieldOptions::new("notes", "Notes"));

        let dialogue = group.add_dialogue(false).unwrap();
        assert_eq!(dialogue.id(), "HP:0001_0");
        let values = QualifierValues::from([("notes".to_string(), "hello".to_string())]);
        dialogue.set_values(&values);
        assert_eq!(dialogue.get_values(), values);
    }

    #[test]
    fn test_single_group_refuses_second_dialogue() {
        let (mut group, _rx) = single_group();
        assert!(group.add_dialogue(false).is_some());
        assert!(!group.affordances().add_details);
        assert!(group.add_dialogue(false).is_none());
        assert_eq!(group.dialogues().len(), 1);
    }

    #[test]
    fn test_add_emits_added_then_focused() {
        let (mut group, rx) = single_group();
        group.add_dialogue(false);
        assert_eq!(
            names(&rx),
            vec!["cancers:dialogue:added", "cancers:dialogue:focused"]
        );
        assert_eq!(group.focused_dialogue_id(), Some("HP:0100013_0"));

        group.clear_details();
        group.add_dialogue(true);
        assert_eq!(names(&rx), vec!["cancers:qualifiers:cleared"]);
    }

    #[test]
    fn test_deleting_sole_dialogue_restores_add() {
        let (mut group, rx) = single_group();
        group.add_dialogue(true);
        assert!(!group.affordances().add_details);

        assert!(group.delete_dialogue("HP:0100013_0"));
        assert!(group.dialogues().is_empty());
        assert!(group.affordances().add_details);
        assert!(!group.affordances().clear_details);
        assert_eq!(
            names(&rx),
            vec!["cancers:qualifier:deleted", "cancers:qualifiers:cleared"]
        );

        let dialogue = group.add_dialogue(true).unwrap();
        assert_eq!(dialogue.id(), "HP:0100013_0");
    }

    #[test]
    fn test_multi_group_mints_sequential_ids() {
        let (notifier, _rx) = Notifier::channel();
        let options = GroupOptions {
            allow_multi_dialogues: true,
            disable_term_delete: false,
        };
        let mut group = DetailsDialogueGroup::new("cancers", options, notifier);
        group
            .with_label("Colon", Some("HP:0100273"), false)
            .dialogues_add_delete_action(None);

        for _ in 0..3 {
            group.add_dialogue(true);
        }
        let ids: Vec<&str> = group.dialogues().iter().map(DetailsDialogue::id).collect();
        assert_eq!(ids, vec!["HP:0100273_0", "HP:0100273_1", "HP:0100273_2"]);
        assert!(group.affordances().add_details);

        group.delete_dialogue("HP:0100273_1");
        assert_eq!(group.dialogues().len(), 2);
        assert_eq!(group.size(), 3);
        assert_eq!(group.add_dialogue(true).unwrap().id(), "HP:0100273_3");
    }

    #[test]
    fn test_is_affected_for_selectable_and_plain_terms() {
        let (notifier, _rx) = Notifier::channel();
        let mut selectable = DetailsDialogueGroup::new("cancers", GroupOptions::default(), notifier.clone());
        selectable.with_label("Breast", Some("HP:0100013"), true);
        assert!(!selectable.is_affected());
        assert!(!selectable.affordances().add_details);

        selectable.toggle_status(true);
        assert!(selectable.is_affected());
        assert!(selectable.affordances().add_details);

        let mut plain = DetailsDialogueGroup::new("cancers", GroupOptions::default(), notifier);
        plain.with_label("Breast", Some("HP:0100013"), false);
        assert!(plain.is_affected());
    }

    #[test]
    fn test_unchecking_status_clears_details() {
        let (notifier, rx) = Notifier::channel();
        let mut group = DetailsDialogueGroup::new("cancers", GroupOptions::default(), notifier);
        group
            .with_label("Breast", Some("HP:0100013"), true)
            .dialogues_add_text_box(FieldOptions::new("notes", "Notes"));
        group.toggle_status(true);
        group.add_dialogue(true);

        group.toggle_status(false);
        assert!(group.dialogues().is_empty());
        assert!(!group.affordances().add_details);
        assert_eq!(
            names(&rx),
            vec![
                "cancers:status:changed",
                "cancers:qualifiers:cleared",
                "cancers:status:changed"
            ]
        );
    }

    #[test]
    fn test_values_round_trip_through_record() {
        let (notifier, _rx) = Notifier::channel();
        let options = GroupOptions {
            allow_multi_dialogues: true,
            disable_term_delete: false,
        };
        let mut group = DetailsDialogueGroup::new("cancers", options, notifier);
        group
            .with_label("Breast", Some("HP:0100013"), true)
            .dialogues_add_numeric_select(
                NumericRange::new(1, 100, 10).unwrap(),
                FieldOptions::new("ageAtDiagnosis", "Age"),
            )
            .dialogues_add_text_box(FieldOptions::new("notes", "Notes"));

        let record = TermRecord {
            id: "HP:0100013".to_string(),
            label: "Breast".to_string(),
            affected: true,
            qualifiers: vec![
                QualifierValues::from([
                    ("ageAtDiagnosis".to_string(), "42".to_string()),
                    ("notes".to_string(), "left".to_string()),
                ]),
                QualifierValues::from([
                    ("ageAtDiagnosis".to_string(), "before_60".to_string()),
                    ("notes".to_string(), "right".to_string()),
                ]),
            ],
        };
        group.set_values(Some(&record));
        assert_eq!(group.get_values(), record);
    }

    #[test]
    fn test_unaffected_record_is_not_repopulated() {
        let (mut group, _rx) = single_group();
        group.add_dialogue(true);

        let record = TermRecord {
            id: "HP:0100013".to_string(),
            label: "Breast".to_string(),
            affected: false,
            qualifiers: vec![QualifierValues::from([(
                "notes".to_string(),
                "ignored".to_string(),
            )])],
        };
        group.set_values(Some(&record));
        assert!(group.dialogues().is_empty());

        group.set_values(None);
        assert!(group.dialogues().is_empty());
    }

    #[test]
    fn test_delete_term_respects_option() {
        let (notifier, rx) = Notifier::channel();
        let options = GroupOptions {
            allow_multi_dialogues: false,
            disable_term_delete: true,
        };
        let mut locked = DetailsDialogueGroup::new("cancers", options, notifier.clone());
        locked.with_label("Breast", Some("HP:0100013"), false);
        assert_eq!(locked.delete_term(), None);

        let (mut group, rx2) = single_group();
        assert_eq!(group.delete_term().as_deref(), Some("HP:0100013"));
        assert!(group.add_dialogue(false).is_none());
        assert_eq!(names(&rx2), vec!["cancers:term:deleted"]);
        assert!(names(&rx).is_empty());
    }

    #[test]
    fn test_typing_into_text_box_emits_notes_updated() {
        let (mut group, rx) = single_group();
        group.add_dialogue(true);
        assert!(group.input_char("HP:0100013_0", 'a'));
        assert!(group.backspace("HP:0100013_0"));
        assert!(!group.backspace("HP:0100013_0"));

        let events: Vec<Notification> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            Notification::NotesUpdated {
                data_name: "cancers".to_string(),
                id: "HP:0100013_0".to_string(),
                qualifier: "notes".to_string(),
            }
        );
    }

    #[test]
    fn test_focus_switch_blurs_previous() {
        let (notifier, rx) = Notifier::channel();
        let options = GroupOptions {
            allow_multi_dialogues: true,
            disable_term_delete: false,
        };
        let mut group = DetailsDialogueGroup::new("cancers", options, notifier);
        group.with_label("Lung", Some("HP:0100526"), false);
        group.add_dialogue(true);
        group.add_dialogue(true);

        assert!(group.focus_dialogue("HP:0100526_0"));
        assert!(group.focus_dialogue("HP:0100526_1"));
        assert!(!group.focus_dialogue("missing"));
        group.blur();
        assert_eq!(
            names(&rx),
            vec![
                "cancers:dialogue:focused",
                "cancers:dialogue:blurred",
                "cancers:dialogue:focused",
                "cancers:dialogue:blurred"
            ]
        );
    }
}
