//! Details dialogue - one set of qualifier inputs for one term occurrence

use super::qualifier::{
    FieldOptions, NumericRange, QualifierElement, QualifierField, QualifierKind, QualifierValues,
};
use std::collections::HashMap;

/// A dialogue collecting qualifier data for a single occurrence of a term
#[derive(Debug)]
pub struct DetailsDialogue {
    element_id: String,
    data_name: String,
    /// All fields in display order, anonymous ones included
    fields: Vec<QualifierField>,
    /// Qualifier name to index into `fields`, in registration order
    registry: Vec<(String, usize)>,
    lookup: HashMap<String, usize>,
    /// Removal token of the attached delete action
    delete_action: Option<String>,
    has_delete_action: bool,
    deleted: bool,
    focused_field: usize,
}

impl DetailsDialogue {
    /// Empty dialogue; `data_name` tags its log lines with the owning group
    pub fn new(element_id: impl Into<String>, data_name: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            data_name: data_name.into(),
            fields: Vec::new(),
            registry: Vec::new(),
            lookup: HashMap::new(),
            delete_action: None,
            has_delete_action: false,
            deleted: false,
            focused_field: 0,
        }
    }

    /// Build and append a field; named fields are registered for value transfer
    pub fn add_qualifier_field(&mut self, kind: QualifierKind, options: &FieldOptions) -> &mut Self {
        let mut field = QualifierField::build(kind, options);
        if let Some(name) = field.name().map(str::to_string) {
            if self.lookup.contains_key(&name) {
                tracing::warn!(
                    data_name = %self.data_name,
                    dialogue = %self.element_id,
                    qualifier = %name,
                    "qualifier name already registered, new field stays anonymous"
                );
                field.make_anonymous();
            } else {
                self.lookup.insert(name.clone(), self.fields.len());
                self.registry.push((name, self.fields.len()));
            }
        }
        self.fields.push(field);
        self
    }

    /// Numeric range select, shown inline
    pub fn with_numeric_select(&mut self, range: NumericRange, options: &FieldOptions) -> &mut Self {
        self.add_qualifier_field(QualifierKind::NumericSelect(range), options)
    }

    /// Select over fixed items, defaulting to the first
    pub fn with_item_select(&mut self, items: Vec<String>, options: &FieldOptions) -> &mut Self {
        self.add_qualifier_field(QualifierKind::ItemSelect(items), options)
    }

    /// Single-choice list, defaulting to the first item
    pub fn with_radio_list(&mut self, items: Vec<String>, options: &FieldOptions) -> &mut Self {
        self.add_qualifier_field(QualifierKind::RadioList(items), options)
    }

    /// Free-text input
    pub fn with_text_box(&mut self, options: &FieldOptions) -> &mut Self {
        self.add_qualifier_field(QualifierKind::TextBox, options)
    }

    /// Caller-supplied element
    pub fn with_qualifier_element(
        &mut self,
        element: Box<dyn QualifierElement>,
        options: &FieldOptions,
    ) -> &mut Self {
        self.add_qualifier_field(QualifierKind::Custom(element), options)
    }

    /// Attach the delete affordance, optionally remembering a removal token
    pub fn with_delete_action(&mut self, removal_token: Option<&str>) -> &mut Self {
        self.delete_action = removal_token
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self.has_delete_action = true;
        self
    }

    /// Element id, unique within the owning group
    pub fn id(&self) -> &str {
        &self.element_id
    }

    /// Token handed to the delete action, if one was given
    pub fn removal_token(&self) -> Option<&str> {
        self.delete_action.as_deref()
    }

    /// Whether the delete affordance is attached
    pub fn has_delete_action(&self) -> bool {
        self.has_delete_action
    }

    /// Whether the delete action already fired
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Fire the delete action
    ///
    /// Drops every field and the registry and returns the dialogue id for
    /// the owner. Returns `None` when no delete action is attached or the
    /// dialogue is already gone.
    pub fn delete(&mut self) -> Option<String> {
        if !self.has_delete_action || self.deleted {
            return None;
        }
        self.fields.clear();
        self.registry.clear();
        self.lookup.clear();
        self.focused_field = 0;
        self.deleted = true;
        Some(self.element_id.clone())
    }

    /// Collect the values of all registered fields, in registration order
    pub fn get_values(&self) -> QualifierValues {
        let mut values = QualifierValues::new();
        for (_, index) in &self.registry {
            self.fields[*index].element().collect_into(&mut values);
        }
        values
    }

    /// Apply stored values; keys without a registered field are ignored
    pub fn set_values(&mut self, values: &QualifierValues) {
        for (key, value) in values {
            match self.lookup.get(key) {
                Some(&index) => self.fields[index].element_mut().apply_value(value),
                None => tracing::trace!(
                    data_name = %self.data_name,
                    dialogue = %self.element_id,
                    key = %key,
                    "ignoring unknown qualifier"
                ),
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Field access for the terminal front end
    // ─────────────────────────────────────────────────────────────────────────

    /// All fields in display order
    pub fn fields(&self) -> &[QualifierField] {
        &self.fields
    }

    pub fn focused_field_index(&self) -> usize {
        self.focused_field
    }

    /// Field receiving keyboard edits
    pub fn focused_field_mut(&mut self) -> Option<&mut QualifierField> {
        self.fields.get_mut(self.focused_field)
    }

    /// Move field focus down, stopping at the last field
    pub fn focus_next_field(&mut self) {
        if self.focused_field + 1 < self.fields.len() {
            self.focused_field += 1;
        }
    }

    pub fn focus_prev_field(&mut self) {
        self.focused_field = self.focused_field.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialogue_with_fields() -> DetailsDialogue {
        let mut dialogue = DetailsDialogue::new("HP:0100013_0", "cancers");
        dialogue
            .with_numeric_select(
                NumericRange::new(1, 100, 10).unwrap(),
                &FieldOptions::new("ageAtDiagnosis", "Age at diagnosis"),
            )
            .with_radio_list(
                vec!["Primary".to_string(), "Metastasized".to_string()],
                &FieldOptions::new("primary", "Type").collapsible(true),
            )
            .with_text_box(&FieldOptions::new("notes", "Notes"));
        dialogue
    }

    #[test]
    fn test_text_box_round_trip() {
        let mut dialogue = DetailsDialogue::new("HP:0001_0", "cancers");
        dialogue.with_text_box(&FieldOptions::new("notes", "Notes"));

        let values = QualifierValues::from([("notes".to_string(), "hello".to_string())]);
        dialogue.set_values(&values);
        assert_eq!(dialogue.get_values(), values);
    }

    #[test]
    fn test_set_values_drops_unknown_keys() {
        let mut dialogue = dialogue_with_fields();
        let stored = QualifierValues::from([
            ("ageAtDiagnosis".to_string(), "before_40".to_string()),
            ("primary".to_string(), "Metastasized".to_string()),
            ("notes".to_string(), "left breast".to_string()),
            ("futureField".to_string(), "x".to_string()),
        ]);
        dialogue.set_values(&stored);

        let mut expected = stored.clone();
        expected.shift_remove("futureField");
        assert_eq!(dialogue.get_values(), expected);
    }

    #[test]
    fn test_values_follow_field_order() {
        let mut dialogue = DetailsDialogue::new("t_0", "cancers");
        dialogue
            .with_text_box(&FieldOptions::new("notes", "Notes"))
            .with_item_select(vec!["Left".to_string()], &FieldOptions::new("laterality", "Laterality"))
            .with_numeric_select(
                NumericRange::new(1, 100, 10).unwrap(),
                &FieldOptions::new("ageAtDiagnosis", "Age at diagnosis"),
            );

        let keys: Vec<String> = dialogue.get_values().into_keys().collect();
        assert_eq!(keys, vec!["notes", "laterality", "ageAtDiagnosis"]);

        let json = serde_json::to_string(&dialogue.get_values()).unwrap();
        assert!(json.starts_with(r#"{"notes":"#));
    }

    #[test]
    fn test_anonymous_field_displayed_but_not_collected() {
        let mut dialogue = DetailsDialogue::new("t_0", "cancers");
        dialogue
            .with_text_box(&FieldOptions::new("", "Scratch"))
            .with_text_box(&FieldOptions::new("notes", "Notes"));

        assert_eq!(dialogue.fields().len(), 2);
        let keys: Vec<String> = dialogue.get_values().into_keys().collect();
        assert_eq!(keys, vec!["notes".to_string()]);
    }

    #[test]
    fn test_duplicate_name_keeps_first_registration() {
        let mut dialogue = DetailsDialogue::new("t_0", "cancers");
        dialogue
            .with_text_box(&FieldOptions::new("notes", "Notes"))
            .with_item_select(vec!["a".to_string()], &FieldOptions::new("notes", "Other"));

        dialogue.set_values(&QualifierValues::from([(
            "notes".to_string(),
            "kept".to_string(),
        )]));
        assert_eq!(dialogue.get_values().get("notes").map(String::as_str), Some("kept"));
        assert_eq!(dialogue.fields()[1].name(), None);
    }

    #[test]
    fn test_delete_requires_delete_action() {
        let mut dialogue = dialogue_with_fields();
        assert_eq!(dialogue.delete(), None);

        dialogue.with_delete_action(Some("remove-url"));
        assert_eq!(dialogue.removal_token(), Some("remove-url"));
        assert_eq!(dialogue.delete().as_deref(), Some("HP:0100013_0"));
        assert!(dialogue.is_deleted());
        assert!(dialogue.get_values().is_empty());
        assert_eq!(dialogue.delete(), None);
    }

    #[test]
    fn test_field_focus_is_clamped() {
        let mut dialogue = dialogue_with_fields();
        dialogue.focus_prev_field();
        assert_eq!(dialogue.focused_field_index(), 0);
        for _ in 0..5 {
            dialogue.focus_next_field();
        }
        assert_eq!(dialogue.focused_field_index(), 2);
    }
}
