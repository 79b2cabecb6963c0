//! Qualifier inputs - the leaf fields of a details dialogue
//!
//! Every input implements [`QualifierElement`]: it can write its current value
//! into a [`QualifierValues`] map and can take a value back. The built-in
//! inputs are a numeric range select, an item select, a radio list and a text
//! box; callers can plug in their own element.

use crate::error::QualifierError;
use indexmap::IndexMap;
use std::fmt;

/// Qualifier name to value mapping collected from a dialogue, in field order
pub type QualifierValues = IndexMap<String, String>;

/// Caption values that do not count as an actual selection
const UNSELECTED_CAPTIONS: [&str; 2] = ["", "Unknown"];

/// Bidirectional value transfer for a dialogue input
///
/// Only `collect_into` and `apply_value` are required. The remaining methods
/// let the terminal front end render and edit the element and default to a
/// read-only input.
pub trait QualifierElement: fmt::Debug {
    /// Write the current value under the element's field name, if it has one
    fn collect_into(&self, values: &mut QualifierValues);

    /// Set the displayed state from a stored value
    fn apply_value(&mut self, value: &str);

    /// Current value as shown to the user
    fn display_value(&self) -> String {
        let mut values = QualifierValues::new();
        self.collect_into(&mut values);
        values.into_values().next().unwrap_or_default()
    }

    /// Caption shown next to the label of a collapsible field
    fn caption(&self) -> Option<String> {
        None
    }

    /// Available choices and the selected index, for choice-based inputs
    fn choices(&self) -> Option<(&[Choice], Option<usize>)> {
        None
    }

    /// Move the selection forward
    fn select_next(&mut self) {}

    /// Move the selection back
    fn select_prev(&mut self) {}

    /// Type a character; returns true if the value changed
    fn input_char(&mut self, c: char) -> bool {
        let _ = c;
        false
    }

    /// Delete the last character; returns true if the value changed
    fn backspace(&mut self) -> bool {
        false
    }

    /// Whether the element takes free text
    fn accepts_text(&self) -> bool {
        false
    }
}

/// One selectable entry of a choice-based input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// A choice whose label is its value
    pub fn plain(item: &str) -> Self {
        Self::new(item, item)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Numeric Range
// ═══════════════════════════════════════════════════════════════════════════════

/// Validated bounds for a numeric select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRange {
    from: i32,
    to: i32,
    step: i32,
}

impl NumericRange {
    pub fn new(from: i32, to: i32, step: i32) -> Result<Self, QualifierError> {
        if from > to {
            return Err(QualifierError::InvertedRange { from, to });
        }
        if step <= 0 {
            return Err(QualifierError::NonPositiveStep(step));
        }
        Ok(Self { from, to, step })
    }

    /// Generate the select entries for this range
    ///
    /// Order: a blank entry, "before `from`", then for every value a grouped
    /// entry when the value is a multiple of `step` followed by the value
    /// itself, and finally "after `to`". Grouped entries share the
    /// `before_<n>` value of the stored format.
    pub fn choices(&self) -> Vec<Choice> {
        let mut choices = vec![
            Choice::new("", ""),
            Choice::new(format!("before_{}", self.from), format!("before {}", self.from)),
        ];
        for num in self.from..=self.to {
            if num.rem_euclid(self.step) == 0 {
                choices.push(Choice::new(
                    format!("before_{}", num),
                    format!("{}-{}", i64::from(num) - i64::from(self.step) + 1, num),
                ));
            }
            choices.push(Choice::new(num.to_string(), num.to_string()));
        }
        choices.push(Choice::new(
            format!("after_{}", self.to),
            format!("after {}", self.to),
        ));
        choices
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Built-in Elements
// ═══════════════════════════════════════════════════════════════════════════════

/// Drop-down style select over a fixed list of choices
#[derive(Debug, Clone)]
pub struct SelectElement {
    field_name: Option<String>,
    choices: Vec<Choice>,
    selected: Option<usize>,
}

impl SelectElement {
    pub fn new(field_name: Option<String>, choices: Vec<Choice>) -> Self {
        let selected = if choices.is_empty() { None } else { Some(0) };
        Self {
            field_name,
            choices,
            selected,
        }
    }

    /// Select over a numeric range
    pub fn numeric(field_name: Option<String>, range: &NumericRange) -> Self {
        Self::new(field_name, range.choices())
    }

    /// Select over plain items; an empty list becomes a single blank item
    pub fn items(field_name: Option<String>, items: &[String]) -> Self {
        let choices = if items.is_empty() {
            vec![Choice::plain("")]
        } else {
            items.iter().map(|item| Choice::plain(item)).collect()
        };
        Self::new(field_name, choices)
    }

    fn selected_value(&self) -> String {
        self.selected
            .and_then(|i| self.choices.get(i))
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }
}

impl QualifierElement for SelectElement {
    fn collect_into(&self, values: &mut QualifierValues) {
        if let Some(name) = &self.field_name {
            values.insert(name.clone(), self.selected_value());
        }
    }

    fn apply_value(&mut self, value: &str) {
        // An unknown value leaves the select without a selection
        self.selected = self.choices.iter().position(|c| c.value == value);
    }

    fn display_value(&self) -> String {
        self.selected
            .and_then(|i| self.choices.get(i))
            .map(|c| c.label.clone())
            .unwrap_or_default()
    }

    fn choices(&self) -> Option<(&[Choice], Option<usize>)> {
        Some((&self.choices, self.selected))
    }

    fn select_next(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < self.choices.len() => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    fn select_prev(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }
}

/// Single-choice list; the first item starts out checked
#[derive(Debug, Clone)]
pub struct RadioListElement {
    field_name: Option<String>,
    items: Vec<Choice>,
    checked: Option<usize>,
}

impl RadioListElement {
    pub fn new(field_name: Option<String>, items: &[String]) -> Self {
        let items: Vec<Choice> = items.iter().map(|item| Choice::plain(item)).collect();
        let checked = if items.is_empty() { None } else { Some(0) };
        Self {
            field_name,
            items,
            checked,
        }
    }

    fn checked_title(&self) -> String {
        self.checked
            .and_then(|i| self.items.get(i))
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }
}

impl QualifierElement for RadioListElement {
    fn collect_into(&self, values: &mut QualifierValues) {
        if let Some(name) = &self.field_name {
            values.insert(name.clone(), self.checked_title());
        }
    }

    fn apply_value(&mut self, value: &str) {
        match self.items.iter().position(|c| c.value == value) {
            Some(i) => self.checked = Some(i),
            None => tracing::debug!(value, "radio list has no such item, keeping selection"),
        }
    }

    fn caption(&self) -> Option<String> {
        Some(self.checked_title())
    }

    fn choices(&self) -> Option<(&[Choice], Option<usize>)> {
        Some((&self.items, self.checked))
    }

    fn select_next(&mut self) {
        if let Some(i) = self.checked {
            if i + 1 < self.items.len() {
                self.checked = Some(i + 1);
            }
        }
    }

    fn select_prev(&mut self) {
        if let Some(i) = self.checked {
            self.checked = Some(i.saturating_sub(1));
        }
    }
}

/// Free-text box
#[derive(Debug, Clone, Default)]
pub struct TextBoxElement {
    field_name: Option<String>,
    text: String,
}

impl TextBoxElement {
    pub fn new(field_name: Option<String>) -> Self {
        Self {
            field_name,
            text: String::new(),
        }
    }
}

impl QualifierElement for TextBoxElement {
    fn collect_into(&self, values: &mut QualifierValues) {
        if let Some(name) = &self.field_name {
            values.insert(name.clone(), self.text.clone());
        }
    }

    fn apply_value(&mut self, value: &str) {
        self.text = value.to_string();
    }

    fn display_value(&self) -> String {
        self.text.clone()
    }

    fn input_char(&mut self, c: char) -> bool {
        self.text.push(c);
        true
    }

    fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    fn accepts_text(&self) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Field Options
// ═══════════════════════════════════════════════════════════════════════════════

/// Which input to build for a field
#[derive(Debug)]
pub enum QualifierKind {
    NumericSelect(NumericRange),
    ItemSelect(Vec<String>),
    RadioList(Vec<String>),
    TextBox,
    Custom(Box<dyn QualifierElement>),
}

/// Label, registry name and layout of a field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// Key under which the value is collected; empty means anonymous
    pub qualifier_name: String,
    /// Label shown next to the input
    pub qualifier_label: String,
    /// Whether the field can be collapsed (radio lists, text boxes, custom)
    pub collapsible: bool,
}

impl FieldOptions {
    pub fn new(qualifier_name: impl Into<String>, qualifier_label: impl Into<String>) -> Self {
        Self {
            qualifier_name: qualifier_name.into(),
            qualifier_label: qualifier_label.into(),
            collapsible: false,
        }
    }

    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    /// Registry name, `None` when anonymous
    pub fn name(&self) -> Option<&str> {
        let name = self.qualifier_name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// A displayed field: label and layout around a qualifier element
#[derive(Debug)]
pub struct QualifierField {
    label: String,
    name: Option<String>,
    inline: bool,
    collapsible: bool,
    collapsed: bool,
    element: Box<dyn QualifierElement>,
}

impl QualifierField {
    /// Build the field for `kind`; select inputs are always shown inline
    pub fn build(kind: QualifierKind, options: &FieldOptions) -> Self {
        let name = options.name().map(str::to_string);
        let (element, inline): (Box<dyn QualifierElement>, bool) = match kind {
            QualifierKind::NumericSelect(range) => {
                (Box::new(SelectElement::numeric(name.clone(), &range)), true)
            }
            QualifierKind::ItemSelect(items) => {
                (Box::new(SelectElement::items(name.clone(), &items)), true)
            }
            QualifierKind::RadioList(items) => {
                (Box::new(RadioListElement::new(name.clone(), &items)), false)
            }
            QualifierKind::TextBox => (Box::new(TextBoxElement::new(name.clone())), false),
            QualifierKind::Custom(element) => (element, false),
        };
        let collapsible = options.collapsible && !inline;
        Self {
            label: options.qualifier_label.clone(),
            name,
            inline,
            collapsible,
            collapsed: collapsible,
            element,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn make_anonymous(&mut self) {
        self.name = None;
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    pub fn is_collapsible(&self) -> bool {
        self.collapsible
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Flip the collapsed state of a collapsible field
    pub fn toggle_collapsed(&mut self) {
        if self.collapsible {
            self.collapsed = !self.collapsed;
        }
    }

    /// Caption next to the label, only for collapsible fields
    pub fn caption(&self) -> Option<String> {
        if self.collapsible {
            Some(self.element.caption().unwrap_or_default())
        } else {
            None
        }
    }

    /// Whether the caption denotes an actual selection
    pub fn caption_is_selection(&self) -> bool {
        self.caption()
            .is_some_and(|c| !UNSELECTED_CAPTIONS.contains(&c.as_str()))
    }

    pub fn element(&self) -> &dyn QualifierElement {
        self.element.as_ref()
    }

    pub fn element_mut(&mut self) -> &mut dyn QualifierElement {
        self.element.as_mut()
    }
}
