//! Action enum - All possible application actions
//!
//! Components turn key events into Actions; the App applies them to the
//! details model.

use crate::model::Focus;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: drain notifications, apply finished gene lookups
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Panels
    // ─────────────────────────────────────────────────────────────────────────
    /// Cycle focus to the next panel
    FocusNextPanel,
    /// Move focus to a given panel
    FocusPanel(Focus),

    // ─────────────────────────────────────────────────────────────────────────
    // Terms
    // ─────────────────────────────────────────────────────────────────────────
    NextTerm,
    PrevTerm,
    /// Flip the selection checkbox of the current term
    ToggleStatus,
    /// Add a details dialogue to the current term
    AddDialogue,
    /// Drop every dialogue of the current term
    ClearDetails,
    /// Delete the current term
    DeleteTerm,

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogue Editing
    // ─────────────────────────────────────────────────────────────────────────
    NextDialogue,
    PrevDialogue,
    /// Fire the delete action of the focused dialogue
    DeleteDialogue,
    NextField,
    PrevField,
    NextChoice,
    PrevChoice,
    /// Expand or collapse the focused field
    ToggleCollapse,
    TextInput(char),
    TextBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Legend and Genes
    // ─────────────────────────────────────────────────────────────────────────
    NextLegendItem,
    PrevLegendItem,
    /// Drop the selected legend cancer onto the subject
    DropOnSubject,
    /// Re-run the lookup of every gene
    RefreshGenes,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    OpenGeneInput,
    GeneInput(char),
    GeneBackspace,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Record
    // ─────────────────────────────────────────────────────────────────────────
    SaveRecord,
    ReloadRecord,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::FocusNextPanel => write!(f, "FocusNextPanel"),
            Action::FocusPanel(focus) => write!(f, "FocusPanel({})", focus.name()),
            Action::NextTerm => write!(f, "NextTerm"),
            Action::PrevTerm => write!(f, "PrevTerm"),
            Action::ToggleStatus => write!(f, "ToggleStatus"),
            Action::AddDialogue => write!(f, "AddDialogue"),
            Action::ClearDetails => write!(f, "ClearDetails"),
            Action::DeleteTerm => write!(f, "DeleteTerm"),
            Action::NextDialogue => write!(f, "NextDialogue"),
            Action::PrevDialogue => write!(f, "PrevDialogue"),
            Action::DeleteDialogue => write!(f, "DeleteDialogue"),
            Action::NextField => write!(f, "NextField"),
            Action::PrevField => write!(f, "PrevField"),
            Action::NextChoice => write!(f, "NextChoice"),
            Action::PrevChoice => write!(f, "PrevChoice"),
            Action::ToggleCollapse => write!(f, "ToggleCollapse"),
            Action::TextInput(c) => write!(f, "TextInput('{}')", c),
            Action::TextBackspace => write!(f, "TextBackspace"),
            Action::NextLegendItem => write!(f, "NextLegendItem"),
            Action::PrevLegendItem => write!(f, "PrevLegendItem"),
            Action::DropOnSubject => write!(f, "DropOnSubject"),
            Action::RefreshGenes => write!(f, "RefreshGenes"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenGeneInput => write!(f, "OpenGeneInput"),
            Action::GeneInput(c) => write!(f, "GeneInput('{}')", c),
            Action::GeneBackspace => write!(f, "GeneBackspace"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::SaveRecord => write!(f, "SaveRecord"),
            Action::ReloadRecord => write!(f, "ReloadRecord"),
        }
    }
}
