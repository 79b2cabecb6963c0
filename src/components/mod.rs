//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod dialogue_panel;
pub mod gene_dialog;
pub mod help_dialog;
pub mod layout;
pub mod legend_panel;
pub mod message_dialog;
pub mod quit_dialog;
pub mod term_list;

pub use dialogue_panel::{current_dialogue, DialoguePanel};
pub use gene_dialog::GeneDialog;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup, hex_color};
pub use legend_panel::{LegendPanel, LegendRow};
pub use message_dialog::MessageDialog;
pub use quit_dialog::QuitDialog;
pub use term_list::TermListComponent;
