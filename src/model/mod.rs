//! Model layer - the clinical details widgets and their state
//!
//! - `DetailsDialogueGroup` / `DetailsDialogue` - qualifier dialogues per term
//! - `Gene` - identifier/symbol pair refreshed from the gene-name service
//! - `CancerLegend` - cancer colors, labels and cases
//! - `ModalStack` - Modal overlay management

pub mod cancer_legend;
pub mod dialogue;
pub mod gene;
pub mod group;
pub mod legend;
pub mod modal;
pub mod notification;
pub mod qualifier;
pub mod record;
pub mod ui;

// Re-export commonly used types
pub use cancer_legend::{CancerLegend, CancerStatusMap};
pub use dialogue::DetailsDialogue;
pub use gene::{Gene, GeneNameService};
pub use group::{DetailsDialogueGroup, GroupOptions, TermRecord};
pub use legend::Legend;
pub use notification::{Notification, Notifier};
pub use qualifier::{FieldOptions, NumericRange};
pub use record::{GeneEntry, PatientRecord};
pub use ui::Focus;
