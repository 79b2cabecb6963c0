//! Typed notifications emitted by the details widgets
//!
//! Each variant keeps the event name and memo shape that external editor code
//! listens for (`cancers:dialogue:added`, `gene:loaded`, ...). Widgets send
//! them through a [`Notifier`]; the application drains the receiving end on
//! every tick.

use serde_json::{json, Value};
use std::sync::mpsc::{self, Receiver, Sender};

/// A notification emitted by a widget
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    // ─────────────────────────────────────────────────────────────────────────
    // Dialogue group
    // ─────────────────────────────────────────────────────────────────────────
    /// A dialogue was added to a group (not sent for silent additions)
    DialogueAdded { data_name: String },
    /// A dialogue received focus
    DialogueFocused { data_name: String },
    /// The focused dialogue lost focus
    DialogueBlurred { data_name: String },
    /// All dialogues of a group were cleared
    QualifiersCleared { data_name: String },
    /// A single dialogue was deleted through its delete action
    QualifierDeleted { data_name: String, id: String },
    /// A whole term was deleted
    TermDeleted { data_name: String, id: String },
    /// The selection checkbox of a term changed
    StatusChanged { data_name: String, id: String },
    /// A notes text box was edited
    NotesUpdated {
        data_name: String,
        id: String,
        qualifier: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Gene
    // ─────────────────────────────────────────────────────────────────────────
    /// A gene's identifier or symbol changed after a lookup
    GeneLoaded {
        old_id: String,
        new_id: String,
        symbol: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Legend
    // ─────────────────────────────────────────────────────────────────────────
    /// A color was assigned to a cancer
    CancerColor { id: String, color: String },
    /// A node property change was requested
    NodeSetProperty { node_id: u32, properties: Value },
}

impl Notification {
    /// Event name as seen by external listeners
    pub fn name(&self) -> String {
        match self {
            Notification::DialogueAdded { data_name } => format!("{}:dialogue:added", data_name),
            Notification::DialogueFocused { data_name } => {
                format!("{}:dialogue:focused", data_name)
            }
            Notification::DialogueBlurred { data_name } => {
                format!("{}:dialogue:blurred", data_name)
            }
            Notification::QualifiersCleared { data_name } => {
                format!("{}:qualifiers:cleared", data_name)
            }
            Notification::QualifierDeleted { data_name, .. } => {
                format!("{}:qualifier:deleted", data_name)
            }
            Notification::TermDeleted { data_name, .. } => format!("{}:term:deleted", data_name),
            Notification::StatusChanged { data_name, .. } => {
                format!("{}:status:changed", data_name)
            }
            Notification::NotesUpdated { data_name, .. } => format!("{}:notes:updated", data_name),
            Notification::GeneLoaded { .. } => "gene:loaded".to_string(),
            Notification::CancerColor { .. } => "cancer:color".to_string(),
            Notification::NodeSetProperty { .. } => "pedigree:node:setproperty".to_string(),
        }
    }

    /// Event memo (payload) as seen by external listeners
    pub fn memo(&self) -> Value {
        match self {
            Notification::DialogueAdded { .. }
            | Notification::DialogueFocused { .. }
            | Notification::DialogueBlurred { .. }
            | Notification::QualifiersCleared { .. } => Value::Null,
            Notification::QualifierDeleted { id, .. }
            | Notification::TermDeleted { id, .. }
            | Notification::StatusChanged { id, .. } => json!({ "id": id }),
            Notification::NotesUpdated { id, qualifier, .. } => {
                json!({ "target": { "id": id, "qualifier": qualifier } })
            }
            Notification::GeneLoaded {
                old_id,
                new_id,
                symbol,
            } => json!({ "oldid": old_id, "newid": new_id, "symbol": symbol }),
            Notification::CancerColor { id, color } => json!({ "id": id, "color": color }),
            Notification::NodeSetProperty {
                node_id,
                properties,
            } => json!({ "nodeID": node_id, "properties": properties }),
        }
    }
}

/// Sending half handed to widgets at construction
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: Sender<Notification>,
}

impl Notifier {
    /// Create a notifier and the receiver that observes it
    pub fn channel() -> (Notifier, Receiver<Notification>) {
        let (sender, receiver) = mpsc::channel();
        (Notifier { sender }, receiver)
    }

    /// Emit a notification; a dropped receiver is not an error
    pub fn notify(&self, notification: Notification) {
        tracing::debug!(event = %notification.name(), memo = %notification.memo(), "notify");
        if self.sender.send(notification).is_err() {
            tracing::trace!("notification receiver dropped");
        }
    }
}
