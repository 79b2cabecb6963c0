//! Modal stack for managing overlays
//!
//! Only the top modal receives input; the rest stay drawn underneath.

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Help dialog showing all keyboard shortcuts
    Help,
    /// Gene identifier or symbol entry
    GeneInput { input: String },
    /// Informational message, e.g. a refused legend drop
    Message { title: String, text: String },
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.is_empty());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Help);

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_gene_input_is_edited_in_place() {
        let mut stack = ModalStack::new();
        stack.push(Modal::GeneInput {
            input: String::new(),
        });

        if let Some(Modal::GeneInput { input }) = stack.top_mut() {
            input.push_str("GSG1L");
        }

        assert_eq!(
            stack.top(),
            Some(&Modal::GeneInput {
                input: "GSG1L".to_string()
            })
        );
    }
}
