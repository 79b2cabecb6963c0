//! UI state - presentation state separate from the details model

/// Panel that receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Terms,
    Dialogue,
    Legend,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Terms => Focus::Dialogue,
            Focus::Dialogue => Focus::Legend,
            Focus::Legend => Focus::Terms,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Focus::Terms => "Cancers",
            Focus::Dialogue => "Details",
            Focus::Legend => "Legend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles_through_panels() {
        let focus = Focus::default();
        assert_eq!(focus, Focus::Terms);
        assert_eq!(focus.next().next().next(), Focus::Terms);
    }
}
