//! Legend bookkeeping shared by the pedigree legends
//!
//! A legend tracks which objects (disorders, cancers, genes, ...) are in use,
//! which subjects carry them and which color each object is drawn with.

/// Capability of a legend box
pub trait Legend {
    /// Title of the legend
    fn title(&self) -> &str;

    /// Color assigned to object `id`, if any
    fn object_color(&self, id: &str) -> Option<&str>;

    /// Assign or replace the color of object `id`
    fn set_object_color(&mut self, id: &str, color: &str);

    /// Every color currently assigned to an object
    fn assigned_colors(&self) -> Vec<&str>;

    /// Record that `subject_id` carries object `id`
    fn add_case(&mut self, id: &str, name: &str, subject_id: u32);

    /// Forget that `subject_id` carries object `id`
    fn remove_case(&mut self, id: &str, subject_id: u32);

    /// Subjects carrying object `id`
    fn cases(&self, id: &str) -> &[u32];

    /// Objects with at least one case, in the order they were first added
    fn object_ids(&self) -> Vec<&str>;

    /// Whether objects may be dropped onto `subject_id`
    fn accepts_drop(&self, subject_id: u32) -> bool {
        let _ = subject_id;
        true
    }
}

/// In-memory legend used on its own or wrapped by specialised legends
#[derive(Debug, Clone, Default)]
pub struct DefaultLegend {
    title: String,
    colors: Vec<(String, String)>,
    cases: Vec<(String, Vec<u32>)>,
}

impl DefaultLegend {
    /// Empty legend with the given box title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    fn case_entry(&mut self, id: &str) -> &mut Vec<u32> {
        let index = match self.cases.iter().position(|(key, _)| key == id) {
            Some(index) => index,
            None => {
                self.cases.push((id.to_string(), Vec::new()));
                self.cases.len() - 1
            }
        };
        &mut self.cases[index].1
    }
}

impl Legend for DefaultLegend {
    fn title(&self) -> &str {
        &self.title
    }

    fn object_color(&self, id: &str) -> Option<&str> {
        self.colors
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, color)| color.as_str())
    }

    fn set_object_color(&mut self, id: &str, color: &str) {
        match self.colors.iter_mut().find(|(key, _)| key == id) {
            Some(entry) => entry.1 = color.to_string(),
            None => self.colors.push((id.to_string(), color.to_string())),
        }
    }

    fn assigned_colors(&self) -> Vec<&str> {
        self.colors.iter().map(|(_, color)| color.as_str()).collect()
    }

    fn add_case(&mut self, id: &str, _name: &str, subject_id: u32) {
        let subjects = self.case_entry(id);
        if !subjects.contains(&subject_id) {
            subjects.push(subject_id);
        }
    }

    fn remove_case(&mut self, id: &str, subject_id: u32) {
        if let Some(index) = self.cases.iter().position(|(key, _)| key == id) {
            self.cases[index].1.retain(|s| *s != subject_id);
            if self.cases[index].1.is_empty() {
                self.cases.remove(index);
            }
        }
    }

    fn cases(&self, id: &str) -> &[u32] {
        self.cases
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, subjects)| subjects.as_slice())
            .unwrap_or(&[])
    }

    fn object_ids(&self) -> Vec<&str> {
        self.cases.iter().map(|(key, _)| key.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cases_are_tracked_per_object() {
        let mut legend = DefaultLegend::new("Cancers");
        legend.add_case("HP:0100013", "Breast", 1);
        legend.add_case("HP:0100013", "Breast", 2);
        legend.add_case("HP:0100013", "Breast", 2);
        legend.add_case("HP:0100526", "Lung", 1);

        assert_eq!(legend.cases("HP:0100013"), &[1, 2]);
        assert_eq!(legend.object_ids(), vec!["HP:0100013", "HP:0100526"]);

        legend.remove_case("HP:0100013", 1);
        legend.remove_case("HP:0100013", 2);
        assert!(legend.cases("HP:0100013").is_empty());
        assert_eq!(legend.object_ids(), vec!["HP:0100526"]);
    }

    #[test]
    fn test_colors_survive_case_removal() {
        let mut legend = DefaultLegend::new("Cancers");
        legend.set_object_color("HP:0100526", "#008080");
        legend.add_case("HP:0100526", "Lung", 1);
        legend.remove_case("HP:0100526", 1);
        assert_eq!(legend.object_color("HP:0100526"), Some("#008080"));
        assert_eq!(legend.assigned_colors(), vec!["#008080"]);
    }
}
