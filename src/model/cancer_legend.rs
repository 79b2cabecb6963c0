//! Cancer legend - colors and labels for cancer terms
//!
//! Wraps a [`Legend`] and adds the fixed palette of supported cancer HPO
//! terms, human-readable labels and color assignment for anything else.

use super::legend::{DefaultLegend, Legend};
use super::notification::{Notification, Notifier};
use crate::error::{DropRejected, LookupError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Supported cancers: HPO id, preassigned color, short name
pub const SUPPORTED_CANCERS: [(&str, &str, &str); 17] = [
    ("HP:0100013", "#e267a3", "Breast"),
    ("HP:0100615", "#9370DB", "Ovarian"),
    ("HP:0100273", "#945d34", "Colorectal"),
    ("HP:0010784", "#c93320", "Uterus"),
    ("HP:0100787", "#ecb739", "Prostate"),
    ("HP:0002894", "#4657dc", "Pancreatic"),
    // #333333 and darker do not render with gradients
    ("HP:0012056", "#444444", "Melanoma"),
    ("HP:0009726", "#197419", "Kidney"),
    ("HP:0006753", "#9aac8c", "Gastric"),
    ("HP:0100526", "#008080", "Lung"),
    ("HP:0030692", "#F5DEB3", "Brain"),
    ("HP:0100751", "#BC8F8F", "Oesophagus"),
    ("HP:0100031", "#FFFF00", "Thyroid"),
    ("HP:0002896", "#770000", "Liver"),
    ("HP:0030079", "#FFCCCC", "Cervical"),
    ("HP:0006775", "#FF0000", "Myeloma"),
    ("HP:0001909", "#888888", "Leukemia"),
];

/// Short name to display label
const CANCER_LABELS: [(&str, &str); 17] = [
    ("Breast", "Breast cancer"),
    ("Ovarian", "Ovarian cancer"),
    ("Colorectal", "Colorectal cancer"),
    ("Uterus", "Uterus cancer"),
    ("Prostate", "Prostate cancer"),
    ("Pancreatic", "Pancreatic cancer"),
    ("Melanoma", "Melanoma"),
    ("Kidney", "Kidney cancer"),
    ("Gastric", "Gastric cancer"),
    ("Lung", "Lung cancer"),
    ("Brain", "Brain cancer"),
    ("Oesophagus", "Oesophagus cancer"),
    ("Thyroid", "Thyroid cancer"),
    ("Liver", "Liver cancer"),
    ("Cervical", "Cervical cancer"),
    ("Myeloma", "Myeloma"),
    ("Leukemia", "Leukemia"),
];

/// Red/yellow colors that stay distinguishable in gray-scale and from gene colors
pub const PREFERRED_COLORS: [&str; 6] = [
    "#f8ebb7", "#eac080", "#bf6632", "#a47841", "#c95555", "#ae6c57",
];

const WHITE: &str = "#ffffff";

/// Affected status of one cancer for one subject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancerStatus {
    pub affected: bool,
    /// Other stored properties, carried through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Cancer id to status for one subject
pub type CancerStatusMap = BTreeMap<String, CancerStatus>;

/// Ids of the fixed supported set
pub fn supported_cancers() -> Vec<&'static str> {
    SUPPORTED_CANCERS.iter().map(|(id, _, _)| *id).collect()
}

fn supported(id: &str) -> Option<(&'static str, &'static str)> {
    SUPPORTED_CANCERS
        .iter()
        .find(|(key, _, _)| *key == id)
        .map(|(_, color, name)| (*color, *name))
}

/// Source of HPO term names for cancers outside the supported set
///
/// `lookup` answers with the raw JSON body of `GET <base>/<id>`; the legend
/// reads its `name`.
pub trait TermNameService: Send + Sync {
    fn lookup(&self, id: &str) -> Result<String, LookupError>;
}

#[derive(Debug, Deserialize)]
struct TermNameRecord {
    name: String,
}

type LabelResult = (String, Result<String, LookupError>);

pub struct CancerLegend<L: Legend = DefaultLegend> {
    legend: L,
    /// Names of terms seen so far
    term_cache: BTreeMap<String, String>,
    notifier: Notifier,
    rng: StdRng,
    term_service: Option<Arc<dyn TermNameService>>,
    label_sender: Sender<LabelResult>,
    label_receiver: Receiver<LabelResult>,
    /// Ids with a name lookup in flight
    pending_labels: BTreeSet<String>,
}

impl CancerLegend<DefaultLegend> {
    pub fn new(notifier: Notifier) -> Self {
        Self::with_legend(DefaultLegend::new("Cancers"), notifier)
    }
}

impl<L: Legend> CancerLegend<L> {
    /// Cancer legend over a caller-supplied base legend
    pub fn with_legend(legend: L, notifier: Notifier) -> Self {
        let (label_sender, label_receiver) = mpsc::channel();
        Self {
            legend,
            term_cache: BTreeMap::new(),
            notifier,
            rng: StdRng::from_entropy(),
            term_service: None,
            label_sender,
            label_receiver,
            pending_labels: BTreeSet::new(),
        }
    }

    /// Replace the random source used for fallback colors
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Fetch names of unknown cancers from `service`
    pub fn with_term_service(mut self, service: Arc<dyn TermNameService>) -> Self {
        self.term_service = Some(service);
        self
    }

    /// The wrapped base legend
    pub fn legend(&self) -> &L {
        &self.legend
    }

    /// Color to draw `id` with, without assigning one
    ///
    /// Assigned colors win over the fixed palette; `None` for an unsupported
    /// cancer that has never had a case.
    pub fn display_color(&self, id: &str) -> Option<String> {
        self.legend
            .object_color(id)
            .or_else(|| supported(id).map(|(color, _)| color))
            .map(str::to_string)
    }

    /// Color for `id`, assigning one on first use
    ///
    /// Preference: existing assignment, fixed palette, first unused preferred
    /// color, then a random color that is neither white nor already in use.
    pub fn resolve_color(&mut self, id: &str) -> String {
        if let Some(color) = self.legend.object_color(id) {
            return color.to_string();
        }
        let color = self.pick_color(id);
        self.legend.set_object_color(id, &color);
        self.notifier.notify(Notification::CancerColor {
            id: id.to_string(),
            color: color.clone(),
        });
        color
    }

    fn pick_color(&mut self, id: &str) -> String {
        if let Some((color, _)) = supported(id) {
            return color.to_string();
        }
        let used: Vec<String> = self
            .legend
            .assigned_colors()
            .into_iter()
            .map(str::to_lowercase)
            .collect();
        if let Some(color) = PREFERRED_COLORS
            .iter()
            .find(|c| !used.iter().any(|u| u == *c))
        {
            return color.to_string();
        }
        loop {
            let candidate = format!("#{:06x}", self.rng.gen_range(0..0x0100_0000u32));
            if candidate != WHITE && !used.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Display label for `id`
    pub fn resolve_label(&self, id: &str) -> String {
        let stored = self
            .term_cache
            .get(id)
            .map(String::as_str)
            .or_else(|| supported(id).map(|(_, name)| name))
            .unwrap_or(id);
        CANCER_LABELS
            .iter()
            .find(|(name, _)| *name == stored)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| stored.to_string())
    }

    /// Register that `subject_id` has cancer `id`; returns its color
    ///
    /// A missing name (empty or the bare id) is fetched from the term
    /// service when one is configured.
    pub fn register_case(&mut self, id: &str, name: &str, subject_id: u32) -> String {
        let name = name.trim();
        if name.is_empty() || name == id {
            self.request_label(id);
        } else {
            self.term_cache
                .entry(id.to_string())
                .or_insert_with(|| name.to_string());
        }
        let color = self.resolve_color(id);
        self.legend.add_case(id, name, subject_id);
        color
    }

    fn request_label(&mut self, id: &str) {
        let Some(service) = self.term_service.as_ref().map(Arc::clone) else {
            return;
        };
        if supported(id).is_some()
            || self.term_cache.contains_key(id)
            || !self.pending_labels.insert(id.to_string())
        {
            return;
        }

        tracing::debug!(term = %id, "term name lookup issued");
        let key = id.to_string();
        let sender = self.label_sender.clone();
        thread::spawn(move || {
            let result = service.lookup(&key);
            let _ = sender.send((key, result));
        });
    }

    /// Apply every settled name lookup; returns true if a label changed
    pub fn poll_labels(&mut self) -> bool {
        let mut changed = false;
        while let Ok((id, result)) = self.label_receiver.try_recv() {
            self.pending_labels.remove(&id);
            let body = match result {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(term = %id, error = %err, "term name lookup failed");
                    continue;
                }
            };
            match serde_json::from_str::<TermNameRecord>(&body) {
                Ok(record) if !record.name.trim().is_empty() => {
                    tracing::info!(term = %id, name = %record.name, "loaded term name");
                    self.term_cache.insert(id, record.name.trim().to_string());
                    changed = true;
                }
                Ok(_) => tracing::info!(term = %id, "term service returned no name"),
                Err(err) => tracing::warn!(term = %id, error = %err, "malformed term name response"),
            }
        }
        changed
    }

    /// Whether any name lookup is still in flight
    pub fn labels_pending(&self) -> bool {
        !self.pending_labels.is_empty()
    }

    /// Forget that `subject_id` has cancer `id`; the color stays assigned
    pub fn remove_case(&mut self, id: &str, subject_id: u32) {
        self.legend.remove_case(id, subject_id);
    }

    /// Drop cancer `id` from the legend onto a subject
    ///
    /// Returns the subject's new cancer map with `id` marked affected and asks
    /// the editor to store it. A subject already affected by `id` is refused.
    pub fn on_drop_object(
        &self,
        subject_id: u32,
        current: &CancerStatusMap,
        id: &str,
    ) -> Result<CancerStatusMap, DropRejected> {
        if !self.legend.accepts_drop(subject_id) {
            return Err(DropRejected::new(
                "This person cannot be assigned cancers",
                "Can't drag this cancer to this person",
            ));
        }
        if current.get(id).is_some_and(|status| status.affected) {
            return Err(DropRejected::new(
                "This person is already marked as affected by the selected cancer",
                "Can't drag this cancer to this person",
            ));
        }

        let mut cancers = current.clone();
        cancers.entry(id.to_string()).or_default().affected = true;
        self.notifier.notify(Notification::NodeSetProperty {
            node_id: subject_id,
            properties: json!({ "setCancers": cancers }),
        });
        Ok(cancers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn legend() -> (CancerLegend, Receiver<Notification>) {
        let (notifier, receiver) = Notifier::channel();
        let legend = CancerLegend::new(notifier).with_rng(StdRng::seed_from_u64(7));
        (legend, receiver)
    }

    #[test]
    fn test_unknown_cancer_gets_first_preferred_color() {
        let (mut legend, rx) = legend();
        let color = legend.register_case("HP:9999999", "Unknown", 7);
        assert_eq!(color, PREFERRED_COLORS[0]);
        assert_eq!(legend.legend().cases("HP:9999999"), &[7]);
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![Notification::CancerColor {
                id: "HP:9999999".to_string(),
                color: "#f8ebb7".to_string(),
            }]
        );
    }

    #[test]
    fn test_supported_cancer_uses_fixed_color() {
        let (mut legend, _rx) = legend();
        assert_eq!(legend.resolve_color("HP:0100526"), "#008080");
        assert_eq!(legend.resolve_color("HP:0012056"), "#444444");
    }

    #[test]
    fn test_resolve_color_is_idempotent() {
        let (mut legend, rx) = legend();
        let first = legend.resolve_color("HP:1234567");
        let second = legend.resolve_color("HP:1234567");
        assert_eq!(first, second);
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn test_fallback_colors_are_unique_and_not_white() {
        let (mut legend, _rx) = legend();
        let mut colors = Vec::new();
        for i in 0..40 {
            colors.push(legend.resolve_color(&format!("HP:90000{:02}", i)));
        }
        assert_eq!(&colors[..6], &PREFERRED_COLORS);
        for (i, color) in colors.iter().enumerate() {
            assert_ne!(color, WHITE);
            assert!(!colors[..i].contains(color), "duplicate color {}", color);
            assert_eq!(color.len(), 7);
        }
    }

    #[test]
    fn test_labels() {
        let (mut legend, _rx) = legend();
        assert_eq!(legend.resolve_label("HP:0100013"), "Breast cancer");
        assert_eq!(legend.resolve_label("HP:0100273"), "Colorectal cancer");
        assert_eq!(legend.resolve_label("HP:0000001"), "HP:0000001");

        legend.register_case("HP:9999999", "Unknown", 7);
        assert_eq!(legend.resolve_label("HP:9999999"), "Unknown");

        legend.register_case("HP:0100526", "Lung carcinoma", 7);
        assert_eq!(legend.resolve_label("HP:0100526"), "Lung carcinoma");
    }

    #[test]
    fn test_supported_short_names_have_labels() {
        let (legend, _rx) = legend();
        assert_eq!(legend.resolve_label("HP:0100273"), "Colorectal cancer");
        assert_eq!(legend.resolve_label("HP:0030079"), "Cervical cancer");
        for id in supported_cancers() {
            let (_, short) = supported(id).unwrap();
            assert!(
                CANCER_LABELS.iter().any(|(name, _)| *name == short),
                "no label for {}",
                short
            );
        }
    }

    #[test]
    fn test_display_color_does_not_assign() {
        let (legend, rx) = legend();
        assert_eq!(legend.display_color("HP:0100526").as_deref(), Some("#008080"));
        assert_eq!(legend.display_color("HP:9999999"), None);
        assert!(legend.legend().assigned_colors().is_empty());
        assert_eq!(rx.try_iter().count(), 0);
    }

    struct FixedTerms;

    impl TermNameService for FixedTerms {
        fn lookup(&self, id: &str) -> Result<String, LookupError> {
            match id {
                "HP:0100570" => Ok(r#"{"id":"HP:0100570","name":"Carcinoid tumor"}"#.to_string()),
                _ => Err(LookupError::Status {
                    status: 404,
                    key: id.to_string(),
                }),
            }
        }
    }

    fn wait_for_labels<L: Legend>(legend: &mut CancerLegend<L>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while legend.labels_pending() && Instant::now() < deadline {
            legend.poll_labels();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_unknown_cancer_name_is_fetched() {
        let (legend, _rx) = legend();
        let mut legend = legend.with_term_service(Arc::new(FixedTerms));

        legend.register_case("HP:0100570", "", 3);
        legend.register_case("HP:0000002", "HP:0000002", 3);
        assert_eq!(legend.resolve_label("HP:0100570"), "HP:0100570");

        wait_for_labels(&mut legend);
        assert!(!legend.labels_pending());
        assert_eq!(legend.resolve_label("HP:0100570"), "Carcinoid tumor");
        assert_eq!(legend.resolve_label("HP:0000002"), "HP:0000002");
    }

    #[test]
    fn test_named_and_supported_cancers_skip_lookup() {
        let (legend, _rx) = legend();
        let mut legend = legend.with_term_service(Arc::new(FixedTerms));
        legend.register_case("HP:0100570", "Carcinoid", 3);
        legend.register_case("HP:0100013", "", 3);
        assert!(!legend.labels_pending());
        assert_eq!(legend.resolve_label("HP:0100570"), "Carcinoid");
    }

    #[test]
    fn test_drop_marks_subject_affected() {
        let (legend, rx) = legend();
        let current = CancerStatusMap::new();
        let updated = legend.on_drop_object(3, &current, "HP:0100013").unwrap();
        assert!(updated["HP:0100013"].affected);

        let events: Vec<Notification> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "pedigree:node:setproperty");
        assert_eq!(
            events[0].memo()["properties"]["setCancers"]["HP:0100013"]["affected"],
            json!(true)
        );
    }

    #[test]
    fn test_drop_on_already_affected_is_rejected() {
        let (legend, rx) = legend();
        let mut current = CancerStatusMap::new();
        current.insert(
            "HP:0100013".to_string(),
            CancerStatus {
                affected: true,
                extra: serde_json::Map::new(),
            },
        );
        let err = legend.on_drop_object(3, &current, "HP:0100013").unwrap_err();
        assert_eq!(
            err.message,
            "This person is already marked as affected by the selected cancer"
        );
        assert_eq!(rx.try_iter().count(), 0);
    }
}
