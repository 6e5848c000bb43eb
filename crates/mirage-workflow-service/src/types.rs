//! Design records and the selection set
//!
//! JSON field names are camelCase (`layoutType`, `visualDetail`) so records
//! round-trip with what the model emits and what the browser front end reads.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a page section
///
/// Unknown strings from a model that ignored the schema deserialize as
/// `Content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Header,
    Hero,
    Features,
    Footer,
    Auth,
    Pricing,
    #[default]
    #[serde(other)]
    Content,
}

impl SectionType {
    pub const ALL: [SectionType; 7] = [
        SectionType::Header,
        SectionType::Hero,
        SectionType::Features,
        SectionType::Footer,
        SectionType::Auth,
        SectionType::Pricing,
        SectionType::Content,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Header => "header",
            SectionType::Hero => "hero",
            SectionType::Features => "features",
            SectionType::Footer => "footer",
            SectionType::Auth => "auth",
            SectionType::Pricing => "pricing",
            SectionType::Content => "content",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A palette entry. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub hex: String,
    /// Semantic name (e.g., Primary, Background)
    pub name: String,
}

impl Color {
    pub fn new(name: &str, hex: &str) -> Self {
        Self {
            hex: hex.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    pub name: String,
    pub weight: String,
}

impl Font {
    pub fn new(name: &str, weight: &str) -> Self {
        Self {
            name: name.to_string(),
            weight: weight.to_string(),
        }
    }
}

/// One structural block of a page
///
/// Ids are expected to be unique within a record but this is never checked;
/// missing fields deserialize as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    /// Brief purpose of the section
    pub description: String,
    /// Detailed visual description for recreating the section
    pub visual_detail: String,
}

/// The design as the model returns it. Any `url` it echoes is ignored.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelDesign {
    pub name: String,
    pub layout_type: String,
    pub colors: Vec<Color>,
    pub fonts: Vec<Font>,
    pub sections: Vec<Section>,
}

/// Where a design record came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DesignOrigin {
    /// Parsed from a model reply
    Model,
    /// Fixed record substituted after a failed extraction
    Fallback { reason: String },
}

/// A design system inferred for one URL
///
/// Read-only once created; a new analysis replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRecord {
    pub url: String,
    pub name: String,
    pub layout_type: String,
    pub colors: Vec<Color>,
    pub fonts: Vec<Font>,
    pub sections: Vec<Section>,
    pub origin: DesignOrigin,
}

impl DesignRecord {
    /// Attach the requested url to a parsed model reply
    pub fn from_model(url: &str, design: ModelDesign) -> Self {
        Self {
            url: url.to_string(),
            name: design.name,
            layout_type: design.layout_type,
            colors: design.colors,
            fonts: design.fonts,
            sections: design.sections,
            origin: DesignOrigin::Model,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, DesignOrigin::Fallback { .. })
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }

    /// Section ids in record order, duplicates included
    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    /// Sections whose id is selected, in record order
    pub fn selected_sections<'a>(&'a self, selection: &SelectionSet) -> Vec<&'a Section> {
        self.sections
            .iter()
            .filter(|s| selection.contains(&s.id))
            .collect()
    }
}

/// Section ids the user wants in the synthesized prompt
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<String>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every section id of `design`
    pub fn all_of(design: &DesignRecord) -> Self {
        Self(design.section_ids().map(str::to_string).collect())
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Selected ids in the order their sections appear in `design`
    pub fn ordered_ids(&self, design: &DesignRecord) -> Vec<String> {
        let mut seen = BTreeSet::new();
        design
            .section_ids()
            .filter(|id| self.contains(id) && seen.insert(*id))
            .map(str::to_string)
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ids: &[&str]) -> DesignRecord {
        DesignRecord {
            url: "https://example.com".to_string(),
            name: "Example".to_string(),
            layout_type: "Landing Page".to_string(),
            colors: vec![],
            fonts: vec![],
            sections: ids
                .iter()
                .map(|id| Section {
                    id: id.to_string(),
                    title: format!("Section {}", id),
                    ..Section::default()
                })
                .collect(),
            origin: DesignOrigin::Model,
        }
    }

    #[test]
    fn test_section_parses_camel_case() {
        let section: Section = serde_json::from_str(
            r#"{"id":"a","title":"Hero","type":"hero","description":"d","visualDetail":"big"}"#,
        )
        .unwrap();
        assert_eq!(section.section_type, SectionType::Hero);
        assert_eq!(section.visual_detail, "big");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let section: Section = serde_json::from_str(r#"{"title":"Only a title"}"#).unwrap();
        assert_eq!(section.id, "");
        assert_eq!(section.section_type, SectionType::Content);
    }

    #[test]
    fn test_unknown_section_type_is_content() {
        let section: Section = serde_json::from_str(r#"{"id":"1","type":"testimonials"}"#).unwrap();
        assert_eq!(section.section_type, SectionType::Content);
    }

    #[test]
    fn test_model_design_ignores_echoed_url() {
        let design: ModelDesign = serde_json::from_str(
            r#"{"url":"https://evil.test","name":"Acme","layoutType":"Dashboard","colors":[],"fonts":[],"sections":[]}"#,
        )
        .unwrap();
        let record = DesignRecord::from_model("https://acme.test", design);
        assert_eq!(record.url, "https://acme.test");
        assert_eq!(record.layout_type, "Dashboard");
        assert!(!record.is_fallback());
    }

    #[test]
    fn test_origin_serializes_tagged() {
        let value = serde_json::to_value(DesignOrigin::Fallback {
            reason: "offline".to_string(),
        })
        .unwrap();
        assert_eq!(value["kind"], "fallback");
        assert_eq!(value["reason"], "offline");
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let design = record(&["1", "2", "3"]);
        let mut selection = SelectionSet::all_of(&design);
        let before = selection.clone();

        assert!(!selection.toggle("2"));
        assert_eq!(selection.ordered_ids(&design), vec!["1", "3"]);
        assert!(selection.toggle("2"));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_ordered_ids_follow_record_order() {
        let design = record(&["b", "a", "c", "a"]);
        let selection: SelectionSet = ["a", "b"].into_iter().collect();
        assert_eq!(selection.ordered_ids(&design), vec!["b", "a"]);
        assert_eq!(design.selected_sections(&selection).len(), 3);
    }
}
