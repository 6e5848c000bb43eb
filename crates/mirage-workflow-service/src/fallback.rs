//! Fixed design record used when extraction fails

use crate::types::{Color, DesignOrigin, DesignRecord, Font, Section, SectionType};

/// The substitute record, carrying the requested url and the failure reason
pub fn fallback_design(url: &str, reason: impl Into<String>) -> DesignRecord {
    DesignRecord {
        url: url.to_string(),
        name: "Mock Design System".to_string(),
        layout_type: "Modern SaaS".to_string(),
        colors: vec![
            Color::new("Background", "#0f172a"),
            Color::new("Primary", "#3b82f6"),
            Color::new("Muted", "#64748b"),
            Color::new("Foreground", "#f8fafc"),
        ],
        fonts: vec![Font::new("Inter", "400/700")],
        sections: vec![
            section(
                "1",
                "Navigation Bar",
                SectionType::Header,
                "Top sticky nav",
                "Glassmorphism effect, logo left, links center, CTA right",
            ),
            section(
                "2",
                "Hero Section",
                SectionType::Hero,
                "Main value prop",
                "Large H1, two buttons, right-aligned 3D illustration",
            ),
            section(
                "3",
                "Features Grid",
                SectionType::Features,
                "Product capabilities",
                "3x2 grid, icons in circles, hover lift effect",
            ),
        ],
        origin: DesignOrigin::Fallback {
            reason: reason.into(),
        },
    }
}

fn section(
    id: &str,
    title: &str,
    section_type: SectionType,
    description: &str,
    visual_detail: &str,
) -> Section {
    Section {
        id: id.to_string(),
        title: title.to_string(),
        section_type,
        description: description.to_string(),
        visual_detail: visual_detail.to_string(),
    }
}
