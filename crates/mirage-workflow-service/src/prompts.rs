//! Instruction templates sent to the model

use std::fmt::Write;

use crate::types::{DesignRecord, Section};

/// Build the design extraction instruction for `url`
///
/// The model is allowed to invent a design when it does not know the site.
pub fn extraction_prompt(url: &str) -> String {
    format!(
        "Analyze the likely design system and layout for the website: {url}.\n\
         If you don't know the specific website, generate a plausible modern design system \
         for a website of this domain name type.\n\
         Provide a comprehensive breakdown of sections, 5-7 distinct sections minimum.\n\
         Ensure color palettes are complete with hex codes.\n"
    )
}

/// Build the Markdown prompt instruction
///
/// All colors and fonts are always listed; only `sections` are described.
pub fn synthesis_prompt(design: &DesignRecord, sections: &[&Section]) -> String {
    let colors = design
        .colors
        .iter()
        .map(|c| format!("{}: {}", c.name, c.hex))
        .collect::<Vec<_>>()
        .join(", ");

    let fonts = design
        .fonts
        .iter()
        .map(|f| format!("{} ({})", f.name, f.weight))
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = String::new();
    prompt.push_str("You are an expert Frontend Architect.\n");
    prompt.push_str(
        "Generate a highly detailed Prompt in Markdown format that I can give to an AI code \
         editor (like Copilot or Cursor) to build the following web application parts.\n\n",
    );

    prompt.push_str("**Context**:\n");
    let _ = writeln!(prompt, "Website: {} ({})", design.name, design.url);
    let _ = writeln!(prompt, "Style: {}\n", design.layout_type);

    prompt.push_str("**Design Tokens**:\n");
    let _ = writeln!(prompt, "- Colors: {}", colors);
    let _ = writeln!(prompt, "- Fonts: {}\n", fonts);

    prompt.push_str("**Selected Sections to Implement**:\n");
    for section in sections {
        let _ = writeln!(prompt, "{}", section_line(section));
    }
    prompt.push('\n');

    prompt.push_str("**Instructions for the Target AI**:\n");
    prompt.push_str("1. Use React, TypeScript, and Tailwind CSS.\n");
    prompt.push_str("2. Use shadcn/ui component patterns.\n");
    prompt.push_str("3. Implement smooth micro-interactions and responsive behavior.\n");
    prompt.push_str("4. Ensure accessibility compliance.\n\n");

    prompt.push_str(
        "Output ONLY the valid Markdown prompt content. Do not add conversational filler.\n",
    );
    prompt
}

fn section_line(section: &Section) -> String {
    format!(
        "- **{}** ({}): {}.\n  *Visual Specs*: {}",
        section.title, section.section_type, section.description, section.visual_detail
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, DesignOrigin, Font, SectionType};

    fn design() -> DesignRecord {
        DesignRecord {
            url: "https://stripe.com".to_string(),
            name: "Stripe".to_string(),
            layout_type: "Landing Page".to_string(),
            colors: vec![Color::new("Primary", "#635bff"), Color::new("Ink", "#0a2540")],
            fonts: vec![Font::new("Sohne", "400"), Font::new("Mono", "500")],
            sections: vec![Section {
                id: "hero".to_string(),
                title: "Gradient Hero".to_string(),
                section_type: SectionType::Hero,
                description: "Headline with animated gradient".to_string(),
                visual_detail: "Angled mesh gradient, left-aligned copy".to_string(),
            }],
            origin: DesignOrigin::Model,
        }
    }

    #[test]
    fn test_extraction_prompt_mentions_url_and_invention() {
        let prompt = extraction_prompt("acme.dev");
        assert!(prompt.contains("website: acme.dev."));
        assert!(prompt.contains("If you don't know the specific website"));
        assert!(prompt.contains("5-7 distinct sections"));
    }

    #[test]
    fn test_synthesis_prompt_token_listings() {
        let design = design();
        let prompt = synthesis_prompt(&design, &[]);

        assert!(prompt.contains("Website: Stripe (https://stripe.com)"));
        assert!(prompt.contains("Style: Landing Page"));
        assert!(prompt.contains("- Colors: Primary: #635bff, Ink: #0a2540"));
        assert!(prompt.contains("- Fonts: Sohne (400), Mono (500)"));
        assert!(!prompt.contains("Gradient Hero"));
    }

    #[test]
    fn test_synthesis_prompt_section_format() {
        let design = design();
        let sections: Vec<&Section> = design.sections.iter().collect();
        let prompt = synthesis_prompt(&design, &sections);

        assert!(prompt.contains(
            "- **Gradient Hero** (hero): Headline with animated gradient.\n  *Visual Specs*: Angled mesh gradient, left-aligned copy"
        ));
        assert!(prompt.contains("1. Use React, TypeScript, and Tailwind CSS."));
        assert!(prompt.contains("4. Ensure accessibility compliance."));
    }
}
