//! Structured-output schema for design extraction

use inference::ResponseSchema;

use crate::types::SectionType;

/// Schema the model's extraction reply must follow
pub fn design_schema() -> ResponseSchema {
    let section_types: Vec<&str> = SectionType::ALL.iter().map(SectionType::as_str).collect();

    let color = ResponseSchema::object()
        .property("hex", ResponseSchema::string())
        .property(
            "name",
            ResponseSchema::string().describe("Semantic name (e.g., Primary, Background)"),
        );

    let font = ResponseSchema::object()
        .property("name", ResponseSchema::string())
        .property("weight", ResponseSchema::string());

    let section = ResponseSchema::object()
        .property("id", ResponseSchema::string())
        .property("title", ResponseSchema::string())
        .property("type", ResponseSchema::enumeration(&section_types))
        .property(
            "description",
            ResponseSchema::string().describe("Brief purpose of the section"),
        )
        .property(
            "visualDetail",
            ResponseSchema::string().describe(
                "Detailed visual description for an AI to recreate it (padding, alignment, shadows)",
            ),
        );

    ResponseSchema::object()
        .property(
            "name",
            ResponseSchema::string().describe("Name of the website/brand"),
        )
        .property(
            "layoutType",
            ResponseSchema::string()
                .describe("General layout style (e.g., Single Column, Dashboard, Landing Page)"),
        )
        .property("colors", ResponseSchema::array(color))
        .property("fonts", ResponseSchema::array(font))
        .property("sections", ResponseSchema::array(section))
        .required(&["name", "colors", "fonts", "sections", "layoutType"])
}
