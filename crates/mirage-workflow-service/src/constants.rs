//! Fixed strings shown to the user

/// Messages surfaced by the workflow
pub mod messages {
    /// Blocking alert after a failed analysis
    pub const ANALYZE_FAILED: &str = "Failed to analyze. Please check the URL and try again.";

    /// Blocking alert after a failed synthesis. Also the stored text when the
    /// model replied with nothing.
    pub const GENERATE_FAILED: &str = "Failed to generate prompt.";

    /// Stored text when the synthesis request itself failed
    pub const GENERATE_ERROR: &str = "Error generating prompt. Please check your API key.";
}

/// Request tuning
pub mod requests {
    /// Thinking tokens granted to design extraction
    pub const EXTRACTION_THINKING_BUDGET: u32 = inference::constants::defaults::THINKING_BUDGET;
}
