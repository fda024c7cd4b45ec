//! Prompt construction for stamp image generation.
//!
//! Pure text assembly: a fixed art-direction instruction plus one
//! theme-specific instruction. Callers guarantee a non-empty theme.

/// Fixed art-direction rules sent with every generation.
fn system_instruction() -> &'static str {
    r#"You are an AI IMAGE GENERATION SYSTEM for "Stamps for Tomorrow".
OUTPUT OBJECTIVE: Generate a high-quality POSTAGE STAMP IMAGE.

STAMP FORMAT - ABSOLUTE RULES:
- Clearly be a postage stamp with a perforated border frame.
- Contain ONLY the stamp (centered).
- Background outside the stamp MUST be plain white.
- Style: Colorful vector illustration, bold rounded shapes, vibrant and playful.
- Theme: UAE Culture and Future. Use authentic heritage (camels, forts, falcons, ghaf trees) mixed with optimistic, futuristic visions (clean energy, space exploration, green cities).
- Audience: Families and children (ages 5-14).
- TONE: Warm, optimistic, inspiring, and clean.
- NO text, letters, or numbers inside the stamp image.
- NO logos or UI elements.
- HIGH CONTRAST and readable at small sizes."#
}

/// The two text parts sent to the image model for one generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StampPrompt {
    /// Style and constraint rules, identical for every request.
    pub system_instruction: &'static str,
    /// Instruction carrying the user's theme.
    pub theme_instruction: String,
}

impl StampPrompt {
    /// Builds the request text for a theme.
    pub fn new(theme: &str) -> Self {
        let theme_instruction = format!(
            "Theme: {theme}. Create a beautiful, modern, vector-style UAE postage stamp. \
             It should look like a collector's item with rich colors and playful shapes. \
             Focus on high clarity."
        );
        Self {
            system_instruction: system_instruction(),
            theme_instruction,
        }
    }
}
