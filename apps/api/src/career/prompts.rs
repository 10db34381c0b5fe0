// Prompt constants for the career features.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, MARKDOWN_SUBSET_INSTRUCTION};

/// Recommendations prompt. Replace `{skills}` and `{interests}` before sending.
pub const RECOMMENDATIONS_PROMPT_TEMPLATE: &str = "Based on the following user profile, \
recommend 3 career paths. For each path, provide a \"title\", a \"description\", \
and an array of 3 \"key_skills\". Return ONLY valid JSON (array of objects) with no extra text.
User Profile:
- Skills: {skills}
- Interests: {interests}";

/// Seeds the follow-up chat. Same placeholders as the prompt.
pub const PROFILE_MESSAGE_TEMPLATE: &str =
    "Here is my profile for career recommendations:\nSkills: {skills}\nInterests: {interests}";

const RECOMMENDATIONS_SHAPE: &str =
    "The JSON must be an array of objects with keys: title, description, key_skills.";

pub fn recommendations_system() -> String {
    format!("{JSON_ONLY_SYSTEM} {RECOMMENDATIONS_SHAPE}")
}

pub fn fill_profile(template: &str, skills: &str, interests: &str) -> String {
    template
        .replace("{skills}", skills)
        .replace("{interests}", interests)
}

/// Coach system prompt for anonymous chat. Replace `{focus}` before sending.
pub const COACH_SYSTEM_TEMPLATE: &str = "You are Careerion AI, providing comprehensive \
career guidance. Focus on: {focus}. Provide detailed, actionable advice with specific \
steps, resources, and recommendations.";

pub fn coach_system(focus: &str) -> String {
    format!(
        "{} {MARKDOWN_SUBSET_INSTRUCTION}",
        COACH_SYSTEM_TEMPLATE.replace("{focus}", focus)
    )
}

/// Dashboard insights query sent to the profile-aware endpoint.
pub const INSIGHTS_QUERY: &str = "Generate 4 personalized career insights and action items \
based on my profile. Focus on immediate actionable steps I can take to advance my career. \
Give each insight a ### heading, one short paragraph, then a bullet list of action items.";
