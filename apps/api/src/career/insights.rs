use serde::Serialize;
use tracing::{info, warn};

use crate::career::chat::DEFAULT_CATEGORY;
use crate::career::prompts::INSIGHTS_QUERY;
use crate::interpret::formatter::{format_blocks, DisplayBlock};
use crate::llm_client::{CareerQuery, ChatBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// First insight is high, the next two medium, the rest low.
    fn for_position(position: usize) -> Self {
        match position {
            0 => Priority::High,
            1 | 2 => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerInsight {
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
    pub priority: Priority,
}

impl CareerInsight {
    fn new(title: &str, description: &str, action_items: &[&str], priority: Priority) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            action_items: action_items.iter().map(|s| s.to_string()).collect(),
            priority,
        }
    }
}

/// Where the returned insights came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSource {
    Model,
    Default,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightsResponse {
    pub insights: Vec<CareerInsight>,
    pub source: InsightSource,
}

#[derive(Default)]
struct Draft {
    title: String,
    description: Option<String>,
    action_items: Vec<String>,
}

impl Draft {
    fn is_substantive(&self) -> bool {
        self.description.is_some() || !self.action_items.is_empty()
    }
}

/// Groups formatted blocks into insights. A header opens a new insight, its
/// first paragraph becomes the description and list items become action items.
/// Content before the first header is ignored.
pub fn parse_insights(blocks: &[DisplayBlock]) -> Vec<CareerInsight> {
    let mut drafts: Vec<Draft> = Vec::new();

    for block in blocks {
        match block {
            DisplayBlock::Header { text, .. } => drafts.push(Draft {
                title: text.clone(),
                ..Default::default()
            }),
            DisplayBlock::Paragraph { text } => {
                if let Some(draft) = drafts.last_mut() {
                    draft.description.get_or_insert_with(|| text.clone());
                }
            }
            DisplayBlock::Bullet { text } | DisplayBlock::Numbered { text, .. } => {
                if let Some(draft) = drafts.last_mut() {
                    draft.action_items.push(text.clone());
                }
            }
        }
    }

    drafts
        .into_iter()
        .filter(Draft::is_substantive)
        .enumerate()
        .map(|(position, draft)| CareerInsight {
            title: draft.title,
            description: draft.description.unwrap_or_default(),
            action_items: draft.action_items,
            priority: Priority::for_position(position),
        })
        .collect()
}

pub fn default_insights() -> Vec<CareerInsight> {
    vec![
        CareerInsight::new(
            "Professional Development",
            "Focus on continuous learning and skill enhancement.",
            &[
                "Identify skill gaps",
                "Enroll in relevant courses",
                "Seek mentorship opportunities",
            ],
            Priority::High,
        ),
        CareerInsight::new(
            "Network Building",
            "Expand your professional network for career opportunities.",
            &[
                "Join industry groups",
                "Attend networking events",
                "Connect with professionals on LinkedIn",
            ],
            Priority::Medium,
        ),
        CareerInsight::new(
            "Career Planning",
            "Set clear career goals and create a roadmap.",
            &[
                "Define short and long-term goals",
                "Create a career timeline",
                "Regular progress reviews",
            ],
            Priority::Medium,
        ),
        CareerInsight::new(
            "Personal Branding",
            "Build a strong professional presence online and offline.",
            &[
                "Update LinkedIn profile",
                "Create a portfolio",
                "Share industry insights",
            ],
            Priority::Low,
        ),
    ]
}

pub fn fallback_insights() -> Vec<CareerInsight> {
    vec![
        CareerInsight::new(
            "Complete Your Profile",
            "A complete profile helps us provide better career recommendations.",
            &[
                "Add your skills and interests",
                "Update your career goals",
                "Specify your work preferences",
            ],
            Priority::High,
        ),
        CareerInsight::new(
            "Skill Development",
            "Stay competitive by continuously learning new skills.",
            &[
                "Identify in-demand skills in your field",
                "Take online courses",
                "Practice with real projects",
            ],
            Priority::Medium,
        ),
    ]
}

/// Asks the profile-aware endpoint for dashboard insights. Never fails: a
/// backend error yields the fallback set, an unusable reply the default set.
pub async fn generate_insights(chat: &dyn ChatBackend, token: &str) -> InsightsResponse {
    let query = CareerQuery {
        query: INSIGHTS_QUERY.to_string(),
        category: DEFAULT_CATEGORY.to_string(),
    };

    let reply = match chat.career_query(&query, token).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Insights request failed, using fallback insights: {e}");
            return InsightsResponse {
                insights: fallback_insights(),
                source: InsightSource::Fallback,
            };
        }
    };

    let insights = parse_insights(&format_blocks(&reply.response));
    if insights.is_empty() {
        info!("Insights reply had no usable sections, using defaults");
        return InsightsResponse {
            insights: default_insights(),
            source: InsightSource::Default,
        };
    }

    InsightsResponse {
        insights,
        source: InsightSource::Model,
    }
}
