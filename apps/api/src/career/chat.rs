use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::interpret::formatter::{format_blocks, DisplayBlock};
use crate::interpret::{InterpretedReply, ReplyMode};
use crate::llm_client::{CareerQuery, ChatBackend, ChatRequest, HistoryPart, HistoryTurn};

pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CareerCategory {
    pub id: &'static str,
    pub label: &'static str,
}

pub static CATEGORIES: [CareerCategory; 8] = [
    CareerCategory {
        id: "general",
        label: "General Career Guidance",
    },
    CareerCategory {
        id: "skills",
        label: "Skills Development",
    },
    CareerCategory {
        id: "transition",
        label: "Career Transition",
    },
    CareerCategory {
        id: "interview",
        label: "Interview Preparation",
    },
    CareerCategory {
        id: "salary",
        label: "Salary & Negotiation",
    },
    CareerCategory {
        id: "networking",
        label: "Professional Networking",
    },
    CareerCategory {
        id: "industry",
        label: "Industry Insights",
    },
    CareerCategory {
        id: "education",
        label: "Education & Certifications",
    },
];

/// A canned opening question the chat offers before the first message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickStart {
    pub category: &'static str,
    pub title: &'static str,
    pub question: &'static str,
}

pub static QUICK_STARTS: [QuickStart; 4] = [
    QuickStart {
        category: "general",
        title: "Complete Career Assessment",
        question: "I need comprehensive career guidance. Can you help me explore my options \
            and create a career development plan?",
    },
    QuickStart {
        category: "skills",
        title: "Skills Development Roadmap",
        question: "What are the most in-demand skills in 2024, and how can I develop them \
            to advance my career?",
    },
    QuickStart {
        category: "transition",
        title: "Career Change Strategy",
        question: "I want to change careers but don't know where to start. Can you provide \
            a detailed transition strategy?",
    },
    QuickStart {
        category: "salary",
        title: "Salary Optimization Guide",
        question: "How can I research salary ranges for my role and negotiate better \
            compensation?",
    },
];

pub fn find_category(id: &str) -> Option<&'static CareerCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into())
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, text.into())
    }

    fn new(sender: Sender, text: String) -> Self {
        Self {
            sender,
            text,
            timestamp: Utc::now(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Backend history turn. The backend calls the assistant "model".
    pub fn to_history_turn(&self) -> HistoryTurn {
        let role = match self.sender {
            Sender::User => "user",
            Sender::Ai => "model",
        };
        HistoryTurn {
            role: role.to_string(),
            parts: vec![HistoryPart {
                text: self.text.clone(),
            }],
        }
    }
}

/// Coach system prompt focused on the category's label; unknown ids fall back
/// to general advice.
pub fn coach_system_prompt(category: Option<&str>) -> String {
    let focus = category
        .and_then(find_category)
        .map(|c| c.label)
        .unwrap_or("general career advice");
    crate::career::prompts::coach_system(focus)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurnRequest {
    pub message: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurnResponse {
    pub reply: ChatMessage,
    pub blocks: Vec<DisplayBlock>,
}

/// Sends one coach turn. Signed-in users go through the profile-aware endpoint;
/// anonymous users send their history along with a coach system prompt.
pub async fn send_chat_turn(
    chat: &dyn ChatBackend,
    bearer: Option<&str>,
    request: &ChatTurnRequest,
    max_chars: usize,
) -> Result<ChatTurnResponse, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let category = request.category.as_deref();
    let category = category.filter(|c| !c.trim().is_empty());

    let (reply, category) = match bearer {
        Some(token) => {
            let query = CareerQuery {
                query: message.to_string(),
                category: category.unwrap_or(DEFAULT_CATEGORY).to_string(),
            };
            let reply = chat.career_query(&query, token).await?;
            let category = reply.category.clone().or(Some(query.category));
            (reply, category)
        }
        None => {
            let chat_request = ChatRequest {
                message: message.to_string(),
                history: request
                    .history
                    .iter()
                    .map(ChatMessage::to_history_turn)
                    .collect(),
                system_prompt: Some(coach_system_prompt(category)),
                expect_json: false,
            };
            let reply = chat.chat(&chat_request).await?;
            (reply, category.map(str::to_string))
        }
    };

    let text = match reply.interpret(ReplyMode::Prose, max_chars) {
        InterpretedReply::Prose(text) => text,
        _ => return Err(AppError::EmptyReply),
    };

    let blocks = format_blocks(&text);
    debug!(
        blocks = blocks.len(),
        authenticated = bearer.is_some(),
        "Coach reply formatted"
    );

    Ok(ChatTurnResponse {
        reply: ChatMessage::ai(text).with_category(category),
        blocks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::extractor::DEFAULT_MAX_CANDIDATE_CHARS;
    use crate::llm_client::ChatReply;
    use crate::test_support::StubChat;

    const MAX: usize = DEFAULT_MAX_CANDIDATE_CHARS;

    fn turn(message: &str, category: Option<&str>) -> ChatTurnRequest {
        ChatTurnRequest {
            message: message.to_string(),
            category: category.map(str::to_string),
            history: vec![
                ChatMessage::user("How do I start?"),
                ChatMessage::ai("Pick a direction."),
            ],
        }
    }

    fn prose(text: &str) -> StubChat {
        StubChat::replying(ChatReply {
            response: text.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_eight_categories_with_unique_ids() {
        let mut ids: Vec<_> = CATEGORIES.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        let salary = find_category("salary").unwrap();
        assert_eq!(salary.label, "Salary & Negotiation");
        assert!(find_category("astrology").is_none());
    }

    #[test]
    fn test_quick_starts_use_known_categories() {
        assert_eq!(QUICK_STARTS.len(), 4);
        for quick_start in &QUICK_STARTS {
            assert!(find_category(quick_start.category).is_some());
            assert!(quick_start.question.ends_with('?'));
            assert!(!quick_start.question.contains("  "));
        }
    }

    #[test]
    fn test_history_turn_roles() {
        assert_eq!(ChatMessage::user("q").to_history_turn().role, "user");
        let turn = ChatMessage::ai("a").to_history_turn();
        assert_eq!(turn.role, "model");
        assert_eq!(turn.parts[0].text, "a");
    }

    #[test]
    fn test_coach_prompt_uses_label_or_default() {
        let focused = coach_system_prompt(Some("interview"));
        assert!(focused.contains("Focus on: Interview Preparation."));

        let general = "Focus on: general career advice.";
        assert!(coach_system_prompt(Some("unknown")).contains(general));
        assert!(coach_system_prompt(None).contains(general));
    }

    #[test]
    fn test_message_deserializes_without_timestamp() {
        let msg: ChatMessage = serde_json::from_str(r#"{"sender":"ai","text":"hi"}"#).unwrap();
        assert_eq!(msg.sender, Sender::Ai);
        assert!(msg.category.is_none());
    }

    #[tokio::test]
    async fn test_anonymous_turn_sends_history_and_system_prompt() {
        let chat = prose("## Plan\n- Learn **SQL**");

        let request = turn("Next steps?", Some("skills"));
        let response = send_chat_turn(&chat, None, &request, MAX).await.unwrap();

        let sent = chat.last_request().unwrap();
        assert_eq!(sent.history.len(), 2);
        assert_eq!(sent.history[1].role, "model");
        assert!(sent.system_prompt.unwrap().contains("Skills Development"));
        assert!(chat.last_query().is_none());

        assert_eq!(response.reply.sender, Sender::Ai);
        assert_eq!(response.reply.category.as_deref(), Some("skills"));
        assert_eq!(
            response.blocks,
            vec![
                DisplayBlock::Header {
                    text: "Plan".into(),
                    level: 2,
                },
                DisplayBlock::Bullet {
                    text: "Learn SQL".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_signed_in_turn_uses_career_query() {
        let chat = StubChat::replying(ChatReply {
            response: "Negotiate with data.".to_string(),
            category: Some("salary".to_string()),
            ..Default::default()
        });

        let request = turn("Raise?", None);
        let response = send_chat_turn(&chat, Some("tok"), &request, MAX)
            .await
            .unwrap();

        let (query, token) = chat.last_query().unwrap();
        assert_eq!(query.category, DEFAULT_CATEGORY);
        assert_eq!(query.query, "Raise?");
        assert_eq!(token, "tok");
        assert!(chat.last_request().is_none());
        assert_eq!(response.reply.category.as_deref(), Some("salary"));
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let chat = prose("unused");
        let err = send_chat_turn(&chat, None, &turn("   ", None), MAX)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(chat.last_request().is_none());
    }

    #[tokio::test]
    async fn test_blank_reply_is_empty_reply_error() {
        let chat = prose("  \n ");
        let err = send_chat_turn(&chat, None, &turn("Hello", None), MAX)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyReply));
    }
}
