use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::career::chat::ChatMessage;
use crate::career::prompts::{
    self, fill_profile, PROFILE_MESSAGE_TEMPLATE, RECOMMENDATIONS_PROMPT_TEMPLATE,
};
use crate::errors::AppError;
use crate::interpret::normalize::CareerRecommendation;
use crate::interpret::ReplyMode;
use crate::llm_client::{ChatBackend, ChatRequest};

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub interests: String,
}

impl RecommendationRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.skills.trim().is_empty() && self.interests.trim().is_empty() {
            return Err(AppError::Validation(
                "Tell us at least one skill or interest".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOutcome {
    pub recommendations: Vec<CareerRecommendation>,
    /// Seed for the follow-up chat about these recommendations.
    pub history: Vec<ChatMessage>,
}

/// Asks the backend for three career paths and interprets the reply.
///
/// Any interpretation failure surfaces as `AppError::Recommendations`; the
/// precise reason and the raw reply only go to the log.
pub async fn request_recommendations(
    chat: &dyn ChatBackend,
    request: &RecommendationRequest,
    max_chars: usize,
) -> Result<RecommendationOutcome, AppError> {
    let skills = request.skills.trim();
    let interests = request.interests.trim();

    let chat_request = ChatRequest {
        message: fill_profile(RECOMMENDATIONS_PROMPT_TEMPLATE, skills, interests),
        system_prompt: Some(prompts::recommendations_system()),
        expect_json: true,
        ..Default::default()
    };

    let reply = chat.chat(&chat_request).await?;

    let interpreted = reply.interpret(ReplyMode::Json, max_chars);
    let recommendations = match interpreted.into_recommendations() {
        Ok(recs) => recs,
        Err(reason) => {
            warn!(%reason, raw = %reply.response, "Recommendations reply could not be interpreted");
            return Err(AppError::Recommendations(reason));
        }
    };

    info!(count = recommendations.len(), "Recommendations ready");

    let summary = serde_json::to_string_pretty(&recommendations).unwrap_or_default();
    let history = vec![
        ChatMessage::user(fill_profile(PROFILE_MESSAGE_TEMPLATE, skills, interests)),
        ChatMessage::ai(format!(
            "Based on your profile, here are some recommendations: {summary}"
        )),
    ];

    Ok(RecommendationOutcome {
        recommendations,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::chat::Sender;
    use crate::interpret::extractor::{ExtractionError, DEFAULT_MAX_CANDIDATE_CHARS};
    use crate::llm_client::ChatReply;
    use crate::test_support::StubChat;
    use serde_json::json;

    const FENCED_REPLY: &str = r#"Sure!
```json
[{"title":"Quant Analyst","description":"Models","key_skills":["Python","Statistics","SQL"]}]
```"#;

    fn request() -> RecommendationRequest {
        RecommendationRequest {
            skills: "Programming, Data Analysis".to_string(),
            interests: "Finance".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fenced_reply_yields_recommendations_and_history() {
        let chat = StubChat::replying(ChatReply {
            response: FENCED_REPLY.to_string(),
            ..Default::default()
        });

        let outcome = request_recommendations(&chat, &request(), DEFAULT_MAX_CANDIDATE_CHARS)
            .await
            .unwrap();

        assert_eq!(outcome.recommendations.len(), 1);
        assert_eq!(outcome.recommendations[0].title, "Quant Analyst");
        assert_eq!(outcome.recommendations[0].key_skills.len(), 3);

        assert_eq!(outcome.history.len(), 2);
        assert_eq!(outcome.history[0].sender, Sender::User);
        assert!(outcome.history[0]
            .text
            .contains("Skills: Programming, Data Analysis"));
        assert_eq!(outcome.history[1].sender, Sender::Ai);
        let seed = "Based on your profile, here are some recommendations: [";
        assert!(outcome.history[1].text.starts_with(seed));

        let sent = chat.last_request().unwrap();
        assert!(sent.expect_json);
        assert!(sent.message.contains("- Interests: Finance"));
    }

    #[tokio::test]
    async fn test_backend_json_field_wins() {
        let chat = StubChat::replying(ChatReply {
            response: "not json".to_string(),
            json: Some(json!([{"title": "Actuary", "key_skills": "n/a"}])),
            ..Default::default()
        });

        let outcome = request_recommendations(&chat, &request(), DEFAULT_MAX_CANDIDATE_CHARS)
            .await
            .unwrap();
        assert_eq!(outcome.recommendations[0].title, "Actuary");
        assert!(outcome.recommendations[0].key_skills.is_empty());
    }

    #[tokio::test]
    async fn test_prose_reply_is_recommendations_error() {
        let chat = StubChat::replying(ChatReply {
            response: "I'd suggest looking into data science.".to_string(),
            ..Default::default()
        });

        let err = request_recommendations(&chat, &request(), DEFAULT_MAX_CANDIDATE_CHARS)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Recommendations(reason) if reason == ExtractionError::NoJsonFound
        ));
    }

    #[tokio::test]
    async fn test_object_reply_is_invalid_shape() {
        let chat = StubChat::replying(ChatReply {
            response: r#"{"title":"Only one"}"#.to_string(),
            ..Default::default()
        });

        let err = request_recommendations(&chat, &request(), DEFAULT_MAX_CANDIDATE_CHARS)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Recommendations(ExtractionError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_request_needs_skills_or_interests() {
        let empty = RecommendationRequest {
            skills: " ".to_string(),
            interests: String::new(),
        };
        assert!(matches!(empty.validate(), Err(AppError::Validation(_))));
        assert!(request().validate().is_ok());
    }
}
