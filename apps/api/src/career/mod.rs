// Career features built on the chat backend: recommendations, the coach chat
// and dashboard insights.

pub mod chat;
pub mod handlers;
pub mod insights;
pub mod prompts;
pub mod recommendations;
