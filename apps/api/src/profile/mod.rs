// Profile intake: the four-step form, its validation, and remote storage.

pub mod handlers;
pub mod models;
pub mod store;
pub mod validation;
