//! Job-chat interaction: keyword-gated chat endpoint, listing shaping,
//! and the progressive reveal queue.

pub mod handlers;
pub mod listing;
pub mod prompts;
pub mod reveal;
