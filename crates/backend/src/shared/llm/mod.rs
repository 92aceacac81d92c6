pub mod insights;
pub mod openai_provider;
pub mod types;

pub use insights::{build_prompt, summarize, InsightGenerator};
pub use types::*;
