//! Thesis-assistance generation: prompt templating, the rule-based method
//! table, the rate-limit fallback policy, and the per-task flows.

pub mod fallback;
pub mod handlers;
pub mod prompts;
pub mod rules;
pub mod tasks;
