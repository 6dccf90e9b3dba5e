//! AI-assisted resume analysis pipeline.
//!
//! Data flows one way: raw text → sanitizer → orchestrator → (gateway ⇄
//! provider) → extractor → merged with the heuristic scorer → result.

pub mod extractor;
pub mod handlers;
pub mod heuristics;
pub mod keywords;
pub mod orchestrator;
pub mod prompts;
pub mod sanitize;
