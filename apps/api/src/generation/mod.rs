//! Freeform generation paths: full resume drafting, cold emails, and job
//! suggestions. All are single-shot prose completions — no structured-JSON
//! expectation and no local fallback, so provider failures surface as
//! `AppError::Provider`.

use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::prompts::{build_job_suggestions_prompt, build_resume_prompt};
use crate::llm_client::gateway::CompletionGateway;
use crate::llm_client::GenerationOptions;

pub mod handlers;
pub mod prompts;

/// Structured candidate data for resume generation, as submitted by the
/// builder UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub job_role: String,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
    #[serde(default)]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: String,
}

/// Generates ATS-optimized resume prose from structured candidate data.
pub async fn generate_resume(
    gateway: &CompletionGateway,
    draft: &ResumeDraft,
) -> Result<String, AppError> {
    let prompt = build_resume_prompt(draft);
    complete_freeform(gateway, &prompt).await
}

/// Personalized job recommendations and career guidance from resume text.
pub async fn job_suggestions(
    gateway: &CompletionGateway,
    resume_text: &str,
    target_role: Option<&str>,
) -> Result<String, AppError> {
    let prompt = build_job_suggestions_prompt(resume_text, target_role);
    complete_freeform(gateway, &prompt).await
}

/// Single-shot passthrough completion (cold emails and other caller-built
/// prompts).
pub async fn complete_freeform(
    gateway: &CompletionGateway,
    prompt: &str,
) -> Result<String, AppError> {
    gateway
        .complete(prompt, &GenerationOptions::default())
        .await
        .map_err(|e| AppError::Provider(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_draft_deserializes_with_optional_fields_absent() {
        let json = r#"{
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "phone": "555-123-4567",
            "jobRole": "Software Developer"
        }"#;
        let draft: ResumeDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.full_name, "Jane Doe");
        assert!(draft.skills.is_empty());
        assert!(draft.linkedin.is_none());
    }

    #[test]
    fn test_resume_draft_full_shape() {
        let json = r#"{
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "phone": "555-123-4567",
            "jobRole": "Software Developer",
            "linkedin": "linkedin.com/in/jane",
            "skills": ["Rust", "SQL"],
            "education": [{"degree": "BSc CS", "institution": "State University", "year": "2020", "gpa": "3.8"}],
            "experience": [{"role": "Engineer", "company": "Acme", "duration": "2020-2024", "description": "Built services"}],
            "projects": [{"name": "Tool", "description": "CLI tool", "technologies": "Rust"}]
        }"#;
        let draft: ResumeDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.education[0].gpa.as_deref(), Some("3.8"));
        assert_eq!(draft.experience[0].company, "Acme");
        assert_eq!(draft.projects[0].technologies, "Rust");
    }
}
