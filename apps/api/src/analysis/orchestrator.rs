//! Analysis orchestrator — composes sanitizer, prompts, gateway, extractor,
//! and the heuristic scorer into the three analysis operations.
//!
//! Failure policy: only `Validation` (input too short) reaches the caller.
//! Provider exhaustion and malformed output are absorbed into heuristic
//! results — resume analysis is advisory, so callers always get something
//! usable. The one exception is the gap-analysis path, which yields an empty
//! result on failure (kept as-is; see DESIGN.md).

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::analysis::extractor::extract_json;
use crate::analysis::heuristics::{self, SCORE_CEILING, SCORE_FLOOR};
use crate::analysis::keywords::keywords_for;
use crate::analysis::prompts::{build_analysis_prompt, build_gap_prompt, build_realtime_prompt};
use crate::analysis::sanitize::sanitize_checked;
use crate::errors::AppError;
use crate::llm_client::gateway::CompletionGateway;
use crate::llm_client::GenerationOptions;

/// Length bounds per endpoint. Caps are silent truncation; minimums are the
/// one hard validation in the pipeline.
const FULL_MAX_CHARS: usize = 40_000;
const FULL_MIN_CHARS: usize = 200;
const REALTIME_MAX_CHARS: usize = 15_000;
const REALTIME_MIN_CHARS: usize = 100;
const JOB_DESCRIPTION_MAX_CHARS: usize = 10_000;

/// Accepted scores are perturbed by a uniform draw from `[-3, 3]` before
/// re-clamping. Intentional: the number is advisory, not exact, and the
/// jitter keeps callers from treating it as reproducible.
const SCORE_JITTER: i64 = 3;

// ────────────────────────────────────────────────────────────────────────────
// Result types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub ats_score: u32,
    pub missing_keywords: Vec<String>,
    pub format_suggestions: Vec<String>,
    pub improvements: Vec<String>,
    pub matching_job_roles: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RealtimeAnalysisResult {
    pub keyword_match_score: u32,
    pub found_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub readability_score: u32,
    pub structure_analysis: BTreeMap<String, bool>,
    pub formatting_issues: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobDescriptionAnalysis {
    pub required_keywords: Vec<String>,
    pub missing_from_resume: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub keyword_insertions: Vec<KeywordInsertion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeywordInsertion {
    pub keyword: String,
    pub suggestion: String,
    pub section: String,
}

/// Validating shape for the provider's full-analysis response. Every field
/// is untrusted: arrays default to empty, the score is checked separately.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProviderAnalysis {
    ats_score: Option<Value>,
    missing_keywords: Vec<String>,
    format_suggestions: Vec<String>,
    improvements: Vec<String>,
    matching_job_roles: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Full analysis
// ────────────────────────────────────────────────────────────────────────────

/// Full ATS analysis: sanitize → rubric prompt → gateway → extract →
/// validate against the heuristic fallback. Never fails for provider
/// reasons; the heuristic score computed up front guarantees a result.
pub async fn analyze(
    gateway: &CompletionGateway,
    raw_text: &str,
    job_role: Option<&str>,
) -> Result<AnalysisResult, AppError> {
    let text = sanitize_checked(raw_text, FULL_MAX_CHARS, FULL_MIN_CHARS)?;

    // Computed unconditionally so it is available however the call fails.
    let fallback_score = heuristics::ats_score(&text);

    let prompt = build_analysis_prompt(&text, job_role);
    let extracted = match gateway
        .complete(&prompt, &GenerationOptions::scoring())
        .await
    {
        Ok(raw) => extract_json(&raw),
        Err(e) => {
            warn!("analysis completion failed, falling back to heuristic score: {e}");
            None
        }
    };

    let parsed =
        extracted.and_then(|value| serde_json::from_value::<ProviderAnalysis>(value).ok());

    let result = match parsed {
        Some(provider) => {
            let accepted = validate_ats_score(provider.ats_score.as_ref(), fallback_score);
            AnalysisResult {
                ats_score: jitter_score(accepted),
                missing_keywords: provider.missing_keywords,
                format_suggestions: provider.format_suggestions,
                improvements: provider.improvements,
                matching_job_roles: provider.matching_job_roles,
            }
        }
        None => synthesized_analysis(fallback_score),
    };

    Ok(result)
}

/// Field-level validation: missing, non-numeric, or out-of-range scores are
/// replaced by the heuristic fallback.
fn validate_ats_score(raw: Option<&Value>, fallback: u32) -> u32 {
    match raw.and_then(Value::as_f64) {
        Some(score) if (SCORE_FLOOR as f64..=SCORE_CEILING as f64).contains(&score) => {
            score.round() as u32
        }
        _ => fallback,
    }
}

fn jitter_score(score: u32) -> u32 {
    let jitter = rand::thread_rng().gen_range(-SCORE_JITTER..=SCORE_JITTER);
    (score as i64 + jitter).clamp(SCORE_FLOOR as i64, SCORE_CEILING as i64) as u32
}

/// Minimal result assembled when no parseable object came back. Generic,
/// non-personalized suggestions around the heuristic score.
fn synthesized_analysis(fallback_score: u32) -> AnalysisResult {
    AnalysisResult {
        ats_score: fallback_score,
        missing_keywords: vec!["Technical skills".to_string(), "Action verbs".to_string()],
        format_suggestions: vec![
            "Use standard headers".to_string(),
            "Add quantifiable results".to_string(),
        ],
        improvements: vec![
            "Include metrics".to_string(),
            "Add professional summary".to_string(),
        ],
        matching_job_roles: vec!["Entry Level Professional".to_string()],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Real-time analysis
// ────────────────────────────────────────────────────────────────────────────

/// Lightweight analysis for as-you-type feedback: smaller caps, smaller
/// output budget, and a keyword-intersection fallback instead of the full
/// heuristic scorer.
pub async fn analyze_realtime(
    gateway: &CompletionGateway,
    raw_text: &str,
    job_role: Option<&str>,
) -> Result<RealtimeAnalysisResult, AppError> {
    let text = sanitize_checked(raw_text, REALTIME_MAX_CHARS, REALTIME_MIN_CHARS)?;
    let expected = keywords_for(job_role);

    let prompt = build_realtime_prompt(&text, job_role, expected);
    let extracted = match gateway
        .complete(&prompt, &GenerationOptions::realtime())
        .await
    {
        Ok(raw) => extract_json(&raw),
        Err(e) => {
            warn!("realtime completion failed, falling back to keyword match: {e}");
            None
        }
    };

    let parsed = extracted
        .and_then(|value| serde_json::from_value::<RealtimeAnalysisResult>(value).ok());

    Ok(parsed.unwrap_or_else(|| realtime_fallback(&text, expected)))
}

/// Deterministic realtime fallback: catalog keywords intersected against the
/// sanitized text by case-insensitive substring match.
fn realtime_fallback(text: &str, expected: &[&str]) -> RealtimeAnalysisResult {
    let lower = text.to_lowercase();
    let (found, missing): (Vec<&str>, Vec<&str>) = expected
        .iter()
        .copied()
        .partition(|keyword| lower.contains(&keyword.to_lowercase()));

    let keyword_match_score = if expected.is_empty() {
        0
    } else {
        ((found.len() as f64 / expected.len() as f64) * 100.0).round() as u32
    };

    let word_count = text.split_whitespace().count();
    // Coarse three-bucket readability with an asymmetric 85 ceiling.
    let readability_score = (if word_count > 300 { 75 } else { 60 }).clamp(40, 85);

    RealtimeAnalysisResult {
        keyword_match_score,
        found_keywords: found.into_iter().map(String::from).collect(),
        missing_keywords: missing.into_iter().map(String::from).collect(),
        readability_score,
        structure_analysis: heuristics::structure_flags(text)
            .into_iter()
            .map(|(section, present)| (section.to_string(), present))
            .collect(),
        formatting_issues: vec![],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job-description gap analysis
// ────────────────────────────────────────────────────────────────────────────

/// Resume-vs-JD gap analysis. `None` means no parseable object came back;
/// the handler serializes it as `{}`. No heuristic fallback exists for this
/// path — preserved as-is pending a product decision (DESIGN.md).
pub async fn analyze_gap(
    gateway: &CompletionGateway,
    resume_text: &str,
    job_description: &str,
) -> Result<Option<JobDescriptionAnalysis>, AppError> {
    let resume = sanitize_checked(resume_text, REALTIME_MAX_CHARS, REALTIME_MIN_CHARS)?;
    let jd = sanitize_checked(job_description, JOB_DESCRIPTION_MAX_CHARS, REALTIME_MIN_CHARS)?;

    let prompt = build_gap_prompt(&resume, &jd);
    let extracted = match gateway
        .complete(&prompt, &GenerationOptions::gap_analysis())
        .await
    {
        Ok(raw) => extract_json(&raw),
        Err(e) => {
            warn!("gap analysis completion failed, returning empty result: {e}");
            None
        }
    };

    Ok(extracted
        .and_then(|value| serde_json::from_value::<JobDescriptionAnalysis>(value).ok()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::{CompletionBackend, ProviderError};

    struct StaticBackend(String);

    #[async_trait]
    impl CompletionBackend for StaticBackend {
        async fn complete(
            &self,
            _prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<String, ProviderError> {
            Ok(self.0.clone())
        }
    }

    struct RateLimitedBackend;

    #[async_trait]
    impl CompletionBackend for RateLimitedBackend {
        async fn complete(
            &self,
            _prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<String, ProviderError> {
            Err(ProviderError::Api {
                status: 429,
                message: "Resource has been exhausted".to_string(),
            })
        }
    }

    fn gateway_returning(text: &str) -> CompletionGateway {
        CompletionGateway::new(Arc::new(StaticBackend(text.to_string())))
    }

    fn failing_gateway() -> CompletionGateway {
        CompletionGateway::new(Arc::new(RateLimitedBackend))
    }

    fn sample_resume() -> String {
        "Jane Doe jane@example.com 555-123-4567 linkedin.com/in/janedoe. \
         Professional Summary: data analyst with sql, python and tableau experience. \
         Work Experience: improved reporting pipelines, increased dashboard adoption by 40%. \
         Education: BSc Statistics, State University. Skills: sql, python, excel, statistics."
            .to_string()
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_never_fails_when_provider_always_fails() {
        let gateway = failing_gateway();
        let resume = sample_resume();
        let result = analyze(&gateway, &resume, Some("Data Analyst"))
            .await
            .expect("provider outage must not surface as an error");

        let expected = heuristics::ats_score(&crate::analysis::sanitize::sanitize(&resume, 40_000));
        assert_eq!(result.ats_score, expected);
        assert_eq!(
            result.missing_keywords,
            vec!["Technical skills".to_string(), "Action verbs".to_string()]
        );
        assert_eq!(
            result.matching_job_roles,
            vec!["Entry Level Professional".to_string()]
        );
    }

    #[tokio::test]
    async fn test_analyze_short_text_is_validation_error() {
        let gateway = gateway_returning(r#"{"atsScore": 70}"#);
        let result = analyze(&gateway, "way too short", None).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_analyze_valid_model_score_stays_in_jitter_band() {
        let gateway = gateway_returning(
            r#"Here you go: {"atsScore": 70, "missingKeywords": ["SQL"], "improvements": []}"#,
        );
        let resume = sample_resume();
        for _ in 0..20 {
            let result = analyze(&gateway, &resume, None).await.unwrap();
            assert!(
                (67..=73).contains(&result.ats_score),
                "score {} outside jitter band",
                result.ats_score
            );
        }
    }

    #[tokio::test]
    async fn test_analyze_non_numeric_score_uses_fallback() {
        let gateway = gateway_returning(r#"{"atsScore": "excellent"}"#);
        let resume = sample_resume();
        let fallback =
            heuristics::ats_score(&crate::analysis::sanitize::sanitize(&resume, 40_000));

        let result = analyze(&gateway, &resume, None).await.unwrap();
        let band = fallback.saturating_sub(3)..=(fallback + 3).min(100);
        assert!(band.contains(&result.ats_score));
    }

    #[tokio::test]
    async fn test_analyze_out_of_range_score_uses_fallback() {
        let gateway = gateway_returning(r#"{"atsScore": 150}"#);
        let resume = sample_resume();
        let fallback =
            heuristics::ats_score(&crate::analysis::sanitize::sanitize(&resume, 40_000));

        let result = analyze(&gateway, &resume, None).await.unwrap();
        let band = fallback.saturating_sub(3)..=(fallback + 3).min(100);
        assert!(band.contains(&result.ats_score));
    }

    #[tokio::test]
    async fn test_analyze_carries_provider_arrays_through() {
        let gateway = gateway_returning(
            r#"{"atsScore": 55, "missingKeywords": ["Kubernetes"], "formatSuggestions": ["Shorter bullets"], "improvements": ["Quantify impact"], "matchingJobRoles": ["SRE"]}"#,
        );
        let result = analyze(&gateway, &sample_resume(), None).await.unwrap();
        assert_eq!(result.missing_keywords, vec!["Kubernetes".to_string()]);
        assert_eq!(result.matching_job_roles, vec!["SRE".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_fallback_intersects_catalog_keywords() {
        let gateway = failing_gateway();
        let resume = sample_resume();
        let result = analyze_realtime(&gateway, &resume, Some("Data Analyst"))
            .await
            .unwrap();

        assert!(result.found_keywords.contains(&"SQL".to_string()));
        assert!(result.found_keywords.contains(&"Python".to_string()));
        assert!(result
            .missing_keywords
            .contains(&"Data Visualization".to_string()));

        // 6 of 9 catalog keywords present: SQL, Python, Excel, Tableau,
        // Statistics, Reporting → round(100 * 6/9) = 67
        assert_eq!(result.keyword_match_score, 67);
        assert!(result.structure_analysis["Work Experience"]);
        assert!(result.formatting_issues.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_readability_buckets() {
        let gateway = failing_gateway();
        let short = format!("skills experience education {}", "word ".repeat(60));
        let result = analyze_realtime(&gateway, &short, None).await.unwrap();
        assert_eq!(result.readability_score, 60);

        let long = format!("skills experience education {}", "word ".repeat(400));
        let result = analyze_realtime(&gateway, &long, None).await.unwrap();
        assert_eq!(result.readability_score, 75);
    }

    #[tokio::test]
    async fn test_realtime_accepts_shorter_text_than_full_analysis() {
        // 100..200 chars: full analysis rejects, realtime proceeds.
        let text = "experienced developer with python and react, shipped dashboards \
                    and apis, strong sql background overall";
        assert!(text.len() >= 100 && text.len() < 200);

        let gateway = gateway_returning("no json here");
        let full = analyze(&gateway, text, None).await;
        assert!(matches!(full, Err(AppError::Validation(_))));

        let realtime = analyze_realtime(&gateway, text, None).await;
        assert!(realtime.is_ok());
    }

    #[tokio::test]
    async fn test_realtime_parses_provider_result() {
        let gateway = gateway_returning(
            r#"{"keywordMatchScore": 80, "foundKeywords": ["SQL"], "missingKeywords": [], "readabilityScore": 70, "structureAnalysis": {"Skills": true}, "formattingIssues": ["Dense paragraphs"]}"#,
        );
        let result = analyze_realtime(&gateway, &sample_resume(), Some("Data Analyst"))
            .await
            .unwrap();
        assert_eq!(result.keyword_match_score, 80);
        assert_eq!(result.formatting_issues, vec!["Dense paragraphs".to_string()]);
    }

    #[tokio::test]
    async fn test_gap_analysis_returns_parsed_object() {
        let gateway = gateway_returning(
            r#"{"requiredKeywords": ["Rust"], "missingFromResume": ["Rust"], "recommendedSkills": [], "keywordInsertions": [{"keyword": "Rust", "suggestion": "Built services in Rust", "section": "Skills"}]}"#,
        );
        let resume = sample_resume();
        let jd = format!("We need a systems engineer. {}", sample_resume());
        let result = analyze_gap(&gateway, &resume, &jd).await.unwrap().unwrap();
        assert_eq!(result.required_keywords, vec!["Rust".to_string()]);
        assert_eq!(result.keyword_insertions[0].section, "Skills");
    }

    #[tokio::test]
    async fn test_gap_analysis_empty_on_unparseable_output() {
        let gateway = gateway_returning("I could not produce JSON, sorry.");
        let resume = sample_resume();
        let result = analyze_gap(&gateway, &resume, &resume).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_gap_analysis_empty_on_provider_outage() {
        let gateway = failing_gateway();
        let resume = sample_resume();
        let result = analyze_gap(&gateway, &resume, &resume).await.unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_validate_ats_score_accepts_in_range() {
        let value = serde_json::json!(70);
        assert_eq!(validate_ats_score(Some(&value), 30), 70);
    }

    #[test]
    fn test_validate_ats_score_rejects_below_floor() {
        let value = serde_json::json!(10);
        assert_eq!(validate_ats_score(Some(&value), 42), 42);
    }

    #[test]
    fn test_validate_ats_score_rejects_missing() {
        assert_eq!(validate_ats_score(None, 42), 42);
    }

    #[test]
    fn test_jitter_score_stays_clamped() {
        for _ in 0..50 {
            let high = jitter_score(100);
            assert!((97..=100).contains(&high));
            let low = jitter_score(15);
            assert!((15..=18).contains(&low));
        }
    }
}
