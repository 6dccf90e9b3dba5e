//! Heuristic scorer — deterministic, rule-based ATS scoring from raw text
//! alone. This is the network-free fallback path: it is pure and total, so a
//! provider outage can always be converted into a usable score.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Floor of the heuristic score. Never report below this — a rock-bottom
/// number would read as a hard failure rather than a content judgment.
pub const SCORE_FLOOR: u32 = 15;
pub const SCORE_CEILING: u32 = 100;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"email|@").unwrap());
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"phone|\d{3}[-\s]?\d{3}[-\s]?\d{4}").unwrap());
static PROFILE_LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"linkedin|github").unwrap());
static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"summary|objective|profile").unwrap());
static EXPERIENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"experience|work|employment").unwrap());
static EDUCATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"education|degree|university|college").unwrap());
static SKILLS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"skills|technical|proficient").unwrap());
/// Quantified impact: percentages, dollar amounts, "N+" counts, impact verbs.
static IMPACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+%|\$\d+|\d+\+|increased|decreased|improved|reduced").unwrap());

// Structure-flag variants (used for the realtime section map)
static CONTACT_SECTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"email|phone|contact").unwrap());
static EXPERIENCE_SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"experience|work|employment|job").unwrap());
static PROJECTS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"project|portfolio").unwrap());

const TECH_KEYWORDS: &[&str] = &[
    "javascript",
    "python",
    "java",
    "react",
    "sql",
    "aws",
    "docker",
    "git",
];

/// Rule-based ATS score, additive and clamped to `[15, 100]`.
///
/// Point breakdown: contact info 20, professional sections 25, skills and
/// tech keywords 25, quantified achievements 15, length/substance 15.
pub fn ats_score(text: &str) -> u32 {
    let lower = text.to_lowercase();
    let mut score: u32 = 0;

    // Contact information (20 points)
    if EMAIL_RE.is_match(&lower) {
        score += 8;
    }
    if PHONE_RE.is_match(&lower) {
        score += 8;
    }
    if PROFILE_LINK_RE.is_match(&lower) {
        score += 4;
    }

    // Professional sections (25 points)
    if SUMMARY_RE.is_match(&lower) {
        score += 8;
    }
    if EXPERIENCE_RE.is_match(&lower) {
        score += 12;
    }
    if EDUCATION_RE.is_match(&lower) {
        score += 5;
    }

    // Skills and keywords (25 points)
    if SKILLS_RE.is_match(&lower) {
        score += 10;
    }
    let tech_hits = TECH_KEYWORDS.iter().filter(|k| lower.contains(**k)).count() as u32;
    score += (tech_hits * 2).min(15);

    // Quantifiable achievements (15 points)
    let impact_hits = IMPACT_RE.find_iter(&lower).count() as u32;
    if impact_hits > 0 {
        score += (impact_hits * 3).min(15);
    }

    // Content substance (15 points)
    let word_count = text.split_whitespace().count();
    if word_count > 200 {
        score += 5;
    }
    if word_count > 400 {
        score += 5;
    }
    if word_count > 600 {
        score += 5;
    }

    score.clamp(SCORE_FLOOR, SCORE_CEILING)
}

/// Named-section presence flags. Total: any input, including the empty
/// string, yields a complete map.
pub fn structure_flags(text: &str) -> BTreeMap<&'static str, bool> {
    let lower = text.to_lowercase();
    BTreeMap::from([
        ("Contact Information", CONTACT_SECTION_RE.is_match(&lower)),
        ("Professional Summary", SUMMARY_RE.is_match(&lower)),
        ("Work Experience", EXPERIENCE_SECTION_RE.is_match(&lower)),
        ("Education", EDUCATION_RE.is_match(&lower)),
        ("Skills", SKILLS_RE.is_match(&lower)),
        ("Projects", PROJECTS_RE.is_match(&lower)),
    ])
}
