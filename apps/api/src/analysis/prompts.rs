//! Prompt construction for the analysis paths. Templates are `const`
//! strings with `{placeholder}` substitution; builders fill them in.

/// Role label used when the caller did not supply one.
pub const DEFAULT_ROLE: &str = "General Professional";

/// Full ATS analysis prompt. Replace `{resume_text}` and `{job_role}`.
/// Embeds the rubric weights and a strict output-shape instruction; the
/// extractor still treats the response as untrusted.
const ANALYZE_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) resume analyzer with 10+ years of experience. Analyze this resume comprehensively for the target role of "{job_role}" and provide detailed, accurate feedback.

Resume Content:
{resume_text}

Target Job Role: {job_role}

SCORING CRITERIA (Rate 0-100):
- Contact Info (20%): Email, phone, LinkedIn present and professional
- Professional Summary (15%): Clear, compelling, keyword-rich summary tailored to {job_role}
- Work Experience (25%): Relevant experience, quantified achievements, action verbs
- Skills (20%): Industry-relevant technical and soft skills for {job_role}
- Education (10%): Relevant education, certifications
- Formatting (10%): ATS-friendly structure, consistent formatting

Provide your analysis as a valid JSON object with this exact structure:
{
  "atsScore": <number 0-100 based on above criteria>,
  "missingKeywords": [array of 8-12 important missing industry keywords for {job_role}],
  "formatSuggestions": [array of 6-10 specific formatting improvements for ATS compatibility],
  "improvements": [array of 8-12 actionable content improvements with specifics],
  "matchingJobRoles": [array of 4-6 suitable job roles based on resume content]
}

IMPORTANT SCORING GUIDELINES:
- Score 80-100: Excellent ATS optimization for {job_role}, comprehensive content, strong keywords
- Score 60-79: Good foundation, some optimization needed
- Score 40-59: Average resume, multiple areas need improvement
- Score 20-39: Poor ATS compatibility, significant gaps
- Score 0-19: Major issues, extensive rewrite needed

Be specific, accurate, and provide actionable recommendations. Consider industry standards and current ATS technology."#;

/// Real-time analysis prompt. Replace `{resume_text}`, `{job_role}`,
/// `{expected_keywords}`.
const REALTIME_TEMPLATE: &str = r#"Analyze this resume for the "{job_role}" position. Provide analysis in JSON format.

Resume Text:
{resume_text}

Target Job Role: {job_role}
Expected Keywords: {expected_keywords}

Analyze and return ONLY a valid JSON object with this exact structure:
{
  "keywordMatchScore": <number 0-100>,
  "foundKeywords": [list of keywords found in resume],
  "missingKeywords": [important keywords missing from resume],
  "readabilityScore": <number 0-100 based on clarity and structure>,
  "structureAnalysis": {
    "Contact Information": <true if contact info present>,
    "Professional Summary": <true if summary/objective present>,
    "Work Experience": <true if experience section present>,
    "Education": <true if education section present>,
    "Skills": <true if skills section present>,
    "Projects": <true if projects section present>
  },
  "formattingIssues": [list of formatting problems]
}

Be accurate and specific. Only include keywords that are actually relevant to the job role."#;

/// Resume-vs-job-description gap analysis prompt. Replace `{resume_text}`
/// and `{job_description}`.
const GAP_TEMPLATE: &str = r#"Compare this resume against the job description and provide targeted recommendations.

Resume:
{resume_text}

Job Description:
{job_description}

Analyze the gap and provide ONLY a valid JSON object:
{
  "requiredKeywords": [8-12 key required keywords from job description],
  "missingFromResume": [keywords from job description missing in resume],
  "recommendedSkills": [6-10 additional skills to strengthen application],
  "keywordInsertions": [
    {
      "keyword": "specific keyword",
      "suggestion": "Natural sentence to incorporate this keyword",
      "section": "Experience/Skills/Summary"
    }
  ]
}

Focus on actionable, specific recommendations. Make suggestions natural and professional."#;

pub fn build_analysis_prompt(resume_text: &str, job_role: Option<&str>) -> String {
    ANALYZE_TEMPLATE
        .replace("{job_role}", job_role.unwrap_or(DEFAULT_ROLE))
        .replace("{resume_text}", resume_text)
}

pub fn build_realtime_prompt(
    resume_text: &str,
    job_role: Option<&str>,
    expected_keywords: &[&str],
) -> String {
    REALTIME_TEMPLATE
        .replace("{job_role}", job_role.unwrap_or(DEFAULT_ROLE))
        .replace("{expected_keywords}", &expected_keywords.join(", "))
        .replace("{resume_text}", resume_text)
}

pub fn build_gap_prompt(resume_text: &str, job_description: &str) -> String {
    GAP_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}
