//! Prompt builders for the freeform generation paths. These prompts are
//! assembled from structured data, so they are builder functions rather than
//! `{placeholder}` templates.

use crate::generation::ResumeDraft;

pub fn build_resume_prompt(draft: &ResumeDraft) -> String {
    let mut prompt = format!(
        "You are an expert ATS (Applicant Tracking System) resume writer and career coach. \
         Create a highly optimized, professional resume that will pass through ATS systems \
         and impress hiring managers.\n\n\
         CRITICAL ATS OPTIMIZATION REQUIREMENTS:\n\
         - Use standard section headers that ATS systems recognize\n\
         - Include 15-20 relevant keywords for {role} role distributed naturally throughout\n\
         - Start each experience bullet with strong action verbs (Achieved, Managed, Developed, Led, etc.)\n\
         - Include quantifiable results and metrics wherever possible\n\
         - Use industry-standard terminology and technical skills\n\
         - Ensure consistent formatting and proper spacing\n\
         - Write in third person, professional tone\n\
         - Include power words that show impact and leadership\n\n\
         CANDIDATE INFORMATION:\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Target Role: {role}\n",
        role = draft.job_role,
        name = draft.full_name,
        email = draft.email,
        phone = draft.phone,
    );

    if let Some(linkedin) = &draft.linkedin {
        prompt.push_str(&format!("LinkedIn: {linkedin}\n"));
    }
    if let Some(github) = &draft.github {
        prompt.push_str(&format!("GitHub: {github}\n"));
    }

    prompt.push_str("\nPROFESSIONAL SUMMARY REQUIREMENTS:\n");
    match &draft.summary {
        Some(summary) => prompt.push_str(&format!("Base Summary: {summary}\n")),
        None => prompt.push_str(&format!(
            "Create a compelling 3-4 line summary for {}\n",
            draft.job_role
        )),
    }
    prompt.push_str(
        "- Highlight years of experience and key expertise\n\
         - Include 3-5 industry keywords\n\
         - Showcase unique value proposition\n\
         - Mention quantifiable achievements if applicable\n",
    );

    prompt.push_str(&format!(
        "\nCORE COMPETENCIES (Optimize with ATS keywords):\n{}\n\
         - Add related technical skills and tools\n\
         - Include soft skills relevant to {role}\n\
         - Use industry-standard terminology\n\
         - Group by categories if applicable (Technical Skills, Leadership, etc.)\n",
        draft.skills.join(", "),
        role = draft.job_role,
    ));

    let education: Vec<String> = draft
        .education
        .iter()
        .map(|edu| {
            let gpa = edu
                .gpa
                .as_deref()
                .map(|g| format!(" - GPA: {g}"))
                .unwrap_or_default();
            format!("{} from {} ({}){gpa}", edu.degree, edu.institution, edu.year)
        })
        .collect();
    prompt.push_str(&format!("\nEDUCATION:\n{}\n", education.join("\n")));

    let experience: Vec<String> = draft
        .experience
        .iter()
        .map(|exp| {
            format!(
                "{} at {} ({})\nCurrent Description: {}",
                exp.role, exp.company, exp.duration, exp.description
            )
        })
        .collect();
    prompt.push_str(&format!(
        "\nPROFESSIONAL EXPERIENCE (Rewrite with impact):\n{}\n\n\
         ENHANCEMENT INSTRUCTIONS FOR EXPERIENCE:\n\
         1. Start each bullet with a strong action verb\n\
         2. Include specific numbers, percentages, or metrics\n\
         3. Show progression and growth\n\
         4. Highlight achievements, not just responsibilities\n\
         5. Use keywords relevant to {role}\n\
         6. Focus on results and business impact\n",
        experience.join("\n\n"),
        role = draft.job_role,
    ));

    if !draft.projects.is_empty() {
        let projects: Vec<String> = draft
            .projects
            .iter()
            .map(|p| format!("{}: {} (Technologies: {})", p.name, p.description, p.technologies))
            .collect();
        prompt.push_str(&format!(
            "\nKEY PROJECTS:\n{}\n- Enhance project descriptions with technical details and outcomes\n",
            projects.join("\n")
        ));
    }

    if !draft.certifications.is_empty() {
        prompt.push_str(&format!(
            "\nCERTIFICATIONS: {}\n",
            draft.certifications.join(", ")
        ));
    }
    if !draft.languages.is_empty() {
        prompt.push_str(&format!("LANGUAGES: {}\n", draft.languages.join(", ")));
    }
    if !draft.achievements.is_empty() {
        prompt.push_str(&format!("ACHIEVEMENTS: {}\n", draft.achievements.join(", ")));
    }

    prompt.push_str(&format!(
        "\nOUTPUT REQUIREMENTS:\n\
         1. Professional Summary: 3-4 compelling lines with keywords\n\
         2. Core Competencies: Organized list with industry keywords\n\
         3. Professional Experience: Rewritten bullets with action verbs and metrics\n\
         4. Education: Clean, ATS-friendly format\n\
         5. Additional sections as applicable\n\
         6. Ensure keyword density of 2-3% for target role\n\
         7. Use consistent formatting throughout\n\
         8. Include relevant technical and soft skills\n\
         9. Focus on achievements and quantifiable results\n\
         10. Make it ATS-parseable with clear section headers\n\n\
         Create a complete, polished resume that will score 90+ on ATS systems and impress \
         hiring managers. The content should be professional, impactful, and perfectly \
         tailored for the {} position.",
        draft.job_role
    ));

    prompt
}

pub fn build_job_suggestions_prompt(resume_text: &str, target_role: Option<&str>) -> String {
    let target = target_role
        .map(|role| format!("Target Role: {role}\n\n"))
        .unwrap_or_default();
    format!(
        "Based on the following resume, provide personalized job recommendations and career guidance:\n\n\
         Resume:\n{resume_text}\n\n\
         {target}\
         Please provide:\n\
         1. Recommended job titles and roles\n\
         2. Industries that would be a good fit\n\
         3. Skills to develop for career advancement\n\
         4. Potential career paths\n\
         5. Companies or job boards to target\n\n\
         Format the response with clear sections and actionable advice."
    )
}
