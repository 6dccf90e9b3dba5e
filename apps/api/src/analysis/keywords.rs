//! Keyword catalog — static mapping from a job-role label to the keyword set
//! an ATS would expect for that role.

/// Fallback for unrecognized or absent roles. Never empty by construction.
const GENERIC_KEYWORDS: &[&str] = &["Leadership", "Communication", "Problem Solving", "Team Work"];

/// Expected keywords per recognized role. Lookup is exact and case-sensitive.
const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Software Developer",
        &[
            "JavaScript",
            "Python",
            "React",
            "Node.js",
            "Git",
            "API",
            "Database",
            "Frontend",
            "Backend",
            "Agile",
        ],
    ),
    (
        "Data Analyst",
        &[
            "SQL",
            "Python",
            "Excel",
            "Tableau",
            "PowerBI",
            "Statistics",
            "Data Visualization",
            "Analytics",
            "Reporting",
        ],
    ),
    (
        "Product Manager",
        &[
            "Product Strategy",
            "Roadmap",
            "Stakeholder Management",
            "Agile",
            "Scrum",
            "User Research",
            "Analytics",
        ],
    ),
    (
        "Marketing Manager",
        &[
            "Digital Marketing",
            "SEO",
            "SEM",
            "Social Media",
            "Content Marketing",
            "Analytics",
            "Campaign Management",
        ],
    ),
    (
        "Project Manager",
        &[
            "Project Management",
            "Agile",
            "Scrum",
            "Leadership",
            "Risk Management",
            "Stakeholder Management",
        ],
    ),
    (
        "Business Analyst",
        &[
            "Requirements Analysis",
            "Process Improvement",
            "SQL",
            "Documentation",
            "Stakeholder Management",
        ],
    ),
    (
        "UX/UI Designer",
        &[
            "User Experience",
            "User Interface",
            "Figma",
            "Adobe",
            "Prototyping",
            "User Research",
            "Wireframing",
        ],
    ),
    (
        "DevOps Engineer",
        &[
            "AWS",
            "Docker",
            "Kubernetes",
            "CI/CD",
            "Infrastructure",
            "Automation",
            "Monitoring",
        ],
    ),
];

/// Returns the expected keyword set for a role, or the generic fallback for
/// unknown/absent roles. Never returns an empty slice.
pub fn keywords_for(job_role: Option<&str>) -> &'static [&'static str] {
    job_role
        .and_then(|role| {
            ROLE_KEYWORDS
                .iter()
                .find(|(name, _)| *name == role)
                .map(|(_, keywords)| *keywords)
        })
        .unwrap_or(GENERIC_KEYWORDS)
}
