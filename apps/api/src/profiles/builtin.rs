//! Builtin job profiles shipped with the service.

use crate::profiles::{ComponentWeights, JobProfile, KeywordCategory, ScoreWeights};
use crate::scoring::models::SectionLabel;

fn category(name: &str, keywords: &[&str]) -> KeywordCategory {
    KeywordCategory {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

const CORE_SECTIONS: [SectionLabel; 3] = [
    SectionLabel::Experience,
    SectionLabel::Education,
    SectionLabel::Skills,
];

pub fn builtin_profiles() -> Vec<JobProfile> {
    vec![
        generic(),
        software_engineer(),
        data_analyst(),
        project_manager(),
        marketing(),
    ]
}

fn generic() -> JobProfile {
    JobProfile {
        name: "generic".to_string(),
        description: "Broad vocabulary for resumes with no target role".to_string(),
        required_sections: CORE_SECTIONS.to_vec(),
        keyword_categories: vec![
            category(
                "technology",
                &["python", "sql", "excel", "java", "javascript", "cloud", "aws", "git"],
            ),
            category(
                "business",
                &["project", "kpi", "budget", "stakeholder", "strategy", "report", "analysis"],
            ),
            category(
                "soft_skills",
                &["communication", "leadership", "teamwork", "presentation", "problem solving"],
            ),
        ],
        weights: ScoreWeights::default(),
    }
}

fn software_engineer() -> JobProfile {
    JobProfile {
        name: "software_engineer".to_string(),
        description: "Backend, frontend and platform engineering roles".to_string(),
        required_sections: CORE_SECTIONS.to_vec(),
        keyword_categories: vec![
            category(
                "languages",
                &["python", "java", "javascript", "typescript", "rust", "go", "c++", "sql"],
            ),
            category(
                "frameworks",
                &["react", "django", "flask", "spring", "node.js", "fastapi"],
            ),
            category(
                "infrastructure",
                &["aws", "docker", "kubernetes", "terraform", "ci/cd", "linux", "git"],
            ),
            category(
                "practices",
                &["microservices", "rest", "api", "testing", "agile", "code review"],
            ),
        ],
        weights: ScoreWeights {
            ceilings: ComponentWeights {
                section: 20.0,
                keyword: 40.0,
                experience: 20.0,
                education: 10.0,
                formatting: 10.0,
            },
            multipliers: ComponentWeights::uniform(),
            points_per_keyword: 3.0,
            points_per_year: 4.0,
        },
    }
}

fn data_analyst() -> JobProfile {
    JobProfile {
        name: "data_analyst".to_string(),
        description: "Reporting, BI and analytics roles".to_string(),
        required_sections: CORE_SECTIONS.to_vec(),
        keyword_categories: vec![
            category("tools", &["python", "excel", "sql", "power bi", "tableau", "rstudio"]),
            category(
                "analysis",
                &["data", "analysis", "dashboard", "kpi", "report", "statistics"],
            ),
            category(
                "delivery",
                &["project", "communication", "presentation", "stakeholder"],
            ),
        ],
        weights: ScoreWeights {
            ceilings: ComponentWeights {
                section: 25.0,
                keyword: 40.0,
                experience: 15.0,
                education: 10.0,
                formatting: 10.0,
            },
            multipliers: ComponentWeights::uniform(),
            points_per_keyword: 5.0,
            points_per_year: 5.0,
        },
    }
}

fn project_manager() -> JobProfile {
    JobProfile {
        name: "project_manager".to_string(),
        description: "Delivery, program and product management roles".to_string(),
        required_sections: vec![
            SectionLabel::Summary,
            SectionLabel::Experience,
            SectionLabel::Education,
            SectionLabel::Skills,
        ],
        keyword_categories: vec![
            category(
                "methodology",
                &["agile", "scrum", "kanban", "waterfall", "pmp", "prince2"],
            ),
            category(
                "delivery",
                &["roadmap", "budget", "risk", "timeline", "milestone", "stakeholder"],
            ),
            category("tools", &["jira", "confluence", "ms project", "excel"]),
        ],
        weights: ScoreWeights {
            ceilings: ComponentWeights {
                section: 25.0,
                keyword: 30.0,
                experience: 25.0,
                education: 10.0,
                formatting: 10.0,
            },
            multipliers: ComponentWeights::uniform(),
            points_per_keyword: 3.0,
            points_per_year: 3.0,
        },
    }
}

fn marketing() -> JobProfile {
    JobProfile {
        name: "marketing".to_string(),
        description: "Digital, content and growth marketing roles".to_string(),
        required_sections: CORE_SECTIONS.to_vec(),
        keyword_categories: vec![
            category(
                "channels",
                &["seo", "sem", "social media", "email marketing", "content"],
            ),
            category(
                "analytics",
                &["google analytics", "conversion", "a/b testing", "roi", "campaign"],
            ),
            category("brand", &["branding", "copywriting", "storytelling", "market research"]),
        ],
        weights: ScoreWeights {
            ceilings: ComponentWeights {
                section: 25.0,
                keyword: 35.0,
                experience: 20.0,
                education: 5.0,
                formatting: 15.0,
            },
            multipliers: ComponentWeights::uniform(),
            points_per_keyword: 3.5,
            points_per_year: 4.0,
        },
    }
}
