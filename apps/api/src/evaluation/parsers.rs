//! Structured extraction of CVs and job descriptions.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::evaluation::prompts::{
    fill_prompt, CV_PARSE_PROMPT_TEMPLATE, CV_PARSE_SYSTEM, JD_PARSE_PROMPT_TEMPLATE,
    JD_PARSE_SYSTEM,
};
use crate::evaluation::reports::require_text;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{complete_json, Completion, TextGenerator};

const PARSE_TEMPERATURE: f32 = 0.3;
const PARSE_MAX_TOKENS: u32 = 1000;

/// Candidate profile extracted from a CV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedCv {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub key_skills: Vec<String>,
    pub key_achievements: Vec<String>,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub cv_summary: String,
}

/// Requirements extracted from a client's job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedJobDescription {
    pub role_name: String,
    pub background: Option<String>,
    pub role_desc: Option<String>,
    #[serde(alias = "responsibilites")]
    pub responsibilities: Vec<String>,
    pub candidate_requirements: Vec<String>,
    pub must_have: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub technical_skills: Vec<String>,
}

pub async fn parse_cv(llm: &dyn TextGenerator, cv_text: &str) -> Result<ParsedCv, AppError> {
    require_text("cv_text", cv_text)?;
    let prompt = fill_prompt(CV_PARSE_PROMPT_TEMPLATE, &[("cv_text", cv_text)]);
    let system = format!("{CV_PARSE_SYSTEM} {JSON_ONLY_SYSTEM}");
    complete_json::<ParsedCv>(
        llm,
        &Completion {
            system: &system,
            prompt: &prompt,
            temperature: PARSE_TEMPERATURE,
            max_tokens: PARSE_MAX_TOKENS,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("CV parsing failed: {e}")))
}

pub async fn parse_job_description(
    llm: &dyn TextGenerator,
    job_description: &str,
) -> Result<ParsedJobDescription, AppError> {
    require_text("job_description", job_description)?;
    let prompt = fill_prompt(JD_PARSE_PROMPT_TEMPLATE, &[("job_description", job_description)]);
    let system = format!("{JD_PARSE_SYSTEM} {JSON_ONLY_SYSTEM}");
    complete_json::<ParsedJobDescription>(
        llm,
        &Completion {
            system: &system,
            prompt: &prompt,
            temperature: PARSE_TEMPERATURE,
            max_tokens: PARSE_MAX_TOKENS,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("Job description parsing failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubGenerator;

    const CV_REPLY: &str = r#"{
        "name": "Ada Lovelace",
        "phone": null,
        "email": "ada@example.com",
        "role": "Staff Engineer",
        "location": "London",
        "linkedin": null,
        "key_skills": ["Rust", "PostgreSQL"],
        "key_achievements": ["Cut p99 latency by 40%"],
        "strengths": ["Systems design"],
        "gaps": ["No frontend work"],
        "cv_summary": "Senior backend engineer."
    }"#;

    #[tokio::test]
    async fn test_parse_cv() {
        let llm = StubGenerator::replying(CV_REPLY);
        let cv = parse_cv(&llm, "Ada Lovelace, Staff Engineer...").await.unwrap();
        assert_eq!(cv.name, "Ada Lovelace");
        assert_eq!(cv.email.as_deref(), Some("ada@example.com"));
        assert_eq!(cv.phone, None);
        assert_eq!(cv.key_skills, vec!["Rust", "PostgreSQL"]);
    }

    #[tokio::test]
    async fn test_missing_cv_fields_default() {
        let llm = StubGenerator::replying(r#"{"name": "Bob"}"#);
        let cv = parse_cv(&llm, "Bob").await.unwrap();
        assert_eq!(cv.name, "Bob");
        assert!(cv.key_skills.is_empty());
        assert_eq!(cv.cv_summary, "");
    }

    #[tokio::test]
    async fn test_non_json_reply_is_llm_error() {
        let llm = StubGenerator::replying("Sorry, I cannot help with that.");
        let err = parse_cv(&llm, "Bob").await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_parse_job_description_accepts_misspelled_key() {
        let llm = StubGenerator::replying(
            r#"```json
            {
                "role_name": "Backend Engineer",
                "responsibilites": ["Own the billing service"],
                "must_have": ["Rust"],
                "nice_to_have": ["Kafka"]
            }
            ```"#,
        );
        let jd = parse_job_description(&llm, "Backend Engineer at Acme").await.unwrap();
        assert_eq!(jd.role_name, "Backend Engineer");
        assert_eq!(jd.responsibilities, vec!["Own the billing service"]);
        assert_eq!(jd.must_have, vec!["Rust"]);
        assert!(jd.technical_skills.is_empty());
    }

    #[tokio::test]
    async fn test_empty_job_description_rejected() {
        let llm = StubGenerator::replying("{}");
        let err = parse_job_description(&llm, "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
