//! HTML evaluation reports: coding tests, CV matches and test scoring.

use crate::errors::AppError;
use crate::evaluation::prompts::{
    fill_prompt, CODING_TEST_PROMPT_TEMPLATE, CODING_TEST_SYSTEM, MATCH_PROMPT_TEMPLATE,
    MATCH_SYSTEM, SCORE_PROMPT_TEMPLATE, SCORE_SYSTEM,
};
use crate::llm_client::prompts::{AGENCY_PREAMBLE, HTML_ONLY_SYSTEM};
use crate::llm_client::{Completion, TextGenerator};

const REPORT_TEMPERATURE: f32 = 0.7;
const REPORT_MAX_TOKENS: u32 = 2000;

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Removes a ```html fence some models wrap documents in.
fn strip_html_fences(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix("```html")
        .or_else(|| text.strip_prefix("```"))
        .and_then(|s| s.trim_end().strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(text)
}

async fn html_report(
    llm: &dyn TextGenerator,
    what: &str,
    system: &str,
    prompt: &str,
) -> Result<String, AppError> {
    let system = format!("{system} {HTML_ONLY_SYSTEM}");
    let request = Completion {
        system: &system,
        prompt,
        temperature: REPORT_TEMPERATURE,
        max_tokens: REPORT_MAX_TOKENS,
    };
    let text = llm
        .complete(&request)
        .await
        .map_err(|e| AppError::Llm(format!("{what} failed: {e}")))?;
    Ok(strip_html_fences(&text).to_string())
}

/// Take-home coding test tailored to a job description.
pub async fn generate_coding_test(
    llm: &dyn TextGenerator,
    job_description: &str,
) -> Result<String, AppError> {
    require_text("job_description", job_description)?;
    let prompt = fill_prompt(
        CODING_TEST_PROMPT_TEMPLATE,
        &[("preamble", AGENCY_PREAMBLE), ("job_description", job_description)],
    );
    html_report(llm, "Coding test generation", CODING_TEST_SYSTEM, &prompt).await
}

/// Match report of a CV against a job description.
pub async fn generate_match_report(
    llm: &dyn TextGenerator,
    job_description: &str,
    candidate_cv: &str,
) -> Result<String, AppError> {
    require_text("job_description", job_description)?;
    require_text("candidate_cv", candidate_cv)?;
    let prompt = fill_prompt(
        MATCH_PROMPT_TEMPLATE,
        &[
            ("preamble", AGENCY_PREAMBLE),
            ("job_description", job_description),
            ("candidate_cv", candidate_cv),
        ],
    );
    html_report(llm, "Candidate matching", MATCH_SYSTEM, &prompt).await
}

/// Scores a candidate's answers to a coding test.
pub async fn generate_score_report(
    llm: &dyn TextGenerator,
    questions: &str,
    answers: &str,
) -> Result<String, AppError> {
    require_text("questions", questions)?;
    require_text("answers", answers)?;
    let prompt = fill_prompt(
        SCORE_PROMPT_TEMPLATE,
        &[
            ("preamble", AGENCY_PREAMBLE),
            ("questions", questions),
            ("answers", answers),
        ],
    );
    html_report(llm, "Test scoring", SCORE_SYSTEM, &prompt).await
}
