// All LLM prompt constants for the Evaluation module.
// Templates use `{placeholder}` tokens filled by `fill_prompt` before sending.

pub const CODING_TEST_SYSTEM: &str = "You are an expert software engineering team lead \
    creating software engineering evaluation coding tests with questions and answers.";

/// Replace `{job_description}` before sending.
pub const CODING_TEST_PROMPT_TEMPLATE: &str = r#"{preamble}
Design a custom take-home coding test for the job description below.
For each question the candidate answers in a code editor, and answers must compile or run.
The test must be completable in 30 minutes.

Job Description:
{job_description}

The test covers:
1. Data structures and algorithms
2. Problem-solving scenarios
3. System design
4. Code refactoring
5. Performance optimization

Questions must be specific to the role requirements, require deep understanding rather than
memorization, use real-world scenarios, and not be easily searchable or AI-answerable.

Respond with HTML containing sections for instructions, questions and model answers."#;

pub const MATCH_SYSTEM: &str = "You are an expert technical recruiter with deep experience \
    in evaluating software engineering talent. Include data attributes for parsing key metrics.";

/// Replace `{job_description}` and `{candidate_cv}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"{preamble}
Analyze the job requirements and candidate CV below.

Job Description:
{job_description}

Candidate CV:
{candidate_cv}

The evaluation includes:
1. An overall match score (0-100)
2. A recommendation: RECOMMEND or DO NOT RECOMMEND
3. Each required skill rated 0-100
4. Strengths and skill gaps
5. Notable achievements
6. Average tenure and role progression

Respond with HTML whose summary section carries `data-score` and `data-recommendation`
attributes, followed by the skills assessment and the qualitative sections."#;

pub const SCORE_SYSTEM: &str = "You are an expert technical interviewer with deep experience \
    in evaluating software engineering candidates. Include data attributes for parsing key metrics.";

/// Replace `{questions}` and `{answers}` before sending.
pub const SCORE_PROMPT_TEMPLATE: &str = r#"{preamble}
Review the candidate's technical screen questions and answers below.

Technical Questions:
{questions}

Candidate Answers:
{answers}

The evaluation includes:
1. An overall score (0-100) at the top
2. A concise recommendation summary
3. A score and feedback for each answer
4. Key strengths and areas for improvement
5. Technical depth and problem-solving ability

Respond with HTML whose score section carries a `data-score` attribute, followed by the
answer-by-answer analysis."#;

pub const CV_PARSE_SYSTEM: &str =
    "You are an expert at parsing resumes and extracting structured information.";

/// Replace `{cv_text}` before sending.
pub const CV_PARSE_PROMPT_TEMPLATE: &str = r#"Extract the key information of the CV below.

CV Content:
{cv_text}

Return a JSON object with this EXACT schema:
{
  "name": "candidate's full name",
  "phone": "phone number or null",
  "email": "email address or null",
  "role": "most current role",
  "location": "city or country",
  "linkedin": "LinkedIn URL or null",
  "key_skills": ["main technical and professional skills"],
  "key_achievements": ["notable professional accomplishments"],
  "strengths": ["core strengths"],
  "gaps": ["potential skill or experience gaps"],
  "cv_summary": "summary covering key skills, achievements and gaps"
}"#;

pub const JD_PARSE_SYSTEM: &str =
    "You are an expert at parsing job descriptions and extracting structured information.";

/// Replace `{job_description}` before sending.
pub const JD_PARSE_PROMPT_TEMPLATE: &str = r#"Extract the key information of the job description below.

Job Description Content:
{job_description}

Return a JSON object with this EXACT schema:
{
  "role_name": "the open role name",
  "background": "team, company or project background, or null",
  "role_desc": "what the candidate will do, or null",
  "responsibilities": ["every responsibility of the role"],
  "candidate_requirements": ["requirements, skills and technical competencies"],
  "must_have": ["must-have skills"],
  "nice_to_have": ["nice-to-have skills"],
  "technical_skills": ["technical skills and competencies"]
}"#;

/// Substitutes `{name}` tokens in one pass over the template. Values are
/// inserted verbatim, so tokens inside a value are never expanded. Braces
/// that do not name a field stay literal.
pub fn fill_prompt(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let field = after.find('}').and_then(|close| {
            fields
                .iter()
                .find(|(name, _)| *name == &after[..close])
                .map(|(_, value)| (close, *value))
        });
        match field {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
