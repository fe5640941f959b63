// Candidate evaluation: coding tests, CV matching, test scoring and
// structured extraction of CVs and job descriptions.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod parsers;
pub mod prompts;
pub mod reports;
