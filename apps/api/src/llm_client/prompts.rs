// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment for document-producing calls.
pub const HTML_ONLY_SYSTEM: &str = "Always respond with a single valid HTML fragment. \
    Do NOT wrap it in markdown code fences.";

/// Who the reports are written for.
pub const AGENCY_PREAMBLE: &str = "We are a boutique technology consulting agency run by \
    software engineers, focused on placing the highest caliber technical talent with our clients.";
