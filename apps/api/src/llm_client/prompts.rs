// Shared prompt constants.
// Interview-specific templates live in interview/prompts.rs.

/// System prompt sent with every interview call. Keeps the model in plain-text
/// mode, since the interview parsers read lines rather than JSON.
pub const INTERVIEWER_SYSTEM: &str = "You are an experienced technical recruiter and \
    hiring manager running a mock interview. \
    Respond in plain text only. \
    Do NOT use markdown headings, bold text or code fences. \
    Follow the requested output format exactly.";
