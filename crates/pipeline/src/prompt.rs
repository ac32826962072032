//! Prompt composition — pure string-building, no I/O, no mutable state.
//!
//! Three prompt kinds flow through the pipeline: the persona answer prompt,
//! the quality-check prompt, and the revision prompt. Each embeds a fixed
//! behavioral contract around the variable parts (query, draft, history).

use emissary_core::ledger::{ConversationLedger, RECENT_HISTORY_LIMIT};
use emissary_core::{ContentStore, Persona};

/// Character prefix of the background document included in assessment
/// prompts, to bound request size. A crude cut, not token-aware.
pub const ASSESSMENT_REFERENCE_LIMIT: usize = 1500;

/// Marker appended when the assessment reference material was cut.
pub const TRUNCATION_MARKER: &str = "...";

/// Build the persona answer prompt.
///
/// Embeds the behavioral contract, the full source documents, the last
/// [`RECENT_HISTORY_LIMIT`] exchanges as numbered turns, and the query.
/// When `suggest_call_to_action` is set, a closing-invitation instruction is
/// added to the contract — that branch drives generation behavior and is the
/// reason the flag exists.
pub fn persona_prompt(
    query: &str,
    content: &ContentStore,
    ledger: &ConversationLedger,
    persona: &Persona,
    suggest_call_to_action: bool,
) -> String {
    let call_to_action_instruction = if suggest_call_to_action {
        "\nIMPORTANT: At the end of your response, suggest connecting for further discussion."
    } else {
        ""
    };

    format!(
        "You are {name}, {title} currently working at {organization}. You are \
responding to professional inquiries from recruiters and potential employers \
interested in senior leadership positions.

STRICT GUIDELINES:
- Only answer professional questions related to your career, experience, skills, and achievements
- Base ALL responses ONLY on the information provided in your background document and personal details
- Do NOT invent or extrapolate information not present in your documents
- If asked about something not in your documents, politely redirect to what IS in them
- Maintain a professional, confident, and engaging tone
- Keep responses concise but informative (max 3-4 paragraphs)
- Do NOT discuss personal topics unrelated to professional qualifications
- Focus on leadership achievements, technical expertise, and business impact{call_to_action_instruction}

BACKGROUND DOCUMENT:
{background}

PERSONAL INFORMATION:
{personal_info}

CONVERSATION HISTORY:
{history}

USER QUERY: {query}

Respond as {name} would, focusing only on professional matters and information \
contained in the provided documents.",
        name = persona.name,
        title = persona.title,
        organization = persona.organization,
        background = content.background(),
        personal_info = content.personal_info(),
        history = ledger.recent_history(RECENT_HISTORY_LIMIT),
    )
}

/// Build the quality-check prompt for a draft response.
///
/// The background document is truncated to a bounded prefix so the
/// assessment request stays small; the personal info is short and included
/// whole. Instructs the assessor to return the exact verdict JSON shape and
/// nothing else.
pub fn assessment_prompt(query: &str, draft: &str, content: &ContentStore) -> String {
    let reference = truncate_chars(content.background(), ASSESSMENT_REFERENCE_LIMIT);

    format!(
        "Evaluate this response from an AI agent representing a senior \
professional responding to a recruiter query.

EVALUATION CRITERIA:
1. Professional tone and appropriateness for a recruiter audience
2. Relevance to the user's query
3. Based solely on the background/personal information provided (no invented facts)
4. Accuracy and consistency with the source material
5. Appropriate length and engagement level
6. Maintains focus on professional qualifications only

USER QUERY: {query}

DRAFT RESPONSE: {draft}

BACKGROUND REFERENCE MATERIAL:
{reference}

PERSONAL INFO REFERENCE:
{personal_info}

SPECIFIC ISSUES TO CHECK:
- Does the response invent any facts not in the source materials?
- Is the tone appropriate for a senior executive speaking to recruiters?
- Does it stay focused on professional topics only?
- Is the response length appropriate (not too brief, not too verbose)?
- Does it adequately address the user's specific question?

Provide your evaluation in this exact JSON format (no additional text):
{{
    \"is_professional\": true/false,
    \"is_relevant\": true/false,
    \"is_based_on_source\": true/false,
    \"confidence_score\": 0.0-1.0,
    \"feedback\": \"specific feedback for improvement\",
    \"requires_revision\": true/false
}}",
        personal_info = content.personal_info(),
    )
}

/// Build the revision prompt: the original persona prompt, the draft, the
/// assessor's feedback, and an instruction to improve under the same
/// constraints.
pub fn revision_prompt(original_persona_prompt: &str, draft: &str, feedback: &str) -> String {
    format!(
        "{original_persona_prompt}

PREVIOUS RESPONSE: {draft}

QUALITY FEEDBACK: {feedback}

Please provide an improved response addressing the feedback while maintaining \
your role. Focus on:
- Addressing the specific issues mentioned in the feedback
- Maintaining professional tone and accuracy
- Staying within the bounds of information provided in your documents
- Keeping the response appropriately concise and engaging"
    )
}

/// Truncate to a character prefix (not bytes — never splits a code point),
/// appending the truncation marker when anything was cut.
fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
