//! Prompt construction.

use std::fmt::Write;

/// Default number of characters of the current document sent as context.
pub const DEFAULT_CONTEXT_LIMIT: usize = 10_000;

const REQUIREMENTS: [&str; 5] = [
    "Return ONLY the new or modified Markdown content.",
    "Keep existing LaTeX formatting (e.g., $E=mc^2$) intact.",
    "Do not include markdown code fences (like ```markdown) in the output unless it's part of the document itself.",
    "If the instruction is to \"continue writing\", append logically to the context.",
    "If the instruction is \"fix grammar\", output the corrected version of the context.",
];

/// Longest prefix of `text` with at most `limit` characters.
///
/// Counts `char`s, so the cut never splits a code point.
#[must_use]
pub fn truncate_context(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Build the model prompt for `instruction` applied to `current`.
#[must_use]
pub fn build_prompt(current: &str, instruction: &str, context_limit: usize) -> String {
    let mut prompt = String::from(
        "You are an expert technical writer and LaTeX specialist.\n\n\
         Task: Edit or generate Markdown content based on the user's instruction.\n\n\
         Context (Current Document Content):\n\"\"\"\n",
    );
    prompt.push_str(truncate_context(current, context_limit));
    write!(prompt, "\n\"\"\"\n\nUser Instruction: \"{instruction}\"\n\nRequirements:\n").unwrap();
    for (i, requirement) in REQUIREMENTS.iter().enumerate() {
        writeln!(prompt, "{}. {requirement}", i + 1).unwrap();
    }
    prompt
}
