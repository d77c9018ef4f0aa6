use crate::llm::{Role, Turn};

/// Flattens a conversation into a single prompt for text-completion backends.
///
/// Each turn becomes `"<Label>: <content>"`, turns are separated by a blank
/// line, and a bare `"Assistant:"` cue closes the prompt. Content is not
/// escaped, so a prompt cannot be parsed back into turns reliably.
pub struct PromptAssembler;

impl PromptAssembler {
    pub const SEPARATOR: &'static str = "\n\n";

    pub fn to_prompt(turns: &[Turn]) -> String {
        let mut parts: Vec<String> = turns
            .iter()
            .map(|t| format!("{}: {}", t.role.label(), t.content))
            .collect();
        parts.push(format!("{}:", Role::Assistant.label()));
        parts.join(Self::SEPARATOR)
    }
}
