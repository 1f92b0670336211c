use super::language::language_name;

pub const INSTRUCTION_TEMPLATE: &str = "Translate the following text into {target_language}. \
     Output only the translation, keeping the original formatting:";

/// Renders the instruction line for a language code.
///
/// Unknown codes are interpolated as-is.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_instruction(target_language: &str) -> String {
    // {target_language} is a replacement placeholder, not a format argument
    let name = language_name(target_language).unwrap_or(target_language);
    INSTRUCTION_TEMPLATE.replace("{target_language}", name)
}

/// Builds the single user message: instruction, newline, then the text verbatim.
pub fn build_user_content(target_language: &str, text: &str) -> String {
    format!("{}\n{text}", build_instruction(target_language))
}
