//! Prompt Assembly
//!
//! Builds the single text prompt sent to the model: chatbot context, a
//! condensed view of the portfolio, then the visitor's question.

use crate::model::PortfolioData;

/// Number of skills included in the condensed portfolio block
pub const PROMPT_SKILL_LIMIT: usize = 5;

const SKILL_SEPARATOR: &str = ", ";

const QUESTION_LABEL: &str = "User Question:";

const RESPONSE_INSTRUCTION: &str =
    "Assistant Response (Keep it friendly, concise, and helpful):";

/// Assemble the model prompt.
///
/// Pure string templating: identical inputs give byte-identical output. The
/// user message is embedded verbatim; callers bound its length beforehand.
pub fn assemble_prompt(context: &str, data: &PortfolioData, user_message: &str) -> String {
    let designer = &data.designer;
    let skills = designer
        .skills
        .iter()
        .take(PROMPT_SKILL_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(SKILL_SEPARATOR);

    format!(
        "{context}\n\
         \n\
         Portfolio Data:\n\
         Designer: {name}\n\
         Experience: {experience}\n\
         Skills: {skills}\n\
         Projects: {count} completed\n\
         \n\
         {QUESTION_LABEL} {user_message}\n\
         \n\
         {RESPONSE_INSTRUCTION}",
        name = designer.name,
        experience = designer.experience_text(),
        count = data.projects.len(),
    )
}
