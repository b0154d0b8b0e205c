// Skill extraction LLM prompt templates.

pub const SKILL_EXTRACTION_SYSTEM: &str = "\
You extract technical skills from project descriptions in resumes. \
Focus only on programming languages, frameworks, libraries, technologies, tools, \
databases, and cloud platforms explicitly mentioned. \
Never infer skills that are not written in the text.";

pub const SKILL_EXTRACTION_PROMPT: &str = r#"Extract ONLY the technical skills and tech stacks used in projects from the following resume text:

{resume_text}

Return a JSON array of unique, specific technical skills used in projects, for example ["Python", "PostgreSQL", "Docker"].
Return [] if there are none. Ensure no duplicates."#;

/// Builds the user prompt for one chunk of resume text.
pub fn skill_extraction_prompt(chunk: &str) -> String {
    SKILL_EXTRACTION_PROMPT.replace("{resume_text}", chunk)
}
