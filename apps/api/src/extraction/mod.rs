// Resume skill extraction: section filter → chunker → inference per chunk → dedup.
// All LLM calls go through llm_client behind the SkillInference trait.

pub mod chunker;
pub mod extractor;
pub mod handlers;
pub mod inference;
pub mod prompts;
pub mod sections;
