// Message generation: form options, guidance tables, prompt assembly,
// the single completion call, scenario batches and plain-text export.
// All LLM calls go through llm_client; no direct HTTP calls here.

pub mod batch;
pub mod dates;
pub mod export;
pub mod generator;
pub mod handlers;
pub mod options;
pub mod prompts;
pub mod samples;
pub mod tables;
