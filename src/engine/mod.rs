pub mod engine;
pub mod protocol;

pub mod chain;
pub mod llm_client;
pub mod lore_store;
pub mod prompt_builder;
pub mod retriever;
