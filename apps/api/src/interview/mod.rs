// Mock interview core: prompt building, response parsing and the session
// controller. All model calls go through llm_client::LanguageModel.

pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod service;
pub mod session;
pub mod store;

#[cfg(test)]
pub mod testing;
