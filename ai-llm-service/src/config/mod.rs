pub mod default_config;
pub mod ollama_config;
