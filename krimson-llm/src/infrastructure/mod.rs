pub mod prompts;
pub mod providers;
pub mod response_parser;
