pub mod bullets;
pub mod extractor;
pub mod handlers;
pub mod keywords;
pub mod models;
pub mod prompts;
pub mod summary;
