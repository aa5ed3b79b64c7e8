pub mod error;
pub mod fetcher;
pub mod parser;
pub mod source;
pub mod transformer;
