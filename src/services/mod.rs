//! External service interactions
//!
//! - Gene-name (HGNC) and term-name (HPO) lookups over HTTP

pub mod vocabulary;

pub use vocabulary::VocabularyClient;
