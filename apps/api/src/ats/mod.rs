// Resume ATS checker: normalizer, six category scorers, aggregator.
// The engine is pure and synchronous; HTTP and extraction live in handlers/extraction.

pub mod aggregator;
pub mod content;
pub mod docx;
pub mod engine;
pub mod essentials;
pub mod extraction;
pub mod formatting;
pub mod handlers;
pub mod layout;
pub mod normalizer;
pub mod rules;
pub mod sections;
pub mod tailoring;
pub mod vocabulary;
