//! Legal knowledge base: query classification, canned guidance, language
//! detection and document templates

pub mod classifier;
pub mod guidance;
pub mod language;
pub mod templates;

pub use classifier::classify_query;
pub use guidance::{guidance, NO_SPEECH_ANSWER};
pub use language::detect_language;
pub use templates::render_document;
