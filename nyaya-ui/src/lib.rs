//! nyaya-ui - terminal client for the Nyaya legal-aid assistant
//!
//! Validates form input, calls nyaya-api, and renders the JSON it returns.
//! Voice queries are recorded from the microphone and answers can be played
//! back through the speakers.

pub mod audio;
pub mod cli;
pub mod client;
pub mod error;
pub mod forms;
pub mod render;

pub use client::ApiClient;
pub use error::{ClientError, Result};
