//! Text-generation backends.
//!
//! [`GenerationClient`] is the seam every stage calls through. The only
//! production implementation is [`GeminiClient`], which wraps one
//! `generateContent` request per call.
//!
//! ```text
//! Stage --prompt--> &dyn GenerationClient --Result<String, GenerationError>--> StageOutput
//!                          |
//!                          +-- GeminiClient: POST {base}/v1beta/models/{model}:generateContent
//! ```

pub mod error;
pub mod gemini;
pub mod trait_def;

pub use error::GenerationError;
pub use gemini::{GeminiClient, GeminiConfig};
pub use trait_def::GenerationClient;
