//! Shared test utilities for StudyOS integration tests.
//!
//! Deterministic [`GenerationClient`] stubs that never touch the network,
//! plus sample profiles.

use std::sync::Mutex;

use async_trait::async_trait;

use studyos_core::{GenerationClient, GenerationError, StudentProfile};

/// The GATE profile used throughout the test suites.
pub fn gate_profile() -> StudentProfile {
    StudentProfile {
        exam: "GATE".to_string(),
        deadline: 30,
        subjects: vec!["Math".to_string(), "Physics".to_string()],
        study_hours: 4,
        weak_areas: "Calculus".to_string(),
    }
}

/// The GATE profile as the JSON payload the HTTP boundary accepts.
pub fn gate_profile_json() -> String {
    r#"{"exam":"GATE","deadline":30,"subjects":["Math","Physics"],"study_hours":4,"weak_areas":"Calculus"}"#
        .to_string()
}

/// Returns every prompt unchanged.
pub struct EchoClient;

#[async_trait]
impl GenerationClient for EchoClient {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        Ok(prompt.to_string())
    }
}

/// Always succeeds with the same text.
pub struct FixedClient(pub String);

impl FixedClient {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

#[async_trait]
impl GenerationClient for FixedClient {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Ok(self.0.clone())
    }
}

/// Always fails with [`GenerationError::Service`].
pub struct FailingClient(pub String);

impl FailingClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

#[async_trait]
impl GenerationClient for FailingClient {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Service(self.0.clone()))
    }
}

/// Echoes prompts and keeps a copy of each, in call order.
#[derive(Default)]
pub struct RecordingClient {
    prompts: Mutex<Vec<String>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl GenerationClient for RecordingClient {
    fn name(&self) -> &str {
        "recording"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        Ok(format!("[response {}]", prompt.len()))
    }
}
