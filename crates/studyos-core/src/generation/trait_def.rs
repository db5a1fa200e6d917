//! The `GenerationClient` trait -- the single capability every stage uses.

use async_trait::async_trait;

use super::GenerationError;

/// Turns one prompt into one piece of generated text.
///
/// Each call maps to exactly one outbound request: implementations must
/// not retry or back off. The trait is object-safe so a single
/// `Arc<dyn GenerationClient>` can be shared by concurrent pipeline runs.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Short name for logs (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate text for `prompt`.
    ///
    /// On success returns the service's text verbatim.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn GenerationClient) {}
};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    struct ShoutClient;

    #[async_trait]
    impl GenerationClient for ShoutClient {
        fn name(&self) -> &str {
            "shout"
        }

        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            Ok(prompt.to_uppercase())
        }
    }

    #[tokio::test]
    async fn client_is_usable_as_shared_trait_object() {
        let client: Arc<dyn GenerationClient> = Arc::new(ShoutClient);
        let other = Arc::clone(&client);

        assert_eq!(client.name(), "shout");
        assert_eq!(other.generate("hi").await.unwrap(), "HI");
    }

    #[test]
    fn service_error_displays_reason_only() {
        let err = GenerationError::Service("boom".to_string());
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn api_error_includes_status() {
        let err = GenerationError::Api {
            status: 429,
            message: "quota exhausted".to_string(),
        };
        assert_eq!(err.to_string(), "API error (429): quota exhausted");
    }
}
