//! The `CompletionClient` trait -- the seam between the core and the
//! hosted completion endpoint.
//!
//! The trait is object-safe so it can be stored as
//! `Arc<dyn CompletionClient>` by the plan generator and shared across
//! call sites.

use async_trait::async_trait;

use super::{CompletionError, CompletionRequest};

/// A stateless completion endpoint: each call is independent.
///
/// Implementations must not retry. The caller treats any error as fatal
/// for that one operation; resilience belongs to layers outside this core.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one completion request and return the response text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

// Compile-time assertion: CompletionClient must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn CompletionClient) {}
};
