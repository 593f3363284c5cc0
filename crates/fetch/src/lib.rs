//! Remote resource interface boundary for the tabdash coordinator.
//!
//! This crate defines the contract between the coordination core and
//! whatever transport the host application uses to reach its REST
//! endpoints: the outbound request shape ([`ResourceRequest`]), the
//! pagination envelope ([`PageEnvelope`]), the error taxonomy
//! ([`FetchError`]), and the [`ResourceFetcher`] trait the host
//! implements. Session-validity classification for ambiguous
//! auth-check failures lives in [`session`].
//!
//! The coordinator never constructs HTTP requests itself; it hands a
//! [`ResourceRequest`] to the fetcher and interprets the result. A
//! concrete HTTP client implementation belongs to the host app.

use async_trait::async_trait;

pub mod envelope;
pub mod error;
pub mod request;
pub mod session;

pub use envelope::PageEnvelope;
pub use error::FetchError;
pub use request::{DEFAULT_PAGE_SIZE, ResourceRequest};
pub use session::{AuthEventSink, SessionCheckPolicy, SessionVerdict, classify_session_check};

/// Identifies one named remote resource owned by a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub &'static str);

impl std::fmt::Display for ResourceId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.0)
	}
}

/// Identifies one UI tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub &'static str);

impl std::fmt::Display for TabId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.0)
	}
}

/// Transport seam for fetching remote resources.
///
/// Implementations must be cheap to share across spawned fetch tasks;
/// the coordinator holds one behind an `Arc` and calls it from
/// concurrently running fetches.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
	/// Fetches one page of a paginated resource.
	async fn fetch_page(
		&self,
		resource: ResourceId,
		request: &ResourceRequest,
	) -> Result<PageEnvelope<serde_json::Value>, FetchError>;

	/// Fetches a non-paginated resource as a single object.
	async fn fetch_object(&self, resource: ResourceId) -> Result<serde_json::Value, FetchError>;
}
