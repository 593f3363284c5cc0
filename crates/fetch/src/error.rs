//! Fetch error taxonomy.

/// Failure of one resource fetch.
///
/// Stale responses from superseded requests are not represented here:
/// the coordinator drops them silently before any error surfaces.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FetchError {
	/// No response was received (connection refused, DNS failure, offline).
	#[error("network error: {0}")]
	Transport(String),
	/// The endpoint answered with a non-success status.
	#[error("HTTP {status}: {message}")]
	Http {
		/// HTTP status code.
		status: u16,
		/// Server-provided or synthesized detail message.
		message: String,
	},
	/// The response body could not be decoded.
	#[error("decode failed: {0}")]
	Decode(#[from] serde_json::Error),
}

impl FetchError {
	/// Returns true for an authentication failure (HTTP 401).
	pub fn is_auth(&self) -> bool {
		matches!(self, Self::Http { status: 401, .. })
	}

	/// Returns true for a server-side failure (HTTP 5xx).
	pub fn is_server_error(&self) -> bool {
		matches!(self, Self::Http { status, .. } if (500..600).contains(status))
	}
}
