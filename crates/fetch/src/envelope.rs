//! Pagination envelope returned by paginated resource endpoints.

use serde::{Deserialize, Serialize};

/// One page of a paginated collection.
///
/// Matches the `{results, count, next, previous}` response shape.
/// `next` and `previous` are opaque cursor tokens; absence (or null)
/// of `next` means there are no further pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
	/// Items on this page, in server order.
	pub results: Vec<T>,
	/// Total number of items across all pages.
	#[serde(default)]
	pub count: u64,
	/// Cursor for the next page, if any.
	#[serde(default)]
	pub next: Option<String>,
	/// Cursor for the previous page, if any.
	#[serde(default)]
	pub previous: Option<String>,
}

impl<T> PageEnvelope<T> {
	/// Returns true when a further page exists.
	pub fn has_next(&self) -> bool {
		self.next.is_some()
	}
}

impl<T> Default for PageEnvelope<T> {
	fn default() -> Self {
		Self {
			results: Vec::new(),
			count: 0,
			next: None,
			previous: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn deserializes_full_envelope() {
		let envelope: PageEnvelope<serde_json::Value> = serde_json::from_str(
			r#"{"results": [{"id": 1}], "count": 3, "next": "p2", "previous": null}"#,
		)
		.unwrap();
		assert_eq!(envelope.results.len(), 1);
		assert_eq!(envelope.count, 3);
		assert!(envelope.has_next());
		assert!(envelope.previous.is_none());
	}

	#[test]
	fn tolerates_absent_cursors_and_count() {
		let envelope: PageEnvelope<serde_json::Value> =
			serde_json::from_str(r#"{"results": []}"#).unwrap();
		assert_eq!(envelope.count, 0);
		assert!(!envelope.has_next());
		assert!(envelope.previous.is_none());
	}
}
