//! Filter state and search normalization.

use indexmap::IndexMap;

/// Partial-overlay filter map for one resource.
///
/// Unset keys are absent, never empty-valued. Merging a partial update
/// overlays only the given keys and leaves the rest untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
	values: IndexMap<String, String>,
}

impl FilterSet {
	/// Creates an empty filter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Overlays the given key/value pairs onto this set.
	pub fn merge(&mut self, partial: impl IntoIterator<Item = (String, String)>) {
		for (key, value) in partial {
			self.values.insert(key, value);
		}
	}

	/// Removes one key; returns true if it was present.
	pub fn clear_key(&mut self, key: &str) -> bool {
		self.values.shift_remove(key).is_some()
	}

	/// Returns the value for a key, if set.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.values.get(key).map(String::as_str)
	}

	/// Returns true when no filters are set.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates filter pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Clones the pairs for building an outbound request.
	pub fn to_pairs(&self) -> Vec<(String, String)> {
		self.values
			.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}
}

/// Returns the effective search term: trimmed, `None` when empty.
///
/// An empty effective search means the `search` parameter is omitted
/// from the outbound request entirely, not sent as an empty string.
pub fn effective_search(raw: &str) -> Option<&str> {
	let trimmed = raw.trim();
	(!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn merge_overlays_only_given_keys() {
		let mut filters = FilterSet::new();
		filters.merge([
			("status".to_string(), "paid".to_string()),
			("month".to_string(), "2024-05".to_string()),
		]);
		filters.merge([("status".to_string(), "pending".to_string())]);

		assert_eq!(filters.get("status"), Some("pending"));
		assert_eq!(filters.get("month"), Some("2024-05"));
	}

	#[test]
	fn clear_key_removes_only_that_key() {
		let mut filters = FilterSet::new();
		filters.merge([
			("status".to_string(), "paid".to_string()),
			("month".to_string(), "2024-05".to_string()),
		]);

		assert!(filters.clear_key("status"));
		assert!(!filters.clear_key("status"));
		assert_eq!(filters.get("status"), None);
		assert_eq!(filters.get("month"), Some("2024-05"));
	}

	#[test]
	fn effective_search_trims_and_drops_empty() {
		assert_eq!(effective_search("  tutor  "), Some("tutor"));
		assert_eq!(effective_search(""), None);
		assert_eq!(effective_search("   "), None);
		assert_eq!(effective_search("\t\n"), None);
	}
}
