//! Outbound request shape for resource fetches.

use indexmap::IndexMap;

/// Default page size for paginated resources.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Parameters for one resource fetch.
///
/// Filters keep insertion order so the rendered parameter list is
/// deterministic. `search` holds the effective (already trimmed,
/// non-empty) search term; an empty search is represented as `None`
/// and is omitted from the outbound parameters entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
	/// 1-based page number.
	pub page: u32,
	/// Number of items per page.
	pub page_size: u32,
	/// Filter key/value pairs for this resource.
	pub filters: IndexMap<String, String>,
	/// Effective search term, if any.
	pub search: Option<String>,
}

impl Default for ResourceRequest {
	fn default() -> Self {
		Self::first_page()
	}
}

impl ResourceRequest {
	/// Creates a request for the first page with the default page size.
	pub fn first_page() -> Self {
		Self {
			page: 1,
			page_size: DEFAULT_PAGE_SIZE,
			filters: IndexMap::new(),
			search: None,
		}
	}

	/// Sets the page number.
	pub fn with_page(mut self, page: u32) -> Self {
		self.page = page;
		self
	}

	/// Sets the page size.
	pub fn with_page_size(mut self, page_size: u32) -> Self {
		self.page_size = page_size;
		self
	}

	/// Overlays filter pairs onto the request.
	pub fn with_filters(mut self, filters: impl IntoIterator<Item = (String, String)>) -> Self {
		for (key, value) in filters {
			self.filters.insert(key, value);
		}
		self
	}

	/// Sets the effective search term.
	pub fn with_search(mut self, search: Option<String>) -> Self {
		self.search = search;
		self
	}

	/// Renders the outbound parameter list.
	///
	/// Order: `page`, `page_size`, filters in insertion order, then
	/// `search` only when a term is present.
	pub fn query_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::with_capacity(2 + self.filters.len() + usize::from(self.search.is_some()));
		pairs.push(("page".to_string(), self.page.to_string()));
		pairs.push(("page_size".to_string(), self.page_size.to_string()));
		for (key, value) in &self.filters {
			pairs.push((key.clone(), value.clone()));
		}
		if let Some(search) = &self.search {
			pairs.push(("search".to_string(), search.clone()));
		}
		pairs
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn pairs(request: &ResourceRequest) -> Vec<(String, String)> {
		request.query_pairs()
	}

	#[test]
	fn first_page_defaults() {
		let request = ResourceRequest::first_page();
		assert_eq!(request.page, 1);
		assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
		assert!(request.filters.is_empty());
		assert!(request.search.is_none());
	}

	#[test]
	fn query_pairs_omit_absent_search() {
		let request = ResourceRequest::first_page();
		let rendered = pairs(&request);
		assert!(rendered.iter().all(|(key, _)| key != "search"));
	}

	#[test]
	fn query_pairs_order_is_deterministic() {
		let request = ResourceRequest::first_page()
			.with_filters([
				("status".to_string(), "paid".to_string()),
				("month".to_string(), "2024-05".to_string()),
			])
			.with_search(Some("tutor".to_string()));
		let rendered = pairs(&request);
		assert_eq!(
			rendered,
			vec![
				("page".to_string(), "1".to_string()),
				("page_size".to_string(), "20".to_string()),
				("status".to_string(), "paid".to_string()),
				("month".to_string(), "2024-05".to_string()),
				("search".to_string(), "tutor".to_string()),
			]
		);
	}

	#[test]
	fn with_filters_overlays_existing_keys() {
		let request = ResourceRequest::first_page()
			.with_filters([("status".to_string(), "paid".to_string())])
			.with_filters([("status".to_string(), "pending".to_string())]);
		assert_eq!(request.filters.get("status").map(String::as_str), Some("pending"));
		assert_eq!(request.filters.len(), 1);
	}
}
