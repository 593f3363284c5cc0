//! Load-more gating and page accumulation for paginated resources.

use tabdash_fetch::PageEnvelope;

/// Accumulated pages of one paginated resource.
///
/// Appending page n+1 extends the end of the existing sequence and
/// never reorders prior entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedCollection<T> {
	results: Vec<T>,
	count: u64,
	next_page: u32,
}

impl<T> Default for PagedCollection<T> {
	fn default() -> Self {
		Self {
			results: Vec::new(),
			count: 0,
			next_page: 1,
		}
	}
}

impl<T> PagedCollection<T> {
	/// Replaces the collection with a fresh first page.
	pub fn replace_with(&mut self, envelope: PageEnvelope<T>) {
		self.results = envelope.results;
		self.count = envelope.count;
		self.next_page = 2;
	}

	/// Appends a further page to the end of the collection.
	///
	/// `page` is the 1-based page number that was actually fetched; the
	/// next load-more continues from the page after it, even when the
	/// caller jumped ahead with an explicit page refresh.
	pub fn append_page(&mut self, page: u32, envelope: PageEnvelope<T>) {
		self.results.extend(envelope.results);
		self.count = envelope.count;
		self.next_page = page.saturating_add(1);
	}

	/// Items loaded so far, in arrival order.
	pub fn results(&self) -> &[T] {
		&self.results
	}

	/// Server-reported total item count.
	pub fn count(&self) -> u64 {
		self.count
	}

	/// Page number the next load-more call should request.
	pub fn next_page(&self) -> u32 {
		self.next_page
	}
}

/// Load-more gating for one paginated resource.
///
/// A load-more is permitted only when the last settled page reported a
/// further page and no load-more is currently in flight. A transient
/// failure clears the in-flight flag but leaves `has_next` unchanged,
/// so a retry stays possible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationController {
	has_next: bool,
	loading_more: bool,
}

impl PaginationController {
	/// Returns true when a load-more call is permitted.
	pub fn can_load_more(&self) -> bool {
		self.has_next && !self.loading_more
	}

	/// Returns true while a load-more is in flight.
	pub fn loading_more(&self) -> bool {
		self.loading_more
	}

	/// Returns true when the last settled page reported a further page.
	pub fn has_next(&self) -> bool {
		self.has_next
	}

	/// Marks a load-more as dispatched; returns false if not permitted.
	pub fn begin_load_more(&mut self) -> bool {
		if !self.can_load_more() {
			return false;
		}
		self.loading_more = true;
		true
	}

	/// Settles a successful page fetch.
	pub fn settle_success(&mut self, has_next: bool) {
		self.loading_more = false;
		self.has_next = has_next;
	}

	/// Settles a failed page fetch; `has_next` is left unchanged.
	pub fn settle_failure(&mut self) {
		self.loading_more = false;
	}

	/// Resets to the pre-first-page state (filter or search change).
	pub fn reset(&mut self) {
		self.has_next = false;
		self.loading_more = false;
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use tabdash_fetch::PageEnvelope;

	use super::*;

	fn page(results: Vec<&str>, next: Option<&str>) -> PageEnvelope<String> {
		PageEnvelope {
			count: results.len() as u64,
			results: results.into_iter().map(String::from).collect(),
			next: next.map(String::from),
			previous: None,
		}
	}

	#[test]
	fn append_preserves_prior_order() {
		let mut collection = PagedCollection::default();
		collection.replace_with(page(vec!["a"], Some("p2")));
		collection.append_page(2, page(vec!["b"], None));

		assert_eq!(collection.results(), ["a".to_string(), "b".to_string()]);
		assert_eq!(collection.next_page(), 3);
	}

	#[test]
	fn append_continues_from_the_fetched_page() {
		let mut collection = PagedCollection::default();
		collection.replace_with(page(vec!["a"], Some("p2")));
		collection.append_page(5, page(vec!["e"], Some("p6")));

		assert_eq!(collection.next_page(), 6);
	}

	#[test]
	fn replace_discards_accumulated_pages() {
		let mut collection = PagedCollection::default();
		collection.replace_with(page(vec!["a", "b"], Some("p2")));
		collection.append_page(2, page(vec!["c", "d"], None));
		collection.replace_with(page(vec!["x"], None));

		assert_eq!(collection.results(), ["x".to_string()]);
		assert_eq!(collection.next_page(), 2);
	}

	#[test]
	fn load_more_denied_when_exhausted() {
		let mut controller = PaginationController::default();
		controller.settle_success(false);
		assert!(!controller.can_load_more());
		assert!(!controller.begin_load_more());
	}

	#[test]
	fn load_more_denied_while_in_flight() {
		let mut controller = PaginationController::default();
		controller.settle_success(true);
		assert!(controller.begin_load_more());
		assert!(!controller.begin_load_more());
	}

	#[test]
	fn failure_keeps_has_next() {
		let mut controller = PaginationController::default();
		controller.settle_success(true);
		assert!(controller.begin_load_more());
		controller.settle_failure();

		assert!(controller.has_next());
		assert!(controller.can_load_more());
	}

	#[test]
	fn reset_clears_both_flags() {
		let mut controller = PaginationController::default();
		controller.settle_success(true);
		assert!(controller.begin_load_more());
		controller.reset();

		assert!(!controller.has_next());
		assert!(!controller.loading_more());
	}
}
