//! Per-resource slot state.

/// State of one remote resource: payload, in-flight flag, last error.
///
/// `loading` is true only between dispatch and settlement of the
/// slot's most recent request. A successful reload clears any stale
/// `error`; a failed reload keeps existing `data` so the UI can show
/// the last good payload alongside the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSlot<T> {
	data: Option<T>,
	loading: bool,
	error: Option<String>,
}

impl<T> Default for ResourceSlot<T> {
	fn default() -> Self {
		Self {
			data: None,
			loading: false,
			error: None,
		}
	}
}

impl<T> ResourceSlot<T> {
	/// Creates an empty slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the current payload, if any.
	pub fn data(&self) -> Option<&T> {
		self.data.as_ref()
	}

	/// Takes the payload out of the slot, leaving it empty.
	pub fn take_data(&mut self) -> Option<T> {
		self.data.take()
	}

	/// Returns true while a request for this slot is in flight.
	pub fn loading(&self) -> bool {
		self.loading
	}

	/// Returns the last error, if the most recent settlement failed.
	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	/// Returns true once the slot has ever held data.
	pub fn is_populated(&self) -> bool {
		self.data.is_some()
	}

	/// Marks a request as dispatched.
	pub fn begin_load(&mut self) {
		self.loading = true;
	}

	/// Settles the slot with fresh data, clearing any stale error.
	pub fn resolve(&mut self, data: T) {
		self.data = Some(data);
		self.loading = false;
		self.error = None;
	}

	/// Settles the slot with a failure, keeping existing data.
	pub fn reject(&mut self, message: impl Into<String>) {
		self.loading = false;
		self.error = Some(message.into());
	}
}
