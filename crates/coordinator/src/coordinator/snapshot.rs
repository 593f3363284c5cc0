//! Read-only state snapshot observed by the host UI.

use rustc_hash::FxHashMap;

use tabdash_fetch::{ResourceId, TabId};

use crate::filters::FilterSet;
use crate::pagination::PagedCollection;

/// Payload held by a resource slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceData {
	/// A single non-paginated object.
	Object(serde_json::Value),
	/// Accumulated pages of a collection.
	Collection(PagedCollection<serde_json::Value>),
}

impl ResourceData {
	/// Returns the object payload, if this is an object resource.
	pub fn as_object(&self) -> Option<&serde_json::Value> {
		match self {
			Self::Object(value) => Some(value),
			Self::Collection(_) => None,
		}
	}

	/// Returns the collection payload, if this is a paginated resource.
	pub fn as_collection(&self) -> Option<&PagedCollection<serde_json::Value>> {
		match self {
			Self::Collection(collection) => Some(collection),
			Self::Object(_) => None,
		}
	}
}

/// Read-only view of one resource slot plus its pagination state.
#[derive(Debug, Clone, Default)]
pub struct ResourceView {
	/// Current payload, if the resource has ever loaded.
	pub data: Option<ResourceData>,
	/// True while a refresh is in flight.
	pub loading: bool,
	/// Error from the most recent failed settlement.
	pub error: Option<String>,
	/// Filters currently applied to this resource.
	pub filters: FilterSet,
	/// True when a further page exists.
	pub has_next: bool,
	/// True while a load-more is in flight.
	pub loading_more: bool,
}

/// Read-only snapshot of the whole coordinator.
#[derive(Debug, Clone, Default)]
pub struct CoordinatorSnapshot {
	/// Currently active tab, once one has been selected.
	pub active_tab: Option<TabId>,
	/// Raw search query as last typed (not trimmed).
	pub search_query: String,
	/// Per-resource views.
	pub resources: FxHashMap<ResourceId, ResourceView>,
}

impl CoordinatorSnapshot {
	/// Returns the view for one resource.
	pub fn resource(&self, id: ResourceId) -> Option<&ResourceView> {
		self.resources.get(&id)
	}
}
