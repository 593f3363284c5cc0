//! Monotonic per-resource request generations.
//!
//! Every dispatched fetch captures the generation current at dispatch
//! time; a settlement is applied only if that generation is still the
//! resource's newest. This is the single "latest request wins"
//! mechanism shared by refresh, search, filter, and load-more paths.

use rustc_hash::FxHashMap;

use tabdash_fetch::ResourceId;

/// Per-resource generation counters.
#[derive(Debug, Default)]
pub struct GenerationStore {
	current: FxHashMap<ResourceId, u64>,
}

impl GenerationStore {
	/// Creates an empty store; every resource starts at generation 0.
	pub fn new() -> Self {
		Self::default()
	}

	/// Bumps the resource's generation and returns the new value.
	pub fn advance(&mut self, resource: ResourceId) -> u64 {
		let slot = self.current.entry(resource).or_insert(0);
		*slot += 1;
		*slot
	}

	/// Returns true if `generation` is still the resource's newest.
	pub fn is_current(&self, resource: ResourceId, generation: u64) -> bool {
		self.current.get(&resource).copied() == Some(generation)
	}

	/// Marks every outstanding generation as superseded.
	///
	/// Used on disposal so late-arriving settlements are dropped.
	pub fn supersede_all(&mut self) {
		for generation in self.current.values_mut() {
			*generation += 1;
		}
	}
}
