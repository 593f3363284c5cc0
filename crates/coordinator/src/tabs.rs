//! First-load gating per tab activation.

use rustc_hash::FxHashMap;

use tabdash_fetch::{ResourceId, TabId};

/// Decides which resources need their first load when a tab activates.
///
/// A resource needs a first load when its slot has never been
/// populated and no request for it is in flight; the caller supplies
/// that predicate since slot state lives with the actor. Re-activating
/// a tab whose resources are populated or loading returns nothing, so
/// cached slots are shown as-is until an explicit refresh or a scoped
/// filter/search change. A tab whose first load failed (error
/// recorded, no data, nothing in flight) is eligible again on the
/// next activation.
#[derive(Debug, Default)]
pub struct TabActivationGate {
	resources_by_tab: FxHashMap<TabId, Vec<ResourceId>>,
}

impl TabActivationGate {
	/// Creates an empty gate.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a resource as scoped to a tab.
	pub fn register(&mut self, tab: TabId, resource: ResourceId) {
		self.resources_by_tab.entry(tab).or_default().push(resource);
	}

	/// Activates a tab; returns the resources needing a first load.
	pub fn activate<F>(&self, tab: TabId, needs_first_load: F) -> Vec<ResourceId>
	where
		F: Fn(ResourceId) -> bool,
	{
		let Some(resources) = self.resources_by_tab.get(&tab) else {
			return Vec::new();
		};
		resources
			.iter()
			.copied()
			.filter(|resource| needs_first_load(*resource))
			.collect()
	}

	/// Resources scoped to the given tab, in registration order.
	pub fn resources_for(&self, tab: TabId) -> &[ResourceId] {
		self.resources_by_tab
			.get(&tab)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	const OVERVIEW: TabId = TabId("overview");
	const HISTORY: TabId = TabId("history");
	const BALANCE: ResourceId = ResourceId("balance");
	const TRANSACTIONS: ResourceId = ResourceId("transactions");

	fn gate() -> TabActivationGate {
		let mut gate = TabActivationGate::new();
		gate.register(OVERVIEW, BALANCE);
		gate.register(HISTORY, TRANSACTIONS);
		gate
	}

	#[test]
	fn activation_returns_resources_needing_first_load() {
		let gate = gate();
		assert_eq!(gate.activate(OVERVIEW, |_| true), vec![BALANCE]);
	}

	#[test]
	fn activation_skips_populated_and_loading_resources() {
		let gate = gate();
		assert!(gate.activate(OVERVIEW, |_| false).is_empty());
	}

	#[test]
	fn failed_first_load_is_eligible_again() {
		let gate = gate();
		let mut populated = HashSet::new();

		let needs = |populated: &HashSet<ResourceId>, resource: ResourceId| {
			!populated.contains(&resource)
		};
		assert_eq!(
			gate.activate(HISTORY, |r| needs(&populated, r)),
			vec![TRANSACTIONS]
		);
		// The first load failed: the slot is still unpopulated.
		assert_eq!(
			gate.activate(HISTORY, |r| needs(&populated, r)),
			vec![TRANSACTIONS]
		);

		populated.insert(TRANSACTIONS);
		assert!(gate.activate(HISTORY, |r| needs(&populated, r)).is_empty());
	}

	#[test]
	fn unknown_tab_activates_nothing() {
		let gate = gate();
		assert!(gate.activate(TabId("settings"), |_| true).is_empty());
	}
}
