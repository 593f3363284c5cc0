//! Coordinator actor: serialized state mutation and fetch settlement.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use tabdash_fetch::{
	AuthEventSink, FetchError, PageEnvelope, ResourceFetcher, ResourceId, ResourceRequest, TabId,
};

use crate::debounce::Debouncer;
use crate::filters::{FilterSet, effective_search};
use crate::generation::GenerationStore;
use crate::pagination::{PagedCollection, PaginationController};
use crate::slot::ResourceSlot;
use crate::tabs::TabActivationGate;

use super::snapshot::{CoordinatorSnapshot, ResourceData, ResourceView};
use super::{ResourceKind, ResourceSpec};

/// Actions and internal events processed by the actor, in arrival order.
pub(super) enum Command {
	SetActiveTab(TabId),
	SetSearchQuery(String),
	SetFilters {
		resource: ResourceId,
		partial: Vec<(String, String)>,
	},
	Refresh {
		resource: ResourceId,
		page: u32,
	},
	LoadMore(ResourceId),
	RefreshAll {
		done: oneshot::Sender<()>,
	},
	SearchDebounceElapsed,
	Settled(Settlement),
}

/// Result of one spawned fetch task.
pub(super) struct Settlement {
	resource: ResourceId,
	generation: u64,
	page: u32,
	load_more: bool,
	batch: Option<u64>,
	outcome: Result<FetchOutcome, FetchError>,
}

enum FetchOutcome {
	Object(serde_json::Value),
	Page(PageEnvelope<serde_json::Value>),
}

struct ResourceState {
	spec: ResourceSpec,
	slot: ResourceSlot<ResourceData>,
	filters: FilterSet,
	pagination: PaginationController,
}

struct Batch {
	remaining: usize,
	done: oneshot::Sender<()>,
}

pub(super) struct CoordinatorActor {
	fetcher: Arc<dyn ResourceFetcher>,
	resources: FxHashMap<ResourceId, ResourceState>,
	/// Registration order; drives `refresh_all` dispatch order.
	order: Vec<ResourceId>,
	active_tab: Option<TabId>,
	search_query: String,
	generations: GenerationStore,
	gate: TabActivationGate,
	debouncer: Debouncer,
	page_size: u32,
	auth_sink: Option<AuthEventSink>,
	shared: Arc<RwLock<CoordinatorSnapshot>>,
	changed: Arc<AtomicBool>,
	command_tx: mpsc::UnboundedSender<Command>,
	batches: FxHashMap<u64, Batch>,
	next_batch: u64,
	shutdown: CancellationToken,
}

impl CoordinatorActor {
	#[allow(clippy::too_many_arguments)]
	pub(super) fn new(
		fetcher: Arc<dyn ResourceFetcher>,
		specs: Vec<ResourceSpec>,
		quiet_period: Duration,
		page_size: u32,
		auth_sink: Option<AuthEventSink>,
		shared: Arc<RwLock<CoordinatorSnapshot>>,
		changed: Arc<AtomicBool>,
		command_tx: mpsc::UnboundedSender<Command>,
		shutdown: CancellationToken,
	) -> Self {
		let mut resources = FxHashMap::default();
		let mut order = Vec::with_capacity(specs.len());
		let mut gate = TabActivationGate::new();
		for spec in specs {
			if let Some(tab) = spec.tab {
				gate.register(tab, spec.id);
			}
			order.push(spec.id);
			resources.insert(
				spec.id,
				ResourceState {
					spec,
					slot: ResourceSlot::new(),
					filters: FilterSet::new(),
					pagination: PaginationController::default(),
				},
			);
		}

		Self {
			fetcher,
			resources,
			order,
			active_tab: None,
			search_query: String::new(),
			generations: GenerationStore::new(),
			gate,
			debouncer: Debouncer::new(quiet_period),
			page_size,
			auth_sink,
			shared,
			changed,
			command_tx,
			batches: FxHashMap::default(),
			next_batch: 0,
			shutdown,
		}
	}

	pub(super) async fn run(mut self, mut command_rx: mpsc::UnboundedReceiver<Command>) {
		let shutdown = self.shutdown.clone();
		loop {
			tokio::select! {
				_ = shutdown.cancelled() => {
					self.dispose();
					break;
				}
				maybe_cmd = command_rx.recv() => match maybe_cmd {
					Some(command) => {
						if self.handle(command) {
							self.publish_snapshot();
						}
					}
					None => {
						self.dispose();
						break;
					}
				}
			}
		}
	}

	fn dispose(&mut self) {
		self.debouncer.cancel();
		self.generations.supersede_all();
		for (_, batch) in self.batches.drain() {
			let _ = batch.done.send(());
		}
		trace!("coordinator disposed");
	}

	fn handle(&mut self, command: Command) -> bool {
		match command {
			Command::SetActiveTab(tab) => self.set_active_tab(tab),
			Command::SetSearchQuery(text) => self.set_search_query(text),
			Command::SetFilters { resource, partial } => self.set_filters(resource, partial),
			Command::Refresh { resource, page } => self.refresh(resource, page),
			Command::LoadMore(resource) => self.load_more(resource),
			Command::RefreshAll { done } => self.refresh_all(done),
			Command::SearchDebounceElapsed => self.search_elapsed(),
			Command::Settled(settlement) => self.apply_settlement(settlement),
		}
	}

	fn set_active_tab(&mut self, tab: TabId) -> bool {
		if self.active_tab == Some(tab) {
			return false;
		}
		self.active_tab = Some(tab);
		// First-load eligibility comes from slot state, so a tab whose
		// first load failed is retried on the next activation while a
		// populated or in-flight slot is left alone.
		let due = self.gate.activate(tab, |resource| {
			self.resources
				.get(&resource)
				.is_some_and(|state| !state.slot.is_populated() && !state.slot.loading())
		});
		for resource in due {
			self.dispatch(resource, 1, false, None);
		}
		true
	}

	/// Search updates the snapshot immediately; the refetch is debounced.
	fn set_search_query(&mut self, text: String) -> bool {
		if self.search_query == text {
			return false;
		}
		self.search_query = text;
		let tx = self.command_tx.clone();
		self.debouncer.schedule(move || {
			let _ = tx.send(Command::SearchDebounceElapsed);
		});
		true
	}

	fn search_elapsed(&mut self) -> bool {
		let Some(tab) = self.active_tab else {
			return false;
		};
		let due: Vec<ResourceId> = self
			.gate
			.resources_for(tab)
			.iter()
			.copied()
			.filter(|id| {
				self.resources
					.get(id)
					.is_some_and(|state| state.spec.kind == ResourceKind::Paginated)
			})
			.collect();
		let mut changed = false;
		for resource in due {
			changed |= self.refetch_first_page(resource);
		}
		changed
	}

	/// Filters are discrete selections; the refetch is immediate.
	fn set_filters(&mut self, resource: ResourceId, partial: Vec<(String, String)>) -> bool {
		let Some(state) = self.resources.get_mut(&resource) else {
			return false;
		};
		state.filters.merge(partial);
		self.refetch_first_page(resource);
		true
	}

	fn refresh(&mut self, resource: ResourceId, page: u32) -> bool {
		if !self.resources.contains_key(&resource) {
			return false;
		}
		if page <= 1 {
			self.refetch_first_page(resource)
		} else {
			self.dispatch(resource, page, false, None);
			true
		}
	}

	fn load_more(&mut self, resource: ResourceId) -> bool {
		let Some(state) = self.resources.get_mut(&resource) else {
			return false;
		};
		if state.spec.kind != ResourceKind::Paginated {
			return false;
		}
		if !state.pagination.begin_load_more() {
			// Exhausted or already loading: no fetch, no state change.
			return false;
		}
		let page = match state.slot.data() {
			Some(ResourceData::Collection(collection)) => collection.next_page(),
			_ => 1,
		};
		self.dispatch(resource, page, true, None);
		true
	}

	fn refresh_all(&mut self, done: oneshot::Sender<()>) -> bool {
		if self.order.is_empty() {
			let _ = done.send(());
			return false;
		}
		let batch = self.next_batch;
		self.next_batch += 1;
		self.batches.insert(
			batch,
			Batch {
				remaining: self.order.len(),
				done,
			},
		);
		debug!(batch, resources = self.order.len(), "refresh-all dispatched");
		for resource in self.order.clone() {
			if let Some(state) = self.resources.get_mut(&resource) {
				state.pagination.reset();
			}
			self.dispatch(resource, 1, false, Some(batch));
		}
		true
	}

	/// Resets pagination and refetches the first page of one resource.
	fn refetch_first_page(&mut self, resource: ResourceId) -> bool {
		let Some(state) = self.resources.get_mut(&resource) else {
			return false;
		};
		state.pagination.reset();
		self.dispatch(resource, 1, false, None);
		true
	}

	fn dispatch(&mut self, resource: ResourceId, page: u32, load_more: bool, batch: Option<u64>) {
		if !self.resources.contains_key(&resource) {
			if let Some(batch) = batch {
				self.settle_batch(batch);
			}
			return;
		}
		let generation = self.generations.advance(resource);
		let Some(state) = self.resources.get_mut(&resource) else {
			return;
		};
		if !load_more {
			state.slot.begin_load();
		}
		let request = match state.spec.kind {
			ResourceKind::Paginated => Some(
				ResourceRequest::first_page()
					.with_page(page)
					.with_page_size(self.page_size)
					.with_filters(state.filters.to_pairs())
					.with_search(effective_search(&self.search_query).map(String::from)),
			),
			ResourceKind::Object => None,
		};
		debug!(resource = %resource, generation, page, load_more, "dispatching fetch");

		let fetcher = Arc::clone(&self.fetcher);
		let tx = self.command_tx.clone();
		tokio::spawn(async move {
			let outcome = match request {
				Some(request) => fetcher
					.fetch_page(resource, &request)
					.await
					.map(FetchOutcome::Page),
				None => fetcher.fetch_object(resource).await.map(FetchOutcome::Object),
			};
			let _ = tx.send(Command::Settled(Settlement {
				resource,
				generation,
				page,
				load_more,
				batch,
				outcome,
			}));
		});
	}

	fn settle_batch(&mut self, batch: u64) {
		let finished = match self.batches.get_mut(&batch) {
			Some(entry) => {
				entry.remaining -= 1;
				entry.remaining == 0
			}
			None => return,
		};
		if finished && let Some(entry) = self.batches.remove(&batch) {
			let _ = entry.done.send(());
		}
	}

	fn apply_settlement(&mut self, settlement: Settlement) -> bool {
		let Settlement {
			resource,
			generation,
			page,
			load_more,
			batch,
			outcome,
		} = settlement;

		// A batch completes when its fetches settle, stale or not.
		if let Some(batch) = batch {
			self.settle_batch(batch);
		}
		// A 401 is a real auth signal even from a superseded request.
		if let Err(err) = &outcome
			&& err.is_auth()
			&& let Some(sink) = &self.auth_sink
		{
			sink(err);
		}
		if !self.generations.is_current(resource, generation) {
			trace!(resource = %resource, generation, "discarding stale response");
			return false;
		}
		let Some(state) = self.resources.get_mut(&resource) else {
			return false;
		};

		match outcome {
			Ok(FetchOutcome::Object(value)) => {
				debug!(resource = %resource, generation, "object fetch settled");
				state.slot.resolve(ResourceData::Object(value));
			}
			Ok(FetchOutcome::Page(envelope)) => {
				debug!(
					resource = %resource,
					generation,
					page,
					results = envelope.results.len(),
					"page fetch settled"
				);
				let has_next = envelope.has_next();
				let mut collection = match (page > 1, state.slot.take_data()) {
					(true, Some(ResourceData::Collection(collection))) => collection,
					_ => PagedCollection::default(),
				};
				if page <= 1 {
					collection.replace_with(envelope);
				} else {
					collection.append_page(page, envelope);
				}
				state.slot.resolve(ResourceData::Collection(collection));
				state.pagination.settle_success(has_next);
			}
			Err(err) => {
				warn!(resource = %resource, generation, error = %err, load_more, "fetch failed");
				state.slot.reject(err.to_string());
				state.pagination.settle_failure();
			}
		}
		true
	}

	/// Publishes the actor state as a fresh shared snapshot.
	pub(super) fn publish_snapshot(&self) {
		let snapshot = CoordinatorSnapshot {
			active_tab: self.active_tab,
			search_query: self.search_query.clone(),
			resources: self
				.resources
				.iter()
				.map(|(id, state)| {
					(
						*id,
						ResourceView {
							data: state.slot.data().cloned(),
							loading: state.slot.loading(),
							error: state.slot.error().map(String::from),
							filters: state.filters.clone(),
							has_next: state.pagination.has_next(),
							loading_more: state.pagination.loading_more(),
						},
					)
				})
				.collect(),
		};
		*self.shared.write() = snapshot;
		self.changed.store(true, Ordering::Release);
	}
}
