//! Coordinator handle and builder.
//!
//! [`Coordinator`] is the UI-facing surface: actions enqueue commands
//! to a single actor task, and the host observes state by cloning the
//! shared [`CoordinatorSnapshot`] whenever [`Coordinator::take_changed`]
//! reports an update.

mod actor;
mod snapshot;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use tabdash_fetch::{AuthEventSink, DEFAULT_PAGE_SIZE, ResourceFetcher, ResourceId, TabId};

use crate::debounce::DEFAULT_QUIET_PERIOD;

use actor::{Command, CoordinatorActor};
pub use snapshot::{CoordinatorSnapshot, ResourceData, ResourceView};

/// Whether a resource is a single object or a paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
	/// A single object fetched in one request, no pagination.
	Object,
	/// A paginated collection fetched page by page.
	Paginated,
}

/// Declares one remote resource owned by the coordinator.
#[derive(Debug, Clone)]
pub struct ResourceSpec {
	/// Resource identifier, unique within one coordinator.
	pub id: ResourceId,
	/// Object or paginated collection.
	pub kind: ResourceKind,
	/// Tab whose activation triggers this resource's first load.
	///
	/// A resource without a tab is loaded only by explicit refresh.
	pub tab: Option<TabId>,
}

impl ResourceSpec {
	/// Declares a non-paginated object resource.
	pub fn object(id: ResourceId) -> Self {
		Self {
			id,
			kind: ResourceKind::Object,
			tab: None,
		}
	}

	/// Declares a paginated collection resource.
	pub fn paginated(id: ResourceId) -> Self {
		Self {
			id,
			kind: ResourceKind::Paginated,
			tab: None,
		}
	}

	/// Scopes the resource's first load to a tab activation.
	pub fn on_tab(mut self, tab: TabId) -> Self {
		self.tab = Some(tab);
		self
	}
}

/// Configures and spawns a [`Coordinator`].
pub struct CoordinatorBuilder {
	resources: Vec<ResourceSpec>,
	quiet_period: Duration,
	page_size: u32,
	auth_sink: Option<AuthEventSink>,
}

impl Default for CoordinatorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl CoordinatorBuilder {
	/// Creates a builder with the default debounce and page size.
	pub fn new() -> Self {
		Self {
			resources: Vec::new(),
			quiet_period: DEFAULT_QUIET_PERIOD,
			page_size: DEFAULT_PAGE_SIZE,
			auth_sink: None,
		}
	}

	/// Adds a resource. Registration order is the `refresh_all` dispatch order.
	pub fn resource(mut self, spec: ResourceSpec) -> Self {
		self.resources.push(spec);
		self
	}

	/// Overrides the search debounce quiet period.
	pub fn quiet_period(mut self, quiet_period: Duration) -> Self {
		self.quiet_period = quiet_period;
		self
	}

	/// Overrides the page size used for paginated fetches.
	pub fn page_size(mut self, page_size: u32) -> Self {
		self.page_size = page_size;
		self
	}

	/// Installs a callback invoked when a fetch settles with HTTP 401.
	pub fn on_auth_error(mut self, sink: AuthEventSink) -> Self {
		self.auth_sink = Some(sink);
		self
	}

	/// Spawns the coordinator actor on the current tokio runtime.
	pub fn spawn(self, fetcher: Arc<dyn ResourceFetcher>) -> Coordinator {
		let shared = Arc::new(RwLock::new(CoordinatorSnapshot::default()));
		let changed = Arc::new(AtomicBool::new(false));
		let shutdown = CancellationToken::new();
		let (command_tx, command_rx) = mpsc::unbounded_channel();

		let actor = CoordinatorActor::new(
			fetcher,
			self.resources,
			self.quiet_period,
			self.page_size,
			self.auth_sink,
			Arc::clone(&shared),
			Arc::clone(&changed),
			command_tx.clone(),
			shutdown.clone(),
		);
		actor.publish_snapshot();
		let actor_task = tokio::spawn(actor.run(command_rx));

		Coordinator {
			shared,
			changed,
			command_tx,
			shutdown,
			_actor: actor_task,
		}
	}
}

/// Handle to a running coordinator.
///
/// Cloning the snapshot is the only way state leaves the actor; all
/// mutation goes through the action methods. Dropping the handle
/// disposes the coordinator: pending debounce timers are cancelled and
/// late-arriving responses are silently dropped.
pub struct Coordinator {
	shared: Arc<RwLock<CoordinatorSnapshot>>,
	changed: Arc<AtomicBool>,
	command_tx: mpsc::UnboundedSender<Command>,
	shutdown: CancellationToken,
	_actor: tokio::task::JoinHandle<()>,
}

impl Coordinator {
	/// Starts configuring a coordinator.
	pub fn builder() -> CoordinatorBuilder {
		CoordinatorBuilder::new()
	}

	/// Clones the current state snapshot.
	pub fn snapshot(&self) -> CoordinatorSnapshot {
		self.shared.read().clone()
	}

	/// Returns true if state changed since the last call.
	pub fn take_changed(&self) -> bool {
		self.changed.swap(false, Ordering::AcqRel)
	}

	/// Activates a tab, triggering first loads for its resources.
	pub fn set_active_tab(&self, tab: TabId) {
		let _ = self.command_tx.send(Command::SetActiveTab(tab));
	}

	/// Updates the search query; the refetch is debounced.
	pub fn set_search_query(&self, text: impl Into<String>) {
		let _ = self.command_tx.send(Command::SetSearchQuery(text.into()));
	}

	/// Overlays filters onto a resource and refetches it immediately.
	pub fn set_filters(
		&self,
		resource: ResourceId,
		partial: impl IntoIterator<Item = (String, String)>,
	) {
		let _ = self.command_tx.send(Command::SetFilters {
			resource,
			partial: partial.into_iter().collect(),
		});
	}

	/// Refetches one resource at the given 1-based page.
	pub fn refresh(&self, resource: ResourceId, page: u32) {
		let _ = self.command_tx.send(Command::Refresh { resource, page });
	}

	/// Loads the next page of a paginated resource, if permitted.
	pub fn load_more(&self, resource: ResourceId) {
		let _ = self.command_tx.send(Command::LoadMore(resource));
	}

	/// Refreshes every resource concurrently.
	///
	/// Completes once every constituent fetch has settled; per-resource
	/// failures are recorded in their own slots and never escape here.
	pub async fn refresh_all(&self) {
		let (done_tx, done_rx) = oneshot::channel();
		if self
			.command_tx
			.send(Command::RefreshAll { done: done_tx })
			.is_err()
		{
			return;
		}
		let _ = done_rx.await;
	}

	/// Disposes the coordinator.
	pub fn shutdown(&self) {
		self.shutdown.cancel();
	}
}

impl Drop for Coordinator {
	fn drop(&mut self) {
		self.shutdown.cancel();
	}
}
