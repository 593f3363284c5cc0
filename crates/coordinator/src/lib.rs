//! Tab-scoped multi-resource async data coordinator.
//!
//! This crate owns the client-side state of a small, fixed set of
//! named remote resources (a balance object, paginated transaction and
//! purchase lists, and the like): lazy first loads per UI tab,
//! debounced search refetches, immediate filter refetches, load-more
//! pagination with append semantics, and a refresh-everything
//! operation that tolerates independent per-resource failure.
//!
//! # Design
//!
//! All mutable state lives inside one actor task ([`Coordinator`]
//! spawns it on the caller's runtime). UI-facing actions enqueue
//! commands; fetches run as spawned tasks that report settlement back
//! through the same channel, so state mutation is serialized at
//! command-processing points and no locking is needed around the
//! resource state itself.
//!
//! Every fetch is tagged with a per-resource [`generation`] counter.
//! A settlement is applied only when its generation is still current;
//! responses from superseded requests are dropped without touching
//! state ("latest request wins").
//!
//! The host UI observes a cloned [`CoordinatorSnapshot`] behind a
//! shared lock plus a cheap changed flag it can poll each frame.

pub mod debounce;
pub mod filters;
pub mod generation;
pub mod pagination;
pub mod slot;
pub mod tabs;

mod coordinator;

pub use coordinator::{
	Coordinator, CoordinatorBuilder, CoordinatorSnapshot, ResourceData, ResourceKind, ResourceSpec,
	ResourceView,
};
pub use tabdash_fetch::{
	AuthEventSink, FetchError, PageEnvelope, ResourceFetcher, ResourceId, ResourceRequest, TabId,
};
