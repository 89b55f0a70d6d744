//! Optimistic mutations: change local state first, confirm with the backend
//! second, restore the captured snapshot if the backend refuses.
//!
//! Calls are not coalesced. Two mutations of the same state started before
//! either settles each capture their own snapshot, and whichever settles last
//! decides what is left on rollback.

use std::cell::RefCell;
use std::fmt::Display;
use std::future::Future;

use crate::error::SocialFeedError;
use crate::notice::Notice;

/// A local state change that can be undone from a snapshot.
pub trait Mutation {
    type State;
    /// Whatever [`Mutation::rollback`] needs to restore the pre-mutation value.
    type Snapshot;

    /// Captures the snapshot, then applies the change.
    fn apply(&self, state: &mut Self::State) -> Self::Snapshot;

    /// Puts the captured value back.
    fn rollback(&self, state: &mut Self::State, snapshot: Self::Snapshot);

    /// Text shown once the backend confirms.
    fn success_message(&self, snapshot: &Self::Snapshot) -> String;
}

/// A mutation that has been applied locally and awaits the backend's verdict.
#[must_use = "an unsettled mutation never rolls back"]
pub struct Pending<M: Mutation> {
    mutation: M,
    snapshot: M::Snapshot,
}

/// Applies `mutation` to `state` and keeps the snapshot for [`Pending::settle`].
pub fn begin<M: Mutation>(mutation: M, state: &mut M::State) -> Pending<M> {
    let snapshot = mutation.apply(state);
    Pending { mutation, snapshot }
}

impl<M: Mutation> Pending<M> {
    pub fn snapshot(&self) -> &M::Snapshot {
        &self.snapshot
    }

    /// Keeps the optimistic state on success; restores the snapshot on failure.
    pub fn settle<T, E: Display>(self, state: &mut M::State, outcome: &Result<T, E>) -> Notice {
        match outcome {
            Ok(_) => Notice::success(self.mutation.success_message(&self.snapshot)),
            Err(e) => {
                tracing::warn!(reason = %e, "optimistic update rejected, rolling back");
                self.mutation.rollback(state, self.snapshot);
                Notice::error(e.to_string())
            }
        }
    }
}

/// The result of an optimistic mutation: what to tell the user and what the
/// backend returned.
#[derive(Debug)]
pub struct Settled<T> {
    pub notice: Notice,
    pub outcome: Result<T, SocialFeedError>,
}

impl<T> Settled<T> {
    /// A failure that happened before anything was applied.
    pub fn refused(err: SocialFeedError) -> Self {
        Self {
            notice: Notice::error(err.to_string()),
            outcome: Err(err),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Runs the full optimistic cycle against state shared on one task.
///
/// The local change is visible through `state` while `remote` is pending; the
/// borrow is released before awaiting so other code may read it meanwhile.
pub async fn apply_optimistic<M, T, F, Fut>(
    state: &RefCell<M::State>,
    mutation: M,
    remote: F,
) -> Settled<T>
where
    M: Mutation,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, SocialFeedError>>,
{
    let pending = {
        let mut guard = state.borrow_mut();
        begin(mutation, &mut *guard)
    };
    let outcome = remote().await;
    let notice = {
        let mut guard = state.borrow_mut();
        pending.settle(&mut *guard, &outcome)
    };
    Settled { notice, outcome }
}
