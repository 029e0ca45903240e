// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The only way to touch a [`ConsoleState`] once a console exists.
//!
//! [`DispatchSafe::invoke_and_wait`] runs an operation inside a mutex guarded critical
//! section and returns after it has completed. The thread that currently holds the
//! section is "the owner context". If code running in the owner context calls
//! [`invoke_and_wait`] again (for example a print from inside another operation), the
//! nested operation is queued and applied before the section is released, in the
//! order it was requested. Nothing deadlocks and nothing interleaves.
//!
//! Queries that need a return value cannot be deferred, so
//! [`DispatchSafe::try_invoke_and_wait`] refuses to run from the owner context.
//!
//! [`invoke_and_wait`]: DispatchSafe::invoke_and_wait

use std::{cell::RefCell,
          fmt::{Debug, Formatter},
          sync::Arc};

use crate::{ConsoleError, ConsoleState, StdMutex, TextSurface, lock_recovering};

type DeferredOp<S> = Box<dyn FnOnce(&mut ConsoleState<S>) + Send>;

thread_local! {
    /// Identity of every console whose critical section this thread is inside.
    static OWNER_CONTEXTS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks the current thread as the owner context for the lifetime of the guard.
struct OwnerContextGuard {
    id: usize,
}

impl OwnerContextGuard {
    fn enter(id: usize) -> Self {
        OWNER_CONTEXTS.with_borrow_mut(|ids| ids.push(id));
        Self { id }
    }

    fn is_entered(id: usize) -> bool {
        OWNER_CONTEXTS.with_borrow(|ids| ids.contains(&id))
    }
}

impl Drop for OwnerContextGuard {
    fn drop(&mut self) {
        OWNER_CONTEXTS.with_borrow_mut(|ids| {
            if let Some(index) = ids.iter().rposition(|it| *it == self.id) {
                ids.remove(index);
            }
        });
    }
}

/// Cheap to clone; every clone refers to the same console.
pub struct DispatchSafe<S: TextSurface> {
    state: Arc<StdMutex<ConsoleState<S>>>,
    deferred: Arc<StdMutex<Vec<DeferredOp<S>>>>,
}

impl<S: TextSurface> Clone for DispatchSafe<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            deferred: Arc::clone(&self.deferred),
        }
    }
}

impl<S: TextSurface> Debug for DispatchSafe<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchSafe")
            .field("id", &self.id())
            .finish_non_exhaustive()
    }
}

impl<S: TextSurface + 'static> DispatchSafe<S> {
    #[must_use]
    pub fn new(state: ConsoleState<S>) -> Self {
        Self {
            state: Arc::new(StdMutex::new(state)),
            deferred: Arc::new(StdMutex::new(Vec::new())),
        }
    }

    /// Is the current thread inside this console's critical section?
    #[must_use]
    pub fn is_owner_context(&self) -> bool { OwnerContextGuard::is_entered(self.id()) }

    /// Run `op` against the state and wait for it. From the owner context, `op` is
    /// queued behind the operation that is currently running instead.
    ///
    /// In that case this returns before `op` has run: the caller (still inside the
    /// running operation) does not see its effect. It is applied before the critical
    /// section is released, in request order.
    pub fn invoke_and_wait(&self, op: impl FnOnce(&mut ConsoleState<S>) + Send + 'static) {
        if self.is_owner_context() {
            lock_recovering(&self.deferred).push(Box::new(op));
            return;
        }
        self.run_in_owner_context(op);
    }

    /// Run `op` against the state and hand back its result.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::ReentrantDispatch`] when called from the owner context.
    pub fn try_invoke_and_wait<R>(
        &self,
        op: impl FnOnce(&mut ConsoleState<S>) -> R,
    ) -> Result<R, ConsoleError> {
        if self.is_owner_context() {
            return Err(ConsoleError::ReentrantDispatch);
        }
        Ok(self.run_in_owner_context(op))
    }

    fn run_in_owner_context<R>(&self, op: impl FnOnce(&mut ConsoleState<S>) -> R) -> R {
        let mut state = lock_recovering(&self.state);
        // Dropped before `state`, so the thread leaves the owner context while it still
        // holds the lock.
        let _owner_context = OwnerContextGuard::enter(self.id());

        let it = op(&mut *state);
        self.drain_deferred(&mut *state);
        it
    }

    fn drain_deferred(&self, state: &mut ConsoleState<S>) {
        loop {
            let batch = std::mem::take(&mut *lock_recovering(&self.deferred));
            if batch.is_empty() {
                return;
            }
            for op in batch {
                op(state);
            }
        }
    }
}

impl<S: TextSurface> DispatchSafe<S> {
    fn id(&self) -> usize { Arc::as_ptr(&self.state).addr() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConsoleConfig, MemorySurface, PrintItem};
    use pretty_assertions::assert_eq;

    fn new_dispatch_safe() -> DispatchSafe<MemorySurface> {
        DispatchSafe::new(ConsoleState::new(
            MemorySurface::new(),
            None,
            ConsoleConfig::default(),
        ))
    }

    fn document(dispatch_safe: &DispatchSafe<MemorySurface>) -> String {
        dispatch_safe
            .try_invoke_and_wait(|state| state.document_text())
            .unwrap()
    }

    #[test]
    fn test_nested_call_runs_after_current_op_in_order() {
        let dispatch_safe = new_dispatch_safe();
        let nested = dispatch_safe.clone();

        dispatch_safe.invoke_and_wait(move |state| {
            state.append_output(&PrintItem::from("a"));
            let inner = nested.clone();
            nested.invoke_and_wait(move |state| {
                state.append_output(&PrintItem::from("c"));
                inner.invoke_and_wait(|state| state.append_output(&PrintItem::from("e")));
                state.append_output(&PrintItem::from("d"));
            });
            state.append_output(&PrintItem::from("b"));
        });

        assert_eq!(document(&dispatch_safe), "abcde");
        assert!(!dispatch_safe.is_owner_context());
    }

    #[test]
    fn test_nested_call_is_not_visible_until_current_op_ends() {
        let dispatch_safe = new_dispatch_safe();
        let nested = dispatch_safe.clone();

        let seen_inside = dispatch_safe
            .try_invoke_and_wait(move |state| {
                nested.invoke_and_wait(|state| state.append_output(&"x".into()));
                state.document_text()
            })
            .unwrap();

        assert_eq!(seen_inside, "");
        assert_eq!(document(&dispatch_safe), "x");
    }

    #[test]
    fn test_nested_query_is_rejected() {
        let dispatch_safe = new_dispatch_safe();
        let nested = dispatch_safe.clone();

        let result = dispatch_safe
            .try_invoke_and_wait(move |_| nested.try_invoke_and_wait(|_| ()))
            .unwrap();

        assert!(matches!(result, Err(ConsoleError::ReentrantDispatch)));
    }

    #[test]
    fn test_concurrent_appends_are_serialized() {
        let dispatch_safe = new_dispatch_safe();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let dispatch_safe = dispatch_safe.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        dispatch_safe
                            .invoke_and_wait(|state| state.append_output(&"xy".into()));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let (len, boundary) = dispatch_safe
            .try_invoke_and_wait(|state| {
                (state.surface.len(), state.commit_boundary.offset())
            })
            .unwrap();
        assert_eq!(len, 400);
        assert_eq!(boundary, 400);
    }
}
