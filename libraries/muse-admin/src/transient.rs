//! Self-clearing presentation state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A value that clears itself after a fixed delay.
///
/// Setting a new value restarts the delay. Timers are children of the
/// owning view's lifecycle token, so tearing the view down cancels them.
pub struct TransientSlot<T> {
    state: Arc<Mutex<SlotState<T>>>,
    ttl: Duration,
    lifecycle: CancellationToken,
}

struct SlotState<T> {
    value: Option<T>,
    generation: u64,
    timer: Option<CancellationToken>,
}

fn lock<T>(state: &Mutex<SlotState<T>>) -> MutexGuard<'_, SlotState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone + Send + 'static> TransientSlot<T> {
    pub fn new(ttl: Duration, lifecycle: &CancellationToken) -> Self {
        Self {
            state: Arc::new(Mutex::new(SlotState {
                value: None,
                generation: 0,
                timer: None,
            })),
            ttl,
            lifecycle: lifecycle.clone(),
        }
    }

    /// Show `value` until the delay passes. Must be called inside a tokio
    /// runtime.
    pub fn set(&self, value: T) {
        if self.lifecycle.is_cancelled() {
            return;
        }
        let timer = self.lifecycle.child_token();
        let generation = {
            let mut state = lock(&self.state);
            if let Some(previous) = state.timer.replace(timer.clone()) {
                previous.cancel();
            }
            state.generation += 1;
            state.value = Some(value);
            state.generation
        };

        let state = Arc::clone(&self.state);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::select! {
                () = timer.cancelled() => {}
                () = tokio::time::sleep(ttl) => {
                    let mut state = lock(&state);
                    if state.generation == generation {
                        state.value = None;
                        state.timer = None;
                    }
                }
            }
        });
    }

    pub fn get(&self) -> Option<T> {
        lock(&self.state).value.clone()
    }

    pub fn clear(&self) {
        let mut state = lock(&self.state);
        if let Some(timer) = state.timer.take() {
            timer.cancel();
        }
        state.value = None;
    }
}
