use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock shared player state.
///
/// State mutations never leave a half-applied value behind, so a poisoned
/// lock is still safe to use.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
