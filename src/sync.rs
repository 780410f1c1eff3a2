//! A lock that works with or without `std`.

#[cfg(feature = "std")]
type Inner<T> = std::sync::Mutex<T>;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
type Inner<T> = spin::Mutex<T>;

/// Interior-mutable cell guarded by a mutex.
///
/// Access goes through [`Locked::with`], so no guard escapes and a poisoned
/// `std` lock is simply taken over.
#[derive(Default)]
pub struct Locked<T>(Inner<T>);

impl<T> Locked<T> {
    /// Runs `f` with exclusive access to the value.
    #[cfg(feature = "std")]
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self
            .0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }

    /// Runs `f` with exclusive access to the value.
    #[cfg(all(not(feature = "std"), feature = "alloc"))]
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.lock())
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Locked<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.with(|value| f.debug_tuple("Locked").field(value).finish())
    }
}
