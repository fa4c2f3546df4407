use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A thread-safe, reference-counted resource container with read-write locking.
///
/// `MtResource` shares a value of type `T` between the driver thread and the
/// chunk workers. It wraps an `Arc<RwLock<T>>`; clones point at the same value.
///
/// A worker that panics while holding the lock does not make the value
/// unreachable: the guards recover the inner value from a poisoned lock, since
/// everything stored here (chunk caches) stays valid after a partial update.
///
/// # Examples
///
/// ```
/// use voxel_world::core::MtResource;
///
/// let counter = MtResource::new(0);
/// let counter_clone = counter.clone();
///
/// let handle = std::thread::spawn(move || {
///     *counter_clone.get_mut() += 1;
/// });
///
/// handle.join().unwrap();
/// assert_eq!(*counter.get(), 1);
/// ```
pub struct MtResource<T: Send + Sync> {
    resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync> MtResource<T> {
    /// Creates a new `MtResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read-only guard over the contained value.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a mutable guard over the contained value.
    ///
    /// Blocks until all readers and writers have released the lock.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of handles currently sharing the value.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.resource)
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_value() {
        let resource = MtResource::new(vec![1, 2, 3]);
        let clone = resource.clone();

        clone.get_mut().push(4);

        assert_eq!(resource.get().len(), 4);
        assert_eq!(resource.handle_count(), 2);
    }

    #[test]
    fn poisoned_lock_still_yields_the_value() {
        let resource = MtResource::new(7u32);
        let clone = resource.clone();

        let _ = std::thread::spawn(move || {
            let _guard = clone.get_mut();
            panic!("worker died while holding the lock");
        })
        .join();

        assert_eq!(*resource.get(), 7);
    }
}
