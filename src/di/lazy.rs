use crate::resolver::Resolver;
use std::fmt;
use std::sync::{Arc, OnceLock};

type ActivatorFn<T> = Arc<dyn Fn(&dyn Resolver) -> T + Send + Sync>;

/// A deferred handle to a service, paired with metadata about it.
///
/// The metadata is available immediately; the value itself is only built the first
/// time [`Lazy::value`] is called, using the resolver passed in (normally the
/// request scope the handle was resolved from). Later calls return the same value.
///
/// # Example
/// ```
/// use keyed_dispatch::di::{Container, Lazy};
///
/// let container = Container::new();
/// let handle: Lazy<String, &str> = Lazy::new("greeting", |_| "hello".to_string());
///
/// assert_eq!(*handle.metadata(), "greeting");
/// assert!(!handle.is_created());
/// assert_eq!(handle.value(&container), "hello");
/// assert!(handle.is_created());
/// ```
pub struct Lazy<T, M> {
    metadata: M,
    instance: OnceLock<T>,
    activator: ActivatorFn<T>,
}

impl<T, M> Lazy<T, M> {
    pub fn new<F>(metadata: M, activator: F) -> Self
    where
        F: Fn(&dyn Resolver) -> T + Send + Sync + 'static,
    {
        Self {
            metadata,
            instance: OnceLock::new(),
            activator: Arc::new(activator),
        }
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    pub fn is_created(&self) -> bool {
        self.instance.get().is_some()
    }

    /// Build the value on first access, then keep returning it.
    pub fn value(&self, resolver: &dyn Resolver) -> &T {
        self.instance.get_or_init(|| (self.activator)(resolver))
    }

    /// Consume the handle, building the value if it was never accessed.
    pub fn into_value(self, resolver: &dyn Resolver) -> T {
        match self.instance.into_inner() {
            Some(value) => value,
            None => (self.activator)(resolver),
        }
    }
}

/// A clone shares the activator but not the instance: an uncreated clone builds its
/// own value, a created clone copies the existing one.
impl<T: Clone, M: Clone> Clone for Lazy<T, M> {
    fn clone(&self) -> Self {
        Self {
            metadata: self.metadata.clone(),
            instance: self.instance.clone(),
            activator: Arc::clone(&self.activator),
        }
    }
}

impl<T, M: fmt::Debug> fmt::Debug for Lazy<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("metadata", &self.metadata)
            .field("created", &self.is_created())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::Container;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_value_built_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle: Lazy<usize, ()> = Lazy::new((), move |_| counter.fetch_add(1, Ordering::SeqCst) + 10);

        let container = Container::new();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(*handle.value(&container), 10);
        assert_eq!(*handle.value(&container), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_metadata_without_construction() {
        let handle: Lazy<String, u8> = Lazy::new(3, |_| panic!("must not be constructed"));
        assert_eq!(*handle.metadata(), 3);
        assert!(!handle.is_created());
    }

    #[test]
    fn test_into_value_uses_existing_instance() {
        let container = Container::new();
        let handle: Lazy<Arc<u8>, ()> = Lazy::new((), |_| Arc::new(1));
        let created = Arc::clone(handle.value(&container));
        let owned = handle.into_value(&container);
        assert!(Arc::ptr_eq(&created, &owned));
    }
}
