use crate::di::{Lifetime, RequestScope};
use crate::resolver::{Resolver, ServiceKey};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// A type-erased value as stored in the container
pub(crate) type Instance = Arc<dyn Any + Send + Sync>;

/// Type alias for a function that builds a fresh instance, resolving its own
/// dependencies through whichever resolver is performing the resolution.
pub(crate) type FactoryFn = Arc<dyn Fn(&dyn Resolver) -> Instance + Send + Sync>;

#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct RegistrationKey {
    pub(crate) key: ServiceKey,
    pub(crate) service: TypeId,
}

#[derive(Clone)]
pub(crate) enum Activator {
    Instance(Instance),
    Factory(FactoryFn),
}

#[derive(Clone)]
pub(crate) struct Registration {
    pub(crate) lifetime: Lifetime,
    pub(crate) activator: Activator,
}

/// Thread-safe keyed dependency container.
///
/// Every registration is addressed by a [`ServiceKey`] *and* the type it produces,
/// so the same key may carry several services of different types. The container is
/// shared by the whole application; each inbound request gets its own
/// [`RequestScope`] via [`Container::begin_scope`].
pub struct Container {
    registrations: DashMap<RegistrationKey, Registration>,
    singletons: DashMap<RegistrationKey, Instance>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            registrations: DashMap::new(),
            singletons: DashMap::new(),
        }
    }

    /// Register an existing instance under `key`.
    pub fn register_keyed<T>(&mut self, key: impl Into<ServiceKey>, instance: T) -> &mut Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let registration = Registration {
            lifetime: Lifetime::Singleton,
            activator: Activator::Instance(Arc::new(instance)),
        };
        self.insert(key.into(), TypeId::of::<T>(), registration);
        self
    }

    /// Register a factory producing `T` under `key` with the given lifetime.
    pub fn register_keyed_factory<T, F>(
        &mut self,
        key: impl Into<ServiceKey>,
        lifetime: Lifetime,
        factory: F,
    ) -> &mut Self
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&dyn Resolver) -> T + Send + Sync + 'static,
    {
        let factory: FactoryFn = Arc::new(move |resolver: &dyn Resolver| {
            Arc::new(factory(resolver)) as Instance
        });
        let registration = Registration {
            lifetime,
            activator: Activator::Factory(factory),
        };
        self.insert(key.into(), TypeId::of::<T>(), registration);
        self
    }

    fn insert(&mut self, key: ServiceKey, service: TypeId, registration: Registration) {
        tracing::trace!("Registering {} ({})", key, registration.lifetime);
        let registration_key = RegistrationKey { key, service };
        self.singletons.remove(&registration_key);
        self.registrations.insert(registration_key, registration);
    }

    /// Open a child scope whose lifetime is bound to a single request.
    pub fn begin_scope(self: &Arc<Self>) -> RequestScope {
        RequestScope::new(Arc::clone(self))
    }

    /// Check whether anything is registered under `key` for `T`.
    pub fn contains_keyed<T: 'static>(&self, key: &ServiceKey) -> bool {
        self.registrations.contains_key(&RegistrationKey {
            key: key.clone(),
            service: TypeId::of::<T>(),
        })
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub(crate) fn registration(&self, key: &RegistrationKey) -> Option<Registration> {
        // Clone out so no shard lock is held while a factory runs.
        self.registrations.get(key).map(|entry| entry.value().clone())
    }

    /// Singletons are always built against the root container so they never
    /// capture request-scoped dependencies.
    pub(crate) fn singleton(&self, key: &RegistrationKey, factory: &FactoryFn) -> Instance {
        if let Some(existing) = self.singletons.get(key) {
            return existing.value().clone();
        }
        let created = factory(self as &dyn Resolver);
        self.singletons
            .entry(key.clone())
            .or_insert(created)
            .value()
            .clone()
    }
}

impl Resolver for Container {
    fn resolve_any(&self, key: &ServiceKey, service: TypeId) -> Option<Instance> {
        let registration_key = RegistrationKey {
            key: key.clone(),
            service,
        };
        let Some(registration) = self.registration(&registration_key) else {
            tracing::debug!("No registration for {}", key);
            return None;
        };

        match (registration.lifetime, &registration.activator) {
            (_, Activator::Instance(instance)) => Some(instance.clone()),
            (Lifetime::Singleton, Activator::Factory(factory)) => {
                Some(self.singleton(&registration_key, factory))
            }
            (Lifetime::Transient, Activator::Factory(factory)) => {
                Some(factory(self as &dyn Resolver))
            }
            (Lifetime::Scoped, Activator::Factory(_)) => {
                tracing::warn!(
                    "Scoped service {} requested from the root container; resolve it through a request scope",
                    key
                );
                None
            }
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolverExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone)]
    struct TestService {
        value: i32,
    }

    #[test]
    fn test_register_and_resolve_keyed() {
        let mut container = Container::new();
        container.register_keyed("answer", TestService { value: 42 });

        let service: TestService = container.resolve_keyed(&"answer".into()).unwrap();
        assert_eq!(service.value, 42);
        assert!(container.contains_keyed::<TestService>(&"answer".into()));
    }

    #[test]
    fn test_same_key_different_types() {
        let mut container = Container::new();
        container.register_keyed("shared", TestService { value: 1 });
        container.register_keyed("shared", "text".to_string());

        let service: TestService = container.resolve_keyed(&"shared".into()).unwrap();
        let text: String = container.resolve_keyed(&"shared".into()).unwrap();
        assert_eq!(service.value, 1);
        assert_eq!(text, "text");
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn test_missing_key_is_none() {
        let container = Container::new();
        let missing: Option<TestService> = container.resolve_keyed(&"nothing".into());
        assert!(missing.is_none());
        assert!(container.is_empty());
    }

    #[test]
    fn test_singleton_factory_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut container = Container::new();
        container.register_keyed_factory("single", Lifetime::Singleton, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(TestService { value: 7 })
        });

        let first: Arc<TestService> = container.resolve_keyed(&"single".into()).unwrap();
        let second: Arc<TestService> = container.resolve_keyed(&"single".into()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transient_factory_runs_every_time() {
        let mut container = Container::new();
        container.register_keyed_factory("fresh", Lifetime::Transient, |_| {
            Arc::new(TestService { value: 3 })
        });

        let first: Arc<TestService> = container.resolve_keyed(&"fresh".into()).unwrap();
        let second: Arc<TestService> = container.resolve_keyed(&"fresh".into()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_scoped_from_root_is_none() {
        let mut container = Container::new();
        container.register_keyed_factory("scoped", Lifetime::Scoped, |_| TestService { value: 5 });

        let from_root: Option<TestService> = container.resolve_keyed(&"scoped".into());
        assert!(from_root.is_none());
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut container = Container::new();
        container.register_keyed("answer", TestService { value: 1 });
        container.register_keyed("answer", TestService { value: 2 });

        let service: TestService = container.resolve_keyed(&"answer".into()).unwrap();
        assert_eq!(service.value, 2);
        assert_eq!(container.len(), 1);
    }
}
