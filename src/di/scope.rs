use crate::di::Container;
use crate::di::container::{Activator, Instance, RegistrationKey};
use crate::di::Lifetime;
use crate::resolver::{Resolver, ServiceKey};
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::Arc;
use uuid::Uuid;

/// A lifetime scope bound to a single inbound request.
///
/// Registrations are read from the root [`Container`]. Scoped instances are cached
/// here and dropped together with the scope; singletons are shared with the root.
pub struct RequestScope {
    id: Uuid,
    root: Arc<Container>,
    instances: DashMap<RegistrationKey, Instance>,
}

impl RequestScope {
    pub(crate) fn new(root: Arc<Container>) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(scope = %id, "Request scope started");
        Self {
            id,
            root,
            instances: DashMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Resolver for RequestScope {
    fn resolve_any(&self, key: &ServiceKey, service: TypeId) -> Option<Instance> {
        let registration_key = RegistrationKey {
            key: key.clone(),
            service,
        };
        let Some(registration) = self.root.registration(&registration_key) else {
            tracing::debug!(scope = %self.id, "No registration for {}", key);
            return None;
        };

        let factory = match registration.activator {
            Activator::Instance(instance) => return Some(instance),
            Activator::Factory(factory) => factory,
        };

        match registration.lifetime {
            Lifetime::Singleton => Some(self.root.singleton(&registration_key, &factory)),
            Lifetime::Transient => Some(factory(self as &dyn Resolver)),
            Lifetime::Scoped => {
                if let Some(existing) = self.instances.get(&registration_key) {
                    return Some(existing.value().clone());
                }
                let created = factory(self as &dyn Resolver);
                Some(
                    self.instances
                        .entry(registration_key)
                        .or_insert(created)
                        .value()
                        .clone(),
                )
            }
        }
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        tracing::debug!(
            scope = %self.id,
            instances = self.instances.len(),
            "Request scope ended"
        );
    }
}
