//! Keyed resolution capability
//!
//! Dispatch only needs one thing from a dependency container: "give me the value
//! registered under this key for this type, if there is one". [`Resolver`] is that
//! capability. The bundled [`Container`](crate::di::Container) and
//! [`RequestScope`](crate::di::RequestScope) implement it, and any other container
//! can be plugged in by implementing it as well.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a Rust type, kept together with its name for diagnostics.
///
/// Equality and hashing only consider the [`TypeId`].
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Secondary key of a keyed registration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceKey {
    /// String key, e.g. `"admin/home"`
    Named(String),
    /// Type identity used as the key
    Type(TypeKey),
}

impl ServiceKey {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Type(TypeKey::of::<T>())
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKey::Named(name) => write!(f, "{name:?}"),
            ServiceKey::Type(key) => f.write_str(key.name()),
        }
    }
}

impl From<&str> for ServiceKey {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for ServiceKey {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// Resolve a value by `(key, expected type)`.
///
/// Implementations return `None` for anything they cannot satisfy. They never panic
/// on a missing registration.
pub trait Resolver: Send + Sync {
    fn resolve_any(
        &self,
        key: &ServiceKey,
        service: TypeId,
    ) -> Option<Arc<dyn Any + Send + Sync>>;
}

/// Typed helpers over [`Resolver`]
pub trait ResolverExt: Resolver {
    /// Resolve `T` registered under `key`.
    ///
    /// A stored value that is not a `T` counts as a miss.
    fn resolve_keyed<T>(&self, key: &ServiceKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let value = self.resolve_any(key, TypeId::of::<T>())?;
        value.downcast_ref::<T>().cloned()
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn resolve_any(
        &self,
        key: &ServiceKey,
        service: TypeId,
    ) -> Option<Arc<dyn Any + Send + Sync>> {
        (**self).resolve_any(key, service)
    }
}
