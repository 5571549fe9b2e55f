mod builder;
mod container;
mod lazy;
mod lifetime;
mod scope;

pub use builder::ContainerBuilder;
pub use container::Container;
pub use lazy::Lazy;
pub use lifetime::Lifetime;
pub use scope::RequestScope;
