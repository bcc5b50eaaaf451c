//! Cache module - per-guild cache registry.
//!
//! One [`GuildCache`] entry exists per connected guild, owned by the
//! [`CacheRegistry`] and lazily bootstrapped from the document store on
//! first access.

mod guild;
mod registry;

pub use guild::{GuildCache, GuildHandle};
pub use registry::CacheRegistry;
