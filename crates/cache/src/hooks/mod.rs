//! Construction-time strategies injected into caches
//!
//! A cache has exactly three variation points: how keys are normalized, how
//! the backing map is built, and (for merging caches) how an empty container
//! is built. Map construction is a plain `FnOnce() -> M` supplied to the
//! constructor; the other two live here.

mod factory;
mod normalize;

pub use factory::{Collection, ContainerFactory};
pub use normalize::{Identity, KeyNormalizer, KeyPolicy, NormalizeWith};
