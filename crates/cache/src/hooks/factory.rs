//! Container construction hooks for merging caches

/// A container that can absorb the elements of another container of the same type
///
/// Implemented for every type that is both iterable and extendable with its
/// own items, e.g. `Vec<T>`, `VecDeque<T>`, `HashSet<T>`, `BTreeSet<T>`.
pub trait Collection: IntoIterator + Extend<<Self as IntoIterator>::Item> {}

impl<C> Collection for C where C: IntoIterator + Extend<<C as IntoIterator>::Item> {}

/// Builds the empty container stored the first time a key is merged into
///
/// The container type decides duplicate handling: a `Vec` keeps duplicates,
/// a set drops them.
pub trait ContainerFactory<C>: Send + Sync {
    fn create_container(&self) -> C;
}

impl<C, F> ContainerFactory<C> for F
where
    F: Fn() -> C + Send + Sync,
{
    fn create_container(&self) -> C {
        self()
    }
}
