use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;

use crate::{EntryRef, Registry};

/// An iterator over the entries of a [`Registry`], created by [`Registry::iter()`].
///
/// The set of identifiers to visit is captured once, when the iterator is created. Each
/// step then resolves its identifier through [`Registry::query()`] - a live projection,
/// not a snapshot of values. The consequences:
///
/// * The iterator never holds the registry's lock between steps, so it does not starve
///   writers no matter how long the caller takes between steps.
/// * An entry removed after the iterator was created yields `(id, None)` at its position
///   instead of crashing or being silently skipped, and iteration continues normally
///   past it.
/// * A value replaced after the iterator was created is observed in its current form,
///   not the form it had at capture time.
/// * Entries registered under new identifiers after the iterator was created are not
///   visited.
///
/// The yielded [`EntryRef`] holds the registry's lock; drop it before touching the
/// registry from the same thread. A plain `for` loop does this naturally, since each
/// item goes out of scope at the end of the loop body.
///
/// # Example
///
/// ```rust
/// use object_registry::Registry;
///
/// let registry = Registry::new();
/// registry.register(1, Box::new("one".to_string()));
/// registry.register(2, None);
///
/// for (id, entry) in registry.iter() {
///     match entry {
///         Some(entry) => println!("{id}: value present: {}", entry.value().is_some()),
///         None => println!("{id}: removed concurrently"),
///     }
/// }
/// ```
pub struct RegistryIter<'a, T> {
    registry: &'a Registry<T>,

    /// The identifiers captured when iteration began, consumed front to back.
    keys: std::vec::IntoIter<i64>,
}

impl<'a, T> RegistryIter<'a, T> {
    pub(crate) fn new(registry: &'a Registry<T>, keys: Vec<i64>) -> Self {
        Self {
            registry,
            keys: keys.into_iter(),
        }
    }
}

impl<'a, T> Iterator for RegistryIter<'a, T> {
    type Item = (i64, Option<EntryRef<'a, T>>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.keys.next()?;

        // Re-resolved through the registry so a concurrent removal surfaces as `None`
        // rather than a dangling reference into storage this iterator does not control.
        Some((id, self.registry.query(id).ok()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<T> ExactSizeIterator for RegistryIter<'_, T> {
    fn len(&self) -> usize {
        self.keys.len()
    }
}

impl<T> FusedIterator for RegistryIter<'_, T> {}

impl<T> Debug for RegistryIter<'_, T> {
    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryIter")
            .field("remaining", &self.keys.len())
            .finish_non_exhaustive()
    }
}
