use std::fmt::{self, Debug, Formatter};
use std::sync::MutexGuard;

use crate::registry::EntryMap;

/// A borrowed view of one registry entry, returned by [`Registry::query()`][1].
///
/// The registry retains ownership of the value; this type only proves that the entry
/// existed at the moment of the query and lets the caller read it. The view holds the
/// registry's lock for as long as it exists, which is what guarantees the value cannot
/// be replaced or dropped out from under the borrow.
///
/// # Blocking
///
/// Because the lock is held, every other registry operation blocks until the view is
/// dropped. Calling any registry method from the same thread while holding an
/// [`EntryRef`] deadlocks - drop the view first.
///
/// # Example
///
/// ```rust
/// use object_registry::Registry;
///
/// let registry = Registry::new();
/// registry.register(7, Box::new("hello".to_string()));
///
/// let entry = registry.query(7).unwrap();
/// assert_eq!(entry.id(), 7);
/// assert_eq!(entry.value().map(String::as_str), Some("hello"));
/// drop(entry);
///
/// registry.unregister(7).unwrap();
/// ```
///
/// [1]: crate::Registry::query
pub struct EntryRef<'a, T> {
    guard: MutexGuard<'a, EntryMap<T>>,
    id: i64,
}

impl<'a, T> EntryRef<'a, T> {
    /// Callers must have verified under `guard` that an entry exists at `id`.
    pub(crate) fn new(guard: MutexGuard<'a, EntryMap<T>>, id: i64) -> Self {
        debug_assert!(
            guard.contains_key(&id),
            "EntryRef constructed for an id with no entry"
        );

        Self { guard, id }
    }

    /// The identifier of the entry this view refers to.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns a reference to the entry's value.
    ///
    /// Returns `None` if the entry is present but empty (an empty owned handle was
    /// registered under this id). This is distinct from the id having no entry at all,
    /// which [`query()`][crate::Registry::query] reports as an error instead.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.guard.get(&self.id).and_then(|slot| slot.as_deref())
    }
}

impl<T> Debug for EntryRef<'_, T> {
    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryRef")
            .field("id", &self.id)
            .field("has_value", &self.value().is_some())
            .finish_non_exhaustive()
    }
}
