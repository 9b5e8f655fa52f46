use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::constants::ERR_POISONED_LOCK;
use crate::error::{Error, Result};
use crate::{EntryRef, RegistryIter};

/// The ordered entry storage. A `None` slot is a present-but-empty entry, which is
/// distinct from the key being absent from the map entirely.
pub(crate) type EntryMap<T> = BTreeMap<i64, Option<Box<T>>>;

/// A thread-safe registry of exclusively-owned objects keyed by integer identifier.
///
/// This type acts as a cloneable handle to shared registry state. Multiple handles can
/// exist simultaneously, and the underlying entries remain alive as long as at least one
/// handle exists. The registry owns every value stored in it: a value registered here is
/// dropped when it is replaced, when it is unregistered, or when the last handle to the
/// registry is dropped - exactly once, whichever comes first.
///
/// All operations are serialized through a single lock, so a [`register()`][1] observed
/// from another thread is always all-or-nothing: concurrent readers see either the old
/// entry or the new one, never a half-applied replacement.
///
/// # Thread safety
///
/// This type is thread-safe and can be freely cloned and shared across threads whenever
/// `T` is [`Send`].
///
/// # Example
///
/// ```rust
/// use std::thread;
///
/// use object_registry::Registry;
///
/// let registry = Registry::new();
/// registry.register(1, Box::new("alpha".to_string()));
///
/// // Clone the handle to share the registry with another thread.
/// let registry_clone = registry.clone();
///
/// thread::spawn(move || {
///     registry_clone.register(2, Box::new("beta".to_string()));
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(registry.len(), 2);
/// ```
///
/// [1]: Self::register
#[derive(Debug)]
pub struct Registry<T> {
    /// The shared entry map protected by a mutex for thread safety.
    entries: Arc<Mutex<EntryMap<T>>>,
}

impl<T> Registry<T> {
    /// Creates a new, empty registry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use object_registry::Registry;
    ///
    /// let registry = Registry::<String>::new();
    ///
    /// assert!(registry.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(EntryMap::new())),
        }
    }

    /// Registers `object` under `id`, taking ownership of it.
    ///
    /// The object is consumed unconditionally; from this point on the registry is solely
    /// responsible for dropping it. If an entry already exists under `id`, its value is
    /// dropped first and the new object installed in its place - a replace, never a
    /// duplicate. Both steps happen under one lock acquisition, so two racing `register`
    /// calls on the same id cannot lose an update or drop a value twice.
    ///
    /// Passing `None` registers a present-but-empty entry: [`query()`][1] succeeds for
    /// that id but [`EntryRef::value()`] returns `None`. This is distinct from the id
    /// having no entry at all.
    ///
    /// # Example
    ///
    /// ```rust
    /// use object_registry::Registry;
    ///
    /// let registry = Registry::new();
    ///
    /// registry.register(1, Box::new("first".to_string()));
    ///
    /// // Registering the same id again replaces (and drops) the previous value.
    /// registry.register(1, Box::new("second".to_string()));
    ///
    /// // An empty entry is also valid.
    /// registry.register(2, None);
    ///
    /// assert_eq!(registry.len(), 2);
    /// ```
    ///
    /// [1]: Self::query
    pub fn register(&self, id: i64, object: impl Into<Option<Box<T>>>) {
        let object = object.into();

        let mut entries = self.entries.lock().expect(ERR_POISONED_LOCK);

        // The old value is dropped before the new one is installed.
        entries.remove(&id);
        entries.insert(id, object);
    }

    /// Returns a borrowed view of the entry registered under `id`.
    ///
    /// The registry keeps ownership of the value; the returned [`EntryRef`] holds the
    /// registry's lock for its lifetime, which is what makes the borrow safe against
    /// concurrent replacement or removal. Drop the view before performing further
    /// registry operations from the same thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entry exists under `id`. Note that a
    /// present-but-empty entry is found - its [`value()`][EntryRef::value] is simply
    /// `None`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use object_registry::Registry;
    ///
    /// let registry = Registry::new();
    /// registry.register(1, Box::new(42_u32));
    ///
    /// let entry = registry.query(1).unwrap();
    /// assert_eq!(entry.value(), Some(&42));
    /// drop(entry);
    ///
    /// assert!(registry.query(2).is_err());
    /// ```
    pub fn query(&self, id: i64) -> Result<EntryRef<'_, T>> {
        let entries = self.entries.lock().expect(ERR_POISONED_LOCK);

        if entries.contains_key(&id) {
            Ok(EntryRef::new(entries, id))
        } else {
            Err(Error::NotFound { id })
        }
    }

    /// Removes the entry registered under `id` and drops its value.
    ///
    /// The value is dropped while the lock is still held, so no concurrent operation can
    /// observe a half-removed entry or race this call into a double drop. Removal of an
    /// id that two threads race to unregister succeeds in exactly one of them; the other
    /// observes [`Error::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entry exists under `id`, including on every
    /// repeated call after a successful removal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use object_registry::Registry;
    ///
    /// let registry = Registry::new();
    /// registry.register(1, Box::new("value".to_string()));
    ///
    /// registry.unregister(1).unwrap();
    ///
    /// // The entry is gone; a second removal reports not-found.
    /// assert!(registry.unregister(1).is_err());
    /// ```
    pub fn unregister(&self, id: i64) -> Result<()> {
        let mut entries = self.entries.lock().expect(ERR_POISONED_LOCK);

        match entries.remove(&id) {
            Some(object) => {
                // Dropped under the lock, like every other deletion path.
                drop(object);
                Ok(())
            }
            None => Err(Error::NotFound { id }),
        }
    }

    /// Whether an entry (possibly empty) exists under `id`.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .contains_key(&id)
    }

    /// Returns the number of entries currently registered.
    ///
    /// This operation may block briefly if another thread is accessing the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect(ERR_POISONED_LOCK).len()
    }

    /// Whether the registry currently contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().expect(ERR_POISONED_LOCK).is_empty()
    }

    /// Returns a snapshot of the currently registered identifiers, in ascending order.
    ///
    /// The snapshot is taken under the lock and is immediately stale: entries may be
    /// registered or unregistered the moment it is released. [`iter()`][Self::iter] is
    /// built on exactly this snapshot.
    #[must_use]
    pub fn keys(&self) -> Vec<i64> {
        self.entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .keys()
            .copied()
            .collect()
    }

    /// Returns an iterator over the entries whose identifiers are registered right now.
    ///
    /// The key set is captured at this call; each value is then resolved through
    /// [`query()`][Self::query] on every step, so the iterator observes concurrent
    /// removals (as steps yielding no entry) instead of crashing on them. See
    /// [`RegistryIter`] for the full semantics.
    pub fn iter(&self) -> RegistryIter<'_, T> {
        RegistryIter::new(self, self.keys())
    }
}

impl<T> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = (i64, Option<EntryRef<'a, T>>);
    type IntoIter = RegistryIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
