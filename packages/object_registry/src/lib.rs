#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A thread-safe registry of exclusively-owned objects keyed by integer identifier.
//!
//! [`Registry<T>`] maps `i64` identifiers to heap objects it exclusively owns. Entries
//! are installed with [`register()`][Registry::register] (replacing and dropping any
//! previous value under the same id), read with [`query()`][Registry::query] (a borrowed
//! view, never an ownership transfer), and removed with
//! [`unregister()`][Registry::unregister]. Every stored value is dropped exactly once:
//! on replacement, on removal, or when the last registry handle is dropped.
//!
//! A single lock serializes all operations, so the registry can be shared freely between
//! threads via cheap handle clones. Iteration is built to stay safe while other threads
//! mutate the registry: [`iter()`][Registry::iter] captures the key set once, then
//! resolves every key through `query()` on each step, so a concurrently removed entry
//! shows up as an empty position instead of a dangling reference.
//!
//! # Example
//!
//! ```rust
//! use std::thread;
//!
//! use object_registry::Registry;
//!
//! let registry = Registry::new();
//!
//! // The registry takes ownership of registered objects.
//! registry.register(1, Box::new("alpha".to_string()));
//! registry.register(2, Box::new("beta".to_string()));
//!
//! // Registering an occupied id replaces (and drops) the old value.
//! registry.register(2, Box::new("gamma".to_string()));
//!
//! // Other threads operate through cloned handles.
//! let registry_clone = registry.clone();
//! thread::spawn(move || {
//!     registry_clone.unregister(1).unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! // Iteration resolves each entry through the registry, so it tolerates
//! // whatever the other thread removed in the meantime.
//! for (id, entry) in registry.iter() {
//!     if let Some(entry) = entry {
//!         println!("{id} is still registered: {:?}", entry.value());
//!     }
//! }
//! ```

mod constants;
mod entry_ref;
mod error;
mod iter;
mod registry;

pub use entry_ref::*;
pub use error::*;
pub use iter::*;
pub use registry::*;
