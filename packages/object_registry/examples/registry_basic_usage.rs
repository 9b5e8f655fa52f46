//! Example demonstrating basic usage of `Registry`.
//!
//! Covers registration, replacement, borrowed queries, removal and iteration,
//! all from a single thread.

use object_registry::Registry;

fn main() {
    println!("=== Registry: Basic Usage ===");

    let registry = Registry::new();

    // The registry takes ownership of whatever is registered.
    registry.register(1, Box::new("one".to_string()));
    registry.register(2, Box::new("two".to_string()));
    registry.register(3, None); // A present-but-empty entry.

    println!("Registered {} entries", registry.len());

    // Queries borrow; the registry keeps ownership.
    let entry = registry.query(1).expect("id 1 was just registered");
    println!("id 1 holds: {:?}", entry.value());
    drop(entry); // Release the lock before the next operation.

    // Registering an occupied id replaces the old value, dropping it.
    registry.register(2, Box::new("two, revised".to_string()));

    for (id, entry) in registry.iter() {
        match entry {
            Some(entry) => println!("id {id}: {:?}", entry.value()),
            None => println!("id {id}: removed while iterating"),
        }
    }

    registry.unregister(3).expect("id 3 is still registered");

    // Unknown ids are a reported condition, not a crash.
    if let Err(error) = registry.query(99) {
        println!("query(99): {error}");
    }

    // Remaining values are dropped with the registry - no manual cleanup needed.
}
