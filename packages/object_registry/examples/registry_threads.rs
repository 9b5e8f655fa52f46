//! Example demonstrating concurrent use of `Registry` from multiple threads.
//!
//! One thread registers a burst of new entries, another removes a range of ids,
//! and a third iterates over the whole registry - all at the same time. The
//! iterator resolves every entry through the registry, so entries removed
//! mid-walk show up as empty positions instead of crashes.

use std::thread;

use object_registry::Registry;

/// A stand-in for some interesting heap object.
struct Worker {
    id: i64,
}

impl Worker {
    fn do_something(&self) {
        println!("I am worker {}", self.id);
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        println!("dropping worker {}", self.id);
    }
}

fn insert_range(registry: &Registry<Worker>, start: i64, count: i64) {
    for id in start..start.saturating_add(count) {
        registry.register(id, Box::new(Worker { id }));
    }
}

fn remove_range(registry: &Registry<Worker>, start: i64, count: i64) {
    for id in start..start.saturating_add(count) {
        // Racing the inserter, so not-found is a perfectly normal outcome.
        match registry.unregister(id) {
            Ok(()) => println!("removed worker {id}"),
            Err(error) => println!("{error}"),
        }
    }
}

fn iterate(registry: &Registry<Worker>) {
    for (id, entry) in registry.iter() {
        match entry {
            Some(entry) => {
                if let Some(worker) = entry.value() {
                    worker.do_something();
                }
            }
            None => println!("worker {id} was removed before we got to it"),
        }
    }
}

fn main() {
    println!("=== Registry: Concurrent Mutation and Iteration ===");

    let registry = Registry::new();

    println!("populating registry...");
    insert_range(&registry, 0, 10);

    println!("starting threads...");
    let inserter = {
        let registry = registry.clone();
        thread::spawn(move || insert_range(&registry, 10, 100))
    };
    let iterator = {
        let registry = registry.clone();
        thread::spawn(move || iterate(&registry))
    };
    let remover = {
        let registry = registry.clone();
        thread::spawn(move || remove_range(&registry, 5, 20))
    };

    inserter.join().unwrap();
    iterator.join().unwrap();
    remover.join().unwrap();

    println!("done; {} workers remain registered", registry.len());
}
