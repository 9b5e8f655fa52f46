//! Integration tests for `object_registry` under concurrent access.
//!
//! These exercise the synchronization contract: racing registrations on one id, racing
//! removals of one id, and iteration running while other threads mutate the registry.

#![allow(
    clippy::arithmetic_side_effects,
    reason = "we do not need to worry about these things when writing test code"
)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use object_registry::Registry;

/// Signals every drop on a shared counter so tests can account for deletions.
struct DropTracker {
    drops: Arc<AtomicUsize>,
}

impl DropTracker {
    fn new(drops: &Arc<AtomicUsize>) -> Box<Self> {
        Box::new(Self {
            drops: Arc::clone(drops),
        })
    }
}

impl Drop for DropTracker {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn replacement_storm_on_one_id_with_concurrent_iteration() {
    const WRITERS: usize = 100;

    let base_drops = Arc::new(AtomicUsize::new(0));
    let storm_drops = Arc::new(AtomicUsize::new(0));

    let registry = Registry::new();

    // Ten entries that no thread below ever touches.
    for id in 0..10 {
        registry.register(id, DropTracker::new(&base_drops));
    }

    let mut workers = Vec::with_capacity(WRITERS);
    for _ in 0..WRITERS {
        let registry = registry.clone();
        let storm_drops = Arc::clone(&storm_drops);

        workers.push(thread::spawn(move || {
            registry.register(10, DropTracker::new(&storm_drops));
        }));
    }

    // One full iteration pass while the writers race.
    let reader = {
        let registry = registry.clone();
        thread::spawn(move || {
            for (_id, entry) in registry.iter() {
                if let Some(entry) = entry {
                    // Touch the value to make the borrow real.
                    assert!(entry.value().is_some());
                }
            }
        })
    };

    for worker in workers {
        worker.join().unwrap();
    }
    reader.join().unwrap();

    // Exactly one of the hundred registered values survived; each of the 99 replaced
    // ones was dropped exactly once.
    assert_eq!(registry.len(), 11);
    assert_eq!(storm_drops.load(Ordering::SeqCst), WRITERS - 1);

    // The ten untouched entries are still owned and undropped.
    assert_eq!(base_drops.load(Ordering::SeqCst), 0);
    for id in 0..10 {
        assert!(registry.contains(id));
    }

    drop(registry);

    assert_eq!(base_drops.load(Ordering::SeqCst), 10);
    assert_eq!(storm_drops.load(Ordering::SeqCst), WRITERS);
}

#[test]
fn racing_unregister_of_same_id_succeeds_exactly_once() {
    let drops = Arc::new(AtomicUsize::new(0));

    let registry = Registry::new();
    registry.register(7, DropTracker::new(&drops));

    let contenders: Vec<_> = (0..2)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || registry.unregister(7).is_ok())
        })
        .collect();

    let successes = contenders
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|won| *won)
        .count();

    // One wins, the other observes not-found; the value is dropped exactly once.
    assert_eq!(successes, 1);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    assert!(!registry.contains(7));
}

#[test]
fn iterator_observes_removal_from_another_thread() {
    let registry = Registry::new();
    registry.register(0, Box::new("A".to_string()));

    let mut iter = registry.iter();

    {
        let registry = registry.clone();
        thread::spawn(move || {
            registry.unregister(0).unwrap();
        })
        .join()
        .unwrap();
    }

    // The captured position is still visited; it is just empty now.
    let (id, entry) = iter.next().unwrap();
    assert_eq!(id, 0);
    assert!(entry.is_none());

    assert!(iter.next().is_none());
}

#[test]
fn mixed_register_unregister_iterate_storm() {
    let registry = Registry::new();

    for id in 0..10 {
        registry.register(id, Box::new(id));
    }

    let inserter = {
        let registry = registry.clone();
        thread::spawn(move || {
            for id in 10..110 {
                registry.register(id, Box::new(id));
            }
        })
    };

    let remover = {
        let registry = registry.clone();
        thread::spawn(move || {
            // Some of these targets race with the inserter, so not-found is a normal
            // outcome; count how many removals actually landed.
            (5..25).filter(|id| registry.unregister(*id).is_ok()).count()
        })
    };

    let reader = {
        let registry = registry.clone();
        thread::spawn(move || {
            for (id, entry) in registry.iter() {
                if let Some(entry) = entry {
                    if let Some(value) = entry.value() {
                        assert_eq!(*value, id);
                    }
                }
            }
        })
    };

    inserter.join().unwrap();
    let removed = remover.join().unwrap();
    reader.join().unwrap();

    // 110 registrations total, each successful removal took exactly one of them.
    assert_eq!(registry.len(), 110 - removed);

    // Everything still reachable is intact.
    for id in registry.keys() {
        let entry = registry.query(id).unwrap();
        assert_eq!(entry.value(), Some(&id));
    }
}

#[test]
fn reads_and_writes_on_disjoint_ids_do_not_corrupt_each_other() {
    let registry = Registry::new();

    for id in 0..4 {
        registry.register(id, Box::new(id * 100));
    }

    let threads: Vec<_> = (0..4)
        .map(|id| {
            let registry = registry.clone();
            thread::spawn(move || {
                for round in 0..50 {
                    registry.register(id, Box::new(id * 100 + round));

                    let entry = registry.query(id).unwrap();
                    let value = *entry.value().unwrap();
                    assert_eq!(value, id * 100 + round);
                }
            })
        })
        .collect();

    for thread in threads {
        thread.join().unwrap();
    }

    assert_eq!(registry.len(), 4);
    for id in 0..4 {
        let entry = registry.query(id).unwrap();
        assert_eq!(*entry.value().unwrap(), id * 100 + 49);
    }
}
