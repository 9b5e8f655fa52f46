// A poisoned lock means a thread panicked in the middle of mutating the entry map. We cannot
// tell whether the map is in a coherent state anymore, so continuing is not safe (we panic).
pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - continued execution \
    is not safe because the registry contents may no longer be coherent";
