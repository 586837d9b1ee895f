//! Keyed union, the primitive both pipelines are built on.

use indexmap::map::Entry;
use indexmap::IndexMap;

/// Outcome of offering an entry to a keyed collection.
#[derive(Debug)]
pub enum Union<'a, V> {
    /// The key was new; the entry now lives in the collection.
    Inserted(&'a mut V),
    /// The key was already taken. The existing entry is left in place and
    /// the rejected incoming value is handed back to the caller.
    Existing { existing: &'a mut V, incoming: V },
}

/// Inserts `value` under `key` unless the key is already present.
///
/// Insertion order is kept, so iteration follows first-seen order across all
/// merged documents.
pub fn union_entry<V>(map: &mut IndexMap<String, V>, key: String, value: V) -> Union<'_, V> {
    match map.entry(key) {
        Entry::Vacant(slot) => Union::Inserted(slot.insert(value)),
        Entry::Occupied(slot) => Union::Existing {
            existing: slot.into_mut(),
            incoming: value,
        },
    }
}
