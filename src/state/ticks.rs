// Per-key timer handles, e.g. one fall interval per falling item.
use std::collections::HashMap;
use std::hash::Hash;

/// Owns one handle per live key. Dropping a handle cancels its timer, so
/// syncing against the live set stops ticks for keys that went away.
#[derive(Debug)]
pub struct TickSet<K, H> {
    handles: HashMap<K, H>,
}

impl<K, H> Default for TickSet<K, H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash, H> TickSet<K, H> {
    pub fn sync(&mut self, live: &[K], mut make: impl FnMut(K) -> H) {
        self.handles.retain(|k, _| live.contains(k));
        for k in live {
            if !self.handles.contains_key(k) {
                let handle = make(*k);
                self.handles.insert(*k, handle);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }
}
