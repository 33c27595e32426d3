use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct ListenerId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum EventKind {
    Resize,
    OrientationChange,
}

/// Window-level events the page dispatches to registered listeners.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub enum WindowEvent {
    Resize { width: u32, height: u32 },
    OrientationChange { width: u32, height: u32 },
}

impl WindowEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Resize { .. } => EventKind::Resize,
            Self::OrientationChange { .. } => EventKind::OrientationChange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerOptions {
    pub passive: bool,
}

#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    entries: BTreeMap<ListenerId, (EventKind, ListenerOptions)>,
}

impl ListenerRegistry {
    pub fn add(&mut self, kind: EventKind, options: ListenerOptions) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.insert(id, (kind, options));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Listeners for `kind`, in registration order.
    pub fn listeners_for(&self, kind: EventKind) -> Vec<ListenerId> {
        self.entries
            .iter()
            .filter(|(_, (k, _))| *k == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn options(&self, id: ListenerId) -> Option<ListenerOptions> {
        self.entries.get(&id).map(|(_, o)| *o)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
