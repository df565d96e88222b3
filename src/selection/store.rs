use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::types::SelectedObject;

/// Something that reacts to selection changes (metadata panel, toolbar, ...).
pub trait SelectionListener: Send + Sync {
    fn on_selection_change(&self, objects: &[SelectedObject], force: bool);
}

impl<F> SelectionListener for F
where
    F: Fn(&[SelectedObject], bool) + Send + Sync,
{
    fn on_selection_change(&self, objects: &[SelectedObject], force: bool) {
        self(objects, force)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Single owner of "what is selected right now".
///
/// Every publish replaces the list wholesale. Listeners are told about the
/// change unless the new list is empty and the publisher did not force it,
/// so panels keep their content when e.g. a context menu closes with
/// nothing selected.
pub struct SelectionStore {
    current: RwLock<Vec<SelectedObject>>,
    listeners: Mutex<Vec<(ListenerId, Arc<dyn SelectionListener>)>>,
    next_id: AtomicU64,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Vec::new()),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn subscribe(&self, listener: Arc<dyn SelectionListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    pub fn publish(&self, objects: Vec<SelectedObject>) {
        self.replace(objects, false);
    }

    /// Publish an empty selection. With `force` the listeners refresh even
    /// though nothing is selected.
    pub fn clear(&self, force: bool) {
        self.replace(Vec::new(), force);
    }

    pub fn current(&self) -> Vec<SelectedObject> {
        self.current.read().clone()
    }

    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }

    fn replace(&self, objects: Vec<SelectedObject>, force: bool) {
        let deliver = force || !objects.is_empty();
        log::debug!(
            "selection: publishing {} object(s), force={force}, deliver={deliver}",
            objects.len()
        );

        *self.current.write() = objects;

        if !deliver {
            return;
        }

        // Snapshot both so listeners may read the store or (un)subscribe.
        let snapshot = self.current();
        let listeners: Vec<Arc<dyn SelectionListener>> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener.on_selection_change(&snapshot, force);
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<(usize, bool)>>>, Arc<dyn SelectionListener>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener: Arc<dyn SelectionListener> =
            Arc::new(move |objs: &[SelectedObject], force: bool| {
                sink.lock().push((objs.len(), force));
            });
        (seen, listener)
    }

    #[test]
    fn publish_replaces_previous_selection() {
        let store = SelectionStore::new();
        store.publish(vec![
            SelectedObject::new("image-1"),
            SelectedObject::new("image-2"),
        ]);
        store.publish(vec![SelectedObject::new("dataset-9")]);

        let current = store.current();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].id, "dataset-9");
    }

    #[test]
    fn unforced_clear_is_not_delivered() {
        let store = SelectionStore::new();
        let (seen, listener) = recorder();
        store.subscribe(listener);

        store.clear(false);
        store.publish(vec![SelectedObject::new("image-257")]);

        assert_eq!(*seen.lock(), vec![(1, false)]);
    }

    #[test]
    fn forced_clear_is_delivered() {
        let store = SelectionStore::new();
        let (seen, listener) = recorder();
        store.subscribe(listener);

        store.publish(vec![SelectedObject::new("image-257")]);
        store.clear(true);

        assert_eq!(*seen.lock(), vec![(1, false), (0, true)]);
        assert!(store.is_empty());
    }

    #[test]
    fn unsubscribed_listener_stops_receiving() {
        let store = SelectionStore::new();
        let (seen, listener) = recorder();
        let id = store.subscribe(listener);

        store.publish(vec![SelectedObject::new("image-1")]);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.publish(vec![SelectedObject::new("image-2")]);

        assert_eq!(seen.lock().len(), 1);
    }
}
