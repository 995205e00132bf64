use pool_driver::GraphStore;
use tracing::{debug, warn};

/// Graphs the workflow stored for its own use. Whatever is still held when
/// the guard drops is deleted, so no failure path leaves temporaries behind.
pub(crate) struct Scratch<'a, S: GraphStore> {
    store: &'a S,
    space_ids: Vec<String>,
}

impl<'a, S: GraphStore> Scratch<'a, S> {
    pub(crate) fn new(store: &'a S) -> Self {
        Self {
            store,
            space_ids: Vec::new(),
        }
    }

    pub(crate) fn hold(&mut self, space_id: String) {
        self.space_ids.push(space_id);
    }

    /// Deletes one held graph now.
    pub(crate) fn release(&mut self, space_id: &str) {
        if let Some(pos) = self.space_ids.iter().position(|id| id == space_id) {
            let id = self.space_ids.swap_remove(pos);
            if self.store.delete(&id) {
                debug!("deleted temporary space '{id}'");
            } else {
                warn!("temporary space '{id}' was already gone");
            }
        }
    }
}

impl<S: GraphStore> Drop for Scratch<'_, S> {
    fn drop(&mut self) {
        for id in self.space_ids.drain(..) {
            self.store.delete(&id);
            debug!("cleaned up temporary space '{id}'");
        }
    }
}
