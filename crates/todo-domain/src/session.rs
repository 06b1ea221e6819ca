use serde::Serialize;
use todo_core::{TodoError, TodoResult};

use crate::list::{ListId, TodoList};
use crate::store::ListStore;
use crate::view::{self, View};

/// What a refresh from storage did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    pub changed: bool,
    pub fell_back_to_dashboard: bool,
}

/// A store plus the session-only selection of the list being viewed.
///
/// The selection is never persisted. When it points at a list that no longer
/// exists the session shows the dashboard.
pub struct Session {
    store: ListStore,
    current: Option<ListId>,
}

impl Session {
    pub fn new(store: ListStore) -> Self {
        Self {
            store,
            current: None,
        }
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ListStore {
        &mut self.store
    }

    pub fn current_list_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_list(&self) -> Option<&TodoList> {
        self.current
            .as_deref()
            .and_then(|id| self.store.get_list(id))
    }

    pub fn open_list(&mut self, id: &str) -> TodoResult<&TodoList> {
        let list = self
            .store
            .get_list(id)
            .ok_or_else(|| TodoError::NotFound(format!("List {}", id)))?;
        self.current = Some(list.id.clone());
        Ok(list)
    }

    pub fn show_dashboard(&mut self) {
        self.current = None;
    }

    /// Delete a list, leaving the list view if it was the one shown.
    pub fn delete_list(&mut self, id: &str) -> TodoResult<TodoList> {
        let removed = self.store.delete_list(id)?;
        if self.current.as_deref() == Some(id) {
            self.show_dashboard();
        }
        Ok(removed)
    }

    /// Pick up changes another instance made to storage.
    pub fn refresh(&mut self) -> RefreshOutcome {
        let changed = self.store.reload();
        let mut fell_back_to_dashboard = false;
        if changed && self.current.is_some() && self.current_list().is_none() {
            tracing::info!("Current list was deleted elsewhere, showing dashboard");
            self.show_dashboard();
            fell_back_to_dashboard = true;
        }
        RefreshOutcome {
            changed,
            fell_back_to_dashboard,
        }
    }

    pub fn view(&self) -> View {
        match self.current_list() {
            Some(list) => View::List(view::render_list(list)),
            None => View::Dashboard(view::render_dashboard(self.store.lists())),
        }
    }
}
