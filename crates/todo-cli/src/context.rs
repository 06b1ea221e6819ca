use std::path::Path;
use std::sync::Arc;
use todo_core::AppConfig;
use todo_domain::{ListStore, Session, Theme, View};
use todo_persistence::JsonFileStorage;

pub struct CliContext {
    pub session: Session,
    storage: Arc<JsonFileStorage>,
}

impl CliContext {
    pub fn load(file_path: &Path, config: &AppConfig) -> Self {
        let storage =
            Arc::new(JsonFileStorage::new(file_path).with_quota(config.storage_quota_bytes));
        let store = ListStore::new(storage.clone())
            .with_max_name_length(config.effective_max_list_name_length());

        tracing::debug!(
            path = %file_path.display(),
            lists = store.lists().len(),
            "Loaded storage"
        );

        Self {
            session: Session::new(store),
            storage,
        }
    }

    pub fn storage(&self) -> &JsonFileStorage {
        &self.storage
    }

    pub fn store(&self) -> &ListStore {
        self.session.store()
    }

    pub fn store_mut(&mut self) -> &mut ListStore {
        self.session.store_mut()
    }

    pub fn theme(&self) -> Theme {
        Theme::load(self.storage.as_ref())
    }

    /// View of `list_id` if it still exists, the dashboard otherwise
    pub fn view_of(&mut self, list_id: &str) -> View {
        if self.session.open_list(list_id).is_err() {
            self.session.show_dashboard();
        }
        self.session.view()
    }

    pub fn dashboard(&mut self) -> View {
        self.session.show_dashboard();
        self.session.view()
    }
}
