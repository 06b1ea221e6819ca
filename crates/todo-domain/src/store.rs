//! The list store: the only mutation surface for lists and tasks.
//!
//! Every successful mutation writes the whole collection back to storage
//! under [`TODO_LISTS_KEY`]. Storage failures are logged and swallowed: the
//! in-memory change stands even when the write did not land. Rejected
//! operations and operations on unknown ids leave state untouched and write
//! nothing.

use std::sync::Arc;

use todo_core::config::DEFAULT_MAX_LIST_NAME_LENGTH;
use todo_core::{KeyValueStore, TodoError, TodoResult, TODO_LISTS_KEY};

use crate::clock::{Clock, SystemClock};
use crate::id::{IdGenerator, TimeRandomIdGenerator};
use crate::list::{MoveDirection, TodoList};
use crate::task::Task;
use crate::validation;

pub struct ListStore {
    lists: Vec<TodoList>,
    storage: Arc<dyn KeyValueStore>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    max_name_length: usize,
}

impl ListStore {
    /// Open a store over `storage`, loading whatever it currently holds.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            lists: Vec::new(),
            storage,
            ids: Box::new(TimeRandomIdGenerator),
            clock: Box::new(SystemClock),
            max_name_length: DEFAULT_MAX_LIST_NAME_LENGTH,
        };
        store.lists = store.load_all();
        store
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn get_list(&self, id: &str) -> Option<&TodoList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn find_list_by_name(&self, name: &str) -> Option<&TodoList> {
        let name = name.trim();
        self.lists
            .iter()
            .find(|l| validation::names_match(&l.name, name))
    }

    /// Read the stored collection, failing on unreadable or unparsable data.
    fn try_load(&self) -> TodoResult<Vec<TodoList>> {
        let Some(raw) = self.storage.get(TODO_LISTS_KEY)? else {
            return Ok(Vec::new());
        };
        let lists: Vec<TodoList> =
            serde_json::from_str(&raw).map_err(|e| TodoError::Serialization(e.to_string()))?;
        tracing::debug!(count = lists.len(), "Loaded lists from storage");
        Ok(lists)
    }

    /// Read the stored collection. Absent, unreadable and unparsable data all
    /// load as an empty collection.
    pub fn load_all(&self) -> Vec<TodoList> {
        self.try_load().unwrap_or_else(|e| {
            tracing::error!("Error loading lists from storage: {}", e);
            Vec::new()
        })
    }

    /// Overwrite storage with `lists`. Returns whether the write landed;
    /// failures are logged and otherwise ignored.
    pub fn save_all(&self, lists: &[TodoList]) -> bool {
        let payload = match serde_json::to_string(lists) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Error serializing lists: {}", e);
                return false;
            }
        };
        match self.storage.set(TODO_LISTS_KEY, &payload) {
            Ok(()) => {
                tracing::info!(count = lists.len(), "Lists saved to storage");
                true
            }
            Err(e) => {
                tracing::error!("Error saving lists to storage: {}", e);
                false
            }
        }
    }

    fn persist(&self) -> bool {
        self.save_all(&self.lists)
    }

    /// Replace the in-memory collection with the stored one if they differ.
    ///
    /// Last writer wins: concurrent edits from other instances are not
    /// merged. Unreadable storage loads as empty, like [`Self::load_all`].
    pub fn reload(&mut self) -> bool {
        let stored = self.load_all();
        if stored == self.lists {
            return false;
        }
        tracing::info!(count = stored.len(), "Lists refreshed from storage");
        self.lists = stored;
        true
    }

    fn list_index(&self, id: &str) -> TodoResult<usize> {
        self.lists
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| TodoError::NotFound(format!("List {}", id)))
    }

    fn list_mut(&mut self, id: &str) -> TodoResult<&mut TodoList> {
        let index = self.list_index(id)?;
        Ok(&mut self.lists[index])
    }

    pub fn create_list(&mut self, name: &str) -> TodoResult<TodoList> {
        let name = validation::normalize_list_name(name, self.max_name_length)?;
        validation::ensure_unique_name(&self.lists, &name, None)?;

        let list = TodoList::new(self.ids.next_id(), name, self.clock.now());
        self.lists.push(list.clone());
        self.persist();

        tracing::info!(list_id = %list.id, "Created list '{}'", list.name);
        Ok(list)
    }

    pub fn rename_list(&mut self, id: &str, new_name: &str) -> TodoResult<TodoList> {
        let index = self.list_index(id)?;
        let name = validation::normalize_list_name(new_name, self.max_name_length)?;
        validation::ensure_unique_name(&self.lists, &name, Some(id))?;

        let now = self.clock.now();
        let list = &mut self.lists[index];
        list.rename(name, now);
        let renamed = list.clone();
        self.persist();

        tracing::info!(list_id = %id, "Renamed list to '{}'", renamed.name);
        Ok(renamed)
    }

    /// Remove a list together with all of its tasks.
    pub fn delete_list(&mut self, id: &str) -> TodoResult<TodoList> {
        let index = self.list_index(id)?;
        let removed = self.lists.remove(index);
        self.persist();

        tracing::info!(list_id = %id, tasks = removed.tasks.len(), "Deleted list");
        Ok(removed)
    }

    pub fn add_task(&mut self, list_id: &str, text: &str) -> TodoResult<Task> {
        let index = self.list_index(list_id)?;
        let text = validation::normalize_task_text(text)?;

        let now = self.clock.now();
        let task = Task::new(self.ids.next_id(), text, now);
        self.lists[index].push_task(task.clone(), now);
        self.persist();

        tracing::info!(list_id = %list_id, task_id = %task.id, "Added task");
        Ok(task)
    }

    pub fn toggle_task(&mut self, list_id: &str, task_id: &str) -> TodoResult<Task> {
        let now = self.clock.now();
        let list = self.list_mut(list_id)?;
        let task = list
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| TodoError::NotFound(format!("Task {}", task_id)))?;
        task.toggle();
        let toggled = task.clone();
        list.touch(now);
        self.persist();

        tracing::info!(
            list_id = %list_id,
            task_id = %task_id,
            completed = toggled.completed,
            "Toggled task"
        );
        Ok(toggled)
    }

    pub fn delete_task(&mut self, list_id: &str, task_id: &str) -> TodoResult<Task> {
        let now = self.clock.now();
        let list = self.list_mut(list_id)?;
        let index = list
            .task_index(task_id)
            .ok_or_else(|| TodoError::NotFound(format!("Task {}", task_id)))?;
        let removed = list.tasks.remove(index);
        list.touch(now);
        self.persist();

        tracing::info!(list_id = %list_id, task_id = %task_id, "Deleted task");
        Ok(removed)
    }

    /// Move the task at `from` to `to`, shifting the tasks in between.
    ///
    /// Both indices must address existing tasks; anything else is rejected
    /// and leaves the order untouched. Moving a task onto itself changes
    /// nothing and writes nothing.
    pub fn reorder_task(&mut self, list_id: &str, from: usize, to: usize) -> TodoResult<()> {
        let now = self.clock.now();
        let list = self.list_mut(list_id)?;
        validation::ensure_move_in_bounds(list.tasks.len(), from, to)?;
        if from == to {
            return Ok(());
        }
        list.move_task(from, to, now);
        self.persist();

        tracing::info!(list_id = %list_id, from, to, "Tasks reordered");
        Ok(())
    }

    /// Move a task one slot up or down. At either end of the list this is a
    /// no-op. Returns the task's index afterwards.
    pub fn move_task(
        &mut self,
        list_id: &str,
        task_id: &str,
        direction: MoveDirection,
    ) -> TodoResult<usize> {
        let list = self
            .get_list(list_id)
            .ok_or_else(|| TodoError::NotFound(format!("List {}", list_id)))?;
        let index = list
            .task_index(task_id)
            .ok_or_else(|| TodoError::NotFound(format!("Task {}", task_id)))?;

        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|&i| i < list.tasks.len()),
        };
        match target {
            Some(target) => {
                self.reorder_task(list_id, index, target)?;
                Ok(target)
            }
            None => Ok(index),
        }
    }
}
