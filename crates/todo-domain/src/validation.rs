//! Validation predicates applied before any store mutation.
//!
//! Every check either returns the normalized input or a rejection. Nothing in
//! here touches the collection, so a rejected operation leaves state unchanged.

use crate::TodoList;
use todo_core::{TodoError, TodoResult};

/// Trim a list name and check it is non-empty and at most `max_len` characters.
pub fn normalize_list_name(name: &str, max_len: usize) -> TodoResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TodoError::Validation(
            "Please enter a list name".to_string(),
        ));
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(TodoError::Validation(format!(
            "List name is {} characters long; the limit is {}",
            len, max_len
        )));
    }
    Ok(trimmed.to_string())
}

/// Names compare equal when they match ignoring case.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Reject `name` if another list already uses it, ignoring case.
/// `exclude` skips the list being renamed.
pub fn ensure_unique_name(
    lists: &[TodoList],
    name: &str,
    exclude: Option<&str>,
) -> TodoResult<()> {
    let clash = lists
        .iter()
        .filter(|list| Some(list.id.as_str()) != exclude)
        .any(|list| names_match(&list.name, name));
    if clash {
        return Err(TodoError::DuplicateName(name.to_string()));
    }
    Ok(())
}

/// Trim task text and check it is non-empty.
pub fn normalize_task_text(text: &str) -> TodoResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TodoError::Validation("Please enter a task".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Both indices of a move must address an existing task.
pub fn ensure_move_in_bounds(len: usize, from: usize, to: usize) -> TodoResult<()> {
    if from >= len || to >= len {
        return Err(TodoError::InvalidMove { from, to, len });
    }
    Ok(())
}
