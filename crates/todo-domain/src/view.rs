//! View models rendered from a store snapshot.
//!
//! Rendering is a pure mapping: the same lists and selection always produce
//! the same view, and nothing here mutates the store.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::list::TodoList;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Dashboard(DashboardView),
    List(ListDetailView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub lists: Vec<ListCard>,
    pub is_empty: bool,
}

/// One list as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListCard {
    pub id: String,
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub summary: String,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListDetailView {
    pub id: String,
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub tasks: Vec<TaskRow>,
    pub is_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub position: usize,
    pub id: String,
    pub text: String,
    pub completed: bool,
}

pub fn render_dashboard(lists: &[TodoList]) -> DashboardView {
    let cards = lists
        .iter()
        .map(|list| {
            let completed = list.completed_count();
            let total = list.tasks.len();
            ListCard {
                id: list.id.clone(),
                name: list.name.clone(),
                completed,
                total,
                summary: format!("{} of {} tasks completed", completed, total),
                updated_at: list.updated_at,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!("Rendered {} lists", cards.len());
    DashboardView {
        is_empty: cards.is_empty(),
        lists: cards,
    }
}

pub fn render_list(list: &TodoList) -> ListDetailView {
    let tasks = list
        .tasks
        .iter()
        .enumerate()
        .map(|(position, task)| TaskRow {
            position,
            id: task.id.clone(),
            text: task.text.clone(),
            completed: task.completed,
        })
        .collect::<Vec<_>>();

    tracing::debug!("Rendered {} tasks", tasks.len());
    ListDetailView {
        id: list.id.clone(),
        name: list.name.clone(),
        completed: list.completed_count(),
        total: tasks.len(),
        is_empty: tasks.is_empty(),
        tasks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    fn groceries() -> TodoList {
        let now = Utc::now();
        let mut list = TodoList::new("l1".into(), "Groceries".into(), now);
        list.tasks.push(Task::new("t1".into(), "Milk".into(), now));
        list.tasks.push(Task::new("t2".into(), "Eggs".into(), now));
        list.tasks[0].toggle();
        list
    }

    #[test]
    fn test_render_empty_dashboard() {
        let view = render_dashboard(&[]);
        assert!(view.is_empty);
        assert!(view.lists.is_empty());
    }

    #[test]
    fn test_render_dashboard_summary() {
        let view = render_dashboard(&[groceries()]);
        assert!(!view.is_empty);
        assert_eq!(view.lists[0].completed, 1);
        assert_eq!(view.lists[0].total, 2);
        assert_eq!(view.lists[0].summary, "1 of 2 tasks completed");
    }

    #[test]
    fn test_render_list_keeps_order() {
        let view = render_list(&groceries());
        let rows: Vec<(usize, &str, bool)> = view
            .tasks
            .iter()
            .map(|r| (r.position, r.text.as_str(), r.completed))
            .collect();
        assert_eq!(rows, vec![(0, "Milk", true), (1, "Eggs", false)]);
        assert_eq!(view.completed, 1);
        assert!(!view.is_empty);
    }

    #[test]
    fn test_view_is_tagged() {
        let value = serde_json::to_value(View::List(render_list(&groceries()))).unwrap();
        assert_eq!(value["view"], "list");
        assert_eq!(value["name"], "Groceries");

        let value = serde_json::to_value(View::Dashboard(render_dashboard(&[]))).unwrap();
        assert_eq!(value["view"], "dashboard");
        assert_eq!(value["is_empty"], true);
    }
}
