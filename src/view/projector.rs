use crate::domain::todo::{StatusFilter, Task};

/// Derives the visible subsequence for the UI: case-insensitive substring
/// match on the task text, then the status filter, preserving collection
/// order. Pure — never mutates the input and is stable across repeated
/// calls with the same arguments.
pub fn project<'a>(tasks: &'a [Task], filter: StatusFilter, search: &str) -> Vec<&'a Task> {
    let needle = search.trim().to_lowercase();
    tasks
        .iter()
        .filter(|t| needle.is_empty() || t.text.to_lowercase().contains(&needle))
        .filter(|t| filter.matches(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::todo::TaskId;

    fn sample() -> Vec<Task> {
        vec![
            Task { id: TaskId(1), text: "Buy milk".into(), date: None, completed: false },
            Task { id: TaskId(2), text: "Pay bill".into(), date: Some("2025-02-01".into()), completed: true },
        ]
    }

    #[test]
    fn active_filter_keeps_incomplete_only() {
        let tasks = sample();
        let visible = project(&tasks, StatusFilter::Active, "");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, TaskId(1));
    }

    #[test]
    fn completed_filter_keeps_completed_only() {
        let tasks = sample();
        let visible = project(&tasks, StatusFilter::Completed, "");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, TaskId(2));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let tasks = sample();
        let visible = project(&tasks, StatusFilter::All, "bill");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, TaskId(2));
        let visible = project(&tasks, StatusFilter::All, "BUY");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, TaskId(1));
    }

    #[test]
    fn search_term_is_trimmed_and_empty_matches_all() {
        let tasks = sample();
        assert_eq!(project(&tasks, StatusFilter::All, "  milk  ").len(), 1);
        assert_eq!(project(&tasks, StatusFilter::All, "   ").len(), 2);
        assert_eq!(project(&tasks, StatusFilter::All, "").len(), 2);
    }

    #[test]
    fn collection_order_is_preserved() {
        let mut tasks = sample();
        tasks.push(Task { id: TaskId(3), text: "Buy stamps".into(), date: None, completed: false });
        let visible = project(&tasks, StatusFilter::All, "buy");
        let ids: Vec<_> = visible.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TaskId(1), TaskId(3)]);
    }

    #[test]
    fn repeated_projection_is_stable() {
        let tasks = sample();
        let first: Vec<_> = project(&tasks, StatusFilter::Active, "b").iter().map(|t| t.id).collect();
        let second: Vec<_> = project(&tasks, StatusFilter::Active, "b").iter().map(|t| t.id).collect();
        assert_eq!(first, second);
        assert_eq!(tasks, sample());
    }
}
