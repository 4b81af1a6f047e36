use todo_core::{Priority, Recurrence, TaskDraft, TaskStore};

#[test]
fn completing_daily_task_spawns_successor() {
    let mut store = TaskStore::new();
    let id = store
        .add_task(
            TaskDraft::new("Take vitamins")
                .description("with breakfast")
                .priority(Priority::High)
                .tags(["health"])
                .due_date("2025-01-01")
                .recurrence(Recurrence::Daily),
        )
        .expect("add");

    let next_id = store
        .handle_completion(id)
        .expect("complete")
        .expect("successor");
    assert_eq!(next_id, 2);
    assert!(store.get_task_by_id(id).expect("original").completed());

    let next = store.get_task_by_id(next_id).expect("successor");
    assert!(!next.completed());
    assert_eq!(next.title(), "Take vitamins");
    assert_eq!(next.description(), "with breakfast");
    assert_eq!(next.priority(), Priority::High);
    assert_eq!(next.recurrence(), Some(Recurrence::Daily));
    assert_eq!(next.due_date(), Some("2025-01-02"));
    assert_eq!(next.due_datetime(), None);
    assert_eq!(next.tags(), ["health"]);
}

#[test]
fn successor_tags_are_independent() {
    let mut store = TaskStore::new();
    let id = store
        .add_task(
            TaskDraft::new("Gym")
                .tags(["fitness"])
                .due_date("2025-03-01")
                .recurrence(Recurrence::Weekly),
        )
        .expect("add");
    let next_id = store.handle_completion(id).expect("complete").expect("successor");

    store.add_tag(next_id, "legs").expect("add tag");
    store.remove_tag(next_id, "fitness").expect("remove tag");

    assert_eq!(store.get_task_by_id(id).expect("original").tags(), ["fitness"]);
    assert_eq!(store.get_task_by_id(next_id).expect("successor").tags(), ["legs"]);
}

#[test]
fn both_due_fields_advance_independently() {
    let mut store = TaskStore::new();
    let id = store
        .add_task(
            TaskDraft::new("Invoice")
                .due_date("2025-01-31")
                .due_datetime("2025-01-15 17:00")
                .recurrence(Recurrence::Monthly),
        )
        .expect("add");
    let next_id = store.handle_completion(id).expect("complete").expect("successor");

    let next = store.get_task_by_id(next_id).expect("successor");
    assert_eq!(next.due_date(), Some("2025-03-02"));
    assert_eq!(next.due_datetime(), Some("2025-02-14 17:00"));
}

#[test]
fn recurring_task_without_due_fields_still_recurs() {
    let mut store = TaskStore::new();
    let id = store
        .add_task(TaskDraft::new("Stretch").recurrence(Recurrence::Daily))
        .expect("add");
    let next_id = store.handle_completion(id).expect("complete").expect("successor");

    let next = store.get_task_by_id(next_id).expect("successor");
    assert_eq!(next.due_date(), None);
    assert_eq!(next.due_datetime(), None);
    assert_eq!(next.recurrence(), Some(Recurrence::Daily));
}

#[test]
fn one_shot_task_only_completes() {
    let mut store = TaskStore::new();
    let id = store
        .add_task(TaskDraft::new("File taxes").due_date("2025-04-15"))
        .expect("add");
    assert_eq!(store.handle_completion(id).expect("complete"), None);
    assert!(store.get_task_by_id(id).expect("task").completed());
    assert_eq!(store.get_task_count(), 1);
    assert_eq!(store.get_next_id(), 2);
}

#[test]
fn chain_continues_until_recurrence_cleared() {
    let mut store = TaskStore::new();
    let first = store
        .add_task(
            TaskDraft::new("Water plants")
                .due_date("2025-05-01")
                .recurrence(Recurrence::Weekly),
        )
        .expect("add");
    let second = store.handle_completion(first).expect("complete").expect("second");
    let third = store.handle_completion(second).expect("complete").expect("third");
    assert_eq!(
        store.get_task_by_id(third).expect("third").due_date(),
        Some("2025-05-15")
    );

    store.set_recurrence(third, None).expect("clear");
    assert_eq!(store.handle_completion(third).expect("complete"), None);
    assert_eq!(store.get_task_count(), 3);
}

#[test]
fn handle_completion_validates_id() {
    let mut store = TaskStore::new();
    assert!(matches!(
        store.handle_completion("nope"),
        Err(todo_core::Error::InvalidInput(_))
    ));
    assert!(matches!(
        store.handle_completion(1),
        Err(todo_core::Error::NotFound(1))
    ));
}
