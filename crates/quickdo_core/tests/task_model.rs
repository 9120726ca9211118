use chrono::NaiveDate;
use quickdo_core::Task;
use uuid::Uuid;

#[test]
fn task_new_sets_defaults() {
    let task = Task::new("buy milk", None);

    assert!(!task.id.is_nil());
    assert_eq!(task.text, "buy milk");
    assert!(!task.completed);
    assert_eq!(task.due_date, None);
    assert!(task.is_active());
}

#[test]
fn task_new_generates_distinct_ids_for_rapid_creation() {
    let first = Task::new("first", None);
    let second = Task::new("second", None);

    assert_ne!(first.id, second.id);
}

#[test]
fn toggle_twice_restores_original_state() {
    let mut task = Task::new("flip me", None);

    task.toggle();
    assert!(task.completed);
    assert!(!task.is_active());

    task.toggle();
    assert!(!task.completed);
    assert!(task.is_active());
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut task = Task::with_id(task_id, "ship the release", date(2024, 3, 7));
    task.completed = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task_id.to_string());
    assert_eq!(json["text"], "ship the release");
    assert_eq!(json["completed"], true);
    assert_eq!(json["dueDate"], "2024-03-07");
    assert!(json["createdAt"].is_string());

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn records_without_due_date_still_deserialize() {
    let raw = r#"{
        "id": "11111111-2222-4333-8444-555555555555",
        "text": "older record",
        "completed": false,
        "createdAt": "2024-01-15T09:30:00Z"
    }"#;

    let decoded: Task = serde_json::from_str(raw).unwrap();
    assert_eq!(decoded.text, "older record");
    assert_eq!(decoded.due_date, None);
}

#[test]
fn absent_due_date_is_omitted_from_wire_shape() {
    let task = Task::new("no deadline", None);

    let json = serde_json::to_value(&task).unwrap();
    assert!(json.get("dueDate").is_none());
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    Some(NaiveDate::from_ymd_opt(year, month, day).unwrap())
}
