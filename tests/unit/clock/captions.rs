use super::*;
use crate::story::timetable::SCENES;

#[test]
fn log_records_changes_in_order() {
    let mut log = CaptionLog::new();
    assert!(log.is_empty());
    assert!(log.current().is_none());

    log.scene_changed(&SCENES[0]);
    log.scene_changed(&SCENES[1]);
    assert_eq!(log.len(), 2);
    assert_eq!(log.ids(), vec!["playful", "warning"]);
    assert_eq!(log.current().map(|s| s.label), Some("Lion's Warning"));
}

#[test]
fn log_serializes_to_json() {
    let mut log = CaptionLog::new();
    log.scene_changed(&SCENES[3]);
    let json = log.to_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v[0]["id"], "aftermath");
    assert_eq!(v[0]["label"], "Savanna Silence");
    assert_eq!(v[0]["start"], 14.0);
}

#[test]
fn sinks_compose_through_references_and_boxes() {
    let mut log = CaptionLog::new();
    {
        let mut by_ref = &mut log;
        CaptionSink::scene_changed(&mut by_ref, &SCENES[2]);
    }
    assert_eq!(log.ids(), vec!["pounce"]);

    let mut boxed: Box<dyn CaptionSink> = Box::new(TracingCaptions);
    boxed.scene_changed(&SCENES[0]);
}
