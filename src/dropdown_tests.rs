use super::*;

fn command(id: &str, name: &str, body: &str) -> Command {
    Command {
        id: id.to_string(),
        name: name.to_string(),
        command: body.to_string(),
        description: None,
    }
}

fn sample_set() -> Vec<Command> {
    vec![
        command("1", "RefactorCode", "Act like a software developer."),
        command("2", "CheckSpelling", "Act like an English teacher."),
        command("3", "OptimizePerformance", "Act like a performance expert."),
    ]
}

fn config() -> PickerConfig {
    PickerConfig::default()
}

fn open_session(value: &str, commands: &[Command]) -> Option<DropdownSession> {
    let mut slot = None;
    sync_session(&mut slot, value, commands, &config());
    slot
}

#[test]
fn typing_the_trigger_opens_with_all_commands() {
    let commands = sample_set();
    let mut slot = None;
    let change = sync_session(&mut slot, "$", &commands, &config());
    assert_eq!(change, SessionChange::Opened);
    let session = slot.expect("session is open");
    assert_eq!(session.entries().len(), 3);
    assert_eq!(session.focus(), 0);
}

#[test]
fn query_filters_and_focuses_first_match() {
    let commands = sample_set();
    let session = open_session("$check", &commands).expect("session is open");
    assert_eq!(session.entries().len(), 1);
    assert_eq!(session.entries()[0].name, "CheckSpelling");
    assert_eq!(session.focus(), 0);
    let marked: Vec<_> = session.entries()[0]
        .segments
        .iter()
        .filter(|segment| segment.emphasized)
        .map(|segment| segment.text.as_str())
        .collect();
    assert_eq!(marked, vec!["Check"]);
}

#[test]
fn refreshing_with_a_new_query_refilters() {
    let commands = sample_set();
    let mut slot = open_session("$", &commands);
    let change = sync_session(&mut slot, "$optimize", &commands, &config());
    assert_eq!(change, SessionChange::Refreshed);
    let session = slot.expect("session stays open");
    assert_eq!(session.entries().len(), 1);
    assert_eq!(session.entries()[0].name, "OptimizePerformance");
}

#[test]
fn no_matches_closes_the_session() {
    let commands = sample_set();
    let mut slot = open_session("$", &commands);
    let change = sync_session(&mut slot, "$zzz", &commands, &config());
    assert_eq!(change, SessionChange::Closed);
    assert!(slot.is_none());
}

#[test]
fn no_matches_never_opens_a_session() {
    let commands = sample_set();
    let mut slot = None;
    let change = sync_session(&mut slot, "$zzz", &commands, &config());
    assert_eq!(change, SessionChange::Unchanged);
    assert!(slot.is_none());
}

#[test]
fn losing_the_trigger_prefix_closes_the_session() {
    let commands = sample_set();
    let mut slot = open_session("$abc", &commands);
    assert!(slot.is_none(), "no command matches abc");

    let mut slot = open_session("$check", &commands);
    let change = sync_session(&mut slot, "check", &commands, &config());
    assert_eq!(change, SessionChange::Closed);
    assert!(slot.is_none());
}

#[test]
fn absent_trigger_with_no_session_changes_nothing() {
    let commands = sample_set();
    let mut slot = None;
    let change = sync_session(&mut slot, "plain text", &commands, &config());
    assert_eq!(change, SessionChange::Unchanged);
    assert!(slot.is_none());
}

#[test]
fn focus_wraps_from_last_to_first() {
    let commands = sample_set();
    let mut session = open_session("$", &commands).expect("session is open");
    session.set_focus(2);
    session.move_focus(1);
    assert_eq!(session.focus(), 0);
}

#[test]
fn focus_wraps_from_first_to_last() {
    let commands = sample_set();
    let mut session = open_session("$", &commands).expect("session is open");
    session.move_focus(-1);
    assert_eq!(session.focus(), 2);
}

#[test]
fn focus_moves_one_step_between_neighbors() {
    let commands = sample_set();
    let mut session = open_session("$", &commands).expect("session is open");
    session.move_focus(1);
    assert_eq!(session.focus(), 1);
    session.move_focus(-1);
    assert_eq!(session.focus(), 0);
}

#[test]
fn committing_the_focused_entry_yields_its_command_text() {
    let commands = sample_set();
    let mut session = open_session("$check", &commands).expect("session is open");
    session.set_focus(0);
    let entry = session.focused().expect("an entry is focused");
    assert_eq!(entry.command, "Act like an English teacher.");
}

#[test]
fn backspace_shortens_query_and_rewrites_the_input() {
    let commands = sample_set();
    let mut session = open_session("$check", &commands).expect("session is open");
    let (value, close) = session.backspace_query('$');
    assert_eq!(value, "$chec");
    assert!(!close);
    assert_eq!(session.query(), "chec");
}

#[test]
fn backspace_on_single_char_query_requests_close() {
    let commands = sample_set();
    let mut session = open_session("$c", &commands).expect("session is open");
    let (value, close) = session.backspace_query('$');
    assert_eq!(value, "$");
    assert!(close);
}

#[test]
fn backspace_on_empty_query_requests_close() {
    let commands = sample_set();
    let mut session = open_session("$", &commands).expect("session is open");
    let (value, close) = session.backspace_query('$');
    assert_eq!(value, "$");
    assert!(close);
}

#[test]
fn refresh_after_delete_shows_remaining_commands() {
    let mut commands = sample_set();
    let mut session = open_session("$check", &commands).expect("session is open");

    // the store deleted CheckSpelling and the controller re-renders with
    // an empty query
    commands.retain(|c| c.id != "2");
    session.refresh(&commands, "");

    let names: Vec<_> = session.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["RefactorCode", "OptimizePerformance"]);
    assert_eq!(session.focus(), 0);
    assert_eq!(session.query(), "");
}

#[test]
fn refresh_resets_focus_to_first() {
    let commands = sample_set();
    let mut session = open_session("$", &commands).expect("session is open");
    session.set_focus(2);
    session.refresh(&commands, "e");
    assert_eq!(session.focus(), 0);
}

#[test]
fn overlay_origin_sits_above_the_input() {
    let config = PickerConfig {
        overlay_height: 12,
        overlay_gap: 1,
        ..PickerConfig::default()
    };
    let input = Rect::new(4, 20, 40, 1);
    let (x, y) = overlay_origin(input, ScrollOffset::default(), &config);
    assert_eq!(x, 4);
    assert_eq!(y, 7);
}

#[test]
fn overlay_origin_applies_scroll_offset() {
    let config = PickerConfig {
        overlay_height: 10,
        overlay_gap: 2,
        ..PickerConfig::default()
    };
    let input = Rect::new(4, 20, 40, 1);
    let (x, y) = overlay_origin(input, ScrollOffset { x: 3, y: 5 }, &config);
    assert_eq!(x, 7);
    assert_eq!(y, 13);
}

#[test]
fn overlay_origin_saturates_at_the_top_edge() {
    let config = PickerConfig {
        overlay_height: 12,
        overlay_gap: 1,
        ..PickerConfig::default()
    };
    let input = Rect::new(0, 3, 40, 1);
    let (_, y) = overlay_origin(input, ScrollOffset::default(), &config);
    assert_eq!(y, 0);
}

#[test]
fn overlay_rect_is_clipped_to_the_screen() {
    let config = PickerConfig {
        overlay_width: 44,
        overlay_height: 12,
        overlay_gap: 1,
        ..PickerConfig::default()
    };
    let screen = Rect::new(0, 0, 30, 10);
    let input = Rect::new(1, 8, 28, 1);
    let rect = overlay_rect(input, ScrollOffset::default(), screen, &config);
    assert!(rect.right() <= screen.right());
    assert!(rect.bottom() <= screen.bottom());
}
