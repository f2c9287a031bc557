use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use egui::{Context, Event, Id, Modifiers, Order, PointerButton, Pos2, RawInput, Rect, Sense, Vec2};

use super::AnimationDriver as _;
use super::{DragPhase, DragStartPolicy, ReorderCommit, ReorderOptions, ReorderResponse, ReorderableList, ScrollAxis};

fn items(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

fn raw_input(time: Option<f64>, events: Vec<Event>) -> RawInput {
    RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 300.0))),
        time,
        events,
        ..Default::default()
    }
}

/// One pass with the list in a central panel, optionally under a click-sensing
/// foreground area that covers the whole screen.
fn run_raw(
    ctx: &Context,
    list: &mut ReorderableList,
    items: &mut Vec<String>,
    raw: RawInput,
    covered: bool,
) -> ReorderResponse {
    ctx.begin_pass(raw);
    let mut response = ReorderResponse::default();
    egui::CentralPanel::default().show(ctx, |ui| {
        response = list.show(ui, items, |ui, item, _cx| {
            ui.label(item.as_str());
        });
    });
    if covered {
        egui::Area::new(Id::new("cover"))
            .order(Order::Foreground)
            .fixed_pos(Pos2::ZERO)
            .show(ctx, |ui| {
                ui.allocate_response(Vec2::new(400.0, 300.0), Sense::click());
            });
    }
    let _ = ctx.end_pass();
    response
}

fn run_pass(
    ctx: &Context,
    list: &mut ReorderableList,
    items: &mut Vec<String>,
    events: Vec<Event>,
) -> ReorderResponse {
    run_raw(ctx, list, items, raw_input(None, events), false)
}

fn run_at(
    ctx: &Context,
    list: &mut ReorderableList,
    items: &mut Vec<String>,
    time: f64,
    events: Vec<Event>,
) -> ReorderResponse {
    run_raw(ctx, list, items, raw_input(Some(time), events), false)
}

fn press(pos: Pos2) -> Vec<Event> {
    vec![
        Event::PointerMoved(pos),
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        },
    ]
}

fn release(pos: Pos2) -> Vec<Event> {
    vec![Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed: false,
        modifiers: Modifiers::NONE,
    }]
}

/// Keep showing frames until the drop has settled, collecting any commits.
fn settle(
    ctx: &Context,
    list: &mut ReorderableList,
    items: &mut Vec<String>,
) -> Vec<ReorderCommit> {
    let mut commits = Vec::new();
    for _ in 0..90 {
        let response = run_pass(ctx, list, items, Vec::new());
        commits.extend(response.moved);
        if response.phase == DragPhase::Idle {
            break;
        }
    }
    commits
}

fn vertical_options() -> ReorderOptions {
    ReorderOptions {
        item_extent: 40.0,
        debug_event_log: true,
        ..Default::default()
    }
}

#[test]
fn dragging_a_handle_moves_the_item() {
    let ctx = Context::default();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut list = ReorderableList::new("drag_test", vertical_options())
        .expect("valid options")
        .on_item_reorder({
            let calls = Rc::clone(&calls);
            move |from, to| calls.borrow_mut().push((from, to))
        });
    let mut names = items(&["a", "b", "c", "d", "e"]);

    run_pass(&ctx, &mut list, &mut names, Vec::new());
    let key_b = list.item_key(1).expect("key for b");
    let start = list
        .handle_rect_on_screen(1)
        .expect("list was laid out")
        .center();

    let response = run_pass(&ctx, &mut list, &mut names, press(start));
    assert_eq!(response.phase, DragPhase::Dragging);
    assert_eq!(list.session().drag_index(), Some(1));

    for step in 1..=3 {
        let pos = start + Vec2::new(0.0, 20.0 * step as f32);
        run_pass(&ctx, &mut list, &mut names, vec![Event::PointerMoved(pos)]);
    }
    assert_eq!(list.session().hover_index(), Some(3));
    assert!(!list.scroll_enabled, "scrolling is disabled while dragging");

    let end = start + Vec2::new(0.0, 60.0);
    let response = run_pass(&ctx, &mut list, &mut names, release(end));
    let mut commits: Vec<_> = response.moved.into_iter().collect();
    commits.extend(settle(&ctx, &mut list, &mut names));

    assert_eq!(commits, vec![ReorderCommit { from: 1, to: 3 }]);
    assert_eq!(names, items(&["a", "c", "d", "b", "e"]));
    assert_eq!(*calls.borrow(), vec![(1, 3)]);
    assert_eq!(list.item_key(3), Some(key_b), "the key travels with the item");
    assert_eq!(list.phase(), DragPhase::Idle);
    assert!(list.scroll_enabled, "scrolling is restored after the drop");
}

#[test]
fn press_and_release_in_place_does_not_reorder() {
    let ctx = Context::default();
    let calls = Rc::new(RefCell::new(0_usize));
    let mut list = ReorderableList::new("no_move_test", vertical_options())
        .expect("valid options")
        .on_item_reorder({
            let calls = Rc::clone(&calls);
            move |_, _| *calls.borrow_mut() += 1
        });
    let mut names = items(&["a", "b", "c"]);

    run_pass(&ctx, &mut list, &mut names, Vec::new());
    let pos = list.handle_rect_on_screen(2).expect("laid out").center();
    run_pass(&ctx, &mut list, &mut names, press(pos));
    run_pass(&ctx, &mut list, &mut names, release(pos));
    let commits = settle(&ctx, &mut list, &mut names);

    assert!(commits.is_empty());
    assert_eq!(names, items(&["a", "b", "c"]));
    assert_eq!(*calls.borrow(), 0);
    assert_eq!(list.phase(), DragPhase::Idle);
}

#[test]
fn pressing_outside_the_handle_does_not_start_a_drag() {
    let ctx = Context::default();
    let mut list = ReorderableList::new("off_handle_test", vertical_options()).expect("valid options");
    let mut names = items(&["a", "b", "c"]);

    run_pass(&ctx, &mut list, &mut names, Vec::new());
    let row = list.row_rect_on_screen(1).expect("laid out");
    let handle = list.handle_rect_on_screen(1).expect("laid out");
    assert!(!handle.contains(row.center()), "handle sits at the trailing edge");

    let response = run_pass(&ctx, &mut list, &mut names, press(row.center()));
    assert_eq!(response.phase, DragPhase::Idle);
    assert!(!list.is_dragging());
}

#[test]
fn host_can_apply_the_move_itself() {
    let ctx = Context::default();
    let options = ReorderOptions {
        apply_reorder: false,
        ..vertical_options()
    };
    let mut list = ReorderableList::new("host_applies_test", options).expect("valid options");
    let mut names = items(&["a", "b", "c", "d"]);

    run_pass(&ctx, &mut list, &mut names, Vec::new());
    let start = list.handle_rect_on_screen(0).expect("laid out").center();
    run_pass(&ctx, &mut list, &mut names, press(start));
    let end = start + Vec2::new(0.0, 45.0);
    run_pass(&ctx, &mut list, &mut names, vec![Event::PointerMoved(end)]);
    let response = run_pass(&ctx, &mut list, &mut names, release(end));
    let mut commits: Vec<_> = response.moved.into_iter().collect();
    commits.extend(settle(&ctx, &mut list, &mut names));

    assert_eq!(commits, vec![ReorderCommit { from: 0, to: 1 }]);
    assert_eq!(names, items(&["a", "b", "c", "d"]), "items are left alone");
}

#[test]
fn horizontal_list_reorders_along_x() {
    let ctx = Context::default();
    let options = ReorderOptions {
        axis: ScrollAxis::Horizontal,
        item_extent: 60.0,
        ..Default::default()
    };
    let mut list = ReorderableList::new("horizontal_test", options).expect("valid options");
    let mut names = items(&["a", "b", "c"]);

    run_pass(&ctx, &mut list, &mut names, Vec::new());
    let handle = list.handle_rect_on_screen(0).expect("laid out");
    let row = list.row_rect_on_screen(0).expect("laid out");
    assert_eq!(handle.width(), 60.0);
    assert!(
        (handle.bottom() - row.bottom()).abs() < 1e-3,
        "alignment 1.0 puts the handle at the far edge"
    );

    let start = handle.center();
    run_pass(&ctx, &mut list, &mut names, press(start));
    for step in 1..=2 {
        let pos = start + Vec2::new(65.0 * step as f32, 0.0);
        run_pass(&ctx, &mut list, &mut names, vec![Event::PointerMoved(pos)]);
    }
    assert_eq!(list.session().hover_index(), Some(2));

    run_pass(&ctx, &mut list, &mut names, release(start + Vec2::new(130.0, 0.0)));
    settle(&ctx, &mut list, &mut names);
    assert_eq!(names, items(&["b", "c", "a"]));
}

#[test]
fn debug_log_records_transitions_and_commits() {
    let ctx = Context::default();
    let mut list = ReorderableList::new("debug_log_test", vertical_options()).expect("valid options");
    let mut names = items(&["a", "b"]);

    run_pass(&ctx, &mut list, &mut names, Vec::new());
    let start = list.handle_rect_on_screen(0).expect("laid out").center();
    run_pass(&ctx, &mut list, &mut names, press(start));
    let end = start + Vec2::new(0.0, 40.0);
    run_pass(&ctx, &mut list, &mut names, vec![Event::PointerMoved(end)]);
    run_pass(&ctx, &mut list, &mut names, release(end));
    settle(&ctx, &mut list, &mut names);

    let text = list.debug_log_text();
    assert!(text.contains("Idle -> Dragging"), "log:\n{text}");
    assert!(text.contains("commit from=0 to=1"), "log:\n{text}");
    assert!(text.lines().all(|line| line.starts_with("[frame ")), "log:\n{text}");

    list.debug_log_clear();
    assert!(list.debug_log_text().is_empty());
}

#[test]
fn invalid_options_are_rejected() {
    let options = ReorderOptions {
        handle_alignment: 2.0,
        ..Default::default()
    };
    assert!(ReorderableList::new("invalid", options).is_err());
}

#[test]
fn press_on_a_layer_above_the_list_is_left_alone() {
    let ctx = Context::default();
    let mut list = ReorderableList::new("covered_test", vertical_options()).expect("valid options");
    let mut names = items(&["a", "b", "c"]);

    for _ in 0..3 {
        run_raw(&ctx, &mut list, &mut names, raw_input(None, Vec::new()), true);
    }
    let pos = list.handle_rect_on_screen(1).expect("laid out").center();
    let response = run_raw(&ctx, &mut list, &mut names, raw_input(None, press(pos)), true);

    assert_eq!(response.phase, DragPhase::Idle);
    assert_eq!(list.session().pressed_index(), None);

    run_raw(&ctx, &mut list, &mut names, raw_input(None, release(pos)), true);
    assert_eq!(names, items(&["a", "b", "c"]));
}

#[test]
fn a_pass_rerun_with_the_same_input_is_consumed_once() {
    let ctx = Context::default();
    let mut list = ReorderableList::new("rerun_test", vertical_options()).expect("valid options");
    let mut names = items(&["a", "b", "c", "d"]);

    run_at(&ctx, &mut list, &mut names, 1.0, Vec::new());
    let start = list.handle_rect_on_screen(0).expect("laid out").center();
    run_at(&ctx, &mut list, &mut names, 1.02, press(start));
    assert!(list.session().driver().is_animating(), "raise is running");

    let moved = vec![Event::PointerMoved(start + Vec2::new(0.0, 30.0))];
    run_at(&ctx, &mut list, &mut names, 1.04, moved.clone());
    let total = list.session().total_delta();
    let lift = list.session().driver().value();
    assert_eq!(total, 30.0);

    run_at(&ctx, &mut list, &mut names, 1.04, moved);
    assert_eq!(list.session().total_delta(), total);
    assert_eq!(list.session().driver().value(), lift, "no extra animation tick");
}

#[test]
fn first_move_policy_starts_on_the_first_pointer_motion() {
    let ctx = Context::default();
    let options = ReorderOptions {
        drag_start: DragStartPolicy::FirstMove,
        ..vertical_options()
    };
    let mut list = ReorderableList::new("first_move_test", options).expect("valid options");
    let mut names = items(&["a", "b", "c"]);

    run_pass(&ctx, &mut list, &mut names, Vec::new());
    let start = list.handle_rect_on_screen(0).expect("laid out").center();
    let response = run_pass(&ctx, &mut list, &mut names, press(start));
    assert_eq!(response.phase, DragPhase::Pending);
    assert_eq!(list.session().pressed_index(), Some(0));

    let response = run_pass(
        &ctx,
        &mut list,
        &mut names,
        vec![Event::PointerMoved(start + Vec2::new(0.0, 10.0))],
    );
    assert_eq!(response.phase, DragPhase::Dragging);
    assert_eq!(list.session().drag_index(), Some(0));
    assert_eq!(list.session().total_delta(), 10.0);
}

#[test]
fn long_press_starts_once_the_handle_was_held_long_enough() {
    let ctx = Context::default();
    let options = ReorderOptions {
        drag_start: DragStartPolicy::Delayed(Duration::from_millis(200)),
        ..vertical_options()
    };
    let mut list = ReorderableList::new("long_press_test", options).expect("valid options");
    let mut names = items(&["a", "b", "c"]);

    run_at(&ctx, &mut list, &mut names, 1.0, Vec::new());
    let start = list.handle_rect_on_screen(1).expect("laid out").center();
    let response = run_at(&ctx, &mut list, &mut names, 2.0, press(start));
    assert_eq!(response.phase, DragPhase::Pending);

    let response = run_at(&ctx, &mut list, &mut names, 2.1, Vec::new());
    assert_eq!(response.phase, DragPhase::Pending, "held for 100 ms");

    let response = run_at(&ctx, &mut list, &mut names, 2.25, Vec::new());
    assert_eq!(response.phase, DragPhase::Dragging, "held for 250 ms");
    assert_eq!(list.session().drag_index(), Some(1));
}

#[test]
fn long_press_is_cancelled_by_early_motion() {
    let ctx = Context::default();
    let options = ReorderOptions {
        drag_start: DragStartPolicy::Delayed(Duration::from_millis(200)),
        ..vertical_options()
    };
    let mut list = ReorderableList::new("long_press_cancel_test", options).expect("valid options");
    let mut names = items(&["a", "b", "c"]);

    run_at(&ctx, &mut list, &mut names, 1.0, Vec::new());
    let start = list.handle_rect_on_screen(1).expect("laid out").center();
    run_at(&ctx, &mut list, &mut names, 2.0, press(start));
    let response = run_at(
        &ctx,
        &mut list,
        &mut names,
        2.05,
        vec![Event::PointerMoved(start + Vec2::new(0.0, 30.0))],
    );
    assert_eq!(response.phase, DragPhase::Idle);

    let response = run_at(&ctx, &mut list, &mut names, 2.5, Vec::new());
    assert_eq!(response.phase, DragPhase::Idle, "a cancelled press stays cancelled");
}
