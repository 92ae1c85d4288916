use std::cell::RefCell;
use std::rc::Rc;

use egui::{PointerButton, pos2};
use sketchpad::drawable::{Drawable, Preview, Sticker};
use sketchpad::event::{EventHandler, SketchEvent};
use sketchpad::input::{Action, InputEvent, route_action, route_event};
use sketchpad::renderer::Renderer;
use sketchpad::tool::ToolKind;
use sketchpad::{SketchConfig, SketchContext};

/// Records every event it sees
#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<SketchEvent>>>);

impl EventHandler for Recorder {
    fn handle_event(&mut self, event: &SketchEvent) {
        self.0.borrow_mut().push(*event);
    }
}

fn create_sketch() -> (SketchContext, Recorder) {
    let sketch = SketchContext::new(SketchConfig::default());
    let recorder = Recorder::default();
    sketch.event_bus().subscribe(Box::new(recorder.clone()));
    (sketch, recorder)
}

fn send(sketch: &mut SketchContext, events: &[InputEvent]) {
    for event in events {
        route_event(event, sketch);
    }
}

fn down(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown {
        position: pos2(x, y),
        button: PointerButton::Primary,
    }
}

fn drag(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove {
        position: pos2(x, y),
        button_held: true,
    }
}

#[test]
fn test_stroke_lifecycle() {
    let (mut sketch, _) = create_sketch();
    send(&mut sketch, &[down(1.0, 1.0), drag(2.0, 2.0), drag(3.0, 5.0), InputEvent::PointerUp]);

    assert_eq!(sketch.log().len(), 1);
    let stroke = sketch.log().active()[0].as_stroke().unwrap();
    assert_eq!(stroke.points(), [pos2(1.0, 1.0), pos2(2.0, 2.0), pos2(3.0, 5.0)]);
    assert_eq!(stroke.thickness(), 2.0);
    assert!(!sketch.is_busy());

    // Sealed: moving with the button held no longer grows it
    send(&mut sketch, &[drag(9.0, 9.0)]);
    assert_eq!(sketch.log().active()[0].as_stroke().unwrap().points().len(), 3);
}

#[test]
fn test_stroke_keeps_thickness_of_its_tool() {
    let (mut sketch, _) = create_sketch();
    route_action(&Action::SelectTool(ToolKind::ThickMarker), &mut sketch);
    send(&mut sketch, &[down(0.0, 0.0), drag(5.0, 5.0), InputEvent::PointerUp]);
    route_action(&Action::SelectTool(ToolKind::Pencil), &mut sketch);
    send(&mut sketch, &[down(0.0, 0.0), drag(5.0, 5.0), InputEvent::PointerUp]);

    let thicknesses: Vec<f32> = sketch
        .log()
        .active()
        .iter()
        .filter_map(Drawable::as_stroke)
        .map(|s| s.thickness())
        .collect();
    assert_eq!(thicknesses, [10.0, 2.0]);
}

#[test]
fn test_leave_seals_single_point_stroke() {
    let (mut sketch, _) = create_sketch();
    send(&mut sketch, &[down(7.0, 7.0), InputEvent::PointerLeave]);

    assert_eq!(sketch.log().len(), 1);
    assert_eq!(sketch.log().active()[0].as_stroke().unwrap().points().len(), 1);
    assert!(!sketch.is_busy());
    assert!(sketch.preview().is_none());
}

#[test]
fn test_move_without_button_seals_stroke() {
    let (mut sketch, _) = create_sketch();
    send(
        &mut sketch,
        &[
            down(0.0, 0.0),
            InputEvent::PointerMove {
                position: pos2(4.0, 4.0),
                button_held: false,
            },
            drag(8.0, 8.0),
        ],
    );
    assert!(!sketch.is_busy());
    assert_eq!(sketch.log().active()[0].as_stroke().unwrap().points().len(), 1);
}

#[test]
fn test_sticker_placement_does_not_merge() {
    let (mut sketch, _) = create_sketch();
    route_action(&Action::SelectSticker("🔥".to_owned()), &mut sketch);
    send(&mut sketch, &[down(50.0, 50.0), InputEvent::PointerUp]);
    assert_eq!(sketch.log().active(), [Drawable::Sticker(Sticker::new("🔥", pos2(50.0, 50.0)))]);

    send(&mut sketch, &[down(50.0, 50.0), InputEvent::PointerUp]);
    assert_eq!(sketch.log().len(), 2);
    assert_eq!(sketch.log().active()[0], sketch.log().active()[1]);
}

#[test]
fn test_placed_sticker_follows_drag() {
    let (mut sketch, _) = create_sketch();
    route_action(&Action::SelectSticker("⭐".to_owned()), &mut sketch);
    send(&mut sketch, &[down(10.0, 10.0), drag(30.0, 40.0), InputEvent::PointerUp, drag(90.0, 90.0)]);

    let sticker = sketch.log().active()[0].as_sticker().unwrap();
    assert_eq!(sticker.position(), pos2(30.0, 40.0));
}

#[test]
fn test_secondary_button_picks_up_sticker() {
    let (mut sketch, _) = create_sketch();
    route_action(&Action::SelectSticker("⭐".to_owned()), &mut sketch);
    send(&mut sketch, &[down(50.0, 50.0), InputEvent::PointerUp]);
    route_action(&Action::SelectTool(ToolKind::Marker), &mut sketch);

    send(
        &mut sketch,
        &[
            InputEvent::PointerDown {
                position: pos2(55.0, 45.0),
                button: PointerButton::Secondary,
            },
            drag(105.0, 95.0),
            InputEvent::PointerUp,
        ],
    );

    assert_eq!(sketch.log().len(), 1);
    let sticker = sketch.log().active()[0].as_sticker().unwrap();
    // The grab offset is preserved
    assert_eq!(sticker.position(), pos2(100.0, 100.0));
}

#[test]
fn test_secondary_button_on_empty_canvas_does_nothing() {
    let (mut sketch, _) = create_sketch();
    send(
        &mut sketch,
        &[
            InputEvent::PointerDown {
                position: pos2(5.0, 5.0),
                button: PointerButton::Secondary,
            },
            drag(10.0, 10.0),
        ],
    );
    assert!(sketch.log().is_empty());
    assert!(!sketch.is_busy());
}

#[test]
fn test_tool_selection_state_machine() {
    let (mut sketch, _) = create_sketch();
    assert_eq!(sketch.tool().kind(), ToolKind::Pencil);

    route_action(&Action::SelectSticker("🌈".to_owned()), &mut sketch);
    assert_eq!(sketch.tool().kind(), ToolKind::Sticker);
    assert_eq!(sketch.tool().sticker_glyph(), Some("🌈"));

    route_action(&Action::SelectTool(ToolKind::Marker), &mut sketch);
    assert_eq!(sketch.tool().kind(), ToolKind::Marker);
    assert_eq!(sketch.tool().thickness(), 5.0);
    assert_eq!(sketch.tool().sticker_glyph(), None);

    // Sticker tool without an explicit glyph falls back to the palette
    route_action(&Action::SelectTool(ToolKind::Sticker), &mut sketch);
    assert_eq!(sketch.tool().sticker_glyph(), Some("🔥"));
}

#[test]
fn test_register_custom_sticker() {
    let (mut sketch, recorder) = create_sketch();
    let before = sketch.palette().glyphs().len();

    route_action(&Action::RegisterCustomSticker("🐸".to_owned()), &mut sketch);
    assert_eq!(sketch.palette().glyphs().len(), before + 1);
    assert!(sketch.palette().contains("🐸"));
    assert_eq!(sketch.tool().sticker_glyph(), Some("🐸"));
    assert!(recorder.0.borrow().contains(&SketchEvent::StickersChanged));
    assert!(sketch.log().is_empty());

    // Re-registering selects without duplicating; blank input is ignored
    route_action(&Action::SelectTool(ToolKind::Pencil), &mut sketch);
    route_action(&Action::RegisterCustomSticker("🐸".to_owned()), &mut sketch);
    route_action(&Action::RegisterCustomSticker("  ".to_owned()), &mut sketch);
    assert_eq!(sketch.palette().glyphs().len(), before + 1);
    assert_eq!(sketch.tool().sticker_glyph(), Some("🐸"));
}

#[test]
fn test_preview_follows_tool_and_cursor() {
    let (mut sketch, _) = create_sketch();
    assert!(sketch.preview().is_none());

    send(&mut sketch, &[InputEvent::PointerEnter { position: pos2(3.0, 4.0) }]);
    assert_eq!(
        sketch.preview(),
        Some(Preview::Cursor {
            position: pos2(3.0, 4.0),
            thickness: 2.0
        })
    );

    route_action(&Action::SelectSticker("🔥".to_owned()), &mut sketch);
    send(
        &mut sketch,
        &[InputEvent::PointerMove {
            position: pos2(8.0, 9.0),
            button_held: false,
        }],
    );
    assert!(matches!(
        sketch.preview(),
        Some(Preview::Sticker { position, ref glyph, .. }) if position == pos2(8.0, 9.0) && glyph == "🔥"
    ));

    send(&mut sketch, &[InputEvent::PointerLeave]);
    assert!(sketch.preview().is_none());
    assert!(sketch.log().is_empty());
}

#[test]
fn test_history_actions_notify_even_when_noop() {
    let (mut sketch, recorder) = create_sketch();
    route_action(&Action::Undo, &mut sketch);
    route_action(&Action::Redo, &mut sketch);
    route_action(&Action::Clear, &mut sketch);
    assert_eq!(*recorder.0.borrow(), [SketchEvent::DrawingChanged; 3]);
}

#[test]
fn test_undo_during_stroke_ends_gesture() {
    let (mut sketch, _) = create_sketch();
    send(&mut sketch, &[down(0.0, 0.0), drag(1.0, 1.0)]);
    route_action(&Action::Undo, &mut sketch);
    assert!(!sketch.is_busy());
    send(&mut sketch, &[drag(2.0, 2.0), InputEvent::PointerUp]);

    assert!(sketch.log().is_empty());
    assert_eq!(sketch.log().redo_stack()[0].as_stroke().unwrap().points().len(), 2);
}

#[test]
fn test_clear_discards_everything() {
    let (mut sketch, _) = create_sketch();
    for i in 0..4 {
        let x = i as f32;
        send(&mut sketch, &[down(x, x), drag(x + 5.0, x), InputEvent::PointerUp]);
    }
    route_action(&Action::Undo, &mut sketch);
    route_action(&Action::Clear, &mut sketch);
    assert!(sketch.log().is_empty());
    assert!(!sketch.log().can_redo());
}

#[test]
fn test_input_is_logged_without_a_render_target() {
    let config = SketchConfig {
        canvas_size: [0, 0],
        ..SketchConfig::default()
    };
    let mut sketch = SketchContext::new(config);
    let mut renderer = Renderer::new(&sketch);
    assert!(!renderer.surface().is_available());

    send(&mut sketch, &[down(1.0, 1.0), drag(6.0, 6.0), drag(9.0, 2.0), InputEvent::PointerUp]);
    route_action(&Action::SelectSticker("🔥".to_owned()), &mut sketch);
    send(&mut sketch, &[down(20.0, 20.0), InputEvent::PointerUp]);
    renderer.update(&sketch);

    assert_eq!(sketch.log().len(), 2);
    assert_eq!(sketch.log().active()[0].as_stroke().unwrap().points().len(), 3);

    route_action(&Action::Undo, &mut sketch);
    assert!(renderer.needs_redraw());
    renderer.update(&sketch);
    assert_eq!(sketch.log().len(), 1);
}
