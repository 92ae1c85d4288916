use egui::{Pos2, pos2};
use sketchpad::command::CommandLog;
use sketchpad::drawable::{Drawable, factory};

fn stroke(points: &[(f32, f32)]) -> Drawable {
    let points = points.iter().map(|&(x, y)| Pos2::new(x, y)).collect();
    factory::create_stroke(points, 2.0)
}

// Helper to create a log with some predefined drawables
fn create_test_log(n: usize) -> CommandLog {
    let mut log = CommandLog::new();
    for i in 0..n {
        let offset = i as f32 * 10.0;
        log.append(stroke(&[(offset, 0.0), (offset, 20.0)]));
    }
    log
}

#[test]
fn test_undo_len_times_empties_log() {
    for n in 0..6 {
        let mut log = create_test_log(n);
        for _ in 0..n {
            log.undo();
        }
        assert!(log.is_empty());
        assert_eq!(log.redo_stack().len(), n);

        // One more is a no-op
        let before = log.clone();
        log.undo();
        assert_eq!(log, before);
    }
}

#[test]
fn test_append_always_clears_redo() {
    let mut log = create_test_log(4);
    log.undo();
    log.undo();
    assert_eq!(log.redo_stack().len(), 2);

    log.append(factory::create_sticker("🔥", pos2(5.0, 5.0)));
    assert!(log.redo_stack().is_empty());
    assert_eq!(log.len(), 3);
    assert!(!log.can_redo());

    // Appending with an already empty redo stack keeps it empty
    log.append(stroke(&[(1.0, 1.0)]));
    assert!(log.redo_stack().is_empty());
}

#[test]
fn test_undo_redo_is_identity() {
    let mut log = create_test_log(3);
    log.undo();
    let before = log.clone();

    log.undo();
    log.redo();
    assert_eq!(log.active(), before.active());
    assert_eq!(log.redo_stack(), before.redo_stack());
}

#[test]
fn test_redo_on_empty_is_noop() {
    let mut log = create_test_log(2);
    let before = log.clone();
    log.redo();
    assert_eq!(log, before);
}

#[test]
fn test_undo_redo_scenario() {
    let first = stroke(&[(0.0, 0.0)]);
    let second = stroke(&[(0.0, 0.0), (10.0, 10.0)]);

    let mut log = CommandLog::new();
    log.append(first.clone());
    log.append(second.clone());

    log.undo();
    assert_eq!(log.active(), [first.clone()]);
    assert_eq!(log.redo_stack(), [second.clone()]);

    log.redo();
    assert_eq!(log.active(), [first, second]);
    assert!(log.redo_stack().is_empty());
}

#[test]
fn test_clear_empties_both_stacks() {
    for (n, m) in [(0, 0), (3, 0), (3, 2), (5, 5)] {
        let mut log = create_test_log(n);
        for _ in 0..m {
            log.undo();
        }
        log.clear();
        assert_eq!(log.len(), 0);
        assert_eq!(log.redo_stack().len(), 0);
    }
}

#[test]
fn test_single_point_stroke_is_undoable() {
    let mut log = CommandLog::new();
    log.append(stroke(&[(4.0, 4.0)]));
    assert_eq!(log.len(), 1);
    log.undo();
    assert!(log.is_empty());
    assert_eq!(log.redo_stack().len(), 1);
}

#[test]
fn test_topmost_sticker_at() {
    let mut log = CommandLog::new();
    log.append(factory::create_sticker("⭐", pos2(50.0, 50.0)));
    log.append(stroke(&[(40.0, 40.0), (60.0, 60.0)]));
    log.append(factory::create_sticker("🔥", pos2(60.0, 60.0)));

    assert_eq!(log.topmost_sticker_at(pos2(58.0, 58.0)), Some(2));
    assert_eq!(log.topmost_sticker_at(pos2(36.0, 36.0)), Some(0));
    assert_eq!(log.topmost_sticker_at(pos2(200.0, 200.0)), None);
}
