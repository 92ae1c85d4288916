use egui::Pos2;

use crate::drawable::{Drawable, Sticker, Stroke};

/// The drawing history: drawables that are rendered, plus the ones undone since the last append
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandLog {
    /// Rendered every frame, in insertion order
    active: Vec<Drawable>,
    /// Undone drawables, most recently undone last
    redo_stack: Vec<Drawable>,
}

impl CommandLog {
    /// Creates a new empty command log
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a drawable and discard the redo branch
    pub fn append(&mut self, drawable: impl Into<Drawable>) {
        let drawable = drawable.into();
        log::debug!("Appending {} ({} redo entries dropped)", drawable.kind(), self.redo_stack.len());
        self.active.push(drawable);
        self.redo_stack.clear();
    }

    /// Move the newest active drawable onto the redo stack; no-op when empty
    pub fn undo(&mut self) {
        if let Some(drawable) = self.active.pop() {
            self.redo_stack.push(drawable);
        }
    }

    /// Move the most recently undone drawable back; no-op when nothing was undone
    pub fn redo(&mut self) {
        if let Some(drawable) = self.redo_stack.pop() {
            self.active.push(drawable);
        }
    }

    /// Empty both stacks
    pub fn clear(&mut self) {
        self.active.clear();
        self.redo_stack.clear();
    }

    pub fn active(&self) -> &[Drawable] {
        &self.active
    }

    pub fn redo_stack(&self) -> &[Drawable] {
        &self.redo_stack
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Returns true if there are drawables that can be undone
    pub fn can_undo(&self) -> bool {
        !self.active.is_empty()
    }

    /// Returns true if there are drawables that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Index of the last-drawn sticker under `pos`
    pub fn topmost_sticker_at(&self, pos: Pos2) -> Option<usize> {
        self.active
            .iter()
            .rposition(|d| d.as_sticker().is_some_and(|s| s.contains(pos)))
    }

    pub(crate) fn stroke_mut(&mut self, index: usize) -> Option<&mut Stroke> {
        self.active.get_mut(index).and_then(Drawable::as_stroke_mut)
    }

    pub(crate) fn sticker_mut(&mut self, index: usize) -> Option<&mut Sticker> {
        self.active.get_mut(index).and_then(Drawable::as_sticker_mut)
    }
}
