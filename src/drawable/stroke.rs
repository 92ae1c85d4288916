use egui::Pos2;

use crate::surface::Surface;

/// Freehand line: an ordered point buffer plus the thickness it was drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    thickness: f32,
}

impl Stroke {
    /// Starts a stroke at `start`
    pub fn new(start: Pos2, thickness: f32) -> Self {
        Self {
            points: vec![start],
            thickness,
        }
    }

    pub fn from_points(points: Vec<Pos2>, thickness: f32) -> Self {
        Self { points, thickness }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Appends a point while the stroke is still being drawn
    pub(crate) fn grow(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn render(&self, target: &mut Surface) {
        target.set_line_width(self.thickness);
        // A single point is an empty path and leaves no ink.
        target.stroke_polyline(&self.points);
    }
}
