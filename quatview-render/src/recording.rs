//! Surface that records draw calls instead of rasterizing them.
//!
//! Useful for hosts that forward drawing to another toolkit, and for
//! checking paint order.

use crate::primitives::{Color, Rect, Stroke};
use crate::surface::Surface;
use glam::DVec2;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Polygon {
        points: Vec<DVec2>,
        fill: Color,
        outline: Option<Stroke>,
    },
    Line {
        from: DVec2,
        to: DVec2,
        stroke: Stroke,
    },
    Rect {
        rect: Rect,
        fill: Option<Color>,
        outline: Option<Stroke>,
    },
}

/// Records every call since the last [`Surface::clear`].
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn polygons(&self) -> impl Iterator<Item = (&[DVec2], Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Polygon { points, fill, .. } => Some((points.as_slice(), *fill)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (DVec2, DVec2, Stroke)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, stroke } => Some((*from, *to, *stroke)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_polygon(&mut self, points: &[DVec2], fill: Color, outline: Option<Stroke>) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
            outline,
        });
    }

    fn line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn rect(&mut self, rect: Rect, fill: Option<Color>, outline: Option<Stroke>) {
        self.commands.push(DrawCommand::Rect {
            rect,
            fill,
            outline,
        });
    }
}
