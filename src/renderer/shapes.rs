//! 2D primitives and lane layout

use glam::Vec2;

/// Axis-aligned rectangle, optionally rotated about its center
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    /// Top-left corner before rotation
    pub pos: Vec2,
    pub size: Vec2,
    pub color: [f32; 4],
    /// Radians
    pub rotation: f32,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2, color: [f32; 4]) -> Self {
        Self {
            pos,
            size,
            color,
            rotation: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    /// Font size in px
    pub size: f32,
    pub color: [f32; 4],
    pub align: Align,
    pub bold: bool,
}

impl Label {
    pub fn new(text: impl Into<String>, pos: Vec2, size: f32, color: [f32; 4]) -> Self {
        Self {
            text: text.into(),
            pos,
            size,
            color,
            align: Align::Center,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Padding around the lane (px)
pub const PADDING: f32 = 20.0;
/// Vertical space kept free for the HUD (px)
pub const HUD_RESERVE: f32 = 100.0;
/// Gap between neighbouring cells (px)
pub const CELL_GAP: f32 = 2.0;

/// Where the lane sits inside the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub viewport: Vec2,
    /// Whole pixels
    pub cell_size: f32,
    /// Top-left of the lane
    pub origin: Vec2,
    pub lane_width: u32,
    pub lane_height: u32,
}

impl Layout {
    /// Largest integer cell size that fits the lane, centered
    pub fn fit(viewport: Vec2, lane_width: u32, lane_height: u32) -> Self {
        let lane_width = lane_width.max(1);
        let lane_height = lane_height.max(1);
        let available = Vec2::new(
            viewport.x - PADDING * 2.0,
            viewport.y - PADDING * 2.0 - HUD_RESERVE,
        );
        let by_width = available.x / lane_width as f32;
        let by_height = available.y / lane_height as f32;
        let cell_size = by_width.min(by_height).floor().max(1.0);

        let lane_px = Vec2::new(
            cell_size * lane_width as f32,
            cell_size * lane_height as f32,
        );
        let origin = Vec2::new(
            (viewport.x - lane_px.x) / 2.0,
            (viewport.y - lane_px.y) / 2.0 + 30.0,
        );
        Self {
            viewport,
            cell_size,
            origin,
            lane_width,
            lane_height,
        }
    }

    /// Top-left pixel of a (possibly fractional) cell; row 0 is the bottom
    pub fn cell_origin(&self, row: f32, col: f32) -> Vec2 {
        Vec2::new(
            self.origin.x + col * self.cell_size,
            self.origin.y + (self.lane_height as f32 - 1.0 - row) * self.cell_size,
        )
    }

    /// Inset cell rectangle
    pub fn cell_rect(&self, row: f32, col: f32, color: [f32; 4]) -> Rect {
        let pos = self.cell_origin(row, col) + Vec2::splat(CELL_GAP);
        let side = (self.cell_size - CELL_GAP * 2.0).max(1.0);
        Rect::new(pos, Vec2::splat(side), color)
    }

    /// Pixel y of the boundary above row `row - 1` (bottom edge of `row`)
    pub fn row_boundary_y(&self, row: u32) -> f32 {
        self.origin.y + (self.lane_height as f32 - row as f32) * self.cell_size
    }

    pub fn lane_right(&self) -> f32 {
        self.origin.x + self.lane_width as f32 * self.cell_size
    }
}
