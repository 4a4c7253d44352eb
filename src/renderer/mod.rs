//! Rendering module
//!
//! Builds a backend-agnostic [`Scene`] of rectangles, lines, circles and labels from a
//! [`RoundSnapshot`] and the decorative [`Effects`]. The wasm entry point paints it on
//! a 2D canvas; `ascii` renders the snapshot as text for logs and the native demo.

pub mod ascii;
pub mod palette;
pub mod shapes;

use glam::Vec2;

use crate::sim::{Effects, GamePhase, ParticleKind, RoundSnapshot};
pub use shapes::{Align, Circle, Label, Layout, Line, Rect};

/// Everything to draw for one frame, back to front
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub background: [f32; 4],
    pub rects: Vec<Rect>,
    pub lines: Vec<Line>,
    pub circles: Vec<Circle>,
    /// Full-screen tint drawn over the lane, below the overlay labels
    pub overlay: Option<[f32; 4]>,
    pub labels: Vec<Label>,
}

/// Frame options that do not come from the simulation
#[derive(Debug, Clone, Copy)]
pub struct FrameStyle {
    /// Seconds, drives blinking prompts and the win flash
    pub time: f64,
    pub win_flash: bool,
}

/// Prompts blink at 1 Hz
fn blink_on(time: f64) -> bool {
    (time * 2.0).floor() as i64 % 2 == 0
}

pub fn build_scene(
    snapshot: &RoundSnapshot,
    effects: &Effects,
    layout: &Layout,
    style: FrameStyle,
) -> Scene {
    let mut scene = Scene {
        background: palette::BACKGROUND,
        ..Default::default()
    };
    let center_x = layout.viewport.x / 2.0;

    if snapshot.phase == GamePhase::Title {
        title(&mut scene, snapshot, layout, style);
        return scene;
    }

    lane(&mut scene, snapshot, layout);
    decorations(&mut scene, effects, layout);

    if !effects.celebrating {
        for &(row, col) in &snapshot.stacked {
            scene
                .rects
                .push(layout.cell_rect(row as f32, col as f32, palette::STACKED_BLOCK));
        }
    }
    if snapshot.phase == GamePhase::Playing {
        if let Some(active) = &snapshot.active {
            for &col in &active.columns {
                scene
                    .rects
                    .push(layout.cell_rect(active.row as f32, col as f32, palette::ACTIVE_BLOCK));
            }
        }
    }

    // HUD
    scene.labels.push(Label::new(
        format!("SCORE: {}", snapshot.score),
        Vec2::new(center_x, 10.0),
        18.0,
        palette::TEXT,
    ));
    scene.labels.push(Label::new(
        format!(
            "ROW {} / {}",
            (snapshot.row + 1).min(snapshot.lane_height),
            snapshot.lane_height
        ),
        Vec2::new(center_x, 35.0),
        14.0,
        palette::TEXT_DIM,
    ));

    match snapshot.phase {
        GamePhase::GameOver => game_over(&mut scene, snapshot, layout, style),
        GamePhase::Won => won(&mut scene, snapshot, layout, style),
        _ => {}
    }
    scene
}

fn title(scene: &mut Scene, snapshot: &RoundSnapshot, layout: &Layout, style: FrameStyle) {
    let size = layout.viewport;
    scene.labels.push(
        Label::new(
            "STACKER",
            Vec2::new(size.x / 2.0, size.y / 3.0),
            48.0,
            palette::ACTIVE_BLOCK,
        )
        .bold(),
    );
    scene.labels.push(Label::new(
        format!("HIGH SCORE: {}", snapshot.high_score),
        Vec2::new(size.x / 2.0, size.y / 2.0),
        20.0,
        palette::TEXT,
    ));
    if blink_on(style.time) {
        scene.labels.push(Label::new(
            "TAP TO START",
            Vec2::new(size.x / 2.0, size.y * 0.7),
            24.0,
            palette::TEXT,
        ));
    }
}

fn lane(scene: &mut Scene, snapshot: &RoundSnapshot, layout: &Layout) {
    for row in 0..snapshot.lane_height {
        for col in 0..snapshot.lane_width {
            scene
                .rects
                .push(layout.cell_rect(row as f32, col as f32, palette::GRID_CELL));
        }
    }

    let prize_lines = [
        (snapshot.minor_prize_row, "MINOR", palette::MINOR_PRIZE),
        (snapshot.major_prize_row, "MAJOR", palette::MAJOR_PRIZE),
    ];
    for (row, name, color) in prize_lines {
        if row == 0 || row > snapshot.lane_height {
            continue;
        }
        let y = layout.row_boundary_y(row);
        scene.lines.push(Line {
            from: Vec2::new(layout.origin.x - 10.0, y),
            to: Vec2::new(layout.lane_right() + 10.0, y),
            width: 3.0,
            color,
        });
        scene.labels.push(
            Label::new(name, Vec2::new(layout.origin.x - 15.0, y + 4.0), 12.0, color)
                .aligned(Align::Right),
        );
    }
}

fn decorations(scene: &mut Scene, effects: &Effects, layout: &Layout) {
    for cell in &effects.falling {
        let color = palette::with_alpha(palette::ACTIVE_BLOCK, cell.alpha());
        scene.rects.push(layout.cell_rect(cell.y, cell.col as f32, color));
    }

    for block in &effects.celebration {
        let color = palette::hue((block.col * 40 + block.row * 20) as f32);
        let mut rect = layout.cell_rect(block.pos.y, block.pos.x, color);
        rect.rotation = block.rotation;
        scene.rects.push(rect);
    }

    for particle in &effects.particles {
        let base = match particle.kind {
            ParticleKind::Sparkle => palette::TEXT,
            ParticleKind::Minor => palette::MINOR_PRIZE,
            ParticleKind::Major => palette::MAJOR_PRIZE,
        };
        let alpha = particle.alpha();
        // Particle positions are cell corners, not cell origins
        let center = layout.cell_origin(particle.pos.y - 1.0, particle.pos.x);
        scene.circles.push(Circle {
            center,
            radius: particle.size * layout.cell_size * alpha,
            color: palette::with_alpha(base, alpha),
        });
    }
}

fn game_over(scene: &mut Scene, snapshot: &RoundSnapshot, layout: &Layout, style: FrameStyle) {
    let size = layout.viewport;
    scene.overlay = Some(palette::DIM_OVERLAY);
    scene.labels.push(
        Label::new(
            "GAME OVER",
            Vec2::new(size.x / 2.0, size.y / 3.0),
            36.0,
            palette::ACTIVE_BLOCK,
        )
        .bold(),
    );
    scene.labels.push(Label::new(
        format!("SCORE: {}", snapshot.score),
        Vec2::new(size.x / 2.0, size.y / 2.0),
        24.0,
        palette::TEXT,
    ));
    scene.labels.push(Label::new(
        format!("HIGH SCORE: {}", snapshot.high_score),
        Vec2::new(size.x / 2.0, size.y / 2.0 + 35.0),
        18.0,
        palette::TEXT,
    ));
    if blink_on(style.time) {
        scene.labels.push(Label::new(
            "TAP TO RESTART",
            Vec2::new(size.x / 2.0, size.y * 0.75),
            20.0,
            palette::TEXT,
        ));
    }
}

fn won(scene: &mut Scene, snapshot: &RoundSnapshot, layout: &Layout, style: FrameStyle) {
    let size = layout.viewport;
    if style.win_flash {
        let flash = ((style.time * 10.0).sin() * 0.1 + 0.5) as f32;
        scene.overlay = Some(palette::with_alpha(palette::MAJOR_PRIZE, flash * 0.3));
    }
    let headline = if snapshot
        .last_result
        .as_ref()
        .is_some_and(|r| r.major_prize)
    {
        "MAJOR PRIZE!"
    } else {
        "TOP REACHED!"
    };
    scene.labels.push(
        Label::new(
            headline,
            Vec2::new(size.x / 2.0, size.y / 3.0),
            36.0,
            palette::MAJOR_PRIZE,
        )
        .bold(),
    );
    scene.labels.push(Label::new(
        format!("SCORE: {}", snapshot.score),
        Vec2::new(size.x / 2.0, size.y / 2.0),
        24.0,
        palette::TEXT,
    ));
    if blink_on(style.time) {
        scene.labels.push(Label::new(
            "TAP TO PLAY AGAIN",
            Vec2::new(size.x / 2.0, size.y * 0.75),
            20.0,
            palette::TEXT,
        ));
    }
}
