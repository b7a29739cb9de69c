//! celgroup viewer: interactive preview of a cel group
//!
//! Controls:
//! - Arrows: move the group
//! - Q / E: rotate about the group center
//! - W / S: widen / narrow the bottom edge (keystone stretch)
//! - Tab: select a member, I / J / K / L: move it
//! - R: reset

use std::path::{Path, PathBuf};

use celgroup::raster::{self, Bitmap, Framebuffer, HEIGHT, WIDTH};
use celgroup::{load_layout, load_layout_from_str, projected_quad, CelArena, CelGroup, CelId, GroupLayout};
use macroquad::prelude::*;
use slotmap::SecondaryMap;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LAYOUT: &str = include_str!("../assets/layouts/default.ron");

const PALETTE: [raster::Color; 4] = [
    raster::Color { r: 200, g: 80, b: 80, a: 255 },
    raster::Color { r: 80, g: 160, b: 200, a: 255 },
    raster::Color { r: 90, g: 190, b: 90, a: 255 },
    raster::Color { r: 210, g: 180, b: 60, a: 255 },
];

fn window_conf() -> Conf {
    Conf {
        window_title: format!("celgroup viewer v{}", celgroup::VERSION),
        window_width: WIDTH as i32 * 3,
        window_height: HEIGHT as i32 * 3,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// What the user has dialed in; re-applied to the group whenever it changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ViewState {
    offset: celgroup::Point,
    angle: u32,
    keystone: i32,
    selected: usize,
}

fn load_initial_layout() -> (GroupLayout, PathBuf) {
    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        match load_layout(&path) {
            Ok(layout) => {
                info!("Loaded layout {}", path.display());
                let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
                return (layout, dir);
            }
            Err(e) => error!("Failed to load {}: {}, using default layout", path.display(), e),
        }
    }
    match load_layout_from_str(DEFAULT_LAYOUT) {
        Ok(layout) => (layout, PathBuf::from("assets/layouts")),
        Err(e) => {
            // The embedded layout is part of the binary; fall back to an empty frame
            error!("Embedded layout is invalid: {}", e);
            let layout = GroupLayout {
                position: celgroup::Point::new(128, 88),
                size: celgroup::Point::new(64, 64),
                members: Vec::new(),
            };
            (layout, PathBuf::new())
        }
    }
}

fn load_bitmaps(layout: &GroupLayout, ids: &[CelId], dir: &Path) -> SecondaryMap<CelId, Bitmap> {
    let mut bitmaps = SecondaryMap::new();
    for (index, (member, id)) in layout.members.iter().zip(ids).enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        let fallback = Bitmap::checkerboard(member.width.max(1) as usize, member.height.max(1) as usize, color, raster::Color::WHITE);
        let bitmap = match &member.bitmap {
            Some(file) => match Bitmap::from_file(dir.join(file)) {
                Ok(bmp) => bmp,
                Err(e) => {
                    warn!("Failed to load {}: {}, using checkerboard", file, e);
                    fallback
                }
            },
            None => fallback,
        };
        bitmaps.insert(*id, bitmap);
    }
    bitmaps
}

fn apply_view(group: &mut CelGroup, origin: celgroup::Point, view: &ViewState) {
    let position = origin + view.offset;
    group.set_position(position.x, position.y);

    let size = group.size();
    let k = view.keystone;
    group.stretch(
        position,
        celgroup::Point::new(position.x + size.x, position.y),
        celgroup::Point::new(position.x + size.x + k, position.y + size.y),
        celgroup::Point::new(position.x - k, position.y + size.y),
    );

    let center = position + celgroup::Point::new(size.x / 2, size.y / 2);
    group.rotate(view.angle, center.x, center.y);
}

fn read_input(view: &mut ViewState, members: usize) -> Option<(usize, i32, i32)> {
    if is_key_down(KeyCode::Left) {
        view.offset.x -= 1;
    }
    if is_key_down(KeyCode::Right) {
        view.offset.x += 1;
    }
    if is_key_down(KeyCode::Up) {
        view.offset.y -= 1;
    }
    if is_key_down(KeyCode::Down) {
        view.offset.y += 1;
    }
    if is_key_down(KeyCode::Q) {
        view.angle = (view.angle + 255) % 256;
    }
    if is_key_down(KeyCode::E) {
        view.angle = (view.angle + 1) % 256;
    }
    if is_key_down(KeyCode::W) {
        view.keystone = (view.keystone + 1).min(64);
    }
    if is_key_down(KeyCode::S) {
        view.keystone = (view.keystone - 1).max(-64);
    }
    if is_key_pressed(KeyCode::Tab) && members > 0 {
        view.selected = (view.selected + 1) % members;
    }
    if is_key_pressed(KeyCode::R) {
        *view = ViewState::default();
    }

    let mut member_move = (0, 0);
    if is_key_pressed(KeyCode::J) {
        member_move.0 -= 1;
    }
    if is_key_pressed(KeyCode::L) {
        member_move.0 += 1;
    }
    if is_key_pressed(KeyCode::I) {
        member_move.1 -= 1;
    }
    if is_key_pressed(KeyCode::K) {
        member_move.1 += 1;
    }
    (member_move != (0, 0)).then_some((view.selected, member_move.0, member_move.1))
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut fb = Framebuffer::new(WIDTH, HEIGHT);
    let mut arena = CelArena::with_key();

    let (layout, dir) = load_initial_layout();
    let (mut group, ids) = match layout.build(&mut arena) {
        Ok(built) => built,
        Err(e) => {
            error!("Failed to build group: {}", e);
            return;
        }
    };
    let bitmaps = load_bitmaps(&layout, &ids, &dir);
    let origin = group.position();

    info!("=== celgroup viewer: {} cels ===", ids.len());

    let mut view = ViewState::default();
    let mut applied = None;

    loop {
        if let Some((index, dx, dy)) = read_input(&mut view, ids.len()) {
            group.move_member(index, dx, dy);
            applied = None;
        }

        // Intent is only recorded when something changed; update is a no-op otherwise
        if applied != Some(view) {
            apply_view(&mut group, origin, &view);
            applied = Some(view);
        }
        if let Err(e) = group.update(&mut arena) {
            error!("Group update failed: {}", e);
        }

        fb.clear(raster::Color::new(30, 30, 35));
        if let Some(first) = group.primary() {
            raster::draw_chain(&mut fb, &mut arena, &bitmaps, first, raster::Color::WHITE);
        }
        if let Some(cel) = ids.get(view.selected).and_then(|id| arena.get(*id)) {
            raster::draw_quad_outline(&mut fb, &projected_quad(cel), raster::Color::new(255, 255, 0));
        }
        let pivot = group.rotation_pivot();
        fb.draw_cross(pivot, 3, raster::Color::RED);

        let screen_w = screen_width();
        let screen_h = screen_height();
        let scale = (screen_w / WIDTH as f32).min(screen_h / HEIGHT as f32).floor().max(1.0);
        let draw_w = WIDTH as f32 * scale;
        let draw_h = HEIGHT as f32 * scale;
        let draw_x = (screen_w - draw_w) / 2.0;
        let draw_y = (screen_h - draw_h) / 2.0;

        clear_background(Color::from_rgba(10, 10, 12, 255));

        // Convert framebuffer to texture and draw
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            draw_x,
            draw_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        let position = group.position();
        draw_text(
            &format!(
                "pos ({}, {}) | angle {} | keystone {} | member {}",
                position.x, position.y, view.angle, view.keystone, view.selected
            ),
            10.0,
            20.0,
            20.0,
            Color::from_rgba(200, 200, 200, 255),
        );

        next_frame().await;
    }
}
