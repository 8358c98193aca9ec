//! Per-frame scene emission
//!
//! Turns a `GameState` into an ordered `Frame`: background, walls, visible
//! platforms, player, then the screen-space overlays.

use glam::Vec2;

use super::assets::{AssetCatalog, SpriteId};
use super::commands::{DrawCommand, Frame, Layer};
use crate::consts::*;
use crate::sim::{GameState, Platform, Player, PlayerMode, VisibleRange};
use crate::{lerp, lerp_vec2};

/// Screen-space HUD options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlay {
    /// Frames per second to display, if enabled
    pub fps: Option<u32>,
}

/// Game-over banner size
const GAME_OVER_WIDTH: f32 = 400.0;
const GAME_OVER_HEIGHT: f32 = 200.0;

/// Score text anchor
const SCORE_POS: Vec2 = Vec2::new(10.0, WINDOW_HEIGHT - 50.0);

/// Build the command list for one presented frame.
///
/// `alpha` is the fraction of a simulation tick elapsed since the last
/// tick; player and camera are interpolated between their previous and
/// current positions with it.
pub fn build_frame(state: &GameState, assets: &AssetCatalog, overlay: Overlay, alpha: f32) -> Frame {
    let alpha = alpha.clamp(0.0, 1.0);
    let camera_y = lerp(state.camera.prev_scroll_y, state.camera.scroll_y, alpha);
    let mut frame = Frame::new(camera_y);

    push_tiled_backdrop(&mut frame, assets, camera_y);

    let view = VisibleRange::at(camera_y)
        .expanded(state.tuning.render_margin_below, state.tuning.render_margin_above);
    for platform in state
        .platforms
        .iter()
        .filter(|p| p.top() >= view.bottom && p.y <= view.top)
    {
        push_platform(&mut frame, assets, platform);
    }

    let player_pos = lerp_vec2(state.player.prev_pos, state.player.pos, alpha);
    let sprite = player_sprite(state.player_mode(), &state.player);
    push_sprite_or_rect(
        &mut frame,
        assets,
        sprite,
        player_pos - Vec2::new(CHAR_HALF_WIDTH, CHAR_HALF_HEIGHT),
        Vec2::new(CHAR_WIDTH, CHAR_HEIGHT),
        state.player.facing_left,
        Layer::World,
    );

    if state.fell_off_screen {
        let center = Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0);
        let size = Vec2::new(GAME_OVER_WIDTH, GAME_OVER_HEIGHT);
        push_sprite_or_rect(
            &mut frame,
            assets,
            SpriteId::GameOver,
            center - size / 2.0,
            size,
            false,
            Layer::Screen,
        );
    }

    frame.push(DrawCommand::Text {
        x: SCORE_POS.x,
        y: SCORE_POS.y,
        content: format!("Score: {}", state.score.score),
    });

    if let Some(fps) = overlay.fps {
        frame.push(DrawCommand::Text {
            x: WINDOW_WIDTH - 110.0,
            y: SCORE_POS.y,
            content: format!("FPS: {fps}"),
        });
    }

    frame
}

/// Which character sprite a mode shows
///
/// After the fall the pose freezes on whatever the player was doing.
pub fn player_sprite(mode: PlayerMode, player: &Player) -> SpriteId {
    match mode {
        PlayerMode::Jumping => SpriteId::PlayerJump,
        PlayerMode::Walking | PlayerMode::Bouncing => SpriteId::PlayerWalk,
        PlayerMode::Idle => SpriteId::PlayerIdle,
        PlayerMode::Falling if player.is_jumping => SpriteId::PlayerJump,
        PlayerMode::Falling if player.bounce.active => SpriteId::PlayerWalk,
        PlayerMode::Falling => SpriteId::PlayerIdle,
    }
}

/// Background and both walls, one screen-height tile at a time, covering
/// from the screen containing the camera up through two screens above it
fn push_tiled_backdrop(frame: &mut Frame, assets: &AssetCatalog, camera_y: f32) {
    let start = (camera_y / WINDOW_HEIGHT).floor() * WINDOW_HEIGHT;
    let end = ((camera_y + WINDOW_HEIGHT * 2.0) / WINDOW_HEIGHT).floor() * WINDOW_HEIGHT;
    let tile = Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let wall = Vec2::new(WALL_WIDTH, WINDOW_HEIGHT);

    let mut y = start;
    while y <= end {
        push_sprite_or_rect(frame, assets, SpriteId::Background, Vec2::new(0.0, y), tile, false, Layer::World);
        y += WINDOW_HEIGHT;
    }

    let mut y = start;
    while y <= end {
        push_sprite_or_rect(frame, assets, SpriteId::Wall, Vec2::new(0.0, y), wall, false, Layer::World);
        push_sprite_or_rect(
            frame,
            assets,
            SpriteId::Wall,
            Vec2::new(WINDOW_WIDTH - WALL_WIDTH, y),
            wall,
            false,
            Layer::World,
        );
        y += WINDOW_HEIGHT;
    }
}

/// Ground is one stretched sprite. Other platforms are a left cap, tiled
/// middle pieces with a stretched remainder, and a right cap; if any piece
/// is missing the whole slab becomes a placeholder.
fn push_platform(frame: &mut Frame, assets: &AssetCatalog, platform: &Platform) {
    let origin = Vec2::new(platform.x, platform.y);
    let size = Vec2::new(platform.width, platform.height);

    if platform.is_ground {
        push_sprite_or_rect(frame, assets, SpriteId::Ground, origin, size, false, Layer::World);
        return;
    }

    let (Some(left), Some(middle), Some(right)) = (
        assets.get(SpriteId::BarLeft),
        assets.get(SpriteId::BarMiddle),
        assets.get(SpriteId::BarRight),
    ) else {
        push_placeholder(frame, SpriteId::BarMiddle, origin, size, Layer::World);
        return;
    };

    let (wl, wm, wr) = (left.width as f32, middle.width as f32, right.width as f32);
    let h = platform.height;

    frame.push(sprite(SpriteId::BarLeft, platform.x, platform.y, wl, h));

    let middle_total = (platform.width - (wl + wr)).max(0.0);
    let full_segments = (middle_total / wm).floor() as u32;
    let remainder = middle_total - full_segments as f32 * wm;
    for i in 0..full_segments {
        let x = platform.x + wl + i as f32 * wm;
        frame.push(sprite(SpriteId::BarMiddle, x, platform.y, wm, h));
    }
    if remainder > 0.0 {
        let x = platform.x + wl + full_segments as f32 * wm;
        frame.push(sprite(SpriteId::BarMiddle, x, platform.y, remainder, h));
    }

    frame.push(sprite(SpriteId::BarRight, platform.right() - wr, platform.y, wr, h));
}

fn sprite(id: SpriteId, x: f32, y: f32, width: f32, height: f32) -> DrawCommand {
    DrawCommand::Sprite {
        id,
        x,
        y,
        width,
        height,
        flip_x: false,
        layer: Layer::World,
    }
}

fn push_sprite_or_rect(
    frame: &mut Frame,
    assets: &AssetCatalog,
    id: SpriteId,
    origin: Vec2,
    size: Vec2,
    flip_x: bool,
    layer: Layer,
) {
    if assets.is_loaded(id) {
        frame.push(DrawCommand::Sprite {
            id,
            x: origin.x,
            y: origin.y,
            width: size.x,
            height: size.y,
            flip_x,
            layer,
        });
    } else {
        push_placeholder(frame, id, origin, size, layer);
    }
}

fn push_placeholder(frame: &mut Frame, id: SpriteId, origin: Vec2, size: Vec2, layer: Layer) {
    if let Some(color) = id.fallback_color() {
        frame.push(DrawCommand::Rect {
            x: origin.x,
            y: origin.y,
            width: size.x,
            height: size.y,
            color,
            layer,
        });
    }
}
