//! Draw commands handed to the presentation backend
//!
//! Coordinates: origin bottom-left, y up, one unit per pixel in a fixed
//! 600x800 logical window. World-layer commands are in world space and the
//! backend offsets them by the frame's camera height; screen-layer commands
//! are already in window space.

use super::assets::SpriteId;

/// RGBA, components in 0..=1
pub type Color = [f32; 4];

/// Which coordinate space a command is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    World,
    Screen,
}

/// A single draw request
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Textured quad; (x, y) is the bottom-left corner
    Sprite {
        id: SpriteId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        flip_x: bool,
        layer: Layer,
    },
    /// Solid quad, used where an asset is missing
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        layer: Layer,
    },
    /// Overlay text, always screen space
    Text { x: f32, y: f32, content: String },
}

/// Backend that turns commands into pixels
pub trait RenderSink {
    fn begin_frame(&mut self, camera_y: f32);
    fn draw(&mut self, command: &DrawCommand);
    /// Swap/present the finished frame
    fn present(&mut self);
}

/// An ordered list of commands for one presented frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Interpolated camera height the world layer is offset by
    pub camera_y: f32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(camera_y: f32) -> Self {
        Self {
            camera_y,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Feed the whole frame to a backend, back to front
    pub fn submit(&self, sink: &mut dyn RenderSink) {
        sink.begin_frame(self.camera_y);
        for command in &self.commands {
            sink.draw(command);
        }
        sink.present();
    }

    /// Sprites with the given id, in draw order
    pub fn sprites(&self, wanted: SpriteId) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |c| matches!(c, DrawCommand::Sprite { id, .. } if *id == wanted))
    }

    /// Every text overlay string
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}

/// Sink that only counts what it is given; used by the headless runner
#[derive(Debug, Default)]
pub struct CountingSink {
    pub frames: u64,
    pub commands: u64,
    pub last_camera_y: f32,
}

impl RenderSink for CountingSink {
    fn begin_frame(&mut self, camera_y: f32) {
        self.last_camera_y = camera_y;
    }

    fn draw(&mut self, _command: &DrawCommand) {
        self.commands += 1;
    }

    fn present(&mut self) {
        self.frames += 1;
        log::trace!("Presented frame {} ({} commands so far)", self.frames, self.commands);
    }
}
