//! Stroke state machine turning per-tick gestures into canvas commands.
//!
//! The paint engine itself is external; this module only decides when a
//! stroke begins, continues or ends and where on the canvas it lands.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tracker::{Cursor, FrameSize, GestureLabel};

use super::pipeline::FrameResult;

/// Painting tool driven by a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Brush,
    Eraser,
}

impl Tool {
    /// Gesture that starts and continues this tool's strokes.
    pub fn gesture(self) -> GestureLabel {
        match self {
            Tool::Brush => GestureLabel::Drawing,
            Tool::Eraser => GestureLabel::Erasing,
        }
    }

    fn for_gesture(gesture: GestureLabel) -> Option<Self> {
        match gesture {
            GestureLabel::Drawing => Some(Tool::Brush),
            GestureLabel::Erasing => Some(Tool::Eraser),
            _ => None,
        }
    }
}

/// Point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

/// Command for the paint engine produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeCommand {
    /// Nothing to do this tick
    #[default]
    None,
    Begin { tool: Tool, point: CanvasPoint },
    Continue(CanvasPoint),
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    pub allow_drawing: bool,
    pub allow_erasing: bool,
    /// Flip the cursor horizontally so the canvas behaves like a mirror
    pub mirror_x: bool,
    /// Canvas size as a multiple of the camera frame size
    pub canvas_scale: f32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            allow_drawing: true,
            allow_erasing: true,
            mirror_x: true,
            canvas_scale: 2.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StrokeController {
    config: StrokeConfig,
    camera: FrameSize,
    active: Option<Tool>,
}

impl StrokeController {
    pub fn new(config: StrokeConfig, camera: FrameSize) -> Self {
        Self {
            config,
            camera,
            active: None,
        }
    }

    pub fn config(&self) -> &StrokeConfig {
        &self.config
    }

    /// Tool of the stroke in progress.
    pub fn active_tool(&self) -> Option<Tool> {
        self.active
    }

    pub fn set_allow_drawing(&mut self, allow: bool) {
        self.config.allow_drawing = allow;
    }

    pub fn set_allow_erasing(&mut self, allow: bool) {
        self.config.allow_erasing = allow;
    }

    pub fn set_camera(&mut self, camera: FrameSize) {
        self.camera = camera;
    }

    /// Canvas size derived from the camera size.
    pub fn canvas_size(&self) -> (f32, f32) {
        (
            self.camera.width as f32 * self.config.canvas_scale,
            self.camera.height as f32 * self.config.canvas_scale,
        )
    }

    /// Map a camera-pixel cursor onto the canvas, `None` for the sentinel.
    pub fn to_canvas(&self, cursor: Cursor) -> Option<CanvasPoint> {
        if cursor.is_sentinel() || self.camera.width == 0 || self.camera.height == 0 {
            return None;
        }
        let (cam_w, cam_h) = (self.camera.width as f32, self.camera.height as f32);
        let x = if self.config.mirror_x {
            cam_w - cursor.x as f32
        } else {
            cursor.x as f32
        };
        let (canvas_w, canvas_h) = self.canvas_size();
        Some(CanvasPoint {
            x: x / cam_w * canvas_w,
            y: cursor.y as f32 / cam_h * canvas_h,
        })
    }

    /// Gesture with disabled tools demoted to idle.
    fn gate(&self, result: &FrameResult) -> (GestureLabel, Cursor) {
        let allowed = match result.gesture {
            GestureLabel::Drawing => self.config.allow_drawing,
            GestureLabel::Erasing => self.config.allow_erasing,
            _ => true,
        };
        if allowed {
            (result.gesture, result.cursor())
        } else {
            (GestureLabel::Idle, Cursor::SENTINEL)
        }
    }

    /// Advance the stroke state with one tick's result.
    pub fn apply(&mut self, result: &FrameResult) -> StrokeCommand {
        let (gesture, cursor) = self.gate(result);

        let Some(point) = self.to_canvas(cursor) else {
            return self.end();
        };

        match (self.active, Tool::for_gesture(gesture)) {
            (Some(active), Some(tool)) if active == tool => StrokeCommand::Continue(point),
            (Some(_), _) => self.end(),
            (None, Some(tool)) => {
                debug!(?tool, x = point.x, y = point.y, "stroke started");
                self.active = Some(tool);
                StrokeCommand::Begin { tool, point }
            }
            (None, None) => StrokeCommand::None,
        }
    }

    fn end(&mut self) -> StrokeCommand {
        match self.active.take() {
            Some(tool) => {
                debug!(?tool, "stroke ended");
                StrokeCommand::End
            }
            None => StrokeCommand::None,
        }
    }
}
