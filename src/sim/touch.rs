//! Touch input and paddle dragging

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// A touch in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub location: Vec2,
    /// Location reported by the previous event for this touch
    pub previous_location: Vec2,
}

impl Touch {
    pub fn new(location: Vec2, previous_location: Vec2) -> Self {
        Self {
            location,
            previous_location,
        }
    }

    /// A touch that has not moved yet
    pub fn at(location: Vec2) -> Self {
        Self::new(location, location)
    }

    /// Horizontal travel since the previous event
    #[inline]
    pub fn delta_x(&self) -> f32 {
        self.location.x - self.previous_location.x
    }
}

/// Keep the paddle fully on screen
///
/// If the scene is narrower than the paddle, the right-hand limit wins.
#[inline]
pub fn clamp_paddle_x(x: f32, paddle_width: f32, scene_width: f32) -> f32 {
    x.max(paddle_width / 2.0).min(scene_width - paddle_width / 2.0)
}

/// New paddle x after following a drag
pub fn dragged_paddle_x(current_x: f32, touch: &Touch, paddle_width: f32, scene_width: f32) -> f32 {
    clamp_paddle_x(current_x + touch.delta_x(), paddle_width, scene_width)
}
