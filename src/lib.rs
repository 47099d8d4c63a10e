//! Bamboo Breakout - a single-screen arcade breakout game
//!
//! Core modules:
//! - `sim`: Scene wiring, contact rules, touch handling and the phase machine
//! - `replay`: JSON scripts of touches/contacts/frames driven through a scene
//! - `settings`: Data-driven tunables (speed limits, impulse factor, seed)
//!
//! Physics integration, rendering, sound playback and textures belong to the
//! host engine; it talks to the game through [`sim::PhysicsWorld`] and the
//! [`sim::GameEvent`] stream.

pub mod replay;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, GameScene};

/// Game configuration constants
pub mod consts {
    /// Scene dimensions
    pub const SCENE_WIDTH: f32 = 1024.0;
    pub const SCENE_HEIGHT: f32 = 768.0;

    /// Node names used for scene look-ups
    pub const BALL_NAME: &str = "ball";
    pub const PADDLE_NAME: &str = "paddle";
    pub const BLOCK_NAME: &str = "block";
    pub const GAME_MESSAGE_NAME: &str = "gameMessage";
    pub const BOTTOM_NAME: &str = "bottom";

    /// Block row
    pub const BLOCK_COUNT: usize = 8;
    pub const BLOCK_WIDTH: f32 = 96.0;
    pub const BLOCK_HEIGHT: f32 = 32.0;
    /// Row height as a fraction of the scene height
    pub const BLOCK_ROW_HEIGHT: f32 = 0.8;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 160.0;
    pub const PADDLE_HEIGHT: f32 = 24.0;
    pub const PADDLE_Y: f32 = 60.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 16.0;
    pub const BALL_START_Y: f32 = 120.0;

    /// Draw order
    pub const BLOCK_Z: f32 = 2.0;
    pub const PARTICLE_Z: f32 = 3.0;
    pub const MESSAGE_Z: f32 = 4.0;

    /// Gravity applied once the run is over, so the ball drops out
    pub const GAME_OVER_GRAVITY: f32 = -9.8;
    /// Ball damping once the run is over
    pub const GAME_OVER_DAMPING: f32 = 1.0;

    /// Seconds for the message sprite to scale in
    pub const MESSAGE_SCALE_SECS: f32 = 0.25;
    /// Lifetime of the block-break particle burst
    pub const BREAK_PARTICLES_SECS: f32 = 1.0;
}
