//! Events the game emits for the host engine to present
//!
//! Sound playback, particle simulation and sprite animation are the host's
//! job; the game only says what should happen and where.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::scene::NodeId;
use super::state::GamePhase;

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball hits the border
    PongBlip,
    /// Ball hits the paddle
    PaddleBlip,
    /// Block breaks
    BambooBreak,
    GameWon,
    GameOver,
}

impl SoundEffect {
    /// Asset name the host resolves to a sound file
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::PongBlip => "pong-blip",
            SoundEffect::PaddleBlip => "paddle-blip",
            SoundEffect::BambooBreak => "bamboo-break",
            SoundEffect::GameWon => "game-won",
            SoundEffect::GameOver => "game-over",
        }
    }
}

/// Particle emitters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleEffect {
    /// Splinters where a block broke
    BrokenPlatform,
    /// Trail following the ball, emitted into scene space
    BallTrail,
}

impl ParticleEffect {
    pub fn asset_name(&self) -> &'static str {
        match self {
            ParticleEffect::BrokenPlatform => "BrokenPlatform",
            ParticleEffect::BallTrail => "BallTrail",
        }
    }
}

/// Textures for the centred message sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageTexture {
    TapToPlay,
    GameOver,
    YouWon,
}

impl MessageTexture {
    pub fn asset_name(&self) -> &'static str {
        match self {
            MessageTexture::TapToPlay => "TapToPlay",
            MessageTexture::GameOver => "GameOver",
            MessageTexture::YouWon => "YouWon",
        }
    }
}

/// Something the host should present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged {
        from: Option<GamePhase>,
        to: GamePhase,
    },
    PlaySound(SoundEffect),
    /// Start an emitter; `attached_to` is `None` for a free-standing burst
    SpawnEmitter {
        effect: ParticleEffect,
        attached_to: Option<NodeId>,
        position: Vec2,
        z: f32,
        /// Seconds until the emitter is removed; `None` keeps it alive
        lifetime: Option<f32>,
    },
    /// Scale the message sprite in from 0
    ShowMessage {
        node: NodeId,
        texture: MessageTexture,
        scale_secs: f32,
    },
    /// Scale the message sprite out, then drop it
    HideMessage { node: NodeId, scale_secs: f32 },
    /// A block node left the scene
    NodeRemoved { node: NodeId },
    /// The paddle was dragged
    PaddleMoved { node: NodeId, position: Vec2 },
    /// A fresh scene replaced the previous one
    PresentScene { generation: u32 },
}
