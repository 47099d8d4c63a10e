//! Game logic module
//!
//! Everything the game decides lives here. It never integrates physics or
//! draws anything:
//! - Bodies are described and handed to a [`PhysicsWorld`]
//! - Contacts come back from the host and are resolved by category bitmask
//! - Presentation is requested through [`GameEvent`]s
//! - Randomness comes from a seeded RNG only

pub mod contact;
pub mod events;
pub mod game;
pub mod layout;
pub mod physics;
pub mod scene;
pub mod state;
pub mod touch;
pub mod world;

pub use contact::{ContactOutcome, order_bodies, resolve_contact};
pub use events::{GameEvent, MessageTexture, ParticleEffect, SoundEffect};
pub use game::{GameError, GameScene};
pub use physics::{BodyDesc, BodyShape, Category, Contact, ContactBody, PhysicsWorld};
pub use scene::{Node, NodeId, Rect, Scene, SceneError};
pub use state::{GamePhase, GameStateMachine, Transition, TransitionError};
pub use touch::{Touch, TouchPhase, clamp_paddle_x, dragged_paddle_x};
pub use world::BodyRegistry;
