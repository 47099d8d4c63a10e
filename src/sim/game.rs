//! The game scene: lifecycle hook, touch dispatch, contact callback and
//! per-frame update, all driven by the host engine

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::contact::{ContactOutcome, resolve_contact};
use super::events::{GameEvent, MessageTexture, ParticleEffect, SoundEffect};
use super::layout::{block_node, block_positions, build_scene};
use super::physics::{BodyDesc, Category, Contact, PhysicsWorld};
use super::scene::{Node, NodeId, Scene, SceneError};
use super::state::{GamePhase, GameStateMachine, Transition, TransitionError};
use super::touch::{Touch, dragged_paddle_x};
use crate::consts::*;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Scene(SceneError),
    Transition(TransitionError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Scene(e) => write!(f, "{}", e),
            GameError::Transition(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GameError {}

impl From<SceneError> for GameError {
    fn from(e: SceneError) -> Self {
        GameError::Scene(e)
    }
}

impl From<TransitionError> for GameError {
    fn from(e: TransitionError) -> Self {
        GameError::Transition(e)
    }
}

/// One screen of Breakout on top of a host physics world
pub struct GameScene<W: PhysicsWorld> {
    scene: Scene,
    world: W,
    machine: GameStateMachine,
    settings: Settings,
    rng: Pcg32,
    finger_on_paddle: bool,
    /// Set when the run ends
    game_won: Option<bool>,
    /// Bumped each time a new scene instance is presented
    generation: u32,
    events: Vec<GameEvent>,
}

impl<W: PhysicsWorld> GameScene<W> {
    /// Create the scene; nothing happens until [`GameScene::did_move`]
    pub fn new(world: W, settings: Settings) -> Self {
        let rng = Pcg32::seed_from_u64(settings.seed);
        Self {
            scene: build_scene(Vec2::new(SCENE_WIDTH, SCENE_HEIGHT)),
            world,
            machine: GameStateMachine::new(),
            settings,
            rng,
            finger_on_paddle: false,
            game_won: None,
            generation: 0,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.machine.current()
    }

    /// `Some(true)` after a win, `Some(false)` after a loss
    pub fn game_won(&self) -> Option<bool> {
        self.game_won
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn finger_on_paddle(&self) -> bool {
        self.finger_on_paddle
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Take everything emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Blocks still standing, counted from the scene graph
    pub fn blocks_remaining(&self) -> usize {
        self.scene.children_named(BLOCK_NAME).count()
    }

    pub fn is_game_won(&self) -> bool {
        self.blocks_remaining() == 0
    }

    /// Scene presented: wire up physics, spawn blocks, wait for a tap
    pub fn did_move(&mut self) -> Result<(), GameError> {
        // Frictionless border so the ball keeps its speed along the walls
        let border = BodyDesc::edge_loop(self.scene.frame())
            .with_category(Category::BORDER)
            .with_friction(0.0);
        self.world.add_body(NodeId::ROOT, self.scene.frame(), &border);
        self.scene.set_physics_body(border);
        self.world.set_gravity(Vec2::ZERO);

        for node in self.scene.children() {
            if let Some(body) = &node.body {
                self.world.add_body(node.id, node.frame(), body);
            }
        }

        for position in block_positions(self.scene.size()) {
            let node = block_node(position);
            let frame = node.frame();
            let body = node.body.clone();
            let id = self.scene.add_child(node);
            if let Some(body) = body {
                self.world.add_body(id, frame, &body);
            }
        }

        let ball = self.scene.require(BALL_NAME)?;
        self.events.push(GameEvent::SpawnEmitter {
            effect: ParticleEffect::BallTrail,
            attached_to: Some(ball.id),
            position: ball.position,
            z: 0.0,
            lifetime: None,
        });

        log::info!(
            "Scene {} ready with {} blocks",
            self.generation,
            self.blocks_remaining()
        );
        self.enter(GamePhase::WaitingForTap)
    }

    /// First finger down
    pub fn touches_began(&mut self, touches: &[Touch]) -> Result<(), GameError> {
        let Some(touch) = touches.first() else {
            return Ok(());
        };

        match self.phase() {
            Some(GamePhase::WaitingForTap) => self.enter(GamePhase::Playing),
            Some(GamePhase::Playing) => {
                let on_paddle = self
                    .world
                    .body_at(touch.location)
                    .and_then(|id| self.scene.node(id))
                    .is_some_and(|node| node.name == PADDLE_NAME);
                if on_paddle {
                    log::debug!("Began touch on paddle at {}", touch.location);
                    self.finger_on_paddle = true;
                }
                Ok(())
            }
            Some(GamePhase::GameOver) => self.present_new_scene(),
            None => Ok(()),
        }
    }

    /// Drag the paddle horizontally, clamped to the scene
    pub fn touches_moved(&mut self, touches: &[Touch]) -> Result<(), GameError> {
        if !self.finger_on_paddle {
            return Ok(());
        }
        let Some(touch) = touches.first() else {
            return Ok(());
        };

        let scene_width = self.scene.size().x;
        let paddle = self.scene.require_mut(PADDLE_NAME)?;
        let x = dragged_paddle_x(paddle.position.x, touch, paddle.size.x, scene_width);
        paddle.position = Vec2::new(x, paddle.position.y);

        let (id, position) = (paddle.id, paddle.position);
        self.world.set_position(id, position);
        self.events.push(GameEvent::PaddleMoved { node: id, position });
        Ok(())
    }

    pub fn touches_ended(&mut self, _touches: &[Touch]) {
        self.finger_on_paddle = false;
    }

    /// Contact delegate: two bodies began touching
    pub fn did_begin_contact(&mut self, contact: &Contact) -> Result<(), GameError> {
        if self.phase() != Some(GamePhase::Playing) {
            return Ok(());
        }

        let outcome = resolve_contact(contact);
        log::debug!("Contact {:?}", outcome);

        match outcome {
            ContactOutcome::BallLost => {
                self.game_won = Some(false);
                self.enter(GamePhase::GameOver)?;
            }
            ContactOutcome::BlockHit { block } => {
                if self.scene.node(block).is_none() {
                    // Already broken by an earlier contact this frame
                    log::warn!("Ignoring contact with removed block {}", block);
                    return Ok(());
                }
                self.break_block(block)?;
                if self.is_game_won() {
                    self.game_won = Some(true);
                    self.enter(GamePhase::GameOver)?;
                }
            }
            ContactOutcome::BorderBounce => self.play(SoundEffect::PongBlip),
            ContactOutcome::PaddleBounce => self.play(SoundEffect::PaddleBlip),
            ContactOutcome::Ignored => {}
        }
        Ok(())
    }

    /// Per-frame hook, forwarded through the state machine
    pub fn update(&mut self, dt: f32) -> Result<(), GameError> {
        if !self.machine.update(dt) {
            return Ok(());
        }

        let ball = self.scene.require(BALL_NAME)?.id;
        let velocity = self
            .world
            .velocity(ball)
            .ok_or(SceneError::MissingBody(ball))?;

        // Nudge a ball stuck bouncing along one axis
        if velocity.x.abs() <= self.settings.min_axis_speed {
            let dx = self.random_direction();
            self.world.apply_impulse(ball, Vec2::new(dx, 0.0));
        }
        if velocity.y.abs() <= self.settings.min_axis_speed {
            let dy = self.random_direction();
            self.world.apply_impulse(ball, Vec2::new(0.0, dy));
        }

        let damping = if velocity.length() > self.settings.max_speed {
            self.settings.fast_damping
        } else {
            self.settings.cruise_damping
        };
        self.world.set_linear_damping(ball, damping);
        Ok(())
    }

    fn enter(&mut self, to: GamePhase) -> Result<(), GameError> {
        let transition = self.machine.enter(to)?;
        log::info!(
            "Phase {} -> {}",
            transition.from.map(|p| p.as_str()).unwrap_or("-"),
            transition.to
        );
        self.run_transition(transition)?;
        self.events.push(GameEvent::PhaseChanged {
            from: transition.from,
            to: transition.to,
        });
        Ok(())
    }

    fn run_transition(&mut self, transition: Transition) -> Result<(), GameError> {
        if transition.from == Some(GamePhase::WaitingForTap) {
            self.hide_message();
        }

        match transition.to {
            GamePhase::WaitingForTap => self.show_message(MessageTexture::TapToPlay),
            GamePhase::Playing => {
                let ball = self.scene.require(BALL_NAME)?.id;
                let impulse = Vec2::new(self.random_direction(), self.random_direction());
                self.world.apply_impulse(ball, impulse);
            }
            GamePhase::GameOver => {
                let ball = self.scene.require(BALL_NAME)?.id;
                self.world.set_linear_damping(ball, GAME_OVER_DAMPING);
                self.world.set_gravity(Vec2::new(0.0, GAME_OVER_GRAVITY));

                let won = self.game_won.unwrap_or(false);
                log::info!("Game over: {}", if won { "won" } else { "lost" });
                if won {
                    self.show_message(MessageTexture::YouWon);
                    self.play(SoundEffect::GameWon);
                } else {
                    self.show_message(MessageTexture::GameOver);
                    self.play(SoundEffect::GameOver);
                }
            }
        }
        Ok(())
    }

    /// Remove a block, leaving a particle burst behind
    fn break_block(&mut self, block: NodeId) -> Result<(), GameError> {
        let node = self
            .scene
            .remove(block)
            .ok_or(SceneError::UnknownNode(block))?;
        self.world.remove_body(block);

        self.events.push(GameEvent::SpawnEmitter {
            effect: ParticleEffect::BrokenPlatform,
            attached_to: None,
            position: node.position,
            z: PARTICLE_Z,
            lifetime: Some(BREAK_PARTICLES_SECS),
        });
        self.play(SoundEffect::BambooBreak);
        self.events.push(GameEvent::NodeRemoved { node: block });
        log::debug!("Broke block {}, {} left", block, self.blocks_remaining());
        Ok(())
    }

    /// Put the message sprite at the scene centre, creating it if needed
    fn show_message(&mut self, texture: MessageTexture) {
        let center = self.scene.frame().center();
        let existing = self.scene.child_node(GAME_MESSAGE_NAME).map(|n| n.id);
        let node = match existing {
            Some(id) => {
                if let Some(message) = self.scene.node_mut(id) {
                    message.texture = Some(texture.asset_name().to_string());
                    message.scale = 0.0;
                }
                id
            }
            None => self.scene.add_child(
                Node::new(GAME_MESSAGE_NAME, center, Vec2::ZERO)
                    .with_texture(texture.asset_name())
                    .with_z(MESSAGE_Z)
                    .with_scale(0.0),
            ),
        };

        self.events.push(GameEvent::ShowMessage {
            node,
            texture,
            scale_secs: MESSAGE_SCALE_SECS,
        });
    }

    fn hide_message(&mut self) {
        if let Some(id) = self.scene.child_node(GAME_MESSAGE_NAME).map(|n| n.id) {
            self.scene.remove(id);
            self.events.push(GameEvent::HideMessage {
                node: id,
                scale_secs: MESSAGE_SCALE_SECS,
            });
        }
    }

    /// Replace everything with a fresh scene instance
    fn present_new_scene(&mut self) -> Result<(), GameError> {
        self.world.reset();
        self.scene = build_scene(self.scene.size());
        self.machine = GameStateMachine::new();
        self.finger_on_paddle = false;
        self.game_won = None;
        self.generation += 1;

        log::info!("Presenting new scene {}", self.generation);
        self.events.push(GameEvent::PresentScene {
            generation: self.generation,
        });
        self.did_move()
    }

    fn play(&mut self, sound: SoundEffect) {
        if self.settings.sound {
            self.events.push(GameEvent::PlaySound(sound));
        }
    }

    /// ±impulse_factor with even odds
    fn random_direction(&mut self) -> f32 {
        let factor = self.settings.impulse_factor;
        if self.rng.random_bool(0.5) {
            -factor
        } else {
            factor
        }
    }
}
