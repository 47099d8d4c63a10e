//! Replay scripts
//!
//! A script is a JSON list of steps fed into a [`GameScene`] in order:
//!
//! ```json
//! [
//!   { "touch": { "phase": "began", "x": 512.0, "y": 400.0 } },
//!   { "contact": { "a": "ball", "b": "block" } },
//!   { "frame": { "dt": 0.016 } }
//! ]
//! ```
//!
//! Contact names resolve to the first node with that name; `"border"` means
//! the scene itself.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{
    Contact, ContactBody, GameError, GameEvent, GamePhase, GameScene, NodeId, PhysicsWorld,
    Touch, TouchPhase,
};

/// Name that addresses the scene root in contact steps
pub const BORDER_NAME: &str = "border";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchStep {
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
    /// Previous location; defaults to the current one
    #[serde(default)]
    pub prev_x: Option<f32>,
    #[serde(default)]
    pub prev_y: Option<f32>,
}

impl TouchStep {
    pub fn touch(&self) -> Touch {
        let location = Vec2::new(self.x, self.y);
        let previous = Vec2::new(self.prev_x.unwrap_or(self.x), self.prev_y.unwrap_or(self.y));
        Touch::new(location, previous)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactStep {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStep {
    pub dt: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Touch(TouchStep),
    Contact(ContactStep),
    Frame(FrameStep),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Contact step names a node the scene does not have
    UnknownNode { step: usize, name: String },
    Game { step: usize, source: GameError },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Io(e) => write!(f, "cannot read script: {}", e),
            ReplayError::Json(e) => write!(f, "malformed script: {}", e),
            ReplayError::UnknownNode { step, name } => {
                write!(f, "step {}: no node named '{}'", step, name)
            }
            ReplayError::Game { step, source } => write!(f, "step {}: {}", step, source),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Io(e) => Some(e),
            ReplayError::Json(e) => Some(e),
            ReplayError::UnknownNode { .. } => None,
            ReplayError::Game { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::Io(e)
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        ReplayError::Json(e)
    }
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Tap to start, drag the paddle, bounce around, clear the row, restart
    pub fn demo() -> Self {
        let paddle = Vec2::new(SCENE_WIDTH / 2.0, PADDLE_Y);
        let touch = |phase, at: Vec2, prev: Vec2| {
            Step::Touch(TouchStep {
                phase,
                x: at.x,
                y: at.y,
                prev_x: Some(prev.x),
                prev_y: Some(prev.y),
            })
        };
        let contact = |b: &str| {
            Step::Contact(ContactStep {
                a: BALL_NAME.to_string(),
                b: b.to_string(),
            })
        };
        let frame = || Step::Frame(FrameStep { dt: 1.0 / 60.0 });
        let center = Vec2::new(SCENE_WIDTH / 2.0, SCENE_HEIGHT / 2.0);

        let mut steps = vec![
            touch(TouchPhase::Began, center, center),
            touch(TouchPhase::Ended, center, center),
            frame(),
            touch(TouchPhase::Began, paddle, paddle),
            touch(TouchPhase::Moved, paddle + Vec2::new(120.0, 0.0), paddle),
            touch(TouchPhase::Ended, paddle, paddle),
            contact(BORDER_NAME),
            contact(PADDLE_NAME),
            frame(),
        ];
        for _ in 0..BLOCK_COUNT {
            steps.push(contact(BLOCK_NAME));
            steps.push(frame());
        }
        steps.push(touch(TouchPhase::Began, center, center));
        steps.push(touch(TouchPhase::Ended, center, center));

        Self { steps }
    }
}

fn resolve_body<W: PhysicsWorld>(
    game: &GameScene<W>,
    step: usize,
    name: &str,
) -> Result<ContactBody, ReplayError> {
    let scene = game.scene();
    let node = if name == BORDER_NAME {
        Some(NodeId::ROOT)
    } else {
        scene.child_node(name).map(|n| n.id)
    };

    node.and_then(|id| {
        scene
            .category_of(id)
            .map(|category| ContactBody { node: id, category })
    })
    .ok_or_else(|| ReplayError::UnknownNode {
        step,
        name: name.to_string(),
    })
}

/// Feed every step into `game` and collect the events it emits
///
/// The scene must already have been presented with [`GameScene::did_move`].
pub fn run_script<W: PhysicsWorld>(
    game: &mut GameScene<W>,
    script: &Script,
) -> Result<Vec<GameEvent>, ReplayError> {
    let mut events = game.drain_events();

    for (index, step) in script.steps.iter().enumerate() {
        let result = match step {
            Step::Touch(t) => {
                let touches = [t.touch()];
                match t.phase {
                    TouchPhase::Began => game.touches_began(&touches),
                    TouchPhase::Moved => game.touches_moved(&touches),
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        game.touches_ended(&touches);
                        Ok(())
                    }
                }
            }
            Step::Contact(c) if game.phase() != Some(GamePhase::Playing) => {
                // The scene ignores contacts outside play; names may no longer resolve
                log::debug!("Step {}: skipping contact {}/{} outside play", index, c.a, c.b);
                Ok(())
            }
            Step::Contact(c) => {
                let a = resolve_body(game, index, &c.a)?;
                let b = resolve_body(game, index, &c.b)?;
                game.did_begin_contact(&Contact::between(a, b))
            }
            Step::Frame(f) => game.update(f.dt),
        };
        result.map_err(|source| ReplayError::Game {
            step: index,
            source,
        })?;
        events.extend(game.drain_events());
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;
    use crate::settings::Settings;
    use crate::sim::{BodyRegistry, SceneError, SoundEffect};

    fn new_game() -> GameScene<BodyRegistry> {
        let mut game = GameScene::new(BodyRegistry::new(), Settings::default());
        game.did_move().unwrap();
        game
    }

    #[test]
    fn test_parse_script() {
        let script = Script::from_json(
            r#"[
                { "touch": { "phase": "began", "x": 1.0, "y": 2.0 } },
                { "contact": { "a": "ball", "b": "bottom" } },
                { "frame": { "dt": 0.5 } }
            ]"#,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 3);
        match &script.steps[0] {
            Step::Touch(t) => assert_eq!(t.touch(), Touch::at(Vec2::new(1.0, 2.0))),
            other => panic!("unexpected step {:?}", other),
        }
        assert_eq!(
            script.steps[1],
            Step::Contact(ContactStep {
                a: "ball".to_string(),
                b: "bottom".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_script() {
        assert!(matches!(
            Script::from_json(r#"[{ "jump": {} }]"#),
            Err(ReplayError::Json(_))
        ));
    }

    #[test]
    fn test_demo_script_wins_and_restarts() {
        let mut game = new_game();
        let events = run_script(&mut game, &Script::demo()).unwrap();

        assert!(events.contains(&GameEvent::PlaySound(SoundEffect::GameWon)));
        assert!(events.contains(&GameEvent::PresentScene { generation: 1 }));
        assert_eq!(game.phase(), Some(GamePhase::WaitingForTap));
        assert_eq!(game.blocks_remaining(), BLOCK_COUNT);

        let moved = events
            .iter()
            .find_map(|e| match e {
                GameEvent::PaddleMoved { position, .. } => Some(*position),
                _ => None,
            })
            .unwrap();
        assert_eq!(moved.x, SCENE_WIDTH / 2.0 + 120.0);
    }

    #[test]
    fn test_losing_script() {
        let mut game = new_game();
        let script = Script::from_json(
            r#"[
                { "touch": { "phase": "began", "x": 10.0, "y": 10.0 } },
                { "contact": { "a": "bottom", "b": "ball" } }
            ]"#,
        )
        .unwrap();

        let events = run_script(&mut game, &script).unwrap();
        assert_eq!(game.game_won(), Some(false));
        assert!(events.contains(&GameEvent::PlaySound(SoundEffect::GameOver)));
    }

    #[test]
    fn test_contacts_after_game_over_are_skipped() {
        let mut game = new_game();
        let mut json = String::from(
            r#"[{ "touch": { "phase": "began", "x": 10.0, "y": 10.0 } }"#,
        );
        for _ in 0..BLOCK_COUNT {
            json.push_str(r#", { "contact": { "a": "ball", "b": "block" } }"#);
        }
        // No blocks left to name, and the run is over
        json.push_str(r#", { "contact": { "a": "ball", "b": "block" } }"#);
        json.push_str(r#", { "contact": { "a": "ball", "b": "bottom" } }"#);
        json.push(']');

        let script = Script::from_json(&json).unwrap();
        let events = run_script(&mut game, &script).unwrap();

        assert_eq!(game.phase(), Some(GamePhase::GameOver));
        assert_eq!(game.game_won(), Some(true));
        assert!(!events.contains(&GameEvent::PlaySound(SoundEffect::GameOver)));
    }

    #[test]
    fn test_error_sources() {
        let json = Script::from_json("[").unwrap_err();
        assert!(json.source().is_some());

        let failed = ReplayError::Game {
            step: 3,
            source: GameError::Scene(SceneError::MissingNode(BALL_NAME.to_string())),
        };
        assert_eq!(
            failed.source().map(|e| e.to_string()),
            Some("scene has no node named 'ball'".to_string())
        );

        let unknown = ReplayError::UnknownNode {
            step: 0,
            name: "brick".to_string(),
        };
        assert!(unknown.source().is_none());
    }

    #[test]
    fn test_unknown_contact_name() {
        let mut game = new_game();
        let script = Script::from_json(
            r#"[
                { "touch": { "phase": "began", "x": 10.0, "y": 10.0 } },
                { "contact": { "a": "ball", "b": "brick" } }
            ]"#,
        )
        .unwrap();

        match run_script(&mut game, &script) {
            Err(ReplayError::UnknownNode { step, name }) => {
                assert_eq!(step, 1);
                assert_eq!(name, "brick");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
