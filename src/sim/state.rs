//! Game phases and the state machine that moves between them

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting, "tap to play" message showing
    WaitingForTap,
    /// Active gameplay
    Playing,
    /// Run ended (won or lost); a tap presents a new scene
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::WaitingForTap => "WaitingForTap",
            GamePhase::Playing => "Playing",
            GamePhase::GameOver => "GameOver",
        }
    }

    /// Whether `next` may follow this phase
    pub fn can_enter(&self, next: GamePhase) -> bool {
        matches!(
            (self, next),
            (GamePhase::WaitingForTap, GamePhase::Playing)
                | (GamePhase::Playing, GamePhase::GameOver)
                | (GamePhase::GameOver, GamePhase::WaitingForTap)
        )
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed phase change; `from` is `None` for the initial entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Option<GamePhase>,
    pub to: GamePhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    Invalid { from: GamePhase, to: GamePhase },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::Invalid { from, to } => {
                write!(f, "cannot go from {} to {}", from, to)
            }
        }
    }
}

impl std::error::Error for TransitionError {}

/// Three-state machine; starts empty until the scene enters its first phase
#[derive(Debug, Clone, Default)]
pub struct GameStateMachine {
    current: Option<GamePhase>,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<GamePhase> {
        self.current
    }

    /// Move to `to`, rejecting anything outside the transition table
    ///
    /// A rejected request leaves the current phase untouched. The caller runs
    /// the exit/enter effects described by the returned [`Transition`].
    pub fn enter(&mut self, to: GamePhase) -> Result<Transition, TransitionError> {
        if let Some(from) = self.current {
            if !from.can_enter(to) {
                return Err(TransitionError::Invalid { from, to });
            }
        }

        let transition = Transition {
            from: self.current,
            to,
        };
        self.current = Some(to);
        Ok(transition)
    }

    /// Forward a frame tick; returns true if the current phase has per-frame work
    ///
    /// Only Playing does: the scene adjusts the ball's speed every frame.
    pub fn update(&self, _dt: f32) -> bool {
        self.current == Some(GamePhase::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [GamePhase; 3] = [
        GamePhase::WaitingForTap,
        GamePhase::Playing,
        GamePhase::GameOver,
    ];

    #[test]
    fn test_initial_entry_accepts_any_phase() {
        for phase in ALL {
            let mut machine = GameStateMachine::new();
            assert_eq!(
                machine.enter(phase),
                Ok(Transition {
                    from: None,
                    to: phase
                })
            );
            assert_eq!(machine.current(), Some(phase));
        }
    }

    #[test]
    fn test_full_cycle() {
        let mut machine = GameStateMachine::new();
        machine.enter(GamePhase::WaitingForTap).unwrap();
        machine.enter(GamePhase::Playing).unwrap();
        let t = machine.enter(GamePhase::GameOver).unwrap();
        assert_eq!(t.from, Some(GamePhase::Playing));
        machine.enter(GamePhase::WaitingForTap).unwrap();
        assert_eq!(machine.current(), Some(GamePhase::WaitingForTap));
    }

    #[test]
    fn test_invalid_transitions_leave_phase_untouched() {
        let invalid = [
            (GamePhase::WaitingForTap, GamePhase::WaitingForTap),
            (GamePhase::WaitingForTap, GamePhase::GameOver),
            (GamePhase::Playing, GamePhase::Playing),
            (GamePhase::Playing, GamePhase::WaitingForTap),
            (GamePhase::GameOver, GamePhase::GameOver),
            (GamePhase::GameOver, GamePhase::Playing),
        ];

        for (from, to) in invalid {
            let mut machine = GameStateMachine::new();
            machine.enter(from).unwrap();
            assert_eq!(
                machine.enter(to),
                Err(TransitionError::Invalid { from, to })
            );
            assert_eq!(machine.current(), Some(from));
        }
    }

    #[test]
    fn test_update_only_works_while_playing() {
        let mut machine = GameStateMachine::new();
        assert!(!machine.update(1.0 / 60.0));

        machine.enter(GamePhase::WaitingForTap).unwrap();
        assert!(!machine.update(1.0 / 60.0));
        machine.enter(GamePhase::Playing).unwrap();
        assert!(machine.update(1.0 / 60.0));
        machine.enter(GamePhase::GameOver).unwrap();
        assert!(!machine.update(1.0 / 60.0));
    }

    #[test]
    fn test_exactly_three_valid_edges() {
        let valid = ALL
            .iter()
            .flat_map(|a| ALL.iter().map(move |b| (*a, *b)))
            .filter(|(a, b)| a.can_enter(*b))
            .count();
        assert_eq!(valid, 3);
    }
}
