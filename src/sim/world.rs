//! Body registry: a [`PhysicsWorld`] that records bodies without simulating them
//!
//! Velocities only change through impulses (or [`BodyRegistry::set_velocity`]),
//! which makes it suitable for headless replays and tests where the contacts
//! themselves are scripted.

use std::collections::BTreeMap;

use glam::Vec2;

use super::physics::{BodyDesc, PhysicsWorld};
use super::scene::{NodeId, Rect};

/// A body as tracked by the registry
#[derive(Debug, Clone)]
pub struct RegisteredBody {
    pub desc: BodyDesc,
    pub frame: Rect,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    /// Keyed by node id for stable iteration
    bodies: BTreeMap<NodeId, RegisteredBody>,
    gravity: Vec2,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self, node: NodeId) -> Option<&RegisteredBody> {
        self.bodies.get(&node)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Overwrite a body's velocity, standing in for the engine's integrator
    pub fn set_velocity(&mut self, node: NodeId, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(&node) {
            body.velocity = velocity;
        }
    }
}

impl PhysicsWorld for BodyRegistry {
    fn add_body(&mut self, node: NodeId, frame: Rect, body: &BodyDesc) {
        self.bodies.insert(
            node,
            RegisteredBody {
                desc: body.clone(),
                frame,
                velocity: Vec2::ZERO,
            },
        );
    }

    fn remove_body(&mut self, node: NodeId) {
        self.bodies.remove(&node);
    }

    fn set_position(&mut self, node: NodeId, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(&node) {
            body.frame = Rect::from_center(position, body.frame.size);
        }
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn apply_impulse(&mut self, node: NodeId, impulse: Vec2) {
        if let Some(body) = self.bodies.get_mut(&node) {
            // Static bodies ignore impulses
            if body.desc.dynamic && body.desc.mass > 0.0 {
                body.velocity += impulse / body.desc.mass;
            }
        }
    }

    fn velocity(&self, node: NodeId) -> Option<Vec2> {
        self.bodies.get(&node).map(|b| b.velocity)
    }

    fn set_linear_damping(&mut self, node: NodeId, damping: f32) {
        if let Some(body) = self.bodies.get_mut(&node) {
            body.desc.linear_damping = damping;
        }
    }

    fn linear_damping(&self, node: NodeId) -> Option<f32> {
        self.bodies.get(&node).map(|b| b.desc.linear_damping)
    }

    fn body_at(&self, point: Vec2) -> Option<NodeId> {
        // Highest id wins when bodies overlap (most recently added on top)
        self.bodies
            .iter()
            .rev()
            .find(|(_, body)| body.desc.hit_test(&body.frame, point))
            .map(|(id, _)| *id)
    }

    fn reset(&mut self) {
        self.bodies.clear();
        self.gravity = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::Category;

    fn paddle_frame() -> Rect {
        Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(80.0, 20.0))
    }

    #[test]
    fn test_impulse_changes_velocity_of_dynamic_bodies_only() {
        let mut world = BodyRegistry::new();
        let ball = NodeId(1);
        let wall = NodeId(2);
        world.add_body(ball, paddle_frame(), &BodyDesc::circle(8.0));
        world.add_body(wall, paddle_frame(), &BodyDesc::rect(Vec2::ONE).fixed());

        world.apply_impulse(ball, Vec2::new(3.0, -3.0));
        world.apply_impulse(ball, Vec2::new(3.0, 0.0));
        world.apply_impulse(wall, Vec2::new(3.0, 0.0));

        assert_eq!(world.velocity(ball), Some(Vec2::new(6.0, -3.0)));
        assert_eq!(world.velocity(wall), Some(Vec2::ZERO));
        assert_eq!(world.velocity(NodeId(9)), None);
    }

    #[test]
    fn test_body_at_follows_position() {
        let mut world = BodyRegistry::new();
        let paddle = NodeId(3);
        world.add_body(
            paddle,
            paddle_frame(),
            &BodyDesc::rect(Vec2::new(80.0, 20.0)).with_category(Category::PADDLE),
        );

        assert_eq!(world.body_at(Vec2::new(100.0, 50.0)), Some(paddle));
        assert_eq!(world.body_at(Vec2::new(300.0, 50.0)), None);

        world.set_position(paddle, Vec2::new(300.0, 50.0));
        assert_eq!(world.body_at(Vec2::new(300.0, 50.0)), Some(paddle));
        assert_eq!(world.body_at(Vec2::new(100.0, 50.0)), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut world = BodyRegistry::new();
        world.add_body(NodeId(1), paddle_frame(), &BodyDesc::circle(8.0));
        world.set_gravity(Vec2::new(0.0, -9.8));
        world.set_linear_damping(NodeId(1), 0.4);
        assert_eq!(world.linear_damping(NodeId(1)), Some(0.4));

        world.reset();
        assert!(world.is_empty());
        assert_eq!(world.gravity(), Vec2::ZERO);
    }
}
