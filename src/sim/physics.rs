//! Physics seam between the game and the host engine
//!
//! The host engine owns integration and collision detection. The game only
//! describes bodies, tags them with category bitmasks and reacts to the
//! contacts the engine reports.

use std::ops::BitOr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::scene::{NodeId, Rect};

/// Category bitmask tagging what kind of thing a body is
///
/// Ordering follows the raw bitmask value, which is what contact resolution
/// sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub u32);

impl Category {
    pub const NONE: Self = Self(0);
    pub const BALL: Self = Self(0x1);
    pub const BOTTOM: Self = Self(0x1 << 1);
    pub const BLOCK: Self = Self(0x1 << 2);
    pub const PADDLE: Self = Self(0x1 << 3);
    pub const BORDER: Self = Self(0x1 << 4);
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every bit of `other` is set in `self`
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Category {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Collision shape of a body, in node-local terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyShape {
    Circle { radius: f32 },
    Rect { size: Vec2 },
    /// Massless, volumeless loop of edges (scene border, bottom sensor)
    EdgeLoop { rect: Rect },
}

/// Description of a physics body handed to the host engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    pub shape: BodyShape,
    pub category: Category,
    /// Categories whose contacts should be reported for this body
    pub contact_test: Category,
    /// Categories this body physically collides with
    pub collision: Category,
    pub dynamic: bool,
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub allows_rotation: bool,
    pub affected_by_gravity: bool,
}

impl BodyDesc {
    fn with_shape(shape: BodyShape) -> Self {
        Self {
            shape,
            category: Category::NONE,
            contact_test: Category::NONE,
            collision: Category::ALL,
            dynamic: true,
            mass: 1.0,
            friction: 0.2,
            restitution: 0.2,
            linear_damping: 0.1,
            angular_damping: 0.1,
            allows_rotation: true,
            affected_by_gravity: true,
        }
    }

    pub fn circle(radius: f32) -> Self {
        Self::with_shape(BodyShape::Circle { radius })
    }

    pub fn rect(size: Vec2) -> Self {
        Self::with_shape(BodyShape::Rect { size })
    }

    /// Edge loops never move
    pub fn edge_loop(rect: Rect) -> Self {
        Self {
            dynamic: false,
            affected_by_gravity: false,
            ..Self::with_shape(BodyShape::EdgeLoop { rect })
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_contact_test(mut self, mask: Category) -> Self {
        self.contact_test = mask;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    pub fn without_rotation(mut self) -> Self {
        self.allows_rotation = false;
        self
    }

    pub fn without_gravity(mut self) -> Self {
        self.affected_by_gravity = false;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.dynamic = false;
        self
    }

    /// Does a point (relative to the owning node's frame) hit this body?
    ///
    /// Edge loops have no area and are never hit.
    pub fn hit_test(&self, frame: &Rect, point: Vec2) -> bool {
        match self.shape {
            BodyShape::Circle { radius } => (point - frame.center()).length() <= radius,
            BodyShape::Rect { size } => Rect::from_center(frame.center(), size).contains(point),
            BodyShape::EdgeLoop { .. } => false,
        }
    }
}

/// One side of a reported contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBody {
    pub node: NodeId,
    pub category: Category,
}

/// Two bodies that began touching this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub body_a: ContactBody,
    pub body_b: ContactBody,
    #[serde(default)]
    pub point: Vec2,
}

impl Contact {
    pub fn between(body_a: ContactBody, body_b: ContactBody) -> Self {
        Self {
            body_a,
            body_b,
            point: Vec2::ZERO,
        }
    }
}

/// What the game needs from the host engine's physics world
pub trait PhysicsWorld {
    /// Attach a body to a node occupying `frame`
    fn add_body(&mut self, node: NodeId, frame: Rect, body: &BodyDesc);

    /// Detach a node's body; unknown nodes are ignored
    fn remove_body(&mut self, node: NodeId);

    /// Move a node's body (kinematic placement, e.g. the dragged paddle)
    fn set_position(&mut self, node: NodeId, position: Vec2);

    fn set_gravity(&mut self, gravity: Vec2);

    fn gravity(&self) -> Vec2;

    fn apply_impulse(&mut self, node: NodeId, impulse: Vec2);

    fn velocity(&self, node: NodeId) -> Option<Vec2>;

    fn set_linear_damping(&mut self, node: NodeId, damping: f32);

    fn linear_damping(&self, node: NodeId) -> Option<f32>;

    /// Node whose body covers `point`, if any
    fn body_at(&self, point: Vec2) -> Option<NodeId>;

    /// Drop every body (a new scene is being presented)
    fn reset(&mut self);
}
