//! Scene graph: named nodes with a frame and an optional physics body
//!
//! Nodes are stored sorted by id so enumeration order is stable. Look-ups by
//! name return the first (lowest id) match, mirroring how the game finds
//! "the ball" or "the paddle".

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::{BodyDesc, Category};

/// Identifier of a node within one scene instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The scene itself; carries the border body
    pub const ROOT: Self = Self(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned rectangle, origin at the bottom-left corner (y up)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.origin.x && point.x <= max.x && point.y >= self.origin.y && point.y <= max.y
    }
}

/// A node in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Centre of the node in scene coordinates
    pub position: Vec2,
    pub size: Vec2,
    pub z: f32,
    pub scale: f32,
    /// Texture asset name, resolved by the host engine
    pub texture: Option<String>,
    pub body: Option<BodyDesc>,
}

impl Node {
    /// Create a detached node; the scene assigns its id on insertion
    pub fn new(name: &str, position: Vec2, size: Vec2) -> Self {
        Self {
            id: NodeId::ROOT,
            name: name.to_string(),
            position,
            size,
            z: 0.0,
            scale: 1.0,
            texture: None,
            body: None,
        }
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_texture(mut self, texture: &str) -> Self {
        self.texture = Some(texture.to_string());
        self
    }

    pub fn with_body(mut self, body: BodyDesc) -> Self {
        self.body = Some(body);
        self
    }

    pub fn frame(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }

    pub fn category(&self) -> Category {
        self.body.as_ref().map(|b| b.category).unwrap_or(Category::NONE)
    }
}

/// Errors raised when the scene does not hold what the game expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No child with this name
    MissingNode(String),
    /// Id does not belong to a live node
    UnknownNode(NodeId),
    /// Node exists but the physics world has no body for it
    MissingBody(NodeId),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::MissingNode(name) => write!(f, "scene has no node named '{}'", name),
            SceneError::UnknownNode(id) => write!(f, "node {} is not in the scene", id),
            SceneError::MissingBody(id) => write!(f, "node {} has no physics body", id),
        }
    }
}

impl std::error::Error for SceneError {}

/// Container for the current screen's nodes
#[derive(Debug, Clone)]
pub struct Scene {
    size: Vec2,
    /// Body attached to the scene root (the border edge loop)
    physics_body: Option<BodyDesc>,
    /// Children, sorted by id
    nodes: Vec<Node>,
    next_id: u32,
}

impl Scene {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            physics_body: None,
            nodes: Vec::new(),
            next_id: 1,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Frame of the whole scene, origin at the bottom-left
    pub fn frame(&self) -> Rect {
        Rect {
            origin: Vec2::ZERO,
            size: self.size,
        }
    }

    pub fn physics_body(&self) -> Option<&BodyDesc> {
        self.physics_body.as_ref()
    }

    pub fn set_physics_body(&mut self, body: BodyDesc) {
        self.physics_body = Some(body);
    }

    /// Insert a node and return its freshly assigned id
    pub fn add_child(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        node.id = id;
        self.nodes.push(node);
        id
    }

    /// Remove a node from the scene, returning it if it was present
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.remove(index))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// First child with the given name
    pub fn child_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Like [`Scene::child_node`], but a missing node is an error
    pub fn require(&self, name: &str) -> Result<&Node, SceneError> {
        self.child_node(name)
            .ok_or_else(|| SceneError::MissingNode(name.to_string()))
    }

    pub fn require_mut(&mut self, name: &str) -> Result<&mut Node, SceneError> {
        self.nodes
            .iter_mut()
            .find(|n| n.name == name)
            .ok_or_else(|| SceneError::MissingNode(name.to_string()))
    }

    /// Enumerate children with the given name, in id order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| n.name == name)
    }

    pub fn children(&self) -> &[Node] {
        &self.nodes
    }

    /// Category of the body attached to `id` (root included)
    pub fn category_of(&self, id: NodeId) -> Option<Category> {
        if id == NodeId::ROOT {
            return self.physics_body().map(|b| b.category);
        }
        self.node(id).map(Node::category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 20.0, 10.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(30.0, 20.0)));
        assert!(!rect.contains(Vec2::new(31.0, 15.0)));
        assert_eq!(rect.center(), Vec2::new(20.0, 15.0));
    }

    #[test]
    fn test_add_and_lookup_by_name() {
        let mut scene = Scene::new(Vec2::new(100.0, 100.0));
        let a = scene.add_child(Node::new("block", Vec2::new(10.0, 10.0), Vec2::ONE));
        let b = scene.add_child(Node::new("block", Vec2::new(20.0, 10.0), Vec2::ONE));
        let ball = scene.add_child(Node::new("ball", Vec2::ZERO, Vec2::ONE));

        assert_ne!(a, b);
        assert_eq!(scene.child_node("block").map(|n| n.id), Some(a));
        assert_eq!(scene.children_named("block").count(), 2);
        assert_eq!(scene.require("ball").map(|n| n.id), Ok(ball));
        assert_eq!(
            scene.require("paddle").map(|n| n.id),
            Err(SceneError::MissingNode("paddle".to_string()))
        );
    }

    #[test]
    fn test_remove_updates_enumeration() {
        let mut scene = Scene::new(Vec2::new(100.0, 100.0));
        let a = scene.add_child(Node::new("block", Vec2::ZERO, Vec2::ONE));
        let b = scene.add_child(Node::new("block", Vec2::ZERO, Vec2::ONE));

        assert!(scene.remove(a).is_some());
        assert!(scene.remove(a).is_none());
        assert_eq!(scene.child_node("block").map(|n| n.id), Some(b));
        assert_eq!(scene.children_named("block").count(), 1);
    }

    #[test]
    fn test_category_of_root_and_children() {
        let mut scene = Scene::new(Vec2::new(100.0, 100.0));
        assert_eq!(scene.category_of(NodeId::ROOT), None);

        scene.set_physics_body(
            BodyDesc::edge_loop(scene.frame()).with_category(Category::BORDER),
        );
        let ball = scene.add_child(
            Node::new("ball", Vec2::ZERO, Vec2::ONE)
                .with_body(BodyDesc::circle(0.5).with_category(Category::BALL)),
        );
        let plain = scene.add_child(Node::new("decor", Vec2::ZERO, Vec2::ONE));

        assert_eq!(scene.category_of(NodeId::ROOT), Some(Category::BORDER));
        assert_eq!(scene.category_of(ball), Some(Category::BALL));
        assert_eq!(scene.category_of(plain), Some(Category::NONE));
        assert_eq!(scene.category_of(NodeId(99)), None);
    }
}
