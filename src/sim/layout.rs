//! Level layout: the nodes a fresh scene starts with and the block row

use glam::Vec2;

use super::physics::{BodyDesc, Category};
use super::scene::{Node, Rect, Scene};
use crate::consts::*;

/// Build the static part of a level: ball, paddle and bottom sensor
///
/// Blocks are spawned later, when the scene is presented.
pub fn build_scene(size: Vec2) -> Scene {
    let mut scene = Scene::new(size);

    let ball_size = Vec2::splat(BALL_RADIUS * 2.0);
    scene.add_child(
        Node::new(BALL_NAME, Vec2::new(size.x / 2.0, BALL_START_Y), ball_size)
            .with_texture("ball")
            .with_body(
                BodyDesc::circle(BALL_RADIUS)
                    .with_category(Category::BALL)
                    .with_contact_test(
                        Category::BOTTOM | Category::BLOCK | Category::BORDER | Category::PADDLE,
                    )
                    .with_friction(0.0)
                    .with_restitution(1.0)
                    .with_damping(0.0, 0.0)
                    .without_rotation(),
            ),
    );

    let paddle_size = Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT);
    scene.add_child(
        Node::new(PADDLE_NAME, Vec2::new(size.x / 2.0, PADDLE_Y), paddle_size)
            .with_texture("paddle")
            .with_body(
                BodyDesc::rect(paddle_size)
                    .with_category(Category::PADDLE)
                    .with_friction(0.0)
                    .with_restitution(0.1)
                    .fixed(),
            ),
    );

    // One-point-high sensor along the bottom edge
    let bottom = Rect::new(0.0, 0.0, size.x, 1.0);
    scene.add_child(
        Node::new(BOTTOM_NAME, bottom.center(), bottom.size)
            .with_body(BodyDesc::edge_loop(bottom).with_category(Category::BOTTOM)),
    );

    scene
}

/// Centres of the block row, left to right
pub fn block_positions(scene_size: Vec2) -> Vec<Vec2> {
    let total_width = BLOCK_WIDTH * BLOCK_COUNT as f32;
    let x_offset = (scene_size.x - total_width) / 2.0;
    let y = scene_size.y * BLOCK_ROW_HEIGHT;

    (0..BLOCK_COUNT)
        .map(|i| Vec2::new(x_offset + (i as f32 + 0.5) * BLOCK_WIDTH, y))
        .collect()
}

pub fn block_node(position: Vec2) -> Node {
    let size = Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT);
    Node::new(BLOCK_NAME, position, size)
        .with_texture("block")
        .with_z(BLOCK_Z)
        .with_body(
            BodyDesc::rect(size)
                .with_category(Category::BLOCK)
                .with_friction(0.0)
                .without_rotation()
                .without_gravity()
                .fixed(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_row_is_centred() {
        let size = Vec2::new(SCENE_WIDTH, SCENE_HEIGHT);
        let positions = block_positions(size);
        assert_eq!(positions.len(), BLOCK_COUNT);

        let left_edge = positions[0].x - BLOCK_WIDTH / 2.0;
        let right_edge = positions[BLOCK_COUNT - 1].x + BLOCK_WIDTH / 2.0;
        assert!((left_edge - (size.x - right_edge)).abs() < 0.001);
        assert!(positions.iter().all(|p| (p.y - size.y * 0.8).abs() < 0.001));
    }

    #[test]
    fn test_blocks_are_adjacent() {
        let positions = block_positions(Vec2::new(SCENE_WIDTH, SCENE_HEIGHT));
        for pair in positions.windows(2) {
            assert!((pair[1].x - pair[0].x - BLOCK_WIDTH).abs() < 0.001);
        }
    }

    #[test]
    fn test_initial_scene_nodes() {
        let scene = build_scene(Vec2::new(SCENE_WIDTH, SCENE_HEIGHT));
        let ball = scene.require(BALL_NAME).unwrap();
        let body = ball.body.as_ref().unwrap();
        assert_eq!(body.category, Category::BALL);
        assert!(body.contact_test.contains(Category::BOTTOM | Category::BLOCK));
        assert_eq!(body.restitution, 1.0);
        assert!(!body.allows_rotation);

        assert_eq!(scene.require(PADDLE_NAME).unwrap().category(), Category::PADDLE);
        assert_eq!(scene.require(BOTTOM_NAME).unwrap().category(), Category::BOTTOM);
        assert_eq!(scene.children_named(BLOCK_NAME).count(), 0);
    }
}
