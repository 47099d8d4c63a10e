//! Contact resolution
//!
//! The two bodies of a contact arrive in no particular order. Sorting them by
//! ascending category bitmask puts the ball (lowest bit) first, so each rule
//! only has to match one ordering.

use serde::{Deserialize, Serialize};

use super::physics::{Category, Contact, ContactBody};
use super::scene::NodeId;

/// What a contact means for the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    /// Ball touched the bottom sensor
    BallLost,
    /// Ball struck a block, which must break
    BlockHit { block: NodeId },
    /// Ball bounced off the scene border
    BorderBounce,
    /// Ball bounced off the paddle
    PaddleBounce,
    /// Pair the game does not care about
    Ignored,
}

/// Return the two bodies with the lower category first
#[inline]
pub fn order_bodies(a: ContactBody, b: ContactBody) -> (ContactBody, ContactBody) {
    if a.category < b.category { (a, b) } else { (b, a) }
}

pub fn resolve_contact(contact: &Contact) -> ContactOutcome {
    let (first, second) = order_bodies(contact.body_a, contact.body_b);

    match (first.category, second.category) {
        (Category::BALL, Category::BOTTOM) => ContactOutcome::BallLost,
        (Category::BALL, Category::BLOCK) => ContactOutcome::BlockHit { block: second.node },
        (Category::BALL, Category::BORDER) => ContactOutcome::BorderBounce,
        (Category::BALL, Category::PADDLE) => ContactOutcome::PaddleBounce,
        _ => ContactOutcome::Ignored,
    }
}
