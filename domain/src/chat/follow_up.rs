//! Follow-up suggestion chips shown after assistant replies.
//!
//! The chips are cosmetic: they are drawn from a fixed pool and know
//! nothing about the reply they follow.

use rand::Rng;
use rand::seq::SliceRandom;

/// Fixed suggestion pool
pub const FOLLOW_UP_POOL: [&str; 5] = [
    "Can you explain that in more detail?",
    "Can you give me an example?",
    "Which documents support this answer?",
    "Summarize that in a few bullet points.",
    "What should I look into next?",
];

/// Number of chips shown at once
pub const FOLLOW_UP_COUNT: usize = 3;

/// Shuffle the pool and take [`FOLLOW_UP_COUNT`] distinct suggestions.
pub fn pick_follow_ups<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let mut pool = FOLLOW_UP_POOL;
    pool.shuffle(rng);
    pool.iter()
        .take(FOLLOW_UP_COUNT)
        .map(|s| s.to_string())
        .collect()
}
