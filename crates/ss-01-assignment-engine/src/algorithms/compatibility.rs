//! Compatibility Scorers
//!
//! Both scorers start from the base score and return exactly the neutral
//! score when the receiver has no wishlist.

use crate::config::{AssignmentConfig, ScoringStrategy};
use crate::domain::entities::Wishlist;
use crate::domain::value_objects::CompatibilityScore;
use crate::ports::outbound::CompatibilityScorer;
use std::sync::Arc;

/// Base score for a receiver with a wishlist on file
pub const BASE_SCORE: f64 = 0.5;

/// Constant base score for every pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineScorer;

impl CompatibilityScorer for BaselineScorer {
    fn score(&self, _giver_wishlist: Option<&Wishlist>, receiver_wishlist: Option<&Wishlist>) -> CompatibilityScore {
        match receiver_wishlist {
            None => CompatibilityScore::NEUTRAL,
            Some(_) => CompatibilityScore::new(BASE_SCORE),
        }
    }
}

/// Base score raised by shared gift category and shared hobby tags.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceOverlapScorer {
    pub category_bonus: f64,
    pub shared_tag_bonus: f64,
}

impl PreferenceOverlapScorer {
    pub fn new(category_bonus: f64, shared_tag_bonus: f64) -> Self {
        Self {
            category_bonus,
            shared_tag_bonus,
        }
    }
}

impl CompatibilityScorer for PreferenceOverlapScorer {
    fn score(&self, giver_wishlist: Option<&Wishlist>, receiver_wishlist: Option<&Wishlist>) -> CompatibilityScore {
        let Some(receiver) = receiver_wishlist else {
            return CompatibilityScore::NEUTRAL;
        };
        let Some(giver) = giver_wishlist else {
            return CompatibilityScore::new(BASE_SCORE);
        };

        let mut score = BASE_SCORE;

        if let (Some(a), Some(b)) = (giver.category(), receiver.category()) {
            if a == b {
                score += self.category_bonus;
            }
        }

        let shared_tags = giver.tags().intersection(&receiver.tags()).count();
        score += shared_tags as f64 * self.shared_tag_bonus;

        CompatibilityScore::new(score)
    }
}

/// Build the scorer selected by `config.scoring`.
pub fn scorer_from_config(config: &AssignmentConfig) -> Arc<dyn CompatibilityScorer> {
    match config.scoring {
        ScoringStrategy::Baseline => Arc::new(BaselineScorer),
        ScoringStrategy::PreferenceOverlap => {
            Arc::new(PreferenceOverlapScorer::new(config.category_bonus, config.shared_tag_bonus))
        }
    }
}
