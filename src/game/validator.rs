use super::round::Round;
use crate::error::GameError;
use crate::models::{Column, Token};

pub struct MatchValidator;

impl MatchValidator {
    /// Check that a press targets a live token on the board
    pub fn check_selection(
        round: &Round,
        column: Column,
        index: usize,
    ) -> Result<&Token, GameError> {
        let token = round
            .token(column, index)
            .ok_or(GameError::InvalidSelection {
                column,
                index,
                reason: "index out of range",
            })?;

        if token.disabled {
            return Err(GameError::InvalidSelection {
                column,
                index,
                reason: "item already matched",
            });
        }

        Ok(token)
    }

    /// Tokens match only when they came from the same pool entry
    pub fn is_match(left: &Token, right: &Token) -> bool {
        left.pair_id == right.pair_id
    }
}
