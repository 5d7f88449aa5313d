use rand::Rng;

use super::shuffle::shuffle;
use crate::models::{Column, ForeignOrder, SampledPair, Token, WordPair};

/// The active pairs laid out as two independently shuffled columns
#[derive(Debug, Clone)]
pub struct Round {
    active: Vec<SampledPair>,
    left: Vec<Token>,
    right: Vec<Token>,
}

impl Round {
    /// Lay out `pairs` with both columns shuffled
    pub fn generate<R: Rng>(pairs: Vec<SampledPair>, rng: &mut R) -> Self {
        let mut left: Vec<Token> = pairs.iter().map(foreign_token).collect();
        let mut right: Vec<Token> = pairs.iter().map(translation_token).collect();
        shuffle(&mut left, rng);
        shuffle(&mut right, rng);

        Self {
            active: pairs,
            left,
            right,
        }
    }

    pub fn tokens(&self, column: Column) -> &[Token] {
        match column {
            Column::Left => &self.left,
            Column::Right => &self.right,
        }
    }

    pub fn token(&self, column: Column, index: usize) -> Option<&Token> {
        self.tokens(column).get(index)
    }

    /// Pairs that have not been matched yet
    pub fn active(&self) -> &[SampledPair] {
        &self.active
    }

    /// Every pair on the board has been matched
    pub fn is_complete(&self) -> bool {
        self.active.is_empty()
    }

    /// Disable both tokens and take their pair off the board.
    ///
    /// Returns `None` when the two tokens do not belong to the same active
    /// pair; nothing changes in that case.
    pub fn resolve(&mut self, left: usize, right: usize) -> Option<WordPair> {
        let pair_id = self.left.get(left)?.pair_id;
        if self.right.get(right)?.pair_id != pair_id {
            return None;
        }
        let position = self.active.iter().position(|p| p.id == pair_id)?;

        self.left[left].disabled = true;
        self.right[right].disabled = true;
        Some(self.active.remove(position).pair)
    }

    /// Rebuild the columns after a match, releasing `incoming` onto the board.
    ///
    /// Matched tokens are dropped. The translation column is always
    /// reshuffled; the foreign column follows `order`.
    pub fn refill<R: Rng>(
        &mut self,
        incoming: Option<SampledPair>,
        order: ForeignOrder,
        rng: &mut R,
    ) {
        if let Some(pair) = &incoming {
            self.active.push(pair.clone());
        }

        self.left = match order {
            ForeignOrder::Stable => {
                let mut left = Vec::with_capacity(self.active.len());
                let mut vacated = None;
                for token in self.left.drain(..) {
                    if token.disabled {
                        vacated.get_or_insert(left.len());
                    } else {
                        left.push(token);
                    }
                }
                if let Some(pair) = &incoming {
                    let token = foreign_token(pair);
                    match vacated {
                        Some(slot) => left.insert(slot, token),
                        None => left.push(token),
                    }
                }
                left
            }
            ForeignOrder::Reshuffle => {
                let mut left: Vec<Token> = self.active.iter().map(foreign_token).collect();
                shuffle(&mut left, rng);
                left
            }
        };

        let mut right: Vec<Token> = self.active.iter().map(translation_token).collect();
        shuffle(&mut right, rng);
        self.right = right;
    }
}

fn foreign_token(pair: &SampledPair) -> Token {
    Token {
        pair_id: pair.id,
        text: pair.pair.foreign.clone(),
        disabled: false,
    }
}

fn translation_token(pair: &SampledPair) -> Token {
    Token {
        pair_id: pair.id,
        text: pair.pair.translation.clone(),
        disabled: false,
    }
}
