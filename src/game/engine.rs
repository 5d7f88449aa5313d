use std::collections::VecDeque;

use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};

use super::{
    round::Round,
    scoreboard::{GameResult, Scoreboard},
    shuffle::{sample, shuffle},
    validator::MatchValidator,
};
use crate::{
    error::GameError,
    models::{
        Column, Feedback, GameMode, GameSettings, Highlight, PairId, RoundStatus, SampledPair,
        Selection, TokenView, WordPair,
    },
};

/// What a single column press did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Nothing changed (re-press, or feedback still showing)
    Ignored,
    /// The press is now the pending selection of its column
    Pending { column: Column, index: usize },
    /// A cross-column attempt was validated and counted
    Resolved {
        feedback: Feedback,
        matched_pair: Option<WordPair>,
    },
}

/// Everything the board needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub mode: GameMode,
    pub left: Vec<TokenView>,
    pub right: Vec<TokenView>,
    pub selection: Selection,
    pub feedback: Option<Feedback>,
    pub scoreboard: Scoreboard,
    /// Fraction of the round (or of the sliding pool) already matched
    pub progress: f32,
    /// Pairs still waiting to enter a sliding window
    pub backlog: usize,
    pub finished: bool,
}

/// The attempt currently shown as feedback
#[derive(Debug, Clone, Copy)]
struct Resolution {
    feedback: Feedback,
    left: usize,
    right: usize,
}

/// Drives one game: round composition, selection, validation and progression.
///
/// The engine never waits on its own. After a resolved attempt it holds the
/// feedback until the caller reports that the feedback window is over via
/// [`RoundEngine::after_match`] or [`RoundEngine::clear_feedback`].
pub struct RoundEngine<R = StdRng> {
    settings: GameSettings,
    rng: R,
    pool: Vec<SampledPair>,
    backlog: VecDeque<SampledPair>,
    window_size: usize,
    round: Round,
    selection: Selection,
    resolution: Option<Resolution>,
    scoreboard: Scoreboard,
    result: Option<GameResult>,
}

impl<R: Rng> RoundEngine<R> {
    pub fn start_game(
        pool: Vec<WordPair>,
        settings: GameSettings,
        mut rng: R,
    ) -> Result<Self, GameError> {
        validate_settings(&settings)?;

        let pool: Vec<SampledPair> = pool
            .into_iter()
            .filter(WordPair::is_playable)
            .enumerate()
            .map(|(i, pair)| SampledPair {
                id: PairId(i as u32),
                pair,
            })
            .collect();

        if pool.len() < settings.round_size {
            return Err(GameError::InsufficientWords {
                available: pool.len(),
                required: settings.round_size,
            });
        }

        let (round, backlog, window_size, total_rounds) = match settings.mode {
            GameMode::FixedRounds => {
                let active = sample(&pool, settings.round_size, &mut rng);
                let round = Round::generate(active, &mut rng);
                (round, VecDeque::new(), settings.round_size, settings.total_rounds)
            }
            GameMode::SlidingWindow => {
                let mut window = pool.clone();
                shuffle(&mut window, &mut rng);
                window.truncate(settings.window_pool_size);
                let window_size = window.len();
                let backlog: VecDeque<SampledPair> = window.split_off(settings.round_size).into();
                (Round::generate(window, &mut rng), backlog, window_size, 1)
            }
        };

        tracing::debug!(
            "Game started: {:?} with {} playable pairs, {} on the board",
            settings.mode,
            pool.len(),
            round.active().len()
        );

        Ok(Self {
            settings,
            rng,
            pool,
            backlog,
            window_size,
            round,
            selection: Selection::default(),
            resolution: None,
            scoreboard: Scoreboard::new(total_rounds),
            result: None,
        })
    }

    /// Handle a press on `column` at `index`.
    ///
    /// Presses on matched items or past the end of a column return
    /// `InvalidSelection` and leave all state untouched.
    pub fn select_column_item(
        &mut self,
        column: Column,
        index: usize,
    ) -> Result<SelectionOutcome, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameFinished);
        }
        if self.resolution.is_some() {
            return Ok(SelectionOutcome::Ignored);
        }

        MatchValidator::check_selection(&self.round, column, index)?;

        let Some(other_index) = self.selection.get(column.other()) else {
            if self.selection.get(column) == Some(index) {
                return Ok(SelectionOutcome::Ignored);
            }
            self.selection = Selection::only(column, index);
            return Ok(SelectionOutcome::Pending { column, index });
        };

        let (left, right) = match column {
            Column::Left => (index, other_index),
            Column::Right => (other_index, index),
        };

        let correct = match (
            self.round.token(Column::Left, left),
            self.round.token(Column::Right, right),
        ) {
            (Some(l), Some(r)) => MatchValidator::is_match(l, r),
            _ => false,
        };

        let matched_pair = if correct {
            self.round.resolve(left, right)
        } else {
            None
        };
        let feedback = if matched_pair.is_some() {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        };

        self.scoreboard.record_attempt(feedback == Feedback::Correct);
        self.selection = Selection::default();
        self.resolution = Some(Resolution {
            feedback,
            left,
            right,
        });

        tracing::debug!(
            "Attempt {} resolved as {:?} (score {}/{})",
            self.scoreboard.total,
            feedback,
            self.scoreboard.score,
            self.scoreboard.total
        );

        Ok(SelectionOutcome::Resolved {
            feedback,
            matched_pair,
        })
    }

    /// Close the feedback window of a correct match and advance the game.
    ///
    /// Without a correct match waiting this changes nothing.
    pub fn after_match(&mut self) -> RoundStatus {
        match self.resolution {
            Some(Resolution {
                feedback: Feedback::Correct,
                ..
            }) => self.resolution = None,
            _ => return self.status(),
        }

        let status = match self.settings.mode {
            GameMode::FixedRounds => self.advance_fixed(),
            GameMode::SlidingWindow => self.advance_sliding(),
        };

        if status == RoundStatus::GameComplete {
            let result = self.scoreboard.to_result();
            tracing::info!(
                "Game complete: {}/{} correct, {} mistakes",
                result.score,
                result.total,
                result.mistakes
            );
            self.result = Some(result);
        }

        status
    }

    /// Close the feedback window, whatever the attempt's outcome was
    pub fn clear_feedback(&mut self) -> RoundStatus {
        match self.resolution.map(|r| r.feedback) {
            Some(Feedback::Correct) => self.after_match(),
            Some(Feedback::Incorrect) => {
                self.resolution = None;
                self.status()
            }
            None => self.status(),
        }
    }

    fn advance_fixed(&mut self) -> RoundStatus {
        if !self.round.is_complete() {
            return RoundStatus::InProgress;
        }
        if self.scoreboard.is_last_round() {
            return RoundStatus::GameComplete;
        }

        self.scoreboard.advance_round();
        let active = sample(&self.pool, self.settings.round_size, &mut self.rng);
        self.round = Round::generate(active, &mut self.rng);

        tracing::debug!(
            "Round {}/{} started",
            self.scoreboard.current_round,
            self.scoreboard.total_rounds
        );
        RoundStatus::RoundComplete
    }

    fn advance_sliding(&mut self) -> RoundStatus {
        let incoming = self.backlog.pop_front();
        self.round
            .refill(incoming, self.settings.foreign_order, &mut self.rng);

        if self.round.is_complete() {
            RoundStatus::GameComplete
        } else {
            RoundStatus::InProgress
        }
    }

    pub fn status(&self) -> RoundStatus {
        if self.result.is_some() {
            RoundStatus::GameComplete
        } else {
            RoundStatus::InProgress
        }
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.resolution.map(|r| r.feedback)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// Final tally, available once the game is complete
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let progress = match self.settings.mode {
            GameMode::FixedRounds => self.scoreboard.round_matched as f32 / self.window_size as f32,
            GameMode::SlidingWindow => {
                self.scoreboard.matched_count as f32 / self.window_size as f32
            }
        };

        RoundSnapshot {
            mode: self.settings.mode,
            left: self.column_view(Column::Left),
            right: self.column_view(Column::Right),
            selection: self.selection,
            feedback: self.feedback(),
            scoreboard: self.scoreboard,
            progress,
            backlog: self.backlog.len(),
            finished: self.is_finished(),
        }
    }

    fn column_view(&self, column: Column) -> Vec<TokenView> {
        self.round
            .tokens(column)
            .iter()
            .enumerate()
            .map(|(index, token)| TokenView {
                text: token.text.clone(),
                disabled: token.disabled,
                highlight: self.highlight(column, index),
            })
            .collect()
    }

    fn highlight(&self, column: Column, index: usize) -> Highlight {
        if let Some(res) = self.resolution {
            let attempted = match column {
                Column::Left => res.left == index,
                Column::Right => res.right == index,
            };
            return match (attempted, res.feedback) {
                (false, _) => Highlight::Plain,
                (true, Feedback::Correct) => Highlight::Correct,
                (true, Feedback::Incorrect) => Highlight::Incorrect,
            };
        }

        if self.selection.get(column) == Some(index) {
            Highlight::Selected
        } else {
            Highlight::Plain
        }
    }
}

fn validate_settings(settings: &GameSettings) -> Result<(), GameError> {
    if settings.round_size == 0 {
        return Err(GameError::InvalidSettings("round size must be at least 1"));
    }
    if settings.total_rounds == 0 {
        return Err(GameError::InvalidSettings("a game needs at least one round"));
    }
    if settings.mode == GameMode::SlidingWindow && settings.window_pool_size < settings.round_size
    {
        return Err(GameError::InvalidSettings(
            "window pool must be at least as large as the round",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForeignOrder;
    use rand::SeedableRng;

    fn pool(words: &[(&str, &str)]) -> Vec<WordPair> {
        words.iter().map(|(f, t)| WordPair::new(*f, *t)).collect()
    }

    fn letters() -> Vec<WordPair> {
        pool(&[
            ("a", "1"),
            ("b", "2"),
            ("c", "3"),
            ("d", "4"),
            ("e", "5"),
            ("f", "6"),
        ])
    }

    fn numbered(count: usize) -> Vec<WordPair> {
        (0..count)
            .map(|i| WordPair::new(format!("w{i}"), format!("t{i}")))
            .collect()
    }

    fn start(words: Vec<WordPair>, settings: GameSettings, seed: u64) -> RoundEngine<StdRng> {
        RoundEngine::start_game(words, settings, StdRng::seed_from_u64(seed)).unwrap()
    }

    fn sliding() -> GameSettings {
        GameSettings {
            mode: GameMode::SlidingWindow,
            ..GameSettings::default()
        }
    }

    fn index_of(engine: &RoundEngine<StdRng>, column: Column, text: &str) -> usize {
        engine
            .round()
            .tokens(column)
            .iter()
            .position(|t| t.text == text && !t.disabled)
            .unwrap()
    }

    /// Index in the other column holding the partner of `column[index]`
    fn partner(engine: &RoundEngine<StdRng>, column: Column, index: usize) -> usize {
        let id = engine.round().tokens(column)[index].pair_id;
        engine
            .round()
            .tokens(column.other())
            .iter()
            .position(|t| t.pair_id == id)
            .unwrap()
    }

    /// Match the first live pair on the board and close the feedback window
    fn match_next(engine: &mut RoundEngine<StdRng>) -> RoundStatus {
        let left = engine
            .round()
            .tokens(Column::Left)
            .iter()
            .position(|t| !t.disabled)
            .unwrap();
        let right = partner(engine, Column::Left, left);

        engine.select_column_item(Column::Left, left).unwrap();
        let outcome = engine.select_column_item(Column::Right, right).unwrap();
        assert!(matches!(
            outcome,
            SelectionOutcome::Resolved {
                feedback: Feedback::Correct,
                ..
            }
        ));
        engine.after_match()
    }

    fn disabled_count(engine: &RoundEngine<StdRng>, column: Column) -> usize {
        engine
            .round()
            .tokens(column)
            .iter()
            .filter(|t| t.disabled)
            .count()
    }

    #[test]
    fn test_start_game_needs_enough_words() {
        let result = RoundEngine::start_game(
            numbered(5),
            GameSettings::default(),
            StdRng::seed_from_u64(1),
        );
        assert!(matches!(
            result,
            Err(GameError::InsufficientWords {
                available: 5,
                required: 6
            })
        ));
    }

    #[test]
    fn test_start_game_ignores_unplayable_pairs() {
        let mut words = numbered(5);
        words.push(WordPair::new("leeg", " "));

        let result =
            RoundEngine::start_game(words, GameSettings::default(), StdRng::seed_from_u64(1));
        assert!(matches!(
            result,
            Err(GameError::InsufficientWords { available: 5, .. })
        ));
    }

    #[test]
    fn test_start_game_rejects_bad_settings() {
        let settings = GameSettings {
            round_size: 0,
            ..GameSettings::default()
        };
        let result = RoundEngine::start_game(letters(), settings, StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(GameError::InvalidSettings(_))));

        let settings = GameSettings {
            window_pool_size: 4,
            ..sliding()
        };
        let result = RoundEngine::start_game(letters(), settings, StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(GameError::InvalidSettings(_))));
    }

    #[test]
    fn test_every_round_is_fully_paired() {
        for seed in 0..50 {
            let engine = start(numbered(12), GameSettings::default(), seed);
            let round = engine.round();
            assert_eq!(round.active().len(), 6);
            for token in round.tokens(Column::Left) {
                let partners = round
                    .tokens(Column::Right)
                    .iter()
                    .filter(|t| t.pair_id == token.pair_id)
                    .count();
                assert_eq!(partners, 1);
            }
        }
    }

    #[test]
    fn test_first_press_becomes_pending() {
        let mut engine = start(letters(), GameSettings::default(), 2);

        let outcome = engine.select_column_item(Column::Right, 3).unwrap();
        assert_eq!(
            outcome,
            SelectionOutcome::Pending {
                column: Column::Right,
                index: 3
            }
        );
        assert_eq!(engine.selection().right, Some(3));
        assert_eq!(engine.scoreboard().total, 0);
    }

    #[test]
    fn test_repress_same_item_is_noop() {
        let mut engine = start(letters(), GameSettings::default(), 3);
        engine.select_column_item(Column::Left, 1).unwrap();
        let board = *engine.scoreboard();

        let outcome = engine.select_column_item(Column::Left, 1).unwrap();
        assert_eq!(outcome, SelectionOutcome::Ignored);
        assert_eq!(engine.selection(), Selection::only(Column::Left, 1));
        assert_eq!(*engine.scoreboard(), board);
    }

    #[test]
    fn test_same_column_press_moves_pending() {
        let mut engine = start(letters(), GameSettings::default(), 4);
        engine.select_column_item(Column::Left, 0).unwrap();
        engine.select_column_item(Column::Left, 4).unwrap();

        assert_eq!(engine.selection(), Selection::only(Column::Left, 4));
        assert_eq!(engine.scoreboard().total, 0);
        assert_eq!(engine.feedback(), None);
    }

    #[test]
    fn test_matched_item_press_is_rejected_without_side_effects() {
        let mut engine = start(letters(), GameSettings::default(), 5);
        let a = index_of(&engine, Column::Left, "a");
        let one = index_of(&engine, Column::Right, "1");
        engine.select_column_item(Column::Left, a).unwrap();
        engine.select_column_item(Column::Right, one).unwrap();
        engine.after_match();

        let b = index_of(&engine, Column::Left, "b");
        engine.select_column_item(Column::Left, b).unwrap();
        let board = *engine.scoreboard();

        let err = engine.select_column_item(Column::Right, one).unwrap_err();
        assert!(matches!(err, GameError::InvalidSelection { .. }));
        assert_eq!(engine.selection(), Selection::only(Column::Left, b));
        assert_eq!(*engine.scoreboard(), board);
    }

    #[test]
    fn test_out_of_range_press_is_rejected() {
        let mut engine = start(letters(), GameSettings::default(), 6);
        let err = engine.select_column_item(Column::Left, 6).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidSelection {
                column: Column::Left,
                index: 6,
                reason: "index out of range"
            }
        );
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn test_presses_during_feedback_are_ignored() {
        let mut engine = start(letters(), GameSettings::default(), 7);
        let b = index_of(&engine, Column::Left, "b");
        let three = index_of(&engine, Column::Right, "3");
        engine.select_column_item(Column::Left, b).unwrap();
        engine.select_column_item(Column::Right, three).unwrap();
        assert_eq!(engine.feedback(), Some(Feedback::Incorrect));

        assert_eq!(
            engine.select_column_item(Column::Left, 0).unwrap(),
            SelectionOutcome::Ignored
        );
        assert!(engine.selection().is_empty());

        assert_eq!(engine.clear_feedback(), RoundStatus::InProgress);
        assert_eq!(engine.feedback(), None);
        assert!(matches!(
            engine.select_column_item(Column::Left, 0).unwrap(),
            SelectionOutcome::Pending { .. }
        ));
    }

    #[test]
    fn test_matching_is_by_pair_not_by_text() {
        let words = pool(&[
            ("bank", "bench"),
            ("zitbank", "bench"),
            ("kat", "cat"),
            ("hond", "dog"),
            ("huis", "house"),
            ("boom", "tree"),
        ]);
        let mut engine = start(words, GameSettings::default(), 8);

        let bank = index_of(&engine, Column::Left, "bank");
        let own = partner(&engine, Column::Left, bank);
        let bank_id = engine.round().tokens(Column::Left)[bank].pair_id;
        let lookalike = engine
            .round()
            .tokens(Column::Right)
            .iter()
            .position(|t| t.text == "bench" && t.pair_id != bank_id)
            .unwrap();

        engine.select_column_item(Column::Left, bank).unwrap();
        let outcome = engine.select_column_item(Column::Right, lookalike).unwrap();
        assert_eq!(
            outcome,
            SelectionOutcome::Resolved {
                feedback: Feedback::Incorrect,
                matched_pair: None
            }
        );
        engine.clear_feedback();

        engine.select_column_item(Column::Right, own).unwrap();
        let outcome = engine.select_column_item(Column::Left, bank).unwrap();
        assert_eq!(
            outcome,
            SelectionOutcome::Resolved {
                feedback: Feedback::Correct,
                matched_pair: Some(WordPair::new("bank", "bench"))
            }
        );
    }

    #[test]
    fn test_single_round_game_end_to_end() {
        let settings = GameSettings {
            round_size: 6,
            total_rounds: 1,
            ..GameSettings::default()
        };
        let mut engine = start(letters(), settings, 9);

        let a = index_of(&engine, Column::Left, "a");
        let one = index_of(&engine, Column::Right, "1");
        engine.select_column_item(Column::Left, a).unwrap();
        let outcome = engine.select_column_item(Column::Right, one).unwrap();
        assert_eq!(
            outcome,
            SelectionOutcome::Resolved {
                feedback: Feedback::Correct,
                matched_pair: Some(WordPair::new("a", "1"))
            }
        );
        assert_eq!(engine.feedback(), Some(Feedback::Correct));
        assert_eq!((engine.scoreboard().score, engine.scoreboard().total), (1, 1));
        assert!(engine.round().tokens(Column::Left)[a].disabled);
        assert!(engine.round().tokens(Column::Right)[one].disabled);
        assert_eq!(engine.after_match(), RoundStatus::InProgress);

        let b = index_of(&engine, Column::Left, "b");
        let three = index_of(&engine, Column::Right, "3");
        engine.select_column_item(Column::Left, b).unwrap();
        let outcome = engine.select_column_item(Column::Right, three).unwrap();
        assert_eq!(
            outcome,
            SelectionOutcome::Resolved {
                feedback: Feedback::Incorrect,
                matched_pair: None
            }
        );
        let board = engine.scoreboard();
        assert_eq!((board.score, board.total, board.mistakes), (1, 2, 1));
        assert_eq!(disabled_count(&engine, Column::Left), 1);
        assert_eq!(disabled_count(&engine, Column::Right), 1);
        // A wrong guess never advances the game
        assert_eq!(engine.after_match(), RoundStatus::InProgress);
        assert_eq!(engine.feedback(), Some(Feedback::Incorrect));
        engine.clear_feedback();

        let mut statuses = Vec::new();
        for _ in 0..5 {
            statuses.push(match_next(&mut engine));
        }
        assert_eq!(statuses[..4], [RoundStatus::InProgress; 4]);
        assert_eq!(statuses[4], RoundStatus::GameComplete);

        assert_eq!(disabled_count(&engine, Column::Left), 6);
        assert_eq!(disabled_count(&engine, Column::Right), 6);
        let result = engine.result().unwrap();
        assert_eq!((result.score, result.total, result.mistakes), (6, 7, 1));
        assert_eq!(result.rounds_played, 1);
        assert!(engine.is_finished());
        assert_eq!(
            engine.select_column_item(Column::Left, 0),
            Err(GameError::GameFinished)
        );
    }

    #[test]
    fn test_round_complete_advances_to_fresh_round() {
        let settings = GameSettings {
            total_rounds: 2,
            ..GameSettings::default()
        };
        let mut engine = start(numbered(8), settings, 10);

        for _ in 0..5 {
            assert_eq!(match_next(&mut engine), RoundStatus::InProgress);
        }
        assert_eq!(match_next(&mut engine), RoundStatus::RoundComplete);

        assert_eq!(engine.scoreboard().current_round, 2);
        assert_eq!(engine.scoreboard().round_matched, 0);
        assert_eq!(engine.round().active().len(), 6);
        assert_eq!(disabled_count(&engine, Column::Left), 0);
        assert_eq!(engine.snapshot().progress, 0.0);

        for _ in 0..5 {
            assert_eq!(match_next(&mut engine), RoundStatus::InProgress);
        }
        assert_eq!(match_next(&mut engine), RoundStatus::GameComplete);
        let result = engine.result().unwrap();
        assert_eq!((result.score, result.total, result.rounds_played), (12, 12, 2));
    }

    #[test]
    fn test_sliding_window_refills_until_pool_drains() {
        let mut engine = start(numbered(20), sliding(), 11);
        assert_eq!(engine.round().active().len(), 6);
        assert_eq!(engine.backlog_len(), 14);

        assert_eq!(match_next(&mut engine), RoundStatus::InProgress);
        assert_eq!(engine.round().active().len(), 6);
        assert_eq!(engine.round().tokens(Column::Left).len(), 6);
        assert_eq!(engine.backlog_len(), 13);

        for matched in 2..=20 {
            let status = match_next(&mut engine);
            let on_board = 6.min(20 - matched);
            assert_eq!(engine.round().active().len(), on_board);
            assert_eq!(engine.round().tokens(Column::Right).len(), on_board);
            if matched < 20 {
                assert_eq!(status, RoundStatus::InProgress);
            } else {
                assert_eq!(status, RoundStatus::GameComplete);
            }
        }

        let result = engine.result().unwrap();
        assert_eq!(result.matched_count, 20);
        assert_eq!(result.rounds_played, 1);
    }

    #[test]
    fn test_sliding_window_caps_pool() {
        let mut engine = start(numbered(25), sliding(), 12);
        assert_eq!(engine.backlog_len(), 14);

        let mut matches = 0;
        while !engine.is_finished() {
            match_next(&mut engine);
            matches += 1;
        }
        assert_eq!(matches, 20);
        assert_eq!(engine.snapshot().progress, 1.0);
    }

    #[test]
    fn test_sliding_window_reshuffle_keeps_pairing() {
        let settings = GameSettings {
            foreign_order: ForeignOrder::Reshuffle,
            ..sliding()
        };
        let mut engine = start(numbered(10), settings, 13);

        while !engine.is_finished() {
            let round = engine.round();
            for token in round.tokens(Column::Left) {
                assert_eq!(
                    round
                        .tokens(Column::Right)
                        .iter()
                        .filter(|t| t.pair_id == token.pair_id)
                        .count(),
                    1
                );
            }
            match_next(&mut engine);
        }
    }

    #[test]
    fn test_scores_stay_consistent_under_random_presses() {
        let settings = GameSettings {
            total_rounds: 3,
            ..GameSettings::default()
        };
        let mut engine = start(numbered(9), settings, 14);
        let mut presses = StdRng::seed_from_u64(99);
        let mut last_total = 0;

        for _ in 0..5_000 {
            if engine.is_finished() {
                break;
            }
            let column = if presses.random_bool(0.5) {
                Column::Left
            } else {
                Column::Right
            };
            let index = presses.random_range(0..7);
            let before = *engine.scoreboard();

            match engine.select_column_item(column, index) {
                Ok(SelectionOutcome::Resolved { .. }) => {
                    assert_eq!(engine.scoreboard().total, before.total + 1);
                    engine.clear_feedback();
                }
                Ok(_) | Err(GameError::InvalidSelection { .. }) => {
                    assert_eq!(engine.scoreboard().total, before.total);
                }
                Err(e) => panic!("unexpected error: {e}"),
            }

            let board = engine.scoreboard();
            assert!(board.total >= last_total);
            assert!(board.score <= board.total);
            assert_eq!(board.score + board.mistakes, board.total);
            last_total = board.total;
        }

        assert!(engine.is_finished(), "random play should finish the game");
        assert_eq!(engine.result().unwrap().score, 18);
    }

    #[test]
    fn test_snapshot_highlights() {
        let mut engine = start(letters(), GameSettings::default(), 15);
        let c = index_of(&engine, Column::Left, "c");
        let five = index_of(&engine, Column::Right, "5");

        engine.select_column_item(Column::Left, c).unwrap();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.left[c].highlight, Highlight::Selected);
        assert!(snapshot.right.iter().all(|t| t.highlight == Highlight::Plain));

        engine.select_column_item(Column::Right, five).unwrap();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.feedback, Some(Feedback::Incorrect));
        assert_eq!(snapshot.left[c].highlight, Highlight::Incorrect);
        assert_eq!(snapshot.right[five].highlight, Highlight::Incorrect);
        assert!(snapshot.selection.is_empty());

        engine.clear_feedback();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.feedback, None);
        assert!(snapshot
            .left
            .iter()
            .chain(&snapshot.right)
            .all(|t| t.highlight == Highlight::Plain));
    }
}
