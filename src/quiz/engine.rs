// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Quiz engine state machine.
//!
//! Ties the remaining pool, the current question and the scores together.
//! The presenter feeds it `start`, `pick`, `advance` and `dispose`; every
//! call returns a `Transition` describing what happened, and nothing here
//! panics or returns errors across the presenter boundary.
//!
//! ```text
//! Init --start--> Questioning --pick--> Revealing --advance--> Questioning
//!   |                  |                    |                       ...
//!   +--(pool < 2)------+-----(pool < 2)-----+--> Ended <--dispose-- any
//! ```

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::catalog::{SampleCatalog, SampleId};
use crate::error::QuizError;
use crate::score::ScoreStore;

use super::generator::{Question, MIN_POOL_SIZE, OPTION_SLOTS};
use super::presenter::{MediaPlayer, PlaybackState, Presenter};
use super::{QuestionSource, Scores};

/// Pause between a pick and the next question
pub const CORRECT_ANSWER_DELAY_MILLIS: u64 = 3000;

/// Engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Created, not started
    Init,
    /// Waiting for a pick
    Questioning,
    /// Answer shown, waiting for the advance timer
    Revealing,
    /// Terminal
    Ended,
}

/// How a session begins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartMode {
    /// Fresh pool from the catalog, current score reset
    NewGame,
    /// Continue with a carried-over pool and the stored scores
    Resume(Vec<SampleId>),
}

impl StartMode {
    /// Present hand-off slot means resume, absent means new game
    pub fn from_handoff(slot: Option<Vec<SampleId>>) -> Self {
        match slot {
            Some(pool) => StartMode::Resume(pool),
            None => StartMode::NewGame,
        }
    }
}

/// Why the engine reached `Ended`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Fewer than two samples left
    Completed,
    /// A sample needed for the question is missing from the catalog
    SampleNotFound(SampleId),
    /// The question source failed
    Failed,
    /// Torn down by the presenter
    Disposed,
}

/// Outcome of a pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub correct_index: usize,
    pub picked_index: usize,
    pub correct_id: SampleId,
    pub picked_id: SampleId,
    pub scores: Scores,
}

impl Reveal {
    /// Check if the pick was right
    pub fn is_correct(&self) -> bool {
        self.correct_id == self.picked_id
    }
}

/// Result of feeding an event to the engine
#[derive(Debug)]
pub enum Transition {
    /// A new question is on screen
    Question(Question),
    /// The answer is being revealed
    Revealed(Reveal),
    /// The engine is now terminal
    Ended(EndReason),
    /// The event was dropped and state is unchanged
    Ignored(QuizError),
}

/// The quiz engine.
///
/// Owns its collaborators: catalog `C`, score store `S`, question source
/// `Q`, presenter `P` and media player `M`.
pub struct QuizEngine<C, S, Q, P, M> {
    catalog: C,
    store: S,
    questions: Q,
    presenter: P,
    player: Option<M>,
    state: EngineState,
    pool: Vec<SampleId>,
    question: Option<Question>,
    scores: Scores,
    reveal_delay: Duration,
    end_announced: bool,
}

impl<C, S, Q, P, M> QuizEngine<C, S, Q, P, M>
where
    C: SampleCatalog,
    S: ScoreStore,
    Q: QuestionSource,
    P: Presenter,
    M: MediaPlayer,
{
    /// Create an engine in `Init`
    pub fn new(catalog: C, store: S, questions: Q, presenter: P, player: M) -> Self {
        Self {
            catalog,
            store,
            questions,
            presenter,
            player: Some(player),
            state: EngineState::Init,
            pool: Vec::new(),
            question: None,
            scores: Scores::default(),
            reveal_delay: Duration::from_millis(CORRECT_ANSWER_DELAY_MILLIS),
            end_announced: false,
        }
    }

    /// Set the reveal delay
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    /// Begin a session
    pub fn start(&mut self, mode: StartMode) -> Transition {
        if self.state != EngineState::Init {
            return self.ignore(QuizError::InvalidState(format!(
                "start in {:?}",
                self.state
            )));
        }

        match mode {
            StartMode::NewGame => {
                self.pool = self.catalog.all_ids();
                self.scores.current = 0;
                self.persist_current();
                self.scores.best = self.store.best();
                info!(samples = self.pool.len(), best = self.scores.best, "new game");
            }
            StartMode::Resume(pool) => {
                self.pool = pool;
                self.scores = Scores::new(self.store.current(), self.store.best());
                if self.scores.current > self.scores.best {
                    warn!(
                        current = self.scores.current,
                        best = self.scores.best,
                        "stored best below current, raising it"
                    );
                    self.scores.best = self.scores.current;
                    if let Err(e) = self.store.set_best(self.scores.best) {
                        warn!(error = %e, "failed to persist best score");
                    }
                }
                info!(
                    remaining = self.pool.len(),
                    current = self.scores.current,
                    best = self.scores.best,
                    "resumed game"
                );
            }
        }

        self.presenter.update_scores(self.scores);
        self.begin_question()
    }

    /// Answer the current question with the option at `index`
    pub fn pick(&mut self, index: usize) -> Transition {
        if self.state != EngineState::Questioning {
            return self.ignore(QuizError::InvalidPick {
                index,
                reason: format!("not accepting answers in {:?}", self.state),
            });
        }

        let Some(question) = self.question.as_ref() else {
            return self.ignore(QuizError::InvalidPick {
                index,
                reason: "no question on screen".to_string(),
            });
        };
        let Some(picked_id) = question.option(index) else {
            return self.ignore(QuizError::InvalidPick {
                index,
                reason: format!("only {} options", question.len()),
            });
        };
        let correct_id = question.correct_id();
        let correct_index = question.correct_index();

        if picked_id == correct_id {
            self.scores.current = self.scores.current.saturating_add(1);
            self.persist_current();
            if self.scores.current > self.scores.best {
                self.scores.best = self.scores.current;
                if let Err(e) = self.store.set_best(self.scores.best) {
                    warn!(error = %e, "failed to persist best score");
                }
            }
        }

        // The clip is retired whether or not the pick was right
        if let Some(pos) = self.pool.iter().position(|&id| id == correct_id) {
            self.pool.remove(pos);
        }

        self.presenter.reveal(correct_index, index);
        if let Some(sample) = self.catalog.get(correct_id) {
            self.presenter.set_artwork(&sample.artwork);
        }
        self.presenter.update_scores(self.scores);
        self.state = EngineState::Revealing;
        self.presenter.schedule_advance(self.reveal_delay);

        let reveal = Reveal {
            correct_index,
            picked_index: index,
            correct_id,
            picked_id,
            scores: self.scores,
        };
        debug!(
            correct = reveal.is_correct(),
            correct_id,
            picked_id,
            remaining = self.pool.len(),
            "answer revealed"
        );
        Transition::Revealed(reveal)
    }

    /// Move past the reveal. Called by the presenter when its timer fires.
    pub fn advance(&mut self) -> Transition {
        if self.state != EngineState::Revealing {
            return self.ignore(QuizError::InvalidState(format!(
                "advance in {:?}",
                self.state
            )));
        }

        self.stop_clip();
        self.question = None;
        self.begin_question()
    }

    /// Tear down: cancel the pending advance, stop and release the player
    pub fn dispose(&mut self) -> Transition {
        self.presenter.cancel_scheduled();
        if let Some(mut player) = self.player.take() {
            if let Err(e) = player.stop() {
                warn!(error = %e, "failed to stop player");
            }
            player.release();
        }
        self.question = None;
        self.state = EngineState::Ended;
        debug!("engine disposed");
        Transition::Ended(EndReason::Disposed)
    }

    /// Diagnostics callback from the media collaborator
    pub fn on_playback_state(&self, play_when_ready: bool, state: PlaybackState) {
        debug!(%state, play_when_ready, "player state changed");
    }

    /// Current state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Check if the engine is terminal
    pub fn is_ended(&self) -> bool {
        self.state == EngineState::Ended
    }

    /// Remaining pool, suitable for the hand-off slot
    pub fn pool(&self) -> &[SampleId] {
        &self.pool
    }

    /// Question on screen, if any
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Scores as the engine last saw them
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Configured reveal delay
    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    /// Catalog reference
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Score store reference
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Presenter reference
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutable presenter reference, for the presenter's own event loop
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Player reference, `None` after dispose
    pub fn player(&self) -> Option<&M> {
        self.player.as_ref()
    }

    /// Mutable player reference, for polling state reports
    pub fn player_mut(&mut self) -> Option<&mut M> {
        self.player.as_mut()
    }

    fn begin_question(&mut self) -> Transition {
        if self.pool.len() < MIN_POOL_SIZE {
            return self.finish_game();
        }

        let question = match self.questions.next_question(&self.pool) {
            Ok(question) => question,
            Err(QuizError::PoolExhausted { remaining }) => {
                debug!(remaining, "no distinct options left");
                return self.finish_game();
            }
            Err(e) => {
                warn!(error = %e, "question generation failed");
                self.presenter.show_error(&e.to_string());
                self.state = EngineState::Ended;
                self.question = None;
                return Transition::Ended(EndReason::Failed);
            }
        };

        let correct_id = question.correct_id();
        let uri = match self.catalog.get(correct_id) {
            Some(answer) => answer.uri.clone(),
            None => return self.fail_missing(correct_id),
        };

        let mut labels: [String; OPTION_SLOTS] = Default::default();
        for (slot, &id) in question.options().iter().enumerate() {
            match self.catalog.get(id) {
                Some(sample) => labels[slot] = sample.composer.clone(),
                None => return self.fail_missing(id),
            }
        }

        self.presenter.set_neutral_artwork();
        self.presenter.show_question(&labels, question.enabled_mask());
        if let Some(player) = self.player.as_mut() {
            if let Err(e) = player.play(&uri) {
                warn!(error = %e, uri = %uri, "failed to play clip");
            }
        }

        debug!(options = ?question.options(), correct_id, "question shown");
        self.state = EngineState::Questioning;
        self.question = Some(question.clone());
        Transition::Question(question)
    }

    fn finish_game(&mut self) -> Transition {
        self.state = EngineState::Ended;
        self.question = None;
        if !self.end_announced {
            self.end_announced = true;
            info!(
                score = self.scores.current,
                best = self.scores.best,
                "game over"
            );
            self.presenter.end_game(self.scores);
        }
        Transition::Ended(EndReason::Completed)
    }

    fn fail_missing(&mut self, id: SampleId) -> Transition {
        let err = QuizError::SampleNotFound(id);
        warn!(error = %err, "aborting question");
        self.presenter.show_error(&err.to_string());
        self.state = EngineState::Ended;
        self.question = None;
        Transition::Ended(EndReason::SampleNotFound(id))
    }

    fn persist_current(&mut self) {
        if let Err(e) = self.store.set_current(self.scores.current) {
            warn!(error = %e, "failed to persist current score");
        }
    }

    fn stop_clip(&mut self) {
        if let Some(player) = self.player.as_mut() {
            if let Err(e) = player.stop() {
                warn!(error = %e, "failed to stop player");
            }
        }
    }

    fn ignore(&self, err: QuizError) -> Transition {
        debug!(error = %err, "event ignored");
        Transition::Ignored(err)
    }
}
