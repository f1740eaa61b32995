// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Property-based tests for question generation and engine transitions.

use std::collections::HashSet;

use proptest::prelude::*;

use composer_quiz::catalog::{Catalog, Sample, SampleId};
use composer_quiz::media::NullPlayer;
use composer_quiz::quiz::{
    EngineState, QuestionGenerator, QuizEngine, Scores, StartMode, Transition, OPTION_SLOTS,
};
use composer_quiz::score::MemoryScoreStore;
use composer_quiz::ui::TerminalPresenter;

// =============================================================================
// Strategies
// =============================================================================

/// Distinct ids in 1..=200, in arbitrary order
fn arb_pool(min: usize, max: usize) -> impl Strategy<Value = Vec<SampleId>> {
    prop::collection::hash_set(1u32..=200, min..=max)
        .prop_map(|ids| ids.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// (current, best) with best >= current
fn arb_scores() -> impl Strategy<Value = (u32, u32)> {
    (0u32..1000, 0u32..1000).prop_map(|(current, extra)| (current, current + extra))
}

fn catalog_for(pool: &[SampleId]) -> Catalog {
    let samples = pool
        .iter()
        .map(|&id| {
            Sample::new(
                id,
                format!("Composer {}", id),
                format!("clips/{}.ogg", id),
                format!("art{}", id),
            )
        })
        .collect();
    Catalog::new(samples).unwrap()
}

type PropEngine = QuizEngine<Catalog, MemoryScoreStore, QuestionGenerator, TerminalPresenter, NullPlayer>;

fn resumed_engine(pool: &[SampleId], scores: (u32, u32), seed: u64) -> PropEngine {
    let mut engine = QuizEngine::new(
        catalog_for(pool),
        MemoryScoreStore::with_scores(scores.0, scores.1),
        QuestionGenerator::seeded(seed),
        TerminalPresenter::new(),
        NullPlayer::new(),
    );
    engine.start(StartMode::Resume(pool.to_vec()));
    engine
}

// =============================================================================
// Generator
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_large_pool_gives_four_distinct_options(pool in arb_pool(4, 60), seed in any::<u64>()) {
        let question = QuestionGenerator::seeded(seed).generate(&pool).unwrap();

        prop_assert_eq!(question.len(), OPTION_SLOTS);
        let distinct: HashSet<_> = question.options().iter().collect();
        prop_assert_eq!(distinct.len(), OPTION_SLOTS);
        prop_assert!(question.options().iter().all(|id| pool.contains(id)));
        prop_assert!(question.options().contains(&question.correct_id()));
    }

    #[test]
    fn prop_short_pool_uses_every_id(pool in arb_pool(2, 3), seed in any::<u64>()) {
        let question = QuestionGenerator::seeded(seed).generate(&pool).unwrap();

        prop_assert_eq!(question.len(), pool.len());
        let options: HashSet<_> = question.options().iter().copied().collect();
        let expected: HashSet<_> = pool.iter().copied().collect();
        prop_assert_eq!(options, expected);
        prop_assert!(question.correct_index() < pool.len());
    }

    #[test]
    fn prop_generation_is_reproducible(pool in arb_pool(2, 40), seed in any::<u64>()) {
        let mut a = QuestionGenerator::seeded(seed);
        let mut b = QuestionGenerator::seeded(seed);
        for _ in 0..5 {
            prop_assert_eq!(a.generate(&pool).unwrap(), b.generate(&pool).unwrap());
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_answer_retires_correct_id(
        pool in arb_pool(2, 30),
        scores in arb_scores(),
        seed in any::<u64>(),
        slot in 0usize..OPTION_SLOTS,
    ) {
        let mut engine = resumed_engine(&pool, scores, seed);
        let question = engine.question().unwrap().clone();
        let slot = slot % question.len();

        let Transition::Revealed(reveal) = engine.pick(slot) else {
            return Err(TestCaseError::fail("pick was not revealed"));
        };
        prop_assert_eq!(engine.pool().len(), pool.len() - 1);
        prop_assert!(!engine.pool().contains(&reveal.correct_id));
    }

    #[test]
    fn prop_score_follows_correctness(
        pool in arb_pool(2, 30),
        scores in arb_scores(),
        seed in any::<u64>(),
        slot in 0usize..OPTION_SLOTS,
    ) {
        let mut engine = resumed_engine(&pool, scores, seed);
        let slot = slot % engine.question().unwrap().len();
        let before = engine.scores();

        let Transition::Revealed(reveal) = engine.pick(slot) else {
            return Err(TestCaseError::fail("pick was not revealed"));
        };
        let after = engine.scores();
        if reveal.is_correct() {
            prop_assert_eq!(after.current, before.current + 1);
        } else {
            prop_assert_eq!(after.current, before.current);
        }
        prop_assert_eq!(after.best, before.best.max(after.current));
    }

    #[test]
    fn prop_whole_game_keeps_best_at_max(
        pool in arb_pool(2, 20),
        scores in arb_scores(),
        seed in any::<u64>(),
        picks in prop::collection::vec(0usize..OPTION_SLOTS, 20),
    ) {
        let mut engine = resumed_engine(&pool, scores, seed);
        let mut picks = picks.into_iter();

        while engine.state() == EngineState::Questioning {
            let before: Scores = engine.scores();
            let slot = picks.next().unwrap_or(0) % engine.question().unwrap().len();
            engine.pick(slot);
            let after = engine.scores();
            prop_assert_eq!(after.best, before.best.max(after.current));
            engine.advance();
        }

        prop_assert_eq!(engine.state(), EngineState::Ended);
        prop_assert_eq!(engine.pool().len(), 1);
        prop_assert_eq!(engine.presenter().view().game_over, Some(engine.scores()));
    }

    #[test]
    fn prop_any_stored_scores_keep_best_at_least_current(
        pool in arb_pool(2, 12),
        current in prop_oneof![any::<u32>(), Just(u32::MAX)],
        best in prop_oneof![any::<u32>(), Just(u32::MAX)],
        seed in any::<u64>(),
        slot in 0usize..OPTION_SLOTS,
    ) {
        let mut engine = resumed_engine(&pool, (current, best), seed);
        let started = engine.scores();
        prop_assert!(started.best >= started.current);
        prop_assert_eq!(started.best, best.max(current));

        let slot = slot % engine.question().unwrap().len();
        engine.pick(slot);
        let after = engine.scores();
        prop_assert!(after.best >= after.current);
        prop_assert_eq!(after.best, started.best.max(after.current));
    }

    #[test]
    fn prop_picks_ignored_while_revealing(
        pool in arb_pool(2, 30),
        seed in any::<u64>(),
        extra in prop::collection::vec(any::<usize>(), 1..8),
    ) {
        let mut engine = resumed_engine(&pool, (0, 0), seed);
        engine.pick(0);
        let pool_after = engine.pool().to_vec();
        let scores_after = engine.scores();

        for slot in extra {
            prop_assert!(matches!(engine.pick(slot), Transition::Ignored(_)));
        }
        prop_assert_eq!(engine.state(), EngineState::Revealing);
        prop_assert_eq!(engine.pool(), pool_after.as_slice());
        prop_assert_eq!(engine.scores(), scores_after);
    }

    #[test]
    fn prop_picks_ignored_when_ended(
        pool in arb_pool(2, 10),
        seed in any::<u64>(),
        extra in prop::collection::vec(any::<usize>(), 1..8),
    ) {
        let mut engine = resumed_engine(&pool, (0, 0), seed);
        engine.dispose();
        let pool_after = engine.pool().to_vec();

        for slot in extra {
            prop_assert!(matches!(engine.pick(slot), Transition::Ignored(_)));
        }
        prop_assert_eq!(engine.state(), EngineState::Ended);
        prop_assert_eq!(engine.pool(), pool_after.as_slice());
    }
}
