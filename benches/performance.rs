// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for the quiz core
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Question generation across pool sizes
//! - A complete game through the engine
//! - Catalog parsing

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::time::Duration;

use composer_quiz::catalog::{Catalog, Sample, SampleId};
use composer_quiz::media::NullPlayer;
use composer_quiz::quiz::{EngineState, QuestionGenerator, QuizEngine, StartMode};
use composer_quiz::score::MemoryScoreStore;
use composer_quiz::ui::TerminalPresenter;

fn catalog(size: u32) -> Catalog {
    let samples = (1..=size)
        .map(|id| {
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

/// Benchmark drawing one question (the per-turn hot path)
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for size in [4u32, 100, 10_000].iter() {
        let pool: Vec<SampleId> = (1..=*size).collect();
        let mut generator = QuestionGenerator::seeded(42);
        group.bench_with_input(BenchmarkId::from_parameter(size), &pool, |b, pool| {
            b.iter(|| black_box(generator.generate(black_box(pool)).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark a full game answering every question correctly
fn bench_full_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_game");

    for size in [10u32, 200].iter() {
        let catalog = catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter_batched(
                || {
                    QuizEngine::new(
                        catalog,
                        MemoryScoreStore::new(),
                        QuestionGenerator::seeded(7),
                        TerminalPresenter::new(),
                        NullPlayer::new(),
                    )
                    .with_reveal_delay(Duration::ZERO)
                },
                |mut engine| {
                    engine.start(StartMode::NewGame);
                    while engine.state() == EngineState::Questioning {
                        let correct = engine.question().map(|q| q.correct_index()).unwrap_or(0);
                        engine.pick(correct);
                        engine.advance();
                    }
                    black_box(engine.scores())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Benchmark parsing the built-in catalog
fn bench_catalog_parse(c: &mut Criterion) {
    c.bench_function("catalog_builtin", |b| {
        b.iter(|| black_box(Catalog::builtin().unwrap().len()))
    });
}

criterion_group!(benches, bench_generate, bench_full_game, bench_catalog_parse);
criterion_main!(benches);
