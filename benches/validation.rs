use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rummy_engine::{
    parse_tiles, ActionKind, ActionRequest, Combination, Game, GameBuilder, RulesConfig,
};

/// Helper to create a started game with a fixed seed
fn setup_game(n_players: usize) -> Game {
    let names: Vec<String> = (0..n_players).map(|i| format!("player{i}")).collect();
    let mut game = GameBuilder::new().players(names).seed(42).build().unwrap();
    game.start().unwrap();
    game
}

/// Benchmark validation of plain groups and runs
fn bench_validate_plain(c: &mut Criterion) {
    let config = RulesConfig::default();
    let group = parse_tiles("k7 r7 b7 o7").unwrap();
    let run = parse_tiles("b1 b2 b3 b4 b5 b6 b7 b8 b9 b10 b11 b12 b13").unwrap();

    c.bench_function("validate_group", |b| {
        b.iter(|| Combination::validate(black_box(group.clone()), &config));
    });
    c.bench_function("validate_long_run", |b| {
        b.iter(|| Combination::validate(black_box(run.clone()), &config));
    });
}

/// Benchmark runs with jokers in gaps and at the ends
fn bench_validate_jokers(c: &mut Criterion) {
    let config = RulesConfig::default();
    let mut group = c.benchmark_group("validate_jokers");

    for text in ["r9 J r11", "J J r12 r13", "o1 J o3 o4 J", "k5 J k7 k9"] {
        let tiles = parse_tiles(text).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(text), &tiles, |b, tiles| {
            b.iter(|| Combination::validate(black_box(tiles.clone()), &config));
        });
    }

    group.finish();
}

/// Benchmark a full pass round, including the penalty draws
fn bench_pass_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("pass_round");

    for n_players in [2, 4] {
        group.bench_with_input(
            BenchmarkId::from_parameter(n_players),
            &n_players,
            |b, &n_players| {
                b.iter_batched(
                    || setup_game(n_players),
                    |mut game| {
                        for _ in 0..n_players {
                            let player = game.current_player().unwrap().to_string();
                            let pass = ActionRequest::new(player, ActionKind::Pass);
                            game.handle_action(&pass).unwrap();
                        }
                        game
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark state snapshot generation
fn bench_state_json(c: &mut Criterion) {
    let game = setup_game(4);

    c.bench_function("current_state_json", |b| {
        b.iter(|| game.current_state_json(black_box("player0")).unwrap());
    });
}

criterion_group!(validation, bench_validate_plain, bench_validate_jokers);

criterion_group!(game_operations, bench_pass_round, bench_state_json);

criterion_main!(validation, game_operations);
