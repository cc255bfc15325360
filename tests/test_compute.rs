use flappy_term::compute::*;
use flappy_term::config::Physics;
use flappy_term::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn quiet() -> Physics {
    Physics::default().with_spawn_chance(0.0)
}

fn make_state(physics: Physics) -> GameSession {
    init_session(physics)
}

fn pipe_at(x: f64, top_height: f64) -> Pipe {
    Pipe {
        x,
        ..Pipe::with_top_height(&Physics::default(), top_height)
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── init_session ─────────────────────────────────────────────────────────────

#[test]
fn init_session_is_fresh() {
    let s = init_session(Physics::default());
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Alive);
    assert!(s.pipes.is_empty());
    assert_eq!(s.bird, Bird::new(&Physics::default()));
    assert_eq!(s.physics.gravity, 1.1);
}

// ── jump ──────────────────────────────────────────────────────────────────────

#[test]
fn jump_sets_impulse() {
    let s = make_state(quiet());
    let s2 = jump(&s);
    assert_eq!(s2.bird.velocity, -10.0);
    assert_eq!(s2.bird.y, s.bird.y);
}

#[test]
fn jump_does_not_mutate_original() {
    let s = make_state(quiet());
    let _s2 = jump(&s);
    assert_eq!(s.bird.velocity, 0.0);
}

#[test]
fn jump_ignored_after_game_over() {
    let mut s = make_state(quiet());
    s.status = GameStatus::GameOver;
    s.bird.velocity = 3.0;
    let s2 = jump(&s);
    assert_eq!(s2.bird.velocity, 3.0);
}

#[test]
fn jump_then_tick_moves_up() {
    let s = jump(&make_state(quiet()));
    let s2 = tick(&s, &mut seeded_rng());
    assert!(approx(s2.bird.velocity, -8.9));
    assert!(approx(s2.bird.y, 226.1));
}

// ── maybe_spawn ──────────────────────────────────────────────────────────────

#[test]
fn spawn_chance_zero_never_spawns() {
    let mut rng = seeded_rng();
    let mut pipes = Vec::new();
    for _ in 0..1_000 {
        maybe_spawn(&mut pipes, &quiet(), &mut rng);
    }
    assert!(pipes.is_empty());
}

#[test]
fn spawn_chance_one_always_spawns() {
    let physics = Physics::default().with_spawn_chance(1.0);
    let mut rng = seeded_rng();
    let mut pipes = Vec::new();
    for _ in 0..50 {
        maybe_spawn(&mut pipes, &physics, &mut rng);
    }
    assert_eq!(pipes.len(), 50);
    assert!(pipes.iter().all(|p| p.x == 320.0));
}

#[test]
fn default_spawn_rate_is_about_one_percent() {
    let physics = Physics::default();
    let mut rng = seeded_rng();
    let mut pipes = Vec::new();
    for _ in 0..100_000 {
        maybe_spawn(&mut pipes, &physics, &mut rng);
    }
    // Expected 1000, standard deviation ≈ 31
    assert!(
        (800..=1200).contains(&pipes.len()),
        "spawned {} pipes",
        pipes.len()
    );
}

// ── update_and_prune ─────────────────────────────────────────────────────────

#[test]
fn update_and_prune_moves_every_pipe() {
    let bird = Bird::new(&Physics::default());
    let pipes = vec![pipe_at(300.0, 100.0), pipe_at(200.0, 50.0)];
    let (kept, step) = update_and_prune(&pipes, &bird, 1.0);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].x, 299.0);
    assert_eq!(kept[1].x, 199.0);
    assert_eq!(step, StreamStep::default());
}

#[test]
fn adjacent_off_screen_pipes_are_all_pruned() {
    let bird = Bird::new(&Physics::default());
    let pipes = vec![
        pipe_at(-50.5, 10.0),
        pipe_at(-50.2, 20.0),
        pipe_at(100.0, 30.0),
        pipe_at(-60.0, 40.0),
    ];
    let (kept, step) = update_and_prune(&pipes, &bird, 1.0);
    assert_eq!(step.pruned, 3);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].top_height, 30.0);
}

#[test]
fn update_and_prune_keeps_spawn_order() {
    let bird = Bird::new(&Physics::default());
    let pipes = vec![
        pipe_at(250.0, 1.0),
        pipe_at(-55.0, 2.0),
        pipe_at(280.0, 3.0),
        pipe_at(310.0, 4.0),
    ];
    let (kept, _) = update_and_prune(&pipes, &bird, 1.0);
    let tops: Vec<f64> = kept.iter().map(|p| p.top_height).collect();
    assert_eq!(tops, vec![1.0, 3.0, 4.0]);
}

#[test]
fn update_and_prune_counts_every_collision() {
    let bird = Bird {
        y: 20.0,
        ..Bird::new(&Physics::default())
    };
    let pipes = vec![pipe_at(41.0, 100.0), pipe_at(61.0, 100.0), pipe_at(200.0, 100.0)];
    let (kept, step) = update_and_prune(&pipes, &bird, 1.0);
    assert_eq!(step.collisions, 2);
    assert_eq!(kept.len(), 3);
}

#[test]
fn collision_is_tested_after_moving() {
    let bird = Bird {
        y: 0.0,
        ..Bird::new(&Physics::default())
    };
    // Left edge at 80 touches the bird's right edge; one step closes in
    let (_, step) = update_and_prune(&[pipe_at(80.0, 100.0)], &bird, 1.0);
    assert_eq!(step.collisions, 1);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_advances_bird_and_frame() {
    let s = make_state(quiet());
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.frame, 1);
    assert!(approx(s2.bird.velocity, 1.1));
    assert!(approx(s2.bird.y, 236.1));
    assert!(s2.pipes.is_empty());
    assert_eq!(s2.status, GameStatus::Alive);
}

#[test]
fn tick_does_not_mutate_original() {
    let mut s = make_state(quiet());
    s.pipes.push(pipe_at(200.0, 100.0));
    let _s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s.frame, 0);
    assert_eq!(s.bird.y, 235.0);
    assert_eq!(s.pipes[0].x, 200.0);
}

#[test]
fn freshly_spawned_pipe_moves_in_the_same_frame() {
    let s = make_state(Physics::default().with_spawn_chance(1.0));
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.pipes.len(), 1);
    assert_eq!(s2.pipes[0].x, 319.0);
}

#[test]
fn score_counts_pruned_pipes() {
    let mut s = make_state(quiet());
    s.pipes = vec![pipe_at(-50.5, 10.0), pipe_at(-50.0, 20.0), pipe_at(150.0, 100.0)];
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.score, 2);
    assert_eq!(s2.pipes.len(), 1);
    assert_eq!(s2.status, GameStatus::Alive);
}

#[test]
fn pipe_at_the_edge_is_pruned_one_frame_later() {
    let mut s = make_state(quiet());
    s.pipes = vec![pipe_at(-49.0, 10.0)];
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.pipes[0].x, -50.0);
    assert_eq!(s2.score, 0);
    let s3 = tick(&s2, &mut seeded_rng());
    assert!(s3.pipes.is_empty());
    assert_eq!(s3.score, 1);
}

#[test]
fn score_never_changes_on_spawn() {
    let mut s = make_state(Physics::default().with_spawn_chance(1.0));
    let mut rng = seeded_rng();
    for _ in 0..10 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.pipes.len(), 10);
    assert_eq!(s.score, 0);
}

#[test]
fn score_never_changes_on_collision() {
    let mut s = make_state(quiet());
    s.bird.y = 300.0; // below a gap spanning [0, 250)
    s.pipes = vec![pipe_at(45.0, 0.0)];
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.score, 0);
}

#[test]
fn collision_and_prune_in_the_same_frame() {
    let mut s = make_state(quiet());
    s.bird.y = 10.0;
    s.pipes = vec![pipe_at(-50.5, 10.0), pipe_at(60.0, 100.0)];
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.score, 1);
}

#[test]
fn several_overlapping_pipes_end_the_session_once() {
    let mut s = make_state(quiet());
    s.bird.y = 10.0;
    s.pipes = vec![pipe_at(41.0, 100.0), pipe_at(51.0, 100.0), pipe_at(61.0, 100.0)];
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.frame, 1);

    // Terminal: further ticks change nothing
    let s3 = tick(&s2, &mut seeded_rng());
    assert_eq!(s3.status, GameStatus::GameOver);
    assert_eq!(s3.frame, 1);
    assert_eq!(s3.bird, s2.bird);
    assert_eq!(s3.pipes, s2.pipes);
}

#[test]
fn bird_in_gap_survives_pipe_passing() {
    let mut s = make_state(quiet());
    // Gap [150, 400) holds the bird for its first ten frames of falling
    s.pipes = vec![pipe_at(85.0, 150.0)];
    let mut rng = seeded_rng();
    for _ in 0..10 {
        s = tick(&s, &mut rng);
        assert_eq!(s.status, GameStatus::Alive);
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let physics = Physics::default().with_spawn_chance(0.2);
    let run = || {
        let mut rng = StdRng::seed_from_u64(99);
        let mut s = init_session(physics);
        for i in 0..100 {
            if i % 12 == 0 {
                s = jump(&s);
            }
            s = tick(&s, &mut rng);
        }
        s
    };
    let a = run();
    let b = run();
    assert_eq!(a.pipes, b.pipes);
    assert_eq!(a.bird, b.bird);
    assert_eq!(a.status, b.status);
}
