//! Full frame-loop integration tests: the game driver, the systems and
//! the ECS underneath, run together over many frames.

use vectoroids::config::{AsteroidWave, GameConfig};
use vectoroids::{Game, InputState, Key, RecordingRenderer};
use vectoroids_core::Signature;
use vectoroids_shared::constants::{BULLET_LIFETIME, WINDOW_HEIGHT, WINDOW_WIDTH};

const DT: f32 = 1.0 / 60.0;

fn quiet_config() -> GameConfig {
    GameConfig {
        asteroid_waves: Vec::new(),
        ..GameConfig::default()
    }
}

#[test]
fn bullet_lives_and_dies_across_the_flush_boundary() {
    let mut game = Game::new(quiet_config()).unwrap();
    let mut input = InputState::new();

    // Flame + hull.
    assert_eq!(game.world().len(), 2);

    input.set(Key::Fire, true);
    game.advance(&input, DT).unwrap();
    assert_eq!(game.world().len(), 3, "press spawns one bullet");
    input.set(Key::Fire, false);

    // The bullet must survive every frame of its lifetime.
    let live_frames = (BULLET_LIFETIME / DT) as u32;
    for _ in 0..live_frames {
        game.advance(&input, DT).unwrap();
        assert!(game.world().len() >= 2);
    }

    // A few more frames: the lifetime expires, the mark lands, the next
    // flush removes it.
    for _ in 0..3 {
        game.advance(&input, DT).unwrap();
    }
    assert_eq!(game.world().len(), 2, "expired bullet flushed");
    assert!(game.world().store.columns_aligned());
}

#[test]
fn population_stays_aligned_under_sustained_fire() {
    let mut game = Game::new(GameConfig {
        asteroid_waves: vec![AsteroidWave { count: 6, scale: 2.5 }],
        ..GameConfig::default()
    })
    .unwrap();
    let mut input = InputState::new();
    input.set(Key::Thrust, true);

    // Tap fire every 10 frames for 3 seconds: bullets spawn and expire
    // continuously, exercising flushes with live survivors.
    for frame in 0u32..180 {
        input.set(Key::Fire, frame % 10 == 0);
        input.set(Key::TurnLeft, frame % 2 == 0);
        game.advance(&input, DT).unwrap();
        assert!(game.world().store.columns_aligned());
        // Flame, hull and asteroids never expire.
        assert!(game.world().len() >= 8);
    }

    // Stop firing and let every bullet die off.
    input.set(Key::Fire, false);
    for _ in 0..60 {
        game.advance(&input, DT).unwrap();
    }
    assert_eq!(game.world().len(), 8);
}

#[test]
fn positions_stay_inside_the_playfield() {
    let mut game = Game::new(GameConfig {
        rng_seed: 4,
        asteroid_waves: vec![AsteroidWave { count: 10, scale: 5.0 }],
        ..GameConfig::default()
    })
    .unwrap();
    let input = InputState::new();

    for _ in 0..600 {
        game.advance(&input, DT).unwrap();
    }

    let world = game.world_mut();
    let drifting = Signature::EMPTY
        .with(world.component_id::<vectoroids::components::Position>())
        .with(world.component_id::<vectoroids::components::Velocity>());
    let entities: Vec<usize> = world.matching(drifting).to_vec();
    assert!(!entities.is_empty());
    for e in entities {
        let position = world.store.get::<vectoroids::components::Position>(e).unwrap();
        assert!((0.0..=WINDOW_WIDTH).contains(&position.x), "{position:?}");
        assert!((0.0..=WINDOW_HEIGHT).contains(&position.y), "{position:?}");
    }
}

#[test]
fn same_seed_and_script_replays_identically() {
    let script = |frame: u32, input: &mut InputState| {
        input.set(Key::Thrust, frame % 40 < 20);
        input.set(Key::TurnRight, frame % 60 < 30);
        input.set(Key::Fire, frame % 25 == 0);
    };

    let run = || {
        let mut game = Game::new(GameConfig {
            rng_seed: 77,
            ..GameConfig::default()
        })
        .unwrap();
        let mut input = InputState::new();
        for frame in 0..200 {
            script(frame, &mut input);
            game.advance(&input, DT).unwrap();
        }
        let mut renderer = RecordingRenderer::new();
        game.render(&mut renderer);
        (game.world().len(), renderer.lines().to_vec())
    };

    let (entities_a, lines_a) = run();
    let (entities_b, lines_b) = run();
    assert_eq!(entities_a, entities_b);
    assert_eq!(lines_a, lines_b);
}

#[test]
fn render_output_reflects_thrust_flame() {
    let mut game = Game::new(quiet_config()).unwrap();
    let mut input = InputState::new();
    let mut renderer = RecordingRenderer::new();

    game.advance(&input, DT).unwrap();
    game.render(&mut renderer);
    let idle_lines = renderer.last_frame_lines();

    input.set(Key::Thrust, true);
    game.advance(&input, DT).unwrap();
    game.render(&mut renderer);
    let thrusting_lines = renderer.last_frame_lines();

    // The flame polyline (5 points, 4 segments) appears while thrusting.
    assert_eq!(thrusting_lines, idle_lines + 4);
}
