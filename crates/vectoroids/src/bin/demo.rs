//! Headless demo: runs the full game with scripted input and a recording
//! renderer, then prints a summary. Useful as a smoke test and as a
//! minimal example of driving the game loop.

use vectoroids::{FrameLimiter, Game, GameConfig, InputState, Key, RecordingRenderer};

const FRAMES: u32 = 240;

fn main() {
    let config = GameConfig::default();
    let target_fps = config.target_fps;
    let mut game = Game::new(config).expect("world initialization");
    let mut limiter = FrameLimiter::new(target_fps);
    let mut renderer = RecordingRenderer::new();
    let mut input = InputState::new();

    for frame in 0..FRAMES {
        // Scripted flight: thrust for two seconds, bank right through the
        // middle of it, and tap fire twice a second.
        input.set(Key::Thrust, frame < 120);
        input.set(Key::TurnRight, (60..180).contains(&frame));
        input.set(Key::Fire, frame % 30 < 3);

        let dt = limiter.tick();
        game.advance(&input, dt).expect("frame step");
        game.render(&mut renderer);
    }

    let stats = game.stats();
    println!(
        "simulated {} frames: {} entities alive, {} draws last frame, {} lines presented",
        stats.frame,
        stats.entities,
        stats.draws,
        renderer.last_frame_lines()
    );
}
