//! Headless demo driver
//!
//! Runs a seeded session with scripted drops and prints the final score.
//! Useful for watching merge behavior in the logs without a renderer:
//! `RUST_LOG=info cargo run -- 42`

use fruitfall::Game;

const WIDTH: f32 = 360.0;
const HEIGHT: f32 = 640.0;
const MAX_TICKS: u32 = 7200; // two minutes at 60 Hz

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    log::info!("Fruitfall (headless) starting, seed {seed}");

    let mut game = Game::new(WIDTH, HEIGHT, seed);
    let mut ticks = 0;

    while ticks < MAX_TICKS && !game.is_game_over() {
        if game.can_drop() {
            // Sweep the drop point back and forth across the well
            let phase = (ticks as f32 * 0.011).sin() * 0.5 + 0.5;
            game.drop_fruit(40.0 + (WIDTH - 80.0) * phase);
        }
        game.tick();
        // A renderer would consume these; the demo discards them
        let _ = game.drain_bursts();
        ticks += 1;
    }

    log::info!(
        "Finished after {} ticks with {} live bodies",
        ticks,
        game.world().bodies().len()
    );
    match serde_json::to_string_pretty(game.score_board()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Score serialization failed: {err}"),
    }
}
