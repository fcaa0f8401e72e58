//! Game session layer
//!
//! Wires the physics world to the merge rule and owns everything the engine
//! deliberately does not: drop selection and cooldown, the danger-line
//! game-over scan, resize rescaling, and restarts. Drives exactly one engine
//! step per tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::fruits::{FRUITS, MAX_DROP_LEVEL};
use crate::score::ScoreBoard;
use crate::sim::{Body, BodyId, Burst, BurstQueue, MergeController, PhysicsWorld, SpawnOptions};

type Controller = MergeController<ScoreBoard, BurstQueue>;

/// One playable session
#[derive(Debug)]
pub struct Game {
    world: PhysicsWorld<Controller>,
    rng: Pcg32,
    current_level: usize,
    next_level: usize,
    drop_cooldown: u32,
    game_over: bool,
}

impl Game {
    /// Seeded construction: the same seed replays the same fruit sequence
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let current_level = rng.random_range(0..=MAX_DROP_LEVEL);
        let next_level = rng.random_range(0..=MAX_DROP_LEVEL);
        log::info!("New game {width}x{height}, seed {seed}");

        Self {
            world: PhysicsWorld::new(
                width,
                height,
                MergeController::new(ScoreBoard::new(), BurstQueue::new()),
            ),
            rng,
            current_level,
            next_level,
            drop_cooldown: 0,
            game_over: false,
        }
    }

    /// Advance one frame: engine step, cooldown countdown, game-over scan
    pub fn tick(&mut self) {
        if self.game_over {
            return;
        }
        self.world.step(1.0);
        self.drop_cooldown = self.drop_cooldown.saturating_sub(1);
        self.check_game_over();
    }

    /// Drop the current fruit at horizontal position `x` (clamped to keep
    /// the fruit inside the walls). Returns the spawned body, or `None`
    /// while the cooldown is running or the run has ended.
    pub fn drop_fruit(&mut self, x: f32) -> Option<BodyId> {
        if self.game_over || self.drop_cooldown > 0 {
            return None;
        }

        let fruit = &FRUITS[self.current_level];
        let x = x.clamp(fruit.radius, self.world.width - fruit.radius);
        let id = self.world.spawn_body(
            Vec2::new(x, fruit.radius + DROP_SPAWN_CLEARANCE),
            fruit.radius,
            self.current_level,
            SpawnOptions::default(),
        );

        self.drop_cooldown = DROP_COOLDOWN_TICKS;
        self.current_level = self.next_level;
        self.next_level = self.rng.random_range(0..=MAX_DROP_LEVEL);
        Some(id)
    }

    pub fn can_drop(&self) -> bool {
        !self.game_over && self.drop_cooldown == 0
    }

    /// Level of the fruit the next `drop` will spawn
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// Preview of the fruit after that
    pub fn next_level(&self) -> usize {
        self.next_level
    }

    /// Update world bounds and rescale existing body positions to match
    pub fn resize(&mut self, width: f32, height: f32) {
        let sx = width / self.world.width;
        let sy = height / self.world.height;
        self.world.resize(width, height);
        for body in self.world.bodies_mut().iter_mut() {
            body.pos.x *= sx;
            body.pos.y *= sy;
        }
    }

    /// Start a fresh run, keeping the best score and the fruit sequence RNG
    pub fn restart(&mut self) {
        let width = self.world.width;
        let height = self.world.height;
        let mut board = self.world.sink().score().clone();
        board.reset_run();

        self.world = PhysicsWorld::new(width, height, MergeController::new(board, BurstQueue::new()));
        self.current_level = self.rng.random_range(0..=MAX_DROP_LEVEL);
        self.next_level = self.rng.random_range(0..=MAX_DROP_LEVEL);
        self.drop_cooldown = 0;
        self.game_over = false;
        log::info!("Game restarted");
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u64 {
        self.world.sink().score().score()
    }

    pub fn best_score(&self) -> u64 {
        self.world.sink().score().best()
    }

    pub fn score_board(&self) -> &ScoreBoard {
        self.world.sink().score()
    }

    /// Queued decorative bursts for the rendering collaborator
    pub fn drain_bursts(&mut self) -> Vec<Burst> {
        self.world.sink_mut().effects_mut().drain()
    }

    /// Live bodies, for rendering extraction
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.world.bodies().iter()
    }

    pub fn world(&self) -> &PhysicsWorld<Controller> {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld<Controller> {
        &mut self.world
    }

    /// A settled fruit poking above the danger line ends the run after a
    /// grace period. The timer lives on the body but belongs to this layer;
    /// the engine never touches it.
    fn check_game_over(&mut self) {
        let mut over = false;
        for body in self.world.bodies_mut().iter_mut() {
            if body.is_static {
                continue;
            }
            if body.pos.y - body.radius < DANGER_LINE_Y && body.settled {
                body.danger_ticks += 1;
                if body.danger_ticks > GAME_OVER_GRACE_TICKS {
                    over = true;
                }
            } else {
                body.danger_ticks = 0;
            }
        }
        if over && !self.game_over {
            self.game_over = true;
            log::info!("Game over at {} points", self.score());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ScoreSink;

    #[test]
    fn test_seeded_games_deal_identical_fruit() {
        let mut a = Game::new(300.0, 640.0, 7);
        let mut b = Game::new(300.0, 640.0, 7);

        for _ in 0..20 {
            assert_eq!(a.current_level(), b.current_level());
            assert_eq!(a.next_level(), b.next_level());
            a.drop_fruit(150.0);
            b.drop_fruit(150.0);
            for _ in 0..DROP_COOLDOWN_TICKS {
                a.tick();
                b.tick();
            }
        }
    }

    #[test]
    fn test_drop_levels_within_cap() {
        let mut game = Game::new(300.0, 640.0, 99);
        for _ in 0..50 {
            assert!(game.current_level() <= MAX_DROP_LEVEL);
            game.drop_fruit(150.0);
            for _ in 0..DROP_COOLDOWN_TICKS {
                game.tick();
            }
        }
    }

    #[test]
    fn test_drop_cooldown_gates_spam() {
        let mut game = Game::new(300.0, 640.0, 1);

        assert!(game.drop_fruit(150.0).is_some());
        assert!(!game.can_drop());
        assert!(game.drop_fruit(150.0).is_none(), "second drop inside cooldown");

        for _ in 0..DROP_COOLDOWN_TICKS {
            game.tick();
        }
        assert!(game.can_drop());
        assert!(game.drop_fruit(150.0).is_some());
    }

    #[test]
    fn test_drop_clamps_to_walls() {
        let mut game = Game::new(300.0, 640.0, 1);
        let radius = FRUITS[game.current_level()].radius;

        let id = game.drop_fruit(-50.0).unwrap();
        let body = game.world().bodies().get(id).unwrap();
        assert_eq!(body.pos.x, radius);
        assert_eq!(body.pos.y, radius + DROP_SPAWN_CLEARANCE);
    }

    #[test]
    fn test_quiet_floor_never_ends_game() {
        let mut game = Game::new(300.0, 640.0, 3);
        game.drop_fruit(150.0);
        for _ in 0..600 {
            game.tick();
        }
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_settled_fruit_above_danger_line_ends_game() {
        // Shallow world: the floor itself sits above the danger line, so a
        // resting fruit starts the grace timer as soon as it settles
        let mut game = Game::new(300.0, 70.0, 3);
        game.world_mut().spawn_body(
            Vec2::new(150.0, 40.0),
            15.0,
            0,
            SpawnOptions::default(),
        );

        let mut ticks = 0;
        while !game.is_game_over() && ticks < 600 {
            game.tick();
            ticks += 1;
        }
        assert!(game.is_game_over());
        // Needs the settle time plus the full grace period
        assert!(ticks > GAME_OVER_GRACE_TICKS);
        assert!(game.drop_fruit(150.0).is_none(), "drops rejected after game over");
    }

    #[test]
    fn test_danger_timer_resets_when_body_disturbed() {
        // Shallow world again: a resting fruit accrues danger ticks
        let mut game = Game::new(300.0, 70.0, 3);
        let id = game.world_mut().spawn_body(
            Vec2::new(150.0, 40.0),
            15.0,
            0,
            SpawnOptions::default(),
        );

        // Let it settle and burn a good chunk of the grace period
        for _ in 0..150 {
            game.tick();
        }
        let accrued = game.world().bodies().get(id).unwrap().danger_ticks;
        assert!(accrued > 0);
        assert!(!game.is_game_over());

        // Knock it out of the settled state; the timer restarts from zero
        game.world_mut().bodies_mut().get_mut(id).unwrap().vel = Vec2::new(8.0, -5.0);
        game.tick();
        assert_eq!(game.world().bodies().get(id).unwrap().danger_ticks, 0);

        // Well past the original grace deadline the run is still alive
        for _ in 0..60 {
            game.tick();
        }
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_resize_rescales_positions() {
        let mut game = Game::new(300.0, 600.0, 5);
        let id = game.world_mut().spawn_body(
            Vec2::new(100.0, 200.0),
            15.0,
            0,
            SpawnOptions::default(),
        );

        game.resize(600.0, 300.0);
        let body = game.world().bodies().get(id).unwrap();
        assert_eq!(body.pos, Vec2::new(200.0, 100.0));
        assert_eq!(game.world().width, 600.0);
        assert_eq!(game.world().height, 300.0);
    }

    #[test]
    fn test_restart_keeps_best_clears_run() {
        let mut game = Game::new(300.0, 640.0, 5);
        game.world_mut().sink_mut().score_mut().add_score(40);
        assert_eq!(game.score(), 40);

        game.restart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.best_score(), 40);
        assert!(!game.is_game_over());
        assert_eq!(game.world().bodies().len(), 0);
    }

    #[test]
    fn test_merge_feeds_session_score() {
        let mut game = Game::new(300.0, 640.0, 5);
        // Park two cherries overlapping near the floor
        game.world_mut().spawn_body(Vec2::new(150.0, 620.0), 15.0, 0, SpawnOptions::default());
        game.world_mut().spawn_body(Vec2::new(160.0, 620.0), 15.0, 0, SpawnOptions::default());

        game.tick();
        assert_eq!(game.score(), FRUITS[1].points as u64);
        let bursts = game.drain_bursts();
        assert_eq!(bursts.len(), 1);
    }
}
