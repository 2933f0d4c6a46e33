//! The Start → Playing → GameOver state machine.
//!
//! Exactly one state is active. Each state reacts to input, advances the
//! session on update and picks the status text for the frame. Transitions
//! replace the active state outright.

use super::session::Game;
use crate::config::{CollisionPolicy, GameMode};
use crate::io::{GameInput, KeySource, Renderer};
use crate::world::{advance_world, collides, collides_pipe};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Mode selection screen. Initial state.
    Start,
    /// A life in progress.
    Playing,
    /// Crashed; the world is frozen on the death frame.
    GameOver { final_score: u32 },
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Playing => "playing",
            Self::GameOver { .. } => "game over",
        }
    }

    pub fn handle_input<K: KeySource, R: Renderer>(self, game: &mut Game<K, R>, input: GameInput) {
        match (self, input) {
            (_, GameInput::Quit) => game.stop(),

            (Self::Start, GameInput::SelectMode(mode)) => {
                game.mode = mode;
            }
            (Self::Start, GameInput::Space) => {
                game.spawner = game.mode.spawner();
                game.reset_world();
                game.set_state(Self::Playing);
                // Launch upward on entry
                game.flap();
            }

            (Self::Playing, GameInput::Space) => game.flap(),

            (Self::GameOver { .. }, GameInput::Restart) => {
                game.reset_world();
                game.set_state(Self::Start);
            }

            _ => {}
        }
    }

    pub fn update<K: KeySource, R: Renderer>(self, game: &mut Game<K, R>) {
        if self == Self::Playing {
            update_playing(game);
        }
    }

    /// Status text shown under the score.
    pub fn message(&self, mode: GameMode) -> String {
        let mode_name = mode.name().to_uppercase();
        match self {
            Self::Start => format!(
                "Mode: {}\n1=Easy 2=Medium 3=Hard | SPACE to play | Q to quit",
                mode_name
            ),
            Self::Playing => format!("Mode: {} | SPACE to flap | Q to quit", mode_name),
            Self::GameOver { final_score } => format!(
                "GAME OVER | Score: {} | R to restart | Q to quit",
                final_score
            ),
        }
    }

    pub fn render<K: KeySource, R: Renderer>(self, game: &mut Game<K, R>) -> io::Result<()> {
        let message = self.message(game.mode);
        game.renderer.render(&game.world, &message)
    }
}

/// One tick of play: maybe spawn, advance, then check for a crash.
fn update_playing<K: KeySource, R: Renderer>(game: &mut Game<K, R>) {
    if game.spawner.should_spawn(game.tick, &game.world) {
        let pipe = game.spawner.make_pipe(&game.world, &mut game.rng);
        log::debug!(
            "tick {}: pipe at x={} gap {}..{}",
            game.tick,
            pipe.x,
            pipe.gap_y,
            pipe.gap_y + pipe.gap_h
        );
        game.world.add_pipe(pipe);
    }

    let before = match game.config.collision_policy {
        CollisionPolicy::RestoreOnPipeHit => Some(game.world.clone()),
        CollisionPolicy::Freeze => None,
    };

    advance_world(&mut game.world, game.config.gravity);

    if !collides(&game.world) {
        game.tick += 1;
        return;
    }

    let hit_pipe = collides_pipe(&game.world);
    if let (true, Some(before)) = (hit_pipe, before) {
        game.world = before;
    }

    let final_score = game.world.score;
    log::info!(
        "crashed into {} at tick {} with score {}",
        if hit_pipe { "a pipe" } else { "the edge" },
        game.tick,
        final_score
    );
    game.set_state(GameState::GameOver { final_score });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::io::{NullKeys, RecordingRenderer};
    use crate::world::Pipe;

    fn make_game(config: GameConfig) -> Game<NullKeys, RecordingRenderer> {
        Game::new(config, NullKeys, RecordingRenderer::default()).unwrap()
    }

    fn small_config() -> GameConfig {
        GameConfig {
            width: 20,
            height: 10,
            bird_x: 5,
            seed: Some(123),
            ..Default::default()
        }
    }

    #[test]
    fn test_quit_from_every_state() {
        for state in [
            GameState::Start,
            GameState::Playing,
            GameState::GameOver { final_score: 2 },
        ] {
            let mut game = make_game(small_config());
            game.set_state(state);
            state.handle_input(&mut game, GameInput::Quit);
            assert!(!game.is_running);
            assert_eq!(game.state, state);
        }
    }

    #[test]
    fn test_mode_select_only_on_start() {
        let mut game = make_game(small_config());
        GameState::Start.handle_input(&mut game, GameInput::SelectMode(GameMode::Hard));
        assert_eq!(game.mode, GameMode::Hard);
        // Spawner is only rebuilt when play starts
        assert_eq!(game.spawner, GameMode::Easy.spawner());

        game.set_state(GameState::Playing);
        GameState::Playing.handle_input(&mut game, GameInput::SelectMode(GameMode::Medium));
        assert_eq!(game.mode, GameMode::Hard);
    }

    #[test]
    fn test_space_on_start_rebuilds_spawner_for_mode() {
        let mut game = make_game(small_config());
        game.mode = GameMode::Medium;
        GameState::Start.handle_input(&mut game, GameInput::Space);
        assert_eq!(game.state, GameState::Playing);
        assert_eq!(game.spawner, GameMode::Medium.spawner());
        assert!((game.world.bird.vy - game.config.flap_velocity).abs() < f64::EPSILON);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut game = make_game(small_config());
        GameState::Start.handle_input(&mut game, GameInput::Restart);
        assert_eq!(game.state, GameState::Start);

        game.set_state(GameState::Playing);
        GameState::Playing.handle_input(&mut game, GameInput::Restart);
        assert_eq!(game.state, GameState::Playing);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut game = make_game(small_config());
        let before = game.world.clone();
        GameState::Start.handle_input(&mut game, GameInput::Other);
        assert_eq!(game.state, GameState::Start);
        assert_eq!(game.world, before);
        assert!(game.is_running);
    }

    #[test]
    fn test_update_is_noop_outside_playing() {
        let mut game = make_game(small_config());
        let before = game.world.clone();
        GameState::Start.update(&mut game);
        GameState::GameOver { final_score: 0 }.update(&mut game);
        assert_eq!(game.world, before);
        assert_eq!(game.tick, 0);
    }

    #[test]
    fn test_playing_update_spawns_on_first_tick() {
        let mut game = make_game(small_config());
        game.set_state(GameState::Playing);
        game.tick = 1;
        GameState::Playing.update(&mut game);
        assert_eq!(game.world.pipes.len(), 1);
        // Spawned at the right edge, then advanced one column
        assert_eq!(game.world.pipes[0].x, 18);
        assert_eq!(game.tick, 2);
    }

    #[test]
    fn test_tick_not_counted_on_crash() {
        let mut game = make_game(small_config());
        game.set_state(GameState::Playing);
        game.world.bird.y = -10.0;
        GameState::Playing.update(&mut game);
        assert_eq!(game.state, GameState::GameOver { final_score: 0 });
        assert_eq!(game.tick, 0);
    }

    #[test]
    fn test_freeze_policy_keeps_advanced_world_on_pipe_hit() {
        let mut game = make_game(small_config());
        game.set_state(GameState::Playing);
        game.tick = 5; // spawner not due
        game.spawner.should_spawn(1, &game.world);
        game.world.bird.y = 1.0;
        game.world.add_pipe(Pipe::new(6, 6, 3));

        GameState::Playing.update(&mut game);

        assert_eq!(game.state, GameState::GameOver { final_score: 0 });
        assert_eq!(game.world.pipes[0].x, 5);
        assert!((game.world.bird.y - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_restore_policy_rolls_back_pipe_hit() {
        let config = GameConfig {
            collision_policy: CollisionPolicy::RestoreOnPipeHit,
            ..small_config()
        };
        let mut game = make_game(config);
        game.set_state(GameState::Playing);
        game.tick = 5;
        game.spawner.should_spawn(1, &game.world);
        game.world.bird.y = 1.0;
        game.world.add_pipe(Pipe::new(6, 6, 3));

        GameState::Playing.update(&mut game);

        assert_eq!(game.state, GameState::GameOver { final_score: 0 });
        assert_eq!(game.world.pipes[0].x, 6);
        assert!((game.world.bird.y - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_restore_policy_drops_pipe_scored_on_fatal_tick() {
        let config = GameConfig {
            collision_policy: CollisionPolicy::RestoreOnPipeHit,
            ..small_config()
        };
        let mut game = make_game(config);
        game.set_state(GameState::Playing);
        game.tick = 5;
        game.spawner.should_spawn(1, &game.world);
        game.world.bird.y = 1.0;
        // First pipe slips behind the bird as the second one hits it
        game.world.add_pipe(Pipe::new(5, 0, 10));
        game.world.add_pipe(Pipe::new(6, 6, 3));

        GameState::Playing.update(&mut game);

        // The rolled-back frame has not scored the first pipe yet, and the
        // final score matches that frame.
        assert_eq!(game.state, GameState::GameOver { final_score: 0 });
        assert_eq!(game.world.score, 0);
        assert!(!game.world.pipes[0].passed);
    }

    #[test]
    fn test_freeze_policy_keeps_pipe_scored_on_fatal_tick() {
        let mut game = make_game(small_config());
        game.set_state(GameState::Playing);
        game.tick = 5;
        game.spawner.should_spawn(1, &game.world);
        game.world.bird.y = 1.0;
        game.world.add_pipe(Pipe::new(5, 0, 10));
        game.world.add_pipe(Pipe::new(6, 6, 3));

        GameState::Playing.update(&mut game);

        assert_eq!(game.state, GameState::GameOver { final_score: 1 });
        assert!(game.world.pipes[0].passed);
    }

    #[test]
    fn test_restore_policy_keeps_bounds_crash() {
        let config = GameConfig {
            collision_policy: CollisionPolicy::RestoreOnPipeHit,
            ..small_config()
        };
        let mut game = make_game(config);
        game.set_state(GameState::Playing);
        game.world.bird.y = 9.9;

        GameState::Playing.update(&mut game);

        assert!(matches!(game.state, GameState::GameOver { .. }));
        assert!(game.world.bird.y >= 10.0);
    }

    #[test]
    fn test_messages() {
        let start = GameState::Start.message(GameMode::Medium);
        assert!(start.contains("Mode: MEDIUM"));
        assert!(start.contains("SPACE to play"));
        assert_eq!(start.lines().count(), 2);

        assert_eq!(
            GameState::Playing.message(GameMode::Hard),
            "Mode: HARD | SPACE to flap | Q to quit"
        );
        assert_eq!(
            GameState::GameOver { final_score: 7 }.message(GameMode::Easy),
            "GAME OVER | Score: 7 | R to restart | Q to quit"
        );
    }

    #[test]
    fn test_render_passes_message_to_renderer() {
        let mut game = make_game(small_config());
        GameState::Start.render(&mut game).unwrap();
        assert_eq!(game.renderer.frames, 1);
        assert_eq!(game.renderer.last_message, GameState::Start.message(GameMode::Easy));
    }
}
