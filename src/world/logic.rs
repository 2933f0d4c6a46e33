//! Tick transitions, collision tests and scoring for the world.

use super::types::{Pipe, World};

/// Scroll every pipe `dx` columns to the left.
pub fn move_pipes_left(world: &mut World, dx: i32) {
    for pipe in &mut world.pipes {
        pipe.x -= dx;
    }
}

/// Score every pipe that has just moved behind the bird.
///
/// All qualifying pipes are scored in one call, so two pipes crossing on
/// the same tick are both counted.
pub fn update_score(world: &mut World) {
    let bird_x = world.bird.x;
    for pipe in &mut world.pipes {
        if !pipe.passed && pipe.x < bird_x {
            pipe.passed = true;
            world.score += 1;
        }
    }
}

/// Drop pipes that have scrolled past the left edge.
pub fn remove_offscreen_pipes(world: &mut World) {
    world.pipes.retain(|p| p.x >= 0);
}

/// Is row `y` inside the playfield?
pub fn in_bounds_y(world: &World, y: i32) -> bool {
    0 <= y && y < world.height as i32
}

pub fn collides_bounds(world: &World) -> bool {
    !in_bounds_y(world, world.bird.cell_y())
}

/// First pipe sharing the bird's column whose solid part covers the bird.
pub fn colliding_pipe(world: &World) -> Option<&Pipe> {
    let bird_x = world.bird.x;
    let bird_row = world.bird.cell_y();
    world
        .pipes
        .iter()
        .find(|p| p.x == bird_x && p.blocks(bird_row))
}

pub fn collides_pipe(world: &World) -> bool {
    colliding_pipe(world).is_some()
}

pub fn collides(world: &World) -> bool {
    collides_bounds(world) || collides_pipe(world)
}

/// Advance the world by one tick.
///
/// Order matters: gravity, bird step, scroll, score, then removal. A pipe
/// that reaches `x = -1` is scored before it is dropped. Collision is not
/// checked here.
pub fn advance_world(world: &mut World, gravity: f64) {
    world.bird.apply_gravity(gravity);
    world.bird.step();

    move_pipes_left(world, 1);
    update_score(world);
    remove_offscreen_pipes(world);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::types::Bird;

    fn make_world(bird_x: i32, bird_y: f64, width: u16, height: u16) -> World {
        World {
            width,
            height,
            bird: Bird::new(bird_x, bird_y),
            pipes: Vec::new(),
            score: 0,
        }
    }

    #[test]
    fn test_collision_out_of_bounds_top() {
        let world = make_world(5, -1.0, 20, 10);
        assert!(collides_bounds(&world));
        assert!(collides(&world));
    }

    #[test]
    fn test_fractional_negative_y_is_out_of_bounds() {
        // floor(-0.3) = -1
        let world = make_world(5, -0.3, 20, 10);
        assert!(collides_bounds(&world));
    }

    #[test]
    fn test_collision_out_of_bounds_bottom() {
        let world = make_world(5, 100.0, 20, 10);
        assert!(collides(&world));

        let edge = make_world(5, 9.99, 20, 10);
        assert!(!collides_bounds(&edge));
        let past = make_world(5, 10.0, 20, 10);
        assert!(collides_bounds(&past));
    }

    #[test]
    fn test_collision_with_pipe_when_not_in_gap() {
        let mut world = make_world(5, 2.0, 20, 10);
        world.add_pipe(Pipe::new(5, 5, 2));
        assert!(collides_pipe(&world));
        assert!(collides(&world));
    }

    #[test]
    fn test_no_collision_with_pipe_when_in_gap() {
        let mut world = make_world(5, 5.0, 20, 10);
        world.add_pipe(Pipe::new(5, 5, 3));
        assert!(!collides(&world));
    }

    #[test]
    fn test_pipe_in_other_column_never_collides() {
        let mut world = make_world(5, 0.0, 20, 10);
        world.add_pipe(Pipe::new(6, 5, 3));
        world.add_pipe(Pipe::new(4, 5, 3));
        assert!(!collides_pipe(&world));
    }

    #[test]
    fn test_score_increments_once_when_pipe_passes_bird() {
        let mut world = make_world(5, 5.0, 20, 10);
        world.add_pipe(Pipe::new(6, 0, 10));

        advance_world(&mut world, 0.0);
        assert_eq!(world.score, 0);

        advance_world(&mut world, 0.0);
        assert_eq!(world.score, 1);
        assert!(world.pipes[0].passed);

        advance_world(&mut world, 0.0);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_update_score_counts_every_crossed_pipe() {
        let mut world = make_world(5, 5.0, 20, 10);
        world.add_pipe(Pipe::new(4, 0, 10));
        world.add_pipe(Pipe::new(3, 0, 10));
        world.add_pipe(Pipe::new(5, 0, 10));

        update_score(&mut world);

        assert_eq!(world.score, 2);
        assert!(world.pipes[0].passed && world.pipes[1].passed);
        assert!(!world.pipes[2].passed);
    }

    #[test]
    fn test_offscreen_pipes_removed() {
        let mut world = make_world(5, 5.0, 20, 10);
        world.add_pipe(Pipe::new(0, 0, 10));
        advance_world(&mut world, 0.0);
        assert!(world.pipes.is_empty());
    }

    #[test]
    fn test_pipe_at_zero_is_kept() {
        let mut world = make_world(5, 5.0, 20, 10);
        world.add_pipe(Pipe::new(1, 0, 10));
        advance_world(&mut world, 0.0);
        assert_eq!(world.pipes.len(), 1);
        assert_eq!(world.pipes[0].x, 0);
    }

    #[test]
    fn test_pipe_scored_on_same_tick_it_is_removed() {
        // Bird at column 0: the pipe crosses behind it at x = -1.
        let mut world = make_world(0, 5.0, 20, 10);
        world.add_pipe(Pipe::new(0, 0, 10));
        advance_world(&mut world, 0.0);
        assert_eq!(world.score, 1);
        assert!(world.pipes.is_empty());
    }

    #[test]
    fn test_advance_applies_gravity_before_step() {
        let mut world = make_world(5, 5.0, 20, 10);
        advance_world(&mut world, 0.5);
        assert!((world.bird.vy - 0.5).abs() < f64::EPSILON);
        assert!((world.bird.y - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_move_pipes_left_keeps_order() {
        let mut world = make_world(5, 5.0, 20, 10);
        world.add_pipe(Pipe::new(10, 0, 3));
        world.add_pipe(Pipe::new(19, 0, 3));
        move_pipes_left(&mut world, 2);
        let xs: Vec<i32> = world.pipes.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![8, 17]);
    }
}
