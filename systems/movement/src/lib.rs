#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid-locked actor movement with look-ahead input buffering.
//!
//! A 90° turn is queued until the actor reaches the center of its cell in the
//! direction it is already travelling, while a 180° reversal applies at once.

use std::time::Duration;

use cookieman_core::{ConfigError, Direction};
use cookieman_world::{query, Maze};
use glam::Vec2;
use log::{debug, trace};

/// Input events delivered by the host's input layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveInput {
    /// Directional input was pressed.
    Started,
    /// Directional input reported an axis vector.
    Performed {
        /// Normalised axis vector; only exact unit axes are accepted.
        axis: Vec2,
    },
    /// Directional input was released.
    Canceled,
}

/// Notifications emitted while handling input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementEvent {
    /// The actor transitioned from idle to moving.
    Started,
    /// The actor transitioned from moving to idle.
    Stopped,
    /// The buffered input direction changed.
    DirectionChanged {
        /// Newly requested direction.
        direction: Direction,
    },
}

/// Whether the actor advances on tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionState {
    /// Ticks leave the actor in place.
    #[default]
    Idle,
    /// Ticks advance the actor toward its target.
    Moving,
}

/// Per-actor movement state machine.
///
/// `previous_direction` is the move the actor has committed to and finishes
/// first; `current_direction` is the buffered request that takes over once the
/// actor reached its cell center in the committed direction. `None` stands for
/// the zero vector.
#[derive(Clone, Debug)]
pub struct MovementController {
    position: Vec2,
    speed: f32,
    state: MotionState,
    current_direction: Option<Direction>,
    previous_direction: Option<Direction>,
    target: Vec2,
    heading: Option<Direction>,
}

impl MovementController {
    /// Creates an idle controller for an actor at `position`.
    ///
    /// `speed` is measured in world units per second and must be finite and
    /// not negative.
    pub fn new(position: Vec2, speed: f32) -> Result<Self, ConfigError> {
        if !(speed.is_finite() && speed >= 0.0) {
            return Err(ConfigError::InvalidSpeed(speed));
        }

        Ok(Self {
            position,
            speed,
            state: MotionState::Idle,
            current_direction: None,
            previous_direction: None,
            target: position,
            heading: None,
        })
    }

    /// World position of the actor.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Point the actor advanced toward during the last tick.
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Movement speed in world units per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Current motion state.
    #[must_use]
    pub const fn state(&self) -> MotionState {
        self.state
    }

    /// Reports whether ticks advance the actor.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.state == MotionState::Moving
    }

    /// Most recently requested direction.
    #[must_use]
    pub const fn current_direction(&self) -> Option<Direction> {
        self.current_direction
    }

    /// Direction the actor committed to before the latest request.
    #[must_use]
    pub const fn previous_direction(&self) -> Option<Direction> {
        self.previous_direction
    }

    /// Direction that resolved the target during the last moving tick.
    #[must_use]
    pub const fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Applies an input event, reporting resulting notifications to `out`.
    pub fn handle_input(&mut self, input: MoveInput, out: &mut Vec<MovementEvent>) {
        match input {
            MoveInput::Started => {
                if self.state == MotionState::Idle {
                    self.state = MotionState::Moving;
                    out.push(MovementEvent::Started);
                }
            }
            MoveInput::Canceled => {
                if self.state == MotionState::Moving {
                    self.state = MotionState::Idle;
                    out.push(MovementEvent::Stopped);
                }
            }
            MoveInput::Performed { axis } => self.switch_direction(axis, out),
        }
    }

    /// Advances the actor by one time step and returns its new position.
    ///
    /// Geometry failures never escape: the actor settles on its cell center,
    /// or stays where it is when it stands outside the grid.
    pub fn tick(&mut self, maze: &Maze, dt: Duration) -> Vec2 {
        if self.state == MotionState::Idle {
            return self.position;
        }

        let direction = match self.previous_direction {
            Some(committed)
                if !query::has_reached_cell_center_in_direction(maze, committed, self.position) =>
            {
                Some(committed)
            }
            _ => self.current_direction,
        };

        self.heading = direction;
        self.target = self.resolve_target(maze, direction);
        self.position = move_towards(self.position, self.target, self.speed * dt.as_secs_f32());
        trace!(
            "heading {direction:?} toward {} now at {}",
            self.target,
            self.position
        );
        self.position
    }

    fn switch_direction(&mut self, axis: Vec2, out: &mut Vec<MovementEvent>) {
        let requested = query::direction_from_vector(axis);
        if !requested.is_cardinal() {
            trace!("ignoring non-axis input {axis}");
            return;
        }

        match self.current_direction {
            Some(current) if current == requested => return,
            Some(current) if current == requested.opposite() => {
                self.previous_direction = Some(requested);
                self.current_direction = Some(requested);
            }
            current => {
                self.previous_direction = current;
                self.current_direction = Some(requested);
            }
        }

        debug!(
            "direction changed to {requested:?}, finishing {:?} first",
            self.previous_direction
        );
        out.push(MovementEvent::DirectionChanged {
            direction: requested,
        });
    }

    fn resolve_target(&self, maze: &Maze, direction: Option<Direction>) -> Vec2 {
        let Some(direction) = direction else {
            return self.position;
        };

        if query::is_neighbor_walkable(maze, self.position, direction) {
            match query::neighbor_center(maze, self.position, direction) {
                Ok(center) => return center,
                Err(error) => trace!("neighbor center unavailable: {error}"),
            }
        }

        query::current_cell_center(maze, self.position).unwrap_or_else(|error| {
            trace!("staying put: {error}");
            self.position
        })
    }
}

fn move_towards(current: Vec2, target: Vec2, max_distance: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_distance || distance == 0.0 {
        return target;
    }

    current + delta / distance * max_distance
}
