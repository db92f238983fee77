//! Scenario files describing a maze layout and a scripted input sequence.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use cookieman_core::{Cell, TileKind};
use cookieman_system_movement::MoveInput;
use glam::Vec2;
use serde::Deserialize;

/// Layout character marking a wall tile.
const WALL_TILE: char = '#';
/// Layout character marking a path tile.
const PATH_TILE: char = '.';

/// Maze layout, actor parameters and input script loaded from TOML.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    /// World position of the lower-left corner of the maze.
    #[serde(default)]
    pub(crate) origin: [f32; 2],
    /// Side length of a cell in world units.
    #[serde(default = "default_cell_size")]
    pub(crate) cell_size: f32,
    /// Actor speed in world units per second.
    #[serde(default = "default_speed")]
    pub(crate) speed: f32,
    /// Simulated duration of a single tick.
    #[serde(default = "default_tick_millis")]
    pub(crate) tick_millis: u64,
    /// Number of ticks to simulate.
    #[serde(default = "default_ticks")]
    pub(crate) ticks: u32,
    /// Cell whose center the actor starts on.
    pub(crate) start: Cell,
    /// Tile rows listed top to bottom.
    pub(crate) rows: Vec<String>,
    /// Inputs delivered before the tick they name.
    #[serde(default)]
    pub(crate) inputs: Vec<ScriptedInput>,
}

/// Input event scheduled for a specific tick.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScriptedInput {
    /// Tick before which the input is delivered.
    pub(crate) tick: u32,
    /// Input phase reported by the device.
    pub(crate) phase: InputPhase,
    /// Axis vector, only read for `performed` inputs.
    #[serde(default)]
    pub(crate) axis: [f32; 2],
}

impl ScriptedInput {
    /// Converts the scripted entry into the controller's input event.
    #[must_use]
    pub(crate) fn to_move_input(&self) -> MoveInput {
        match self.phase {
            InputPhase::Started => MoveInput::Started,
            InputPhase::Performed => MoveInput::Performed {
                axis: Vec2::from(self.axis),
            },
            InputPhase::Canceled => MoveInput::Canceled,
        }
    }
}

/// Phases an input device reports for directional input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum InputPhase {
    /// Input was pressed.
    Started,
    /// Input reported a value while held.
    Performed,
    /// Input was released.
    Canceled,
}

impl Scenario {
    /// Loads a scenario from the TOML file at `path`.
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid scenario at {}", path.display()))
    }

    /// Parses a scenario from TOML contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let scenario: Self =
            toml::from_str(contents).context("failed to parse scenario toml contents")?;
        let width = scenario.rows.first().map_or(0, |row| row.chars().count());
        ensure!(width > 0, "scenario layout has no tiles");
        for (index, row) in scenario.rows.iter().enumerate() {
            ensure!(
                row.chars().count() == width,
                "layout row {index} has {} tiles, expected {width}",
                row.chars().count()
            );
        }
        Ok(scenario)
    }

    /// Grid dimensions spanned by the layout rows as `(width, height)`.
    pub(crate) fn dimensions(&self) -> Result<(u32, u32)> {
        let width = self.rows.first().map_or(0, |row| row.chars().count());
        let width = u32::try_from(width).context("layout is too wide")?;
        let height = u32::try_from(self.rows.len()).context("layout is too tall")?;
        Ok((width, height))
    }

    /// World position of the lower-left corner of the layout.
    #[must_use]
    pub(crate) fn origin(&self) -> Vec2 {
        Vec2::from(self.origin)
    }

    /// Tile found at a world position, acting as the maze's tilemap.
    #[must_use]
    pub(crate) fn tile_at(&self, position: Vec2) -> Option<TileKind> {
        let local = ((position - self.origin()) / self.cell_size).floor();
        if !local.is_finite() || local.x < 0.0 || local.y < 0.0 {
            return None;
        }

        let column = local.x as usize;
        let row_from_bottom = local.y as usize;
        let row = self.rows.len().checked_sub(row_from_bottom + 1)?;
        match self.rows.get(row)?.chars().nth(column)? {
            WALL_TILE => Some(TileKind::Wall),
            PATH_TILE => Some(TileKind::Path),
            _ => None,
        }
    }
}

const fn default_cell_size() -> f32 {
    1.0
}

const fn default_speed() -> f32 {
    3.0
}

const fn default_tick_millis() -> u64 {
    16
}

const fn default_ticks() -> u32 {
    60
}
