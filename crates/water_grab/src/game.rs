use bevy::prelude::*;

use crate::config::GameConfig;
use crate::difficulty::Difficulty;
use crate::grid::GridView;
use crate::session::{GRID_CELLS, Phase, Session};
use crate::surface::BevySurface;
use crate::ui::{ControlsUI, FeedbackUI, ScoreUI, TimeUI};

/// Pointer press on a grid cell.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellClicked {
    pub cell: usize,
}

/// Button presses that drive the session.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Reset,
    Select(Difficulty),
}

/// Session state, its sinks and the systems feeding it time and input.
/// Needs no window or renderer.
pub struct CorePlugin {
    config: GameConfig,
}

impl CorePlugin {
    pub const fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Session::new(self.config.difficulty, self.config.seed))
            .init_resource::<ScoreUI>()
            .init_resource::<TimeUI>()
            .init_resource::<FeedbackUI>()
            .init_resource::<ControlsUI>()
            .init_resource::<GridView>()
            .init_state::<Phase>()
            .add_event::<CellClicked>()
            .add_event::<Control>()
            .add_systems(Startup, present_session)
            .add_systems(
                Update,
                (
                    handle_controls,
                    handle_cell_clicks,
                    advance_session,
                    sync_phase,
                )
                    .chain(),
            );
    }
}

fn present_session(session: Res<Session>, mut surface: BevySurface) {
    session.present(&mut surface);
}

fn handle_controls(
    mut controls: EventReader<Control>,
    mut session: ResMut<Session>,
    mut surface: BevySurface,
) {
    for control in controls.read() {
        match *control {
            Control::Start => session.start(&mut surface),
            Control::Reset => session.reset(&mut surface),
            Control::Select(difficulty) => session.select_difficulty(difficulty, &mut surface),
        }
    }
}

fn handle_cell_clicks(
    mut clicks: EventReader<CellClicked>,
    mut session: ResMut<Session>,
    mut surface: BevySurface,
) {
    for click in clicks.read() {
        if click.cell >= GRID_CELLS {
            warn!("Ignoring click on unknown cell {}", click.cell);
            continue;
        }
        session.on_item_clicked(click.cell, &mut surface);
    }
}

fn advance_session(time: Res<Time>, mut session: ResMut<Session>, mut surface: BevySurface) {
    if session.is_active() {
        session.advance(time.delta(), &mut surface);
    }
}

fn sync_phase(
    session: Res<Session>,
    phase: Res<State<Phase>>,
    mut next_phase: ResMut<NextState<Phase>>,
) {
    if *phase.get() != session.phase() {
        next_phase.set(session.phase());
    }
}
