use bevy::prelude::*;

use crate::game::CellClicked;
use crate::input::just_pressed_world_position;
use crate::session::{GRID_CELLS, GRID_COLUMNS, ItemKind, Phase};

const CELL_SIZE: f32 = 100.;
const CELL_GAP: f32 = 10.;
const CELL_OFFSET: f32 = CELL_SIZE + CELL_GAP;
const GRID_CENTER: Vec2 = Vec2::new(0., 40.);

const CELL_COLOR: Color = Color::srgb(0.85, 0.88, 0.9);
const CLEAN_COLOR: Color = Color::srgb(1., 0.79, 0.02);
const DIRTY_COLOR: Color = Color::srgb(0.45, 0.33, 0.2);
const CAN_SIZE: Vec2 = Vec2::new(48., 64.);

/// What each cell currently holds, as last reported by the session.
#[derive(Resource, Default)]
pub struct GridView {
    cells: [Option<ItemKind>; GRID_CELLS],
    is_dirty: bool,
}

impl GridView {
    pub fn clear(&mut self, cell: usize) {
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = None;
            self.is_dirty = true;
        }
    }

    pub fn place(&mut self, cell: usize, kind: ItemKind) {
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = Some(kind);
            self.is_dirty = true;
        }
    }

    pub fn item(&self, cell: usize) -> Option<ItemKind> {
        self.cells.get(cell).copied().flatten()
    }
}

/// World-space centers of the nine cells, row by row from the top left.
#[derive(Resource)]
pub struct GridLayout {
    positions: Vec<Vec2>,
}

impl Default for GridLayout {
    fn default() -> Self {
        let half_span = (GRID_COLUMNS - 1) as f32 * 0.5;
        let positions = (0..GRID_CELLS)
            .map(|cell| {
                let column = (cell % GRID_COLUMNS) as f32 - half_span;
                let row = (cell / GRID_COLUMNS) as f32 - half_span;
                Vec2::new(
                    column.mul_add(CELL_OFFSET, GRID_CENTER.x),
                    row.mul_add(-CELL_OFFSET, GRID_CENTER.y),
                )
            })
            .collect();
        Self { positions }
    }
}

impl GridLayout {
    pub fn position(&self, cell: usize) -> Option<Vec2> {
        self.positions.get(cell).copied()
    }

    /// Index of the cell under `point`, if any. Gaps between cells miss.
    pub fn cell_at(&self, point: Vec2) -> Option<usize> {
        let half = CELL_SIZE * 0.5;
        self.positions.iter().position(|center| {
            let diff = (point - *center).abs();
            diff.x <= half && diff.y <= half
        })
    }
}

#[derive(Component)]
struct CellBackground;

#[derive(Component)]
struct ItemSprite;

pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GridLayout>()
            .add_systems(Startup, spawn_cells)
            .add_systems(
                Update,
                (
                    detect_cell_clicks.run_if(in_state(Phase::Running)),
                    sync_items,
                ),
            );
    }
}

fn spawn_cells(mut commands: Commands, layout: Res<GridLayout>) {
    for pos in &layout.positions {
        commands.spawn((
            Sprite::from_color(CELL_COLOR, Vec2::splat(CELL_SIZE)),
            Transform::from_xyz(pos.x, pos.y, -10.),
            CellBackground,
        ));
    }
}

fn detect_cell_clicks(
    window_query: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    layout: Res<GridLayout>,
    mut clicks: EventWriter<CellClicked>,
) {
    let Some(world_position) = just_pressed_world_position(
        &mouse_button_input,
        &touch_input,
        &window_query,
        &camera_query,
    ) else {
        return;
    };
    if let Some(cell) = layout.cell_at(world_position) {
        clicks.send(CellClicked { cell });
    }
}

fn sync_items(
    mut commands: Commands,
    mut grid: ResMut<GridView>,
    layout: Res<GridLayout>,
    query: Query<Entity, With<ItemSprite>>,
) {
    if !grid.is_dirty {
        return;
    }
    for entity in &query {
        commands.entity(entity).despawn();
    }
    for (cell, item) in grid.cells.iter().enumerate() {
        let (Some(kind), Some(pos)) = (item, layout.position(cell)) else {
            continue;
        };
        let color = match kind {
            ItemKind::Clean => CLEAN_COLOR,
            ItemKind::Dirty => DIRTY_COLOR,
        };
        commands.spawn((
            Sprite::from_color(color, CAN_SIZE),
            Transform::from_xyz(pos.x, pos.y, 0.),
            ItemSprite,
        ));
    }
    grid.is_dirty = false;
}
