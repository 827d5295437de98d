use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::grid::GridView;
use crate::session::{FeedbackStyle, GameSurface, ItemKind};
use crate::ui::{ControlsUI, FeedbackUI, ScoreUI, TimeUI};

/// Routes session output into the UI and grid resources, which their own
/// systems render on the same frame.
#[derive(SystemParam)]
pub struct BevySurface<'w> {
    score: ResMut<'w, ScoreUI>,
    time: ResMut<'w, TimeUI>,
    feedback: ResMut<'w, FeedbackUI>,
    controls: ResMut<'w, ControlsUI>,
    grid: ResMut<'w, GridView>,
}

impl GameSurface for BevySurface<'_> {
    fn show_score(&mut self, score: u32) {
        self.score.update(score);
    }

    fn show_time_left(&mut self, seconds: u32) {
        self.time.update(seconds);
    }

    fn show_goal(&mut self, goal: u32) {
        self.score.set_goal(goal);
    }

    fn clear_cell(&mut self, cell: usize) {
        self.grid.clear(cell);
    }

    fn place_item(&mut self, cell: usize, kind: ItemKind) {
        self.grid.place(cell, kind);
    }

    fn show_feedback(&mut self, message: &str, style: FeedbackStyle) {
        self.feedback.update(message, style);
    }

    fn clear_feedback(&mut self) {
        self.feedback.clear();
    }

    fn show_controls(&mut self, start_visible: bool, reset_visible: bool) {
        self.controls.set_visibility(start_visible, reset_visible);
    }
}
