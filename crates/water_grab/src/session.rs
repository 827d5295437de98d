//! Run controller for the water collection game.
//!
//! [`Session`] owns every piece of mutable game state: score, clock, the
//! frozen difficulty profile, the grid occupancy and the three timers that
//! drive a run. It never touches presentation directly; every visible change
//! goes through a [`GameSurface`].

use core::time::Duration;

use bevy::log::{debug, info};
use bevy::prelude::{Resource, States};
use bevy::time::{Timer, TimerMode};

use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::messages::{COLLECTED, HALFWAY, LOSS_MESSAGES, UNSAFE_WATER, WIN_MESSAGES};

pub const GRID_COLUMNS: usize = 3;
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_COLUMNS;

const DIRTY_CHANCE: f32 = 0.25;
const COUNTDOWN_STEP: Duration = Duration::from_secs(1);
const FEEDBACK_LIFETIME: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Clean,
    Dirty,
}

impl ItemKind {
    /// Score after collecting this item. Never drops below zero.
    pub const fn apply(self, score: u32) -> u32 {
        match self {
            Self::Clean => score.saturating_add(1),
            Self::Dirty => score.saturating_sub(1),
        }
    }
}

#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Ended,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStyle {
    #[default]
    Neutral,
    Win,
    Lose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Won,
    Lost,
}

/// Everything the controller can ask the presentation layer to do.
pub trait GameSurface {
    fn show_score(&mut self, score: u32);
    fn show_time_left(&mut self, seconds: u32);
    fn show_goal(&mut self, goal: u32);
    fn clear_cell(&mut self, cell: usize);
    fn place_item(&mut self, cell: usize, kind: ItemKind);
    fn show_feedback(&mut self, message: &str, style: FeedbackStyle);
    fn clear_feedback(&mut self);
    fn show_controls(&mut self, start_visible: bool, reset_visible: bool);
}

#[derive(Resource)]
pub struct Session {
    difficulty: Difficulty,
    profile: DifficultyProfile,
    phase: Phase,
    score: u32,
    time_left: u32,
    cells: [Option<ItemKind>; GRID_CELLS],
    outcome: Option<RunOutcome>,
    spawn_timer: Option<Timer>,
    countdown: Option<Timer>,
    feedback_timer: Option<Timer>,
    rng: fastrand::Rng,
}

impl Session {
    pub fn new(difficulty: Difficulty, seed: Option<u64>) -> Self {
        let profile = difficulty.profile();
        Self {
            difficulty,
            profile,
            phase: Phase::Idle,
            score: 0,
            time_left: profile.duration_secs,
            cells: [None; GRID_CELLS],
            outcome: None,
            spawn_timer: None,
            countdown: None,
            feedback_timer: None,
            rng: seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed),
        }
    }

    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub const fn profile(&self) -> DifficultyProfile {
        self.profile
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Running)
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn time_left(&self) -> u32 {
        self.time_left
    }

    pub const fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn item_at(&self, cell: usize) -> Option<ItemKind> {
        self.cells.get(cell).copied().flatten()
    }

    /// Pushes the whole current state to `surface`, e.g. on first frame.
    pub fn present(&self, surface: &mut impl GameSurface) {
        surface.show_goal(self.profile.goal);
        surface.show_score(self.score);
        surface.show_time_left(self.time_left);
        for (cell, item) in self.cells.iter().enumerate() {
            match item {
                Some(kind) => surface.place_item(cell, *kind),
                None => surface.clear_cell(cell),
            }
        }
        self.present_controls(surface);
    }

    /// Begins a run with the selected difficulty. Ignored while a run is live.
    pub fn start(&mut self, surface: &mut impl GameSurface) {
        if self.is_active() {
            return;
        }
        self.cancel_timers();

        self.profile = self.difficulty.profile();
        self.phase = Phase::Running;
        self.score = 0;
        self.time_left = self.profile.duration_secs;
        self.outcome = None;

        surface.show_goal(self.profile.goal);
        surface.show_score(self.score);
        surface.show_time_left(self.time_left);
        surface.clear_feedback();
        self.present_controls(surface);
        self.clear_grid(surface);

        self.spawn_timer = Some(Timer::new(
            self.profile.spawn_interval(),
            TimerMode::Repeating,
        ));
        self.countdown = Some(Timer::new(COUNTDOWN_STEP, TimerMode::Repeating));
        info!(
            "Run started on {} (goal {}, {}s)",
            self.difficulty, self.profile.goal, self.profile.duration_secs
        );

        self.spawn_item(surface);
    }

    /// Drops back to the idle preview of the selected difficulty.
    ///
    /// Does not start a new run; call [`Session::start`] afterwards.
    pub fn reset(&mut self, surface: &mut impl GameSurface) {
        self.cancel_timers();

        self.profile = self.difficulty.profile();
        self.phase = Phase::Idle;
        self.score = 0;
        self.time_left = self.profile.duration_secs;
        self.outcome = None;

        surface.show_goal(self.profile.goal);
        surface.show_score(self.score);
        surface.show_time_left(self.time_left);
        surface.clear_feedback();
        self.present_controls(surface);
        self.clear_grid(surface);
        info!("Reset to {} preview", self.difficulty);
    }

    /// Selects the tier used by the next run. Previews it when idle.
    pub fn select_difficulty(&mut self, difficulty: Difficulty, surface: &mut impl GameSurface) {
        if difficulty == self.difficulty {
            return;
        }
        self.difficulty = difficulty;
        info!("Difficulty set to {difficulty}");

        if self.phase == Phase::Idle {
            self.profile = difficulty.profile();
            self.time_left = self.profile.duration_secs;
            surface.show_goal(self.profile.goal);
            surface.show_time_left(self.time_left);
        }
    }

    /// Replaces whatever is on the grid with one fresh item.
    pub fn spawn_item(&mut self, surface: &mut impl GameSurface) {
        if !self.is_active() {
            return;
        }
        self.clear_grid(surface);

        let cell = self.rng.usize(..GRID_CELLS);
        let kind = if self.rng.f32() < DIRTY_CHANCE {
            ItemKind::Dirty
        } else {
            ItemKind::Clean
        };
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = Some(kind);
            surface.place_item(cell, kind);
            debug!("Spawned {kind:?} item in cell {cell}");
        }
    }

    /// Collects the item in `cell`. Returns whether anything was collected.
    pub fn on_item_clicked(&mut self, cell: usize, surface: &mut impl GameSurface) -> bool {
        if !self.is_active() {
            return false;
        }
        let Some(kind) = self.cells.get_mut(cell).and_then(Option::take) else {
            return false;
        };
        surface.clear_cell(cell);

        self.score = kind.apply(self.score);
        surface.show_score(self.score);

        let (message, style) = match kind {
            ItemKind::Clean => (COLLECTED, FeedbackStyle::Neutral),
            ItemKind::Dirty => (UNSAFE_WATER, FeedbackStyle::Lose),
        };
        // Exact match only, either kind. The item keeps its styling.
        let message = if self.score == self.profile.halfway() {
            HALFWAY
        } else {
            message
        };
        surface.show_feedback(message, style);
        self.feedback_timer = Some(Timer::new(FEEDBACK_LIFETIME, TimerMode::Once));
        debug!("Collected {kind:?} item from cell {cell}, score {}", self.score);
        true
    }

    /// One second of countdown.
    pub fn tick(&mut self, surface: &mut impl GameSurface) {
        if !self.is_active() {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        surface.show_time_left(self.time_left);
        if self.time_left == 0 {
            self.end_game(surface);
        }
    }

    /// Advances the three timers by `delta` and runs whatever fell due.
    pub fn advance(&mut self, delta: Duration, surface: &mut impl GameSurface) {
        if !self.is_active() {
            return;
        }

        let feedback_expired = self
            .feedback_timer
            .as_mut()
            .is_some_and(|timer| timer.tick(delta).finished());
        if feedback_expired {
            self.feedback_timer = None;
            surface.clear_feedback();
        }

        let spawns = self
            .spawn_timer
            .as_mut()
            .map_or(0, |timer| timer.tick(delta).times_finished_this_tick());
        for _ in 0..spawns {
            self.spawn_item(surface);
        }

        let ticks = self
            .countdown
            .as_mut()
            .map_or(0, |timer| timer.tick(delta).times_finished_this_tick());
        for _ in 0..ticks {
            if !self.is_active() {
                break;
            }
            self.tick(surface);
        }
    }

    /// Closes the run and reports the result.
    pub fn end_game(&mut self, surface: &mut impl GameSurface) {
        if !self.is_active() {
            return;
        }
        self.phase = Phase::Ended;
        self.cancel_timers();
        self.clear_grid(surface);

        let (outcome, messages, style) = if self.score >= self.profile.goal {
            (RunOutcome::Won, &WIN_MESSAGES, FeedbackStyle::Win)
        } else {
            (RunOutcome::Lost, &LOSS_MESSAGES, FeedbackStyle::Lose)
        };
        self.outcome = Some(outcome);
        if let Some(message) = self.rng.choice(messages.iter()) {
            surface.show_feedback(message, style);
        }
        self.present_controls(surface);
        info!(
            "Run ended: {outcome:?} with {} of {}",
            self.score, self.profile.goal
        );
    }

    fn cancel_timers(&mut self) {
        self.spawn_timer = None;
        self.countdown = None;
        self.feedback_timer = None;
    }

    fn clear_grid(&mut self, surface: &mut impl GameSurface) {
        for (cell, item) in self.cells.iter_mut().enumerate() {
            *item = None;
            surface.clear_cell(cell);
        }
    }

    fn present_controls(&self, surface: &mut impl GameSurface) {
        match self.phase {
            Phase::Idle => surface.show_controls(true, false),
            Phase::Running => surface.show_controls(false, false),
            Phase::Ended => surface.show_controls(false, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    const STEP: Duration = Duration::from_millis(100);

    #[derive(Default)]
    struct Recorder {
        score: u32,
        time_left: u32,
        goal: u32,
        cells: [Option<ItemKind>; GRID_CELLS],
        placed: usize,
        feedback: Option<(String, FeedbackStyle)>,
        controls: (bool, bool),
    }

    impl Recorder {
        fn occupied(&self) -> usize {
            self.cells.iter().flatten().count()
        }

        fn feedback_text(&self) -> Option<&str> {
            self.feedback.as_ref().map(|(text, _)| text.as_str())
        }
    }

    impl GameSurface for Recorder {
        fn show_score(&mut self, score: u32) {
            self.score = score;
        }

        fn show_time_left(&mut self, seconds: u32) {
            self.time_left = seconds;
        }

        fn show_goal(&mut self, goal: u32) {
            self.goal = goal;
        }

        fn clear_cell(&mut self, cell: usize) {
            if let Some(slot) = self.cells.get_mut(cell) {
                *slot = None;
            }
        }

        fn place_item(&mut self, cell: usize, kind: ItemKind) {
            if let Some(slot) = self.cells.get_mut(cell) {
                *slot = Some(kind);
            }
            self.placed += 1;
        }

        fn show_feedback(&mut self, message: &str, style: FeedbackStyle) {
            self.feedback = Some((message.to_owned(), style));
        }

        fn clear_feedback(&mut self) {
            self.feedback = None;
        }

        fn show_controls(&mut self, start_visible: bool, reset_visible: bool) {
            self.controls = (start_visible, reset_visible);
        }
    }

    fn started(difficulty: Difficulty) -> (Session, Recorder) {
        let mut session = Session::new(difficulty, Some(7));
        let mut surface = Recorder::default();
        session.present(&mut surface);
        session.start(&mut surface);
        (session, surface)
    }

    fn run_for(session: &mut Session, surface: &mut Recorder, total: Duration) {
        let steps = total.as_millis() / STEP.as_millis();
        for _ in 0..steps {
            session.advance(STEP, surface);
        }
    }

    /// Puts `kind` in `cell` and clicks it.
    fn collect(session: &mut Session, surface: &mut Recorder, cell: usize, kind: ItemKind) {
        if let Some(slot) = session.cells.get_mut(cell) {
            *slot = Some(kind);
        }
        assert!(session.on_item_clicked(cell, surface), "forced item should be collected");
    }

    #[test]
    fn start_loads_the_selected_profile() {
        for difficulty in Difficulty::iter() {
            let (session, surface) = started(difficulty);
            let profile = difficulty.profile();
            assert_eq!(session.phase(), Phase::Running, "{difficulty} is running");
            assert_eq!(session.score(), 0, "{difficulty} score");
            assert_eq!(session.time_left(), profile.duration_secs, "{difficulty} clock");
            assert_eq!(surface.time_left, profile.duration_secs, "{difficulty} display");
            assert_eq!(surface.goal, profile.goal, "{difficulty} goal");
            assert_eq!(surface.placed, 1, "{difficulty} spawns immediately");
            assert_eq!(surface.controls, (false, false), "controls hidden mid-run");
        }
    }

    #[test]
    fn start_while_running_changes_nothing() {
        let (mut session, mut surface) = started(Difficulty::Normal);
        run_for(&mut session, &mut surface, Duration::from_millis(3500));
        collect(&mut session, &mut surface, 0, ItemKind::Clean);
        let placed = surface.placed;

        session.start(&mut surface);

        assert_eq!(session.score(), 1, "score kept");
        assert_eq!(session.time_left(), 27, "clock kept");
        assert_eq!(surface.placed, placed, "no extra spawn");

        // Timer phase is untouched too: next spawn still lands at 4s.
        run_for(&mut session, &mut surface, Duration::from_millis(500));
        assert_eq!(surface.placed, placed + 1, "spawn cadence unchanged");
    }

    #[test]
    fn easy_run_without_clicks_is_lost_after_thirty_seconds() {
        let (mut session, mut surface) = started(Difficulty::Easy);

        run_for(&mut session, &mut surface, Duration::from_millis(29_900));
        assert_eq!(session.phase(), Phase::Running, "one tick left");
        assert_eq!(session.time_left(), 1, "one second on the clock");

        session.advance(STEP, &mut surface);
        assert_eq!(session.phase(), Phase::Ended, "clock ran out");
        assert_eq!(session.score(), 0, "nothing collected");
        assert_eq!(session.outcome(), Some(RunOutcome::Lost), "below goal");
        assert_eq!(surface.time_left, 0, "display shows zero");
        assert_eq!(surface.occupied(), 0, "grid cleared");
        assert_eq!(surface.controls, (false, true), "reset offered");

        let Some((message, style)) = surface.feedback.clone() else {
            panic!("no result message shown");
        };
        assert_eq!(style, FeedbackStyle::Lose, "loss styling");
        assert!(LOSS_MESSAGES.contains(&message.as_str()), "loss message: {message}");
    }

    #[test]
    fn reaching_the_goal_early_does_not_end_the_run() {
        let (mut session, mut surface) = started(Difficulty::Easy);
        for _ in 0..20 {
            collect(&mut session, &mut surface, 4, ItemKind::Clean);
        }
        assert_eq!(session.score(), 20, "past the goal");

        run_for(&mut session, &mut surface, Duration::from_secs(29));
        assert_eq!(session.phase(), Phase::Running, "clock still running");

        run_for(&mut session, &mut surface, Duration::from_secs(1));
        assert_eq!(session.outcome(), Some(RunOutcome::Won), "goal met at the end");
        let Some((message, style)) = surface.feedback.clone() else {
            panic!("no result message shown");
        };
        assert_eq!(style, FeedbackStyle::Win, "win styling");
        assert!(WIN_MESSAGES.contains(&message.as_str()), "win message: {message}");
    }

    #[test]
    fn score_equal_to_goal_wins() {
        let (mut session, mut surface) = started(Difficulty::Easy);
        for _ in 0..15 {
            collect(&mut session, &mut surface, 0, ItemKind::Clean);
        }
        session.advance(Duration::from_secs(30), &mut surface);
        assert_eq!(session.outcome(), Some(RunOutcome::Won), "score >= goal");
    }

    #[test]
    fn score_never_goes_negative() {
        let (mut session, mut surface) = started(Difficulty::Normal);
        let clicks = [
            ItemKind::Dirty,
            ItemKind::Dirty,
            ItemKind::Clean,
            ItemKind::Dirty,
            ItemKind::Dirty,
            ItemKind::Clean,
            ItemKind::Clean,
            ItemKind::Dirty,
        ];
        let mut expected = 0i64;
        for kind in clicks {
            collect(&mut session, &mut surface, 2, kind);
            expected = match kind {
                ItemKind::Clean => expected + 1,
                ItemKind::Dirty => (expected - 1).max(0),
            };
            assert_eq!(i64::from(session.score()), expected, "clamped running sum");
        }
        assert_eq!(surface.score, 1, "display follows");
    }

    #[test]
    fn dirty_item_at_zero_keeps_zero() {
        let (mut session, mut surface) = started(Difficulty::Easy);
        collect(&mut session, &mut surface, 8, ItemKind::Dirty);
        assert_eq!(session.score(), 0, "clamped at zero");
        assert_eq!(
            surface.feedback,
            Some((UNSAFE_WATER.to_owned(), FeedbackStyle::Lose)),
            "unsafe water feedback"
        );
        assert_eq!(surface.cells.get(8).copied().flatten(), None, "item removed");
    }

    #[test]
    fn halfway_message_fires_on_exact_landing() {
        let (mut session, mut surface) = started(Difficulty::Easy);
        for _ in 0..6 {
            collect(&mut session, &mut surface, 1, ItemKind::Clean);
        }
        assert_eq!(surface.feedback_text(), Some(COLLECTED), "6 of 15");

        collect(&mut session, &mut surface, 1, ItemKind::Clean);
        assert_eq!(session.score(), 7, "floor(15 / 2)");
        assert_eq!(surface.feedback_text(), Some(HALFWAY), "halfway at 7");

        collect(&mut session, &mut surface, 1, ItemKind::Clean);
        assert_eq!(surface.feedback_text(), Some(COLLECTED), "8 is past halfway");

        collect(&mut session, &mut surface, 1, ItemKind::Dirty);
        assert_eq!(session.score(), 7, "back to 7");
        assert_eq!(
            surface.feedback,
            Some((HALFWAY.to_owned(), FeedbackStyle::Lose)),
            "dirty landing on 7 fires too, with loss styling"
        );

        collect(&mut session, &mut surface, 1, ItemKind::Dirty);
        assert_eq!(surface.feedback_text(), Some(UNSAFE_WATER), "6 is below halfway");
        collect(&mut session, &mut surface, 1, ItemKind::Clean);
        assert_eq!(
            surface.feedback,
            Some((HALFWAY.to_owned(), FeedbackStyle::Neutral)),
            "not sticky, fires again"
        );
    }

    #[test]
    fn dirty_item_stepping_over_halfway_stays_silent() {
        let (mut session, mut surface) = started(Difficulty::Normal);
        for _ in 0..14 {
            collect(&mut session, &mut surface, 0, ItemKind::Clean);
        }
        collect(&mut session, &mut surface, 0, ItemKind::Dirty);
        assert_eq!(session.score(), 13, "one above floor(25 / 2)");
        assert_eq!(surface.feedback_text(), Some(UNSAFE_WATER), "13 is not 12");
    }

    #[test]
    fn feedback_clears_after_six_hundred_millis() {
        let (mut session, mut surface) = started(Difficulty::Normal);
        collect(&mut session, &mut surface, 3, ItemKind::Clean);

        run_for(&mut session, &mut surface, Duration::from_millis(500));
        assert_eq!(surface.feedback_text(), Some(COLLECTED), "still visible");

        session.advance(STEP, &mut surface);
        assert_eq!(surface.feedback, None, "cleared at 600ms");
    }

    #[test]
    fn result_message_is_not_wiped_by_pending_feedback() {
        let (mut session, mut surface) = started(Difficulty::Easy);
        run_for(&mut session, &mut surface, Duration::from_millis(29_800));
        collect(&mut session, &mut surface, 0, ItemKind::Clean);

        run_for(&mut session, &mut surface, Duration::from_secs(1));
        assert_eq!(session.phase(), Phase::Ended, "run over");
        assert!(
            surface.feedback_text().is_some_and(|text| LOSS_MESSAGES.contains(&text)),
            "result message stays"
        );
    }

    #[test]
    fn at_most_one_item_on_the_grid() {
        let (mut session, mut surface) = started(Difficulty::Hard);
        for _ in 0..200 {
            session.advance(STEP, &mut surface);
            assert!(surface.occupied() <= 1, "single item at a time");
            let live = session.cells.iter().flatten().count();
            assert_eq!(live, surface.occupied(), "grid view matches state");
        }
    }

    #[test]
    fn roughly_a_quarter_of_items_are_dirty() {
        let (mut session, mut surface) = started(Difficulty::Normal);
        let mut dirty = 0;
        for _ in 0..4000 {
            session.spawn_item(&mut surface);
            if session.cells.iter().flatten().any(|kind| *kind == ItemKind::Dirty) {
                dirty += 1;
            }
        }
        assert!((800..1200).contains(&dirty), "dirty share off: {dirty} of 4000");
    }

    #[test]
    fn every_cell_gets_items() {
        let (mut session, mut surface) = started(Difficulty::Normal);
        let mut hits = [0u32; GRID_CELLS];
        for _ in 0..4500 {
            session.spawn_item(&mut surface);
            let cell = (0..GRID_CELLS).find(|cell| session.item_at(*cell).is_some());
            if let Some(hit) = cell.and_then(|cell| hits.get_mut(cell)) {
                *hit += 1;
            }
        }
        assert_eq!(hits.iter().sum::<u32>(), 4500, "one item per spawn");
        for (cell, count) in hits.iter().enumerate() {
            assert!(
                (400..600).contains(count),
                "cell {cell} got {count} of 4500 spawns"
            );
        }
    }

    #[test]
    fn clicks_on_empty_or_unknown_cells_are_ignored() {
        let (mut session, mut surface) = started(Difficulty::Normal);
        let empty = (0..GRID_CELLS).find(|cell| session.item_at(*cell).is_none());
        assert!(empty.is_some(), "eight cells are empty");
        if let Some(cell) = empty {
            assert!(!session.on_item_clicked(cell, &mut surface), "nothing to collect");
        }
        assert!(!session.on_item_clicked(GRID_CELLS, &mut surface), "out of range");
        assert_eq!(session.score(), 0, "score untouched");
    }

    #[test]
    fn item_can_only_be_collected_once() {
        let (mut session, mut surface) = started(Difficulty::Normal);
        collect(&mut session, &mut surface, 5, ItemKind::Clean);
        assert!(!session.on_item_clicked(5, &mut surface), "second click misses");
        assert_eq!(session.score(), 1, "counted once");
    }

    #[test]
    fn nothing_moves_after_the_run_ends() {
        let (mut session, mut surface) = started(Difficulty::Easy);
        session.advance(Duration::from_secs(30), &mut surface);
        assert_eq!(session.phase(), Phase::Ended, "ended");
        let placed = surface.placed;

        session.spawn_item(&mut surface);
        session.tick(&mut surface);
        run_for(&mut session, &mut surface, Duration::from_secs(5));
        assert_eq!(surface.placed, placed, "no stale spawns");
        assert_eq!(surface.time_left, 0, "no stale countdown");
        assert!(!session.on_item_clicked(0, &mut surface), "no stale clicks");
    }

    #[test]
    fn reset_returns_to_idle_preview() {
        let (mut session, mut surface) = started(Difficulty::Normal);
        run_for(&mut session, &mut surface, Duration::from_secs(5));
        collect(&mut session, &mut surface, 0, ItemKind::Clean);

        session.reset(&mut surface);
        assert_eq!(session.phase(), Phase::Idle, "not running");
        assert_eq!(session.score(), 0, "score reset");
        assert_eq!(session.time_left(), 30, "clock reset");
        assert_eq!(surface.feedback, None, "feedback cleared");
        assert_eq!(surface.occupied(), 0, "grid cleared");
        assert_eq!(surface.controls, (true, false), "start offered");

        let placed = surface.placed;
        run_for(&mut session, &mut surface, Duration::from_secs(10));
        assert_eq!(surface.placed, placed, "spawn timer cancelled");
        assert_eq!(surface.time_left, 30, "countdown cancelled");
    }

    #[test]
    fn reset_then_start_leaves_one_timer_of_each() {
        let (mut session, mut surface) = started(Difficulty::Easy);
        run_for(&mut session, &mut surface, Duration::from_millis(2500));

        session.reset(&mut surface);
        session.start(&mut surface);
        let placed = surface.placed;

        run_for(&mut session, &mut surface, Duration::from_secs(12));
        // 12s at 1200ms cadence, plus nothing from the cancelled run.
        assert_eq!(surface.placed - placed, 10, "single spawn timer");
        assert_eq!(session.time_left(), 18, "single countdown");
    }

    #[test]
    fn start_after_end_begins_a_fresh_run() {
        let (mut session, mut surface) = started(Difficulty::Easy);
        collect(&mut session, &mut surface, 0, ItemKind::Clean);
        session.advance(Duration::from_secs(30), &mut surface);
        assert_eq!(session.phase(), Phase::Ended, "first run over");

        session.start(&mut surface);
        assert_eq!(session.phase(), Phase::Running, "second run");
        assert_eq!(session.score(), 0, "fresh score");
        assert_eq!(session.outcome(), None, "no stale result");
        assert_eq!(surface.feedback, None, "result cleared");

        run_for(&mut session, &mut surface, Duration::from_secs(3));
        assert_eq!(session.time_left(), 27, "one countdown");
    }

    #[test]
    fn difficulty_preview_only_while_idle() {
        let mut session = Session::new(Difficulty::Normal, Some(3));
        let mut surface = Recorder::default();
        session.present(&mut surface);

        session.select_difficulty(Difficulty::Hard, &mut surface);
        assert_eq!(surface.goal, 35, "idle preview shows hard goal");

        session.start(&mut surface);
        session.select_difficulty(Difficulty::Easy, &mut surface);
        assert_eq!(session.profile().goal, 35, "running profile frozen");
        assert_eq!(surface.goal, 35, "display untouched mid-run");

        session.reset(&mut surface);
        assert_eq!(surface.goal, 15, "reset previews the new pick");
        session.start(&mut surface);
        assert_eq!(session.profile(), Difficulty::Easy.profile(), "next run uses it");
    }

    #[test]
    fn seeded_sessions_are_reproducible() {
        let (mut first, mut first_surface) = started(Difficulty::Hard);
        let (mut second, mut second_surface) = started(Difficulty::Hard);
        for _ in 0..50 {
            first.advance(STEP, &mut first_surface);
            second.advance(STEP, &mut second_surface);
            assert_eq!(first.cells, second.cells, "same seed, same grid");
        }
    }
}
