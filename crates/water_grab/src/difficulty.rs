use core::time::Duration;

use strum::{Display, EnumIter, EnumString};

/// Difficulty tier picked before a run starts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    #[strum(to_string = "Easy", serialize = "easy")]
    Easy,
    #[default]
    #[strum(to_string = "Normal", serialize = "normal")]
    Normal,
    #[strum(to_string = "Hard", serialize = "hard")]
    Hard,
}

/// Goal, duration and spawn cadence of one difficulty tier.
///
/// A copy is taken when a run starts, so changing the selected tier mid-run
/// never affects the run in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    /// Items to collect for a win.
    pub goal: u32,
    /// Length of a run in whole seconds.
    pub duration_secs: u32,
    pub spawn_interval_ms: u64,
}

impl DifficultyProfile {
    pub const fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Score at which the halfway message fires.
    pub const fn halfway(&self) -> u32 {
        self.goal / 2
    }
}

const EASY: DifficultyProfile = DifficultyProfile {
    goal: 15,
    duration_secs: 30,
    spawn_interval_ms: 1200,
};

const NORMAL: DifficultyProfile = DifficultyProfile {
    goal: 25,
    duration_secs: 30,
    spawn_interval_ms: 1000,
};

const HARD: DifficultyProfile = DifficultyProfile {
    goal: 35,
    duration_secs: 30,
    spawn_interval_ms: 600,
};

impl Difficulty {
    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => EASY,
            Self::Normal => NORMAL,
            Self::Hard => HARD,
        }
    }
}
