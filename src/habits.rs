use crate::calendar::PeriodKeys;
use crate::models::{DailyState, PersistedSnapshot, TaskId, WeeklyState};

pub const WEEK_GOAL_DAYS: u32 = 7;

/// Reconciled daily and weekly state together with the keys it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitState {
    pub keys: PeriodKeys,
    pub daily: DailyState,
    pub weekly: WeeklyState,
}

impl HabitState {
    pub fn fresh(keys: PeriodKeys) -> Self {
        Self {
            keys,
            daily: DailyState::default(),
            weekly: WeeklyState::default(),
        }
    }

    pub fn snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            day_key: self.keys.day.clone(),
            week_start_key: self.keys.week_start.clone(),
            daily: self.daily,
            weekly: self.weekly,
        }
    }
}

/// Resets whichever bucket of `stored` no longer matches `keys`.
///
/// The daily and weekly buckets are checked independently, and the result
/// always carries `keys`, never the stored ones.
pub fn reconcile(stored: Option<PersistedSnapshot>, keys: PeriodKeys) -> HabitState {
    let Some(stored) = stored else {
        return HabitState::fresh(keys);
    };

    let weekly = if stored.week_start_key == keys.week_start {
        stored.weekly
    } else {
        WeeklyState::default()
    };
    let daily = if stored.day_key == keys.day {
        stored.daily
    } else {
        DailyState::default()
    };

    HabitState { keys, daily, weekly }
}

/// Flips `task` for today and moves its weekly count with it.
pub fn apply_toggle(state: &HabitState, task: TaskId) -> HabitState {
    let mut next = state.clone();
    let done = !state.daily[task];
    next.daily[task] = done;

    let count = state.weekly[task];
    next.weekly[task] = if done {
        count.saturating_add(1)
    } else {
        count.saturating_sub(1)
    };
    next
}

/// Share of the weekly goal reached, clamped to 100.
pub fn weekly_percent(count: u32) -> u8 {
    let ratio = (f64::from(count) / f64::from(WEEK_GOAL_DAYS)).min(1.0);
    (ratio * 100.0).round() as u8
}
