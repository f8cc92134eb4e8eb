use serde::{Deserialize, Deserializer, Serialize};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskId {
    Gym,
    School,
    Work,
}

impl TaskId {
    pub const ALL: [TaskId; 3] = [TaskId::Gym, TaskId::School, TaskId::Work];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskId::Gym => "gym",
            TaskId::School => "school",
            TaskId::Work => "work",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskId::Gym => "Gym",
            TaskId::School => "School",
            TaskId::Work => "Work",
        }
    }
}

/// One value per task, stored as `{ "gym": .., "school": .., "work": .. }`.
///
/// Missing entries fall back to `T::default()` and unknown entries are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PerTask<T> {
    pub gym: T,
    pub school: T,
    pub work: T,
}

impl<T> Index<TaskId> for PerTask<T> {
    type Output = T;

    fn index(&self, task: TaskId) -> &T {
        match task {
            TaskId::Gym => &self.gym,
            TaskId::School => &self.school,
            TaskId::Work => &self.work,
        }
    }
}

impl<T> IndexMut<TaskId> for PerTask<T> {
    fn index_mut(&mut self, task: TaskId) -> &mut T {
        match task {
            TaskId::Gym => &mut self.gym,
            TaskId::School => &mut self.school,
            TaskId::Work => &mut self.work,
        }
    }
}

pub type DailyState = PerTask<bool>;
pub type WeeklyState = PerTask<u32>;

/// The record written under the fixed storage identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    #[serde(default, alias = "todayKey")]
    pub day_key: String,
    #[serde(default)]
    pub week_start_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily: DailyState,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weekly: WeeklyState,
}

/// Treats an explicit `null` bucket the same as a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub task: TaskId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskStatus {
    pub task: TaskId,
    pub label: String,
    pub done_today: bool,
    pub weekly_count: u32,
    pub weekly_percent: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitsResponse {
    pub ready: bool,
    pub day_key: Option<String>,
    pub week_start_key: Option<String>,
    pub tasks: Vec<TaskStatus>,
}
