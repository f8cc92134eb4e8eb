use crate::calendar::PeriodKeys;
use crate::habits::{apply_toggle, reconcile, HabitState};
use crate::models::TaskId;
use crate::storage::{load_snapshot, persist_snapshot};
use chrono::NaiveDate;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<HabitStore>>,
}

impl AppState {
    pub fn new(store: HabitStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// Owns the habit state and keeps the stored snapshot in sync with it.
///
/// The store is not ready until [`HabitStore::activate`] has reconciled the
/// stored snapshot; toggles before that point are dropped.
pub struct HabitStore {
    data_path: PathBuf,
    state: Option<HabitState>,
}

impl HabitStore {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            data_path,
            state: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&HabitState> {
        self.state.as_ref()
    }

    pub async fn activate(&mut self) -> &HabitState {
        self.activate_with(PeriodKeys::current()).await
    }

    pub async fn activate_at(&mut self, today: NaiveDate) -> &HabitState {
        self.activate_with(PeriodKeys::at(today)).await
    }

    async fn activate_with(&mut self, keys: PeriodKeys) -> &HabitState {
        let stored = load_snapshot(&self.data_path).await;
        let state = reconcile(stored, keys);
        info!(
            day = %state.keys.day,
            week_start = %state.keys.week_start,
            "habit store activated"
        );
        self.commit(state).await
    }

    /// Re-runs reconciliation when the day or week has moved on since the
    /// last one. Does nothing before activation.
    pub async fn refresh(&mut self) {
        self.refresh_with(PeriodKeys::current()).await;
    }

    pub async fn refresh_at(&mut self, today: NaiveDate) {
        self.refresh_with(PeriodKeys::at(today)).await;
    }

    async fn refresh_with(&mut self, keys: PeriodKeys) {
        let Some(current) = self.state.as_ref() else {
            return;
        };
        if current.keys == keys {
            return;
        }
        info!(from = %current.keys.day, to = %keys.day, "rolling over habit state");
        let state = reconcile(Some(current.snapshot()), keys);
        self.commit(state).await;
    }

    pub async fn toggle(&mut self, task: TaskId) -> Option<&HabitState> {
        let Some(current) = self.state.as_ref() else {
            debug!(task = task.as_str(), "dropping toggle before activation");
            return None;
        };
        let next = apply_toggle(current, task);
        debug!(
            task = task.as_str(),
            done = next.daily[task],
            weekly = next.weekly[task],
            "toggled"
        );
        Some(self.commit(next).await)
    }

    /// Writes the final state and stops accepting toggles.
    pub async fn deactivate(&mut self) {
        if let Some(state) = self.state.take() {
            self.persist(&state).await;
            info!("habit store deactivated");
        }
    }

    async fn commit(&mut self, state: HabitState) -> &HabitState {
        self.persist(&state).await;
        self.state.insert(state)
    }

    async fn persist(&self, state: &HabitState) {
        if let Err(err) = persist_snapshot(&self.data_path, &state.snapshot()).await {
            warn!(path = %self.data_path.display(), "failed to persist snapshot: {err}");
        }
    }
}
