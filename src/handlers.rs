use crate::errors::AppError;
use crate::habits::weekly_percent;
use crate::models::{HabitsResponse, TaskId, TaskStatus, ToggleRequest};
use crate::state::{AppState, HabitStore};
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut store = state.store.lock().await;
    store.refresh().await;
    Html(render_index(store.state()))
}

pub async fn get_habits(State(state): State<AppState>) -> Json<HabitsResponse> {
    let mut store = state.store.lock().await;
    store.refresh().await;
    Json(to_response(&store))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<HabitsResponse>, AppError> {
    let response = apply_toggle(&state, payload.task).await?;
    Ok(Json(response))
}

pub async fn toggle_form(
    State(state): State<AppState>,
    Path(task): Path<TaskId>,
) -> Result<Redirect, AppError> {
    apply_toggle(&state, task).await?;
    Ok(Redirect::to("/"))
}

async fn apply_toggle(state: &AppState, task: TaskId) -> Result<HabitsResponse, AppError> {
    let mut store = state.store.lock().await;
    store.refresh().await;
    if store.toggle(task).await.is_none() {
        return Err(AppError::unavailable("habit store is not ready"));
    }
    Ok(to_response(&store))
}

fn to_response(store: &HabitStore) -> HabitsResponse {
    let ready = store.is_ready();
    let Some(state) = store.state().filter(|_| ready) else {
        return HabitsResponse {
            ready,
            day_key: None,
            week_start_key: None,
            tasks: Vec::new(),
        };
    };

    let tasks = TaskId::ALL
        .into_iter()
        .map(|task| TaskStatus {
            task,
            label: task.label().to_string(),
            done_today: state.daily[task],
            weekly_count: state.weekly[task],
            weekly_percent: weekly_percent(state.weekly[task]),
        })
        .collect();

    HabitsResponse {
        ready,
        day_key: Some(state.keys.day.clone()),
        week_start_key: Some(state.keys.week_start.clone()),
        tasks,
    }
}
