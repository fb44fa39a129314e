use crate::errors::AppError;
use crate::ledger::Ledger;
use crate::models::{
    Entry, EntryCreatedResponse, EntryForm, EntryKind, EntryRequest, FilterQuery, LimitForm,
    LimitRequest, SummaryResponse,
};
use crate::state::AppState;
use crate::storage::FileStore;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Local;
use std::sync::Arc;
use uuid::Uuid;

/// Upper bound for a daily limit; matches the largest single entry.
pub const MAX_CALORIE_LIMIT: i64 = u32::MAX as i64;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Html<String> {
    let ledger = state.ledger.lock().await;
    let filter = query.filter.unwrap_or_default();
    Html(render_index(&today_string(), &ledger, &filter))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let ledger = state.ledger.lock().await;
    Json(to_response(&ledger))
}

pub async fn list_meals(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<Vec<Entry>> {
    list_entries(&state, EntryKind::Meal, query).await
}

pub async fn list_workouts(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<Vec<Entry>> {
    list_entries(&state, EntryKind::Workout, query).await
}

pub async fn create_meal(
    State(state): State<AppState>,
    Json(payload): Json<EntryRequest>,
) -> Result<Json<EntryCreatedResponse>, AppError> {
    let response = apply_entry(&state, EntryKind::Meal, &payload.name, payload.calories).await?;
    Ok(Json(response))
}

pub async fn create_workout(
    State(state): State<AppState>,
    Json(payload): Json<EntryRequest>,
) -> Result<Json<EntryCreatedResponse>, AppError> {
    let response =
        apply_entry(&state, EntryKind::Workout, &payload.name, payload.calories).await?;
    Ok(Json(response))
}

pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryResponse>, AppError> {
    Ok(Json(apply_removal(&state, EntryKind::Meal, id).await?))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryResponse>, AppError> {
    Ok(Json(apply_removal(&state, EntryKind::Workout, id).await?))
}

pub async fn update_limit(
    State(state): State<AppState>,
    Json(payload): Json<LimitRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let response = apply_limit(&state, payload.limit).await?;
    Ok(Json(response))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let response = with_ledger(&state, |ledger| {
        ledger.reset();
        to_response(ledger)
    })
    .await?;
    Ok(Json(response))
}

pub async fn submit_meal(
    State(state): State<AppState>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect, AppError> {
    submit_entry(&state, EntryKind::Meal, form).await
}

pub async fn submit_workout(
    State(state): State<AppState>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect, AppError> {
    submit_entry(&state, EntryKind::Workout, form).await
}

pub async fn remove_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    apply_removal(&state, EntryKind::Meal, id).await?;
    Ok(Redirect::to("/"))
}

pub async fn remove_workout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    apply_removal(&state, EntryKind::Workout, id).await?;
    Ok(Redirect::to("/"))
}

pub async fn submit_limit(
    State(state): State<AppState>,
    Form(form): Form<LimitForm>,
) -> Result<Redirect, AppError> {
    let limit = parse_number("limit", &form.limit)?;
    apply_limit(&state, limit).await?;
    Ok(Redirect::to("/"))
}

pub async fn submit_reset(State(state): State<AppState>) -> Result<Redirect, AppError> {
    with_ledger(&state, |ledger| ledger.reset()).await?;
    Ok(Redirect::to("/"))
}

async fn submit_entry(state: &AppState, kind: EntryKind, form: EntryForm) -> Result<Redirect, AppError> {
    if form.name.trim().is_empty() || form.calories.trim().is_empty() {
        return Err(AppError::bad_request("please fill in all fields"));
    }
    let calories = parse_number("calories", &form.calories)?;
    apply_entry(state, kind, &form.name, calories).await?;
    Ok(Redirect::to("/"))
}

async fn list_entries(state: &AppState, kind: EntryKind, query: FilterQuery) -> Json<Vec<Entry>> {
    let ledger = state.ledger.lock().await;
    let filter = query.filter.unwrap_or_default();
    Json(ledger.filter(kind, &filter).into_iter().cloned().collect())
}

async fn apply_entry(
    state: &AppState,
    kind: EntryKind,
    name: &str,
    calories: i64,
) -> Result<EntryCreatedResponse, AppError> {
    let entry = Entry::from_input(name, calories)?;
    with_ledger(state, move |ledger| {
        ledger.add(kind, entry.clone());
        EntryCreatedResponse {
            entry,
            summary: ledger.summary(),
        }
    })
    .await
}

async fn apply_removal(
    state: &AppState,
    kind: EntryKind,
    id: Uuid,
) -> Result<SummaryResponse, AppError> {
    with_ledger(state, move |ledger| {
        ledger.remove(kind, id);
        to_response(ledger)
    })
    .await
}

async fn apply_limit(state: &AppState, limit: i64) -> Result<SummaryResponse, AppError> {
    let limit = validate_limit(limit)?;
    with_ledger(state, move |ledger| {
        ledger.set_limit(limit);
        to_response(ledger)
    })
    .await
}

/// Runs a mutation on the blocking pool, since every change writes the store.
async fn with_ledger<T, F>(state: &AppState, mutate: F) -> Result<T, AppError>
where
    F: FnOnce(&mut Ledger<FileStore>) -> T + Send + 'static,
    T: Send + 'static,
{
    let mut ledger = Arc::clone(&state.ledger).lock_owned().await;
    tokio::task::spawn_blocking(move || mutate(&mut ledger))
        .await
        .map_err(AppError::internal)
}

fn validate_limit(limit: i64) -> Result<i64, AppError> {
    if !(1..=MAX_CALORIE_LIMIT).contains(&limit) {
        return Err(AppError::bad_request(format!(
            "limit must be between 1 and {MAX_CALORIE_LIMIT}"
        )));
    }
    Ok(limit)
}

fn parse_number(field: &str, raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(format!("{field} must be a whole number")))
}

fn to_response<P>(ledger: &Ledger<P>) -> SummaryResponse {
    SummaryResponse {
        summary: ledger.summary(),
        meals: ledger.meals().to_vec(),
        workouts: ledger.workouts().to_vec(),
    }
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
