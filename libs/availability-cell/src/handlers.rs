use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::NaiveDate;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use portal_client::BackendClient;
use portal_config::PortalConfig;
use portal_models::error::AppError;

use crate::models::CalendarView;
use crate::services::store::AvailabilityStore;
use crate::services::{recurrence, slots, window};

/// Per-process availability state: the store must outlive individual
/// requests so its loaded window actually acts as a cache.
pub struct AvailabilityState {
    pub config: PortalConfig,
    pub store: AvailabilityStore,
}

impl AvailabilityState {
    pub fn new(config: PortalConfig) -> Self {
        let backend = Arc::new(BackendClient::new(&config));
        let store = AvailabilityStore::new(backend, Duration::from_secs(config.load_timeout_secs));
        Self { config, store }
    }
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub view: Option<CalendarView>,
}

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
    pub duration_minutes: Option<i64>,
}

/// A slot cannot be longer than a day.
const MAX_SLOT_MINUTES: i64 = 24 * 60;

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<AvailabilityState>>,
    Path(dentist_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<Value>, AppError> {
    let view = query.view.unwrap_or(CalendarView::Month);
    let date_window =
        window::range_for_view(query.date, view, state.config.prefetch_horizon_months);

    let token = auth.as_ref().map(|header| header.token());
    let records = state
        .store
        .load(&dentist_id, date_window, token)
        .await
        .map_err(AppError::Upstream)?;

    Ok(Json(json!({
        "dentist_id": dentist_id,
        "window": date_window,
        "records": records,
    })))
}

#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<AvailabilityState>>,
    Path(dentist_id): Path<String>,
    Query(query): Query<SlotsQuery>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<Value>, AppError> {
    let slot_minutes = query
        .duration_minutes
        .unwrap_or(state.config.slot_duration_minutes);
    if slot_minutes <= 0 || slot_minutes > MAX_SLOT_MINUTES {
        return Err(AppError::BadRequest(format!(
            "duration_minutes must be between 1 and {}",
            MAX_SLOT_MINUTES
        )));
    }

    // Slots for one day still load the surrounding month window so that
    // day-to-day navigation within the month stays on the loaded window.
    let date_window = window::range_for_view(
        query.date,
        CalendarView::Month,
        state.config.prefetch_horizon_months,
    );

    let token = auth.as_ref().map(|header| header.token());
    let records = state
        .store
        .load(&dentist_id, date_window, token)
        .await
        .map_err(AppError::Upstream)?;

    let mut computed: Vec<_> = recurrence::applicable_on(&records, query.date)
        .into_iter()
        .flat_map(|record| slots::expand(record, query.date, slot_minutes))
        .collect();
    computed.sort_by(|a, b| a.slot_start.cmp(&b.slot_start));

    Ok(Json(json!({
        "dentist_id": dentist_id,
        "date": query.date,
        "slots": computed,
    })))
}
