//! Trips API endpoints.

use api_types::trip::{
    PassengerView, ShareView, SplitSummary, TripListResponse, TripNew, TripUpdate, TripView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{NewPassenger, Trip, TripNewCmd, TripUpdateCmd, User};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn passenger_view(trip_id: Uuid, passenger: &engine::Passenger) -> PassengerView {
    PassengerView {
        id: passenger.id,
        trip_id,
        name: passenger.name.clone(),
        surcharge: passenger.surcharge,
        share_amount: passenger.share_amount(),
    }
}

pub(crate) fn trip_view(trip: &Trip) -> TripView {
    TripView {
        id: trip.id,
        destination: trip.destination.clone(),
        start: trip.start.clone(),
        date: trip.date,
        total_cost: trip.total_cost,
        passengers: trip
            .passengers
            .iter()
            .map(|p| passenger_view(trip.id, p))
            .collect(),
    }
}

fn summary_view(summary: engine::SplitSummary) -> SplitSummary {
    SplitSummary {
        trip_id: summary.trip_id,
        total_cost: summary.total_cost,
        total_surcharge: summary.total_surcharge,
        total_shares: summary.total_shares,
        passenger_breakdown: summary
            .shares
            .into_iter()
            .map(|share| ShareView {
                passenger_id: share.passenger_id,
                name: share.name,
                surcharge: share.surcharge,
                total: share.amount,
            })
            .collect(),
    }
}

pub async fn trip_new(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<TripNew>,
) -> Result<(StatusCode, Json<TripView>), ServerError> {
    let trip = state
        .engine
        .new_trip(TripNewCmd {
            user_id: user.email,
            destination: payload.destination,
            start: payload.start,
            date: payload.date,
            total_cost: payload.total_cost,
            passengers: payload
                .passengers
                .into_iter()
                .map(|p| NewPassenger {
                    name: p.name,
                    surcharge: p.surcharge.unwrap_or(0.0),
                })
                .collect(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(trip_view(&trip))))
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<TripListResponse>, ServerError> {
    let trips = state.engine.list_trips(&user.email).await?;

    Ok(Json(TripListResponse {
        trips: trips.iter().map(trip_view).collect(),
    }))
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<TripView>, ServerError> {
    let trip = state.engine.trip_snapshot(trip_id, &user.email).await?;
    Ok(Json(trip_view(&trip)))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<TripUpdate>,
) -> Result<Json<TripView>, ServerError> {
    let cmd = TripUpdateCmd {
        trip_id,
        user_id: user.email,
        destination: payload.destination,
        start: payload.start,
        date: payload.date,
        total_cost: payload.total_cost,
    };
    if cmd.is_empty() {
        return Err(ServerError::Generic("nothing to update".to_string()));
    }

    let trip = state.engine.update_trip(cmd).await?;
    Ok(Json(trip_view(&trip)))
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_trip(trip_id, &user.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current breakdown, as stored.
pub async fn get_split(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<SplitSummary>, ServerError> {
    let summary = state.engine.split_summary(trip_id, &user.email).await?;
    Ok(Json(summary_view(summary)))
}

/// Split the trip again, persist, and return the breakdown.
pub async fn split(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<SplitSummary>, ServerError> {
    let trip = state.engine.recompute_split(trip_id, &user.email).await?;
    Ok(Json(summary_view(engine::SplitSummary::from(&trip))))
}
