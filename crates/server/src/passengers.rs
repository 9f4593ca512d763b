//! Passengers API endpoints.
//!
//! Every change to the passenger list splits the trip again, so both write
//! endpoints answer with the whole trip.

use api_types::{
    passenger::PassengerListResponse,
    trip::{PassengerNew, TripView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{PassengerNewCmd, User};
use uuid::Uuid;

use crate::{
    ServerError,
    server::ServerState,
    trips::{passenger_view, trip_view},
};

pub async fn passenger_new(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<PassengerNew>,
) -> Result<(StatusCode, Json<TripView>), ServerError> {
    let trip = state
        .engine
        .add_passenger(PassengerNewCmd {
            trip_id,
            user_id: user.email,
            name: payload.name,
            surcharge: payload.surcharge.unwrap_or(0.0),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(trip_view(&trip))))
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path((trip_id, passenger_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<TripView>, ServerError> {
    let trip = state
        .engine
        .delete_passenger(trip_id, passenger_id, &user.email)
        .await?;

    Ok(Json(trip_view(&trip)))
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<PassengerListResponse>, ServerError> {
    let passengers = state.engine.list_passengers(&user.email).await?;

    Ok(Json(PassengerListResponse {
        passengers: passengers
            .iter()
            .map(|(trip_id, p)| passenger_view(*trip_id, p))
            .collect(),
    }))
}
