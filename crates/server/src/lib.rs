use axum::{
    Json,
    http::{StatusCode, header},
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{app, run_with_listener};

mod passengers;
mod server;
mod trips;
mod user;

pub mod types {
    pub mod user {
        pub use api_types::user::{UserNew, UserView};
    }

    pub mod trip {
        pub use api_types::trip::{
            PassengerNew, PassengerView, ShareView, SplitSummary, TripListResponse, TripNew,
            TripUpdate, TripView,
        };
    }

    pub mod passenger {
        pub use api_types::passenger::PassengerListResponse;
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EngineError::PasswordHash(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        EngineError::InvalidAmount(_) | EngineError::InvalidName(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::PasswordHash(hash_err) => {
            tracing::error!("password hashing error: {hash_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServerError::Engine(err) => {
                let status = status_for_engine_error(&err);
                let body = Json(Error {
                    error: message_for_engine_error(err),
                });
                if status == StatusCode::UNAUTHORIZED {
                    (status, [(header::WWW_AUTHENTICATE, "Basic")], body).into_response()
                } else {
                    (status, body).into_response()
                }
            }
            ServerError::Generic(error) => {
                (StatusCode::BAD_REQUEST, Json(Error { error })).into_response()
            }
        }
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
