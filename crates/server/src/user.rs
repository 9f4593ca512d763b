//! Registration and the authenticated user's profile.

use api_types::user::{UserNew, UserView};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::{User, UserNewCmd};

use crate::{ServerError, server::ServerState};

fn user_view(user: User) -> UserView {
    UserView {
        name: user.name,
        email: user.email,
    }
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state
        .engine
        .register_user(UserNewCmd {
            name: payload.name,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user_view(user))))
}

pub async fn me(Extension(user): Extension<User>) -> Json<UserView> {
    Json(user_view(user))
}
