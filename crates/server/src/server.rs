use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use std::sync::Arc;

use crate::{ServerError, passengers, trips, user};
use engine::{Engine, EngineError};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Authenticate the request with HTTP Basic credentials (`email:password`).
///
/// On success the [`engine::User`] is stored in the request extensions, where
/// handlers pick it up with `Extension<User>`.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(TypedHeader(credentials)) = auth_header else {
        return ServerError::from(EngineError::InvalidCredentials).into_response();
    };
    if credentials.username().is_empty() || credentials.password().is_empty() {
        return ServerError::from(EngineError::InvalidCredentials).into_response();
    }

    let user = match state
        .engine
        .authenticate(credentials.username(), credentials.password())
        .await
    {
        Ok(user) => user,
        Err(err) => {
            if err == EngineError::InvalidCredentials {
                tracing::debug!("rejected credentials for {}", credentials.username());
            }
            return ServerError::from(err).into_response();
        }
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

fn router(state: ServerState) -> Router {
    let authenticated = Router::new()
        .route("/user/me", get(user::me))
        .route("/trips", get(trips::list).post(trips::trip_new))
        .route(
            "/trips/{trip_id}",
            get(trips::get)
                .patch(trips::update)
                .delete(trips::remove),
        )
        .route(
            "/trips/{trip_id}/split",
            get(trips::get_split).post(trips::split),
        )
        .route(
            "/trips/{trip_id}/passengers",
            post(passengers::passenger_new),
        )
        .route(
            "/trips/{trip_id}/passengers/{passenger_id}",
            delete(passengers::remove),
        )
        .route("/passengers", get(passengers::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/auth/register", post(user::register))
        .merge(authenticated)
        .with_state(state)
}

/// Build the application router around `engine`.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}
