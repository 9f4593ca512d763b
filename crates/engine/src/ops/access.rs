use sea_orm::{DatabaseTransaction, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, Trip, users};

use super::Engine;

impl Engine {
    /// Load a trip on behalf of `user_id`.
    ///
    /// Every operation that addresses a trip goes through here. A trip owned
    /// by someone else is reported like a missing one.
    pub(super) async fn require_trip_owner(
        &self,
        db: &DatabaseTransaction,
        trip_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<Trip> {
        let trip = self.load_trip(db, trip_id).await?;
        if trip.user_id != user_id {
            return Err(EngineError::KeyNotFound("trip not exists".to_string()));
        }
        Ok(trip)
    }

    pub(super) async fn require_user_exists(
        &self,
        db: &DatabaseTransaction,
        email: &str,
    ) -> ResultEngine<()> {
        let exists = users::Entity::find_by_id(email.to_string())
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Err(EngineError::KeyNotFound("user not exists".to_string()));
        }
        Ok(())
    }
}
