//! Persistence of trips and passengers.
//!
//! Every function takes the transaction of the calling operation, so loading,
//! splitting and saving a trip commit or roll back together.

use std::collections::HashMap;

use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Passenger, ResultEngine, Trip, passengers, trips};

use super::Engine;

impl Engine {
    /// Load a trip with its passengers in insertion order.
    pub(super) async fn load_trip(
        &self,
        db: &DatabaseTransaction,
        trip_id: Uuid,
    ) -> ResultEngine<Trip> {
        let model = trips::Entity::find_by_id(trip_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("trip not exists".to_string()))?;
        let passenger_models = passengers::Entity::find()
            .filter(passengers::Column::TripId.eq(model.id.clone()))
            .order_by_asc(passengers::Column::Position)
            .all(db)
            .await?;
        Trip::from_models(model, passenger_models)
    }

    /// Load every trip of a user, newest first.
    pub(super) async fn load_user_trips(
        &self,
        db: &DatabaseTransaction,
        user_id: &str,
    ) -> ResultEngine<Vec<Trip>> {
        let models = trips::Entity::find()
            .filter(trips::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(trips::Column::CreatedAt)
            .all(db)
            .await?;
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let trip_ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
        let mut by_trip: HashMap<String, Vec<passengers::Model>> = HashMap::new();
        for passenger in passengers::Entity::find()
            .filter(passengers::Column::TripId.is_in(trip_ids))
            .all(db)
            .await?
        {
            by_trip
                .entry(passenger.trip_id.clone())
                .or_default()
                .push(passenger);
        }

        models
            .into_iter()
            .map(|model| {
                let passengers = by_trip.remove(&model.id).unwrap_or_default();
                Trip::from_models(model, passengers)
            })
            .collect()
    }

    /// Insert a new trip and all its passengers.
    pub(super) async fn insert_trip(
        &self,
        db: &DatabaseTransaction,
        trip: &Trip,
    ) -> ResultEngine<()> {
        trips::ActiveModel::from(trip).insert(db).await?;
        for passenger in &trip.passengers {
            let mut model = passengers::ActiveModel::from(passenger);
            model.trip_id = ActiveValue::Set(trip.id.to_string());
            model.insert(db).await?;
        }
        Ok(())
    }

    /// Write back the editable trip fields.
    pub(super) async fn update_trip_row(
        &self,
        db: &DatabaseTransaction,
        trip: &Trip,
    ) -> ResultEngine<()> {
        let model = trips::ActiveModel {
            id: ActiveValue::Set(trip.id.to_string()),
            destination: ActiveValue::Set(trip.destination.clone()),
            start: ActiveValue::Set(trip.start.clone()),
            date: ActiveValue::Set(trip.date),
            total_cost: ActiveValue::Set(trip.total_cost),
            ..Default::default()
        };
        model.update(db).await?;
        Ok(())
    }

    /// Insert one passenger appended to an already stored trip.
    pub(super) async fn insert_passenger(
        &self,
        db: &DatabaseTransaction,
        trip_id: Uuid,
        passenger: &Passenger,
    ) -> ResultEngine<()> {
        let mut model = passengers::ActiveModel::from(passenger);
        model.trip_id = ActiveValue::Set(trip_id.to_string());
        model.insert(db).await?;
        Ok(())
    }

    /// Persist the share of every passenger of `trip`.
    ///
    /// Every passenger must already be stored.
    pub(super) async fn save_passengers(
        &self,
        db: &DatabaseTransaction,
        trip: &Trip,
    ) -> ResultEngine<()> {
        for passenger in &trip.passengers {
            passengers::ActiveModel {
                id: ActiveValue::Set(passenger.id.to_string()),
                share_amount: ActiveValue::Set(passenger.share_amount()),
                ..Default::default()
            }
            .update(db)
            .await?;
        }
        Ok(())
    }

    pub(super) async fn delete_passenger_row(
        &self,
        db: &DatabaseTransaction,
        passenger_id: Uuid,
    ) -> ResultEngine<()> {
        passengers::Entity::delete_by_id(passenger_id.to_string())
            .exec(db)
            .await?;
        Ok(())
    }

    /// Delete a trip and its passengers.
    pub(super) async fn delete_trip_rows(
        &self,
        db: &DatabaseTransaction,
        trip_id: Uuid,
    ) -> ResultEngine<()> {
        passengers::Entity::delete_many()
            .filter(passengers::Column::TripId.eq(trip_id.to_string()))
            .exec(db)
            .await?;
        trips::Entity::delete_by_id(trip_id.to_string())
            .exec(db)
            .await?;
        Ok(())
    }
}
