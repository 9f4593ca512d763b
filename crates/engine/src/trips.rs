//! The `Trip` holds the total cost of a journey and the passengers sharing
//! it. A user can have multiple trips.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    passengers::{self, Passenger},
    util::parse_uuid,
};

/// A journey and its passengers.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub id: Uuid,
    /// Email of the owner.
    pub user_id: String,
    pub destination: String,
    pub start: Option<String>,
    pub date: Option<NaiveDate>,
    pub total_cost: f64,
    pub created_at: DateTime<Utc>,
    /// Passengers in insertion order.
    pub passengers: Vec<Passenger>,
}

impl Trip {
    pub fn new(user_id: &str, destination: String, total_cost: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            destination,
            start: None,
            date: None,
            total_cost,
            created_at: Utc::now(),
            passengers: Vec::new(),
        }
    }

    pub fn total_surcharge(&self) -> f64 {
        self.passengers.iter().map(|p| p.surcharge).sum()
    }

    /// Sum of the shares as of the last split.
    pub fn total_shares(&self) -> f64 {
        self.passengers.iter().map(Passenger::share_amount).sum()
    }

    /// Append a passenger after the existing ones.
    ///
    /// The new passenger has a zero share until the trip is split again.
    pub fn push_passenger(&mut self, name: String, surcharge: f64) -> &Passenger {
        let position = self
            .passengers
            .iter()
            .map(|p| p.position + 1)
            .max()
            .unwrap_or(0);
        self.passengers
            .push(Passenger::new(name, surcharge, position));
        &self.passengers[self.passengers.len() - 1]
    }

    pub fn remove_passenger(&mut self, passenger_id: Uuid) -> ResultEngine<Passenger> {
        let index = self
            .passengers
            .iter()
            .position(|p| p.id == passenger_id)
            .ok_or_else(|| EngineError::KeyNotFound("passenger not exists".to_string()))?;
        Ok(self.passengers.remove(index))
    }

    /// Rebuild a trip from its row and its passenger rows.
    ///
    /// Passenger rows are sorted by position, so the caller doesn't need to
    /// query them in order.
    pub(crate) fn from_models(
        model: Model,
        passenger_models: Vec<passengers::Model>,
    ) -> ResultEngine<Self> {
        let mut passengers = passenger_models
            .into_iter()
            .map(Passenger::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        passengers.sort_by_key(|p| p.position);

        Ok(Self {
            id: parse_uuid(&model.id, "trip")?,
            user_id: model.user_id,
            destination: model.destination,
            start: model.start,
            date: model.date,
            total_cost: model.total_cost,
            created_at: model.created_at,
            passengers,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub destination: String,
    pub start: Option<String>,
    pub date: Option<Date>,
    #[sea_orm(column_type = "Double")]
    pub total_cost: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::passengers::Entity")]
    Passengers,
}

impl Related<super::passengers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Passengers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Trip> for ActiveModel {
    fn from(trip: &Trip) -> Self {
        Self {
            id: ActiveValue::Set(trip.id.to_string()),
            user_id: ActiveValue::Set(trip.user_id.clone()),
            destination: ActiveValue::Set(trip.destination.clone()),
            start: ActiveValue::Set(trip.start.clone()),
            date: ActiveValue::Set(trip.date),
            total_cost: ActiveValue::Set(trip.total_cost),
            created_at: ActiveValue::Set(trip.created_at),
        }
    }
}
