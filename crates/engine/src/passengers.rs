//! The module contains `Passenger` struct and its table.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{ResultEngine, util::parse_uuid};

/// A rider of a [`Trip`](crate::Trip).
///
/// `surcharge` is an input provided by the user. `share_amount` is derived by
/// [`compute_split`](crate::compute_split) and can only be read from outside
/// the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Passenger {
    pub id: Uuid,
    pub name: String,
    pub surcharge: f64,
    share_amount: f64,
    /// Insertion order inside the trip.
    pub position: i32,
}

impl Passenger {
    pub fn new(name: String, surcharge: f64, position: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            surcharge,
            share_amount: 0.0,
            position,
        }
    }

    /// Amount owed by this passenger as of the last split.
    pub fn share_amount(&self) -> f64 {
        self.share_amount
    }

    pub(crate) fn set_share_amount(&mut self, amount: f64) {
        self.share_amount = amount;
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "passengers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub trip_id: String,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub surcharge: f64,
    #[sea_orm(column_type = "Double")]
    pub share_amount: f64,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trips::Entity",
        from = "Column::TripId",
        to = "super::trips::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Trips,
}

impl Related<super::trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Passenger> for ActiveModel {
    fn from(passenger: &Passenger) -> Self {
        Self {
            id: ActiveValue::Set(passenger.id.to_string()),
            trip_id: ActiveValue::NotSet,
            name: ActiveValue::Set(passenger.name.clone()),
            surcharge: ActiveValue::Set(passenger.surcharge),
            share_amount: ActiveValue::Set(passenger.share_amount),
            position: ActiveValue::Set(passenger.position),
        }
    }
}

impl TryFrom<Model> for Passenger {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "passenger")?,
            name: model.name,
            surcharge: model.surcharge,
            share_amount: model.share_amount,
            position: model.position,
        })
    }
}
