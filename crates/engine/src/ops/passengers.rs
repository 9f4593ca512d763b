use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::{
    Passenger, PassengerNewCmd, ResultEngine, Trip, compute_split,
    util::{normalize_required_name, validate_amount},
};

use super::{Engine, with_tx};

impl Engine {
    /// Append a passenger to a trip and split it again.
    pub async fn add_passenger(&self, cmd: PassengerNewCmd) -> ResultEngine<Trip> {
        let name = normalize_required_name(&cmd.name, "passenger")?;
        let surcharge = validate_amount(cmd.surcharge, "surcharge")?;

        with_tx!(self, |db_tx| {
            let mut trip = self
                .require_trip_owner(&db_tx, cmd.trip_id, &cmd.user_id)
                .await?;
            let trip_id = trip.id;
            let passenger = trip.push_passenger(name, surcharge);
            self.insert_passenger(&db_tx, trip_id, passenger).await?;
            compute_split(&mut trip)?;
            self.save_passengers(&db_tx, &trip).await?;
            Ok(trip)
        })
    }

    /// Remove a passenger from a trip and split it again among the others.
    pub async fn delete_passenger(
        &self,
        trip_id: Uuid,
        passenger_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<Trip> {
        with_tx!(self, |db_tx| {
            let mut trip = self.require_trip_owner(&db_tx, trip_id, user_id).await?;
            let removed = trip.remove_passenger(passenger_id)?;
            self.delete_passenger_row(&db_tx, removed.id).await?;
            compute_split(&mut trip)?;
            self.save_passengers(&db_tx, &trip).await?;
            tracing::info!(
                trip_id = %trip.id,
                passenger_id = %removed.id,
                "passenger removed, fares updated"
            );
            Ok(trip)
        })
    }

    /// Every passenger of every trip owned by `user_id`, with its trip id.
    pub async fn list_passengers(&self, user_id: &str) -> ResultEngine<Vec<(Uuid, Passenger)>> {
        let trips = self.list_trips(user_id).await?;
        Ok(trips
            .into_iter()
            .flat_map(|trip| {
                let trip_id = trip.id;
                trip.passengers.into_iter().map(move |p| (trip_id, p))
            })
            .collect())
    }
}
