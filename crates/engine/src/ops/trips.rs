use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::{
    ResultEngine, SplitSummary, Trip, TripNewCmd, TripUpdateCmd, compute_split,
    util::{normalize_optional_text, normalize_required_name, validate_amount},
};

use super::{Engine, with_tx};

impl Engine {
    /// Create a trip with its passengers and compute their shares.
    ///
    /// The trip is only stored if the split succeeds.
    pub async fn new_trip(&self, cmd: TripNewCmd) -> ResultEngine<Trip> {
        let destination = normalize_required_name(&cmd.destination, "destination")?;
        let total_cost = validate_amount(cmd.total_cost, "total cost")?;

        let mut trip = Trip::new(&cmd.user_id, destination, total_cost);
        trip.start = normalize_optional_text(cmd.start.as_deref());
        trip.date = cmd.date;
        for passenger in cmd.passengers {
            let name = normalize_required_name(&passenger.name, "passenger")?;
            trip.push_passenger(name, passenger.surcharge);
        }
        compute_split(&mut trip)?;

        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, &cmd.user_id).await?;
            self.insert_trip(&db_tx, &trip).await?;
            tracing::info!(
                trip_id = %trip.id,
                passengers = trip.passengers.len(),
                "trip created"
            );
            Ok(trip)
        })
    }

    /// Return a trip as stored, shares included.
    pub async fn trip_snapshot(&self, trip_id: Uuid, user_id: &str) -> ResultEngine<Trip> {
        with_tx!(self, |db_tx| {
            self.require_trip_owner(&db_tx, trip_id, user_id).await
        })
    }

    /// Return every trip of `user_id`, newest first.
    pub async fn list_trips(&self, user_id: &str) -> ResultEngine<Vec<Trip>> {
        with_tx!(self, |db_tx| { self.load_user_trips(&db_tx, user_id).await })
    }

    /// Change trip details and split it again.
    pub async fn update_trip(&self, cmd: TripUpdateCmd) -> ResultEngine<Trip> {
        let destination = cmd
            .destination
            .as_deref()
            .map(|d| normalize_required_name(d, "destination"))
            .transpose()?;
        let total_cost = cmd
            .total_cost
            .map(|c| validate_amount(c, "total cost"))
            .transpose()?;

        with_tx!(self, |db_tx| {
            let mut trip = self
                .require_trip_owner(&db_tx, cmd.trip_id, &cmd.user_id)
                .await?;
            if let Some(destination) = destination {
                trip.destination = destination;
            }
            if cmd.start.is_some() {
                trip.start = normalize_optional_text(cmd.start.as_deref());
            }
            if let Some(date) = cmd.date {
                trip.date = Some(date);
            }
            if let Some(total_cost) = total_cost {
                trip.total_cost = total_cost;
            }

            compute_split(&mut trip)?;
            self.update_trip_row(&db_tx, &trip).await?;
            self.save_passengers(&db_tx, &trip).await?;
            Ok(trip)
        })
    }

    /// Delete a trip together with its passengers.
    pub async fn delete_trip(&self, trip_id: Uuid, user_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let trip = self.require_trip_owner(&db_tx, trip_id, user_id).await?;
            self.delete_trip_rows(&db_tx, trip.id).await?;
            tracing::info!(trip_id = %trip.id, "trip deleted");
            Ok(())
        })
    }

    /// Split a trip again and persist the shares.
    pub async fn recompute_split(&self, trip_id: Uuid, user_id: &str) -> ResultEngine<Trip> {
        with_tx!(self, |db_tx| {
            let mut trip = self.require_trip_owner(&db_tx, trip_id, user_id).await?;
            compute_split(&mut trip)?;
            self.save_passengers(&db_tx, &trip).await?;
            tracing::debug!(
                trip_id = %trip.id,
                total_cost = trip.total_cost,
                total_shares = trip.total_shares(),
                "split recomputed"
            );
            Ok(trip)
        })
    }

    /// Breakdown of the stored shares of a trip.
    pub async fn split_summary(&self, trip_id: Uuid, user_id: &str) -> ResultEngine<SplitSummary> {
        let trip = self.trip_snapshot(trip_id, user_id).await?;
        Ok(SplitSummary::from(&trip))
    }
}
