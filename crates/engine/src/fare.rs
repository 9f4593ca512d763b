//! Fare splitting.
//!
//! Every passenger pays an equal part of what is left of the trip cost once
//! all surcharges are taken out, plus their own surcharge:
//!
//! ```text
//! base        = max(total_cost - Σ surcharge, 0)
//! equal_share = base / max(passengers, 1)
//! share       = equal_share + surcharge
//! ```
//!
//! The shares add up to `total_cost` as long as the surcharges fit inside it.
//! When they don't, the base is clamped to zero and every passenger pays
//! exactly their surcharge, so the shares add up to the total surcharge.
//!
//! # Examples
//!
//! ```rust
//! use engine::{Trip, compute_split};
//!
//! let mut trip = Trip::new("alice@example.com", "Rome".to_string(), 100.0);
//! trip.push_passenger("A".to_string(), 20.0);
//! trip.push_passenger("B".to_string(), 0.0);
//!
//! let shares: Vec<f64> = compute_split(&mut trip)
//!     .unwrap()
//!     .iter()
//!     .map(|p| p.share_amount())
//!     .collect();
//! assert_eq!(shares, [60.0, 40.0]);
//! ```

use uuid::Uuid;

use crate::{EngineError, Passenger, ResultEngine, Trip, util::validate_amount};

/// Compute every passenger's share and store it on the passenger.
///
/// Only `share_amount` is written. The result depends on `total_cost` and on
/// each `surcharge`, never on the previous `share_amount`, so splitting an
/// unchanged trip again gives the same shares.
///
/// Inputs are validated before anything is written: a negative or non-finite
/// cost or surcharge, or surcharges whose sum overflows, leave the trip
/// untouched.
pub fn compute_split(trip: &mut Trip) -> ResultEngine<&[Passenger]> {
    validate_amount(trip.total_cost, "total cost")?;
    let mut total_surcharge = 0.0;
    for passenger in &trip.passengers {
        total_surcharge += validate_amount(
            passenger.surcharge,
            &format!("surcharge of '{}'", passenger.name),
        )?;
    }
    if !total_surcharge.is_finite() {
        return Err(EngineError::InvalidAmount(
            "sum of surcharges must be a finite number".to_string(),
        ));
    }

    let base = (trip.total_cost - total_surcharge).max(0.0);
    let equal_share = base / trip.passengers.len().max(1) as f64;

    for passenger in &mut trip.passengers {
        passenger.set_share_amount(equal_share + passenger.surcharge);
    }

    Ok(&trip.passengers)
}

/// One line of a [`SplitSummary`].
#[derive(Clone, Debug, PartialEq)]
pub struct Share {
    pub passenger_id: Uuid,
    pub name: String,
    pub surcharge: f64,
    pub amount: f64,
}

/// Read model of a split trip.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitSummary {
    pub trip_id: Uuid,
    pub total_cost: f64,
    pub total_surcharge: f64,
    /// Equal to `total_cost`, unless surcharges exceed it.
    pub total_shares: f64,
    pub shares: Vec<Share>,
}

impl From<&Trip> for SplitSummary {
    fn from(trip: &Trip) -> Self {
        Self {
            trip_id: trip.id,
            total_cost: trip.total_cost,
            total_surcharge: trip.total_surcharge(),
            total_shares: trip.total_shares(),
            shares: trip
                .passengers
                .iter()
                .map(|p| Share {
                    passenger_id: p.id,
                    name: p.name.clone(),
                    surcharge: p.surcharge,
                    amount: p.share_amount(),
                })
                .collect(),
        }
    }
}
