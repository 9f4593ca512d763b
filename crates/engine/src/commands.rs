//! Command structs for engine operations.
//!
//! These types group parameters for write operations (trip creation, update,
//! passenger creation, registration), keeping call sites readable and avoiding
//! long argument lists.

use chrono::NaiveDate;
use uuid::Uuid;

/// A passenger to be added together with a new trip.
#[derive(Clone, Debug)]
pub struct NewPassenger {
    pub name: String,
    pub surcharge: f64,
}

/// Create a trip owned by `user_id`.
#[derive(Clone, Debug)]
pub struct TripNewCmd {
    pub user_id: String,
    pub destination: String,
    pub start: Option<String>,
    pub date: Option<NaiveDate>,
    pub total_cost: f64,
    pub passengers: Vec<NewPassenger>,
}

impl TripNewCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, destination: impl Into<String>, total_cost: f64) -> Self {
        Self {
            user_id: user_id.into(),
            destination: destination.into(),
            start: None,
            date: None,
            total_cost,
            passengers: Vec::new(),
        }
    }

    #[must_use]
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn passenger(mut self, name: impl Into<String>, surcharge: f64) -> Self {
        self.passengers.push(NewPassenger {
            name: name.into(),
            surcharge,
        });
        self
    }
}

/// Update the details of an existing trip.
///
/// `None` fields are left unchanged.
#[derive(Clone, Debug)]
pub struct TripUpdateCmd {
    pub trip_id: Uuid,
    pub user_id: String,
    pub destination: Option<String>,
    pub start: Option<String>,
    pub date: Option<NaiveDate>,
    pub total_cost: Option<f64>,
}

impl TripUpdateCmd {
    #[must_use]
    pub fn new(trip_id: Uuid, user_id: impl Into<String>) -> Self {
        Self {
            trip_id,
            user_id: user_id.into(),
            destination: None,
            start: None,
            date: None,
            total_cost: None,
        }
    }

    #[must_use]
    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    #[must_use]
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn total_cost(mut self, total_cost: f64) -> Self {
        self.total_cost = Some(total_cost);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.destination.is_none()
            && self.start.is_none()
            && self.date.is_none()
            && self.total_cost.is_none()
    }
}

/// Add a passenger to an existing trip.
#[derive(Clone, Debug)]
pub struct PassengerNewCmd {
    pub trip_id: Uuid,
    pub user_id: String,
    pub name: String,
    pub surcharge: f64,
}

impl PassengerNewCmd {
    #[must_use]
    pub fn new(trip_id: Uuid, user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            trip_id,
            user_id: user_id.into(),
            name: name.into(),
            surcharge: 0.0,
        }
    }

    #[must_use]
    pub fn surcharge(mut self, surcharge: f64) -> Self {
        self.surcharge = surcharge;
        self
    }
}

/// Register a new user.
#[derive(Clone, Debug)]
pub struct UserNewCmd {
    pub name: String,
    pub email: String,
    pub password: String,
}
