use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    /// Request body for `POST /auth/register`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub name: String,
        pub email: String,
    }
}

pub mod trip {
    use super::*;

    /// A passenger as submitted by clients.
    ///
    /// There is no way to send a share amount: shares are always computed by
    /// the server.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PassengerNew {
        pub name: String,
        #[serde(default)]
        pub surcharge: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripNew {
        pub destination: String,
        #[serde(default)]
        pub start: Option<String>,
        #[serde(default)]
        pub date: Option<NaiveDate>,
        pub total_cost: f64,
        #[serde(default)]
        pub passengers: Vec<PassengerNew>,
    }

    /// Partial update of a trip. Omitted fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TripUpdate {
        #[serde(default)]
        pub destination: Option<String>,
        #[serde(default)]
        pub start: Option<String>,
        #[serde(default)]
        pub date: Option<NaiveDate>,
        #[serde(default)]
        pub total_cost: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PassengerView {
        pub id: Uuid,
        pub trip_id: Uuid,
        pub name: String,
        pub surcharge: f64,
        pub share_amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripView {
        pub id: Uuid,
        pub destination: String,
        pub start: Option<String>,
        pub date: Option<NaiveDate>,
        pub total_cost: f64,
        pub passengers: Vec<PassengerView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripListResponse {
        pub trips: Vec<TripView>,
    }

    /// One line of a split breakdown.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareView {
        pub passenger_id: Uuid,
        pub name: String,
        pub surcharge: f64,
        pub total: f64,
    }

    /// Result of `GET/POST /trips/{trip_id}/split`.
    ///
    /// `total_shares` equals `total_cost` unless the surcharges exceed the
    /// trip cost, in which case it equals `total_surcharge`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SplitSummary {
        pub trip_id: Uuid,
        pub total_cost: f64,
        pub total_surcharge: f64,
        pub total_shares: f64,
        pub passenger_breakdown: Vec<ShareView>,
    }
}

pub mod passenger {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PassengerListResponse {
        pub passengers: Vec<trip::PassengerView>,
    }
}
