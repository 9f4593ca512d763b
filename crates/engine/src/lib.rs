//! Trip cost splitting.
//!
//! [`compute_split`] is the fare computation; [`Engine`] wraps it with
//! persistence, users and per-trip ownership.

pub use commands::{NewPassenger, PassengerNewCmd, TripNewCmd, TripUpdateCmd, UserNewCmd};
pub use error::EngineError;
pub use fare::{Share, SplitSummary, compute_split};
pub use ops::{Engine, EngineBuilder};
pub use passengers::Passenger;
pub use trips::Trip;
pub use users::User;

mod commands;
mod error;
mod fare;
mod ops;
mod passengers;
mod trips;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
