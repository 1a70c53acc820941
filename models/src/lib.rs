//! Database model definitions

#[macro_use]
extern crate tracing;

mod bookmark;
mod pagination;
mod payment;
mod profile;
mod reservation;
mod review;
mod schedule;
mod spot;
mod state;
mod stored_file;
mod vehicle;
mod withdrawal;

pub mod schema;

pub use bookmark::*;
pub use pagination::*;
pub use payment::*;
pub use profile::*;
pub use reservation::*;
pub use review::*;
pub use schedule::*;
pub use spot::*;
pub use state::*;
pub use stored_file::*;
pub use vehicle::*;
pub use withdrawal::*;
