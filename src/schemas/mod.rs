//! Request and response bodies for every controller

pub mod auth;
pub mod bookmark;
pub mod payment;
pub mod profile;
pub mod reservation;
pub mod review;
pub mod schedule;
pub mod spot;
pub mod vehicle;
pub mod withdrawal;
