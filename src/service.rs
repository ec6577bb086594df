//! Colleague operations as self-contained load, mutate, save transactions

pub mod colleague_service;

pub use colleague_service::{ColleagueService, ServiceError};
