#![forbid(unsafe_code)]

//! Teamtime: what time is it for the people you work with?
//!
//! Teamtime keeps a small list of colleagues, each with a city and an IANA
//! time zone, in `~/.teamtime/colleagues.json`, and shows their current local
//! time colour-coded by availability.

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod service;
pub mod storage;
pub mod types;
