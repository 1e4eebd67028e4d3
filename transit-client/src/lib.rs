//! Transit rider client core.
//!
//! Answers two questions for a bus rider: "where are the buses on my routes
//! right now?" and "when does the next bus leave my stop?"
//!
//! - [`feed`] keeps a live, self-reconnecting position feed
//! - [`schedule`] turns per-trip timetables into per-stop departure lists
//! - [`api`] and [`catalog`] load routes and schedules over HTTP

pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod feed;
pub mod map;
pub mod schedule;
pub mod selection;
