//! MARTA rail dashboard server.
//!
//! Tracks live train positions on the MARTA rail network and serves them
//! as a map and a filterable list of train cards.

pub mod cache;
pub mod config;
pub mod domain;
pub mod feed;
pub mod network;
pub mod poller;
pub mod session;
pub mod status;
pub mod web;
