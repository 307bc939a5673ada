//! Nearest-shelter locator server.
//!
//! A web application that answers: "where is the closest shelter I can walk
//! to from here, and which way do I go?"

pub mod config;
pub mod domain;
pub mod locator;
pub mod maps;
pub mod polyline;
pub mod web;
