//! Booking and Loyalty Engine for barbershops
//!
//! This crate provides the rules behind appointment booking and the loyalty
//! program of a barbershop: slot availability, the appointment status machine,
//! loyalty points, tiers and the free-cut cycle.

#![warn(missing_docs)]

pub mod api;
pub mod booking;
pub mod config;
pub mod error;
pub mod format;
pub mod front_desk;
pub mod loyalty;
pub mod models;
pub mod store;
pub mod validation;
