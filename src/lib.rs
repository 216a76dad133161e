//! Conversational booking agent for a single Google Calendar resource.
//!
//! A free-text request like "tomorrow at 3 PM" is parsed into a concrete
//! time window, checked against the calendar for conflicts, and booked if
//! the slot is free.

pub mod agent;
pub mod api;
pub mod calendar;
pub mod cli;
pub mod core;
pub mod google;
pub mod timeparse;
