//! HTTP outbound adapters.
//!
//! This module provides a thin reqwest implementation of the
//! `BookingService` port.

mod dto;
mod http_booking_service;

pub use http_booking_service::HttpBookingService;
