//! Types shared between the aggregator host and its HTTP clients.

pub mod model;
pub mod requests;
