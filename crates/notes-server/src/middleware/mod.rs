//! Tower middleware for the HTTP binding.

pub mod request_id;
