mod client_ip;
mod error_handler;

pub use client_ip::{ClientIp, resolve_client_ip};
pub use error_handler::log_errors;
