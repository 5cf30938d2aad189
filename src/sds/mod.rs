/// SDS domain: value types for the remote API and the pure services built on them
pub mod domain;
pub mod services;
