/// Application layer - Use cases and DTOs
///
/// This layer orchestrates domain services and talks to infrastructure
/// only through ports.
pub mod dto;
pub mod factories;
pub mod use_cases;
