/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven (outbound) ports exist; the CLI calls use cases directly.
pub mod outbound;
