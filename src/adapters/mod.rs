/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: the SDS HTTP API,
/// the console, the local filesystem and the output formatters.
pub mod outbound;
