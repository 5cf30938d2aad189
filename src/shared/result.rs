/// Crate-wide Result with anyhow::Error as the error type.
/// Typed errors (`SdsError`, `ValidationError`, `ApiError`) are wrapped on the way up
/// and recovered with `downcast_ref` where the CLI needs to pick an exit code.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
