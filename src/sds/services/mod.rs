pub mod matrix_pivot;
pub mod upload_phase;

pub use matrix_pivot::{MatrixPivot, PivotRow, PivotTable};
pub use upload_phase::UploadPhase;
