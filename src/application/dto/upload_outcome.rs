use crate::sds::domain::{ExtractionStatus, RequestId, StepOutcome};
use crate::sds::services::UploadPhase;
use serde::Serialize;

/// What the upload controller observed before it stopped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadOutcome {
    pub request_id: RequestId,
    pub phase: UploadPhase,
    /// Last status the server reported, if any query succeeded
    pub last_status: Option<ExtractionStatus>,
    /// Body returned when the upload was accepted
    pub upload_response: serde_json::Value,
    /// Number of status queries issued
    pub polls: u32,
}

impl UploadOutcome {
    /// Display-level reading of the last observed step
    pub fn step_outcome(&self) -> StepOutcome {
        self.last_status
            .as_ref()
            .map(|status| status.step.outcome())
            .unwrap_or(StepOutcome::InProgress)
    }

    /// The pipeline finished on one of its failure steps
    pub fn extraction_failed(&self) -> bool {
        self.phase == UploadPhase::Succeeded && self.step_outcome() == StepOutcome::Failed
    }
}
