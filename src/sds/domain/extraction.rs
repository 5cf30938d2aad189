use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Named stage of the server-side extraction pipeline.
///
/// Wire spellings are kept verbatim, including `SPLITING` and
/// `EXTRACTIN_METRICS`. Steps the client does not know are preserved in
/// `Unknown` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtractionStep {
    PreprocessFiles,
    Received,
    Splitting,
    Extracting,
    LoadingAssets,
    ExtractingMetrics,
    Saving,
    LastStep,
    Success,
    Failed,
    CanNotSplitFile,
    PdfIsNotSds,
    OcrFailed,
    SdsExist,
    Unknown(String),
}

/// How a step should be read by a person; the poll loop never looks at this
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    InProgress,
    Succeeded,
    Failed,
}

/// Icon shown next to a step label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIcon {
    Settings,
    CloudUpload,
    CheckCircle,
}

impl StepIcon {
    pub fn glyph(&self, tone: StepTone) -> &'static str {
        match (self, tone) {
            (StepIcon::Settings, _) => "⚙️",
            (StepIcon::CloudUpload, _) => "📤",
            (StepIcon::CheckCircle, StepTone::Error) => "❌",
            (StepIcon::CheckCircle, _) => "✅",
        }
    }
}

/// Colour family of a step indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTone {
    Info,
    Primary,
    Warning,
    Success,
    Error,
}

/// Label and icon for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDisplay {
    pub label: &'static str,
    pub icon: StepIcon,
    pub tone: StepTone,
}

impl StepDisplay {
    const fn new(label: &'static str, icon: StepIcon, tone: StepTone) -> Self {
        Self { label, icon, tone }
    }

    /// Fallback for steps without a dedicated entry
    pub const PROCESSING: StepDisplay =
        StepDisplay::new("Processing SDS…", StepIcon::Settings, StepTone::Info);

    pub fn glyph(&self) -> &'static str {
        self.icon.glyph(self.tone)
    }
}

impl fmt::Display for StepDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.glyph(), self.label)
    }
}

impl ExtractionStep {
    pub fn from_wire(step: &str) -> Self {
        match step {
            "PREPROCESS_FILES" => Self::PreprocessFiles,
            "RECEIVED" => Self::Received,
            "SPLITING" => Self::Splitting,
            "EXTRACTING" => Self::Extracting,
            "LOADING_ASSETS" => Self::LoadingAssets,
            "EXTRACTIN_METRICS" => Self::ExtractingMetrics,
            "SAVING" => Self::Saving,
            "LAST_STEP" => Self::LastStep,
            "SUCCESS" => Self::Success,
            "FAILED" => Self::Failed,
            "CAN_NOT_SPLIT_FILE" => Self::CanNotSplitFile,
            "PDF_IS_NOT_SDS" => Self::PdfIsNotSds,
            "OCR_FAILED" => Self::OcrFailed,
            "SDS_EXIST" => Self::SdsExist,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::PreprocessFiles => "PREPROCESS_FILES",
            Self::Received => "RECEIVED",
            Self::Splitting => "SPLITING",
            Self::Extracting => "EXTRACTING",
            Self::LoadingAssets => "LOADING_ASSETS",
            Self::ExtractingMetrics => "EXTRACTIN_METRICS",
            Self::Saving => "SAVING",
            Self::LastStep => "LAST_STEP",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::CanNotSplitFile => "CAN_NOT_SPLIT_FILE",
            Self::PdfIsNotSds => "PDF_IS_NOT_SDS",
            Self::OcrFailed => "OCR_FAILED",
            Self::SdsExist => "SDS_EXIST",
            Self::Unknown(raw) => raw,
        }
    }

    /// True for steps after which the server reports no further change.
    ///
    /// Success and failure both end polling.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Success
                | Self::Failed
                | Self::CanNotSplitFile
                | Self::PdfIsNotSds
                | Self::OcrFailed
                | Self::SdsExist
        )
    }

    pub fn outcome(&self) -> StepOutcome {
        match self {
            Self::Success => StepOutcome::Succeeded,
            Self::Failed
            | Self::CanNotSplitFile
            | Self::PdfIsNotSds
            | Self::OcrFailed
            | Self::SdsExist => StepOutcome::Failed,
            _ => StepOutcome::InProgress,
        }
    }

    pub fn display(&self) -> StepDisplay {
        use StepIcon::*;
        use StepTone::*;
        match self {
            Self::PreprocessFiles => StepDisplay::new("Pre-processing file...", Settings, Info),
            Self::Received => StepDisplay::new("File received", CloudUpload, Primary),
            Self::Splitting => StepDisplay::new("Splitting document...", Settings, Primary),
            Self::Extracting => StepDisplay::new("Extracting SDS content...", Settings, Warning),
            Self::LoadingAssets => StepDisplay::new("Loading assets data...", Settings, Warning),
            Self::ExtractingMetrics => {
                StepDisplay::new("Extracting metric data...", Settings, Warning)
            }
            Self::Saving => StepDisplay::new("Saving extracted data...", Settings, Warning),
            Self::LastStep => StepDisplay::new("Finalizing SDS", Settings, Info),
            Self::Success => StepDisplay::new("SDS ready", CheckCircle, Success),
            Self::Failed => StepDisplay::new("Extraction failed", CheckCircle, Error),
            Self::CanNotSplitFile => StepDisplay::new("Cannot split file", CheckCircle, Error),
            Self::PdfIsNotSds => StepDisplay::new("Invalid SDS document", CheckCircle, Error),
            Self::OcrFailed => StepDisplay::new("OCR failed", CheckCircle, Error),
            Self::SdsExist => StepDisplay::new("SDS already exists", CheckCircle, Error),
            Self::Unknown(_) => StepDisplay::PROCESSING,
        }
    }
}

impl Default for ExtractionStep {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl fmt::Display for ExtractionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for ExtractionStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for ExtractionStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Self::from_wire(&s)).unwrap_or_default())
    }
}

/// Snapshot returned by the extraction status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStatus {
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: u8,
    #[serde(default)]
    pub step: ExtractionStep,
}

impl ExtractionStatus {
    pub fn new(progress: u8, step: ExtractionStep) -> Self {
        Self {
            progress: progress.min(100),
            step,
        }
    }

    /// Polling stops once progress reaches 100 or the step is terminal
    pub fn is_terminal(&self) -> bool {
        self.progress >= 100 || self.step.is_terminal()
    }
}

/// Accepts integer or fractional progress and clamps it to 0..=100
fn deserialize_progress<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.clamp(0.0, 100.0).round() as u8)
}
