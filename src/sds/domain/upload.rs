use crate::shared::error::ValidationError;
use crate::shared::security::MAX_UPLOAD_BYTES;
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Last identifier handed out by this process
static LAST_REQUEST_ID: AtomicI64 = AtomicI64::new(0);

/// Client-generated correlation key between an upload and its status polls.
///
/// The value is a millisecond Unix timestamp. Identifiers generated by one
/// process are strictly increasing, so two submissions within the same
/// millisecond still get distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        let now = Utc::now().timestamp_millis();
        let mut previous = LAST_REQUEST_ID.load(Ordering::Relaxed);
        loop {
            let next = now.max(previous + 1);
            match LAST_REQUEST_ID.compare_exchange_weak(
                previous,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Self(next.to_string()),
                Err(actual) => previous = actual,
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file picked for upload, already read into memory
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// `.pdf` extension or a `%PDF` signature
    pub fn looks_like_pdf(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".pdf") || self.bytes.starts_with(b"%PDF")
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Rejects sizes above `max` before anything is read or sent
pub fn check_upload_size(name: &str, size: u64, max: u64) -> Result<(), ValidationError> {
    if size > max {
        return Err(ValidationError::FileTooLarge {
            name: name.to_string(),
            size,
            max,
        });
    }
    Ok(())
}

/// Upload form state: the selected file, its metadata, and the last
/// validation error.
#[derive(Debug, Clone)]
pub struct UploadForm {
    file: Option<SelectedFile>,
    pub sku: String,
    pub upc_ean: String,
    pub product_code: String,
    pub email: Option<String>,
    pub private_import: bool,
    max_bytes: u64,
    error: Option<ValidationError>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new(MAX_UPLOAD_BYTES)
    }
}

impl UploadForm {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            file: None,
            sku: String::new(),
            upc_ean: String::new(),
            product_code: String::new(),
            email: None,
            private_import: false,
            max_bytes,
            error: None,
        }
    }

    /// Selects a file, replacing any previous one.
    ///
    /// A rejected file is not kept and the error is remembered; a valid
    /// file clears any earlier error.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), ValidationError> {
        let checked = check_upload_size(&file.name, file.size(), self.max_bytes).and_then(|_| {
            if file.looks_like_pdf() {
                Ok(())
            } else {
                Err(ValidationError::NotPdf {
                    name: file.name.clone(),
                })
            }
        });

        match checked {
            Ok(()) => {
                self.file = Some(file);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.file = None;
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Records an error found before a file could be selected (e.g. while reading it)
    pub fn reject(&mut self, error: ValidationError) {
        self.file = None;
        self.error = Some(error);
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Checks the form is ready to submit
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        if self.file.is_none() {
            return Err(ValidationError::MissingFile);
        }
        Ok(())
    }

    /// Turns the form into a request tagged with `request_id`
    pub fn into_request(self, request_id: RequestId) -> Result<UploadRequest, ValidationError> {
        self.validate()?;
        let file = self.file.ok_or(ValidationError::MissingFile)?;
        Ok(UploadRequest {
            file,
            sku: self.sku,
            upc_ean: self.upc_ean,
            product_code: self.product_code,
            email: self.email.filter(|e| !e.trim().is_empty()),
            private_import: self.private_import,
            request_id,
        })
    }
}

/// Validated upload ready to be sent as multipart form data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: SelectedFile,
    pub sku: String,
    pub upc_ean: String,
    pub product_code: String,
    pub email: Option<String>,
    pub private_import: bool,
    pub request_id: RequestId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str, size: usize) -> SelectedFile {
        let mut bytes = b"%PDF-1.7\n".to_vec();
        bytes.resize(size.max(bytes.len()), b' ');
        SelectedFile::new(name, bytes)
    }

    #[test]
    fn test_request_ids_are_unique_and_increasing() {
        let first = RequestId::generate();
        let second = RequestId::generate();
        let third = RequestId::generate();

        let a: i64 = first.as_str().parse().unwrap();
        let b: i64 = second.as_str().parse().unwrap();
        let c: i64 = third.as_str().parse().unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_request_id_is_a_timestamp() {
        let before = Utc::now().timestamp_millis();
        let id: i64 = RequestId::generate().as_str().parse().unwrap();
        assert!(id >= before);
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let mut form = UploadForm::default();
        let result = form.select_file(pdf("big.pdf", (MAX_UPLOAD_BYTES + 1) as usize));

        assert!(matches!(result, Err(ValidationError::FileTooLarge { .. })));
        assert!(form.file().is_none());
        assert!(matches!(
            form.error(),
            Some(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_file_at_limit_is_accepted() {
        let mut form = UploadForm::new(64);
        assert!(form.select_file(pdf("exact.pdf", 64)).is_ok());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_valid_pdf_clears_previous_error() {
        let mut form = UploadForm::new(1024);
        form.select_file(pdf("big.pdf", 2048)).unwrap_err();
        assert!(form.error().is_some());

        form.select_file(pdf("ok.pdf", 100)).unwrap();
        assert!(form.error().is_none());
        assert_eq!(form.file().unwrap().name, "ok.pdf");
    }

    #[test]
    fn test_non_pdf_is_rejected() {
        let mut form = UploadForm::default();
        let result = form.select_file(SelectedFile::new("notes.txt", b"hello".to_vec()));
        assert_eq!(
            result,
            Err(ValidationError::NotPdf {
                name: "notes.txt".to_string()
            })
        );
    }

    #[test]
    fn test_pdf_signature_without_extension() {
        let file = SelectedFile::new("scan", b"%PDF-1.4 ...".to_vec());
        assert!(file.looks_like_pdf());
        assert!(SelectedFile::new("SHEET.PDF", vec![]).looks_like_pdf());
    }

    #[test]
    fn test_missing_file() {
        let form = UploadForm::default();
        assert_eq!(form.validate(), Err(ValidationError::MissingFile));
        assert_eq!(
            form.into_request(RequestId::from("1")),
            Err(ValidationError::MissingFile)
        );
    }

    #[test]
    fn test_into_request_carries_metadata() {
        let mut form = UploadForm::default();
        form.select_file(pdf("acetone.pdf", 10)).unwrap();
        form.sku = "SKU-1".to_string();
        form.upc_ean = "0123456789012".to_string();
        form.product_code = "AC-100".to_string();
        form.email = Some("  ".to_string());
        form.private_import = true;

        let request = form.into_request(RequestId::from("1700000000000")).unwrap();
        assert_eq!(request.file.name, "acetone.pdf");
        assert_eq!(request.sku, "SKU-1");
        assert_eq!(request.product_code, "AC-100");
        assert!(request.email.is_none());
        assert!(request.private_import);
        assert_eq!(request.request_id.as_str(), "1700000000000");
    }
}
