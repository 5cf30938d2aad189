use super::query::SdsId;
use super::transport_info::TransportInfoColumn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SDS entry as listed by the search endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SdsSummary {
    #[serde(default)]
    pub id: SdsId,
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub pdf_md5: String,
    #[serde(default)]
    pub sds_pdf_product_name: String,
    #[serde(default)]
    pub sds_pdf_manufacture_name: String,
    #[serde(default)]
    pub sds_pdf_revision_date: Option<String>,
    #[serde(default)]
    pub master_date: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub regulation_area: Option<String>,
    #[serde(default)]
    pub permanent_link: Option<String>,
}

/// Hazard or precautionary statement
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatementCode {
    #[serde(default)]
    pub statement_code: String,
    #[serde(default)]
    pub statements: String,
}

/// Structured data the extraction pipeline pulled out of the PDF.
///
/// Only the sections the client renders are typed; everything else stays in
/// `other` so the raw view loses nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedData {
    #[serde(default)]
    pub hazard_codes: Option<Vec<StatementCode>>,
    #[serde(default)]
    pub precautionary_codes: Option<Vec<StatementCode>>,
    #[serde(default)]
    pub ghs_pictograms: Option<Vec<String>>,
    #[serde(default)]
    pub transport_information: Option<Vec<TransportInfoColumn>>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// Full SDS record returned by the details and upload endpoints
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SdsDetails {
    #[serde(flatten)]
    pub summary: SdsSummary,
    #[serde(default)]
    pub extracted_data: ExtractedData,
    #[serde(default)]
    pub other_data: serde_json::Value,
}

impl SdsDetails {
    /// Transport information table, looked up in `extracted_data` first and
    /// then in `other_data`
    pub fn transport_information(&self) -> Option<Vec<TransportInfoColumn>> {
        if let Some(columns) = &self.extracted_data.transport_information {
            return Some(columns.clone());
        }
        self.other_data
            .get("transport_information")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Newer revision of an SDS
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewerSds {
    #[serde(default)]
    pub sds_id: Option<SdsId>,
    #[serde(default)]
    pub revision_date: Option<String>,
    #[serde(default)]
    pub search_id: Option<SdsId>,
}

/// Answer of the revision info endpoints; `newer` is null when the SDS is current
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewRevisionInfo {
    #[serde(default)]
    pub sds_id: Option<SdsId>,
    #[serde(default)]
    pub pdf_md5: Option<String>,
    #[serde(default)]
    pub newer: Option<NewerSds>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details_json() -> serde_json::Value {
        json!({
            "id": "gAAAAABlX2",
            "uuid": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "pdf_md5": "d41d8cd98f00b204e9800998ecf8427e",
            "sds_pdf_product_name": "Acetone",
            "sds_pdf_manufacture_name": "ACME Chemicals",
            "sds_pdf_revision_date": "2023-04-01",
            "master_date": null,
            "language": "en",
            "regulation_area": "EU",
            "permanent_link": "https://example.com/sds/1.pdf",
            "extracted_data": {
                "hazard_codes": [{"statement_code": "H225", "statements": "Highly flammable"}],
                "ghs_pictograms": ["https://example.com/ghs02.png"],
                "signal_word": "Danger"
            },
            "other_data": {}
        })
    }

    #[test]
    fn test_details_deserialization() {
        let details: SdsDetails = serde_json::from_value(details_json()).unwrap();
        assert_eq!(details.summary.sds_pdf_product_name, "Acetone");
        assert_eq!(details.summary.id.as_str(), "gAAAAABlX2");
        assert!(details.summary.uuid.is_some());
        let hazards = details.extracted_data.hazard_codes.as_ref().unwrap();
        assert_eq!(hazards[0].statement_code, "H225");
        assert_eq!(details.extracted_data.other["signal_word"], "Danger");
        assert!(details.transport_information().is_none());
    }

    #[test]
    fn test_transport_information_from_other_data() {
        let mut raw = details_json();
        raw["other_data"] = json!({
            "transport_information": [
                {"tag": "ADR", "value": [{"tag": "UN_NUMBER", "default_literal": "UN number", "value": "UN1090"}]}
            ]
        });
        let details: SdsDetails = serde_json::from_value(raw).unwrap();
        let columns = details.transport_information().unwrap();
        assert_eq!(columns[0].tag, "ADR");
    }

    #[test]
    fn test_revision_info_without_newer() {
        let info: NewRevisionInfo = serde_json::from_value(json!({"newer": null})).unwrap();
        assert!(info.newer.is_none());

        let info: NewRevisionInfo = serde_json::from_value(
            json!({"newer": {"sds_id": 991, "revision_date": "2024-01-15"}}),
        )
        .unwrap();
        let newer = info.newer.unwrap();
        assert_eq!(newer.sds_id.unwrap().as_str(), "991");
        assert_eq!(newer.revision_date.as_deref(), Some("2024-01-15"));
    }
}
