use crate::application::dto::{SdsResponse, UploadOutcome};
use crate::ports::outbound::ResponseFormatter;
use crate::sds::domain::{NewRevisionInfo, SdsDetails, SdsSummary, StatementCode};
use crate::sds::services::{MatrixPivot, PivotTable};
use crate::shared::Result;

/// Markdown table header for search results
const SEARCH_TABLE_HEADER: &str = "| ID | Product Name | Supplier Name | Revision Date | PDF |\n";

/// Markdown table separator line for search results
const SEARCH_TABLE_SEPARATOR: &str = "|----|--------------|---------------|---------------|-----|\n";

/// Markdown table header for hazard and precautionary statements
const STATEMENT_TABLE_HEADER: &str = "| Code | Statement |\n|------|-----------|\n";

/// Search result IDs longer than this are shortened in the table
const ID_DISPLAY_WIDTH: usize = 18;

/// MarkdownFormatter adapter for the human-readable view of API responses
///
/// Search results become a table, SDS details become sections with the
/// transport information pivoted into a matrix.
#[derive(Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn truncate_id(id: &str) -> String {
        if id.chars().count() <= ID_DISPLAY_WIDTH {
            return id.to_string();
        }
        let head: String = id.chars().take(ID_DISPLAY_WIDTH).collect();
        format!("{}…", head)
    }

    fn or_dash(value: Option<&str>) -> &str {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => "-",
        }
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_search(&self, output: &mut String, results: &[SdsSummary]) {
        output.push_str("# SDS Search Results\n\n");
        if results.is_empty() {
            output.push_str("*No SDS found*\n");
            return;
        }

        output.push_str(SEARCH_TABLE_HEADER);
        output.push_str(SEARCH_TABLE_SEPARATOR);
        for sds in results {
            let link = match sds.permanent_link.as_deref() {
                Some(url) if !url.is_empty() => format!("[PDF]({})", url),
                _ => "-".to_string(),
            };
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&Self::truncate_id(sds.id.as_str())),
                Self::escape_markdown_table_cell(&sds.sds_pdf_product_name),
                Self::escape_markdown_table_cell(&sds.sds_pdf_manufacture_name),
                Self::escape_markdown_table_cell(Self::or_dash(
                    sds.sds_pdf_revision_date.as_deref()
                )),
                link
            ));
        }
        output.push_str(&format!("\n*{} result(s)*\n", results.len()));
    }

    fn render_details(&self, output: &mut String, details: &SdsDetails) {
        let summary = &details.summary;
        let title = if summary.sds_pdf_product_name.is_empty() {
            "SDS Details"
        } else {
            summary.sds_pdf_product_name.as_str()
        };
        output.push_str(&format!("## {}\n\n", title));

        output.push_str(&format!("- **ID:** {}\n", Self::or_dash(Some(summary.id.as_str()))));
        output.push_str(&format!(
            "- **PDF MD5:** {}\n",
            Self::or_dash(Some(&summary.pdf_md5))
        ));
        output.push_str(&format!(
            "- **Product name:** {}\n",
            Self::or_dash(Some(&summary.sds_pdf_product_name))
        ));
        output.push_str(&format!(
            "- **Manufacture name:** {}\n",
            Self::or_dash(Some(&summary.sds_pdf_manufacture_name))
        ));
        output.push_str(&format!(
            "- **Revision date:** {}\n",
            Self::or_dash(summary.sds_pdf_revision_date.as_deref())
        ));
        if let Some(link) = summary.permanent_link.as_deref().filter(|l| !l.is_empty()) {
            output.push_str(&format!("- **PDF:** [{}]({})\n", link, link));
        }
        output.push('\n');

        let extracted = &details.extracted_data;
        self.render_statements(output, "Hazard Codes", extracted.hazard_codes.as_deref());
        self.render_statements(
            output,
            "Precautionary Codes",
            extracted.precautionary_codes.as_deref(),
        );
        if let Some(pictograms) = extracted.ghs_pictograms.as_deref() {
            if !pictograms.is_empty() {
                output.push_str("### GHS Pictograms\n\n");
                for pictogram in pictograms {
                    output.push_str(&format!("- {}\n", pictogram));
                }
                output.push('\n');
            }
        }
        if let Some(columns) = details.transport_information() {
            let table = MatrixPivot::transform(&columns);
            if !table.is_empty() {
                output.push_str("### Transport Information\n\n");
                self.render_pivot_table(output, &table);
                output.push('\n');
            }
        }
    }

    fn render_statements(&self, output: &mut String, title: &str, codes: Option<&[StatementCode]>) {
        let codes = match codes {
            Some(codes) if !codes.is_empty() => codes,
            _ => return,
        };
        output.push_str(&format!("### {}\n\n", title));
        output.push_str(STATEMENT_TABLE_HEADER);
        for code in codes {
            output.push_str(&format!(
                "| {} | {} |\n",
                Self::escape_markdown_table_cell(&code.statement_code),
                Self::escape_markdown_table_cell(&code.statements)
            ));
        }
        output.push('\n');
    }

    /// Renders the pivot with an empty top-left header; sentinel cells are bold
    fn render_pivot_table(&self, output: &mut String, table: &PivotTable) {
        output.push_str("| |");
        for column in &table.columns {
            output.push_str(&format!(" {} |", Self::escape_markdown_table_cell(column)));
        }
        output.push('\n');
        output.push_str(&"|---".repeat(table.columns.len() + 1));
        output.push_str("|\n");

        for row in &table.rows {
            output.push_str(&format!("| {} |", Self::escape_markdown_table_cell(&row.label)));
            for (index, cell) in row.cells.iter().enumerate() {
                let cell = Self::escape_markdown_table_cell(cell);
                if row.sentinel_cells.contains(&index) && !cell.is_empty() {
                    output.push_str(&format!(" **{}** |", cell));
                } else {
                    output.push_str(&format!(" {} |", cell));
                }
            }
            output.push('\n');
        }
    }

    fn render_revision(&self, output: &mut String, info: &NewRevisionInfo) {
        let subject = match (&info.sds_id, info.pdf_md5.as_deref()) {
            (Some(id), _) => format!("SDS {}", id),
            (None, Some(md5)) => format!("PDF {}", md5),
            (None, None) => "SDS".to_string(),
        };
        match &info.newer {
            Some(newer) => {
                output.push_str(&format!("- **{}:** newer revision available", subject));
                if let Some(id) = &newer.sds_id {
                    output.push_str(&format!(" (ID {}", id));
                    if let Some(date) = newer.revision_date.as_deref() {
                        output.push_str(&format!(", revised {}", date));
                    }
                    output.push(')');
                }
                output.push('\n');
            }
            None => output.push_str(&format!("- **{}:** up to date\n", subject)),
        }
    }

    fn render_upload(&self, output: &mut String, outcome: &UploadOutcome) {
        output.push_str("# SDS Upload\n\n");
        output.push_str(&format!("- **Request ID:** {}\n", outcome.request_id));
        output.push_str(&format!("- **Phase:** {}\n", outcome.phase));
        match &outcome.last_status {
            Some(status) => output.push_str(&format!(
                "- **Status:** {} ({}%)\n",
                status.step.display(),
                status.progress
            )),
            None => output.push_str("- **Status:** -\n"),
        }
        output.push_str(&format!("- **Status queries:** {}\n\n", outcome.polls));

        let looks_like_sds = outcome
            .upload_response
            .as_object()
            .is_some_and(|body| body.contains_key("extracted_data"));
        if looks_like_sds {
            if let Ok(details) = serde_json::from_value::<SdsDetails>(outcome.upload_response.clone())
            {
                self.render_details(output, &details);
            }
        }
    }
}

impl ResponseFormatter for MarkdownFormatter {
    fn format(&self, response: &SdsResponse) -> Result<String> {
        let mut output = String::new();
        match response {
            SdsResponse::Search(results) => self.render_search(&mut output, &results.data),
            SdsResponse::Details(details) => self.render_details(&mut output, &details.data),
            SdsResponse::DetailsBatch(batch) => {
                if batch.data.is_empty() {
                    output.push_str("*No SDS found*\n");
                }
                for details in &batch.data {
                    self.render_details(&mut output, details);
                }
            }
            SdsResponse::RevisionInfo(info) => {
                output.push_str("# SDS Revision Info\n\n");
                self.render_revision(&mut output, &info.data);
            }
            SdsResponse::RevisionInfoBatch(batch) => {
                output.push_str("# SDS Revision Info\n\n");
                for info in &batch.data {
                    self.render_revision(&mut output, info);
                }
            }
            SdsResponse::Upload(outcome) => self.render_upload(&mut output, outcome),
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::ApiResponse;
    use crate::sds::domain::{
        ExtractionStatus, ExtractionStep, RequestId, SdsId, TransportInfoColumn, ValueEntry,
    };
    use crate::sds::domain::transport_info::NO_KNOWN_HAZARDS;
    use crate::sds::services::UploadPhase;
    use serde_json::json;

    fn summary(id: &str, name: &str) -> SdsSummary {
        SdsSummary {
            id: SdsId::new(id),
            sds_pdf_product_name: name.to_string(),
            sds_pdf_manufacture_name: "ACME | Labs".to_string(),
            sds_pdf_revision_date: Some("2023-04-01".to_string()),
            permanent_link: Some("https://example.com/sds.pdf".to_string()),
            ..SdsSummary::default()
        }
    }

    fn format(response: SdsResponse) -> String {
        MarkdownFormatter::new().format(&response).unwrap()
    }

    #[test]
    fn test_search_table() {
        let response = SdsResponse::Search(ApiResponse::new(
            vec![summary("123", "Acetone")],
            json!([]),
        ));
        let output = format(response);

        assert!(output.contains(SEARCH_TABLE_HEADER));
        assert!(output.contains(
            "| 123 | Acetone | ACME \\| Labs | 2023-04-01 | [PDF](https://example.com/sds.pdf) |"
        ));
        assert!(output.contains("*1 result(s)*"));
    }

    #[test]
    fn test_search_truncates_long_ids() {
        let response = SdsResponse::Search(ApiResponse::new(
            vec![summary("0123456789abcdefghijkl", "Toluene")],
            json!([]),
        ));
        let output = format(response);
        assert!(output.contains("| 0123456789abcdefgh… |"));
    }

    #[test]
    fn test_empty_search() {
        let output = format(SdsResponse::Search(ApiResponse::new(vec![], json!([]))));
        assert!(output.contains("*No SDS found*"));
    }

    #[test]
    fn test_details_sections_and_transport_pivot() {
        let mut details = SdsDetails {
            summary: summary("77", "Ethanol"),
            ..SdsDetails::default()
        };
        details.summary.pdf_md5 = "abc123".to_string();
        details.extracted_data.hazard_codes = Some(vec![StatementCode {
            statement_code: "H225".to_string(),
            statements: "Highly flammable liquid and vapour".to_string(),
        }]);
        details.extracted_data.transport_information = Some(vec![
            TransportInfoColumn::new(
                "ADR",
                vec![
                    ValueEntry::text("un_number", "UN number", "UN1170"),
                    ValueEntry::flag(NO_KNOWN_HAZARDS, "No known hazards", false),
                ],
            ),
            TransportInfoColumn::new(
                "IMDG",
                vec![ValueEntry::flag(NO_KNOWN_HAZARDS, "No known hazards", true)],
            ),
        ]);

        let output = format(SdsResponse::Details(ApiResponse::new(details, json!({}))));

        assert!(output.starts_with("## Ethanol\n"));
        assert!(output.contains("- **ID:** 77"));
        assert!(output.contains("- **PDF MD5:** abc123"));
        assert!(output.contains("| H225 | Highly flammable liquid and vapour |"));
        assert!(output.contains("### Transport Information"));
        assert!(output.contains("| | ADR | IMDG |\n|---|---|---|\n"));
        assert!(output.contains("| UN number | UN1170 |  |"));
        assert!(output.contains("|  |  | **No known hazards** |"));
    }

    #[test]
    fn test_revision_info() {
        let info = NewRevisionInfo {
            sds_id: Some(SdsId::new("5")),
            pdf_md5: None,
            newer: Some(crate::sds::domain::NewerSds {
                sds_id: Some(SdsId::new("9")),
                revision_date: Some("2024-01-02".to_string()),
                search_id: None,
            }),
        };
        let output = format(SdsResponse::RevisionInfo(ApiResponse::new(info, json!({}))));
        assert!(output.contains("- **SDS 5:** newer revision available (ID 9, revised 2024-01-02)"));

        let current = NewRevisionInfo {
            pdf_md5: Some("ff".to_string()),
            ..NewRevisionInfo::default()
        };
        let output = format(SdsResponse::RevisionInfoBatch(ApiResponse::new(
            vec![current],
            json!([]),
        )));
        assert!(output.contains("- **PDF ff:** up to date"));
    }

    #[test]
    fn test_upload_outcome() {
        let outcome = UploadOutcome {
            request_id: RequestId::from("1700000000000"),
            phase: UploadPhase::Succeeded,
            last_status: Some(ExtractionStatus::new(100, ExtractionStep::Success)),
            upload_response: json!({"id": 3, "sds_pdf_product_name": "Xylene", "extracted_data": {}}),
            polls: 4,
        };
        let output = format(SdsResponse::Upload(outcome));

        assert!(output.contains("- **Request ID:** 1700000000000"));
        assert!(output.contains("- **Phase:** SUCCEEDED"));
        assert!(output.contains("- **Status:** ✅ SDS ready (100%)"));
        assert!(output.contains("- **Status queries:** 4"));
        assert!(output.contains("## Xylene"));
    }
}
