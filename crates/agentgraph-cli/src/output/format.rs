use agentgraph_ingest::IngestReport;

use super::OutputFormat;

pub fn format_report(report: &IngestReport, fmt: OutputFormat) -> serde_json::Result<String> {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Text => Ok(format_report_text(report)),
    }
}

fn format_report_text(report: &IngestReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Events read: {}\n", report.events_read));
    out.push_str(&format!(
        "Applied:     {} ({} entity writes)\n",
        report.applied, report.writes
    ));
    out.push_str(&format!("Replayed:    {}\n", report.replayed));
    if report.skipped_unknown_agent > 0 {
        out.push_str(&format!(
            "Skipped:     {} (unknown agent)\n",
            report.skipped_unknown_agent
        ));
    }
    if report.skipped_already_registered > 0 {
        out.push_str(&format!(
            "Skipped:     {} (already registered)\n",
            report.skipped_already_registered
        ));
    }
    if report.out_of_order > 0 {
        out.push_str(&format!(
            "Warning:     {} events out of block order\n",
            report.out_of_order
        ));
    }
    match report.cursor {
        Some(pos) => out.push_str(&format!("Cursor:      {pos}")),
        None => out.push_str("Cursor:      (none)"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentgraph_core::model::LogPosition;

    #[test]
    fn test_text_report() {
        let report = IngestReport {
            events_read: 5,
            applied: 4,
            writes: 6,
            skipped_unknown_agent: 1,
            cursor: Some(LogPosition {
                block_number: 4,
                log_index: 0,
            }),
            ..Default::default()
        };
        let text = format_report(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("Applied:     4 (6 entity writes)"));
        assert!(text.contains("Skipped:     1 (unknown agent)"));
        assert!(!text.contains("already registered"));
        assert!(text.ends_with("Cursor:      4:0"));
    }

    #[test]
    fn test_json_report() {
        let report = IngestReport {
            applied: 2,
            ..Default::default()
        };
        let rendered = format_report(&report, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["applied"], 2);
        assert!(json["cursor"].is_null());
    }
}
