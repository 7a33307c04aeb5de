use crate::model::AnalysisRecord;
use crate::output::OutputFormatter;
use std::io::Write;

/// Pretty-printed `{graph, analysis, insights?}` document.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonOutput {
    fn format<W: Write>(&self, record: &AnalysisRecord, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(record).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_snapshot, build_snapshot};
    use crate::config::Thresholds;
    use crate::insights::mock::sample_insights;
    use crate::model::Service;

    fn record() -> AnalysisRecord {
        let services = vec![
            Service::new("gateway").depends_on(["users"]),
            Service::new("users"),
        ];
        let snapshot = build_snapshot(&services);
        let (_, result) = analyze_snapshot(&snapshot, &Thresholds::default());
        AnalysisRecord::new(snapshot, result)
    }

    #[test]
    fn test_json_round_trips_record() {
        let record = record();
        let mut buffer = Vec::new();
        JsonOutput::new().format(&record, &mut buffer).unwrap();

        let parsed: AnalysisRecord = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_insights_key_only_when_present() {
        let mut record = record();
        let mut buffer = Vec::new();
        JsonOutput::new().format(&record, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert!(value.get("insights").is_none());
        assert_eq!(value["analysis"]["metrics"]["totalEdges"], 1);

        record.merge_insights(sample_insights());
        let mut buffer = Vec::new();
        JsonOutput::new().format(&record, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert!(value["insights"]["healthAssessment"].is_string());
    }
}
