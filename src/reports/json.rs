//! JSON report rendering.

use super::{AffectedReport, ReportError};
use crate::diff::TopDiff;

pub(super) fn render_affected(report: &AffectedReport) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub(super) fn render_diff(diff: &TopDiff) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(diff)?)
}

pub(super) fn render_states(states: &[&String]) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(states)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_serializes_all_four_sets() {
        let mut diff = TopDiff::default();
        diff.added.insert("web1".to_string());
        diff.removed.insert("db1".to_string());

        let rendered = render_diff(&diff).expect("render");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(value["added"][0], "web1");
        assert_eq!(value["removed"][0], "db1");
        assert!(value["changed"].as_array().expect("array").is_empty());
        assert!(value["unchanged"].as_array().expect("array").is_empty());
    }

    #[test]
    fn changed_records_carry_entry_breakdown() {
        use crate::diff::RecordDelta;
        use crate::model::StateEntry;

        let mut diff = TopDiff::default();
        diff.changed.insert("web1".to_string());
        diff.changed_records.insert(
            "web1".to_string(),
            RecordDelta {
                added: vec![StateEntry::Reference("monitoring.agent".into())],
                removed: vec![StateEntry::Reference("legacy.cron".into())],
            },
        );

        let rendered = render_diff(&diff).expect("render");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(
            value["changed_records"]["web1"]["added"][0],
            "monitoring.agent"
        );
        assert_eq!(
            value["changed_records"]["web1"]["removed"][0],
            "legacy.cron"
        );
    }
}
