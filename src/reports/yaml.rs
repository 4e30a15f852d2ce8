//! YAML report rendering (default block-list format).

use super::{AffectedReport, ReportError};
use crate::diff::TopDiff;

pub(super) fn render_affected(report: &AffectedReport) -> Result<String, ReportError> {
    Ok(serde_yaml::to_string(report)?)
}

pub(super) fn render_diff(diff: &TopDiff) -> Result<String, ReportError> {
    Ok(serde_yaml::to_string(diff)?)
}

pub(super) fn render_states(states: &[&String]) -> Result<String, ReportError> {
    Ok(serde_yaml::to_string(states)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_renders_as_block_lists() {
        let mut diff = TopDiff::default();
        diff.added.insert("web*".to_string());
        diff.changed.insert("db1,db2".to_string());

        let rendered = render_diff(&diff).expect("render");
        assert!(rendered.contains("added:\n- web*"));
        assert!(rendered.contains("changed:\n- db1,db2"));
    }

    #[test]
    fn changed_records_render_nested_breakdowns() {
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
        assert!(rendered.contains("changed_records:\n  web1:\n    added:\n    - monitoring.agent"));
        assert!(rendered.contains("removed:\n    - legacy.cron"));
    }

    #[test]
    fn states_render_as_a_list() {
        let a = "app".to_string();
        let d = "data".to_string();
        let rendered = render_states(&[&a, &d]).expect("render");
        assert!(rendered.contains("- app"));
        assert!(rendered.contains("- data"));
    }
}
