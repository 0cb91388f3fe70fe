//! Display of a single registered version.

use modelver_core::ArtifactRecord;

use super::tables::format_timestamp;

/// Lines describing `record`, without a trailing newline.
pub fn record_lines(record: &ArtifactRecord) -> Vec<String> {
    let mut lines = vec![
        format!("  Model:       {}", record.model),
        format!("  Version:     {}", record.version),
        format!("  Kind:        {}", record.kind.label()),
        format!("  Path:        {}", record.path.display()),
        format!(
            "  Pointer:     {} ({})",
            record.pointer_ref.file.display(),
            record.pointer_ref.short_digest()
        ),
        format!("  Revision:    {}", record.revision_id.short()),
        format!("  Registered:  {} UTC", format_timestamp(&record.created_at)),
    ];
    if !record.description.trim().is_empty() {
        lines.push(format!("  Description: {}", record.description.trim()));
    }
    lines
}

/// Print `record` as an indented block.
pub fn display_record(record: &ArtifactRecord) {
    for line in record_lines(record) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use modelver_core::{ArtifactKind, PointerRef, RevisionId};

    fn record(description: &str) -> ArtifactRecord {
        ArtifactRecord {
            model: "clf".to_string(),
            version: "v1.0.0".to_string(),
            path: "models/clf".into(),
            pointer_ref: PointerRef::new("models/clf.dvc", "3863d0e3c1a5f6b2a9e8d7c6b5a4f3e2"),
            description: description.to_string(),
            revision_id: RevisionId::new("9f1c2ab4d5e6f708192a3b4c5d6e7f8091a2b3c4"),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            kind: ArtifactKind::Model,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_lines_include_kind_and_timestamp() {
        let lines = record_lines(&record("retrained"));
        assert!(lines.contains(&"  Kind:        Model".to_string()));
        assert!(lines.contains(&"  Registered:  2024-03-01 12:00:00 UTC".to_string()));
        assert_eq!(lines.last().unwrap(), "  Description: retrained");
    }

    #[test]
    fn test_blank_description_is_omitted() {
        let lines = record_lines(&record("  "));
        assert!(!lines.iter().any(|l| l.contains("Description")));
    }
}
