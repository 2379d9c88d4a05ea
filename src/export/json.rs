//! JSON import/export for vocabulary catalogs and progress reports.

use crate::config::SrsConfig;
use crate::error::{Error, Result};
use crate::models::{Catalog, MasteryLevel, Progress, ReviewState, mastery_level};
use crate::store::atomic::atomic_write;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Imports a catalog from a JSON array of `{ id, text, category }` objects.
/// Returns an error if the file doesn't exist, contains invalid JSON, or
/// repeats an id.
pub fn import_catalog(path: &Path) -> Result<Catalog> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::Catalog(format!("cannot read {}: {}", path.display(), e)))?;

    let catalog: Catalog = serde_json::from_str(&contents)
        .map_err(|e| Error::Catalog(format!("invalid catalog {}: {}", path.display(), e)))?;

    for (i, item) in catalog.items.iter().enumerate() {
        if catalog.items[..i].iter().any(|other| other.id == item.id) {
            return Err(Error::Catalog(format!("duplicate item id '{}'", item.id)));
        }
    }

    info!("Catalog with {} items imported from '{}'", catalog.len(), path.display());
    Ok(catalog)
}

/// Writes a catalog as pretty JSON, e.g. to start a custom word list from the
/// built-in sample.
pub fn export_catalog_to_path(catalog: &Catalog, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog).map_err(|e| Error::Catalog(e.to_string()))?;
    atomic_write(path, json.as_bytes()).map_err(|source| Error::StoreWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Serialize)]
pub struct ReportEntry<'a> {
    pub id: &'a str,
    pub text: &'a str,
    pub category: &'a str,
    pub mastery: MasteryLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'a ReviewState>,
}

/// One entry per catalog item, in catalog order.
pub fn progress_report<'a>(
    catalog: &'a Catalog,
    progress: &'a Progress,
    config: &SrsConfig,
) -> Vec<ReportEntry<'a>> {
    catalog
        .items
        .iter()
        .map(|item| {
            let state = progress.get(&item.id);
            ReportEntry {
                id: &item.id,
                text: &item.text,
                category: &item.category,
                mastery: mastery_level(state, config),
                state,
            }
        })
        .collect()
}

/// Exports a progress report joined with catalog text to `path`.
pub fn export_report_to_path(
    catalog: &Catalog,
    progress: &Progress,
    config: &SrsConfig,
    path: &Path,
) -> Result<()> {
    let report = progress_report(catalog, progress, config);
    let json = serde_json::to_string_pretty(&report).map_err(|e| Error::StoreWrite {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    atomic_write(path, json.as_bytes()).map_err(|source| Error::StoreWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{VocabItem, grade};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_import_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        let json_content = r#"[
  { "id": "猫", "text": "māo - cat", "category": "animals" },
  { "id": "狗", "text": "gǒu - dog", "category": "animals" }
]"#;
        fs::write(&path, json_content).unwrap();

        let catalog = import_catalog(&path).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items[0].id, "猫");
        assert_eq!(catalog.items[1].text, "gǒu - dog");
    }

    #[test]
    fn test_export_and_import_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        let original = Catalog::sample();

        export_catalog_to_path(&original, &path).unwrap();

        assert_eq!(import_catalog(&path).unwrap(), original);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_catalog(Path::new("nonexistent_catalog_xyz123.json"));
        assert!(matches!(result, Err(Error::Catalog(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_catalog(&path), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_import_duplicate_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[{ "id": "a", "text": "1", "category": "x" }, { "id": "a", "text": "2", "category": "x" }]"#,
        )
        .unwrap();

        assert!(matches!(import_catalog(&path), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_progress_report() {
        let catalog = Catalog::new(vec![
            VocabItem::new("a", "alpha", "x"),
            VocabItem::new("b", "beta", "x"),
        ]);
        let config = SrsConfig::default();
        let mut progress = Progress::new();
        grade(&mut progress, "b", 4, Utc::now(), &config).unwrap();

        let report = progress_report(&catalog, &progress, &config);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].mastery, MasteryLevel::New);
        assert!(report[0].state.is_none());
        assert_eq!(report[1].mastery, MasteryLevel::Learning);
        assert_eq!(report[1].state.map(|s| s.repetitions), Some(1));
    }
}
