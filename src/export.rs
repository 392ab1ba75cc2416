//! Field-projected and tabular export of catalog records.
//!
//! Each record becomes an object holding only the requested fields that the
//! record actually carries; absent fields are omitted rather than written as
//! `null`. The output is a pretty-printed JSON array that `TheoryCatalog::load`
//! accepts back. `export_csv` writes a fixed flat table instead, one row per
//! theory with list fields joined into single cells.

use crate::catalog::{ExportError, Theorists, Theory, TheoryCatalog};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a successful export.
pub struct ExportReport {
    pub path: PathBuf,
    pub count: usize,
}

/// Project a single record onto `fields`.
pub fn project(theory: &Theory, fields: &[String]) -> Result<Map<String, Value>, ExportError> {
    let Value::Object(mut full) = serde_json::to_value(theory)? else {
        return Ok(Map::new());
    };
    let mut projected = Map::new();
    for field in fields {
        if let Some(value) = full.remove(field) {
            projected.insert(field.clone(), value);
        }
    }
    Ok(projected)
}

/// Project every record in catalog order.
pub fn project_all(
    catalog: &TheoryCatalog,
    fields: &[String],
) -> Result<Vec<Map<String, Value>>, ExportError> {
    catalog
        .theories()
        .iter()
        .map(|theory| project(theory, fields))
        .collect()
}

/// Write the projection of every record to `target`.
pub fn export_theories(
    catalog: &TheoryCatalog,
    fields: &[String],
    target: &Path,
) -> Result<ExportReport, ExportError> {
    let projected = project_all(catalog, fields)?;
    let mut rendered = serde_json::to_string_pretty(&projected)?;
    rendered.push('\n');
    write_staged(target, rendered.as_bytes())?;

    let report = ExportReport {
        path: target.to_path_buf(),
        count: projected.len(),
    };
    tracing::info!(
        count = report.count,
        path = %report.path.display(),
        "exported theories"
    );
    Ok(report)
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: i64,
    theory_name: &'a str,
    theorist: String,
    category: &'a str,
    key_principles: String,
    core_concepts: String,
    key_concepts: String,
    educational_applications: String,
}

impl<'a> CsvRow<'a> {
    fn from_theory(theory: &'a Theory) -> Self {
        let theorist = match &theory.theorist {
            Some(Theorists::One(name)) => name.clone(),
            Some(Theorists::Many(names)) => names.join(", "),
            None => String::new(),
        };
        Self {
            id: theory.id.0,
            theory_name: theory.theory_name.as_deref().unwrap_or_default(),
            theorist,
            category: theory.category.as_deref().unwrap_or_default(),
            key_principles: theory.key_principles().join("; "),
            core_concepts: theory.core_concepts().join("; "),
            key_concepts: theory.key_concepts().join("; "),
            educational_applications: theory.educational_applications().join("; "),
        }
    }
}

/// Write every record as one CSV row with a header line.
///
/// Missing text fields become empty cells; list fields are joined with `"; "`
/// and co-authored theorists with `", "`.
pub fn export_csv(catalog: &TheoryCatalog, target: &Path) -> Result<ExportReport, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for theory in catalog.theories() {
        writer.serialize(CsvRow::from_theory(theory))?;
    }
    let contents = writer.into_inner().map_err(|err| ExportError::Write {
        path: target.to_path_buf(),
        source: err.into_error(),
    })?;
    write_staged(target, &contents)?;

    let report = ExportReport {
        path: target.to_path_buf(),
        count: catalog.len(),
    };
    tracing::info!(
        count = report.count,
        path = %report.path.display(),
        "exported theories as csv"
    );
    Ok(report)
}

/// Stage `contents` in a temporary file beside `target` and rename it over
/// `target`, so readers never observe a half-written export.
///
/// The staged file gets the mode of the file it replaces, or the umask-derived
/// default for a new file, instead of the temp file's owner-only mode.
fn write_staged(target: &Path, contents: &[u8]) -> Result<(), ExportError> {
    let write_err = |source| ExportError::Write {
        path: target.to_path_buf(),
        source,
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
    staged.write_all(contents).map_err(write_err)?;
    let permissions = export_permissions(target).map_err(write_err)?;
    staged
        .as_file()
        .set_permissions(permissions)
        .map_err(write_err)?;
    staged.persist(target).map_err(|err| write_err(err.error))?;
    Ok(())
}

#[cfg(unix)]
fn export_permissions(target: &Path) -> io::Result<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    match fs::metadata(target) {
        Ok(meta) => Ok(meta.permissions()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Ok(fs::Permissions::from_mode(0o666 & !current_umask()))
        }
        Err(err) => Err(err),
    }
}

#[cfg(not(unix))]
fn export_permissions(target: &Path) -> io::Result<fs::Permissions> {
    match fs::metadata(target) {
        Ok(meta) => Ok(meta.permissions()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut permissions = fs::metadata(target.parent().unwrap_or(Path::new(".")))?
                .permissions();
            permissions.set_readonly(false);
            Ok(permissions)
        }
        Err(err) => Err(err),
    }
}

// umask can only be read by setting it, so restore the old mask immediately.
#[cfg(unix)]
fn current_umask() -> u32 {
    let mask = unsafe { libc::umask(0o022) };
    unsafe { libc::umask(mask) };
    u32::from(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn projection_omits_absent_fields() {
        let mut theory = Theory::new(3, "Flow");
        theory.category = Some("motivation".to_string());
        let projected = project(&theory, &fields(&["theory_name", "subjects", "id"])).unwrap();
        assert_eq!(
            Value::Object(projected),
            json!({"theory_name": "Flow", "id": 3})
        );
    }

    #[test]
    fn projection_reaches_preserved_extra_fields() {
        let mut theory = Theory::new(5, "Connectivism");
        theory
            .extra
            .insert("year_introduced".to_string(), json!(2005));
        let projected = project(&theory, &fields(&["year_introduced"])).unwrap();
        assert_eq!(projected.get("year_introduced"), Some(&json!(2005)));
    }

    #[test]
    fn export_writes_pretty_array_and_reports_count() {
        let mut unnamed = Theory::new(2, "");
        unnamed.theory_name = None;
        let catalog = TheoryCatalog::from_theories(vec![Theory::new(1, "Constructivism"), unnamed]);

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("names.json");
        let report = export_theories(&catalog, &fields(&["theory_name"]), &target).unwrap();
        assert_eq!(report.count, 2);

        let text = std::fs::read_to_string(&target).unwrap();
        assert!(text.contains("\n  {"), "output should be indented: {text}");
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!([{"theory_name": "Constructivism"}, {}]));
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no-such-dir").join("out.json");
        let catalog = TheoryCatalog::from_theories(vec![Theory::new(1, "Flow")]);
        let err = export_theories(&catalog, &fields(&["id"]), &target).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }

    #[test]
    fn csv_flattens_lists_and_blanks_missing_fields() {
        let mut piaget = Theory::new(1, "Constructivism");
        piaget.theorist = Some(Theorists::One("Jean Piaget".to_string()));
        piaget.category = Some("cognitive".to_string());
        piaget.key_principles = Some(vec!["Active".to_string(), "Prior knowledge".to_string()]);
        piaget.key_concepts = Some(vec!["Schema".to_string()]);
        let mut situated = Theory::new(2, "Situated Learning");
        situated.theorist = Some(Theorists::Many(vec!["Lave".to_string(), "Wenger".to_string()]));
        situated.theory_name = None;
        let catalog = TheoryCatalog::from_theories(vec![piaget, situated]);

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("theories.csv");
        let report = export_csv(&catalog, &target).unwrap();
        assert_eq!(report.count, 2);

        let mut reader = csv::Reader::from_path(&target).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(
            headers,
            vec![
                "id",
                "theory_name",
                "theorist",
                "category",
                "key_principles",
                "core_concepts",
                "key_concepts",
                "educational_applications"
            ]
        );
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|row| row.unwrap().iter().map(String::from).collect())
            .collect();
        assert_eq!(
            rows[0],
            vec!["1", "Constructivism", "Jean Piaget", "cognitive", "Active; Prior knowledge", "", "Schema", ""]
        );
        assert_eq!(rows[1], vec!["2", "", "Lave, Wenger", "", "", "", "", ""]);
    }

    #[cfg(unix)]
    #[test]
    fn export_keeps_mode_of_replaced_file() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let catalog = TheoryCatalog::from_theories(vec![Theory::new(1, "Flow")]);
        for mode in [0o644, 0o640] {
            let target = dir.path().join(format!("out-{mode:o}.json"));
            std::fs::write(&target, "[]").unwrap();
            std::fs::set_permissions(&target, fs::Permissions::from_mode(mode)).unwrap();
            export_theories(&catalog, &fields(&["id"]), &target).unwrap();
            let after = std::fs::metadata(&target).unwrap().permissions().mode() & 0o777;
            assert_eq!(after, mode, "mode of {} changed", target.display());
        }
    }

    #[cfg(unix)]
    #[test]
    fn new_export_uses_umask_default_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("fresh.csv");
        let catalog = TheoryCatalog::from_theories(vec![Theory::new(1, "Flow")]);
        export_csv(&catalog, &target).unwrap();
        let mode = std::fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o666 & !current_umask());
        assert_ne!(mode & 0o044, 0, "new exports should not be owner-only");
    }
}
