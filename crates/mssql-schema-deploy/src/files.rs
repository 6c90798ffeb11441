//! Migration file discovery.

use crate::error::Result;
use std::path::Path;
use tracing::warn;

/// One migration script, immutable once read. Identity is the filename;
/// execution order is the ascending lexicographic sort of filenames.
#[derive(Debug, Clone)]
pub struct MigrationFile {
    pub filename: String,
    pub raw_content: String,
}

/// Read all `.sql` files from a flat directory, sorted by filename.
///
/// A missing directory is a normal no-op condition (no migrations were
/// generated), not an error.
pub fn load_migration_files(dir: &Path) -> Result<Vec<MigrationFile>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Migrations directory not found: {}", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) if name.to_lowercase().ends_with(".sql") => name.to_string(),
            _ => continue,
        };
        let raw_content = std::fs::read_to_string(&path)?;
        files.push(MigrationFile {
            filename,
            raw_content,
        });
    }

    files.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn files_are_sorted_lexicographically() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("002_second.sql"), "SELECT 2").unwrap();
        fs::write(dir.path().join("010_tenth.sql"), "SELECT 10").unwrap();
        fs::write(dir.path().join("001_first.sql"), "SELECT 1").unwrap();

        let files = load_migration_files(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["001_first.sql", "002_second.sql", "010_tenth.sql"]);
    }

    #[test]
    fn non_sql_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("001_init.sql"), "SELECT 1").unwrap();
        fs::write(dir.path().join("readme.txt"), "notes").unwrap();
        fs::write(dir.path().join("backup.sql.bak"), "old").unwrap();

        let files = load_migration_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "001_init.sql");
    }

    #[test]
    fn missing_directory_is_a_noop() {
        let files = load_migration_files(Path::new("/nonexistent/migrations")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn content_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let body = "CREATE TABLE dbo.T (id INT);\nGO\n";
        fs::write(dir.path().join("001_init.sql"), body).unwrap();

        let files = load_migration_files(dir.path()).unwrap();
        assert_eq!(files[0].raw_content, body);
    }
}
