use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Where generated code is written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    /// Standard output.
    #[default]
    Stdout,
    /// A file, created along with missing parent directories and
    /// overwritten if it exists.
    File(PathBuf),
}

/// Result of a write operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// Content went to standard output
    Printed,
    /// File was written
    Written(PathBuf),
}

impl Destination {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Destination::File(path),
            None => Destination::Stdout,
        }
    }

    /// Write `content` to this destination.
    pub fn write(&self, content: &str) -> Result<WriteResult> {
        match self {
            Destination::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(content.as_bytes())
                    .and_then(|_| stdout.flush())
                    .wrap_err("failed to write to stdout")?;
                Ok(WriteResult::Printed)
            }
            Destination::File(path) => {
                write_file(path, content)
                    .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
                Ok(WriteResult::Written(path.clone()))
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("model.rs");

        let result = Destination::File(path.clone()).write("nested").unwrap();

        assert_eq!(result, WriteResult::Written(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("model.rs");

        fs::write(&path, "first").unwrap();
        Destination::File(path.clone()).write("second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Destination::from_path(None), Destination::Stdout);
        assert_eq!(
            Destination::from_path(Some("m.rs".into())),
            Destination::File("m.rs".into())
        );
    }
}
