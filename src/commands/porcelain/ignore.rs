use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::{IoResultExt, RepositoryError, Result};
use std::io::Write;

impl Repository {
    /// Append a pattern to the repository's ignore file
    ///
    /// Patterns are kept verbatim, one per line, in the order they were added.
    pub fn add_ignore_pattern(&self, pattern: &str) -> Result<String> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(RepositoryError::InvalidMessage { field: "pattern" });
        }
        Commit::check_single_line("pattern", pattern)?;

        let path = self.ignore_path();
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .at_path(&path)?;
        writeln!(file, "{pattern}").at_path(&path)?;

        tracing::debug!(%pattern, "added ignore pattern");
        Ok(pattern.to_string())
    }

    pub fn ignore_patterns(&self) -> Result<Vec<String>> {
        let path = self.ignore_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(RepositoryError::io(path, err)),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
