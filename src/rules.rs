use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Name of the ignore-pattern file looked up directly inside each folder.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Accumulated gitignore-style exclusion patterns.
///
/// Patterns are only ever appended. Matching follows gitignore precedence:
/// the last pattern that matches a name decides, so a later `!pattern`
/// re-includes something an earlier line excluded.
#[derive(Clone, Debug)]
pub struct IgnoreRules {
    builder: GitignoreBuilder,
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::new()
    }
}

impl IgnoreRules {
    /// Patterns match case-insensitively, so `*.LOG` excludes `secret.log`.
    pub fn new() -> Self {
        let mut builder = GitignoreBuilder::new(".");
        if let Err(e) = builder.case_insensitive(true) {
            warn!("Failed to enable case-insensitive ignore patterns: {}", e);
        }
        IgnoreRules {
            builder,
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Adds every pattern line of `text`. Blank lines and `#` comments are
    /// ignored; invalid globs are logged and skipped. Returns how many
    /// patterns were added.
    pub fn add(&mut self, text: &str) -> usize {
        self.add_lines(None, text)
    }

    /// Same as [`IgnoreRules::add`], recording `source` for diagnostics.
    pub fn add_from_source(&mut self, source: &Path, text: &str) -> usize {
        self.add_lines(Some(source), text)
    }

    fn add_lines(&mut self, source: Option<&Path>, text: &str) -> usize {
        let mut added = 0;
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match self
                .builder
                .add_line(source.map(Path::to_path_buf), line)
            {
                Ok(_) => {
                    trace!("Added ignore pattern '{}'", trimmed);
                    added += 1;
                }
                Err(e) => warn!("Invalid ignore pattern '{}': {}", trimmed, e),
            }
        }

        if added > 0 {
            match self.builder.build() {
                Ok(matcher) => {
                    self.matcher = matcher;
                    self.pattern_count += added;
                }
                Err(e) => warn!("Failed to compile ignore patterns: {}", e),
            }
        }

        debug!(
            "Added {} ignore patterns ({} total)",
            added, self.pattern_count
        );
        added
    }

    /// Whether a bare file name is excluded by the accumulated patterns.
    pub fn matches(&self, name: &str) -> bool {
        self.matcher.matched(name, false).is_ignore()
    }

    pub fn len(&self) -> usize {
        self.pattern_count
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}
