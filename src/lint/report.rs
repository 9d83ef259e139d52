//! lint::report
//!
//! Violation records and the compliance report text.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Longest line preview shown before truncation.
const PREVIEW_CHARS: usize = 80;

/// One forbidden word found on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// 1-based line number
    pub line: usize,
    /// The whole line, trimmed
    pub text: String,
    /// The word as it appears in the file
    pub word: String,
}

impl Violation {
    fn preview(&self) -> String {
        if self.text.chars().count() > PREVIEW_CHARS {
            let cut: String = self.text.chars().take(PREVIEW_CHARS).collect();
            format!("{}...", cut)
        } else {
            self.text.clone()
        }
    }
}

/// Violations keyed by file path, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub files: BTreeMap<String, Vec<Violation>>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }

    /// Total violations across all files.
    pub fn total(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}

/// The lines printed before scanning starts.
pub fn header(root: &Path, words: &[String]) -> String {
    format!(
        "saltlint: Scanning for forbidden words...\nTarget: {}\nForbidden words: {}\n",
        root.display(),
        words.join(", ")
    )
}

impl fmt::Display for LintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "[PASS] No forbidden words found. Site is compliant.");
        }

        writeln!(f, "[FAIL] FORBIDDEN WORDS DETECTED")?;
        writeln!(f)?;
        writeln!(f, "Total violations: {}", self.total())?;
        writeln!(f, "Files affected: {}", self.files.len())?;
        writeln!(f)?;

        for (path, violations) in &self.files {
            writeln!(f, "File: {}", path)?;
            for v in violations {
                writeln!(f, "  Line {}: '{}' found", v.line, v.word)?;
                writeln!(f, "    {}", v.preview())?;
            }
            writeln!(f)?;
        }

        write!(
            f,
            "Brand compliance FAILED. Remove all forbidden words before deploying."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(line: usize, text: &str, word: &str) -> Violation {
        Violation {
            line,
            text: text.into(),
            word: word.into(),
        }
    }

    #[test]
    fn clean_report() {
        assert_eq!(
            LintReport::default().to_string(),
            "[PASS] No forbidden words found. Site is compliant."
        );
    }

    #[test]
    fn failing_report_layout() {
        let mut report = LintReport::default();
        report.files.insert(
            "src/b.md".into(),
            vec![violation(3, "no sweat", "sweat")],
        );
        report.files.insert(
            "src/a.html".into(),
            vec![
                violation(1, "Sweaty palms", "Sweaty"),
                violation(9, "perspire", "perspire"),
            ],
        );

        let expected = "[FAIL] FORBIDDEN WORDS DETECTED\n\
                        \n\
                        Total violations: 3\n\
                        Files affected: 2\n\
                        \n\
                        File: src/a.html\n  \
                        Line 1: 'Sweaty' found\n    \
                        Sweaty palms\n  \
                        Line 9: 'perspire' found\n    \
                        perspire\n\
                        \n\
                        File: src/b.md\n  \
                        Line 3: 'sweat' found\n    \
                        no sweat\n\
                        \n\
                        Brand compliance FAILED. Remove all forbidden words before deploying.";
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn long_lines_are_truncated() {
        let long = "x".repeat(100);
        let v = violation(1, &long, "x");
        assert_eq!(v.preview(), format!("{}...", "x".repeat(80)));

        let exact = "y".repeat(80);
        assert_eq!(violation(1, &exact, "y").preview(), exact);
    }

    #[test]
    fn header_lists_words() {
        let words = vec!["sweat".to_string(), "perspire".to_string()];
        assert_eq!(
            header(Path::new("src"), &words),
            "saltlint: Scanning for forbidden words...\nTarget: src\nForbidden words: sweat, perspire\n"
        );
    }
}
