//! board::report
//!
//! Summary of a provisioning run.

use std::fmt;

/// Counts and identity of what a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub board_name: String,
    pub board_id: String,
    pub url: Option<String>,
    /// Dry-run summaries omit the URL line
    pub dry_run: bool,
    pub lists: usize,
    pub labels: usize,
    pub cards: usize,
    pub checklist_items: usize,
}

impl fmt::Display for ProvisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "=== Mirror Project: Trello Init Summary ===")?;
        writeln!(f, "Board: {}", self.board_name)?;
        if !self.dry_run {
            writeln!(
                f,
                "URL:  {}",
                self.url.as_deref().unwrap_or("(no url returned)")
            )?;
        }
        writeln!(f, "Lists: {}", self.lists)?;
        writeln!(f, "Labels: {}", self.labels)?;
        writeln!(f, "Cards: {}", self.cards)?;
        writeln!(f, "Checklist items: {}", self.checklist_items)?;
        write!(f, "==========================================")
    }
}
