//! Per-item outcomes of a batch run

use crate::error::Error;
use std::path::PathBuf;

/// What happened to one item of a batch
#[derive(Debug)]
pub enum Outcome {
    /// Written to the given path
    Done(PathBuf),
    /// Already present at the given path; nothing was written
    Skipped(PathBuf),
    Failed(Error),
}

/// Outcome of one item together with its position and label
#[derive(Debug)]
pub struct ItemReport {
    pub index: usize,
    /// URL or file name the item was known by
    pub label: String,
    pub outcome: Outcome,
}

/// Ordered results of a whole batch
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub items: Vec<ItemReport>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, index: usize, label: impl Into<String>, outcome: Outcome) {
        self.items.push(ItemReport {
            index,
            label: label.into(),
            outcome,
        });
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Done(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    /// Labels of items that ended up on disk, whether written now or before
    pub fn processed(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| !matches!(item.outcome, Outcome::Failed(_)))
            .map(|item| item.label.as_str())
            .collect()
    }

    /// `(index, label, error)` of every failed item
    pub fn failures(&self) -> impl Iterator<Item = (usize, &str, &Error)> {
        self.items.iter().filter_map(|item| match &item.outcome {
            Outcome::Failed(e) => Some((item.index, item.label.as_str(), e)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.outcome)).count()
    }

    /// One-line totals, e.g. `Download: 10 items, 9 processed`
    pub fn totals_line(&self, what: &str) -> String {
        format!(
            "{}: {} items, {} processed",
            what,
            self.total(),
            self.processed().len()
        )
    }

    /// Print the end-of-run totals
    pub fn print(&self, what: &str) {
        println!();
        println!("{}", self.totals_line(what));
        if self.succeeded() > 0 {
            println!("  {} written", self.succeeded());
        }
        if self.skipped() > 0 {
            println!("  {} skipped (already existed)", self.skipped());
        }
        if self.failed() > 0 {
            eprintln!("Warning: {} items failed", self.failed());
            for (index, label, e) in self.failures() {
                eprintln!("  #{} {}: {}", index, label, e);
            }
        }
    }
}
