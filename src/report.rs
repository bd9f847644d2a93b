use std::io::Write;

use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

use crate::classify::{Classification, TemplateClassifier};
use crate::types::Issue;

/// Running counts per classification.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tally {
    pub bugs: usize,
    pub features: usize,
    pub no_match: usize,
}

impl Tally {
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Bug => self.bugs += 1,
            Classification::Feature => self.features += 1,
            Classification::NoMatch => self.no_match += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.bugs + self.features + self.no_match
    }
}

/// Share of `count` in `total` as a percentage, `0.0` for an empty total.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}

fn bug_style(text: &str) -> ColoredString {
    text.on_green().white()
}

fn feature_style(text: &str) -> ColoredString {
    text.on_blue().white()
}

fn no_match_style(text: &str) -> ColoredString {
    text.on_red().white()
}

pub fn label(classification: Classification) -> ColoredString {
    match classification {
        Classification::Bug => bug_style("  THAT'S A BUG  "),
        Classification::Feature => feature_style("THAT'S A FEATURE"),
        Classification::NoMatch => no_match_style("    NO MATCH    "),
    }
}

pub fn issue_line(number: u64, title: &str, classification: Classification) -> String {
    format!("#{:05}: {} -> {:?}", number, label(classification), title)
}

pub fn summary_lines(tally: &Tally) -> Vec<String> {
    let total = tally.total();
    vec![
        format!(
            "{}: {:.2}% ({})",
            bug_style("  BUGS  "),
            percentage(tally.bugs, total),
            tally.bugs
        ),
        format!(
            "{}: {:.2}% ({})",
            feature_style("FEATURES"),
            percentage(tally.features, total),
            tally.features
        ),
        format!(
            "{}: {:.2}% ({})",
            no_match_style("NO MATCH"),
            percentage(tally.no_match, total),
            tally.no_match
        ),
        String::new(),
        format!("Total of issues: {}", total),
    ]
}

/// Classifies every issue in order, writing one line each followed by the
/// summary block.
pub fn print_report<W: Write>(
    mut out: W,
    classifier: &TemplateClassifier,
    issues: &[Issue],
) -> std::io::Result<Tally> {
    let mut tally = Tally::default();

    for issue in issues {
        let classification = classifier.classify(issue.body_text());
        tally.record(classification);
        writeln!(out, "{}", issue_line(issue.number, &issue.title, classification))?;
    }

    for line in summary_lines(&tally) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    Ok(tally)
}
