use serde::{Deserialize, Serialize};

use crate::templates::TemplateMarkers;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Classification {
    Bug,
    Feature,
    NoMatch,
}

/// Matches issue bodies against the marker lines of the bug report and
/// feature request templates.
///
/// A template matches when all of its markers occur as whole lines of the
/// body, in template order. Other lines may sit between them.
#[derive(Debug, Clone)]
pub struct TemplateClassifier {
    markers: TemplateMarkers,
}

impl TemplateClassifier {
    pub fn new(markers: TemplateMarkers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &TemplateMarkers {
        &self.markers
    }

    pub fn classify(&self, body: &str) -> Classification {
        let bug = &self.markers.bug_report;
        let feature = &self.markers.feature_request;
        let mut bug_cursor = 0;
        let mut feature_cursor = 0;

        for raw_line in body.split('\n') {
            let line = raw_line.replace('\r', "");

            if bug_cursor < bug.len() && line == bug[bug_cursor] {
                bug_cursor += 1;
            }
            if feature_cursor < feature.len() && line == feature[feature_cursor] {
                feature_cursor += 1;
            }

            // Bug is checked first and wins when both complete on one line.
            if bug_cursor == bug.len() {
                return Classification::Bug;
            }
            if feature_cursor == feature.len() {
                return Classification::Feature;
            }
        }

        Classification::NoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(bug: &[&str], feature: &[&str]) -> TemplateMarkers {
        TemplateMarkers {
            bug_report: bug.iter().map(|s| s.to_string()).collect(),
            feature_request: feature.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn classifier() -> TemplateClassifier {
        TemplateClassifier::new(markers(
            &["## Description", "## Steps to reproduce", "### Observed result"],
            &["**Problem**", "**Solution**"],
        ))
    }

    #[test]
    fn test_contiguous_bug_markers() {
        let body = "## Description\n## Steps to reproduce\n### Observed result";
        assert_eq!(classifier().classify(body), Classification::Bug);
    }

    #[test]
    fn test_gaps_between_markers() {
        let body = "intro\n## Description\nit crashes\n\n## Steps to reproduce\n1. run\n### Observed result\nstack trace\n";
        assert_eq!(classifier().classify(body), Classification::Bug);
    }

    #[test]
    fn test_carriage_returns_are_ignored() {
        let body = "## Description\r\n## Steps to reproduce\r\n### Observed\r result\r\n";
        assert_eq!(classifier().classify(body), Classification::Bug);
    }

    #[test]
    fn test_out_of_order_markers() {
        let body = "## Steps to reproduce\n## Description\n### Observed result";
        assert_eq!(classifier().classify(body), Classification::NoMatch);
    }

    #[test]
    fn test_out_of_order_bug_but_feature_matches() {
        let body = "## Steps to reproduce\n**Problem**\n## Description\n**Solution**\n### Observed result";
        assert_eq!(classifier().classify(body), Classification::Feature);
    }

    #[test]
    fn test_feature_markers() {
        let body = "**Problem**\nI want X\n**Solution**\nadd X";
        assert_eq!(classifier().classify(body), Classification::Feature);
    }

    #[test]
    fn test_exact_line_match_only() {
        let body = "## description\n## Steps to reproduce \n  ### Observed result\n**Problem**";
        assert_eq!(classifier().classify(body), Classification::NoMatch);
    }

    #[test]
    fn test_bug_wins_on_same_line() {
        let classifier = TemplateClassifier::new(markers(
            &["## Shared", "## Last"],
            &["**Other**", "## Last"],
        ));
        let body = "## Shared\n**Other**\n## Last";
        assert_eq!(classifier.classify(body), Classification::Bug);
    }

    #[test]
    fn test_first_completed_template_wins() {
        let body = "**Problem**\n**Solution**\n## Description\n## Steps to reproduce\n### Observed result";
        assert_eq!(classifier().classify(body), Classification::Feature);
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(classifier().classify(""), Classification::NoMatch);
    }

    #[test]
    fn test_empty_marker_list_matches_immediately() {
        let classifier = TemplateClassifier::new(markers(&[], &["**Problem**"]));
        assert_eq!(classifier.classify(""), Classification::Bug);

        let classifier = TemplateClassifier::new(markers(&["## Description"], &[]));
        assert_eq!(classifier.classify("anything"), Classification::Feature);
    }

    #[test]
    fn test_repeated_marker_consumed_once_per_line() {
        let classifier = TemplateClassifier::new(markers(&["## Same", "## Same"], &["**x**"]));
        assert_eq!(classifier.classify("## Same"), Classification::NoMatch);
        assert_eq!(classifier.classify("## Same\n## Same"), Classification::Bug);
    }

    #[test]
    fn test_deterministic() {
        let classifier = classifier();
        let body = "## Description\n**Problem**\nfoo\n## Steps to reproduce";
        let first = classifier.classify(body);
        for _ in 0..5 {
            assert_eq!(classifier.classify(body), first);
        }
    }
}
