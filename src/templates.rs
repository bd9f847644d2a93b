//! Extraction of the heading/marker lines of issue template files.
//!
//! A marker is any line beginning with `##` (a markdown heading) or `**`
//! (a bold prompt). The prefix check is done on the raw line, so indented
//! headings are not markers.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::config::TemplateConfig;
use crate::error::{Result, TriageError};

pub fn is_check_line(line: &str) -> bool {
    line.starts_with("##") || line.starts_with("**")
}

/// Collects the marker lines of a template in file order. Line terminators
/// (`\n` or `\r\n`) are not part of the returned lines.
pub fn extract_markers<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut markers = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if is_check_line(&line) {
            markers.push(line);
        }
    }
    Ok(markers)
}

pub fn load_markers(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let template_error = |source| TriageError::Template {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(template_error)?;
    let markers = extract_markers(BufReader::new(file)).map_err(template_error)?;

    debug!("Loaded {} markers from {}", markers.len(), path.display());
    Ok(markers)
}

/// Marker lists of the two templates an issue is matched against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateMarkers {
    pub bug_report: Vec<String>,
    pub feature_request: Vec<String>,
}

impl TemplateMarkers {
    pub fn load(config: &TemplateConfig) -> Result<Self> {
        let bug_report = load_markers(&config.bug_report)?;
        let feature_request = load_markers(&config.feature_request)?;
        Ok(Self {
            bug_report,
            feature_request,
        })
    }
}
