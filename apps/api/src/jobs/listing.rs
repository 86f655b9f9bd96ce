//! Job-listing shaping — converts the model's markdown bullet records into
//! structured `JobListing` values.
//!
//! Extraction is best-effort by design: fields whose marker is absent stay
//! `None`, partial records are valid, and no input ever raises an error.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const TITLE_MARKER: &str = "**Title:**";
const COMPANY_MARKER: &str = "**Company:**";
const TYPE_MARKER: &str = "**Type:**";
const OFFICE_MARKER: &str = "**Office:**";
const LOCATION_MARKER: &str = "**Location:**";
const EXPERIENCE_MARKER: &str = "**Experience Level:**";
const SALARY_MARKER: &str = "**Salary:**";
const APPLY_MARKER: &str = "**Apply:**";

/// One parsed job listing. Every field is optional — the model is not
/// guaranteed to emit a complete record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Splits model output into listing-text blocks, one per `**Title:**`
/// marker. Text before the first marker (greetings, preamble) is dropped.
pub fn split_listing_blocks(text: &str) -> Vec<String> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in text.lines() {
        if line.contains(TITLE_MARKER) {
            blocks.push(vec![line]);
        } else if let Some(current) = blocks.last_mut() {
            current.push(line);
        }
    }
    blocks
        .into_iter()
        .map(|lines| lines.join("\n").trim().to_string())
        .collect()
}

/// Parses one listing-text block into a `JobListing` by literal substring
/// search over the fixed field markers.
pub fn parse_listing(block: &str) -> JobListing {
    let mut job = JobListing::default();
    for line in block.lines() {
        if let Some(value) = field_after(line, TITLE_MARKER) {
            job.title = Some(value);
        }
        if let Some(value) = field_after(line, COMPANY_MARKER) {
            job.company = Some(value);
        }
        if let Some(value) = field_after(line, TYPE_MARKER) {
            job.employment_type = Some(value);
        }
        if let Some(value) = field_after(line, OFFICE_MARKER) {
            job.office = Some(value);
        }
        if let Some(value) = field_after(line, LOCATION_MARKER) {
            job.location = Some(value);
        }
        if let Some(value) = field_after(line, EXPERIENCE_MARKER) {
            job.experience_level = Some(value);
        }
        if let Some(value) = field_after(line, SALARY_MARKER) {
            job.salary = Some(value);
        }
        if line.contains(APPLY_MARKER) {
            job.url = inline_link_url(line);
        }
    }
    job
}

/// The trimmed text after `marker` on this line, or `None` when the marker
/// is absent or followed by nothing.
fn field_after(line: &str, marker: &str) -> Option<String> {
    let idx = line.find(marker)?;
    let value = line[idx + marker.len()..].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Extracts the URL from an inline markdown link `[text](url)`.
fn inline_link_url(line: &str) -> Option<String> {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    let re = LINK_RE.get_or_init(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("valid regex"));
    re.captures(line)
        .map(|caps| caps[2].trim().to_string())
        .filter(|url| !url.is_empty())
}
