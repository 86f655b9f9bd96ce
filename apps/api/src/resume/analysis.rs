//! Resume-analysis shaping — converts free-text model output into a
//! `ResumeAnalysis` record.
//!
//! Three-tier fallback, in order: strict JSON → labeled-text extraction →
//! raw text. The tiers encode the inconsistent output formats the model
//! has been observed to produce; shaping never fails, every input yields a
//! record with all three keys present.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeAnalysis {
    pub match_percentage: String,
    pub missing_keywords: Vec<String>,
    pub profile_summary: String,
}

/// Shapes raw model output into a `ResumeAnalysis`. Total: never errors.
pub fn parse_analysis(raw: &str) -> ResumeAnalysis {
    if let Some(analysis) = parse_json_tier(raw) {
        return analysis;
    }
    if let Some(analysis) = parse_labeled_tier(raw) {
        return analysis;
    }
    ResumeAnalysis {
        match_percentage: "N/A".to_string(),
        missing_keywords: Vec::new(),
        profile_summary: raw.trim().to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tier 1: strict JSON
// ────────────────────────────────────────────────────────────────────────────

/// Locates the first balanced `{...}` block, parses it, and probes the key
/// spellings the model has used for the three fields. Succeeds only when
/// at least one known field is present.
fn parse_json_tier(raw: &str) -> Option<ResumeAnalysis> {
    let block = first_json_block(raw)?;
    let value: Value = serde_json::from_str(block).ok()?;
    let object = value.as_object()?;

    let mut match_percentage: Option<String> = None;
    let mut missing_keywords: Option<Vec<String>> = None;
    let mut profile_summary: Option<String> = None;

    for (key, field) in object {
        match normalize_key(key).as_str() {
            "matchpercentage" | "jdmatch" | "percentagematch" | "matchscore" | "percentage" => {
                match_percentage = percentage_value(field);
            }
            "missingkeywords" | "keywordsmissing" => {
                missing_keywords = Some(keyword_values(field));
            }
            "profilesummary" | "summary" | "finalthoughts" => {
                profile_summary = field.as_str().map(|s| s.trim().to_string());
            }
            _ => {}
        }
    }

    if match_percentage.is_none() && missing_keywords.is_none() && profile_summary.is_none() {
        return None;
    }

    Some(ResumeAnalysis {
        match_percentage: match_percentage.unwrap_or_else(|| "N/A".to_string()),
        missing_keywords: missing_keywords.unwrap_or_default(),
        profile_summary: profile_summary.unwrap_or_default(),
    })
}

/// First balanced `{...}` block in the text, string-literal aware.
fn first_json_block(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, b) in raw.bytes().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Collapses a key to lowercase alphanumerics: "JD Match" → "jdmatch".
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn percentage_value(field: &Value) -> Option<String> {
    match field {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(format!("{n}%")),
        _ => None,
    }
}

/// Keyword lists arrive as JSON arrays or as one comma-separated string.
fn keyword_values(field: &Value) -> Vec<String> {
    match field {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => split_keyword_list(s),
        _ => Vec::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tier 2: labeled-text extraction
// ────────────────────────────────────────────────────────────────────────────

/// Three independent, optional extractions. Succeeds when at least one
/// hits; the summary falls back to the full raw text so nothing the model
/// wrote is lost.
fn parse_labeled_tier(raw: &str) -> Option<ResumeAnalysis> {
    static PCT_RE: OnceLock<Regex> = OnceLock::new();
    static KEYWORDS_RE: OnceLock<Regex> = OnceLock::new();
    static SUMMARY_RE: OnceLock<Regex> = OnceLock::new();

    let pct_re = PCT_RE.get_or_init(|| Regex::new(r"(\d{1,3})\s*%").expect("valid regex"));
    let keywords_re = KEYWORDS_RE
        .get_or_init(|| Regex::new(r"(?i)missing\s+keywords?\s*[:\-]?\s*(.+)").expect("valid regex"));
    let summary_re = SUMMARY_RE.get_or_init(|| {
        Regex::new(r"(?is)(?:profile\s+summary|final\s+thoughts)\s*[:\-]?\s*(.+)")
            .expect("valid regex")
    });

    let match_percentage = pct_re.captures(raw).map(|c| format!("{}%", &c[1]));
    let missing_keywords = keywords_re
        .captures(raw)
        .map(|c| split_keyword_list(&c[1]))
        .unwrap_or_default();
    let profile_summary = summary_re.captures(raw).map(|c| c[1].trim().to_string());

    if match_percentage.is_none() && missing_keywords.is_empty() && profile_summary.is_none() {
        return None;
    }

    Some(ResumeAnalysis {
        match_percentage: match_percentage.unwrap_or_else(|| "N/A".to_string()),
        missing_keywords,
        profile_summary: profile_summary.unwrap_or_else(|| raw.trim().to_string()),
    })
}

fn split_keyword_list(list: &str) -> Vec<String> {
    list.trim_matches(|c| c == '[' || c == ']')
        .split([',', ';'])
        .map(|kw| kw.trim().trim_matches(|c| c == '"' || c == '*').trim())
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}
