use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single issue extracted from a source site.
///
/// Built once by the loader from a strategy's extraction and handed to the
/// caller untouched. `links` keeps the reading order of the source page,
/// duplicates included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comic {
    /// Host of the site the issue came from, e.g. `www.mangatown.com`
    pub source: String,
    /// URL that was requested for this issue
    pub url_source: String,
    pub name: String,
    /// Site-native issue identifier (`c693`, `chapter-600`, `20.5`, ...)
    pub issue_number: String,
    pub links: Vec<String>,
}

impl Comic {
    /// File name stem safe to use in the output folder, `<name>-<issue>`.
    pub fn file_stem(&self) -> String {
        sanitize_filename(&format!("{}-{}", self.name, self.issue_number))
    }

    /// Issue identifier parsed for numeric comparison.
    pub fn issue_id(&self) -> IssueId {
        IssueId::parse(&self.issue_number)
    }
}

/// Issue identifier as either a comparable number or an opaque label.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueId {
    Number(f64),
    Label(String),
}

const ISSUE_PREFIXES: &[&str] = &["chapter", "episode", "issue", "ch", "ep", "c"];

impl IssueId {
    /// Reads `20`, `20.5`, `chapter-5`, `c693` or `Issue-50` as numbers;
    /// anything else stays a label.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<f64>() {
            return IssueId::Number(value);
        }

        let lowered = trimmed.to_ascii_lowercase();
        for prefix in ISSUE_PREFIXES {
            if let Some(value) = lowered.strip_prefix(prefix).and_then(parse_slug_number) {
                return IssueId::Number(value);
            }
        }

        IssueId::Label(trimmed.to_string())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            IssueId::Number(value) => Some(*value),
            IssueId::Label(_) => None,
        }
    }

    /// Inclusive numeric membership; labels are never inside a range.
    pub fn within(&self, start: f64, end: f64) -> bool {
        match self {
            IssueId::Number(value) => start <= *value && *value <= end,
            IssueId::Label(_) => false,
        }
    }
}

fn parse_slug_number(rest: &str) -> Option<f64> {
    let rest = rest.trim_start_matches(['-', '_', '.']);
    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    rest.parse::<f64>().ok()
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueId::Number(value) => write!(f, "{}", value),
            IssueId::Label(label) => write!(f, "{}", label),
        }
    }
}

/// Sanitizes a comic name or issue label to be safe as a filename across
/// different operating systems
pub fn sanitize_filename(input: &str) -> String {
    // Remove characters that are problematic on various file systems
    let invalid_chars = match env::consts::OS {
        "windows" => r#"\/:*?"<>|"#,
        _ => "/",  // Unix-like systems mainly forbid slashes
    };

    // Site titles and issue labels carry runs of spaces ("Vol.TBD  Chapter 14"),
    // collapse them into single dashes
    let mut result = input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    for c in invalid_chars.chars() {
        result = result.replace(c, "_");
    }

    // "Title - c693" would otherwise end up as "title---c693"
    while result.contains("--") {
        result = result.replace("--", "-");
    }

    // Handle Windows reserved filenames
    if env::consts::OS == "windows" {
        let reserved_names = [
            "CON", "PRN", "AUX", "NUL",
            "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9",
            "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
        ];

        if reserved_names.iter().any(|&name| result.eq_ignore_ascii_case(name)) {
            result = format!("_{}", result);
        }
    }

    // Ensure filename doesn't start with a dot (hidden file on Unix)
    if result.starts_with('.') {
        result = format!("_{}", result);
    }

    if result.is_empty() {
        result.push('_');
    }

    // Trim to reasonable length without splitting a multi-byte character
    if result.len() > 255 {
        let mut cut = 255;
        while !result.is_char_boundary(cut) {
            cut -= 1;
        }
        result.truncate(cut);
    }

    result
}
