//! Minimal INI parsing for the dots configuration file.

use std::path::Path;

use anyhow::{Context as _, Result, anyhow, bail};

/// A parsed key-value section.
///
/// Headers preserve original case — section names are hostnames (plus the
/// literal `DEFAULT`), which carry semantic meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The raw section header (e.g., `"DEFAULT"` or `"workstation"`).
    pub header: String,
    /// Key-value entries within this section, in file order.
    pub entries: Vec<(String, String)>,
}

/// Parse an INI file into key-value sections.
///
/// A missing file parses as no sections, so pure defaults apply.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains a malformed
/// line.
pub fn parse_sections(path: &Path) -> Result<Vec<Section>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_sections_from_str(&content)
}

/// Parse INI content from a string.
///
/// Lines starting with `#` or `;` are comments; an unquoted ` #` inside a
/// value starts an inline comment.
///
/// # Examples
///
/// ```
/// use dots::config::ini::parse_sections_from_str;
///
/// let sections = parse_sections_from_str("[workstation]\nignored_files = *.bak\n").unwrap();
/// assert_eq!(sections[0].header, "workstation");
/// assert_eq!(sections[0].entries[0].1, "*.bak");
/// ```
///
/// # Errors
///
/// Returns an error for a malformed header, an entry before any section
/// header, or a line without `=`.
pub fn parse_sections_from_str(content: &str) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            let header = line
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .ok_or_else(|| anyhow!("malformed section header at line {}: {line}", idx + 1))?;
            sections.push(Section {
                header: header.to_string(),
                entries: Vec::new(),
            });
            continue;
        }

        let Some(section) = sections.last_mut() else {
            bail!("entry before any section header at line {}: {line}", idx + 1);
        };
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| anyhow!("expected 'key = value' at line {}: {line}", idx + 1))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("empty key at line {}: {line}", idx + 1);
        }
        let value = strip_inline_comment(value.trim());
        section.entries.push((key.to_string(), value.to_string()));
    }

    Ok(sections)
}

/// Cut a value at the first `#` that follows whitespace; a `#` glued to the
/// value text is kept.
fn strip_inline_comment(value: &str) -> &str {
    let mut after_whitespace = false;
    for (i, c) in value.char_indices() {
        if c == '#' && after_whitespace {
            return value[..i].trim_end();
        }
        after_whitespace = c.is_whitespace();
    }
    value
}
