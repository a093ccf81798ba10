use std::path::Path;

use anyhow::Context;

/// Read the canonical TLD list.
///
/// A file whose first non-blank character is `[` is parsed as a JSON array
/// of strings. Anything else is read one TLD per line; blank lines and lines
/// starting with `#` are skipped. Order is preserved: it determines the root.
pub fn read_tld_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading TLD list {}", path.display()))?;
    parse_tld_list(&text).with_context(|| format!("parsing TLD list {}", path.display()))
}

pub fn parse_tld_list(text: &str) -> anyhow::Result<Vec<String>> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).context("expected a JSON array of strings");
    }
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_array() {
        let tlds = parse_tld_list("[\"com\", \"io\", \"xyz\"]").unwrap();
        assert_eq!(tlds, vec!["com", "io", "xyz"]);
    }

    #[test]
    fn json_with_non_strings_is_error() {
        assert!(parse_tld_list("[1, 2]").is_err());
    }

    #[test]
    fn line_list_skips_comments_and_blanks() {
        let tlds = parse_tld_list("# authorized\ncom\n\n  io  \n#xyz\napp\n").unwrap();
        assert_eq!(tlds, vec!["com", "io", "app"]);
    }

    #[test]
    fn empty_file_gives_empty_list() {
        assert!(parse_tld_list("").unwrap().is_empty());
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tlds.txt");
        std::fs::write(&path, "com\nio\n").unwrap();
        assert_eq!(read_tld_list(&path).unwrap(), vec!["com", "io"]);
        assert!(read_tld_list(&dir.path().join("missing.json")).is_err());
    }
}
