// src/core/sanitize.rs
use crate::config::consts::DEFAULT_FILENAME;

/// Decode the HTML entities that show up inside JSON-LD strings
/// (`Schindler&apos;s List`, `Harry &amp; Sally`, `&#39;`, `&#x27;`).
/// Unknown or malformed entities are left as-is.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        // entities are short; don't scan past the next 10 chars for ';'
        let semi = tail.char_indices().take(10).find(|&(_, c)| c == ';').map(|(i, _)| i);
        match semi.and_then(|i| decode_entity(&tail[1..i]).map(|c| (i, c))) {
            Some((i, c)) => {
                out.push(c);
                rest = &tail[i + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "nbsp" => Some(' '),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Entities decoded, whitespace collapsed. Used for titles and genre labels.
pub fn clean_text(s: &str) -> String {
    normalize_ws(&normalize_entities(s))
}

/// Reduce a user-supplied base name to one safe path component.
/// Falls back to the default base name when nothing usable is left.
pub fn sanitize_filename(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut last_us = false;
    for ch in stem.chars() {
        if ch.is_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch == '-' || ch == '_' || ch == '.' {
            if !(last_us && ch == '_') { out.push(ch); }
            last_us = ch == '_';
        }
    }
    let out = out.trim_matches(|c| c == '_' || c == '.').to_string();
    if out.is_empty() { s!(DEFAULT_FILENAME) } else { out }
}

/// True when `name` is a bare file name: no separators, no parent refs.
pub fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_numeric_entities() {
        assert_eq!(normalize_entities("Schindler&apos;s List"), "Schindler's List");
        assert_eq!(normalize_entities("Harry &amp; Sally"), "Harry & Sally");
        assert_eq!(normalize_entities("It&#39;s &#x27;ok&#X27;"), "It's 'ok'");
        assert_eq!(normalize_entities("L&eacute;on"), "L&eacute;on");
        assert_eq!(normalize_entities("AT&T"), "AT&T");
        assert_eq!(normalize_entities("trailing &"), "trailing &");
    }

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  The\n  Godfather&nbsp;Part II "), "The Godfather Part II");
    }

    #[test]
    fn filename_sanitizing() {
        assert_eq!(sanitize_filename("imdb top  movies"), "imdb_top_movies");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_filename("top-250.v2"), "top-250.v2");
        assert_eq!(sanitize_filename("///"), DEFAULT_FILENAME);
    }

    #[test]
    fn plain_filename_check() {
        assert!(is_plain_filename("imdb_top_movies.csv"));
        assert!(!is_plain_filename("../secret.csv"));
        assert!(!is_plain_filename("a/b.csv"));
        assert!(!is_plain_filename("a\\b.csv"));
        assert!(!is_plain_filename(".."));
        assert!(!is_plain_filename(""));
    }
}
