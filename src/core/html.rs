// src/core/html.rs
// Case-insensitive tag scanning. No DOM: we only need one <script> block.

pub fn to_lower(s: &str) -> String {
    // ASCII-only lowering keeps byte offsets identical to the input.
    s.to_ascii_lowercase()
}

/// Next `<o ...> ... c` block at or after `from`, as byte offsets into `s`.
/// `lc` is `s` lowered; `ol`/`cl` are lowered patterns. The end offset includes `cl`.
fn next_tag_block_in(s: &str, lc: &str, ol: &str, cl: &str, from: usize) -> Option<(usize, usize)> {
    let start = lc.get(from..)?.find(ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(cl)?;
    let end = open_end + end_rel + cl.len();
    Some((start, end))
}

/// Text between the end of the opening tag and the start of the closing tag.
pub fn inner_after_open_tag(block: &str) -> &str {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return &block[oe + 1..cs];
            }
        }
    }
    ""
}

/// Value of attribute `name` in an opening tag such as
/// `<script type="application/ld+json" nonce=abc>`. Quotes optional.
pub fn attr_value<'a>(open_tag: &'a str, name: &str) -> Option<&'a str> {
    let lc = to_lower(open_tag);
    let needle = to_lower(name);
    let mut from = 0usize;

    while let Some(rel) = lc[from..].find(&needle) {
        let at = from + rel;
        from = at + needle.len();

        // must be a whole attribute name: preceded by whitespace
        let before_ok = lc[..at].chars().next_back().is_some_and(|c| c.is_whitespace());
        let after = lc[from..].trim_start();
        if !before_ok || !after.starts_with('=') {
            continue;
        }
        let value_start = open_tag.len() - after.len() + 1;
        let raw = open_tag[value_start..].trim_start();
        let raw_off = open_tag.len() - raw.len();

        return match raw.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let end = raw[1..].find(q)?;
                Some(&open_tag[raw_off + 1..raw_off + 1 + end])
            }
            Some(_) => {
                let end = raw
                    .find(|c: char| c.is_whitespace() || c == '>')
                    .unwrap_or(raw.len());
                Some(&open_tag[raw_off..raw_off + end])
            }
            None => None,
        };
    }
    None
}

/// Bodies of every `<script type="<mime>">` element, in document order.
pub fn script_blocks_by_type<'a>(doc: &'a str, mime: &str) -> Vec<&'a str> {
    let lc = to_lower(doc);
    let mime = to_lower(mime);
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some((s, e)) = next_tag_block_in(doc, &lc, "<script", "</script>", pos) {
        pos = e;
        let block = &doc[s..e];
        let open_end = match block.find('>') {
            Some(i) => i + 1,
            None => continue,
        };
        let is_match = attr_value(&block[..open_end], "type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(&mime));
        if is_match {
            out.push(inner_after_open_tag(block));
        }
    }
    out
}

/// The first JSON-LD data island in the page, if any.
pub fn first_ld_json(doc: &str) -> Option<&str> {
    script_blocks_by_type(doc, "application/ld+json").into_iter().next()
}
