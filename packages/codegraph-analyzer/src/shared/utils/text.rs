//! String helpers for node identities and Python docstrings

/// Last `:`-separated segment of a node identity (`a.py:Foo:bar` → `bar`)
#[inline]
pub fn last_segment(id: &str) -> &str {
    id.rsplit(':').next().unwrap_or(id)
}

/// Final path component, accepting both `/` and `\` separators
#[inline]
pub fn file_display_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Strip the prefix and quotes of a Python string literal and normalize
/// indentation the way `inspect.cleandoc` does.
pub fn clean_docstring(literal: &str) -> String {
    let body = literal.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let body = ["\"\"\"", "'''", "\"", "'"]
        .iter()
        .find_map(|quote| {
            body.strip_prefix(quote)
                .map(|rest| rest.strip_suffix(quote).unwrap_or(rest))
        })
        .unwrap_or(body);

    let mut lines = body.lines();
    let first = lines.next().unwrap_or("").trim().to_string();
    let rest: Vec<&str> = lines.collect();

    let indent = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned = vec![first];
    cleaned.extend(rest.iter().map(|line| {
        line.get(indent..).unwrap_or_else(|| line.trim_start()).trim_end().to_string()
    }));

    while cleaned.last().is_some_and(|l| l.is_empty()) {
        cleaned.pop();
    }
    while cleaned.first().is_some_and(|l| l.is_empty()) {
        cleaned.remove(0);
    }
    cleaned.join("\n")
}

/// Keep at most `max_lines` lines of `text`
pub fn truncate_lines(text: &str, max_lines: usize) -> String {
    text.split('\n').take(max_lines).collect::<Vec<_>>().join("\n")
}
