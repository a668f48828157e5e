//! Cell normalisation for reference tables.
//!
//! Cells are normalised once at load time so lookups only ever see clean entries:
//! blank and `nan` cells disappear, and cells holding a serialised list such as
//! `['Antifungal Cream', 'Fluconazole']` are split into their items.

/// Normalises one raw cell into zero or more display entries.
pub(crate) fn normalise_cell(raw: &str) -> Vec<String> {
    if is_blank(raw) {
        return Vec::new();
    }

    let trimmed = raw.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Some(items) = parse_list_literal(trimmed) {
            return items
                .into_iter()
                .filter(|item| !is_blank(item))
                .map(|item| item.trim().to_string())
                .collect();
        }
        tracing::debug!(cell = trimmed, "keeping malformed list literal as a single entry");
    }

    vec![trimmed.to_string()]
}

/// Empty, whitespace-only, or the pandas missing-value marker `nan`.
pub(crate) fn is_blank(value: &str) -> bool {
    let t = value.trim();
    t.is_empty() || t.eq_ignore_ascii_case("nan")
}

/// Parses `[ 'a', "b", ... ]` into its string items.
///
/// Items must be single- or double-quoted; backslash escapes are honoured and a
/// trailing comma is accepted. Returns `None` for anything else, including lists
/// with unquoted items.
pub(crate) fn parse_list_literal(text: &str) -> Option<Vec<String>> {
    let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let quote = match chars.next() {
            None => break,
            Some(q @ ('\'' | '"')) => q,
            Some(_) => return None,
        };

        let mut item = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next()? {
                    'n' => item.push('\n'),
                    't' => item.push('\t'),
                    other => item.push(other),
                },
                c if c == quote => {
                    closed = true;
                    break;
                }
                c => item.push(c),
            }
        }
        if !closed {
            return None;
        }
        items.push(item);

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return None,
        }
    }

    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cells_are_dropped() {
        assert!(normalise_cell("").is_empty());
        assert!(normalise_cell("   ").is_empty());
        assert!(normalise_cell("nan").is_empty());
        assert!(normalise_cell("NaN").is_empty());
    }

    #[test]
    fn test_plain_cell_is_single_entry() {
        assert_eq!(normalise_cell(" bath twice "), vec!["bath twice"]);
    }

    #[test]
    fn test_list_literal_is_spliced() {
        let entries = normalise_cell("['Antifungal Cream', 'Fluconazole', 'Terbinafine']");
        assert_eq!(entries, vec!["Antifungal Cream", "Fluconazole", "Terbinafine"]);
    }

    #[test]
    fn test_list_literal_with_mixed_quotes_and_escapes() {
        let items = parse_list_literal(r#"["Don't scratch", 'it\'s fine', "a, b"]"#).unwrap();
        assert_eq!(items, vec!["Don't scratch", "it's fine", "a, b"]);
    }

    #[test]
    fn test_list_literal_trailing_comma_and_empty() {
        assert_eq!(parse_list_literal("['a', ]").unwrap(), vec!["a"]);
        assert_eq!(parse_list_literal("[]").unwrap(), Vec::<String>::new());
        assert!(normalise_cell("[]").is_empty());
    }

    #[test]
    fn test_list_items_that_are_blank_are_dropped() {
        assert_eq!(normalise_cell("['x', 'nan', ' ']"), vec!["x"]);
    }

    #[test]
    fn test_malformed_list_is_kept_verbatim() {
        assert_eq!(normalise_cell("[unquoted, items]"), vec!["[unquoted, items]"]);
        assert_eq!(normalise_cell("['unterminated]"), vec!["['unterminated]"]);
        assert!(parse_list_literal("['a' 'b']").is_none());
    }
}
