//! Escaping of reserved output characters.

/// Characters escaped in running prose.
pub const PROSE_RESERVED: &[char] = &['#', '$', '%'];

/// Characters escaped in table cells, where `&` separates columns.
pub const CELL_RESERVED: &[char] = &['#', '$', '%', '&'];

/// Terminator of the literal block environment.
const LITERAL_BLOCK_END: &str = "\\end{minted}";

/// Escape reserved characters in prose text.
///
/// A reserved character already preceded by a backslash is left alone, so
/// escaping text twice gives the same result as escaping it once.
pub fn escape_prose(text: &str) -> String {
    escape_reserved(text, PROSE_RESERVED)
}

/// Escape reserved characters in a table cell.
pub fn escape_cell(text: &str) -> String {
    escape_reserved(text, CELL_RESERVED)
}

fn escape_reserved(text: &str, reserved: &[char]) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut prev = None;
    for c in text.chars() {
        if reserved.contains(&c) && prev != Some('\\') {
            out.push('\\');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Escape text for a typewriter span.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '{' | '}' | '#' | '$' | '%' | '&' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Break the environment terminator inside literal block content.
pub fn escape_literal_block(text: &str) -> String {
    text.replace(LITERAL_BLOCK_END, "\\end {minted}")
}

/// Path as written into the output, with forward slashes.
pub fn latex_path(path: &std::path::Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Escape characters that break a hyperlink target.
pub fn escape_url(url: &str) -> String {
    escape_reserved(url, &['#', '%'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_prose() {
        assert_eq!(escape_prose("100% of #1 costs $5"), "100\\% of \\#1 costs \\$5");
        assert_eq!(escape_prose("a & b"), "a & b");
    }

    #[test]
    fn test_escape_prose_is_idempotent() {
        let once = escape_prose("#tag and 50%");
        assert_eq!(escape_prose(&once), once);
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("R&D #2"), "R\\&D \\#2");
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("a_b"), "a\\_b");
        assert_eq!(escape_literal("\\n{x}"), "\\textbackslash{}n\\{x\\}");
        assert_eq!(escape_literal("x^2~"), "x\\textasciicircum{}2\\textasciitilde{}");
        assert_eq!(escape_literal("#"), "\\#");
    }

    #[test]
    fn test_escape_literal_block() {
        let text = "before\n\\end{minted}\nafter";
        let once = escape_literal_block(text);
        assert_eq!(once, "before\n\\end {minted}\nafter");
        assert_eq!(escape_literal_block(&once), once);
        assert_eq!(escape_literal_block("# 50% $x$"), "# 50% $x$");
    }

    #[test]
    fn test_latex_path() {
        assert_eq!(
            latex_path(std::path::Path::new("C:\\slides\\a.png")),
            "C:/slides/a.png"
        );
    }

    #[test]
    fn test_escape_url() {
        assert_eq!(escape_url("http://x.org/a#b%20"), "http://x.org/a\\#b\\%20");
    }
}
