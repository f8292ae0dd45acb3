//! Character-level rewrites applied inside math spans only.

/// Commands whose following delimiter is copied untouched.
const SIZING_COMMANDS: &[&str] = &[
    "left", "right", "middle", "big", "Big", "bigg", "Bigg", "bigl", "bigr", "Bigl", "Bigr",
    "biggl", "biggr", "Biggl", "Biggr",
];

/// Bare words turned into operator commands.
const OPERATORS: &[&str] = &["log"];

/// Rewrite ASCII math notation into stretchy delimiters and operators.
///
/// `(`/`)` and `[`/`]` become `\left`/`\right` pairs, `/` becomes `\over`,
/// `*` becomes `\cdot`, and a standalone `log` becomes `\log`. Existing
/// commands are copied unchanged.
pub fn rewrite(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len() + 16);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end].is_ascii_alphabetic() {
                    end += 1;
                }
                if end == start {
                    out.push('\\');
                    if let Some(&next) = chars.get(start) {
                        out.push(next);
                        i = start + 1;
                    } else {
                        i = start;
                    }
                    continue;
                }
                let name: String = chars[start..end].iter().collect();
                out.push('\\');
                out.push_str(&name);
                i = end;
                if SIZING_COMMANDS.contains(&name.as_str()) {
                    i = copy_delimiter(&chars, i, &mut out);
                }
            }
            '(' => {
                out.push_str("\\left(");
                i += 1;
            }
            ')' => {
                out.push_str("\\right)");
                i += 1;
            }
            '[' => {
                out.push_str("\\left[");
                i += 1;
            }
            ']' => {
                out.push_str("\\right]");
                i += 1;
            }
            '/' => {
                out.push_str(" \\over ");
                i += 1;
            }
            '*' => {
                out.push_str(" \\cdot ");
                i += 1;
            }
            c if c.is_alphanumeric() => {
                let start = i;
                while i < chars.len() && chars[i].is_alphanumeric() {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if OPERATORS.contains(&word.as_str()) {
                    out.push('\\');
                }
                out.push_str(&word);
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Copy the delimiter following a sizing command, skipping spaces.
fn copy_delimiter(chars: &[char], mut i: usize, out: &mut String) -> usize {
    while i < chars.len() && chars[i] == ' ' {
        out.push(' ');
        i += 1;
    }
    match chars.get(i) {
        Some('\\') => {
            out.push('\\');
            i += 1;
            if let Some(&next) = chars.get(i) {
                out.push(next);
                i += 1;
            }
            i
        }
        Some(&d) => {
            out.push(d);
            i + 1
        }
        None => i,
    }
}
