//! Document header and terminator for presentation output.

use super::RenderOptions;

/// Document terminator.
pub const DOCUMENT_END: &str = "\\end{document}\n";

/// Build the document preamble up to and including `\begin{document}`.
///
/// The highlighting package is only declared when the body contains source
/// inclusions or literal blocks.
pub fn preamble(options: &RenderOptions, highlighting: bool) -> String {
    let mut out = format!(
        "\\documentclass[{}]{{beamer}}\n",
        options.class_option_list()
    );

    if highlighting {
        out.push_str("\\usepackage{minted}\n");
        if !options.minted_style.is_empty() {
            out.push_str(&format!("\\usemintedstyle{{{}}}\n", options.minted_style));
        }
    }
    out.push('\n');

    if !options.theme.is_empty() {
        out.push_str(&format!("\\usetheme{{{}}}\n\n", options.theme));
    }

    out.push_str("\\usepackage{amsmath}\n");
    out.push_str("\\usepackage{booktabs}\n");
    out.push_str("\\usepackage{graphicx}\n\n");
    out.push_str("\\usepackage{hyperref}\n");
    out.push_str(&format!(
        "\\hypersetup{{colorlinks=true,urlcolor={}}}\n\n",
        options.link_color
    ));
    out.push_str("\\begin{document}\n\n");
    out
}

/// Wrap a rendered body with the preamble and terminator.
pub fn wrap(body: &str, options: &RenderOptions, highlighting: bool) -> String {
    let mut out = preamble(options, highlighting);
    out.push_str(body.trim());
    out.push_str("\n\n");
    out.push_str(DOCUMENT_END);
    out
}
