//! Typesetting of generated source into PDF with an external engine.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Environment variable overriding the engine binary.
pub const XELATEX_ENV: &str = "MARKTEX_XELATEX";

/// Engine location of a default MiKTeX install.
pub const MIKTEX_XELATEX: &str = r"C:\Program Files\MiKTeX 2.9\miktex\bin\x64\miktex-xetex.exe";

/// Job name of the source written into the working directory.
const JOB_NAME: &str = "marktex";

/// Lines of engine output kept in an error message.
const LOG_TAIL_LINES: usize = 20;

/// Renders typesetting source to a file.
pub trait DocumentRenderer: Send + Sync {
    /// Render `source` and place the result at `target`.
    fn render(&self, source: &str, target: &Path) -> Result<PathBuf>;
}

/// Find the engine binary: the environment override, then a default MiKTeX
/// install on Windows, then `xelatex` on the `PATH`.
pub fn locate_xelatex() -> PathBuf {
    if let Some(path) = std::env::var_os(XELATEX_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    if cfg!(windows) && Path::new(MIKTEX_XELATEX).exists() {
        return PathBuf::from(MIKTEX_XELATEX);
    }
    PathBuf::from("xelatex")
}

/// XeLaTeX-based renderer.
///
/// Each render runs in its own temporary directory, so concurrent renders
/// never share working files.
#[derive(Debug, Clone)]
pub struct XelatexRenderer {
    program: PathBuf,
    passes: u32,
    resource_dir: Option<PathBuf>,
}

impl XelatexRenderer {
    /// Create a renderer using the located engine.
    pub fn new() -> Self {
        Self::with_program(locate_xelatex())
    }

    /// Create a renderer for a specific engine binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            passes: 2,
            resource_dir: None,
        }
    }

    /// Set the number of engine passes (at least one).
    pub fn with_passes(mut self, passes: u32) -> Self {
        self.passes = passes.max(1);
        self
    }

    /// Add a directory of themes and packages to the engine search path.
    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }

    /// Engine binary in use.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Number of engine passes.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    fn command(&self, work_dir: &Path) -> Result<Command> {
        let mut command = Command::new(&self.program);
        command
            .current_dir(work_dir)
            .args([
                "-undump=xelatex",
                "-shell-escape",
                "-interaction=nonstopmode",
                "-halt-on-error",
            ])
            .arg(format!("{}.tex", JOB_NAME))
            .stdin(Stdio::null());

        if let Some(dir) = &self.resource_dir {
            command.env("TEXINPUTS", texinputs(dir)?);
        }
        Ok(command)
    }

    fn run_pass(&self, work_dir: &Path, pass: u32) -> Result<()> {
        log::debug!(
            "Running {} (pass {}/{})",
            self.program.display(),
            pass,
            self.passes
        );
        let output = match self.command(work_dir)?.output() {
            Ok(output) => output,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::Typeset(format!(
                    "{} not found; install XeLaTeX or set {}",
                    self.program.display(),
                    XELATEX_ENV
                )));
            }
            Err(err) => return Err(err.into()),
        };

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(Error::Typeset(format!(
                "{} exited with {} on pass {}:\n{}",
                self.program.display(),
                output.status,
                pass,
                log_tail(&stdout)
            )));
        }
        Ok(())
    }
}

impl Default for XelatexRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for XelatexRenderer {
    fn render(&self, source: &str, target: &Path) -> Result<PathBuf> {
        let work_dir = tempfile::Builder::new().prefix("marktex-").tempdir()?;
        fs::write(work_dir.path().join(format!("{}.tex", JOB_NAME)), source)?;

        // A second pass settles section navigation and titles.
        for pass in 1..=self.passes {
            self.run_pass(work_dir.path(), pass)?;
        }

        let produced = work_dir.path().join(format!("{}.pdf", JOB_NAME));
        if !produced.exists() {
            return Err(Error::Typeset(format!(
                "{} produced no PDF",
                self.program.display()
            )));
        }
        move_file(&produced, target)?;
        log::info!("Wrote {}", target.display());
        Ok(target.to_path_buf())
    }
}

/// Search path with the resource directory first and the engine defaults after.
fn texinputs(dir: &Path) -> Result<OsString> {
    std::env::join_paths([dir.as_os_str(), "".as_ref()])
        .map_err(|e| Error::Typeset(format!("Invalid resource directory: {}", e)))
}

fn log_tail(log: &str) -> String {
    let lines: Vec<&str> = log.lines().collect();
    let start = lines.len().saturating_sub(LOG_TAIL_LINES);
    lines[start..].join("\n")
}

/// Rename, falling back to copy when the target is on another filesystem.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_err() {
        fs::copy(from, to)?;
    }
    Ok(())
}

/// Open a file with the platform's default viewer without waiting for it.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(path);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    log::debug!("Opened {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_builder() {
        let renderer = XelatexRenderer::with_program("/opt/tex/xelatex")
            .with_passes(0)
            .with_resource_dir("/opt/themes");
        assert_eq!(renderer.program(), Path::new("/opt/tex/xelatex"));
        assert_eq!(renderer.passes(), 1);
    }

    #[test]
    fn test_command_arguments() {
        let renderer = XelatexRenderer::with_program("xelatex").with_resource_dir("/opt/themes");
        let command = renderer.command(Path::new("/tmp")).unwrap();
        let args: Vec<String> = command
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert!(args.contains(&"-shell-escape".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("marktex.tex"));
        assert!(command
            .get_envs()
            .any(|(k, v)| k == "TEXINPUTS" && v.is_some()));
    }

    #[test]
    fn test_missing_engine_is_typeset_error() {
        let renderer = XelatexRenderer::with_program("/definitely/not/xelatex");
        let target = std::env::temp_dir().join("marktex-missing-engine.pdf");
        let err = renderer.render("\\documentclass{beamer}", &target).unwrap_err();
        assert!(matches!(err, Error::Typeset(msg) if msg.contains("not found")));
    }

    #[test]
    fn test_log_tail() {
        let log: String = (0..30).map(|i| format!("line {}\n", i)).collect();
        let tail = log_tail(&log);
        assert!(tail.starts_with("line 10"));
        assert!(tail.ends_with("line 29"));
    }

    #[test]
    fn test_texinputs_keeps_defaults() {
        let value = texinputs(Path::new("/opt/themes")).unwrap();
        let value = value.to_string_lossy();
        assert!(value.starts_with("/opt/themes"));
        assert!(value.len() > "/opt/themes".len());
    }
}
