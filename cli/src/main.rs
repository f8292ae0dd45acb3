//! marktex CLI - slide markup to PDF presentations

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use marktex::{
    compile_src_with, open_in_viewer, pdf_path_for, translate_file_with_options, translate_files,
    DocumentRenderer, JsonFormat, ParseOptions, RenderOptions, SlideParser, Template,
    TemplateRegistry, TranslateOptions, XelatexRenderer, DEFAULT_OUTPUT, DEFAULT_TEMPLATE,
};

#[derive(Parser)]
#[command(name = "marktex")]
#[command(version)]
#[command(about = "Turn slide markup into PDF presentations", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Markup files to compile (reads stdin when none are given)
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct CommonArgs {
    /// Template name
    #[arg(long, global = true, default_value = DEFAULT_TEMPLATE)]
    template: String,

    /// Presentation theme
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Base font size in points
    #[arg(long, global = true)]
    font_size: Option<u8>,

    /// Keep image and source references as written
    #[arg(long, global = true)]
    offline: bool,

    /// XeLaTeX binary
    #[arg(long, global = true, env = "MARKTEX_XELATEX", value_name = "PATH")]
    xelatex: Option<PathBuf>,

    /// Directory of themes and packages added to the TeX search path
    #[arg(long, global = true, env = "MARKTEX_RESOURCES", value_name = "DIR")]
    resources: Option<PathBuf>,
}

impl CommonArgs {
    fn translate_options(&self) -> TranslateOptions {
        let mut render = RenderOptions::new();
        if let Some(theme) = &self.theme {
            render = render.with_theme(theme.clone());
        }
        if let Some(size) = self.font_size {
            render = render.with_font_size(size);
        }

        let mut parse = ParseOptions::new();
        if self.offline {
            parse = parse.offline();
        }

        TranslateOptions::new()
            .with_template(self.template.clone())
            .with_parse_options(parse)
            .with_render_options(render)
    }

    fn renderer(&self) -> XelatexRenderer {
        let mut renderer = match &self.xelatex {
            Some(program) => XelatexRenderer::with_program(program),
            None => XelatexRenderer::new(),
        };
        if let Some(dir) = &self.resources {
            renderer = renderer.with_resource_dir(dir);
        }
        renderer
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile markup files to PDF next to each source
    Build {
        /// Markup files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Open each PDF when done
        #[arg(long)]
        open: bool,
    },

    /// Translate a markup file to LaTeX source
    Tex {
        /// Markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump the parsed document model as JSON
    Json {
        /// Markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document statistics
    Info {
        /// Markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List available templates
    Templates,

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let common = cli.common;

    let result = match cli.command {
        Some(Commands::Build { inputs, open }) => cmd_build(&inputs, &common, open),
        Some(Commands::Tex { input, output }) => cmd_tex(&input, output.as_deref(), &common),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &common),
        Some(Commands::Info { input }) => cmd_info(&input, &common),
        Some(Commands::Templates) => {
            cmd_templates();
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if cli.inputs.is_empty() {
                cmd_stdin(&common)
            } else {
                cmd_build(&cli.inputs, &common, false)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_stdin(common: &CommonArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut src = String::new();
    std::io::stdin().read_to_string(&mut src)?;
    log::debug!("Read {} bytes from stdin", src.len());

    let target = compile_src_with(
        &src,
        &common.translate_options(),
        &common.renderer(),
        Path::new(DEFAULT_OUTPUT),
    )?;
    println!("{} {}", "Saved to".green(), target.display());
    open_in_viewer(&target)?;

    Ok(())
}

fn cmd_build(
    inputs: &[PathBuf],
    common: &CommonArgs,
    open: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = common.translate_options();
    let renderer = common.renderer();

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Translating...");
    let translated = translate_files(inputs, &options);
    log::debug!(
        "Translated {} file(s), typesetting with {}",
        translated.len(),
        renderer.program().display()
    );

    let mut failures = Vec::new();
    let mut outputs = Vec::new();
    for (path, result) in translated {
        pb.set_message(format!("Typesetting {}", path.display()));
        let rendered = result.and_then(|r| renderer.render(&r.content, &pdf_path_for(&path)));
        match rendered {
            Ok(pdf) => outputs.push(pdf),
            Err(e) => failures.push((path, e)),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    for pdf in &outputs {
        println!("{} {}", "Saved to".green(), pdf.display());
        if open {
            open_in_viewer(pdf)?;
        }
    }
    for (path, e) in &failures {
        let label = if e.is_document_error() {
            "Invalid".yellow().bold()
        } else {
            "Failed".red().bold()
        };
        eprintln!("{} {}: {}", label, path.display(), e);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} of {} file(s) failed", failures.len(), inputs.len()).into())
    }
}

fn cmd_tex(
    input: &Path,
    output: Option<&Path>,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = translate_file_with_options(input, &common.translate_options())?;
    log::debug!(
        "Template {} produced {} bytes",
        result.template,
        result.content_len()
    );

    if let Some(path) = output {
        fs::write(path, &result.content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", result.content);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let parse_options = common.translate_options().parse;
    let doc = SlideParser::open_with_options(input, parse_options)?.parse()?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = marktex::render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, common: &CommonArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = common.translate_options().with_stats(true);
    let result = translate_file_with_options(input, &options)?;
    let stats = result.stats.clone().unwrap_or_default();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Template".bold(), result.template);
    println!("{}: {}", "Output".bold(), pdf_path_for(input).display());
    println!("{}: {} bytes", "LaTeX".bold(), result.content_len());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Slides".bold(), stats.slide_count());
    println!("{}: {}", "Title slides".bold(), stats.plain_title_count);
    println!("{}: {}", "Picture slides".bold(), stats.picture_slide_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!(
        "{}: {}",
        "Images".bold(),
        stats.image_count + stats.figure_count
    );
    println!("{}: {}", "Source inclusions".bold(), stats.inclusion_count);
    println!(
        "{}: {} blocks, {} inline",
        "Literals".bold(),
        stats.literal_block_count,
        stats.inline_literal_count
    );
    println!("{}: {}", "Math".bold(), stats.math_count);
    println!("{}: {}", "Pauses".bold(), stats.pause_count);

    Ok(())
}

fn cmd_templates() {
    let registry = TemplateRegistry::with_defaults();
    for name in registry.names() {
        if let Some(template) = registry.get(name) {
            println!("{}  {}", name.cyan().bold(), template.description().dimmed());
        }
    }
}

fn cmd_version() {
    println!("{} {}", "marktex".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Slide markup to PDF presentations");
}
