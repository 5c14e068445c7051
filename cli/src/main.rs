//! todocx CLI - Markdown and PDF to Word conversion tool
//!
//! Converts Markdown and PDF files to `.docx`, with an HTML preview mode
//! and an optional remote conversion path for PDFs.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use todocx::{
    detect_format_from_path, output_filename, Config, InputFormat, OutputKind, RemoteConverter,
    RemoteOutcome, Session,
};

/// Markdown and PDF conversion to Word documents
#[derive(Parser)]
#[command(
    name = "todocx",
    version,
    about = "Convert Markdown and PDF files to Word documents",
    long_about = "todocx - Markdown and PDF conversion to Word documents.\n\n\
                  Markdown is parsed locally; PDFs are converted either through the\n\
                  remote conversion API or a local text-reconstruction fallback."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a file to .docx
    #[command(visible_alias = "c")]
    Convert {
        /// Input file path (.md, .markdown, .txt, or .pdf)
        input: PathBuf,

        /// Output file path (default: derived from the input name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force the local conversion path for PDFs
        #[arg(long)]
        local: bool,

        /// Request OCR on the remote path (scanned PDFs)
        #[arg(long)]
        ocr: bool,

        /// Fall back to local conversion without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Render a styled HTML preview
    Preview {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show input file information
    Info {
        /// Input file path
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            local,
            ocr,
            yes,
        } => convert(&input, output.as_deref(), local, ocr, yes),

        Commands::Preview { input, output } => {
            let pb = create_spinner("Rendering preview...");
            let html = todocx::preview_html(&input)?;
            pb.finish_and_clear();

            match output {
                Some(path) => {
                    fs::write(&path, html)?;
                    println!(
                        "{} Preview written to {}",
                        "✓".green().bold(),
                        path.display()
                    );
                }
                None => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    writeln!(handle, "{}", html)?;
                }
            }
            Ok(())
        }

        Commands::Info { input, json } => info(&input, json),

        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn convert(
    input: &Path,
    output: Option<&Path>,
    local: bool,
    ocr: bool,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;
    let config = Config::from_env().with_ocr(ocr);
    let mut session = Session::new(config, format);

    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    session.select_file(&name, fs::read(input)?)?;

    let (bytes, kind) = match format {
        InputFormat::Markdown => {
            session.set_progress(10, "Parsing Markdown...");
            let pb = create_spinner("Converting...");
            let data = session.require_input()?.data.clone();
            let bytes = todocx::convert_bytes(&data, format)?;
            pb.finish_and_clear();
            (bytes, OutputKind::Markdown)
        }
        InputFormat::Pdf => convert_pdf(&mut session, &name, local, yes)?,
    };

    session.set_progress(100, "Done");

    let out_path = match output {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(output_filename(input, kind)),
    };
    fs::write(&out_path, bytes)?;

    println!(
        "{} Converted {} to {}",
        "✓".green().bold(),
        input.display(),
        out_path.display()
    );
    Ok(())
}

fn convert_pdf(
    session: &mut Session,
    name: &str,
    local: bool,
    yes: bool,
) -> Result<(Vec<u8>, OutputKind), Box<dyn std::error::Error>> {
    let data = session.require_input()?.data.clone();

    if !local && session.config().remote_available() {
        let kind = if session.config().ocr {
            OutputKind::Ocr
        } else {
            OutputKind::Premium
        };

        session.set_progress(20, "Uploading to conversion API...");
        let pb = create_spinner("Uploading to conversion API...");
        let converter = RemoteConverter::new(session.config())?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let outcome = runtime.block_on(converter.convert_or_advise(name, data.clone()));
        pb.finish_and_clear();

        match outcome {
            RemoteOutcome::Converted(bytes) => return Ok((bytes, kind)),
            RemoteOutcome::FallbackAdvised { reason } => {
                eprintln!("{} Remote conversion failed: {}", "!".yellow().bold(), reason);
                if !yes && !confirm("Convert locally instead (lower quality)?") {
                    return Err(Box::new(reason));
                }
            }
        }
    } else if !local {
        println!(
            "{} No API credential configured; using local conversion",
            "!".yellow().bold()
        );
    }

    session.set_progress(50, "Reconstructing text layout...");
    let pb = create_spinner("Converting locally...");
    let bytes = todocx::convert_bytes(&data, InputFormat::Pdf)?;
    pb.finish_and_clear();
    Ok((bytes, OutputKind::Converted))
}

fn info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Analyzing input...");
    let format = detect_format_from_path(input)?;
    let data = fs::read(input)?;
    let doc = todocx::parse_bytes(&data, format)?;
    pb.finish_and_clear();

    if json {
        println!("{}", doc.to_json()?);
        return Ok(());
    }

    println!("{}", "Input Information".cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {}",
        "File".bold(),
        input.file_name().unwrap_or_default().to_string_lossy()
    );
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {} KB", "Size".bold(), data.len() / 1024);
    if let Some(ref title) = doc.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(pages) = doc.page_count {
        println!("{}: {}", "Pages".bold(), pages);
    }
    println!("{}: {}", "Blocks".bold(), doc.len());

    let text = doc.plain_text();
    let word_count = text.split_whitespace().count();
    println!("\n{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40));
    println!("{}: {}", "Words".bold(), word_count);
    println!("{}: {}", "Characters".bold(), text.len());

    Ok(())
}

fn print_version() {
    println!("{} {}", "todocx".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown and PDF conversion to Word documents");
    println!();
    println!("Input formats: Markdown (.md, .markdown, .txt), PDF (.pdf)");
}

fn confirm(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
