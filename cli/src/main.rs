//! docxtract CLI - DOCX text and image extraction tool
//!
//! A command-line tool for extracting plain text and embedded images from
//! Word documents.

use clap::{Parser, ValueEnum};
use colored::*;
use docxtract::DocxExtractor;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Separator between pages in split-pages text output.
const PAGE_SEPARATOR: &str = "\n\u{000C}\n";

/// Extract plain text and images from DOCX files
#[derive(Parser)]
#[command(
    name = "docxtract",
    version,
    about = "Extract text and images from DOCX files",
    long_about = "docxtract - DOCX text and image extraction.\n\n\
                  Flattens header, body, and footer parts to plain text and\n\
                  optionally copies embedded images into a directory."
)]
struct Cli {
    /// Path of the docx file
    docx: PathBuf,

    /// Split text on page breaks
    #[arg(short, long)]
    split_pages: bool,

    /// Path of directory to extract images (created if missing)
    #[arg(short, long)]
    img_dir: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

/// Text output format
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Plain text; split pages are joined with a form-feed line
    Text,
    /// JSON string, or a JSON array of strings with --split-pages
    Json,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = validate(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Check the argument surface before the extraction core runs.
///
/// Returns the failure as a value; the caller decides to terminate.
fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.docx.exists() {
        return Err(format!("file {} does not exist", cli.docx.display()).into());
    }

    if let Some(ref dir) = cli.img_dir {
        fs::create_dir_all(dir)
            .map_err(|e| format!("unable to create img_dir {}: {}", dir.display(), e))?;
    }

    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Extracting text...");

    let extractor = DocxExtractor::open(&cli.docx)?;

    let rendered = if cli.split_pages {
        let pages = extractor.extract_pages()?;
        match cli.format {
            OutputFormat::Text => pages.join(PAGE_SEPARATOR),
            OutputFormat::Json => serde_json::to_string_pretty(&pages)?,
        }
    } else {
        let text = extractor.extract_text()?;
        match cli.format {
            OutputFormat::Text => text,
            OutputFormat::Json => serde_json::to_string_pretty(&text)?,
        }
    };

    let image_count = match cli.img_dir {
        Some(ref dir) => {
            pb.set_message("Extracting images...");
            Some((extractor.extract_images(dir)?.len(), dir))
        }
        None => None,
    };

    pb.finish_and_clear();
    write_output(cli.output.as_ref(), &rendered)?;

    if let Some(ref path) = cli.output {
        println!(
            "{} Extracted text to {}",
            "✓".green().bold(),
            path.display()
        );
    }

    match image_count {
        Some((0, _)) => {
            println!("{} No images found in document", "!".yellow().bold());
        }
        Some((count, dir)) => {
            println!(
                "{} Extracted {} images to {}",
                "✓".green().bold(),
                count,
                dir.display()
            );
        }
        None => {}
    }

    Ok(())
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

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["docxtract", "report.docx", "-s", "-i", "imgs"]);
        assert!(cli.split_pages);
        assert_eq!(cli.img_dir, Some(PathBuf::from("imgs")));
        assert_eq!(cli.docx, PathBuf::from("report.docx"));
    }
}
