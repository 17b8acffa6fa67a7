use std::path::Path;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use genparams::{GenParamsError, MetadataProbe, NodeGraph, Theme, WorkflowSummary, render};

const BANNER_WIDTH: usize = 58;

const CLI_AFTER_HELP: &str = "Examples:\n  genparams clip.mp4\n  genparams --no-color clip.mp4\n  genparams completions zsh > _genparams";

#[derive(Debug, Parser)]
#[command(
    name = "genparams",
    version,
    about = "Show the prompts, LoRAs, and models behind an AI-generated video",
    after_help = CLI_AFTER_HELP,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Video file to inspect.
    input: Option<String>,

    /// Disable ANSI colour output.
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "genparams", &mut std::io::stdout());
        return Ok(());
    }

    let Some(input) = cli.input else {
        Cli::command().print_help()?;
        std::process::exit(1);
    };

    print_banner(&input);

    let raw = match MetadataProbe::fetch(&input)? {
        Some(raw) => raw,
        None => {
            println!("{}", "[!] No generation metadata found in file.".red().bold());
            println!(" Make sure 'save_metadata' was enabled in ComfyUI.");
            std::process::exit(1);
        }
    };

    match NodeGraph::decode(&raw.text) {
        Ok(graph) => {
            let summary = WorkflowSummary::classify(&graph);
            print!("{}", render(&summary, &Theme::default()));
        }
        // Malformed metadata is a soft failure: the diagnostic is printed
        // and the process still exits zero.
        Err(GenParamsError::Decode { reason, preview }) => {
            println!("{} {reason}", "[!] Metadata decode error:".red().bold());
            println!("\nRaw data preview for debugging:\n{preview}...");
        }
        Err(other) => return Err(other.into()),
    }

    println!("{}", "=".repeat(BANNER_WIDTH));
    Ok(())
}

fn print_banner(input: &str) {
    println!("{}", "=".repeat(BANNER_WIDTH));
    println!(" {}", "COMFYUI VIDEO METADATA ANALYSIS".blue().bold());
    println!(" {} {}", "File:".yellow(), display_name(input));
    println!("{}", "=".repeat(BANNER_WIDTH));
}

/// File name shown in the banner; falls back to the full argument when the
/// path has no final component.
fn display_name(input: &str) -> String {
    Path::new(input)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, display_name};

    #[test]
    fn display_name_strips_directories() {
        assert_eq!(display_name("renders/clip.mp4"), "clip.mp4");
        assert_eq!(display_name("clip.mp4"), "clip.mp4");
    }

    #[test]
    fn display_name_keeps_odd_paths() {
        assert_eq!(display_name(".."), "..");
    }

    #[test]
    fn cli_accepts_input_and_flags() {
        let cli = Cli::try_parse_from(["genparams", "--no-color", "clip.mp4"]).unwrap();
        assert!(cli.no_color);
        assert_eq!(cli.input.as_deref(), Some("clip.mp4"));
    }

    #[test]
    fn cli_parses_without_input() {
        let cli = Cli::try_parse_from(["genparams"]).unwrap();
        assert!(cli.input.is_none());
        assert!(cli.command.is_none());
    }
}
