/// Entry point: validate, confirm, burn, delete.

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    cursor, execute,
    style::{Color, Stylize},
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use bfl::config::BurnConfig;
use bfl::ui::clock::SystemClock;
use bfl::ui::terminal::CrosstermSurface;
use bfl::{BurnError, Outcome, Palette};

const ORANGE: Color = Color::AnsiValue(208);

#[derive(Debug, Parser)]
#[command(name = "bfl", version)]
#[command(
    about = "bfl (Binary Flame Launcher) 🔥: Let go of digital files by simulating burning them."
)]
#[command(after_help = "Inspired by the therapeutic practice of burning worries written on paper.")]
struct Cli {
    /// The path to the file you want to digitally incinerate.
    file_to_burn: PathBuf,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,

    /// Play the animation but keep the file.
    #[arg(short, long)]
    keep: bool,

    /// Read settings from this config.toml.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Answer {
    Yes,
    No,
    NoInput,
}

fn main() {
    let cli = Cli::parse();
    let config = BurnConfig::load(cli.config.as_deref());
    init_logging(&config);

    let code = match burn_file(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            println!("{}", format!("Error: {e:#}").red());
            1
        }
    };
    std::process::exit(code);
}

fn init_logging(config: &BurnConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    let file = config.log.file.as_ref().and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("Warning: could not open log file {}: {e}", path.display()))
            .ok()
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        None => builder.with_writer(io::stderr).init(),
    }
}

fn burn_file(cli: &Cli, config: &BurnConfig) -> Result<i32> {
    let path = cli.file_to_burn.as_path();
    check_target(path)?;
    let name = display_name(path);

    if !cli.yes {
        let stdin = io::stdin();
        match ask(&mut stdin.lock(), &mut io::stdout(), &name)? {
            Answer::Yes => {}
            Answer::No => {
                println!("Incineration cancelled.");
                return Ok(0);
            }
            Answer::NoInput => {
                println!("\nIncineration cancelled due to no input.");
                return Ok(0);
            }
        }
    }

    let palette = Palette::resolve(config.color_depth());
    debug!(depth = ?palette.depth(), "palette resolved");

    let result = incinerate(&name, &palette);
    restore_cursor();

    match result {
        Ok(Outcome::Completed) if cli.keep || config.keep_file => {
            info!(path = %path.display(), "kept after animation");
            println!(
                "\n{}",
                format!("File '{name}' was NOT deleted (kept on request).").with(ORANGE)
            );
            Ok(0)
        }
        Ok(Outcome::Completed) => match fs::remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "deleted");
                println!("\n{}", format!("'{name}' has been permanently deleted.").green());
                Ok(0)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "delete failed");
                println!(
                    "\n{}",
                    format!("Animation complete, but failed to delete file '{name}': {e}").red()
                );
                Ok(1)
            }
        },
        // Nothing was shown burning, so the file is kept.
        Ok(Outcome::TooSmall) => {
            not_deleted(&name);
            Ok(1)
        }
        Err(e) => {
            error!(error = %e, "animation failed");
            println!("\n{}", format!("A terminal error occurred during animation: {e}").red());
            println!("The terminal might be in an unusual state. Try running 'reset'.");
            not_deleted(&name);
            Ok(1)
        }
    }
}

/// Take over the screen, play the burn, give the screen back.
fn incinerate(name: &str, palette: &Palette) -> Result<Outcome, BurnError> {
    let mut term = CrosstermSurface::new();
    term.init().map_err(BurnError::Terminal)?;

    let outcome = bfl::run(&mut term, &mut SystemClock, palette, name);

    if let Err(e) = term.cleanup() {
        error!(error = %e, "terminal cleanup failed");
    }
    outcome
}

fn restore_cursor() {
    if let Err(e) = execute!(io::stdout(), cursor::Show) {
        debug!(error = %e, "could not re-show cursor");
    }
}

fn not_deleted(name: &str) {
    let msg = format!("Animation did not complete successfully. File '{name}' was NOT deleted.");
    println!("\n{}", msg.with(ORANGE));
}

fn check_target(path: &Path) -> Result<()> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            bail!("File '{}' not found.", path.display())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("could not inspect '{}'", path.display()))
        }
    };
    if !meta.is_file() {
        bail!("'{}' is not a file.", path.display());
    }
    Ok(())
}

/// Basename shown in the prompt and on the paper.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn ask(input: &mut impl BufRead, out: &mut impl Write, name: &str) -> Result<Answer> {
    writeln!(out, "You are about to digitally incinerate: {}", name.bold())?;
    write!(
        out,
        "Are you sure you want to proceed? ({}/{}): ",
        "yes".green(),
        "no".red()
    )?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).context("could not read confirmation")? == 0 {
        return Ok(Answer::NoInput);
    }
    Ok(match line.trim().to_lowercase().as_str() {
        "yes" | "y" => Answer::Yes,
        _ => Answer::No,
    })
}
