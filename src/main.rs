//! montage - a terminal source-code viewer with lightweight syntax colouring

mod config;
mod display;
mod error;
mod input;
mod logging;
mod source;
mod syntax;
mod terminal;
mod viewer;
mod viewport;

use std::env;
use std::path::PathBuf;
use std::process;

use config::Config;
use error::{Result, ViewerError};
use source::SourceFile;
use terminal::Terminal;
use viewer::Viewer;

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut show_line_numbers = None;
    let mut file: Option<PathBuf> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            "--no-line-numbers" | "-n" => show_line_numbers = Some(false),
            opt if opt.starts_with('-') => {
                return Err(ViewerError::Usage(format!(
                    "unknown option '{}' (try --help)",
                    opt
                )));
            }
            path => {
                if file.is_some() {
                    return Err(ViewerError::Usage(
                        "only one file can be viewed at a time".to_string(),
                    ));
                }
                file = Some(PathBuf::from(path));
            }
        }
    }

    let path = match file {
        Some(path) => path,
        None => {
            print_usage();
            return Err(ViewerError::Usage("no file given".to_string()));
        }
    };

    let mut config = Config::load()?;
    if let Some(show) = show_line_numbers {
        config.show_line_numbers = show;
    }

    // Read and highlight before touching the terminal so errors print cleanly
    let source = SourceFile::load(&path, &config)?;

    let terminal = Terminal::new()?;
    let mut viewer = Viewer::new(terminal, source, &config);
    viewer.run()?;

    Ok(())
}

fn print_usage() {
    println!("montage {} - source code viewer", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: montage [OPTIONS] <FILE>");
    println!();
    println!("Options:");
    println!("  -n, --no-line-numbers  Hide line numbers");
    println!("  -h, --help             Show this help message");
    println!("  -V, --version          Show version information");
    println!();
    println!("Keys:");
    println!("  j, Down, Enter         Scroll down one line");
    println!("  k, Up                  Scroll up one line");
    println!("  Space, PageDown        Scroll down one page");
    println!("  b, PageUp              Scroll up one page");
    println!("  g, Home                Go to top");
    println!("  G, End                 Go to bottom");
    println!("  Mouse wheel            Smooth scroll");
    println!("  q, Esc, C-c            Quit");
    println!();
    println!("Settings are read from ~/.montage.toml");
}

fn print_version() {
    println!("montage {}", env!("CARGO_PKG_VERSION"));
}
