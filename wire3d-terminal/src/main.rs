//! wire3d - spin a wireframe shape in the terminal
//!
//! Usage: wire3d [-f shape.csv]
//! Press q to quit.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use wire3d_core::load_shape;
use wire3d_terminal::{logging, TerminalApp};

use cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(err) = logging::init_file_logging(path) {
            eprintln!("wire3d: cannot open log file {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }

    let shape = match load_shape(&args.file) {
        Ok(shape) => shape,
        Err(err) => {
            error!(%err, "shape load failed");
            eprintln!("wire3d: {err}");
            eprintln!("{}", cli::usage());
            return ExitCode::FAILURE;
        }
    };
    info!(
        file = %args.file.display(),
        points = shape.point_count(),
        edges = shape.edge_count(),
        "shape loaded"
    );

    let result = TerminalApp::new(shape, args.label(), args.render_config()).and_then(|mut app| app.run());
    if let Err(err) = result {
        error!(%err, "terminal failure");
        eprintln!("wire3d: terminal error: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
