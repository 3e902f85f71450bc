mod app;

use app::ViewerApp;
use clap::Parser;
use std::path::PathBuf;

/// A tabbed text file viewer with a word index sidebar and search.
#[derive(Parser, Debug)]
#[command(name = "tabbed-text-viewer", version, about)]
struct Cli {
    /// Text files to open, one tab per file.
    files: Vec<PathBuf>,
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_title("Tabbed Text Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "Tabbed Text Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, cli.files)))),
    )
}
