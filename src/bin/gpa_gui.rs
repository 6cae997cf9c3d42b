use clap::Parser;
use eframe::egui;
use gpa_calculator::gui::{GpaApp, install_cjk_font};
use gpa_calculator::logging;
use gpa_calculator::report::Locale;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about = "Desktop GPA calculator.")]
struct Args {
    /// Language of the interface (zh or en).
    #[arg(long, default_value = "zh")]
    lang: Locale,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> eframe::Result {
    let args = Args::parse();
    if let Err(error) = logging::init_logging(args.verbose) {
        eprintln!("{error}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_resizable(true),
        ..Default::default()
    };

    let locale = args.lang;
    eframe::run_native(
        "GPA Calculator",
        options,
        Box::new(move |cc| {
            match install_cjk_font(&cc.egui_ctx) {
                Some(path) => info!(font = path, "installed CJK font"),
                None => warn!("no CJK font found; Chinese text may not render"),
            }
            Ok(Box::new(GpaApp::new(locale)))
        }),
    )
}
