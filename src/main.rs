use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gpa_calculator::report::{self, Locale};
use gpa_calculator::validate::{GradeBand, ValidationOptions, ValidationPolicy};
use gpa_calculator::{GpaError, Result, logging, pipeline};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init_logging(cli.verbose) {
        eprintln!("{}", report::render_error(&error, cli.lang));
    }

    if let Err(error) = run(&cli) {
        eprintln!("{}", report::render_error(&error, cli.lang));
        match cli.format {
            OutputFormat::Text => println!("GPA: {:.4}", 0.0),
            OutputFormat::Json => println!("{}", report::render_failure_json(&error)),
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.validation_options()?;
    let report = pipeline::compute_from_path(&cli.file_path, &options)?;

    let labels = cli.lang.labels();
    for line in report::render_warnings(&report.warnings, cli.lang) {
        eprintln!("{}: {line}", labels.warning);
    }

    match cli.format {
        OutputFormat::Text => print!("{}", report::render_console(&report, cli.lang)),
        OutputFormat::Json => println!("{}", report::render_json(&report)?),
    }

    if let Some(output) = &cli.output {
        pipeline::save_summary(output, &report, cli.lang)?;
        eprintln!("{}: {}", labels.saved_to, output.display());
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Compute a credit-weighted GPA from an .xlsx grade sheet."
)]
struct Cli {
    /// Path of the .xlsx workbook; the first sheet is read.
    #[arg(value_name = "FILE_PATH")]
    file_path: PathBuf,

    /// Also write a plain-text summary to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How rows with non-positive credit are handled.
    #[arg(long, value_enum, default_value_t = PolicyArg::Strict)]
    policy: PolicyArg,

    /// Result format printed on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Language of labels and messages (zh or en).
    #[arg(long, default_value = "zh")]
    lang: Locale,

    /// Upper bound of the usual grade-point scale; larger values are reported.
    #[arg(long, default_value_t = 5.0)]
    max_grade: f64,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides it.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn validation_options(&self) -> Result<ValidationOptions> {
        let band = GradeBand {
            max: self.max_grade,
            ..GradeBand::default()
        };
        if !band.max.is_finite() || band.max < band.min {
            return Err(GpaError::InvalidData(format!(
                "--max-grade must be at least {}",
                band.min
            )));
        }
        Ok(ValidationOptions {
            policy: self.policy.into(),
            grade_band: band,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Strict,
    Lenient,
}

impl From<PolicyArg> for ValidationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => ValidationPolicy::Strict,
            PolicyArg::Lenient => ValidationPolicy::Lenient,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}
