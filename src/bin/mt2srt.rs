use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subalign::reader;
use subalign::timing::interpolate;
use subalign::{project, write_srt, AlignError, ProjectorOptions, SubtitleDoc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TemplateFormat {
    Srt,
    Xml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Srt,
}

#[derive(Debug, Parser)]
#[command(name = "mt2srt")]
#[command(about = "Project a subtitle template's timing onto a translation text")]
struct Args {
    /// Template format.
    #[arg(short = 'i', long = "input-format", value_enum, default_value_t = TemplateFormat::Srt)]
    input_format: TemplateFormat,
    /// Output format.
    #[arg(short = 'o', long = "output-format", value_enum, default_value_t = OutputFormat::Srt)]
    output_format: OutputFormat,
    /// Penalty for merged target spans within the hard line limit.
    #[arg(short = 'l', long = "length-penalty")]
    length_penalty: Option<f64>,
    /// Penalty at fragment boundaries without sentence termination.
    #[arg(short = 's', long = "not-eos-penalty")]
    not_eos_penalty: Option<f64>,
    /// Time-stamped template file; the translation is read from stdin.
    template: PathBuf,
}

fn main() {
    let args = Args::parse();
    init_tracing();
    if let Err(err) = run(&args) {
        tracing::error!(error = %err, "projection failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), AlignError> {
    let mut translation = String::new();
    std::io::stdin()
        .read_to_string(&mut translation)
        .map_err(|err| AlignError::Io {
            context: "reading translation from stdin".to_string(),
            source: err,
        })?;

    let mut template: SubtitleDoc = match args.input_format {
        TemplateFormat::Srt => reader::srt::read_file(&args.template)?,
        TemplateFormat::Xml => reader::xml::read_file(&args.template)?,
    };
    interpolate(&mut template, 1.0, 0.0);
    template.sort_frames();

    let defaults = ProjectorOptions::default();
    let opts = ProjectorOptions {
        length_limit_penalty: args.length_penalty.unwrap_or(defaults.length_limit_penalty),
        not_eos_penalty: args.not_eos_penalty.unwrap_or(defaults.not_eos_penalty),
        ..defaults
    };

    let blocks = project(&template, &translation, &opts);
    match args.output_format {
        OutputFormat::Srt => {
            let mut stdout = std::io::stdout().lock();
            write_srt(&mut stdout, &blocks)
        }
    }
}
