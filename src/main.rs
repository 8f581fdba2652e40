use clap::Parser;
use quizcards::{PipelineBuilder, PipelineError, PrintMode, rows_from_json};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Render quiz rows into a duplex-ready card PDF.
#[derive(Parser, Debug)]
#[command(name = "quizcards", version, about)]
struct Args {
    /// JSON array of {level, subject, question, answer} objects.
    rows: PathBuf,

    /// Where to write the PDF.
    #[arg(short, long, default_value = "cards.pdf")]
    output: PathBuf,

    /// duplex_long, duplex_short or single.
    #[arg(short, long, default_value_t = PrintMode::DuplexLongEdge)]
    mode: PrintMode,

    /// Layout overrides as JSON.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// TrueType font embedded in the PDF and used to measure text.
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Document title stored in the PDF metadata.
    #[arg(long)]
    title: Option<String>,
}

fn run(args: Args) -> Result<(), PipelineError> {
    let source = fs::read_to_string(&args.rows).map_err(|e| {
        PipelineError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read rows from '{}': {}", args.rows.display(), e),
        ))
    })?;
    let rows = rows_from_json(&source)?;
    log::info!("Loaded {} row(s) from {}", rows.len(), args.rows.display());

    let mut builder = PipelineBuilder::new().with_print_mode(args.mode);
    if let Some(config) = &args.config {
        builder = builder.with_config_file(config)?;
    }
    if let Some(font) = &args.font {
        builder = builder.with_font_file(font);
    }
    if let Some(title) = args.title {
        builder = builder.with_title(title);
    }
    let pipeline = builder.build()?;

    let groups = quizcards::group_by_level(rows);
    pipeline.generate_to_file(&groups, &args.output)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_content_error() { ExitCode::from(2) } else { ExitCode::FAILURE }
        }
    }
}
