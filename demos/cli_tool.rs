//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool
//! using pcrchart for turning a results spreadsheet into bar charts.
//!
//! Set `RUST_LOG=debug` to see per-chart progress.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process;
use pcrchart::{
    bundle, read_table, write_charts, ChartError, ChartRendererBuilder, ClampPolicy,
    ReportBuilder, SheetSelector, TableExtractor, DEFAULT_OUTPUT_DIR,
};
use tracing_subscriber::EnvFilter;

struct Options {
    input_path: String,
    out_dir: Option<PathBuf>,
    zip_path: Option<PathBuf>,
    sheet_selector: SheetSelector,
    clamp_policy: ClampPolicy,
    any_columns: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <input.xlsx> [options]", args[0]);
        eprintln!("\nOptions:");
        eprintln!("  --out-dir <dir>      Write one PNG per row into <dir> (default: charts)");
        eprintln!("  --zip <file>         Bundle all charts into a ZIP archive");
        eprintln!("  --sheet-index <n>    Select sheet by index (0-based)");
        eprintln!("  --sheet-name <name>  Select sheet by name");
        eprintln!("  --unclamped          Draw values without clamping at 2.0");
        eprintln!("  --any-columns        Skip the required column check");
        eprintln!("\nExamples:");
        eprintln!("  {} results.xlsx", args[0]);
        eprintln!("  {} results.xlsx --zip charts.zip", args[0]);
        eprintln!("  {} results.xlsx --sheet-name \"Results\" --unclamped", args[0]);
        process::exit(1);
    }

    let options = parse_options(&args);

    match run(&options) {
        Ok(message) => println!("{}", message),
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn parse_options(args: &[String]) -> Options {
    let mut options = Options {
        input_path: args[1].clone(),
        out_dir: None,
        zip_path: None,
        sheet_selector: SheetSelector::First,
        clamp_policy: ClampPolicy::default(),
        any_columns: false,
    };

    let value_of = |i: usize, flag: &str| -> String {
        if i + 1 >= args.len() {
            eprintln!("Error: {} requires a value", flag);
            process::exit(1);
        }
        args[i + 1].clone()
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--out-dir" => {
                options.out_dir = Some(PathBuf::from(value_of(i, "--out-dir")));
                i += 2;
            }
            "--zip" => {
                options.zip_path = Some(PathBuf::from(value_of(i, "--zip")));
                i += 2;
            }
            "--sheet-index" => {
                let raw = value_of(i, "--sheet-index");
                let index = raw.parse::<usize>().unwrap_or_else(|_| {
                    eprintln!("Error: Invalid sheet index: {}", raw);
                    process::exit(1);
                });
                options.sheet_selector = SheetSelector::Index(index);
                i += 2;
            }
            "--sheet-name" => {
                options.sheet_selector = SheetSelector::Name(value_of(i, "--sheet-name"));
                i += 2;
            }
            "--unclamped" => {
                options.clamp_policy = ClampPolicy::Unclamped;
                i += 1;
            }
            "--any-columns" => {
                options.any_columns = true;
                i += 1;
            }
            _ => {
                eprintln!("Error: Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
    }

    options
}

fn run(options: &Options) -> Result<String, ChartError> {
    let out_dir = options
        .out_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    if options.any_columns {
        // 必須列の検証を行わず、表の見出しをそのままラベルに使う
        let table = read_table(File::open(&options.input_path)?, &options.sheet_selector)?;
        let records = TableExtractor::new().extract(&table)?;
        let renderer = ChartRendererBuilder::new()
            .with_clamp_policy(options.clamp_policy)
            .build()?;

        return match &options.zip_path {
            Some(zip_path) => {
                let archive = bundle(&records, &renderer)?;
                write_archive(zip_path, &archive, records.len())
            }
            None => {
                let paths = write_charts(&records, &renderer, &out_dir)?;
                Ok(format!("Wrote {} charts to {}", paths.len(), out_dir.display()))
            }
        };
    }

    let report = ReportBuilder::new()
        .with_sheet_selector(options.sheet_selector.clone())
        .with_clamp_policy(options.clamp_policy)
        .build()?;

    match &options.zip_path {
        Some(zip_path) => {
            let records = report.load_records(File::open(&options.input_path)?)?;
            let archive = bundle(&records, report.renderer())?;
            write_archive(zip_path, &archive, records.len())
        }
        None => {
            let paths = report.write_charts(File::open(&options.input_path)?, &out_dir)?;
            Ok(format!("Wrote {} charts to {}", paths.len(), out_dir.display()))
        }
    }
}

fn write_archive(zip_path: &Path, archive: &[u8], count: usize) -> Result<String, ChartError> {
    fs::write(zip_path, archive)?;
    Ok(format!("Bundled {} charts into {}", count, zip_path.display()))
}

fn handle_error(error: ChartError) {
    match &error {
        ChartError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        ChartError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid spreadsheet or may be corrupted.");
        }
        ChartError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check your sheet selection.");
        }
        ChartError::Render(msg) => {
            eprintln!("Render Error: {}", msg);
            eprintln!("Every metric cell must contain a number.");
        }
        e if e.is_table_error() => {
            eprintln!("{}", e.user_message());
            eprintln!("Details: {}", e);
        }
        e => {
            eprintln!("Error: {}", e);
        }
    }
}
