use anyhow::{bail, ensure, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    env, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use usfmp::{
    renderer::{render, OutputFormat},
    usfm::{Document, ParseOptions, Parser},
    utility::input::{find_usfm_files, read_usfm_file},
};

const USAGE: &str = "Usage: usfmp [options] <input-file-or-directory>";

struct Args {
    input_path: String,
    output_path: Option<String>,
    format: OutputFormat,
    verbose: bool,
    quiet: bool,
    options: ParseOptions,
}

enum Command {
    Run(Args),
    Help(String),
    Version,
}

fn get_args() -> Result<Command> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut opts = getopts::Options::new();
    opts.optopt("f", "format", "Output format: json, txt, tsv", "FORMAT");
    opts.optopt("o", "output", "Output file (default: stdout)", "FILE");
    opts.optflag("v", "verbose", "Verbose output");
    opts.optflag("q", "quiet", "Quiet mode - minimal output");
    opts.optflag("", "strict", "Strict mode - fail on unknown markers");
    opts.optflag("", "no-footnotes", "Keep footnote markup in verse text");
    opts.optflag("", "no-references", "Ignore \\r cross-references");
    opts.optflag("h", "help", "Print this help");
    opts.optflag("V", "version", "Print version");

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    if matches.opt_present("help") {
        return Ok(Command::Help(opts.usage(USAGE)));
    }
    if matches.opt_present("version") {
        return Ok(Command::Version);
    }

    ensure!(
        matches.free.len() == 1,
        "exactly one input file or directory is required\n{}",
        opts.short_usage("usfmp")
    );
    let input_path = matches.free[0].clone();

    let verbose = matches.opt_present("verbose");
    let quiet = matches.opt_present("quiet");
    ensure!(
        !(verbose && quiet),
        "cannot use both --quiet and --verbose flags"
    );

    let format = match matches.opt_str("format") {
        Some(format) => format.parse()?,
        None => OutputFormat::Json,
    };

    let options = ParseOptions {
        strict_mode: matches.opt_present("strict"),
        include_footnotes: !matches.opt_present("no-footnotes"),
        include_references: !matches.opt_present("no-references"),
    };

    Ok(Command::Run(Args {
        input_path,
        output_path: matches.opt_str("output"),
        format,
        verbose,
        quiet,
        options,
    }))
}

enum Output {
    Stdout,
    File { path: PathBuf },
}

impl Output {
    fn write(&self, rendered: &str) -> Result<()> {
        match self {
            Output::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
            Output::File { path } => {
                fs::write(path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Output written to: {}", path.display());
            }
        }

        Ok(())
    }
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = match get_args()? {
        Command::Run(args) => args,
        Command::Help(usage) => {
            print!("{}", usage);
            return Ok(());
        }
        Command::Version => {
            println!("usfmp {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };

    init_logging(&args);

    let input_path = PathBuf::from(&args.input_path);
    ensure!(
        input_path.exists(),
        "cannot access input path: {}",
        input_path.display()
    );

    let files = if input_path.is_dir() {
        let files = find_usfm_files(&input_path).context("error finding USFM files")?;
        ensure!(
            !files.is_empty(),
            "no USFM files found in directory: {}",
            input_path.display()
        );
        info!("Found {} USFM files", files.len());
        files
    } else {
        vec![input_path]
    };

    let parser = Parser::new(args.options);

    let pb = if 1 < files.len() && !args.quiet {
        create_progress_bar(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    let documents = parse_files(&parser, &files, &pb)?;

    let rendered = render(args.format, &documents)
        .with_context(|| format!("error formatting output as {}", args.format))?;

    let out = match &args.output_path {
        Some(path) => Output::File {
            path: PathBuf::from(path),
        },
        None => Output::Stdout,
    };
    out.write(&rendered)?;

    Ok(())
}

// Log lines are printed while the bar is suspended so they don't tear it
fn parse_files(parser: &Parser, files: &[PathBuf], pb: &ProgressBar) -> Result<Vec<Document>> {
    let mut documents = Vec::with_capacity(files.len());
    for file in files {
        documents.push(pb.suspend(|| parse_file(parser, file))?);
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(documents)
}

fn parse_file(parser: &Parser, path: &Path) -> Result<Document> {
    info!("Parsing file: {}", path.display());

    let txt = read_usfm_file(path)?;
    let document = parser
        .parse_str(&txt, &path.to_string_lossy())
        .with_context(|| format!("error parsing file {}", path.display()))?;

    info!("Successfully parsed {} - {}", document.id, document.main_title);

    Ok(document)
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{percent:>3}% [{wide_bar:.cyan/blue}] {pos}/{len} [{elapsed_precise} < {eta_precise}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#-"),
    );
    pb
}
