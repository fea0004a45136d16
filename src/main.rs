extern crate env_logger;
#[macro_use]
extern crate log;
use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod engine;
mod error;
mod filter;
mod output;
mod reader;
mod record;
mod report;
mod validate;

use cli::Cli;
use engine::Engine;
use output::{OutputPaths, Sink};
use reader::RecordReader;
use report::RunReport;

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("gcfilter v{}", cli::VERSION);

    // time everything!
    let now = std::time::Instant::now();

    let opts = cli.filter_opts_or_exit();
    let paths = OutputPaths::derive(Path::new(&cli.input), cli.output_base_name.as_deref());

    info!("{} will be filtered with parameters:", cli.input);
    info!("  --min-length = {}bp", opts.min_length);
    info!("  --gc-bounds = {}% - {}%", opts.gc.min(), opts.gc.max());
    info!("  --keep-filtered = {}", cli.keep_filtered);
    info!("  --on-truncated = {:?}", cli.on_truncated);

    let file = File::open(&cli.input).with_context(|| format!("Unable to open file {}", cli.input))?;
    let reader = RecordReader::new(BufReader::new(file), cli.input.clone(), cli.on_truncated);

    paths.ensure_distinct_from(Path::new(&cli.input), cli.keep_filtered)?;

    let mut passed = Sink::create(&paths.passed)?;
    info!("Reads that pass the filtration will be written to {}", paths.passed.display());

    // the failed file only exists when it was asked for
    let mut failed = if cli.keep_filtered {
        let sink = Sink::create(&paths.failed)?;
        info!("Reads that fail the filtration will be written to {}", paths.failed.display());
        Some(sink)
    } else {
        None
    };

    let mut engine = Engine::new(opts);
    let counts = engine
        .run(reader, &mut passed, failed.as_mut())
        .context("Filtration did not complete; output files may be incomplete")?;

    let elapsed = now.elapsed().as_secs_f64();
    info!(
        "Stats: {} of {} reads passed the filtration ({:.2}%), {:.1}s runtime",
        counts.records_passed,
        counts.records_seen,
        counts.pass_percentage(),
        elapsed,
    );

    if let Some(path) = &cli.report {
        let mut report = RunReport::new(&cli.input, engine.opts(), cli.on_truncated);
        report.passed_path = passed.path().to_string();
        report.failed_path = failed.as_ref().map(|f| f.path().to_string());
        report.elapsed = elapsed;
        report.set_counts(counts);
        report.write(path)?;
        info!("Wrote run report to {path}");
    }

    info!("Completed successfully.");
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
