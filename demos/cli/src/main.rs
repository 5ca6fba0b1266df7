//! Loads an instance text file, solves it, and writes the resulting roster
//! plus a stats file.
//!
//! Usage: `nurseroster-cli <instance-file> [--config <path>] [--format tabbed|xml] [--out <path>] [--stats <path>]`

use std::path::PathBuf;
use std::process::ExitCode;

use nurseroster::SolverContext;
use nurseroster_config::SolverConfig;
use nurseroster_scoring::constraints::build_all;

struct Args {
    instance: PathBuf,
    config: Option<PathBuf>,
    format: Format,
    out: Option<PathBuf>,
    stats: Option<PathBuf>,
}

enum Format {
    Tabbed,
    Xml,
}

fn parse_args() -> Result<Args, String> {
    let mut argv = std::env::args().skip(1);
    let instance = argv.next().ok_or_else(|| "missing instance file argument".to_string())?;
    let mut args = Args {
        instance: PathBuf::from(instance),
        config: None,
        format: Format::Tabbed,
        out: None,
        stats: None,
    };

    while let Some(flag) = argv.next() {
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(argv.next().ok_or("--config needs a path")?)),
            "--format" => {
                args.format = match argv.next().as_deref() {
                    Some("tabbed") => Format::Tabbed,
                    Some("xml") => Format::Xml,
                    other => return Err(format!("unknown --format value: {other:?}")),
                }
            }
            "--out" => args.out = Some(PathBuf::from(argv.next().ok_or("--out needs a path")?)),
            "--stats" => args.stats = Some(PathBuf::from(argv.next().ok_or("--stats needs a path")?)),
            other => return Err(format!("unrecognized argument: {other}")),
        }
    }

    Ok(args)
}

fn run() -> Result<(), String> {
    let args = parse_args().map_err(|e| format!("{e}\nusage: nurseroster-cli <instance-file> [--config <path>] [--format tabbed|xml] [--out <path>] [--stats <path>]"))?;

    nurseroster_console::init();

    let text = std::fs::read_to_string(&args.instance).map_err(|e| format!("reading {}: {e}", args.instance.display()))?;
    let parsed = nurseroster_io::parse(&text).map_err(|e| format!("parsing {}: {e}", args.instance.display()))?;
    let built = parsed.build().map_err(|e| format!("building instance: {e}"))?;

    let config = match &args.config {
        Some(path) => SolverConfig::load(path).map_err(|e| format!("loading config {}: {e}", path.display()))?,
        None => SolverConfig::default(),
    };

    let constraints = build_all(built.shifts.as_slice(), built.employees.as_slice(), built.days.as_slice(), built.skills.as_slice());
    let state = nurseroster_core::State::new(built.size, &built.shifts, &built.employees, &built.days, &built.skills);

    let result = SolverContext::new(&constraints, config, state).run();

    tracing::info!(
        message = "New best solution",
        step = result.iterations as u64,
        score = format!("{}", result.final_score),
    );

    let rendered = match args.format {
        Format::Tabbed => nurseroster_io::serializer::to_tabbed(&result.state),
        Format::Xml => nurseroster_io::serializer::to_xml(&result.state),
    };

    match &args.out {
        Some(path) => std::fs::write(path, &rendered).map_err(|e| format!("writing {}: {e}", path.display()))?,
        None => println!("{rendered}"),
    }

    if let Some(path) = &args.stats {
        let stats = nurseroster_io::stats_file::render(&result.statistics);
        std::fs::write(path, stats).map_err(|e| format!("writing {}: {e}", path.display()))?;
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
