use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use u_cpusched::config::SimulationConfig;
use u_cpusched::input::{MenuChoice, TokenReader};
use u_cpusched::models::{Algorithm, ProcessSet};
use u_cpusched::report;
use u_cpusched::scheduler::{RunOutcome, Simulator};
use u_cpusched::trace::{Filtered, LogSink, Tee, TraceEvent};
use u_cpusched::workload::uniform_workload;
use u_cpusched::SimulationError;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    random: Option<(usize, u64)>,
    verbose: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--random" => {
                let n = iter.next().context("--random needs a count")?;
                let seed = iter.next().context("--random needs a seed")?;
                args.random = Some((
                    n.parse().context("invalid process count")?,
                    seed.parse().context("invalid seed")?,
                ));
            }
            "--verbose" | "-v" => args.verbose = true,
            other => bail!("unknown argument '{other}'"),
        }
    }
    Ok(args)
}

fn prompt(text: &str) -> anyhow::Result<()> {
    print!("{text}");
    io::stdout().flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = parse_args()?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config.json"));
    let mut config = SimulationConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    config.verbose |= args.verbose;
    info!(?config, "configuration loaded");

    let stdin = io::stdin();
    let mut reader = TokenReader::new(stdin.lock());

    let input: ProcessSet = match args.random {
        Some((n, seed)) => uniform_workload(n, (n as u64).max(1) * 2, 8, seed),
        None => {
            prompt("Number of processes, then arrival and service time of each:\n")?;
            reader.read_process_list()?
        }
    };
    println!("\n{}", report::base_table(&input));

    let mut sim = Simulator::new(input, config);

    loop {
        prompt("\n0 - print averages and exit  1 - HRRN  2 - RR\nChoice: ")?;
        let choice = match reader.read_choice() {
            Ok(choice) => choice,
            Err(e) => {
                error!(error = %e, "invalid choice");
                continue;
            }
        };

        let algorithm = match choice {
            MenuChoice::Quit => break,
            MenuChoice::Run(algorithm) => algorithm,
        };

        let quantum = match algorithm {
            Algorithm::Hrrn => None,
            Algorithm::Rr => {
                prompt("TimeSlice = ")?;
                match reader.read_quantum() {
                    Ok(quantum) => Some(quantum),
                    Err(SimulationError::UnexpectedEof(_)) => break,
                    Err(e) => {
                        error!(error = %e, %algorithm, "run refused");
                        continue;
                    }
                }
            }
        };

        // Only what gets printed is buffered.
        let verbose = sim.config().verbose;
        let mut events: Vec<TraceEvent> = Vec::new();
        let mut printed = Filtered {
            inner: &mut events,
            keep: |e: &TraceEvent| match e {
                TraceEvent::Window(_) => true,
                TraceEvent::Tick(_) => verbose,
                _ => false,
            },
        };
        let mut log = LogSink;
        let mut sink = Tee {
            first: &mut printed,
            second: &mut log,
        };

        let result = match quantum {
            None => sim.run_hrrn(&mut sink),
            Some(quantum) => sim.run_rr(quantum, &mut sink),
        };

        match result {
            Ok(outcome) => print_outcome(&outcome, &events, verbose),
            Err(e) => error!(error = %e, %algorithm, "run refused"),
        }
    }

    println!("\n{}", report::averages_table(sim.metrics()));
    Ok(())
}

fn print_outcome(outcome: &RunOutcome, events: &[TraceEvent], verbose: bool) {
    match outcome.algorithm {
        Algorithm::Hrrn => {
            let windows: Vec<_> = events
                .iter()
                .filter_map(|e| match e {
                    TraceEvent::Window(w) => Some(w.clone()),
                    _ => None,
                })
                .collect();
            println!("\n{}", report::window_table(&windows));
        }
        Algorithm::Rr if verbose => {
            for event in events {
                if let TraceEvent::Tick(snapshot) = event {
                    println!("\n{}", report::tick_table(snapshot));
                }
            }
        }
        Algorithm::Rr => {}
    }
    println!("\n{}", report::outcome_report(outcome));
}
