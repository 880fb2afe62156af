//! Command-line driver (§6 "CLI (peripheral; exact surface not part of the
//! hard core)"): wires a JSON model, the stack-machine VM, a transition
//! system, and one of the four exploration algorithms together.

mod bytecode;
mod error;

use bytecode::{Program, StackVm};
use clap::{Parser, ValueEnum};
use error::CliError;
use std::path::PathBuf;
use zonecheck_core::algorithms::{couvreur_scc, cover_reach, nested_dfs, reach, Subsumption};
use zonecheck_core::dot::{format_state, Format as DotFormat, StateFlags};
use zonecheck_core::labels::LabelSet;
use zonecheck_core::model::System;
use zonecheck_core::ts::{Semantics, TransitionSystem};
use zonecheck_core::waiting::SearchOrder;
use zonecheck_core::zone::{ClockBounds, ExtrapolationPolicy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Reach,
    Cover,
    Ndfs,
    Couvreur,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SemanticsArg {
    Standard,
    Elapsed,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExtrapolationArg {
    Noextra,
    Extram,
    ExtramPlus,
    Extralu,
    ExtraluPlus,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CoveringArg {
    Inclusion,
    AluLocal,
    AluGlobal,
    AmLocal,
    AmGlobal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SearchOrderArg {
    Bfs,
    Dfs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Dot,
    Raw,
}

/// Explore the zone graph of a timed-automata model.
#[derive(Parser)]
#[command(name = "zonecheck")]
#[command(about = "Symbolic exploration of timed-automata zone graphs")]
struct Cli {
    /// Path to a JSON-encoded model (§6 "Model loader").
    model: PathBuf,

    /// Exploration algorithm.
    #[arg(long, value_enum, default_value = "reach")]
    algorithm: Algorithm,

    /// Delay semantics.
    #[arg(long, value_enum, default_value = "standard")]
    semantics: SemanticsArg,

    /// Extrapolation policy applied to every computed zone.
    #[arg(long, value_enum, default_value = "noextra")]
    extrapolation: ExtrapolationArg,

    /// Whether `extrapolation`'s bounds are read once globally or recomputed
    /// per visited location; only affects `cover`'s subsumption choice.
    #[arg(long, value_enum, default_value = "bfs")]
    order: SearchOrderArg,

    /// Covering policy (`cover` algorithm only).
    #[arg(long, value_enum, default_value = "inclusion")]
    covering: CoveringArg,

    /// Accepting label names; a state is accepting iff it carries any of them.
    #[arg(long = "label", value_name = "NAME")]
    labels: Vec<String>,

    /// Pool block size.
    #[arg(long, default_value_t = 1024)]
    block_size: usize,

    /// Hash-cons table initial capacity.
    #[arg(long, default_value_t = 1024)]
    table_size: usize,

    /// Output format for the explored state space.
    #[arg(long, value_enum, default_value = "raw")]
    format: OutputFormat,

    /// Print algorithm statistics to stderr.
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let model = load_model(&cli.model)?;
    let accepting = resolve_labels(&model, &cli.labels)?;

    let semantics = match cli.semantics {
        SemanticsArg::Standard => Semantics::Standard,
        SemanticsArg::Elapsed => Semantics::Elapsed,
    };
    let dim = model.num_clocks() + 1;
    let extrapolation = match cli.extrapolation {
        ExtrapolationArg::Noextra => ExtrapolationPolicy::None,
        ExtrapolationArg::Extram => ExtrapolationPolicy::ExtraM,
        ExtrapolationArg::ExtramPlus => ExtrapolationPolicy::ExtraMPlus,
        ExtrapolationArg::Extralu => ExtrapolationPolicy::ExtraLu,
        ExtrapolationArg::ExtraluPlus => ExtrapolationPolicy::ExtraLuPlus,
    };
    let bounds = ClockBounds::unbounded(dim);
    let order = match cli.order {
        SearchOrderArg::Bfs => SearchOrder::Bfs,
        SearchOrderArg::Dfs => SearchOrder::Dfs,
    };
    let covering = match cli.covering {
        CoveringArg::Inclusion => Subsumption::Inclusion,
        CoveringArg::AluLocal => Subsumption::AluLocal,
        CoveringArg::AluGlobal => Subsumption::AluGlobal,
        CoveringArg::AmLocal => Subsumption::AmLocal,
        CoveringArg::AmGlobal => Subsumption::AmGlobal,
    };

    let vm = StackVm;
    let mut ts: TransitionSystem<Program, StackVm> =
        TransitionSystem::new(&model, &vm, semantics, extrapolation, bounds.clone(), cli.block_size, cli.table_size);

    let dot_format = match cli.format {
        OutputFormat::Dot => DotFormat::Dot,
        OutputFormat::Raw => DotFormat::Raw,
    };

    for edge in ts.initial_edges() {
        let (status, state) = ts.initial(&edge);
        if let (zonecheck_core::error::StateStatus::Ok, Some(state)) = (status, state) {
            let line = format_state(
                dot_format,
                "initial",
                &model,
                &state,
                &StateFlags {
                    initial: true,
                    accepting: state.labels().intersects(&accepting),
                    color: None,
                },
            );
            println!("{line}");
        }
    }

    match cli.algorithm {
        Algorithm::Reach => {
            let stats = reach(&mut ts, &accepting, order);
            if cli.stats {
                eprintln!("visited={} reachable={}", stats.visited, stats.reachable);
            }
        }
        Algorithm::Cover => {
            let stats = cover_reach(&mut ts, &accepting, covering, &bounds, order);
            if cli.stats {
                eprintln!(
                    "visited={} stored={} covered={} reachable={}",
                    stats.visited, stats.stored, stats.covered, stats.reachable
                );
            }
        }
        Algorithm::Ndfs => {
            let stats = nested_dfs(&mut ts, &accepting);
            if cli.stats {
                eprintln!("visited={} cycle={}", stats.visited, stats.cycle);
            }
        }
        Algorithm::Couvreur => {
            let stats = couvreur_scc(&mut ts, &accepting);
            if cli.stats {
                eprintln!("visited={} stored={} cycle={}", stats.visited, stats.stored, stats.cycle);
            }
        }
    }

    Ok(())
}

fn load_model(path: &PathBuf) -> Result<System<Program>, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ModelRead {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ModelParse {
        path: path.clone(),
        source,
    })
}

fn resolve_labels(model: &System<Program>, names: &[String]) -> Result<LabelSet, CliError> {
    let mut set = LabelSet::empty(model.label_names().len());
    for name in names {
        let idx = model
            .label_names()
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| CliError::UnknownLabel(name.clone()))?;
        set.insert(idx);
    }
    Ok(set)
}
