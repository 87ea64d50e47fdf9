//! Command-line front end for the timeline adjustment engine

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use infraplan_engine::harness::{run_simulator, SimulatorConfig};
use infraplan_engine::{addition_patch, removal_patch, retype_patch, shift_patch};
use infraplan_model::row::build_row;
use infraplan_model::{GrowDirection, Phase, ProjectSnapshot};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Command::new("infraplan")
        .version("0.1.0")
        .about("Timeline adjustment engine for municipal infrastructure programming")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("apply")
                .about("Compute the patch for a single timeline edit")
                .arg(
                    Arg::new("project")
                        .long("project")
                        .required(true)
                        .help("Path to a project snapshot JSON file"),
                )
                .arg(
                    Arg::new("edit")
                        .long("edit")
                        .required(true)
                        .value_parser(["remove", "add", "retype", "shift"])
                        .help("Edit family to apply"),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .required(true)
                        .value_parser(value_parser!(i32))
                        .help("Calendar year of the edited cell"),
                )
                .arg(
                    Arg::new("direction")
                        .long("direction")
                        .value_parser(["left", "right"])
                        .help("Grow or shift direction"),
                )
                .arg(
                    Arg::new("side")
                        .long("side")
                        .value_parser(["planning", "construction"])
                        .help("Phase side for retype edits"),
                ),
        )
        .subcommand(
            Command::new("simulate")
                .about("Run the edit-sequence simulator")
                .arg(
                    Arg::new("edits")
                        .long("edits")
                        .default_value("1000")
                        .value_parser(value_parser!(u64))
                        .help("Number of edit operations to simulate"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("stop-on-violation")
                        .long("stop-on-violation")
                        .action(ArgAction::SetTrue)
                        .help("Stop simulation on first violation"),
                ),
        )
        .get_matches();

    match cli.subcommand() {
        Some(("apply", matches)) => {
            let path: &String = matches.get_one("project").context("--project is required")?;
            let edit: &String = matches.get_one("edit").context("--edit is required")?;
            let year = *matches
                .get_one::<i32>("year")
                .context("--year is required")?;

            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading project snapshot {path}"))?;
            let snapshot: ProjectSnapshot =
                serde_json::from_str(&raw).context("parsing project snapshot")?;
            let row = build_row(&snapshot).context("building timeline row")?;
            let index = row
                .index_of_year(year)
                .with_context(|| format!("year {year} is not on the timeline"))?;

            let patch = match edit.as_str() {
                "remove" => removal_patch(&row, index),
                "add" => addition_patch(&row, index, direction_arg(matches)?),
                "retype" => retype_patch(&row, index, side_arg(matches)?),
                "shift" => shift_patch(&row, index, direction_arg(matches)?, &snapshot.finances),
                other => bail!("unknown edit family '{other}'"),
            };

            println!("{}", serde_json::to_string_pretty(&patch)?);
            Ok(())
        }
        Some(("simulate", matches)) => {
            let config = SimulatorConfig {
                seed: *matches.get_one::<u64>("seed").unwrap_or(&42),
                total_edits: *matches.get_one::<u64>("edits").unwrap_or(&1000),
                stop_on_first_violation: matches.get_flag("stop-on-violation"),
            };
            let report = run_simulator(config);
            println!("{}", report.generate_text());
            if !report.passed() {
                bail!("simulation found {} violation(s)", report.violations.len());
            }
            Ok(())
        }
        _ => bail!("unknown subcommand"),
    }
}

fn direction_arg(matches: &clap::ArgMatches) -> anyhow::Result<GrowDirection> {
    match matches.get_one::<String>("direction").map(String::as_str) {
        Some("left") => Ok(GrowDirection::Left),
        Some("right") => Ok(GrowDirection::Right),
        _ => bail!("--direction left|right is required for this edit"),
    }
}

fn side_arg(matches: &clap::ArgMatches) -> anyhow::Result<Phase> {
    match matches.get_one::<String>("side").map(String::as_str) {
        Some("planning") => Ok(Phase::Planning),
        Some("construction") => Ok(Phase::Construction),
        _ => bail!("--side planning|construction is required for retype edits"),
    }
}
