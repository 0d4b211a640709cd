use clap::Parser;
use derive_more::{Display, Error, From};
use dialoguer::Input;
use human_panic::setup_panic;
use std::{
    env, fs,
    io::{self, stdin, stdout, IsTerminal},
    process::ExitCode,
};
use tracing_subscriber::{fmt, EnvFilter};

use civ4_studio_lib::wb_save::{
    self,
    wb_file::{open_scenario, save_scenario, WbFileError},
    Scenario,
};

/// A submodule handling the command line arguments and the interactive prompts.
mod args;
use args::Args;

/// Everything that can stop the program.
#[derive(Debug, From, Display, Error)]
enum StudioError {
    ScenarioError(WbFileError),
    IoError(io::Error),
    PromptError(dialoguer::Error),
    DumpError(serde_json::Error),
    /// The regenerated scenario does not parse back into the same tree.
    #[display("the scenario does not survive being regenerated")]
    RoundTripMismatch,
}

/// Parses the regenerated text of the scenario and compares the result.
fn check_round_trip(scenario: &Scenario) -> Result<(), StudioError> {
    let bytes = wb_save::serialize(scenario);
    let reparsed = wb_save::parse(bytes.as_slice()).map_err(WbFileError::from)?;
    if &reparsed == scenario && wb_save::serialize(&reparsed) == bytes {
        Ok(())
    } else {
        Err(StudioError::RoundTripMismatch)
    }
}

fn run(args: &Args) -> Result<(), StudioError> {
    println!("Reading {}...", args.filename.display());
    let scenario = open_scenario(&args.filename)?;
    let summary = scenario.summary();
    println!(
        "Version {}: {} teams, {} players ({} placeholders), {} plots, {} units, {} cities",
        scenario.version,
        summary.teams,
        summary.players,
        summary.placeholder_players,
        summary.plots,
        summary.units,
        summary.cities
    );
    if args.check {
        check_round_trip(&scenario)?;
        println!("Round trip check passed");
    }
    if let Some(output) = &args.output {
        save_scenario(output, &scenario)?;
        println!("Scenario written to {}", output.display());
    }
    if let Some(dump) = &args.dump {
        let json = serde_json::to_string_pretty(&scenario)?;
        fs::write(dump, json)?;
        println!("Scenario dumped to {}", dump.display());
    }
    Ok(())
}

/// Main function. This is the entry point of the program.
///
/// # Process
///
/// 1. Reads the arguments, prompting the user for them if none were given
/// 2. Parses the scenario file and prints what it contains
/// 3. Optionally verifies the round trip, regenerates the file and dumps the
///    tree to json
fn main() -> ExitCode {
    setup_panic!();
    if cfg!(debug_assertions) {
        env::set_var("RUST_BACKTRACE", "1");
    }
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();
    let interactive = stdin().is_terminal() && stdout().is_terminal();
    let args = if env::args().len() < 2 && interactive {
        match Args::get_from_user() {
            Ok(args) => args,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        Args::parse()
    };
    let code = match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    };
    if interactive && !args.no_interaction {
        let _ = Input::<String>::new()
            .with_prompt("Press enter to exit")
            .allow_empty(true)
            .interact();
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_round_trip() {
        let mut scenario = Scenario::default();
        scenario.game.era = "ERA_ANCIENT".into();
        assert!(check_round_trip(&scenario).is_ok());
    }

    #[test]
    fn test_run_writes_output() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("in.CivBeyondSwordWBSave");
        let output = dir.path().join("out.CivBeyondSwordWBSave");
        let dump = dir.path().join("dump.json");
        fs::write(&input, "Version=11\nBeginGame\n\tEra=ERA_ANCIENT\nEndGame\n")?;
        run(&Args {
            filename: input.clone(),
            output: Some(output.clone()),
            dump: Some(dump.clone()),
            check: true,
            no_interaction: true,
        })?;
        assert_eq!(fs::read(&output)?, fs::read(&input)?);
        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&dump)?)?;
        assert_eq!(json["game"]["era"], "ERA_ANCIENT");
        Ok(())
    }
}
