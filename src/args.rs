use clap_derive::Parser;
use derive_more::Display;
use dialoguer::{Completion, Confirm, Input};

use std::{
    error, fs,
    path::{Path, PathBuf},
};

use civ4_studio_lib::wb_save::wb_file::has_wb_extension;

/// A [Completion] struct for scenario file names, that also acts as a list of scenarios in the current directory.
struct ScenarioNameCompletion {
    scenarios: Vec<String>,
}

impl Default for ScenarioNameCompletion {
    fn default() -> Self {
        let mut res = Vec::new();
        if let Ok(entries) = fs::read_dir(".") {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() && has_wb_extension(&path) {
                    res.push(path.to_string_lossy().into_owned());
                }
            }
        }
        res.sort();
        ScenarioNameCompletion { scenarios: res }
    }
}

impl Completion for ScenarioNameCompletion {
    fn get(&self, input: &str) -> Option<String> {
        self.scenarios.iter().find(|x| x.contains(input)).cloned()
    }
}

#[derive(Debug, Display)]
enum InvalidPath {
    #[display("invalid path (does not exist)")]
    InvalidPath,
    #[display("not a file")]
    NotAFile,
}

impl error::Error for InvalidPath {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// A function to validate the file path input.
fn validate_file_path(input: &String) -> Result<(), InvalidPath> {
    let p = Path::new(input);
    if !p.exists() {
        Err(InvalidPath::InvalidPath)
    } else if !p.is_file() {
        Err(InvalidPath::NotAFile)
    } else {
        Ok(())
    }
}

/// A function to parse the path argument.
fn parse_path_arg(input: &str) -> Result<PathBuf, &'static str> {
    let p = PathBuf::from(input);
    if p.exists() {
        Ok(p)
    } else {
        Err("Invalid path")
    }
}

/// The arguments to the program.
#[derive(Parser)]
pub struct Args {
    #[arg(value_parser = parse_path_arg)]
    /// The path to the scenario file.
    pub filename: PathBuf,
    #[arg(short, long, default_value = None)]
    /// Where to write the regenerated scenario.
    pub output: Option<PathBuf>,
    #[arg(long, default_value = None)]
    /// A path to a file to dump the parsed scenario to, as json.
    pub dump: Option<PathBuf>,
    #[arg(short, long, default_value_t = false)]
    /// A flag that tells the program to check that the scenario survives being regenerated.
    pub check: bool,
    #[arg(short, long, default_value_t = false)]
    /// A flag that tells the program not to interact with the user.
    pub no_interaction: bool,
}

impl Args {
    /// Create the object based on user input.
    pub fn get_from_user() -> Result<Self, dialoguer::Error> {
        println!("Welcome to Civ4 Studio!\nTab autocompletes the query and enter confirms the selection.");
        let completion = ScenarioNameCompletion::default();
        let filename = PathBuf::from(
            Input::<String>::new()
                .with_prompt("Enter the scenario file path")
                .validate_with(validate_file_path)
                .with_initial_text(completion.scenarios.first().cloned().unwrap_or_default())
                .completion_with(&completion)
                .interact_text()?,
        );
        let output = Input::<String>::new()
            .with_prompt("Enter the output path [empty for None]")
            .allow_empty(true)
            .interact_text()
            .map(|x| {
                if x.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(x))
                }
            })?;
        let check = Confirm::new()
            .with_prompt("Check that the scenario regenerates identically?")
            .default(true)
            .interact()?;
        Ok(Args {
            filename,
            output,
            dump: None,
            check,
            no_interaction: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_parse_args() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("test.CivBeyondSwordWBSave");
        fs::write(&input, "BeginGame\nEndGame\n").unwrap();
        let input_arg = input.to_string_lossy().into_owned();
        let args = Args::try_parse_from([
            "civ4_studio",
            input_arg.as_str(),
            "--check",
            "-o",
            "out.CivBeyondSwordWBSave",
        ])
        .unwrap();
        assert_eq!(args.filename, input);
        assert!(args.check);
        assert_eq!(args.output, Some(PathBuf::from("out.CivBeyondSwordWBSave")));
        assert!(args.dump.is_none());
        assert!(!args.no_interaction);
    }

    #[test]
    fn test_missing_file() {
        assert!(Args::try_parse_from(["civ4_studio", "/does/not/exist.CivBeyondSwordWBSave"]).is_err());
    }
}
