use std::{
    ffi::OsStr,
    fs::{self, File},
    io,
    path::Path,
};

use derive_more::{Display, Error, From};
use tracing::debug;

use super::{parse, parser::ParsingError, serialize, Scenario};

/// The extension the game uses for Beyond the Sword scenarios.
pub const WB_SAVE_EXTENSION: &str = "CivBeyondSwordWBSave";

/// An error that can occur when loading a scenario file.
#[derive(Debug, From, Display, Error)]
pub enum WbFileError {
    /// Something went wrong with stdlib IO.
    IoError(io::Error),
    /// The file was read, but is not a valid scenario.
    ParseError(ParsingError),
}

/// Opens and parses a scenario file.
pub fn open_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, WbFileError> {
    let path = path.as_ref();
    debug!("opening {}", path.display());
    let file = File::open(path)?;
    Ok(parse(file)?)
}

/// Writes a scenario to a file, replacing its contents.
pub fn save_scenario<P: AsRef<Path>>(path: P, scenario: &Scenario) -> Result<(), io::Error> {
    let path = path.as_ref();
    debug!("saving {}", path.display());
    fs::write(path, serialize(scenario))
}

/// Returns true if the path has the scenario extension.
pub fn has_wb_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|ext| ext == OsStr::new(WB_SAVE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const FIXTURE: &str = include_str!("../../test_data/small.CivBeyondSwordWBSave");

    #[test]
    fn test_fixture_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        file.write_all(FIXTURE.as_bytes())?;
        let scenario = open_scenario(file.path())?;

        let summary = scenario.summary();
        assert_eq!(summary.teams, 2);
        assert_eq!(summary.players, 3);
        assert_eq!(summary.placeholder_players, 1);
        assert_eq!(summary.plots, 4);
        assert_eq!(summary.units, 2);
        assert_eq!(summary.cities, 1);

        // the fixture is written the way the game writes it
        assert_eq!(String::from_utf8(serialize(&scenario))?, FIXTURE);

        let out = NamedTempFile::new()?;
        save_scenario(out.path(), &scenario)?;
        assert_eq!(open_scenario(out.path())?, scenario);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = open_scenario(dir.path().join("missing.CivBeyondSwordWBSave"));
        assert!(matches!(result, Err(WbFileError::IoError(_))));
    }

    #[test]
    fn test_invalid_file() -> Result<(), io::Error> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"Version=11\nBeginTeam\n")?;
        assert!(matches!(
            open_scenario(file.path()),
            Err(WbFileError::ParseError(ParsingError::Structural { line: 2, .. }))
        ));
        Ok(())
    }

    #[test]
    fn test_extension() {
        assert!(has_wb_extension("maps/Earth.CivBeyondSwordWBSave"));
        assert!(!has_wb_extension("maps/Earth.CivWarlordsWBSave"));
        assert!(!has_wb_extension("CivBeyondSwordWBSave"));
    }
}
