use std::io::{BufReader, Read};

/// A submodule that provides the line level parsing and the section state
/// machine.
pub mod parser;
use parser::{ParsingError, SectionReader};

/// A submodule that provides the per entity codecs.
pub mod structures;

/// A submodule that provides the [Generator] writing the format.
mod generator;
pub use generator::{Generator, WbValue};

mod scenario;
pub use scenario::{Scenario, ScenarioSummary};

/// A submodule that provides helpers for reading and writing scenario files.
pub mod wb_file;

/// Parses a whole WorldBuilder file.
///
/// A malformed line anywhere in the input fails the whole parse, the error
/// carries the line it was found at.
pub fn parse<R: Read>(reader: R) -> Result<Scenario, ParsingError> {
    SectionReader::new(BufReader::new(reader)).read_scenario()
}

/// Renders a scenario in the WorldBuilder format.
pub fn serialize(scenario: &Scenario) -> Vec<u8> {
    scenario.to_wb_format()
}

#[cfg(test)]
mod tests {
    use super::{
        parser::StructuralError,
        structures::{CardinalDirection, Plot, WbSection},
        *,
    };

    #[test]
    fn test_game_and_map() -> Result<(), ParsingError> {
        let input = "Version=11\nBeginGame\nEra=ERA_ANCIENT\nSpeed=GAMESPEED_NORMAL\nEndGame\nBeginMap\ngrid width=2\ngrid height=2\nEndMap\n";
        let scenario = parse(input.as_bytes())?;
        assert_eq!(scenario.version, 11);
        assert_eq!(scenario.game.era, "ERA_ANCIENT");
        assert_eq!(scenario.game.speed, "GAMESPEED_NORMAL");
        let map = scenario.map.as_ref().unwrap();
        assert_eq!(map.grid_width, Some(2));
        assert_eq!(map.grid_height, Some(2));
        assert!(scenario.teams.is_empty());
        assert!(scenario.players.is_empty());
        assert!(scenario.plots.is_empty());
        assert_eq!(
            String::from_utf8(serialize(&scenario)).unwrap(),
            "Version=11\n\
             BeginGame\n\
             \tEra=ERA_ANCIENT\n\
             \tSpeed=GAMESPEED_NORMAL\n\
             EndGame\n\
             BeginMap\n\
             \tgrid width=2\n\
             \tgrid height=2\n\
             EndMap\n"
        );
        Ok(())
    }

    #[test]
    fn test_river_plot() -> Result<(), ParsingError> {
        let input = "BeginGame\nEndGame\nBeginPlot\n\tx=3,y=4\n\tisNOfRiver\n\tRiverWEDirection=2\nEndPlot\n";
        let scenario = parse(input.as_bytes())?;
        let plot = &scenario.plots[0];
        assert_eq!((plot.x, plot.y), (3, 4));
        assert!(plot.north_of_river);
        assert_eq!(plot.river_we_direction, Some(CardinalDirection::South));
        assert_eq!(
            String::from_utf8(plot.to_wb_format()).unwrap(),
            "BeginPlot\n\tx=3,y=4\n\tisNOfRiver\n\tRiverWEDirection=2\nEndPlot\n"
        );
        Ok(())
    }

    #[test]
    fn test_missing_game() {
        for input in [
            "Version=11\nBeginMap\ngrid width=2\nEndMap\n",
            "BeginTeam\nTeamID=0\nEndTeam\nBeginPlot\nx=0,y=0\nEndPlot\n",
        ] {
            assert!(matches!(
                parse(input.as_bytes()),
                Err(ParsingError::IncompleteScenario { .. })
            ));
        }
    }

    #[test]
    fn test_validate_then_apply() {
        // the bad pair comes second, the first one must not leak into the plot
        let err = parse("BeginGame\nEndGame\nBeginPlot\n\tx=3,z=4\nEndPlot\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, ParsingError::UnknownKey { line: 4, .. }));

        let mut plot = Plot::default();
        assert!(plot.unpack(&[("x", "3"), ("z", "4")]).is_err());
        assert_eq!(plot, Plot::default());
    }

    #[test]
    fn test_malformed_pair() {
        let err = parse("BeginGame\n\tEra=ERA_ANCIENT,not a pair\nEndGame\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            ParsingError::Structural {
                line: 2,
                reason: StructuralError::MalformedPair(_),
                ..
            }
        ));
    }

    #[test]
    fn test_value_conversion() {
        let err = parse("BeginGame\n\tGameTurn=soon\nEndGame\n".as_bytes()).unwrap_err();
        match err {
            ParsingError::ValueConversion {
                line, key, value, ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(key, "GameTurn");
                assert_eq!(value, "soon");
            }
            _ => panic!("expected a conversion error, got {}", err),
        }
    }

    #[test]
    fn test_booleans() -> Result<(), ParsingError> {
        let scenario = parse(
            "BeginGame\n\tTutorial=0\nEndGame\nBeginTeam\n\tRevealMap=1\nEndTeam\n".as_bytes(),
        )?;
        assert!(!scenario.game.tutorial);
        assert!(scenario.teams[0].reveal_map);
        assert_eq!(
            String::from_utf8(serialize(&scenario)).unwrap(),
            "Version=11\nBeginGame\nEndGame\nBeginTeam\n\tRevealMap=1\nEndTeam\n"
        );
        Ok(())
    }

    #[test]
    fn test_same_key_twice_on_one_line() -> Result<(), ParsingError> {
        let scenario = parse(
            "BeginGame\nEndGame\nBeginPlot\n\tx=0,y=0\n\tFeatureType=FEATURE_ICE,FeatureType=FEATURE_FOREST\n\tFeatureVariety=0\n\tFeatureVariety=1\nEndPlot\n"
                .as_bytes(),
        )?;
        assert_eq!(
            scenario.plots[0].features().collect::<Vec<_>>(),
            vec![("FEATURE_ICE", 0), ("FEATURE_FOREST", 1)]
        );
        Ok(())
    }

    #[test]
    fn test_empty_repeated_values() -> Result<(), ParsingError> {
        let input = "Version=11\nBeginGame\n\tVictory=\n\tVictory=VICTORY_TIME\nEndGame\nBeginPlot\n\tx=0,y=0\n\tFeatureType=,FeatureVariety=0\nEndPlot\n";
        let scenario = parse(input.as_bytes())?;
        assert_eq!(scenario.game.victories, vec!["", "VICTORY_TIME"]);
        assert_eq!(scenario.plots[0].features().collect::<Vec<_>>(), vec![("", 0)]);
        let bytes = serialize(&scenario);
        assert_eq!(bytes, input.as_bytes());
        assert_eq!(parse(bytes.as_slice())?, scenario);
        Ok(())
    }
}
