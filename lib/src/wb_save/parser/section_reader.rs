use std::{
    io::{BufRead, Lines},
    mem,
};

use tracing::{debug, info, trace};

use super::{
    super::{
        scenario::Scenario,
        structures::{City, Game, MapProperties, Player, Plot, Team, Unit, WbSection},
    },
    error::{ParsingError, SectionError, StructuralError},
    line::tokenize_line,
    section::{SectionTag, BEGIN_GAME, BEGIN_MAP, COMMENT_PREFIX, DEFAULT_VERSION, VERSION_PREFIX},
};

/// The section the reader is currently in, holding the entity being filled.
/// Cities and units carry the plot they are nested in.
#[derive(Debug)]
enum ParserState {
    Global,
    Game(Game),
    Team(Team),
    Player(Player),
    Map(MapProperties),
    Plot(Plot),
    City(Plot, City),
    Unit(Plot, Unit),
}

impl ParserState {
    fn name(&self) -> &'static str {
        match self {
            ParserState::Global => "global context",
            ParserState::Game(_) => "Game",
            ParserState::Team(_) => "Team",
            ParserState::Player(_) => "Player",
            ParserState::Map(_) => "Map",
            ParserState::Plot(_) => "Plot",
            ParserState::City(_, _) => "City",
            ParserState::Unit(_, _) => "Unit",
        }
    }
}

/// Tokenizes a line and hands it to the open section.
fn unpack_line<S: WbSection>(section: &mut S, line: &str) -> Result<(), SectionError> {
    let pairs = tokenize_line(line)?;
    section.unpack(&pairs)?;
    Ok(())
}

/// Runs the closing checks of a section.
fn close<S: WbSection>(mut section: S) -> Result<S, StructuralError> {
    section.finish()?;
    debug!("closed {} section", S::BEGIN);
    Ok(section)
}

/// The state machine turning the lines of a WorldBuilder file into a
/// [Scenario].
///
/// Every physical line is counted, including blank lines and comments, so
/// that errors point at the right place in the file.
pub struct SectionReader<R: BufRead> {
    lines: Lines<R>,
    line_number: usize,
    state: ParserState,
    version: Option<i32>,
    game: Option<Game>,
    teams: Vec<Team>,
    players: Vec<Player>,
    map: Option<MapProperties>,
    plots: Vec<Plot>,
}

impl<R: BufRead> SectionReader<R> {
    pub fn new(reader: R) -> Self {
        SectionReader {
            lines: reader.lines(),
            line_number: 0,
            state: ParserState::Global,
            version: None,
            game: None,
            teams: Vec::new(),
            players: Vec::new(),
            map: None,
            plots: Vec::new(),
        }
    }

    /// Consumes the input, returning the scenario it describes.
    pub fn read_scenario(mut self) -> Result<Scenario, ParsingError> {
        while let Some(read) = self.lines.next() {
            self.line_number += 1;
            let number = self.line_number;
            let raw = read.map_err(|error| ParsingError::ReaderError {
                line: number,
                error,
            })?;
            let line = raw.trim_matches(|c| c == ' ' || c == '\t' || c == '\r');
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }
            trace!(line = number, "{}", line);
            self.handle_line(line)
                .map_err(|err| ParsingError::at(number, line, err))?;
        }
        if !matches!(self.state, ParserState::Global) {
            return Err(ParsingError::at(
                self.line_number,
                "",
                StructuralError::Unterminated(self.state.name()).into(),
            ));
        }
        let game = self.game.ok_or(ParsingError::IncompleteScenario {
            lines: self.line_number,
        })?;
        let scenario = Scenario {
            version: self.version.unwrap_or(DEFAULT_VERSION),
            game,
            teams: self.teams,
            players: self.players,
            map: self.map,
            plots: self.plots,
        };
        let summary = scenario.summary();
        info!(
            "Loaded {} teams, {} players (+ {} placeholders), {} plots",
            summary.teams,
            summary.players - summary.placeholder_players,
            summary.placeholder_players,
            summary.plots
        );
        Ok(scenario)
    }

    fn handle_line(&mut self, line: &str) -> Result<(), SectionError> {
        let tag = SectionTag::from_line(line);
        let state = mem::replace(&mut self.state, ParserState::Global);
        self.state = match (state, tag) {
            (ParserState::Global, None) => {
                self.read_version(line)?;
                ParserState::Global
            }
            (ParserState::Global, Some(tag)) => self.open(tag)?,

            (ParserState::Game(game), Some(SectionTag::EndGame)) => {
                self.game = Some(close(game)?);
                ParserState::Global
            }
            (ParserState::Game(mut game), None) => {
                unpack_line(&mut game, line)?;
                ParserState::Game(game)
            }

            (ParserState::Team(team), Some(SectionTag::EndTeam)) => {
                self.teams.push(close(team)?);
                ParserState::Global
            }
            (ParserState::Team(mut team), None) => {
                unpack_line(&mut team, line)?;
                ParserState::Team(team)
            }

            (ParserState::Player(player), Some(SectionTag::EndPlayer)) => {
                self.players.push(close(player)?);
                ParserState::Global
            }
            (ParserState::Player(mut player), None) => {
                unpack_line(&mut player, line)?;
                ParserState::Player(player)
            }

            (ParserState::Map(map), Some(SectionTag::EndMap)) => {
                self.map = Some(close(map)?);
                ParserState::Global
            }
            (ParserState::Map(mut map), None) => {
                unpack_line(&mut map, line)?;
                ParserState::Map(map)
            }

            (ParserState::Plot(plot), Some(SectionTag::EndPlot)) => {
                self.plots.push(close(plot)?);
                ParserState::Global
            }
            (ParserState::Plot(plot), Some(SectionTag::BeginCity)) => {
                ParserState::City(plot, City::default())
            }
            (ParserState::Plot(plot), Some(SectionTag::BeginUnit)) => {
                ParserState::Unit(plot, Unit::default())
            }
            (ParserState::Plot(mut plot), None) => {
                unpack_line(&mut plot, line)?;
                ParserState::Plot(plot)
            }

            (ParserState::City(mut plot, city), Some(SectionTag::EndCity)) => {
                plot.cities.push(close(city)?);
                ParserState::Plot(plot)
            }
            (ParserState::City(plot, mut city), None) => {
                unpack_line(&mut city, line)?;
                ParserState::City(plot, city)
            }

            (ParserState::Unit(mut plot, unit), Some(SectionTag::EndUnit)) => {
                plot.units.push(close(unit)?);
                ParserState::Plot(plot)
            }
            (ParserState::Unit(plot, mut unit), None) => {
                unpack_line(&mut unit, line)?;
                ParserState::Unit(plot, unit)
            }

            (state, Some(tag)) => {
                return Err(StructuralError::MisplacedTag {
                    tag: tag.as_str(),
                    context: state.name(),
                }
                .into())
            }
        };
        Ok(())
    }

    /// Handles a non tag line outside of any section, which may only be the
    /// version.
    fn read_version(&mut self, line: &str) -> Result<(), StructuralError> {
        let value = line
            .strip_prefix(VERSION_PREFIX)
            .ok_or(StructuralError::UnexpectedLine)?;
        let version = value
            .parse::<i32>()
            .map_err(|_| StructuralError::BadVersion(value.to_owned()))?;
        self.version = Some(version);
        Ok(())
    }

    /// Opens a top level section.
    fn open(&self, tag: SectionTag) -> Result<ParserState, StructuralError> {
        Ok(match tag {
            SectionTag::BeginGame if self.game.is_some() => {
                return Err(StructuralError::DuplicateSection(BEGIN_GAME))
            }
            SectionTag::BeginGame => ParserState::Game(Game::default()),
            SectionTag::BeginTeam => ParserState::Team(Team::default()),
            SectionTag::BeginPlayer => ParserState::Player(Player::default()),
            SectionTag::BeginMap if self.map.is_some() => {
                return Err(StructuralError::DuplicateSection(BEGIN_MAP))
            }
            SectionTag::BeginMap => ParserState::Map(MapProperties::default()),
            SectionTag::BeginPlot => ParserState::Plot(Plot::default()),
            tag => {
                return Err(StructuralError::MisplacedTag {
                    tag: tag.as_str(),
                    context: ParserState::Global.name(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Result<Scenario, ParsingError> {
        SectionReader::new(input.as_bytes()).read_scenario()
    }

    #[test]
    fn test_minimal() -> Result<(), ParsingError> {
        let scenario = read("BeginGame\nEndGame\n")?;
        assert_eq!(scenario.version, DEFAULT_VERSION);
        assert_eq!(scenario.game, Game::default());
        assert!(scenario.map.is_none());
        Ok(())
    }

    #[test]
    fn test_whitespace_and_comments() -> Result<(), ParsingError> {
        let scenario = read(
            "# comment\r\n\r\nVersion=11\r\n  BeginGame \r\n\t\tEra=ERA_ANCIENT\r\n\t# another\r\nEndGame\r\n",
        )?;
        assert_eq!(scenario.game.era, "ERA_ANCIENT");
        Ok(())
    }

    #[test]
    fn test_nesting() -> Result<(), ParsingError> {
        let scenario = read(
            "BeginGame\nEndGame\n\
             BeginPlot\n\tx=1,y=2\n\
             \tBeginUnit\n\t\tUnitType=UNIT_WORKER,UnitOwner=0\n\tEndUnit\n\
             \tBeginCity\n\t\tCityName=Thebes\n\tEndCity\n\
             \tTeamReveal=0\nEndPlot\n",
        )?;
        let plot = &scenario.plots[0];
        assert_eq!((plot.x, plot.y), (1, 2));
        assert_eq!(plot.units[0].unit_type, "UNIT_WORKER");
        assert_eq!(plot.cities[0].name, "Thebes");
        assert_eq!(plot.team_reveal, vec![0]);
        Ok(())
    }

    #[test]
    fn test_global_line() {
        let err = read("BeginGame\nEndGame\nEra=ERA_ANCIENT\n").unwrap_err();
        assert!(matches!(
            err,
            ParsingError::Structural {
                line: 3,
                reason: StructuralError::UnexpectedLine,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_version() {
        let err = read("Version=eleven\nBeginGame\nEndGame\n").unwrap_err();
        assert!(matches!(
            err,
            ParsingError::Structural {
                line: 1,
                reason: StructuralError::BadVersion(_),
                ..
            }
        ));
    }

    #[test]
    fn test_misplaced_tags() {
        let err = read("BeginTeam\nEndGame\n").unwrap_err();
        assert!(matches!(
            err,
            ParsingError::Structural {
                line: 2,
                reason: StructuralError::MisplacedTag {
                    tag: "EndGame",
                    context: "Team"
                },
                ..
            }
        ));
        assert!(read("BeginPlot\nEndCity\n").is_err());
        assert!(read("EndPlot\n").is_err());
        assert!(read("BeginPlot\nBeginCity\nBeginUnit\n").is_err());
        assert!(read("BeginGame\nEndGame\nBeginCity\n").is_err());
    }

    #[test]
    fn test_duplicate_sections() {
        let err = read("BeginGame\nEndGame\nBeginGame\nEndGame\n").unwrap_err();
        assert!(matches!(
            err,
            ParsingError::Structural {
                line: 3,
                reason: StructuralError::DuplicateSection("BeginGame"),
                ..
            }
        ));
        assert!(read("BeginGame\nEndGame\nBeginMap\nEndMap\nBeginMap\nEndMap\n").is_err());
    }

    #[test]
    fn test_unterminated() {
        let err = read("BeginGame\nEndGame\nBeginPlot\n\tBeginUnit\n").unwrap_err();
        assert!(matches!(
            err,
            ParsingError::Structural {
                line: 4,
                reason: StructuralError::Unterminated("Unit"),
                ..
            }
        ));
    }

    #[test]
    fn test_no_game() {
        let err = read("Version=11\n\nBeginTeam\nEndTeam\n").unwrap_err();
        assert!(matches!(err, ParsingError::IncompleteScenario { lines: 4 }));
        assert!(read("").is_err());
    }

    #[test]
    fn test_invalid_utf8() {
        let input: &[u8] = b"BeginGame\n\tEra=\xff\nEndGame\n";
        let err = SectionReader::new(input).read_scenario().unwrap_err();
        assert!(matches!(err, ParsingError::ReaderError { line: 2, .. }));
    }

    #[test]
    fn test_misaligned_pairs_at_close() {
        let err = read("BeginGame\nEndGame\nBeginPlayer\n\tAttitudePlayer=1\nEndPlayer\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ParsingError::Structural {
                line: 5,
                reason: StructuralError::MisalignedPairs { .. },
                ..
            }
        ));
    }
}
