use tracing::info;

use super::{
    generator::Generator,
    parser::{DEFAULT_VERSION, VERSION_PREFIX},
    structures::{Game, MapProperties, Player, Plot, Team, WbSection},
};

/// A whole WorldBuilder scenario.
///
/// Sections are written back in a fixed order: the version, the game, the
/// teams, the players, the map and finally the plots.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scenario {
    pub version: i32,
    pub game: Game,
    pub teams: Vec<Team>,
    /// Players in slot order, placeholders included
    pub players: Vec<Player>,
    pub map: Option<MapProperties>,
    pub plots: Vec<Plot>,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            version: DEFAULT_VERSION,
            game: Game::default(),
            teams: Vec::new(),
            players: Vec::new(),
            map: None,
            plots: Vec::new(),
        }
    }
}

/// Entity counts of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioSummary {
    pub teams: usize,
    /// All player slots, placeholders included
    pub players: usize,
    pub placeholder_players: usize,
    pub plots: usize,
    pub units: usize,
    pub cities: usize,
}

impl Scenario {
    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            teams: self.teams.len(),
            players: self.players.len(),
            placeholder_players: self.players.iter().filter(|p| p.is_placeholder()).count(),
            plots: self.plots.len(),
            units: self.plots.iter().map(|p| p.units.len()).sum(),
            cities: self.plots.iter().map(|p| p.cities.len()).sum(),
        }
    }

    pub fn write(&self, generator: &mut Generator) {
        generator.add_line(&format!("{}{}", VERSION_PREFIX, self.version));
        self.game.write(generator);
        for team in &self.teams {
            team.write(generator);
        }
        for player in &self.players {
            player.write(generator);
        }
        if let Some(map) = &self.map {
            map.write(generator);
        }
        for plot in &self.plots {
            plot.write(generator);
        }
    }

    /// Renders the scenario in the WorldBuilder format.
    pub fn to_wb_format(&self) -> Vec<u8> {
        let mut generator = Generator::new();
        self.write(&mut generator);
        info!("Generated {} bytes", generator.len());
        generator.into_bytes()
    }
}
