use super::{
    super::{
        generator::Generator,
        parser::{FieldError, BEGIN_GAME, END_GAME},
    },
    parse_flag, parse_number, WbSection,
};

/// Scenario wide settings, the `BeginGame` section.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Game {
    /// The era the scenario starts in, like `ERA_ANCIENT`
    pub era: String,
    /// The game speed, like `GAMESPEED_NORMAL`
    pub speed: String,
    /// Determines the displayed date and the time between turns
    pub calendar: String,
    /// The victory types that are possible. Listing none means all of them
    /// are, listing any locks out the rest.
    pub victories: Vec<String>,
    /// The turn the scenario starts on, the first turn being 0
    pub game_turn: Option<u32>,
    /// How many cities a multiplayer player may lose before losing the game
    pub max_city_elimination: Option<u32>,
    /// Points to spend in advanced start mode, 0 means a regular start
    pub num_advanced_start_points: Option<u32>,
    pub target_score: Option<u32>,
    /// Negative years are BC. The game assumes -4000 when absent.
    pub start_year: Option<i32>,
    /// Shown in the scenario menu
    pub description: String,
    /// Path to the mod folder the scenario requires
    pub mod_path: String,
    pub tutorial: bool,
    pub options: Vec<String>,
    pub mp_options: Vec<String>,
    /// Options greyed out in the scenario setup menu
    pub force_controls: Vec<String>,
    pub max_turns: Option<u32>,
}

/// A key of the `BeginGame` section.
#[derive(Debug, Clone, PartialEq)]
pub enum GameField {
    Era(String),
    Speed(String),
    Calendar(String),
    Victory(String),
    GameTurn(u32),
    MaxCityElimination(u32),
    NumAdvancedStartPoints(u32),
    TargetScore(u32),
    StartYear(i32),
    Description(String),
    ModPath(String),
    Tutorial(bool),
    GameOption(String),
    MpOption(String),
    ForceControl(String),
    MaxTurns(u32),
}

impl WbSection for Game {
    const BEGIN: &'static str = BEGIN_GAME;
    const END: &'static str = END_GAME;

    type Field = GameField;

    fn parse_field(key: &str, value: &str) -> Result<GameField, FieldError> {
        Ok(match key {
            "Era" => GameField::Era(value.to_owned()),
            "Speed" => GameField::Speed(value.to_owned()),
            "Calendar" => GameField::Calendar(value.to_owned()),
            "Victory" => GameField::Victory(value.to_owned()),
            "GameTurn" => GameField::GameTurn(parse_number(key, value)?),
            "MaxCityElimination" => GameField::MaxCityElimination(parse_number(key, value)?),
            "NumAdvancedStartPoints" => {
                GameField::NumAdvancedStartPoints(parse_number(key, value)?)
            }
            "TargetScore" => GameField::TargetScore(parse_number(key, value)?),
            "StartYear" => GameField::StartYear(parse_number(key, value)?),
            "Description" => GameField::Description(value.to_owned()),
            "ModPath" => GameField::ModPath(value.to_owned()),
            "Tutorial" => GameField::Tutorial(parse_flag(value)),
            "Option" => GameField::GameOption(value.to_owned()),
            "MPOption" => GameField::MpOption(value.to_owned()),
            "ForceControl" => GameField::ForceControl(value.to_owned()),
            "MaxTurns" => GameField::MaxTurns(parse_number(key, value)?),
            _ => return Err(FieldError::UnknownKey(key.to_owned())),
        })
    }

    fn apply(&mut self, field: GameField) {
        match field {
            GameField::Era(v) => self.era = v,
            GameField::Speed(v) => self.speed = v,
            GameField::Calendar(v) => self.calendar = v,
            GameField::Victory(v) => self.victories.push(v),
            GameField::GameTurn(v) => self.game_turn = Some(v),
            GameField::MaxCityElimination(v) => self.max_city_elimination = Some(v),
            GameField::NumAdvancedStartPoints(v) => self.num_advanced_start_points = Some(v),
            GameField::TargetScore(v) => self.target_score = Some(v),
            GameField::StartYear(v) => self.start_year = Some(v),
            GameField::Description(v) => self.description = v,
            GameField::ModPath(v) => self.mod_path = v,
            GameField::Tutorial(v) => self.tutorial = v,
            GameField::GameOption(v) => self.options.push(v),
            GameField::MpOption(v) => self.mp_options.push(v),
            GameField::ForceControl(v) => self.force_controls.push(v),
            GameField::MaxTurns(v) => self.max_turns = Some(v),
        }
    }

    fn write_body(&self, g: &mut Generator) {
        g.add_key_value("Era", &self.era);
        g.add_key_value("Speed", &self.speed);
        g.add_key_value("Calendar", &self.calendar);
        g.add_key_values("Victory", &self.victories);
        g.add_key_value("GameTurn", &self.game_turn);
        g.add_key_value("MaxCityElimination", &self.max_city_elimination);
        g.add_key_value("NumAdvancedStartPoints", &self.num_advanced_start_points);
        g.add_key_value("TargetScore", &self.target_score);
        g.add_key_value("StartYear", &self.start_year);
        g.add_key_value("Description", &self.description);
        g.add_key_value("ModPath", &self.mod_path);
        g.add_key_value("Tutorial", &self.tutorial);
        g.add_key_values("Option", &self.options);
        g.add_key_values("MPOption", &self.mp_options);
        g.add_key_values("ForceControl", &self.force_controls);
        g.add_key_value("MaxTurns", &self.max_turns);
    }
}
