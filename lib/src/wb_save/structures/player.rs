use super::{
    super::{
        generator::Generator,
        parser::{
            types::{PlayerId, TeamId},
            FieldError, StructuralError, BEGIN_PLAYER, END_PLAYER,
        },
    },
    check_aligned, parse_flag, parse_number, WbSection,
};

/// The value the editor writes into `CivType` and `LeaderType` for player
/// slots that are not in use.
pub const NONE_PLAYER: &str = "NONE";

const ATTITUDE_PLAYER: &str = "AttitudePlayer";
const ATTITUDE_EXTRA: &str = "AttitudeExtra";

/// A player slot. Its position in the scenario's player list is its id.
///
/// ## Attitudes
///
/// `AttitudePlayer` and `AttitudeExtra` are written as two separate runs of
/// keys, with the n-th of each forming one attitude modifier. They are kept
/// in private columns and only ever modified together through
/// [Player::push_attitude].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Player {
    /// The full name of the civilization
    pub civ_desc: String,
    pub civ_short_desc: String,
    pub leader_name: String,
    pub civ_adjective: String,
    /// The flag texture
    pub flag_decal: String,
    /// Units carry a white flag instead of the civilization's color
    pub white_flag: bool,
    pub leader_type: String,
    pub civ_type: String,
    pub team: Option<TeamId>,
    /// The AI difficulty used when no human takes the slot
    pub handicap: String,
    pub color: String,
    pub art_style: String,
    pub playable_civ: bool,
    /// Minor nations do not take part in diplomacy
    pub minor_nation_status: bool,
    pub starting_gold: Option<i32>,
    pub random_start_location: bool,
    /// Only used while the player has no city
    pub starting_x: Option<i32>,
    pub starting_y: Option<i32>,
    pub state_religion: String,
    pub starting_era: String,
    /// City names available for new cities
    pub city_list: Vec<String>,
    pub civic_options: Vec<String>,
    pub civics: Vec<String>,
    attitude_players: Vec<PlayerId>,
    attitude_extras: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerField {
    CivDesc(String),
    CivShortDesc(String),
    LeaderName(String),
    CivAdjective(String),
    FlagDecal(String),
    WhiteFlag(bool),
    LeaderType(String),
    CivType(String),
    Team(TeamId),
    Handicap(String),
    Color(String),
    ArtStyle(String),
    PlayableCiv(bool),
    MinorNationStatus(bool),
    StartingGold(i32),
    RandomStartLocation(bool),
    StartingX(i32),
    StartingY(i32),
    StateReligion(String),
    StartingEra(String),
    CityList(String),
    CivicOption(String),
    Civic(String),
    AttitudePlayer(PlayerId),
    AttitudeExtra(i32),
}

impl Player {
    /// Returns true for the unused slots the editor fills the player list
    /// with.
    pub fn is_placeholder(&self) -> bool {
        self.civ_type == NONE_PLAYER && self.leader_type == NONE_PLAYER
    }

    /// The attitude modifiers as (player, extra) pairs.
    pub fn attitudes(&self) -> impl Iterator<Item = (PlayerId, i32)> + '_ {
        self.attitude_players
            .iter()
            .copied()
            .zip(self.attitude_extras.iter().copied())
    }

    pub fn push_attitude(&mut self, player: PlayerId, extra: i32) {
        self.attitude_players.push(player);
        self.attitude_extras.push(extra);
    }

    pub fn clear_attitudes(&mut self) {
        self.attitude_players.clear();
        self.attitude_extras.clear();
    }
}

impl WbSection for Player {
    const BEGIN: &'static str = BEGIN_PLAYER;
    const END: &'static str = END_PLAYER;

    type Field = PlayerField;

    fn parse_field(key: &str, value: &str) -> Result<PlayerField, FieldError> {
        let owned = || value.to_owned();
        Ok(match key {
            "CivDesc" => PlayerField::CivDesc(owned()),
            "CivShortDesc" => PlayerField::CivShortDesc(owned()),
            "LeaderName" => PlayerField::LeaderName(owned()),
            "CivAdjective" => PlayerField::CivAdjective(owned()),
            "FlagDecal" => PlayerField::FlagDecal(owned()),
            "WhiteFlag" => PlayerField::WhiteFlag(parse_flag(value)),
            "LeaderType" => PlayerField::LeaderType(owned()),
            "CivType" => PlayerField::CivType(owned()),
            "Team" => PlayerField::Team(parse_number(key, value)?),
            "Handicap" => PlayerField::Handicap(owned()),
            "Color" => PlayerField::Color(owned()),
            "ArtStyle" => PlayerField::ArtStyle(owned()),
            "PlayableCiv" => PlayerField::PlayableCiv(parse_flag(value)),
            "MinorNationStatus" => PlayerField::MinorNationStatus(parse_flag(value)),
            "StartingGold" => PlayerField::StartingGold(parse_number(key, value)?),
            "RandomStartLocation" => PlayerField::RandomStartLocation(parse_flag(value)),
            "StartingX" => PlayerField::StartingX(parse_number(key, value)?),
            "StartingY" => PlayerField::StartingY(parse_number(key, value)?),
            "StateReligion" => PlayerField::StateReligion(owned()),
            "StartingEra" => PlayerField::StartingEra(owned()),
            "CityList" => PlayerField::CityList(owned()),
            "CivicOption" => PlayerField::CivicOption(owned()),
            "Civic" => PlayerField::Civic(owned()),
            ATTITUDE_PLAYER => PlayerField::AttitudePlayer(parse_number(key, value)?),
            ATTITUDE_EXTRA => PlayerField::AttitudeExtra(parse_number(key, value)?),
            _ => return Err(FieldError::UnknownKey(key.to_owned())),
        })
    }

    fn apply(&mut self, field: PlayerField) {
        match field {
            PlayerField::CivDesc(v) => self.civ_desc = v,
            PlayerField::CivShortDesc(v) => self.civ_short_desc = v,
            PlayerField::LeaderName(v) => self.leader_name = v,
            PlayerField::CivAdjective(v) => self.civ_adjective = v,
            PlayerField::FlagDecal(v) => self.flag_decal = v,
            PlayerField::WhiteFlag(v) => self.white_flag = v,
            PlayerField::LeaderType(v) => self.leader_type = v,
            PlayerField::CivType(v) => self.civ_type = v,
            PlayerField::Team(v) => self.team = Some(v),
            PlayerField::Handicap(v) => self.handicap = v,
            PlayerField::Color(v) => self.color = v,
            PlayerField::ArtStyle(v) => self.art_style = v,
            PlayerField::PlayableCiv(v) => self.playable_civ = v,
            PlayerField::MinorNationStatus(v) => self.minor_nation_status = v,
            PlayerField::StartingGold(v) => self.starting_gold = Some(v),
            PlayerField::RandomStartLocation(v) => self.random_start_location = v,
            PlayerField::StartingX(v) => self.starting_x = Some(v),
            PlayerField::StartingY(v) => self.starting_y = Some(v),
            PlayerField::StateReligion(v) => self.state_religion = v,
            PlayerField::StartingEra(v) => self.starting_era = v,
            PlayerField::CityList(v) => self.city_list.push(v),
            PlayerField::CivicOption(v) => self.civic_options.push(v),
            PlayerField::Civic(v) => self.civics.push(v),
            // the columns are checked against each other once the section closes
            PlayerField::AttitudePlayer(v) => self.attitude_players.push(v),
            PlayerField::AttitudeExtra(v) => self.attitude_extras.push(v),
        }
    }

    fn finish(&mut self) -> Result<(), StructuralError> {
        check_aligned(
            ATTITUDE_PLAYER,
            self.attitude_players.len(),
            ATTITUDE_EXTRA,
            self.attitude_extras.len(),
        )
    }

    fn write_body(&self, g: &mut Generator) {
        g.add_key_value("CivDesc", &self.civ_desc);
        g.add_key_value("CivShortDesc", &self.civ_short_desc);
        g.add_key_value("LeaderName", &self.leader_name);
        g.add_key_value("CivAdjective", &self.civ_adjective);
        g.add_key_value("FlagDecal", &self.flag_decal);
        g.add_key_value("WhiteFlag", &self.white_flag);
        g.add_key_value("LeaderType", &self.leader_type);
        g.add_key_value("CivType", &self.civ_type);
        g.add_key_value("Team", &self.team);
        g.add_key_value("Handicap", &self.handicap);
        g.add_key_value("Color", &self.color);
        g.add_key_value("ArtStyle", &self.art_style);
        g.add_key_value("PlayableCiv", &self.playable_civ);
        g.add_key_value("MinorNationStatus", &self.minor_nation_status);
        g.add_key_value("StartingGold", &self.starting_gold);
        g.add_key_value("RandomStartLocation", &self.random_start_location);
        g.add_key_value_group(&[
            ("StartingX", &self.starting_x),
            ("StartingY", &self.starting_y),
        ]);
        g.add_key_value("StateReligion", &self.state_religion);
        g.add_key_value("StartingEra", &self.starting_era);
        g.add_key_values("CityList", &self.city_list);
        g.add_key_values("CivicOption", &self.civic_options);
        g.add_key_values("Civic", &self.civics);
        g.add_key_values(ATTITUDE_PLAYER, &self.attitude_players);
        g.add_key_values(ATTITUDE_EXTRA, &self.attitude_extras);
    }
}
