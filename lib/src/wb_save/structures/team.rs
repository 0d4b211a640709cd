use super::{
    super::{
        generator::Generator,
        parser::{types::TeamId, FieldError, BEGIN_TEAM, END_TEAM},
    },
    parse_flag, parse_number, WbSection,
};

/// A team, the unit diplomacy happens between. Other teams are referred to
/// by their raw ids, which are never checked against the scenario.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Team {
    pub team_id: Option<TeamId>,
    /// Techs the team starts with
    pub techs: Vec<String>,
    pub contacts: Vec<TeamId>,
    pub at_war: Vec<TeamId>,
    /// Teams whose war or peace state can't be changed
    pub permanent_war_peace: Vec<TeamId>,
    pub open_borders: Vec<TeamId>,
    pub defensive_pacts: Vec<TeamId>,
    /// Projects already completed
    pub projects: Vec<String>,
    pub reveal_map: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TeamField {
    TeamId(TeamId),
    Tech(String),
    ContactWithTeam(TeamId),
    AtWar(TeamId),
    PermanentWarPeace(TeamId),
    OpenBordersWithTeam(TeamId),
    DefensivePactWithTeam(TeamId),
    ProjectType(String),
    RevealMap(bool),
}

impl WbSection for Team {
    const BEGIN: &'static str = BEGIN_TEAM;
    const END: &'static str = END_TEAM;

    type Field = TeamField;

    fn parse_field(key: &str, value: &str) -> Result<TeamField, FieldError> {
        Ok(match key {
            "TeamID" => TeamField::TeamId(parse_number(key, value)?),
            "Tech" => TeamField::Tech(value.to_owned()),
            "ContactWithTeam" => TeamField::ContactWithTeam(parse_number(key, value)?),
            "AtWar" => TeamField::AtWar(parse_number(key, value)?),
            "PermanentWarPeace" => TeamField::PermanentWarPeace(parse_number(key, value)?),
            "OpenBordersWithTeam" => TeamField::OpenBordersWithTeam(parse_number(key, value)?),
            "DefensivePactWithTeam" => {
                TeamField::DefensivePactWithTeam(parse_number(key, value)?)
            }
            "ProjectType" => TeamField::ProjectType(value.to_owned()),
            "RevealMap" => TeamField::RevealMap(parse_flag(value)),
            _ => return Err(FieldError::UnknownKey(key.to_owned())),
        })
    }

    fn apply(&mut self, field: TeamField) {
        match field {
            TeamField::TeamId(id) => self.team_id = Some(id),
            TeamField::Tech(tech) => self.techs.push(tech),
            TeamField::ContactWithTeam(id) => self.contacts.push(id),
            TeamField::AtWar(id) => self.at_war.push(id),
            TeamField::PermanentWarPeace(id) => self.permanent_war_peace.push(id),
            TeamField::OpenBordersWithTeam(id) => self.open_borders.push(id),
            TeamField::DefensivePactWithTeam(id) => self.defensive_pacts.push(id),
            TeamField::ProjectType(project) => self.projects.push(project),
            TeamField::RevealMap(reveal) => self.reveal_map = reveal,
        }
    }

    fn write_body(&self, g: &mut Generator) {
        g.add_key_value("TeamID", &self.team_id);
        g.add_key_values("Tech", &self.techs);
        g.add_key_values("ContactWithTeam", &self.contacts);
        g.add_key_values("AtWar", &self.at_war);
        g.add_key_values("PermanentWarPeace", &self.permanent_war_peace);
        g.add_key_values("OpenBordersWithTeam", &self.open_borders);
        g.add_key_values("DefensivePactWithTeam", &self.defensive_pacts);
        g.add_key_values("ProjectType", &self.projects);
        g.add_key_value("RevealMap", &self.reveal_map);
    }
}
