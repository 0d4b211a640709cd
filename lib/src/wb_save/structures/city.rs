use std::collections::BTreeMap;

use super::{
    super::{
        generator::Generator,
        parser::{types::PlayerId, FieldError, BEGIN_CITY, END_CITY},
    },
    parse_number, WbSection,
};

const CULTURE_KEY_PREFIX: &str = "Player";
const CULTURE_KEY_SUFFIX: &str = "Culture";

/// Extracts the player id out of a `Player<N>Culture` key.
fn culture_player(key: &str) -> Option<PlayerId> {
    let digits = key
        .strip_prefix(CULTURE_KEY_PREFIX)?
        .strip_suffix(CULTURE_KEY_SUFFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A city standing on a plot.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct City {
    pub owner: Option<PlayerId>,
    pub name: String,
    pub population: Option<u32>,
    // Only one of the production targets is meant to be set, this is not
    // enforced.
    pub production_unit: String,
    pub production_building: String,
    pub production_project: String,
    pub production_process: String,
    /// Buildings already built, one `BuildingType` line each
    pub buildings: Vec<String>,
    /// Religions present in the city
    pub religions: Vec<String>,
    /// Religions the city is the holy city of
    pub holy_city_religions: Vec<String>,
    pub script_data: String,
    /// Culture points accumulated per player. Players without culture in the
    /// city need no entry.
    pub player_culture: BTreeMap<PlayerId, u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CityField {
    CityOwner(PlayerId),
    CityName(String),
    CityPopulation(u32),
    ProductionUnit(String),
    ProductionBuilding(String),
    ProductionProject(String),
    ProductionProcess(String),
    BuildingType(String),
    ReligionType(String),
    HolyCityReligionType(String),
    ScriptData(String),
    PlayerCulture(PlayerId, u64),
}

impl WbSection for City {
    const BEGIN: &'static str = BEGIN_CITY;
    const END: &'static str = END_CITY;

    type Field = CityField;

    fn parse_field(key: &str, value: &str) -> Result<CityField, FieldError> {
        if let Some(player) = culture_player(key) {
            return Ok(CityField::PlayerCulture(player, parse_number(key, value)?));
        }
        Ok(match key {
            "CityOwner" => CityField::CityOwner(parse_number(key, value)?),
            "CityName" => CityField::CityName(value.to_owned()),
            "CityPopulation" => CityField::CityPopulation(parse_number(key, value)?),
            "ProductionUnit" => CityField::ProductionUnit(value.to_owned()),
            "ProductionBuilding" => CityField::ProductionBuilding(value.to_owned()),
            "ProductionProject" => CityField::ProductionProject(value.to_owned()),
            "ProductionProcess" => CityField::ProductionProcess(value.to_owned()),
            "BuildingType" => CityField::BuildingType(value.to_owned()),
            "ReligionType" => CityField::ReligionType(value.to_owned()),
            "HolyCityReligionType" => CityField::HolyCityReligionType(value.to_owned()),
            "ScriptData" => CityField::ScriptData(value.to_owned()),
            _ => return Err(FieldError::UnknownKey(key.to_owned())),
        })
    }

    fn apply(&mut self, field: CityField) {
        match field {
            CityField::CityOwner(v) => self.owner = Some(v),
            CityField::CityName(v) => self.name = v,
            CityField::CityPopulation(v) => self.population = Some(v),
            CityField::ProductionUnit(v) => self.production_unit = v,
            CityField::ProductionBuilding(v) => self.production_building = v,
            CityField::ProductionProject(v) => self.production_project = v,
            CityField::ProductionProcess(v) => self.production_process = v,
            CityField::BuildingType(v) => self.buildings.push(v),
            CityField::ReligionType(v) => self.religions.push(v),
            CityField::HolyCityReligionType(v) => self.holy_city_religions.push(v),
            CityField::ScriptData(v) => self.script_data = v,
            CityField::PlayerCulture(player, points) => {
                self.player_culture.insert(player, points);
            }
        }
    }

    fn write_body(&self, g: &mut Generator) {
        g.add_key_value("CityOwner", &self.owner);
        g.add_key_value("CityName", &self.name);
        g.add_key_value("CityPopulation", &self.population);
        g.add_key_value("ProductionUnit", &self.production_unit);
        g.add_key_value("ProductionBuilding", &self.production_building);
        g.add_key_value("ProductionProject", &self.production_project);
        g.add_key_value("ProductionProcess", &self.production_process);
        g.add_key_values("BuildingType", &self.buildings);
        g.add_key_values("ReligionType", &self.religions);
        g.add_key_values("HolyCityReligionType", &self.holy_city_religions);
        g.add_key_value("ScriptData", &self.script_data);
        for (player, points) in &self.player_culture {
            g.add_key_value(
                &format!("{}{}{}", CULTURE_KEY_PREFIX, player, CULTURE_KEY_SUFFIX),
                points,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_culture_key() {
        assert_eq!(culture_player("Player0Culture"), Some(0));
        assert_eq!(culture_player("Player12Culture"), Some(12));
        assert_eq!(culture_player("PlayerCulture"), None);
        assert_eq!(culture_player("Player+1Culture"), None);
        assert_eq!(culture_player("`Player1Culture`"), None);
        assert_eq!(culture_player("Player1Culturex"), None);
    }

    #[test]
    fn test_culture() -> Result<(), FieldError> {
        let mut city = City::default();
        city.unpack(&[("Player3Culture", "100")])?;
        city.unpack(&[("Player0Culture", "25")])?;
        assert_eq!(city.player_culture.get(&3), Some(&100));
        assert_eq!(city.player_culture.get(&0), Some(&25));
        assert!(matches!(
            city.unpack(&[("Player1Culture", "-5")]),
            Err(FieldError::Conversion { .. })
        ));
        assert!(matches!(
            city.unpack(&[("PlayerXCulture", "5")]),
            Err(FieldError::UnknownKey(_))
        ));
        Ok(())
    }

    #[test]
    fn test_write() {
        let mut city = City {
            owner: Some(0),
            name: "Roma".into(),
            population: Some(3),
            production_unit: "UNIT_WARRIOR".into(),
            buildings: vec!["BUILDING_PALACE".into(), "BUILDING_BARRACKS".into()],
            ..Default::default()
        };
        city.player_culture.insert(2, 7);
        city.player_culture.insert(0, 100);
        assert_eq!(
            String::from_utf8(city.to_wb_format()).unwrap(),
            "BeginCity\n\
             \tCityOwner=0\n\
             \tCityName=Roma\n\
             \tCityPopulation=3\n\
             \tProductionUnit=UNIT_WARRIOR\n\
             \tBuildingType=BUILDING_PALACE\n\
             \tBuildingType=BUILDING_BARRACKS\n\
             \tPlayer0Culture=100\n\
             \tPlayer2Culture=7\n\
             EndCity\n"
        );
    }

    #[test]
    fn test_unknown_key_leaves_city_untouched() {
        let mut city = City::default();
        assert!(matches!(
            city.unpack(&[("CityName", "Roma"), ("CityMotto", "SPQR")]),
            Err(FieldError::UnknownKey(_))
        ));
        assert_eq!(city, City::default());
    }
}
