use super::{
    super::{
        generator::Generator,
        parser::{types::PlayerId, FieldError, BEGIN_UNIT, END_UNIT},
    },
    parse_number, parse_variant, WbSection,
};

integer_enum! {
    /// The way a unit model faces, clockwise from north.
    Direction {
        NoDirection = -1,
        North = 0,
        NorthEast = 1,
        East = 2,
        SouthEast = 3,
        South = 4,
        SouthWest = 5,
        West = 6,
        NorthWest = 7,
    }
}

/// A unit standing on a plot.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Unit {
    pub unit_type: String,
    pub owner: PlayerId,
    pub level: i32,
    pub experience: i32,
    /// Promotions the unit already has. Each one is its own `PromotionType`
    /// line.
    pub promotions: Vec<String>,
    pub ai_type: String,
    pub damage: Option<u32>,
    pub facing: Option<Direction>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnitField {
    UnitType(String),
    UnitOwner(PlayerId),
    Level(i32),
    Experience(i32),
    PromotionType(String),
    UnitAiType(String),
    Damage(u32),
    FacingDirection(Direction),
}

impl WbSection for Unit {
    const BEGIN: &'static str = BEGIN_UNIT;
    const END: &'static str = END_UNIT;

    type Field = UnitField;

    fn parse_field(key: &str, value: &str) -> Result<UnitField, FieldError> {
        Ok(match key {
            "UnitType" => UnitField::UnitType(value.to_owned()),
            "UnitOwner" => UnitField::UnitOwner(parse_number(key, value)?),
            "Level" => UnitField::Level(parse_number(key, value)?),
            "Experience" => UnitField::Experience(parse_number(key, value)?),
            "PromotionType" => UnitField::PromotionType(value.to_owned()),
            "UnitAIType" => UnitField::UnitAiType(value.to_owned()),
            "Damage" => UnitField::Damage(parse_number(key, value)?),
            "FacingDirection" => UnitField::FacingDirection(parse_variant(key, value)?),
            _ => return Err(FieldError::UnknownKey(key.to_owned())),
        })
    }

    fn apply(&mut self, field: UnitField) {
        match field {
            UnitField::UnitType(v) => self.unit_type = v,
            UnitField::UnitOwner(v) => self.owner = v,
            UnitField::Level(v) => self.level = v,
            UnitField::Experience(v) => self.experience = v,
            UnitField::PromotionType(v) => self.promotions.push(v),
            UnitField::UnitAiType(v) => self.ai_type = v,
            UnitField::Damage(v) => self.damage = Some(v),
            UnitField::FacingDirection(v) => self.facing = Some(v),
        }
    }

    fn write_body(&self, g: &mut Generator) {
        g.add_key_value_group(&[("UnitType", &self.unit_type), ("UnitOwner", &self.owner)]);
        g.add_key_value_group(&[("Level", &self.level), ("Experience", &self.experience)]);
        g.add_key_values("PromotionType", &self.promotions);
        g.add_key_value("UnitAIType", &self.ai_type);
        g.add_key_value("Damage", &self.damage);
        g.add_key_value("FacingDirection", &self.facing);
    }
}
