use super::{
    super::{
        generator::Generator,
        parser::{types::TeamId, FieldError, StructuralError, BEGIN_PLOT, END_PLOT},
    },
    check_aligned, parse_flag, parse_number, parse_variant, City, Unit, WbSection,
};

integer_enum! {
    /// The direction a river flows in along a plot edge.
    CardinalDirection {
        NoDirection = -1,
        North = 0,
        East = 1,
        South = 2,
        West = 3,
    }
}

integer_enum! {
    /// The height of a plot.
    PlotType {
        Peak = 0,
        Hills = 1,
        Flat = 2,
        /// Coast and ocean
        Ocean = 3,
    }
}

const FEATURE_TYPE: &str = "FeatureType";
const FEATURE_VARIETY: &str = "FeatureVariety";

/// A single map tile, owning the units and cities placed on it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Plot {
    /// Column, counted from the left edge
    pub x: u32,
    /// Row, counted from the bottom edge
    pub y: u32,
    /// The text of a sign placed on the plot
    pub landmark: String,
    pub script_data: String,
    /// A river runs along the southern edge
    pub north_of_river: bool,
    pub river_we_direction: Option<CardinalDirection>,
    /// A river runs along the eastern edge
    pub west_of_river: bool,
    pub river_ns_direction: Option<CardinalDirection>,
    pub starting_plot: bool,
    pub bonus_type: String,
    pub improvement_type: String,
    feature_types: Vec<String>,
    feature_varieties: Vec<u32>,
    pub route_type: String,
    pub terrain_type: String,
    pub plot_type: Option<PlotType>,
    pub units: Vec<Unit>,
    pub cities: Vec<City>,
    /// Teams the plot is visible to from the start
    pub team_reveal: Vec<TeamId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlotField {
    X(u32),
    Y(u32),
    Landmark(String),
    ScriptData(String),
    IsNOfRiver(bool),
    RiverWeDirection(CardinalDirection),
    IsWOfRiver(bool),
    RiverNsDirection(CardinalDirection),
    StartingPlot(bool),
    BonusType(String),
    ImprovementType(String),
    FeatureType(String),
    FeatureVariety(u32),
    RouteType(String),
    TerrainType(String),
    PlotType(PlotType),
    TeamReveal(TeamId),
}

impl Plot {
    pub fn new(x: u32, y: u32) -> Self {
        Plot {
            x,
            y,
            ..Default::default()
        }
    }

    /// The features of the plot as (type, variety) pairs.
    pub fn features(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.feature_types
            .iter()
            .map(String::as_str)
            .zip(self.feature_varieties.iter().copied())
    }

    pub fn push_feature(&mut self, feature_type: impl Into<String>, variety: u32) {
        self.feature_types.push(feature_type.into());
        self.feature_varieties.push(variety);
    }

    pub fn clear_features(&mut self) {
        self.feature_types.clear();
        self.feature_varieties.clear();
    }
}

impl WbSection for Plot {
    const BEGIN: &'static str = BEGIN_PLOT;
    const END: &'static str = END_PLOT;

    type Field = PlotField;

    fn parse_field(key: &str, value: &str) -> Result<PlotField, FieldError> {
        Ok(match key {
            "x" => PlotField::X(parse_number(key, value)?),
            "y" => PlotField::Y(parse_number(key, value)?),
            "Landmark" => PlotField::Landmark(value.to_owned()),
            "ScriptData" => PlotField::ScriptData(value.to_owned()),
            "isNOfRiver" => PlotField::IsNOfRiver(parse_flag(value)),
            "RiverWEDirection" => PlotField::RiverWeDirection(parse_variant(key, value)?),
            "isWOfRiver" => PlotField::IsWOfRiver(parse_flag(value)),
            "RiverNSDirection" => PlotField::RiverNsDirection(parse_variant(key, value)?),
            "StartingPlot" => PlotField::StartingPlot(parse_flag(value)),
            "BonusType" => PlotField::BonusType(value.to_owned()),
            "ImprovementType" => PlotField::ImprovementType(value.to_owned()),
            FEATURE_TYPE => PlotField::FeatureType(value.to_owned()),
            FEATURE_VARIETY => PlotField::FeatureVariety(parse_number(key, value)?),
            "RouteType" => PlotField::RouteType(value.to_owned()),
            "TerrainType" => PlotField::TerrainType(value.to_owned()),
            "PlotType" => PlotField::PlotType(parse_variant(key, value)?),
            "TeamReveal" => PlotField::TeamReveal(parse_number(key, value)?),
            _ => return Err(FieldError::UnknownKey(key.to_owned())),
        })
    }

    fn apply(&mut self, field: PlotField) {
        match field {
            PlotField::X(v) => self.x = v,
            PlotField::Y(v) => self.y = v,
            PlotField::Landmark(v) => self.landmark = v,
            PlotField::ScriptData(v) => self.script_data = v,
            PlotField::IsNOfRiver(v) => self.north_of_river = v,
            PlotField::RiverWeDirection(v) => self.river_we_direction = Some(v),
            PlotField::IsWOfRiver(v) => self.west_of_river = v,
            PlotField::RiverNsDirection(v) => self.river_ns_direction = Some(v),
            PlotField::StartingPlot(v) => self.starting_plot = v,
            PlotField::BonusType(v) => self.bonus_type = v,
            PlotField::ImprovementType(v) => self.improvement_type = v,
            PlotField::FeatureType(v) => self.feature_types.push(v),
            PlotField::FeatureVariety(v) => self.feature_varieties.push(v),
            PlotField::RouteType(v) => self.route_type = v,
            PlotField::TerrainType(v) => self.terrain_type = v,
            PlotField::PlotType(v) => self.plot_type = Some(v),
            PlotField::TeamReveal(v) => self.team_reveal.push(v),
        }
    }

    fn finish(&mut self) -> Result<(), StructuralError> {
        check_aligned(
            FEATURE_TYPE,
            self.feature_types.len(),
            FEATURE_VARIETY,
            self.feature_varieties.len(),
        )
    }

    fn write_body(&self, g: &mut Generator) {
        g.add_key_value_group(&[("x", &self.x), ("y", &self.y)]);
        g.add_key_value("Landmark", &self.landmark);
        g.add_key_value("ScriptData", &self.script_data);
        g.add_flag("isNOfRiver", self.north_of_river);
        g.add_key_value("RiverWEDirection", &self.river_we_direction);
        g.add_flag("isWOfRiver", self.west_of_river);
        g.add_key_value("RiverNSDirection", &self.river_ns_direction);
        g.add_key_value("StartingPlot", &self.starting_plot);
        g.add_key_value("BonusType", &self.bonus_type);
        g.add_key_value("ImprovementType", &self.improvement_type);
        for (feature_type, variety) in self.features() {
            g.add_key_value_row(&[(FEATURE_TYPE, &feature_type), (FEATURE_VARIETY, &variety)]);
        }
        g.add_key_value("RouteType", &self.route_type);
        g.add_key_value("TerrainType", &self.terrain_type);
        g.add_key_value("PlotType", &self.plot_type);
        for unit in &self.units {
            unit.write(g);
        }
        for city in &self.cities {
            city.write(g);
        }
        g.add_key_values("TeamReveal", &self.team_reveal);
    }
}
