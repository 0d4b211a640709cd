use super::{
    super::{
        generator::Generator,
        parser::{FieldError, BEGIN_MAP, END_MAP},
    },
    parse_flag, parse_number, WbSection,
};

/// The global properties of the map. Unlike every other section its keys
/// are lower case and contain spaces.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapProperties {
    pub grid_width: Option<u32>,
    pub grid_height: Option<u32>,
    pub top_latitude: Option<i32>,
    pub bottom_latitude: Option<i32>,
    pub wrap_x: Option<i32>,
    pub wrap_y: Option<i32>,
    pub world_size: String,
    pub climate: String,
    pub sea_level: String,
    pub num_plots_written: Option<u32>,
    pub num_signs_written: Option<u32>,
    pub randomize_resources: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapField {
    GridWidth(u32),
    GridHeight(u32),
    TopLatitude(i32),
    BottomLatitude(i32),
    WrapX(i32),
    WrapY(i32),
    WorldSize(String),
    Climate(String),
    SeaLevel(String),
    NumPlotsWritten(u32),
    NumSignsWritten(u32),
    RandomizeResources(bool),
}

impl WbSection for MapProperties {
    const BEGIN: &'static str = BEGIN_MAP;
    const END: &'static str = END_MAP;

    type Field = MapField;

    fn parse_field(key: &str, value: &str) -> Result<MapField, FieldError> {
        Ok(match key {
            "grid width" => MapField::GridWidth(parse_number(key, value)?),
            "grid height" => MapField::GridHeight(parse_number(key, value)?),
            "top latitude" => MapField::TopLatitude(parse_number(key, value)?),
            "bottom latitude" => MapField::BottomLatitude(parse_number(key, value)?),
            "wrap X" => MapField::WrapX(parse_number(key, value)?),
            "wrap Y" => MapField::WrapY(parse_number(key, value)?),
            "world size" => MapField::WorldSize(value.to_owned()),
            "climate" => MapField::Climate(value.to_owned()),
            "sealevel" => MapField::SeaLevel(value.to_owned()),
            "num plots written" => MapField::NumPlotsWritten(parse_number(key, value)?),
            "num signs written" => MapField::NumSignsWritten(parse_number(key, value)?),
            "Randomize Resources" => MapField::RandomizeResources(parse_flag(value)),
            _ => return Err(FieldError::UnknownKey(key.to_owned())),
        })
    }

    fn apply(&mut self, field: MapField) {
        match field {
            MapField::GridWidth(v) => self.grid_width = Some(v),
            MapField::GridHeight(v) => self.grid_height = Some(v),
            MapField::TopLatitude(v) => self.top_latitude = Some(v),
            MapField::BottomLatitude(v) => self.bottom_latitude = Some(v),
            MapField::WrapX(v) => self.wrap_x = Some(v),
            MapField::WrapY(v) => self.wrap_y = Some(v),
            MapField::WorldSize(v) => self.world_size = v,
            MapField::Climate(v) => self.climate = v,
            MapField::SeaLevel(v) => self.sea_level = v,
            MapField::NumPlotsWritten(v) => self.num_plots_written = Some(v),
            MapField::NumSignsWritten(v) => self.num_signs_written = Some(v),
            MapField::RandomizeResources(v) => self.randomize_resources = v,
        }
    }

    fn write_body(&self, g: &mut Generator) {
        g.add_key_value("grid width", &self.grid_width);
        g.add_key_value("grid height", &self.grid_height);
        g.add_key_value("top latitude", &self.top_latitude);
        g.add_key_value("bottom latitude", &self.bottom_latitude);
        g.add_key_value("wrap X", &self.wrap_x);
        g.add_key_value("wrap Y", &self.wrap_y);
        g.add_key_value("world size", &self.world_size);
        g.add_key_value("climate", &self.climate);
        g.add_key_value("sealevel", &self.sea_level);
        g.add_key_value("num plots written", &self.num_plots_written);
        g.add_key_value("num signs written", &self.num_signs_written);
        g.add_key_value("Randomize Resources", &self.randomize_resources);
    }
}
