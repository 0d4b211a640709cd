use std::{num::ParseIntError, str::FromStr};

use super::{
    generator::Generator,
    parser::{ConversionError, FieldError, StructuralError, FLAG_VALUE},
};

/// Declares a fieldless enum that the format stores as a plain integer.
/// Integers outside of the declared set are refused with
/// [ConversionError::InvalidVariant].
macro_rules! integer_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[repr(i32)]
        pub enum $name {
            $($(#[$variant_meta])* $variant = $value),+
        }

        impl TryFrom<i32> for $name {
            type Error = $crate::wb_save::parser::ConversionError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err($crate::wb_save::parser::ConversionError::InvalidVariant(
                        value,
                        stringify!($name),
                    )),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value as i32
            }
        }

        impl $crate::wb_save::WbValue for $name {
            fn render(&self) -> Option<String> {
                Some(i32::from(*self).to_string())
            }
        }
    };
}

/// A submodule that provides the [Game] section.
mod game;
pub use game::{Game, GameField};

/// A submodule that provides the [Team] section.
mod team;
pub use team::{Team, TeamField};

/// A submodule that provides the [Player] section.
mod player;
pub use player::{Player, PlayerField, NONE_PLAYER};

/// A submodule that provides the [MapProperties] section.
mod map;
pub use map::{MapField, MapProperties};

/// A submodule that provides the [Plot] section.
mod plot;
pub use plot::{CardinalDirection, Plot, PlotField, PlotType};

/// A submodule that provides the [City] section, nested in plots.
mod city;
pub use city::{City, CityField};

/// A submodule that provides the [Unit] section, nested in plots.
mod unit;
pub use unit::{Direction, Unit, UnitField};

/// One `Begin<X>`...`End<X>` section of the format.
///
/// ## Unpacking
///
/// The parser hands every line of the section to [WbSection::unpack] as a
/// list of key-value pairs. Each pair is first turned into a
/// [WbSection::Field], which is where unknown keys and malformed values get
/// refused, and only once the whole line checks out are the fields applied.
/// A refused line therefore leaves the section exactly as it was.
///
/// ## Writing
///
/// [WbSection::write_body] writes the keys in the fixed order the game
/// expects, relying on the [Generator] to leave out empty values.
pub trait WbSection {
    /// The tag opening the section
    const BEGIN: &'static str;
    /// The tag closing the section
    const END: &'static str;

    /// A single recognized key, with its value already converted.
    type Field;

    /// Looks the key up in the section's grammar and converts the value.
    fn parse_field(key: &str, value: &str) -> Result<Self::Field, FieldError>;

    /// Stores a converted field. Repeated keys append.
    fn apply(&mut self, field: Self::Field);

    /// Applies one line worth of pairs, all or nothing.
    fn unpack(&mut self, pairs: &[(&str, &str)]) -> Result<(), FieldError> {
        let fields = pairs
            .iter()
            .map(|(key, value)| Self::parse_field(key, value))
            .collect::<Result<Vec<_>, _>>()?;
        for field in fields {
            self.apply(field);
        }
        Ok(())
    }

    /// Called when the closing tag is reached, before the section is handed
    /// to its parent.
    fn finish(&mut self) -> Result<(), StructuralError> {
        Ok(())
    }

    /// Writes the keys of the section, without the surrounding tags.
    fn write_body(&self, generator: &mut Generator);

    /// Writes the whole section, tags included.
    fn write(&self, generator: &mut Generator) {
        generator.section(Self::BEGIN, Self::END, |g| self.write_body(g));
    }

    /// Renders just this section.
    fn to_wb_format(&self) -> Vec<u8> {
        let mut generator = Generator::new();
        self.write(&mut generator);
        generator.into_bytes()
    }
}

/// Strictly parses an integer value.
pub(crate) fn parse_number<T: FromStr<Err = ParseIntError>>(
    key: &str,
    value: &str,
) -> Result<T, FieldError> {
    value
        .parse()
        .map_err(|err: ParseIntError| FieldError::conversion(key, value, err.into()))
}

/// `1` is true, anything else is false.
pub(crate) fn parse_flag(value: &str) -> bool {
    value == FLAG_VALUE
}

/// Parses an integer and maps it onto an [integer_enum].
pub(crate) fn parse_variant<T: TryFrom<i32, Error = ConversionError>>(
    key: &str,
    value: &str,
) -> Result<T, FieldError> {
    let raw: i32 = parse_number(key, value)?;
    T::try_from(raw).map_err(|err| FieldError::conversion(key, value, err))
}

/// Checks that two positionally correlated columns line up.
pub(crate) fn check_aligned(
    first: &'static str,
    first_count: usize,
    second: &'static str,
    second_count: usize,
) -> Result<(), StructuralError> {
    if first_count == second_count {
        Ok(())
    } else {
        Err(StructuralError::MisalignedPairs {
            first,
            first_count,
            second,
            second_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("true"));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_number::<i32>("StartYear", "-4000").unwrap(), -4000);
        assert!(parse_number::<u32>("GameTurn", "-1").is_err());
        assert!(parse_number::<u32>("GameTurn", " 1").is_err());
        assert!(matches!(
            parse_number::<u32>("GameTurn", "x"),
            Err(FieldError::Conversion { .. })
        ));
    }

    #[test]
    fn test_variant() {
        assert_eq!(
            parse_variant::<PlotType>("PlotType", "3").unwrap(),
            PlotType::Ocean
        );
        match parse_variant::<PlotType>("PlotType", "7") {
            Err(FieldError::Conversion { error, .. }) => {
                assert!(matches!(error, ConversionError::InvalidVariant(7, "PlotType")))
            }
            _ => panic!("expected a conversion error"),
        }
    }

    #[test]
    fn test_alignment() {
        assert!(check_aligned("a", 2, "b", 2).is_ok());
        assert_eq!(
            check_aligned("a", 2, "b", 1),
            Err(StructuralError::MisalignedPairs {
                first: "a",
                first_count: 2,
                second: "b",
                second_count: 1
            })
        );
    }
}
