/// Commonly used types within the parser
pub mod types;

/// A submodule that provides the structural tags of the format, like
/// [section::BEGIN_GAME], and the [SectionTag] recognizer.
mod section;
pub use section::{
    SectionTag, BEGIN_CITY, BEGIN_GAME, BEGIN_MAP, BEGIN_PLAYER, BEGIN_PLOT, BEGIN_TEAM, BEGIN_UNIT,
    COMMENT_PREFIX, DEFAULT_VERSION, END_CITY, END_GAME, END_MAP, END_PLAYER, END_PLOT, END_TEAM,
    END_UNIT, VERSION_PREFIX,
};

/// A submodule that splits a single line into key-value pairs.
mod line;
pub use line::{tokenize_line, FLAG_VALUE};

/// A submodule that provides the [SectionReader], the state machine that
/// routes lines to the section that is currently open.
mod section_reader;
pub use section_reader::SectionReader;

mod error;
pub use error::{ConversionError, FieldError, ParsingError, SectionError, StructuralError};
