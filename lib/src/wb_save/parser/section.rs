use std::fmt;

/// The prefix of the only key-value line allowed outside of a section.
pub const VERSION_PREFIX: &str = "Version=";
/// The version assumed when a file carries no `Version=` line.
pub const DEFAULT_VERSION: i32 = 11;
/// Lines starting with this are ignored wherever they appear.
pub const COMMENT_PREFIX: &str = "#";

pub const BEGIN_GAME: &str = "BeginGame";
pub const END_GAME: &str = "EndGame";
pub const BEGIN_TEAM: &str = "BeginTeam";
pub const END_TEAM: &str = "EndTeam";
pub const BEGIN_PLAYER: &str = "BeginPlayer";
pub const END_PLAYER: &str = "EndPlayer";
pub const BEGIN_MAP: &str = "BeginMap";
pub const END_MAP: &str = "EndMap";
pub const BEGIN_PLOT: &str = "BeginPlot";
pub const END_PLOT: &str = "EndPlot";
pub const BEGIN_CITY: &str = "BeginCity";
pub const END_CITY: &str = "EndCity";
pub const BEGIN_UNIT: &str = "BeginUnit";
pub const END_UNIT: &str = "EndUnit";

/// A structural tag, one of the `Begin<X>`/`End<X>` lines.
/// Tags are case sensitive and only recognized when they make up the whole
/// (trimmed) line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTag {
    BeginGame,
    EndGame,
    BeginTeam,
    EndTeam,
    BeginPlayer,
    EndPlayer,
    BeginMap,
    EndMap,
    BeginPlot,
    EndPlot,
    BeginCity,
    EndCity,
    BeginUnit,
    EndUnit,
}

impl SectionTag {
    /// Recognizes a trimmed line as a tag.
    pub fn from_line(line: &str) -> Option<Self> {
        Some(match line {
            BEGIN_GAME => SectionTag::BeginGame,
            END_GAME => SectionTag::EndGame,
            BEGIN_TEAM => SectionTag::BeginTeam,
            END_TEAM => SectionTag::EndTeam,
            BEGIN_PLAYER => SectionTag::BeginPlayer,
            END_PLAYER => SectionTag::EndPlayer,
            BEGIN_MAP => SectionTag::BeginMap,
            END_MAP => SectionTag::EndMap,
            BEGIN_PLOT => SectionTag::BeginPlot,
            END_PLOT => SectionTag::EndPlot,
            BEGIN_CITY => SectionTag::BeginCity,
            END_CITY => SectionTag::EndCity,
            BEGIN_UNIT => SectionTag::BeginUnit,
            END_UNIT => SectionTag::EndUnit,
            _ => return None,
        })
    }

    /// The literal text of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionTag::BeginGame => BEGIN_GAME,
            SectionTag::EndGame => END_GAME,
            SectionTag::BeginTeam => BEGIN_TEAM,
            SectionTag::EndTeam => END_TEAM,
            SectionTag::BeginPlayer => BEGIN_PLAYER,
            SectionTag::EndPlayer => END_PLAYER,
            SectionTag::BeginMap => BEGIN_MAP,
            SectionTag::EndMap => END_MAP,
            SectionTag::BeginPlot => BEGIN_PLOT,
            SectionTag::EndPlot => END_PLOT,
            SectionTag::BeginCity => BEGIN_CITY,
            SectionTag::EndCity => END_CITY,
            SectionTag::BeginUnit => BEGIN_UNIT,
            SectionTag::EndUnit => END_UNIT,
        }
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for tag in [
            SectionTag::BeginGame,
            SectionTag::EndPlot,
            SectionTag::BeginCity,
            SectionTag::EndUnit,
        ] {
            assert_eq!(SectionTag::from_line(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(SectionTag::from_line("begingame"), None);
        assert_eq!(SectionTag::from_line("BeginGame=1"), None);
        assert_eq!(SectionTag::from_line("EndGame"), Some(SectionTag::EndGame));
    }
}
