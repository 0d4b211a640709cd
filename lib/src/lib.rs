/// Reader and writer for Civilization IV WorldBuilder scenarios.
///
/// ## Getting Started
///
/// The facade for the entire module is the pair of functions
/// [wb_save::parse] and [wb_save::serialize]. The first one turns any
/// [Read](std::io::Read) into a [wb_save::Scenario], the second one turns a
/// [wb_save::Scenario] back into the bytes the game loads.
///
/// ## Round trips
///
/// Every field the parser understands is written back in the order the game
/// writes it, and fields that were absent stay absent. Parsing the output of
/// [wb_save::serialize] yields a tree equal to the one that was serialized.
///
/// ## Example
///
/// ```rust
/// use civ4_studio_lib::wb_save;
///
/// let text = "Version=11\nBeginGame\n\tEra=ERA_ANCIENT\nEndGame\n";
/// let scenario = wb_save::parse(text.as_bytes()).unwrap();
/// assert_eq!(scenario.game.era, "ERA_ANCIENT");
/// assert_eq!(wb_save::serialize(&scenario), text.as_bytes());
/// ```
pub mod wb_save;
