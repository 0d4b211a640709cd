/// A type alias for a player index. Players are numbered in the order of
/// their `BeginPlayer` sections, starting at 0.
pub type PlayerId = u32;

/// A type alias for a team index, as written in `TeamID`.
pub type TeamId = u32;

// ids are never resolved against the sections they point to
