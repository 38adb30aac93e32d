//! Column names of the player-season table.

pub const PLAYER_NAME: &str = "player_name";
pub const TEAM: &str = "team_abbreviation";
pub const SEASON: &str = "season";
pub const COUNTRY: &str = "country";
pub const DRAFT_NUMBER: &str = "draft_number";
pub const GAMES_PLAYED: &str = "gp";
pub const POINTS: &str = "pts";
pub const REBOUNDS: &str = "reb";
pub const ASSISTS: &str = "ast";
pub const TRUE_SHOOTING: &str = "ts_pct";
pub const NET_RATING: &str = "net_rating";

/// Every source table must carry at least these columns.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    PLAYER_NAME,
    TEAM,
    SEASON,
    COUNTRY,
    DRAFT_NUMBER,
    GAMES_PLAYED,
    POINTS,
    REBOUNDS,
    ASSISTS,
    TRUE_SHOOTING,
    NET_RATING,
];

/// Marker stored in the draft-number column for players who were never drafted.
pub const UNDRAFTED: &str = "Undrafted";

/// Dropdown label that means "no constraint".
pub const ALL: &str = "All";
