//! The dashboard's panels as declarative queries.
//!
//! Each function turns the current widget selections into a [`Query`]; the
//! UI runs it against the shared dataset and plots the result as-is.

use std::ops::RangeInclusive;

use super::aggregate::AggSpec;
use super::filter::{Choice, FilterSpec, Predicate};
use super::model::Value;
use super::pipeline::Query;
use super::schema::{
    ASSISTS, COUNTRY, DRAFT_NUMBER, GAMES_PLAYED, NET_RATING, PLAYER_NAME, POINTS, REBOUNDS,
    SEASON, TEAM, TRUE_SHOOTING, UNDRAFTED,
};

/// Per-game statistics charted on the player panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStat {
    Points,
    Rebounds,
    Assists,
    TrueShooting,
}

impl PlayerStat {
    pub const ALL: [PlayerStat; 4] = [
        PlayerStat::Points,
        PlayerStat::Rebounds,
        PlayerStat::Assists,
        PlayerStat::TrueShooting,
    ];

    pub fn column(self) -> &'static str {
        match self {
            PlayerStat::Points => POINTS,
            PlayerStat::Rebounds => REBOUNDS,
            PlayerStat::Assists => ASSISTS,
            PlayerStat::TrueShooting => TRUE_SHOOTING,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PlayerStat::Points => "Points per game",
            PlayerStat::Rebounds => "Rebounds per game",
            PlayerStat::Assists => "Assists per game",
            PlayerStat::TrueShooting => "True shooting percentage",
        }
    }
}

/// Rows shown in the data explorer table.
pub fn explorer_filter(team: Choice, seasons: &RangeInclusive<String>) -> FilterSpec {
    FilterSpec::new()
        .between(SEASON, seasons.start().as_str(), seasons.end().as_str())
        .equals(TEAM, team)
}

/// Percentage of players from `country` per season, league-wide or for one team.
pub fn country_share_by_season(team: Choice, country: &str) -> Query {
    Query::new(
        FilterSpec::new().equals(TEAM, team),
        AggSpec::percent(
            SEASON,
            Predicate::Equals {
                column: COUNTRY.to_string(),
                choice: Choice::Only(Value::from(country)),
            },
        ),
    )
}

/// Average true shooting percentage per season.
pub fn true_shooting_by_season(team: Choice) -> Query {
    Query::new(
        FilterSpec::new().equals(TEAM, team),
        AggSpec::mean(SEASON, TRUE_SHOOTING),
    )
}

fn by_draft_pick(team: Choice, picks: &RangeInclusive<i64>, stat: &str) -> Query {
    Query::new(
        FilterSpec::new()
            .excluding(DRAFT_NUMBER, UNDRAFTED)
            .between(DRAFT_NUMBER, *picks.start(), *picks.end())
            .equals(TEAM, team),
        AggSpec::mean(DRAFT_NUMBER, stat),
    )
}

/// Average points per game for each draft position in `picks`.
pub fn points_by_draft_pick(team: Choice, picks: &RangeInclusive<i64>) -> Query {
    by_draft_pick(team, picks, POINTS)
}

/// Average net rating for each draft position in `picks`.
pub fn net_rating_by_draft_pick(team: Choice, picks: &RangeInclusive<i64>) -> Query {
    by_draft_pick(team, picks, NET_RATING)
}

/// Rows of players who were never drafted.
pub fn undrafted_filter() -> FilterSpec {
    FilterSpec::new().equals(DRAFT_NUMBER, Choice::Only(Value::from(UNDRAFTED)))
}

/// Total games played by undrafted players per season.
pub fn undrafted_games_by_season(team: Choice, seasons: &RangeInclusive<String>) -> Query {
    Query::new(
        undrafted_filter()
            .between(SEASON, seasons.start().as_str(), seasons.end().as_str())
            .equals(TEAM, team),
        AggSpec::sum(SEASON, GAMES_PLAYED),
    )
}

/// One player's per-season line for `stat`.
pub fn player_stat_by_season(player: &str, stat: PlayerStat) -> Query {
    Query::new(
        FilterSpec::new().equals(PLAYER_NAME, Choice::Only(Value::from(player))),
        AggSpec::mean(SEASON, stat.column()),
    )
}
