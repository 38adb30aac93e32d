//! Shared fixtures for the data-layer tests.

use super::loader::read_csv;
use super::model::Dataset;

/// Eight player seasons over three seasons, deliberately out of season order.
/// Row 5 has no `ts_pct`; rows 2 and 5 are undrafted.
pub(crate) const SEASONS_CSV: &str = "\
player_name,team_abbreviation,season,country,draft_number,gp,pts,reb,ast,ts_pct,net_rating
P1,SAS,1998-99,USA,1,50,20.0,10.0,2.0,0.55,5.0
P2,SAS,1996-97,Argentina,57,60,8.0,3.0,2.0,0.60,4.0
P3,LAL,1997-98,USA,Undrafted,10,2.0,1.0,0.5,0.40,-3.0
P4,LAL,1996-97,USA,10,70,12.0,4.0,3.0,0.50,-1.0
P5,SAS,1997-98,France,2,80,15.0,5.0,6.0,0.58,2.0
P6,LAL,1998-99,USA,Undrafted,30,4.0,2.0,1.0,,-6.0
P1,SAS,1997-98,USA,1,82,22.0,11.0,2.5,0.57,7.0
P7,BOS,1996-97,Canada,10,40,6.0,2.0,1.0,0.48,-2.0
";

pub(crate) fn seasons() -> Dataset {
    read_csv(SEASONS_CSV.as_bytes()).unwrap()
}

pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
