//! Write a synthetic player-season table with the columns the dashboard needs.
//!
//! `generate_sample [OUT]`; `.csv` (default `sample_seasons.csv`) or `.parquet`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use courtside::data::schema;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const TEAMS: [&str; 10] = [
    "BOS", "CHI", "DAL", "DEN", "GSW", "LAL", "MIA", "NYK", "SAS", "TOR",
];
const FOREIGN: [&str; 6] = ["France", "Spain", "Argentina", "Canada", "Serbia", "Australia"];
const FIRST_SEASON: i32 = 1996;
const LAST_SEASON: i32 = 2022;
const PLAYERS: usize = 400;

/// One generated row.
struct Row {
    player_name: String,
    team: &'static str,
    season: String,
    country: &'static str,
    draft_number: String,
    gp: i64,
    pts: f64,
    reb: f64,
    ast: f64,
    ts_pct: f64,
    net_rating: f64,
}

fn season_label(start: i32) -> String {
    format!("{start}-{:02}", (start + 1) % 100)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let span = (LAST_SEASON - FIRST_SEASON + 1) as usize;
    let mut rows = Vec::new();

    for id in 0..PLAYERS {
        let rookie = FIRST_SEASON + rng.below(span) as i32;
        let career = 1 + rng.below(12) as i32;
        // International share grows over the years.
        let foreign_odds = 0.08 + 0.2 * f64::from(rookie - FIRST_SEASON) / span as f64;
        let country = if rng.next_f64() < foreign_odds {
            FOREIGN[rng.below(FOREIGN.len())]
        } else {
            "USA"
        };
        let pick = (rng.next_f64() >= 0.2).then(|| 1 + rng.below(60) as i64);
        let talent = match pick {
            Some(p) => 16.0 - 0.2 * p as f64,
            None => 5.0,
        };
        let mut team = TEAMS[rng.below(TEAMS.len())];

        for season in rookie..=(rookie + career - 1).min(LAST_SEASON) {
            if rng.next_f64() < 0.25 {
                team = TEAMS[rng.below(TEAMS.len())];
            }
            let pts = rng.gauss(talent, 3.0).max(0.0);
            rows.push(Row {
                player_name: format!("Player {id:03}"),
                team,
                season: season_label(season),
                country,
                draft_number: pick.map_or_else(|| schema::UNDRAFTED.to_string(), |p| p.to_string()),
                gp: 1 + rng.below(82) as i64,
                pts: round1(pts),
                reb: round1(rng.gauss(pts * 0.4, 1.0).max(0.0)),
                ast: round1(rng.gauss(pts * 0.2, 0.8).max(0.0)),
                ts_pct: (rng.gauss(0.52, 0.06) * 1000.0).round() / 1000.0,
                net_rating: round1(rng.gauss(talent * 0.4 - 4.0, 5.0)),
            });
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(schema::REQUIRED_COLUMNS)?;
    for r in rows {
        writer.write_record([
            r.player_name.clone(),
            r.team.to_string(),
            r.season.clone(),
            r.country.to_string(),
            r.draft_number.clone(),
            r.gp.to_string(),
            r.pts.to_string(),
            r.reb.to_string(),
            r.ast.to_string(),
            r.ts_pct.to_string(),
            r.net_rating.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    fn text(rows: &[Row], f: impl Fn(&Row) -> &str) -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    }
    fn float(rows: &[Row], f: impl Fn(&Row) -> f64) -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    }

    let columns: Vec<ArrayRef> = vec![
        text(rows, |r| r.player_name.as_str()),
        text(rows, |r| r.team),
        text(rows, |r| r.season.as_str()),
        text(rows, |r| r.country),
        text(rows, |r| r.draft_number.as_str()),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.gp).collect::<Vec<_>>())),
        float(rows, |r| r.pts),
        float(rows, |r| r.reb),
        float(rows, |r| r.ast),
        float(rows, |r| r.ts_pct),
        float(rows, |r| r.net_rating),
    ];
    let fields: Vec<Field> = schema::REQUIRED_COLUMNS
        .iter()
        .zip(&columns)
        .map(|(name, col)| Field::new(*name, col.data_type().clone(), false))
        .collect();
    let arrow_schema = Arc::new(Schema::new(fields));

    let batch = RecordBatch::try_new(arrow_schema.clone(), columns)?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, arrow_schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_seasons.csv".to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => write_csv(path, &rows)?,
        Some("parquet") | Some("pq") => write_parquet(path, &rows)?,
        _ => bail!("output must end in .csv or .parquet: {output}"),
    }

    println!("Wrote {} player seasons to {output}", rows.len());
    Ok(())
}
