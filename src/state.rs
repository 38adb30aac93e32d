use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use courtside::config::Config;
use courtside::data::presets::{self, PlayerStat};
use courtside::data::schema::{PLAYER_NAME, SEASON, TEAM};
use courtside::data::{apply, Choice, Dataset, QueryError, QueryResult, Value};

// ---------------------------------------------------------------------------
// Option lists
// ---------------------------------------------------------------------------

/// Dropdown and slider choices, derived once per loaded dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub teams: Vec<String>,
    pub seasons: Vec<String>,
    /// Seasons in which at least one undrafted player appears.
    pub undrafted_seasons: Vec<String>,
    pub players: Vec<String>,
}

fn labels<'a>(values: impl IntoIterator<Item = &'a Value>) -> Vec<String> {
    values
        .into_iter()
        .filter(|v| !v.is_null())
        .map(|v| v.to_string())
        .collect()
}

impl Options {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, QueryError> {
        let undrafted = apply(dataset, &presets::undrafted_filter())?;
        Ok(Options {
            teams: labels(&dataset.distinct_values(TEAM)?),
            seasons: labels(&dataset.distinct_values(SEASON)?),
            undrafted_seasons: labels(&undrafted.distinct_values(SEASON)?),
            players: labels(&dataset.distinct_values(PLAYER_NAME)?),
        })
    }
}

/// Two-ended selection over a sorted option list, stored as indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    pub fn full(options: &[String]) -> Self {
        Span {
            from: 0,
            to: options.len().saturating_sub(1),
        }
    }

    /// The selected labels as an inclusive range, `None` when there are no options.
    pub fn resolve(&self, options: &[String]) -> Option<RangeInclusive<String>> {
        let last = options.len().checked_sub(1)?;
        let from = options[self.from.min(last)].clone();
        let to = options[self.to.min(last)].clone();
        Some(from..=to)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Only selections live here. Every chart is recomputed from the shared
/// dataset on demand, so no panel can see another panel's intermediate rows.
pub struct AppState {
    pub config: Config,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Arc<Dataset>>,
    pub source: Option<PathBuf>,
    pub options: Options,

    // ---- Data explorer ----
    pub explorer_team: String,
    pub explorer_seasons: Span,

    // ---- Birthplace ----
    pub share_team: String,
    pub show_spurs_insight: bool,

    // ---- Shooting ----
    pub ts_team: String,
    pub ts_compare_team: String,
    pub show_warriors_tip: bool,

    // ---- Draft ----
    pub points_team: String,
    pub points_picks: (i64, i64),
    pub net_team: String,
    pub net_picks: (i64, i64),
    pub show_ginobili_insight: bool,

    // ---- Undrafted ----
    pub undrafted_team: String,
    pub undrafted_seasons: Span,

    // ---- Player ----
    pub player: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let picks = (1, config.max_draft_pick);
        Self {
            config,
            dataset: None,
            source: None,
            options: Options::default(),
            explorer_team: Choice::All.label(),
            explorer_seasons: Span::default(),
            share_team: String::new(),
            show_spurs_insight: false,
            ts_team: String::new(),
            ts_compare_team: String::new(),
            show_warriors_tip: false,
            points_team: Choice::All.label(),
            points_picks: picks,
            net_team: Choice::All.label(),
            net_picks: picks,
            show_ginobili_insight: false,
            undrafted_team: Choice::All.label(),
            undrafted_seasons: Span::default(),
            player: String::new(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and reset every selection to its default.
    pub fn set_dataset(&mut self, dataset: Dataset, source: PathBuf) -> Result<(), QueryError> {
        let options = Options::from_dataset(&dataset)?;
        let first_team = options.teams.first().cloned().unwrap_or_default();

        *self = Self {
            explorer_seasons: Span::full(&options.seasons),
            undrafted_seasons: Span::full(&options.undrafted_seasons),
            share_team: first_team.clone(),
            ts_team: first_team.clone(),
            ts_compare_team: first_team,
            player: options.players.first().cloned().unwrap_or_default(),
            dataset: Some(Arc::new(dataset)),
            source: Some(source),
            options,
            ..Self::new(self.config.clone())
        };
        Ok(())
    }

    /// Load `path`, keeping the current dataset if it fails.
    pub fn open_file(&mut self, path: &Path) {
        match courtside::data::loader::load_file(path) {
            Ok(dataset) => {
                if let Err(e) = self.set_dataset(dataset, path.to_path_buf()) {
                    log::error!("Loaded {} but cannot index it: {e}", path.display());
                    self.status_message = Some(format!("Error: {e}"));
                }
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Per-season lines of the selected player, one per charted statistic.
    pub fn player_series(&self) -> Result<Vec<(PlayerStat, QueryResult)>, QueryError> {
        let Some(dataset) = &self.dataset else {
            return Ok(Vec::new());
        };
        PlayerStat::ALL
            .iter()
            .map(|&stat| Ok((stat, presets::player_stat_by_season(&self.player, stat).run(dataset)?)))
            .collect()
    }

    /// Write the selected player's lines to a JSON file.
    pub fn export_player_series(&self, path: &Path) -> Result<()> {
        let series: Vec<QueryResult> = self
            .player_series()
            .context("computing player series")?
            .into_iter()
            .map(|(_, result)| result)
            .collect();
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &series)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} series for {} to {}", series.len(), self.player, path.display());
        Ok(())
    }
}
