use eframe::egui::{self, CollapsingHeader, Color32, RichText, ScrollArea, Slider, Ui};

use courtside::data::presets::{self, PlayerStat};
use courtside::data::schema::ALL;
use courtside::data::{apply, Choice, ColumnKind, Dataset, QueryError, QueryResult};

use crate::color;
use crate::state::{AppState, Span};
use crate::ui::plot::{self, Series};
use crate::ui::table;

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// Team dropdown; `with_all` adds the "All" wildcard on top.
fn team_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    selected: &mut String,
    teams: &[String],
    with_all: bool,
) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected.as_str())
            .show_ui(ui, |ui: &mut Ui| {
                if with_all {
                    ui.selectable_value(selected, ALL.to_string(), ALL);
                }
                for team in teams {
                    ui.selectable_value(selected, team.clone(), team);
                }
            });
    });
}

/// Pair of sliders over a sorted list of seasons.
fn season_span(ui: &mut Ui, label: &str, span: &mut Span, seasons: &[String]) {
    let Some(last) = seasons.len().checked_sub(1) else {
        ui.label(RichText::new("No seasons available.").weak());
        return;
    };
    let name = |v: f64| seasons[(v as usize).min(last)].clone();

    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        ui.add(
            Slider::new(&mut span.from, 0..=last)
                .custom_formatter(|v, _| name(v))
                .text("from"),
        );
        ui.add(
            Slider::new(&mut span.to, 0..=last)
                .custom_formatter(|v, _| name(v))
                .text("to"),
        );
    });
    span.to = span.to.max(span.from);
}

/// Pair of sliders over draft positions `1..=max`.
fn pick_span(ui: &mut Ui, label: &str, picks: &mut (i64, i64), max: i64) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        ui.add(Slider::new(&mut picks.0, 1..=max).text("from"));
        ui.add(Slider::new(&mut picks.1, 1..=max).text("to"));
    });
    picks.1 = picks.1.max(picks.0);
}

fn insight_toggle(ui: &mut Ui, button: &str, shown: &mut bool, text: &str) {
    if ui.button(button).clicked() {
        *shown = !*shown;
    }
    if *shown {
        ui.label(RichText::new(text).italics());
    }
}

fn query_error(ui: &mut Ui, err: &QueryError) {
    log::warn!("panel query failed: {err}");
    ui.colored_label(Color32::RED, format!("Query failed: {err}"));
}

/// Draw `result` with `draw`, or the error in its place.
fn with_result(
    ui: &mut Ui,
    result: Result<QueryResult, QueryError>,
    draw: impl FnOnce(&mut Ui, &QueryResult),
) {
    match result {
        Ok(result) => draw(ui, &result),
        Err(err) => query_error(ui, &err),
    }
}

fn section(ui: &mut Ui, title: &str, body: impl FnOnce(&mut Ui)) {
    CollapsingHeader::new(RichText::new(title).strong().size(16.0))
        .default_open(true)
        .show(ui, body);
    ui.add_space(8.0);
}

// ---------------------------------------------------------------------------
// Central dashboard
// ---------------------------------------------------------------------------

/// Render every analysis section in one scrolling column.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a season table to start exploring  (File → Open…)");
            });
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            explorer_section(ui, state, &dataset);
            birthplace_section(ui, state, &dataset);
            shooting_section(ui, state, &dataset);
            draft_section(ui, state, &dataset);
            undrafted_section(ui, state, &dataset);
            player_section(ui, state);
        });
}

fn explorer_section(ui: &mut Ui, state: &mut AppState, dataset: &Dataset) {
    section(ui, "Explore the data", |ui: &mut Ui| {
        ui.label("Filter by team and season range to browse the underlying rows.");
        team_combo(
            ui,
            "explorer_team",
            "Team",
            &mut state.explorer_team,
            &state.options.teams,
            true,
        );
        season_span(ui, "Seasons", &mut state.explorer_seasons, &state.options.seasons);

        let Some(seasons) = state.explorer_seasons.resolve(&state.options.seasons) else {
            return;
        };
        let filter = presets::explorer_filter(Choice::from_label(&state.explorer_team), &seasons);
        match apply(dataset, &filter) {
            Ok(view) => table::rows_table(ui, &view),
            Err(err) => query_error(ui, &err),
        }
    });
}

fn birthplace_section(ui: &mut Ui, state: &mut AppState, dataset: &Dataset) {
    let country = state.config.home_country.clone();
    section(ui, "1. How has the league's talent pool gone international?", |ui: &mut Ui| {
        ui.label(format!("Share of players born in {country}, per season."));
        with_result(
            ui,
            presets::country_share_by_season(Choice::All, &country).run(dataset),
            |ui, result| {
                plot::line_chart(
                    ui,
                    "share_league",
                    "% of players",
                    &[Series {
                        name: "League",
                        result,
                        color: color::LEAGUE,
                    }],
                );
            },
        );

        ui.separator();
        team_combo(
            ui,
            "share_team",
            "Team",
            &mut state.share_team,
            &state.options.teams,
            false,
        );
        insight_toggle(
            ui,
            "Reveal an interesting insight",
            &mut state.show_spurs_insight,
            "San Antonio (SAS) reached back-to-back Finals in 2012-13 and 2013-14, \
             winning the second. Select them to see how much of that roster came from abroad.",
        );
        let team = state.share_team.clone();
        with_result(
            ui,
            presets::country_share_by_season(Choice::from_label(&team), &country).run(dataset),
            |ui, result| {
                plot::bar_chart(
                    ui,
                    "share_team_chart",
                    "% of players",
                    Series {
                        name: &team,
                        result,
                        color: color::panel_color(1),
                    },
                );
            },
        );
    });
}

fn shooting_section(ui: &mut Ui, state: &mut AppState, dataset: &Dataset) {
    section(ui, "2. Shooting efficiency over time", |ui: &mut Ui| {
        ui.label("Average true shooting percentage per season, league-wide.");
        let league = presets::true_shooting_by_season(Choice::All).run(dataset);
        let league = match league {
            Ok(result) => result,
            Err(err) => {
                query_error(ui, &err);
                return;
            }
        };
        plot::line_chart(
            ui,
            "ts_league",
            "True shooting %",
            &[Series {
                name: "League average",
                result: &league,
                color: color::LEAGUE,
            }],
        );

        ui.separator();
        team_combo(ui, "ts_team", "Team", &mut state.ts_team, &state.options.teams, false);
        let team = state.ts_team.clone();
        with_result(
            ui,
            presets::true_shooting_by_season(Choice::from_label(&team)).run(dataset),
            |ui, result| {
                plot::line_chart(
                    ui,
                    "ts_team_chart",
                    "True shooting %",
                    &[Series {
                        name: &team,
                        result,
                        color: color::panel_color(2),
                    }],
                );
            },
        );

        ui.separator();
        ui.label("Compare one team against the league average.");
        insight_toggle(
            ui,
            "Suggest something to explore",
            &mut state.show_warriors_tip,
            "Try Golden State (GSW) during their five straight Finals runs, 2014-15 to 2018-19.",
        );
        team_combo(
            ui,
            "ts_compare_team",
            "Team",
            &mut state.ts_compare_team,
            &state.options.teams,
            false,
        );
        let team = state.ts_compare_team.clone();
        with_result(
            ui,
            presets::true_shooting_by_season(Choice::from_label(&team)).run(dataset),
            |ui, result| {
                plot::line_chart(
                    ui,
                    "ts_compare_chart",
                    "True shooting %",
                    &[
                        Series {
                            name: "League average",
                            result: &league,
                            color: color::LEAGUE,
                        },
                        Series {
                            name: &team,
                            result,
                            color: color::HIGHLIGHT,
                        },
                    ],
                );
            },
        );
    });
}

fn draft_section(ui: &mut Ui, state: &mut AppState, dataset: &Dataset) {
    let max_pick = state.config.max_draft_pick;
    section(ui, "3. How does draft position relate to success?", |ui: &mut Ui| {
        ui.label("Average points per game by draft position. Undrafted players are left out.");
        pick_span(ui, "Draft picks", &mut state.points_picks, max_pick);
        team_combo(
            ui,
            "points_team",
            "Team",
            &mut state.points_team,
            &state.options.teams,
            true,
        );
        let picks = state.points_picks.0..=state.points_picks.1;
        with_result(
            ui,
            presets::points_by_draft_pick(Choice::from_label(&state.points_team), &picks)
                .run(dataset),
            |ui, result| {
                plot::bar_chart(
                    ui,
                    "draft_points",
                    "Points per game",
                    Series {
                        name: "Average points",
                        result,
                        color: color::panel_color(3),
                    },
                );
            },
        );

        ui.separator();
        ui.label(
            "Net rating is how many points a team wins or loses by per 100 possessions \
             with the player on the floor. Every player season counts equally, so most \
             averages sit below zero.",
        );
        pick_span(ui, "Draft picks", &mut state.net_picks, max_pick);
        team_combo(ui, "net_team", "Team", &mut state.net_team, &state.options.teams, true);
        insight_toggle(
            ui,
            "Reveal an interesting insight",
            &mut state.show_ginobili_insight,
            "Only a few draft positions average a positive net rating: the first and third \
             picks, and the 57th. The 57th is Manu Ginobili (1999), who won four titles \
             over sixteen seasons in San Antonio.",
        );
        let picks = state.net_picks.0..=state.net_picks.1;
        with_result(
            ui,
            presets::net_rating_by_draft_pick(Choice::from_label(&state.net_team), &picks)
                .run(dataset),
            |ui, result| {
                plot::bar_chart(
                    ui,
                    "draft_net",
                    "Net rating",
                    Series {
                        name: "Average net rating",
                        result,
                        color: color::panel_color(4),
                    },
                );
            },
        );
    });
}

fn undrafted_section(ui: &mut Ui, state: &mut AppState, dataset: &Dataset) {
    section(ui, "4. Undrafted players over time", |ui: &mut Ui| {
        ui.label("Total games played by players who were never drafted.");
        season_span(
            ui,
            "Seasons",
            &mut state.undrafted_seasons,
            &state.options.undrafted_seasons,
        );
        team_combo(
            ui,
            "undrafted_team",
            "Team",
            &mut state.undrafted_team,
            &state.options.teams,
            true,
        );
        let Some(seasons) = state.undrafted_seasons.resolve(&state.options.undrafted_seasons)
        else {
            return;
        };
        with_result(
            ui,
            presets::undrafted_games_by_season(Choice::from_label(&state.undrafted_team), &seasons)
                .run(dataset),
            |ui, result| {
                plot::line_chart(
                    ui,
                    "undrafted_games",
                    "Games played",
                    &[Series {
                        name: "Undrafted players",
                        result,
                        color: color::panel_color(5),
                    }],
                );
            },
        );
    });
}

fn player_section(ui: &mut Ui, state: &mut AppState) {
    section(ui, "5. Your favourite player over time", |ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Player");
            egui::ComboBox::from_id_salt("player_select")
                .selected_text(state.player.as_str())
                .height(320.0)
                .show_ui(ui, |ui: &mut Ui| {
                    for player in &state.options.players {
                        ui.selectable_value(&mut state.player, player.clone(), player);
                    }
                });
        });

        let series = match state.player_series() {
            Ok(series) => series,
            Err(err) => {
                query_error(ui, &err);
                return;
            }
        };
        let palette = color::generate_palette(PlayerStat::ALL.len());
        for ((stat, result), colour) in series.iter().zip(palette) {
            ui.label(stat.title());
            plot::line_chart(
                ui,
                &format!("player_{}", stat.column()),
                stat.title(),
                &[Series {
                    name: &state.player,
                    result,
                    color: colour,
                }],
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – dataset summary
// ---------------------------------------------------------------------------

/// Render the left panel describing the loaded table.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Dataset");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    if let Some(path) = &state.source {
        ui.label(RichText::new(path.display().to_string()).monospace());
    }
    ui.label(format!("{} player seasons", dataset.len()));
    if let (Some(first), Some(last)) = (state.options.seasons.first(), state.options.seasons.last())
    {
        ui.label(format!("Seasons {first} to {last}"));
    }
    ui.label(format!(
        "{} teams, {} players",
        state.options.teams.len(),
        state.options.players.len()
    ));
    ui.separator();

    ui.strong("Columns");
    ScrollArea::vertical()
        .id_salt("columns_list")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for column in dataset.iter_columns() {
                let kind = match column.kind() {
                    ColumnKind::Empty => "empty",
                    ColumnKind::Numeric => "numeric",
                    ColumnKind::Text => "text",
                    ColumnKind::Mixed => "mixed",
                };
                ui.label(format!("{}  ({kind})", column.name()));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dataset.is_some() && !state.player.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export player series…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} player seasons, {} columns",
                ds.len(),
                ds.columns().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open season table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export player series")
        .add_filter("JSON", &["json"])
        .set_file_name(format!("{}.json", state.player))
        .save_file();

    if let Some(path) = file {
        match state.export_player_series(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
