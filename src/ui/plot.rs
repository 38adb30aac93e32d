use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use courtside::data::schema::{DRAFT_NUMBER, SEASON};
use courtside::data::{QueryResult, Value};

const CHART_HEIGHT: f32 = 220.0;

/// One named series of a chart.
pub struct Series<'a> {
    pub name: &'a str,
    pub result: &'a QueryResult,
    pub color: Color32,
}

// ---------------------------------------------------------------------------
// Key placement
// ---------------------------------------------------------------------------

/// Horizontal position of a group key: seasons such as `"1996-97"` sit at
/// their starting year, numbers at their value, anything else at `position`.
pub fn key_to_x(key: &Value, position: usize) -> f64 {
    match key {
        Value::Integer(i) => *i as f64,
        Value::Float(f) => *f,
        Value::String(s) => season_start(s).map(f64::from).unwrap_or(position as f64),
        Value::Null => position as f64,
    }
}

fn season_start(season: &str) -> Option<i32> {
    let (year, _) = season.split_once('-')?;
    if year.len() != 4 {
        return None;
    }
    year.parse().ok()
}

fn plot_points(result: &QueryResult) -> Vec<[f64; 2]> {
    result
        .points
        .iter()
        .enumerate()
        .map(|(i, (key, value))| [key_to_x(key, i), *value])
        .collect()
}

fn axis_label(key: &str) -> String {
    match key {
        SEASON => "Season (starting year)".to_string(),
        DRAFT_NUMBER => "Draft position".to_string(),
        other => other.to_string(),
    }
}

fn empty_note(ui: &mut Ui, series: &[Series<'_>]) {
    if series.iter().all(|s| s.result.is_empty()) {
        ui.label(RichText::new("No matching rows.").weak());
    }
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Line chart of one or more series sharing the same key column.
pub fn line_chart(ui: &mut Ui, id: &str, y_label: &str, series: &[Series<'_>]) {
    empty_note(ui, series);
    let x_label = series
        .first()
        .map(|s| axis_label(&s.result.key))
        .unwrap_or_default();

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for s in series {
                let line = Line::new(PlotPoints::from(plot_points(s.result)))
                    .name(s.name)
                    .color(s.color)
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}

/// Bar chart of a single series.
pub fn bar_chart(ui: &mut Ui, id: &str, y_label: &str, series: Series<'_>) {
    empty_note(ui, std::slice::from_ref(&series));
    let bars: Vec<Bar> = plot_points(series.result)
        .into_iter()
        .map(|[x, y]| Bar::new(x, y).width(0.8))
        .collect();

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(axis_label(&series.result.key))
        .y_axis_label(y_label)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(series.name).color(series.color));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seasons_plot_at_starting_year() {
        assert_eq!(key_to_x(&Value::from("1996-97"), 0), 1996.0);
        assert_eq!(key_to_x(&Value::from("2022-23"), 5), 2022.0);
    }

    #[test]
    fn test_numbers_plot_at_value() {
        assert_eq!(key_to_x(&Value::Integer(57), 3), 57.0);
        assert_eq!(key_to_x(&Value::Float(2.5), 3), 2.5);
    }

    #[test]
    fn test_other_keys_plot_at_position() {
        assert_eq!(key_to_x(&Value::from("SAS"), 4), 4.0);
        assert_eq!(key_to_x(&Value::from("96-97"), 1), 1.0);
        assert_eq!(key_to_x(&Value::Null, 2), 2.0);
    }

    #[test]
    fn test_plot_points_keep_result_order() {
        let result = QueryResult {
            key: SEASON.into(),
            label: "mean pts".into(),
            points: vec![(Value::from("1996-97"), 1.0), (Value::from("1997-98"), 2.0)],
        };
        assert_eq!(plot_points(&result), vec![[1996.0, 1.0], [1997.0, 2.0]]);
        assert_eq!(axis_label(&result.key), "Season (starting year)");
    }
}
