use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use courtside::data::DatasetView;

const ROW_HEIGHT: f32 = 18.0;

/// Virtualized table of the rows selected by `view`, every column shown.
pub fn rows_table(ui: &mut Ui, view: &DatasetView<'_>) {
    let dataset = view.dataset();
    let columns: Vec<_> = dataset.iter_columns().collect();

    ui.label(format!("{} of {} rows", view.len(), dataset.len()));

    ScrollArea::horizontal()
        .id_salt("explorer_hscroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(true)
                .max_scroll_height(320.0)
                .columns(TableColumn::auto().at_least(40.0), columns.len())
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    for col in &columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(col.name());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, view.len(), |mut row| {
                        let source_row = view.rows()[row.index()];
                        for col in &columns {
                            row.col(|ui: &mut Ui| {
                                ui.label(col.values()[source_row].to_string());
                            });
                        }
                    });
                });
        });
}
