use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::session::{file_name, Command};
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – actions and selected files
// ---------------------------------------------------------------------------

/// Render the left panel: the three actions, then the selection.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Options");
    ui.separator();

    let idle = state.status == Status::Ready;
    let has_files = !state.session.files().is_empty();

    ui.add_enabled_ui(idle, |ui: &mut Ui| {
        egui::Grid::new("actions")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui: &mut Ui| {
                ui.label("Load odt files:");
                if ui.button("Load").clicked() {
                    open_files_dialog(state);
                }
                ui.end_row();

                ui.label("Create png files:");
                if ui.add_enabled(has_files, egui::Button::new("To png")).clicked() {
                    export_dialog(state, Command::ExportPng);
                }
                ui.end_row();

                ui.label("Create csv files:");
                if ui.add_enabled(has_files, egui::Button::new("To csv")).clicked() {
                    export_dialog(state, Command::ExportCsv);
                }
                ui.end_row();
            });
    });

    ui.add_space(6.0);
    ui.strong(format!("Selected files ({})", state.session.files().len()));
    ui.separator();

    if !has_files {
        ui.label("No files selected.");
        return;
    }

    let selected = state.preview.as_ref().map(|p| p.index);
    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, path) in state.session.files().iter().enumerate() {
                let label = ui
                    .selectable_label(selected == Some(i), file_name(path))
                    .on_hover_text(path.display().to_string());
                if label.clicked() {
                    clicked = Some(i);
                }
            }
        });

    if let Some(i) = clicked {
        if selected != Some(i) {
            state.load_preview(i);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu, status indicator and last result.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let idle = state.status == Status::Ready;
        let has_files = !state.session.files().is_empty();

        ui.menu_button("File", |ui: &mut Ui| {
            if ui.add_enabled(idle, egui::Button::new("Open…")).clicked() {
                ui.close_menu();
                open_files_dialog(state);
            }
            if ui
                .add_enabled(idle && has_files, egui::Button::new("Export CSV…"))
                .clicked()
            {
                ui.close_menu();
                export_dialog(state, Command::ExportCsv);
            }
            if ui
                .add_enabled(idle && has_files, egui::Button::new("Export PNG…"))
                .clicked()
            {
                ui.close_menu();
                export_dialog(state, Command::ExportPng);
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        ui.label("Status:");
        let (text, color) = match state.status {
            Status::Ready => ("Ready", Color32::DARK_GREEN),
            Status::Busy(label) => (label, Color32::DARK_RED),
        };
        ui.label(RichText::new(text).color(Color32::WHITE).background_color(color));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let text = RichText::new(msg);
            ui.label(if state.status_is_error {
                text.color(Color32::RED)
            } else {
                text
            });
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_files_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Select OOMMF data tables")
        .add_filter("OOMMF data table", &["odt"])
        .add_filter("All files", &["*"])
        .pick_files();

    if let Some(files) = files {
        state.queue(Command::SelectFiles(files));
    }
}

/// Ask for an output folder and queue `make(folder)`.
pub fn export_dialog(state: &mut AppState, make: fn(std::path::PathBuf) -> Command) {
    let mut dialog = rfd::FileDialog::new().set_title("Select Folder");
    if let Some(dir) = &state.settings.output_dir {
        dialog = dialog.set_directory(dir);
    }

    match dialog.pick_folder() {
        Some(dir) => state.queue(make(dir)),
        None => log::debug!("Export cancelled"),
    }
}
