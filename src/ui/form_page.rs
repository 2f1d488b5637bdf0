//! Create/edit employee page.

use chrono::{Local, NaiveTime};
use eframe::egui::{self, Ui};
use egui_phosphor::regular::FLOPPY_DISK;

use super::components::{colors, panel_header, primary_button_with_icon, styled_button};
use crate::controller::{FormController, FormMode};
use crate::models::{DATETIME_LOCAL_FORMAT, EmployeeField};

/// User intent collected while drawing the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Save,
    Cancel,
}

/// Show the form page.
pub fn show(form: &mut FormController, ui: &mut Ui) -> Action {
    let mut action = Action::None;

    let title = match form.mode() {
        FormMode::Create => "New Employee",
        FormMode::Edit { .. } => "Edit Employee",
    };
    panel_header(ui, title);

    if form.is_busy() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Please wait...");
        });
        ui.add_space(10.0);
    }

    ui.add_enabled_ui(!form.is_busy(), |ui| {
        egui::Grid::new("employee_form_grid")
            .num_columns(2)
            .spacing([20.0, 12.0])
            .show(ui, |ui| {
                for field in EmployeeField::REQUIRED {
                    ui.label(format!("{}:", field.label()));
                    let mut value = form.field_text(field).to_string();
                    if ui
                        .add(egui::TextEdit::singleline(&mut value).desired_width(300.0))
                        .changed()
                    {
                        form.set_field(field, &value);
                    }
                    ui.end_row();
                }

                ui.label(format!("{}:", EmployeeField::AdmissionDate.label()));
                admission_date_input(form, ui);
                ui.end_row();
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if styled_button(ui, "Cancel").clicked() {
                action = Action::Cancel;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if primary_button_with_icon(ui, FLOPPY_DISK, "Save").clicked() {
                    action = Action::Save;
                }
            });
        });
    });

    action
}

/// Text input plus date picker. Picking a date keeps the typed time.
fn admission_date_input(form: &mut FormController, ui: &mut Ui) {
    ui.vertical(|ui| {
        let is_valid = form.admission_date_valid();

        // Red text for invalid input
        let text_color = if is_valid {
            ui.visuals().text_color()
        } else {
            colors::ERROR
        };

        ui.horizontal(|ui| {
            let mut value = form.field_text(EmployeeField::AdmissionDate).to_string();
            let response = ui.add(
                egui::TextEdit::singleline(&mut value)
                    .desired_width(160.0)
                    .hint_text("YYYY-MM-DDTHH:MM")
                    .text_color(text_color),
            );
            if response.changed() {
                form.set_field(EmployeeField::AdmissionDate, &value);
            }

            let current = form.draft().admission_date;
            let mut date = current.map(|d| d.date()).unwrap_or_else(|| Local::now().date_naive());
            let picked = ui.add(egui_extras::DatePickerButton::new(&mut date).id_salt("admission_date_picker"));
            if picked.changed() {
                let time = current.map(|d| d.time()).unwrap_or(NaiveTime::MIN);
                let value = date.and_time(time).format(DATETIME_LOCAL_FORMAT).to_string();
                form.set_field(EmployeeField::AdmissionDate, &value);
            }
        });

        if !is_valid {
            ui.colored_label(colors::ERROR, "Invalid date format");
        } else {
            ui.weak("Format: YYYY-MM-DDTHH:MM (optional)");
        }
    });
}
