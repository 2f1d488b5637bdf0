//! Employee list page: sort selector, toolbar, and table with row actions.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FILE_XLS, PENCIL, PLUS, TRASH};

use super::components::{
    action_button, colors, danger_action_button, panel_header, primary_button_with_icon, styled_button_with_icon,
};
use crate::controller::{ListController, ListState};
use crate::models::{EmployeeId, SortKey};

/// User intent collected while drawing the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Sort(SortKey),
    Refresh,
    Create,
    Edit(EmployeeId),
    Delete(EmployeeId, String),
    Export,
}

/// Show the list page.
pub fn show(list: &ListController, search: &str, ui: &mut Ui) -> Action {
    let mut action = Action::None;

    panel_header(ui, "Employees");

    // Toolbar
    ui.horizontal(|ui| {
        ui.label("Sort by:");
        let mut selected = list.sort();
        egui::ComboBox::from_id_salt("employee_sort")
            .width(160.0)
            .selected_text(selected.label())
            .show_ui(ui, |ui| {
                for key in SortKey::ALL {
                    ui.selectable_value(&mut selected, key, key.label());
                }
            });
        if selected != list.sort() {
            action = Action::Sort(selected);
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            action = Action::Refresh;
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
            action = Action::Export;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if primary_button_with_icon(ui, PLUS, "Add Employee").clicked() {
                action = Action::Create;
            }
        });
    });

    ui.add_space(15.0);

    if list.is_loading() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
        });
        return action;
    }

    if let ListState::Failed(message) = list.state() {
        ui.colored_label(colors::ERROR, format!("Could not load employees: {message}"));
        ui.add_space(10.0);
    }

    let table_action = show_table(list, search, ui);
    if table_action != Action::None {
        action = table_action;
    }

    action
}

fn show_table(list: &ListController, search: &str, ui: &mut Ui) -> Action {
    let mut action = Action::None;
    let visible = list.visible(search);

    ui.label(format!(
        "Showing {} of {} employees",
        visible.len(),
        list.employees().len()
    ));

    ui.add_space(10.0);

    ScrollArea::vertical().id_salt("employee_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("employees_grid")
            .num_columns(5)
            .striped(true)
            .min_col_width(100.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("Name");
                ui.strong("Role");
                ui.strong("Department");
                ui.strong("Admission Date");
                ui.strong("Actions");
                ui.end_row();

                for emp in visible {
                    ui.label(&emp.name);
                    ui.label(&emp.role);
                    ui.label(&emp.department);
                    match emp.admission_date {
                        Some(date) => ui.label(date.format("%d/%m/%Y").to_string()),
                        None => ui.label(RichText::new("-").weak()),
                    };

                    ui.horizontal(|ui| {
                        if action_button(ui, PENCIL, "Edit").clicked() {
                            action = Action::Edit(emp.id.clone());
                        }
                        ui.add_space(4.0);
                        if danger_action_button(ui, TRASH, "Delete").clicked() {
                            action = Action::Delete(emp.id.clone(), emp.name.clone());
                        }
                    });

                    ui.end_row();
                }
            });
    });

    action
}
