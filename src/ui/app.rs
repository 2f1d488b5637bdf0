//! Main application UI.

use std::sync::Arc;

use chrono::{Local, TimeDelta};
use eframe::egui::{self, Align, Align2, Layout, Margin, RichText};
use egui_phosphor::regular::{CROWN, HOUSE, MAGNIFYING_GLASS, X};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::controller::{
    FormController, FormEvent, FormOutcome, FormRequest, FormSlot, ListController, ListOutcome, ListRequest,
};
use crate::error::AppError;
use crate::models::EmployeeId;
use crate::notify::{Level, Notifier};
use crate::service::EmployeeService;

use super::components::{colors, sidebar_item};
use super::{form_page, list_page};

/// Page being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    List,
    Form,
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    List(ListOutcome),
    /// Tagged with the number of the form it belongs to.
    Form { form_seq: u64, outcome: FormOutcome },
}

/// Main application state.
pub struct App {
    // Runtime and backend
    rt: tokio::runtime::Runtime,
    service: Arc<dyn EmployeeService>,

    // Message channel for async communication
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,

    config: AppConfig,

    // Navigation
    page: Page,

    // Views
    list: ListController,
    forms: FormSlot,

    // Search state
    search: String,

    // Dialogs
    delete_target: Option<(EmployeeId, String)>,

    notifier: Notifier,
}

impl App {
    pub fn new(
        config: AppConfig,
        service: Arc<dyn EmployeeService>,
        rt: tokio::runtime::Runtime,
        notifier: Notifier,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            rt,
            service,
            tx,
            rx,
            list: ListController::new(config.ui.default_sort),
            config,
            page: Page::default(),
            forms: FormSlot::default(),
            search: String::new(),
            delete_target: None,
            notifier,
        };

        // Load initial data
        let request = app.list.mount();
        app.dispatch_list(request);

        app
    }

    /// Run a list request in the background.
    fn dispatch_list(&self, request: ListRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let outcome = request.run(service.as_ref()).await;
            let _ = tx.send(UiMessage::List(outcome));
        });
    }

    /// Run a form request in the background.
    fn dispatch_form(&self, form_seq: u64, request: FormRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let outcome = request.run(service.as_ref()).await;
            let _ = tx.send(UiMessage::Form { form_seq, outcome });
        });
    }

    /// Return to the list and fetch it again.
    fn show_list(&mut self) {
        self.page = Page::List;
        self.forms.close();
        self.list = ListController::new(self.config.ui.default_sort);
        let request = self.list.mount();
        self.dispatch_list(request);
    }

    /// Open the form in create mode, or edit mode for `id`.
    fn show_form(&mut self, id: Option<EmployeeId>) {
        let mut form = match id {
            Some(id) => FormController::edit(Some(id)),
            None => FormController::create(),
        };
        let request = form.mount();
        let form_seq = self.forms.open(form);
        if let Some(request) = request {
            self.dispatch_form(form_seq, request);
        }
        self.page = Page::Form;
    }

    /// Export the rows currently shown to an Excel file.
    fn export_visible(&mut self) {
        let default_name = crate::export::generate_export_filename("employees");
        let Some(path) = crate::export::show_save_dialog(&default_name) else {
            return;
        };

        let visible = self.list.visible(&self.search);
        match crate::export::export_employees_to_excel(&visible, &path) {
            Ok(()) => {
                tracing::info!("Exported {} employees to {:?}", visible.len(), path);
                self.notifier.success(format!("Exported to: {}", path.display()));
            }
            Err(e) => {
                self.notifier.report(&AppError::from(e));
            }
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::List(outcome) => {
                    self.list.apply(outcome, &mut self.notifier);
                }
                UiMessage::Form { form_seq, outcome } => {
                    let event = self.forms.apply(form_seq, outcome, &mut self.notifier);
                    if event == Some(FormEvent::BackToList) {
                        self.show_list();
                    }
                }
            }
        }

        let ttl = TimeDelta::seconds(self.config.ui.toast_secs as i64);
        self.notifier.expire(ttl, Local::now());
    }

    /// Render sidebar with brand and navigation.
    fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .exact_width(220.0)
            .resizable(false)
            .frame(egui::Frame::new().fill(colors::SIDEBAR).inner_margin(Margin::same(16)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(CROWN).size(20.0).color(egui::Color32::WHITE));
                    ui.label(RichText::new("RBR Digital").size(14.0).color(egui::Color32::WHITE));
                });
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                if sidebar_item(ui, HOUSE, "Home", self.page == Page::List).clicked() {
                    self.show_list();
                }
            });
    }

    /// Render top bar with the name search.
    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").min_height(48.0).show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(MAGNIFYING_GLASS);
                ui.add(
                    egui::TextEdit::singleline(&mut self.search)
                        .desired_width(320.0)
                        .hint_text("Search employees by name"),
                );
                if !self.search.is_empty() && ui.small_button("Clear").clicked() {
                    self.search.clear();
                }
            });
        });
    }

    /// Render notifications stacked in the bottom-right corner.
    fn show_toasts(&mut self, ctx: &egui::Context) {
        if self.notifier.is_empty() {
            return;
        }

        let mut dismissed = Vec::new();
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .show(ctx, |ui| {
                ui.set_max_width(360.0);
                for n in self.notifier.iter() {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let color = match n.level {
                                Level::Success => colors::SUCCESS,
                                Level::Error => colors::ERROR,
                                Level::Info => colors::NEUTRAL,
                            };
                            ui.colored_label(color, &n.message);
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                if ui.small_button(X).clicked() {
                                    dismissed.push(n.id);
                                }
                            });
                        });
                    });
                    ui.add_space(6.0);
                }
            });

        for id in dismissed {
            self.notifier.dismiss(id);
        }
    }

    /// Render delete confirmation dialog.
    fn show_delete_confirm(&mut self, ctx: &egui::Context) {
        let Some((id, name)) = self.delete_target.clone() else {
            return;
        };

        egui::Window::new("Delete Employee")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Delete employee '{}'?", name));
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.delete_target = None;
                    }
                    if ui.button("Delete").clicked() {
                        self.delete_target = None;
                        tracing::info!("Deleting employee: {}", name);
                        let request = self.list.delete(id.clone());
                        self.dispatch_list(request);
                    }
                });
            });
    }

    fn handle_list_action(&mut self, action: list_page::Action) {
        match action {
            list_page::Action::None => {}
            list_page::Action::Sort(key) => {
                let request = self.list.set_sort(key);
                self.dispatch_list(request);
            }
            list_page::Action::Refresh => {
                let request = self.list.refresh();
                self.dispatch_list(request);
            }
            list_page::Action::Create => self.show_form(None),
            list_page::Action::Edit(id) => self.show_form(Some(id)),
            list_page::Action::Delete(id, name) => self.delete_target = Some((id, name)),
            list_page::Action::Export => self.export_visible(),
        }
    }

    fn handle_form_action(&mut self, action: form_page::Action) {
        match action {
            form_page::Action::None => {}
            form_page::Action::Cancel => self.show_list(),
            form_page::Action::Save => {
                let request = self.forms.form_mut().and_then(|form| form.submit(&mut self.notifier));
                if let Some(request) = request {
                    self.dispatch_form(self.forms.seq(), request);
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Request repaint during async operations
        let busy = self.list.is_loading() || self.forms.form().is_some_and(|f| f.is_busy());
        if busy {
            ctx.request_repaint();
        } else if !self.notifier.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }

        self.show_sidebar(ctx);
        self.show_top_bar(ctx);
        self.show_delete_confirm(ctx);
        self.show_toasts(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::List => {
                let action = list_page::show(&self.list, &self.search, ui);
                self.handle_list_action(action);
            }
            Page::Form => {
                let action = match self.forms.form_mut() {
                    Some(form) => form_page::show(form, ui),
                    None => form_page::Action::Cancel,
                };
                self.handle_form_action(action);
            }
        });
    }
}
