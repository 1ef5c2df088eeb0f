use eframe::egui;
use egui::{Align, Align2, Color32, Layout, RichText};
use log::info;

use crate::catalog::CatalogStore;
use crate::editor::browse;
use crate::editor::state::{EditorState, ImageField};

/// Severity of a modal notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Modal message shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title: title.to_string(), message: message.into() }
    }

    pub fn warning(title: &str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, title: title.to_string(), message: message.into() }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: title.to_string(), message: message.into() }
    }

    fn color(&self) -> Color32 {
        match self.level {
            NoticeLevel::Info => Color32::LIGHT_GREEN,
            NoticeLevel::Warning => Color32::YELLOW,
            NoticeLevel::Error => Color32::RED,
        }
    }
}

/// Buttons of the action bar
enum EditorAction {
    New,
    Save,
    Remove,
    PersistAll,
    Browse(ImageField),
}

/// Catalog editor window
pub struct CatalogEditorApp {
    /// Catalog and form state
    state: EditorState,
    /// Notice currently shown on top of the form
    notice: Option<Notice>,
}

impl CatalogEditorApp {
    /// Create the editor for the catalog in `store`
    pub fn new(_cc: &eframe::CreationContext<'_>, store: CatalogStore) -> Self {
        Self {
            state: EditorState::new(store),
            notice: None,
        }
    }

    fn handle_action(&mut self, action: EditorAction) {
        match action {
            EditorAction::New => self.state.new_record(),
            EditorAction::Save => {
                self.notice = Some(match self.state.save_current() {
                    Ok(record) => Notice::info(
                        "Saved",
                        format!(
                            "Changes to '{}' saved in memory.\nClick 'Save all to file' to persist them.",
                            record.name
                        ),
                    ),
                    Err(e) => Notice::warning("Cannot save", e.to_string()),
                });
            }
            EditorAction::Remove => {
                if let Err(e) = self.state.request_removal() {
                    self.notice = Some(Notice::warning("No selection", e.to_string()));
                }
            }
            EditorAction::PersistAll => {
                self.notice = Some(match self.state.persist() {
                    Ok(()) => Notice::info(
                        "Success",
                        format!("Game list saved to {}", self.state.store().path().display()),
                    ),
                    Err(e) => Notice::error("Error", format!("Could not save the file: {}", e)),
                });
            }
            EditorAction::Browse(field) => {
                if let Some(picked) = browse::pick_image(field) {
                    let path = browse::relative_to_working_dir(&picked);
                    info!("Picked {} for {:?}", path, field);
                    self.state.set_image_path(field, path);
                }
            }
        }
    }

    /// Game list on the left
    fn show_list(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Games").strong());
        ui.separator();

        let mut clicked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (i, record) in self.state.records().iter().enumerate() {
                let selected = self.state.selected() == Some(i);
                if ui.selectable_label(selected, record.display_name()).clicked() {
                    clicked = Some(i);
                }
            }
        });

        if let Some(i) = clicked {
            self.state.select(i);
        }
    }

    /// Edit form bound to the selection
    fn show_form(&mut self, ui: &mut egui::Ui, actions: &mut Vec<EditorAction>) {
        ui.label(RichText::new("Game details").strong());
        ui.separator();

        let focus_name = self.state.take_focus_request();
        let form = &mut self.state.form;

        egui::Grid::new("record_form")
            .num_columns(3)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Name:");
                let name = ui.add(egui::TextEdit::singleline(&mut form.name).desired_width(f32::INFINITY));
                if focus_name {
                    name.request_focus();
                    select_all(ui, &name, form.name.chars().count());
                }
                ui.end_row();

                ui.label("Command:");
                ui.add(egui::TextEdit::singleline(&mut form.command).desired_width(f32::INFINITY));
                ui.end_row();

                ui.label("Cover:");
                ui.add(egui::TextEdit::singleline(&mut form.cover_image).desired_width(f32::INFINITY));
                if ui.button("Browse...").clicked() {
                    actions.push(EditorAction::Browse(ImageField::Cover));
                }
                ui.end_row();

                ui.label("Background:");
                ui.add(egui::TextEdit::singleline(&mut form.background_image).desired_width(f32::INFINITY));
                if ui.button("Browse...").clicked() {
                    actions.push(EditorAction::Browse(ImageField::Background));
                }
                ui.end_row();

                ui.label("Description:");
                ui.add(
                    egui::TextEdit::multiline(&mut form.description)
                        .desired_rows(5)
                        .desired_width(f32::INFINITY),
                );
                ui.end_row();
            });
    }

    /// Confirmation dialog for a pending removal
    fn show_removal_confirmation(&mut self, ctx: &egui::Context) {
        if !self.state.removal_pending() {
            return;
        }

        let mut answer = None;
        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Are you sure you want to remove the selected game?");
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("No").clicked() {
                        answer = Some(false);
                    }
                });
            });

        match answer {
            Some(true) => {
                self.state.confirm_removal();
            }
            Some(false) => self.state.cancel_removal(),
            None => {}
        }
    }

    /// Modal notice window
    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(RichText::new(&notice.message).color(notice.color()));
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.notice = None;
        }
    }
}

/// Select the whole text of a freshly focused single-line edit
fn select_all(ui: &egui::Ui, response: &egui::Response, len: usize) {
    if let Some(mut state) = egui::TextEdit::load_state(ui.ctx(), response.id) {
        let range = egui::text_edit::CCursorRange::two(
            egui::text::CCursor::new(0),
            egui::text::CCursor::new(len),
        );
        state.set_ccursor_range(Some(range));
        state.store(ui.ctx(), response.id);
    }
}

impl eframe::App for CatalogEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal_open = self.notice.is_some() || self.state.removal_pending();
        let mut actions = Vec::new();

        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| {
                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                    if ui.button("New game").clicked() {
                        actions.push(EditorAction::New);
                    }
                    if ui.button("Save game").clicked() {
                        actions.push(EditorAction::Save);
                    }
                    if ui.button("Remove selected").clicked() {
                        actions.push(EditorAction::Remove);
                    }
                    if ui
                        .add(egui::Button::new("Save all to file").fill(Color32::from_rgb(60, 110, 160)))
                        .clicked()
                    {
                        actions.push(EditorAction::PersistAll);
                    }
                });
            });
        });

        egui::SidePanel::left("game_list")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!modal_open, |ui| self.show_list(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| self.show_form(ui, &mut actions));
        });

        self.show_removal_confirmation(ctx);
        self.show_notice(ctx);

        for action in actions {
            self.handle_action(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_levels_map_to_colors() {
        assert_eq!(Notice::info("a", "b").color(), Color32::LIGHT_GREEN);
        assert_eq!(Notice::warning("a", "b").color(), Color32::YELLOW);
        assert_eq!(Notice::error("a", "b").color(), Color32::RED);
    }
}
