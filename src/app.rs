use chrono::{DateTime, Local};
use egui::{Align2, Button, CentralPanel, Color32, ComboBox, Grid, RichText, SidePanel, TextEdit, TopBottomPanel, Ui, Vec2, Window};
use tracing::{info, warn};

use crate::{
    form::SubjectForm,
    gpa::{compute_gpa, GpaResult},
    pie_chart::PieChart,
    store::GradeFile,
    utils::format_point,
};

struct Message {
    title: &'static str,
    text: String,
}

struct Calculation {
    result: GpaResult,
    completed_at: DateTime<Local>,
}

pub struct App {
    store: GradeFile,
    form: SubjectForm,
    calculation: Option<Calculation>,
    // label and text field for each grade while the editor is open
    editor: Option<Vec<(String, String)>>,
    message: Option<Message>,
    confirm_reset: bool,
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let blocked = self.message.is_some() || self.confirm_reset || self.editor.is_some();

        TopBottomPanel::top("title_panel").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("GPA Calculator");
            });
        });

        SidePanel::left("chart_panel")
            .resizable(false)
            .min_width(340.0)
            .show(ctx, |ui| {
                let contributions = self
                    .calculation
                    .as_ref()
                    .map(|c| c.result.contributions.as_slice())
                    .unwrap_or_default();
                ui.add(PieChart::new(contributions));
            });

        SidePanel::right("grade_panel")
            .resizable(false)
            .min_width(220.0)
            .show(ctx, |ui| {
                ui.set_enabled(!blocked);
                self.render_grade_list(ui);
            });

        CentralPanel::default().show(ctx, |ui| {
            ui.set_enabled(!blocked);
            self.render_subjects(ui);
            ui.separator();
            self.render_buttons(ui);
            ui.separator();
            self.render_result(ui);
        });

        self.show_editor(ctx);
        self.show_confirm_reset(ctx);
        self.show_message(ctx);
    }
}

impl App {
    pub fn new(store: GradeFile) -> Self {
        App {
            store,
            form: SubjectForm::new(),
            calculation: None,
            editor: None,
            message: None,
            confirm_reset: false,
        }
    }

    pub fn run(self) {
        let options = eframe::NativeOptions {
            initial_window_size: Some(Vec2::new(1000.0, 600.0)),
            ..Default::default()
        };

        eframe::run_native(
            "GPA Calculator",
            options,
            Box::new(|_cc| Box::new(self)),
        );
    }

    fn error(&mut self, text: impl ToString) {
        self.message = Some(Message {
            title: "Error",
            text: text.to_string(),
        });
    }

    fn warning(&mut self, text: impl ToString) {
        self.message = Some(Message {
            title: "Warning",
            text: text.to_string(),
        });
    }

    fn render_subjects(&mut self, ui: &mut Ui) {
        let labels = self.store.labels();
        let mut remove = None;

        Grid::new("subject_rows")
            .num_columns(4)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Subject").strong());
                ui.label(RichText::new("Credit").strong());
                ui.label(RichText::new("Grade").strong());
                ui.end_row();

                for form_row in self.form.rows_mut() {
                    let row = &mut form_row.row;
                    ui.add(TextEdit::singleline(&mut row.subject).desired_width(140.0));
                    ui.add(TextEdit::singleline(&mut row.credit).desired_width(50.0));

                    let selected = row.grade.clone().unwrap_or_default();
                    ComboBox::from_id_source(("grade", form_row.id))
                        .selected_text(selected)
                        .width(80.0)
                        .show_ui(ui, |ui| {
                            for label in labels.iter() {
                                ui.selectable_value(&mut row.grade, Some(label.clone()), label.as_str());
                            }
                        });

                    let remove_button = Button::new(RichText::new("✖").color(Color32::RED));
                    if ui.add(remove_button).clicked() {
                        remove = Some(form_row.id);
                    }
                    ui.end_row();
                }
            });

        if let Some(id) = remove {
            if let Err(err) = self.form.remove_row(id) {
                self.warning(err);
            }
        }
    }

    fn render_buttons(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.button("Add Subject").clicked() {
                if let Err(err) = self.form.add_row() {
                    self.warning(err);
                }
            }
            if ui.button("Calculate GPA").clicked() {
                self.calculate();
            }
            if ui.button("Reset All").clicked() {
                self.confirm_reset = true;
            }
        });
    }

    fn render_result(&self, ui: &mut Ui) {
        if let Some(calculation) = &self.calculation {
            let result = &calculation.result;
            ui.label(RichText::new(format!("Your GPA: {}", result.display_gpa())).size(20.0).strong());
            ui.label(RichText::new(format!("Total Credit Hours: {}", result.total_credits)).strong());
            ui.label(format!(
                "Calculated at {}",
                calculation.completed_at.format("%a %b %e %T %Y")
            ));
        }
    }

    fn render_grade_list(&mut self, ui: &mut Ui) {
        ui.heading("Grade List");
        ui.label(self.store.path().display().to_string());
        ui.separator();

        Grid::new("grade_list").striped(true).show(ui, |ui| {
            for (label, point) in self.store.grades().iter() {
                ui.label(label);
                ui.label(format_point(point));
                ui.end_row();
            }
        });

        ui.separator();
        if ui.button("Edit Grade List").clicked() {
            self.editor = Some(
                self.store
                    .grades()
                    .iter()
                    .map(|(label, point)| (label.to_string(), format_point(point)))
                    .collect(),
            );
        }
        if ui.button("Open grade file…").clicked() {
            self.pick_grade_file();
        }
    }

    fn pick_grade_file(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Grade list", &["txt"])
            .pick_file();

        if let Some(path) = picked {
            match GradeFile::open(&path) {
                Ok(store) => {
                    info!(path = %path.display(), "switched grade file");
                    self.store = store;
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "could not open grade file");
                    self.error(err);
                }
            }
        }
    }

    fn calculate(&mut self) {
        match compute_gpa(self.form.subjects(), self.store.grades()) {
            Ok(result) => {
                info!(
                    gpa = %result.display_gpa(),
                    total_credits = result.total_credits,
                    "gpa calculated"
                );
                self.calculation = Some(Calculation {
                    result,
                    completed_at: Local::now(),
                });
            }
            Err(err) => {
                warn!(error = %err, "gpa calculation rejected");
                self.error(err);
            }
        }
    }

    fn reset_all(&mut self) {
        self.form.reset();
        self.calculation = None;
        info!("inputs reset");
    }

    fn show_editor(&mut self, ctx: &egui::Context) {
        let fields = match self.editor.as_mut() {
            Some(fields) => fields,
            None => return,
        };

        let mut open = true;
        let mut save = false;
        let mut reset = false;

        Window::new("Edit Grade List")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .enabled(self.message.is_none())
            .show(ctx, |ui| {
                Grid::new("grade_editor").show(ui, |ui| {
                    for (label, text) in fields.iter_mut() {
                        ui.label(label.as_str());
                        ui.add(TextEdit::singleline(text).desired_width(70.0));
                        ui.end_row();
                    }
                });
                ui.horizontal(|ui| {
                    save = ui.button("Save").clicked();
                    reset = ui.button("Reset").clicked();
                });
            });

        if save {
            match self.store.apply_edit(fields) {
                Ok(()) => self.editor = None,
                Err(err) => {
                    warn!(error = %err, "grade list edit rejected");
                    self.error(err);
                }
            }
        } else if reset {
            match self.store.reset_to_default() {
                Ok(()) => self.editor = None,
                Err(err) => self.error(err),
            }
        } else if !open {
            self.editor = None;
        }
    }

    fn show_confirm_reset(&mut self, ctx: &egui::Context) {
        if !self.confirm_reset {
            return;
        }

        let mut answer = None;
        Window::new("Confirm Reset")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Are you sure you want to reset all inputs?");
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("No").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if let Some(yes) = answer {
            self.confirm_reset = false;
            if yes {
                self.reset_all();
            }
        }
    }

    fn show_message(&mut self, ctx: &egui::Context) {
        let mut close = false;

        if let Some(message) = &self.message {
            Window::new(message.title)
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, Vec2::new(0.0, 40.0))
                .show(ctx, |ui| {
                    ui.label(message.text.as_str());
                    close = ui.button("OK").clicked();
                });
        }

        if close {
            self.message = None;
        }
    }
}
