//! Main window: form fields, folder picker and the generate button

use crate::action::{Generator, Outcome};
use crate::error::Error;
use crate::form::FormState;
use eframe::egui;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};

/// Window title
pub const APP_TITLE: &str = "QR Code Generator";

/// Blocking dialogs used by the window
pub trait Dialogs {
    /// Ask for a directory, starting in `start`
    fn pick_folder(&mut self, start: &Path) -> Option<PathBuf>;
    /// Show an error message
    fn error(&mut self, message: &str);
    /// Show an informational message
    fn info(&mut self, title: &str, message: &str);
    /// Ask whether `path` may be overwritten
    fn confirm_overwrite(&mut self, path: &Path) -> bool;
}

/// Native dialogs backed by `rfd`
#[derive(Debug, Default)]
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn pick_folder(&mut self, start: &Path) -> Option<PathBuf> {
        FileDialog::new().set_directory(start).pick_folder()
    }

    fn error(&mut self, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title("Error")
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn info(&mut self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Overwrite?")
            .set_description(format!(
                "File already exists:\n{}\nOverwrite?",
                path.display()
            ))
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    }
}

/// The QR generator window
pub struct QrSnapApp {
    form: FormState,
    generator: Generator,
    dialogs: Box<dyn Dialogs>,
    busy: bool,
}

impl QrSnapApp {
    /// Build the window state around a generator and a dialog backend
    pub fn new(generator: Generator, dialogs: Box<dyn Dialogs>) -> Self {
        Self {
            form: FormState::new(&generator.options().default_folder),
            generator,
            dialogs,
            busy: false,
        }
    }

    /// Current form contents
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Mutable access to the form, as the text fields use it
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Open the folder picker and store the chosen directory
    pub fn browse_folder(&mut self) {
        let current = self.form.folder.trim();
        let start = if current.is_empty() {
            self.generator.options().default_folder.clone()
        } else {
            PathBuf::from(current)
        };

        if let Some(folder) = self.dialogs.pick_folder(&start) {
            self.form.folder = folder.display().to_string();
        }
    }

    /// Run one generate-and-save request and report the result through dialogs.
    ///
    /// Returns `None` when a request is already in flight.
    pub fn generate(&mut self) -> Option<Outcome> {
        if self.busy {
            tracing::warn!("Ignoring generate request while another is running");
            return None;
        }
        self.busy = true;

        let dialogs = &mut self.dialogs;
        let mut prompt = |path: &Path| dialogs.confirm_overwrite(path);
        let result = self.generator.generate_and_save(&self.form, &mut prompt);

        let outcome = match result {
            Ok(Outcome::Saved(path)) => {
                self.dialogs
                    .info("Saved", &format!("QR code saved to:\n{}", path.display()));
                Some(Outcome::Saved(path))
            }
            Ok(Outcome::Declined) => Some(Outcome::Declined),
            Err(err) => {
                report_error(self.dialogs.as_mut(), &err);
                None
            }
        };

        self.busy = false;
        outcome
    }

    fn form_ui(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("qr_form")
            .num_columns(3)
            .spacing([12.0, 10.0])
            .show(ui, |ui| {
                ui.label("URL / Text:");
                ui.add(egui::TextEdit::singleline(&mut self.form.text).desired_width(420.0));
                ui.end_row();

                ui.label("File name (no ext):");
                ui.add(egui::TextEdit::singleline(&mut self.form.file_name).desired_width(220.0));
                ui.end_row();

                ui.label("Save folder:");
                ui.add(egui::TextEdit::singleline(&mut self.form.folder).desired_width(300.0));
                if ui.button("Browse...").clicked() {
                    self.browse_folder();
                }
                ui.end_row();
            });
    }
}

fn report_error(dialogs: &mut dyn Dialogs, err: &Error) {
    if !matches!(err, Error::Generation(_)) {
        tracing::debug!(error = %err, "Generate request aborted");
    }
    dialogs.error(&err.user_message());
}

impl eframe::App for QrSnapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.form_ui(ui);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                let generate = ui.add_enabled(
                    !self.busy,
                    egui::Button::new("Generate and Save PNG"),
                );
                if generate.clicked() {
                    self.generate();
                }
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}

/// Native window options for the non-resizable form window
pub fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([640.0, 200.0])
            .with_resizable(false),
        ..Default::default()
    }
}
