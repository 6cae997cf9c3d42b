//! egui front end over [`GpaSession`].

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText};

use crate::gpa::calculator::report::{self, GpaBand, Locale};
use crate::gpa::calculator::session::{GpaSession, Notice, SessionCommand};

pub struct GuiStyle {
    pub(crate) font_size: f32,
    pub(crate) headline_size: f32,
    pub(crate) muted_text: Color32,
    pub(crate) selected_text: Color32,
}

impl Default for GuiStyle {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            headline_size: 20.0,
            muted_text: Color32::GRAY,
            selected_text: Color32::from_rgb(80, 170, 80),
        }
    }
}

/// Modal message shown on top of the main window.
enum Dialog {
    Error(String),
    Notices(Vec<Notice>),
}

pub struct GpaApp {
    session: GpaSession,
    style: GuiStyle,
    path_input: String,
    save_input: String,
    show_save_dialog: bool,
    dialog: Option<Dialog>,
}

impl GpaApp {
    pub fn new(locale: Locale) -> Self {
        Self {
            session: GpaSession::new(locale),
            style: GuiStyle::default(),
            path_input: String::new(),
            save_input: String::from("gpa_result.txt"),
            show_save_dialog: false,
            dialog: None,
        }
    }

    fn zh(&self) -> bool {
        self.session.locale() == Locale::Zh
    }

    fn text<'a>(&self, zh: &'a str, en: &'a str) -> &'a str {
        if self.zh() { zh } else { en }
    }

    fn run(&mut self, command: SessionCommand) {
        match self.session.dispatch(command) {
            Ok(notices) if notices.is_empty() => {}
            Ok(notices) => self.dialog = Some(Dialog::Notices(notices)),
            Err(error) => {
                let message = report::render_error(&error, self.session.locale());
                self.dialog = Some(Dialog::Error(message));
            }
        }
    }

    fn render_file_picker(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            let title = self.text("选择成绩文件", "Grade workbook");
            ui.label(RichText::new(title).size(self.style.font_size));
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.path_input)
                        .hint_text("*.xlsx")
                        .desired_width(ui.available_width() - 120.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let open_label = self.text("选择文件", "Open");
                if ui.button(open_label).clicked() || submitted {
                    let trimmed = self.path_input.trim();
                    let path = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
                    self.run(SessionCommand::PickFile(path));
                }
            });
            match self.session.file() {
                Some(path) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    ui.label(
                        RichText::new(format!("{} {name}", self.text("已选择:", "Selected:")))
                            .color(self.style.selected_text),
                    );
                }
                None => {
                    let hint =
                        self.text("请输入Excel文件路径 (.xlsx)", "Enter the path of an .xlsx file");
                    ui.label(RichText::new(hint).color(self.style.muted_text));
                }
            }
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let compute = egui::Button::new(self.text("计算GPA", "Compute GPA"));
            if ui.add_enabled(self.session.can_compute(), compute).clicked() {
                self.run(SessionCommand::Compute);
            }
            if ui.button(self.text("清空结果", "Clear")).clicked() {
                self.run(SessionCommand::Clear);
            }
            if ui.button(self.text("保存结果", "Save results")).clicked() {
                if self.session.can_save() {
                    self.show_save_dialog = true;
                } else {
                    let message = self.text("没有计算结果可保存", "There are no results to save");
                    self.dialog = Some(Dialog::Notices(vec![Notice::Warning(
                        message.to_string(),
                    )]));
                }
            }
        });
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        let headline = self.session.headline();
        let color = match self.session.report() {
            Some(report) => band_color(GpaBand::classify(report.result.gpa)),
            None => ui.visuals().text_color(),
        };
        ui.label(RichText::new(headline).size(self.style.headline_size).color(color).strong());
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(self.session.panel_text()).monospace());
            });
    }

    fn render_save_dialog(&mut self, ctx: &egui::Context) {
        let mut open = self.show_save_dialog;
        let mut command = None;
        egui::Window::new(self.text("保存计算结果", "Save results"))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add(egui::TextEdit::singleline(&mut self.save_input).hint_text("*.txt"));
                ui.horizontal(|ui| {
                    if ui.button(self.text("保存", "Save")).clicked() {
                        let trimmed = self.save_input.trim();
                        command = Some(SessionCommand::Save(
                            (!trimmed.is_empty()).then(|| PathBuf::from(trimmed)),
                        ));
                    }
                    if ui.button(self.text("取消", "Cancel")).clicked() {
                        command = Some(SessionCommand::Save(None));
                    }
                });
            });

        self.show_save_dialog = open && command.is_none();
        if let Some(command) = command {
            self.run(command);
        }
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.dialog else {
            return;
        };
        let (title, lines, color): (&str, Vec<String>, Color32) = match dialog {
            Dialog::Error(message) => (
                self.text("计算错误", "Error"),
                vec![message.clone()],
                Color32::from_rgb(220, 80, 80),
            ),
            Dialog::Notices(notices) => (
                self.text("提示", "Notice"),
                notices
                    .iter()
                    .map(|notice| match notice {
                        Notice::Info(text) | Notice::Warning(text) => text.clone(),
                    })
                    .collect(),
                ctx.style().visuals.text_color(),
            ),
        };

        let mut dismissed = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                for line in &lines {
                    ui.label(RichText::new(line).color(color));
                }
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.dialog = None;
        }
    }
}

// egui's bundled fonts have no CJK glyphs.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
];

/// Registers the first readable CJK font as a fallback for every family.
/// Returns the path that was installed, if any.
pub fn install_cjk_font(ctx: &egui::Context) -> Option<&'static str> {
    let (path, bytes) = CJK_FONT_CANDIDATES
        .iter()
        .find_map(|path| std::fs::read(path).ok().map(|bytes| (*path, bytes)))?;

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        "cjk".to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);
    Some(path)
}

fn band_color(band: GpaBand) -> Color32 {
    match band {
        GpaBand::Excellent => Color32::from_rgb(60, 170, 60),
        GpaBand::Good => Color32::from_rgb(70, 130, 220),
        GpaBand::Passing => Color32::from_rgb(230, 150, 40),
        GpaBand::NeedsImprovement => Color32::from_rgb(220, 70, 70),
    }
}

impl eframe::App for GpaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading(self.text("GPA计算器", "GPA Calculator"));
            ui.label(
                RichText::new(self.text(
                    "上传包含学分和绩点的Excel文件，自动计算您的GPA",
                    "Load a workbook with credit and grade-point columns to compute your GPA",
                ))
                .color(self.style.muted_text),
            );
            ui.add_space(8.0);
            self.render_file_picker(ui);
            ui.add_space(8.0);
            self.render_actions(ui);
            ui.add_space(8.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_results(ui);
        });

        if self.show_save_dialog {
            self.render_save_dialog(ctx);
        }
        self.render_dialog(ctx);
    }
}
