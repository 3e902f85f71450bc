use eframe::egui;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tab_text_core::scanner::{count_lines, scan_words};
use tab_text_core::search::find_first;
use tab_text_core::settings::{FontSpec, Settings, Transition};
use tab_text_core::Document;

const TRANSITION_SECS: f32 = 0.2;

pub struct ViewerApp {
    documents: Vec<Document>,
    active: usize,

    settings: Settings,
    show_preferences: bool,

    // Search UI
    show_search_bar: bool,
    search_query: String,
    last_query: String,

    // Derived sidebar state, rebuilt on open, tab switch and sidebar reveal
    words: Vec<String>,
    line_count: usize,

    // Scroll the text area to this line on the next frame
    scroll_to_line: Option<usize>,

    // Tab-switch transition
    transition_started: Option<Instant>,
    transition_forward: bool,

    status_message: String,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, files: Vec<PathBuf>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| storage.get_string(eframe::APP_KEY))
            .and_then(|json| Settings::from_json(&json))
            .unwrap_or_default();

        let mut app = Self {
            documents: Vec::new(),
            active: 0,
            settings,
            show_preferences: false,
            show_search_bar: false,
            search_query: String::new(),
            last_query: String::new(),
            words: Vec::new(),
            line_count: 0,
            scroll_to_line: None,
            transition_started: None,
            transition_forward: true,
            status_message: String::new(),
        };

        for file in files {
            app.open_file(&file);
        }
        app
    }

    fn open_file(&mut self, path: &Path) {
        match Document::open(path) {
            Ok(doc) => {
                info!("opened {} ({} bytes)", path.display(), doc.text().len());
                self.documents.push(doc);
                // Adding a page never steals visibility from the current one;
                // only the very first open selects a tab.
                if self.documents.len() == 1 {
                    self.active = 0;
                }
                self.status_message = format!("Opened: {}", path.display());
                self.refresh_index();
            }
            Err(e) => {
                warn!("open failed: {e:#}");
                self.status_message = format!("Error opening file: {e:#}");
            }
        }
    }

    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_file() {
            self.open_file(&path);
        }
    }

    /// Re-scans the active document and rebuilds the word list and line
    /// count. Never incremental: the whole text is scanned each time.
    fn refresh_index(&mut self) {
        match self.documents.get(self.active) {
            Some(doc) => {
                self.words = scan_words(doc.text());
                self.line_count = count_lines(doc.text());
                debug!(
                    "indexed {}: {} words, {} lines",
                    doc.title(),
                    self.words.len(),
                    self.line_count
                );
            }
            None => {
                self.words.clear();
                self.line_count = 0;
            }
        }
    }

    fn switch_to(&mut self, index: usize) {
        if index == self.active || index >= self.documents.len() {
            return;
        }
        self.transition_forward = index > self.active;
        self.active = index;
        if self.settings.transition != Transition::None {
            self.transition_started = Some(Instant::now());
        }
        // Switching the visible tab closes the search bar and re-scans
        self.show_search_bar = false;
        self.refresh_index();
    }

    /// Runs whenever the search text changes. Selects and scrolls to the
    /// first case-insensitive match; an empty query or a miss leaves the
    /// previous selection untouched.
    fn run_search(&mut self) {
        let query = self.search_query.clone();
        let Some(doc) = self.documents.get_mut(self.active) else {
            return;
        };
        if query.is_empty() {
            return;
        }
        if let Some(range) = find_first(doc.text(), &query) {
            let line = doc.text()[..range.start].matches('\n').count();
            doc.selection = Some(range);
            self.scroll_to_line = Some(line);
        }
    }

    fn transition_progress(&mut self, ctx: &egui::Context) -> f32 {
        let Some(started) = self.transition_started else {
            return 1.0;
        };
        let t = started.elapsed().as_secs_f32() / TRANSITION_SECS;
        if t >= 1.0 {
            self.transition_started = None;
            1.0
        } else {
            ctx.request_repaint();
            t
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Search toggle stays insensitive until a file is open
                ui.add_enabled_ui(!self.documents.is_empty(), |ui| {
                    ui.toggle_value(&mut self.show_search_bar, "🔍");
                });

                ui.separator();

                // Tab strip, one page per document
                let mut clicked = None;
                for (idx, doc) in self.documents.iter().enumerate() {
                    if ui.selectable_label(idx == self.active, doc.title()).clicked() {
                        clicked = Some(idx);
                    }
                }
                if let Some(idx) = clicked {
                    self.switch_to(idx);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.menu_button("⚙", |ui| {
                        if ui.button("Open…").clicked() {
                            ui.close_menu();
                            self.open_file_dialog();
                        }
                        ui.separator();
                        if ui
                            .checkbox(&mut self.settings.show_words, "Words")
                            .changed()
                            && self.settings.show_words
                        {
                            // Revealing the sidebar re-runs the word scan
                            self.refresh_index();
                        }
                        ui.checkbox(&mut self.settings.show_lines, "Lines");
                        ui.separator();
                        if ui.button("Preferences").clicked() {
                            self.show_preferences = true;
                            ui.close_menu();
                        }
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
        });
    }

    fn render_search_bar(&mut self, ctx: &egui::Context) {
        if !self.show_search_bar {
            return;
        }
        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.search_query)
                        .hint_text("Type to search…")
                        .desired_width(300.0),
                );
                if let Some(doc) = self.documents.get(self.active) {
                    if let Some(sel) = &doc.selection {
                        ui.label(format!("match at bytes {}..{}", sel.start, sel.end));
                    }
                }
            });
        });
    }

    fn render_sidebar(&mut self, ctx: &egui::Context) {
        if !self.settings.show_words {
            return;
        }
        egui::SidePanel::right("words_sidebar")
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Words").strong());
                ui.separator();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let mut picked = None;
                        for word in &self.words {
                            if ui.button(word).clicked() {
                                picked = Some(word.clone());
                            }
                        }
                        if let Some(word) = picked {
                            // Clicking a word populates the search entry
                            self.search_query = word;
                            self.show_search_bar = true;
                        }
                    });
            });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(doc) = self.documents.get(self.active) {
                    ui.label(doc.path().display().to_string());
                    ui.separator();
                    ui.label(format!("Encoding: {}", doc.encoding().name()));
                    if self.settings.show_lines {
                        ui.separator();
                        ui.label(format!("Lines: {}", self.line_count));
                    }
                }
                if !self.status_message.is_empty() {
                    ui.separator();
                    ui.label(&self.status_message);
                }
            });
        });
    }

    fn render_text_area(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let progress = self.transition_progress(ctx);
            let scroll_target = self.scroll_to_line.take();

            let Some(doc) = self.documents.get(self.active) else {
                ui.centered_and_justified(|ui| {
                    ui.label("Open a file to get started");
                });
                return;
            };

            let font_id = font_id_for(&self.settings.font_spec());

            let mut content_rect = ui.available_rect_before_wrap();
            let mut opacity = 1.0;
            match self.settings.transition {
                Transition::None => {}
                Transition::Crossfade => opacity = progress,
                Transition::SlideLeftRight => {
                    let offset = (1.0 - progress) * content_rect.width();
                    let dx = if self.transition_forward { offset } else { -offset };
                    content_rect = content_rect.translate(egui::vec2(dx, 0.0));
                }
            }

            let mut content_ui = ui.new_child(egui::UiBuilder::new().max_rect(content_rect));
            content_ui.set_opacity(opacity);

            let text = doc.text();
            let selection = doc.selection.clone();
            let text_color = content_ui.visuals().text_color();
            let line_height = content_ui.fonts(|f| f.row_height(&font_id));

            // Byte span of every line, for mapping the selection into
            // line-relative ranges
            let mut line_spans: Vec<(usize, &str)> = Vec::new();
            let mut offset = 0;
            for raw in text.split_inclusive('\n') {
                let stripped = raw.trim_end_matches('\n').trim_end_matches('\r');
                line_spans.push((offset, stripped));
                offset += raw.len();
            }

            let mut scroll_area = egui::ScrollArea::both()
                .id_salt(doc.path().display().to_string())
                .auto_shrink([false, false]);
            if let Some(line) = scroll_target {
                scroll_area = scroll_area.vertical_scroll_offset(line as f32 * line_height);
            }

            scroll_area.show_rows(
                &mut content_ui,
                line_height,
                line_spans.len(),
                |ui, row_range| {
                    for row in row_range {
                        let (start, line) = line_spans[row];
                        let end = start + line.len();

                        let highlighted = selection.as_ref().and_then(|sel| {
                            if sel.start < end && sel.end > start {
                                Some((sel.start.max(start) - start, sel.end.min(end) - start))
                            } else {
                                None
                            }
                        });

                        if let Some((hs, he)) = highlighted {
                            let mut job = egui::text::LayoutJob::default();
                            let normal = egui::TextFormat {
                                font_id: font_id.clone(),
                                color: text_color,
                                ..Default::default()
                            };
                            let highlight = egui::TextFormat {
                                font_id: font_id.clone(),
                                color: egui::Color32::BLACK,
                                background: egui::Color32::YELLOW,
                                ..Default::default()
                            };
                            job.append(&line[..hs], 0.0, normal.clone());
                            job.append(&line[hs..he], 0.0, highlight);
                            job.append(&line[he..], 0.0, normal);
                            ui.add(egui::Label::new(job).extend());
                        } else {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(line).font(font_id.clone()),
                                )
                                .extend(),
                            );
                        }
                    }
                },
            );
        });
    }

    fn render_preferences(&mut self, ctx: &egui::Context) {
        if !self.show_preferences {
            return;
        }
        let mut open = true;
        egui::Window::new("Preferences")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let mut font = self.settings.font_spec();
                let mut font_changed = false;

                egui::Grid::new("prefs_grid").num_columns(2).show(ui, |ui| {
                    ui.label("Font:");
                    ui.horizontal(|ui| {
                        font_changed |= ui
                            .selectable_value(&mut font.family, "Monospace".to_owned(), "Monospace")
                            .changed();
                        font_changed |= ui
                            .selectable_value(&mut font.family, "Sans".to_owned(), "Sans")
                            .changed();
                        font_changed |= ui
                            .add(egui::Slider::new(&mut font.size, 6.0..=32.0).text("pt"))
                            .changed();
                    });
                    ui.end_row();

                    ui.label("Transition:");
                    egui::ComboBox::from_id_salt("transition")
                        .selected_text(self.settings.transition.label())
                        .show_ui(ui, |ui| {
                            for t in Transition::ALL {
                                ui.selectable_value(&mut self.settings.transition, t, t.label());
                            }
                        });
                    ui.end_row();
                });

                // Edits apply immediately, as with bound settings
                if font_changed {
                    self.settings.font = font.format();
                }
            });
        self.show_preferences = open;
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::CTRL, egui::Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::CTRL, egui::Key::O)) {
            self.open_file_dialog();
        }

        // Search-text-changed: covers both typing and sidebar word clicks
        if self.search_query != self.last_query {
            self.last_query = self.search_query.clone();
            self.run_search();
        }

        self.render_header(ctx);
        self.render_search_bar(ctx);
        self.render_status_bar(ctx);
        self.render_sidebar(ctx);
        self.render_text_area(ctx);
        self.render_preferences(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(eframe::APP_KEY, self.settings.to_json());
    }
}

fn font_id_for(font: &FontSpec) -> egui::FontId {
    // egui ships two built-in families; anything that is not monospace
    // renders proportionally
    let family = if font.family.to_ascii_lowercase().contains("mono") {
        egui::FontFamily::Monospace
    } else {
        egui::FontFamily::Proportional
    };
    egui::FontId::new(font.size, family)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_id_family_mapping() {
        let mono = font_id_for(&FontSpec {
            family: "Monospace".to_owned(),
            size: 12.0,
        });
        assert_eq!(mono.family, egui::FontFamily::Monospace);

        let dejavu = font_id_for(&FontSpec {
            family: "DejaVu Sans Mono".to_owned(),
            size: 12.0,
        });
        assert_eq!(dejavu.family, egui::FontFamily::Monospace);

        let sans = font_id_for(&FontSpec {
            family: "Sans".to_owned(),
            size: 12.0,
        });
        assert_eq!(sans.family, egui::FontFamily::Proportional);
    }
}
