use crate::assistant::AssistantClient;
use crate::catalog::{CatalogStatus, Product};
use crate::event::AppEvent;
use crate::locale::Locale;
use crate::state::{RoutineState, TranscriptEntry};
use crate::store;
use crate::theme::Theme;
use eframe::egui::{self, Align, Color32, Layout, RichText, ScrollArea};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

pub struct GlowApp {
    rx: Receiver<AppEvent>,
    assistant: AssistantClient,
    state: RoutineState,
    theme: Theme,
    locale: Locale,
    data_dir: PathBuf,
    search_buffer: String,
    question_buffer: String,
    expanded_descriptions: HashSet<u32>,
    scroll_to_bottom: bool,
    theme_applied: bool,
}

impl GlowApp {
    pub fn new(
        rx: Receiver<AppEvent>,
        assistant: AssistantClient,
        state: RoutineState,
        data_dir: PathBuf,
        locale: Locale,
    ) -> Self {
        Self {
            rx,
            assistant,
            state,
            theme: Theme::default(),
            locale,
            data_dir,
            search_buffer: String::new(),
            question_buffer: String::new(),
            expanded_descriptions: HashSet::new(),
            scroll_to_bottom: false,
            theme_applied: false,
        }
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event, Some(ctx)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent, ctx: Option<&egui::Context>) {
        match event {
            AppEvent::CatalogLoaded(products) => {
                self.state.set_catalog(Ok(products));
            }
            AppEvent::CatalogFailed(message) => {
                self.state.set_catalog(Err(message));
            }
            AppEvent::AssistantReply(reply) => {
                self.state.assistant_replied(reply);
                self.scroll_to_bottom = true;
            }
            AppEvent::AssistantFailed(message) => {
                self.state.assistant_failed(message);
                self.scroll_to_bottom = true;
            }
        }
        if let Some(ctx) = ctx {
            ctx.request_repaint();
        }
    }

    fn pump_debounce(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.state.poll_search(now) {
            ctx.request_repaint();
        } else if let Some(deadline) = self.state.next_search_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    fn toggle_locale(&mut self, ctx: &egui::Context) {
        self.locale = self.locale.toggled();
        let prefs = store::Prefs {
            rtl: self.locale.is_rtl(),
        };
        if let Err(err) = store::save_prefs(&self.data_dir, &prefs) {
            tracing::warn!(error = %err, "failed to persist locale preference");
        }
        ctx.request_repaint();
    }

    fn row_layout(&self) -> Layout {
        if self.locale.is_rtl() {
            Layout::right_to_left(Align::Center)
        } else {
            Layout::left_to_right(Align::Center)
        }
    }

    fn text_layout(&self) -> Layout {
        if self.locale.is_rtl() {
            Layout::top_down(Align::Max)
        } else {
            Layout::top_down(Align::Min)
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let strings = self.locale.strings();
        let mut toggle_clicked = false;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.with_layout(self.row_layout(), |ui| {
                ui.heading(RichText::new(strings.app_title).color(self.theme.accent));
                ui.separator();
                toggle_clicked = ui.button(strings.locale_toggle).clicked();
            });
        });
        if toggle_clicked {
            self.toggle_locale(ctx);
        }
    }

    fn render_filter_bar(&mut self, ui: &mut egui::Ui) {
        let strings = self.locale.strings();
        let categories = self.state.categories();
        let mut category_change: Option<Option<String>> = None;
        let mut clear_clicked = false;

        ui.with_layout(self.row_layout(), |ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_buffer)
                    .desired_width(220.0)
                    .hint_text(strings.search_hint),
            );
            if response.changed() {
                self.state.search_input(&self.search_buffer, Instant::now());
            }

            ui.label(strings.category_label);
            let current = self.state.filter().category().map(|c| c.to_string());
            let selected_text = current
                .clone()
                .unwrap_or_else(|| strings.all_categories.to_string());
            egui::ComboBox::from_id_salt("category_filter")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(current.is_none(), strings.all_categories)
                        .clicked()
                    {
                        category_change = Some(None);
                    }
                    for category in &categories {
                        let is_current = current.as_deref() == Some(category.as_str());
                        if ui.selectable_label(is_current, category).clicked() {
                            category_change = Some(Some(category.clone()));
                        }
                    }
                });

            clear_clicked = ui.button(strings.clear_filters).clicked();
        });

        if let Some(category) = category_change {
            self.state.set_category(category);
        }
        if clear_clicked {
            self.search_buffer.clear();
            self.state.clear_filters();
        }
    }

    fn render_product_card(&mut self, ui: &mut egui::Ui, product: &Product) {
        let strings = self.locale.strings();
        let selected = self.state.is_selected(product.id);
        let expanded = self.expanded_descriptions.contains(&product.id);
        let mut toggle_selection = false;
        let mut toggle_description = false;

        let card_width = self.theme.card_width;
        self.theme.card_frame(selected).show(ui, |ui| {
            ui.set_width(card_width);
            ui.with_layout(self.text_layout(), |ui| {
                ui.strong(&product.name);
                ui.label(RichText::new(&product.brand).color(self.theme.text_muted));
                ui.label(RichText::new(&product.category).small());
                ui.with_layout(self.row_layout(), |ui| {
                    let select_label = if selected {
                        strings.deselect_product
                    } else {
                        strings.select_product
                    };
                    toggle_selection = ui.button(select_label).clicked();

                    let desc_label = if expanded {
                        strings.hide_description
                    } else {
                        strings.show_description
                    };
                    toggle_description = ui.button(desc_label).clicked();
                });
                if expanded {
                    let description = product
                        .description
                        .as_deref()
                        .unwrap_or("No description available.");
                    ui.label(RichText::new(description).color(self.theme.text_muted));
                }
            });
        });

        if toggle_selection {
            self.state.toggle_selection(product.id);
        }
        if toggle_description {
            if expanded {
                self.expanded_descriptions.remove(&product.id);
            } else {
                self.expanded_descriptions.insert(product.id);
            }
        }
    }

    fn render_product_grid(&mut self, ui: &mut egui::Ui) {
        let strings = self.locale.strings();
        match self.state.catalog() {
            CatalogStatus::Loading => {
                ui.with_layout(self.text_layout(), |ui| {
                    ui.spinner();
                    ui.label(strings.loading_catalog);
                });
            }
            CatalogStatus::Failed(message) => {
                let message = message.clone();
                ui.with_layout(self.text_layout(), |ui| {
                    ui.label(
                        RichText::new(strings.catalog_failed).color(self.theme.danger).strong(),
                    );
                    ui.label(RichText::new(message).color(self.theme.text_muted));
                });
            }
            CatalogStatus::Ready(_) => {
                if self.state.visible_products().is_empty() {
                    let mut clear_clicked = false;
                    ui.with_layout(self.text_layout(), |ui| {
                        ui.label(RichText::new(strings.no_results).color(self.theme.text_muted));
                        clear_clicked = ui.button(strings.clear_filters).clicked();
                    });
                    if clear_clicked {
                        self.search_buffer.clear();
                        self.state.clear_filters();
                    }
                    return;
                }

                let visible: Vec<Product> = self.state.visible_products().to_vec();
                ScrollArea::vertical().id_salt("product_grid").show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        for product in &visible {
                            self.render_product_card(ui, product);
                        }
                    });
                });
            }
        }
    }

    fn render_selection_panel(&mut self, ctx: &egui::Context) {
        let strings = self.locale.strings();
        let side = if self.locale.is_rtl() {
            egui::SidePanel::left("selection_panel")
        } else {
            egui::SidePanel::right("selection_panel")
        };

        let mut removed: Option<u32> = None;
        let mut clear_clicked = false;
        let mut generate_clicked = false;

        side.resizable(true).default_width(260.0).show(ctx, |ui| {
            ui.heading(format!(
                "{} ({})",
                strings.selected_heading,
                self.state.selection().len()
            ));
            ui.separator();

            if self.state.selection().is_empty() {
                ui.label(RichText::new(strings.none_selected).color(self.theme.text_muted));
            } else {
                ScrollArea::vertical().id_salt("selection_list").show(ui, |ui| {
                    for product in self.state.selection() {
                        ui.with_layout(self.row_layout(), |ui| {
                            if ui.button(strings.remove_product).clicked() {
                                removed = Some(product.id);
                            }
                            ui.label(&product.name);
                        });
                    }
                });
                ui.separator();
                clear_clicked = ui.button(strings.clear_selection).clicked();
            }

            ui.separator();
            let can_generate =
                !self.state.selection().is_empty() && !self.state.awaiting_reply();
            generate_clicked = ui
                .add_enabled(can_generate, egui::Button::new(strings.generate_routine))
                .clicked();
            if self.state.selection().is_empty() {
                ui.label(
                    RichText::new(strings.select_first)
                        .small()
                        .color(self.theme.text_muted),
                );
            }
        });

        if let Some(id) = removed {
            self.state.remove_selection(id);
        }
        if clear_clicked {
            self.state.clear_selection();
        }
        if generate_clicked {
            if let Some(messages) = self.state.request_routine() {
                self.assistant.send(messages);
                self.scroll_to_bottom = true;
            }
        }
    }

    fn transcript_line(&self, entry: &TranscriptEntry) -> (String, Color32) {
        let strings = self.locale.strings();
        match entry {
            TranscriptEntry::User(text) => {
                (format!("[{}] {}", strings.you_label, text), self.theme.text_primary)
            }
            TranscriptEntry::Assistant(text) => (
                format!("[{}] {}", strings.advisor_label, text),
                self.theme.accent,
            ),
            TranscriptEntry::Notice(text) => (text.clone(), self.theme.text_muted),
            TranscriptEntry::Error(text) => (text.clone(), self.theme.danger),
        }
    }

    fn render_chat_panel(&mut self, ctx: &egui::Context) {
        let strings = self.locale.strings();
        let mut send_now = false;

        egui::TopBottomPanel::bottom("chat_panel")
            .resizable(true)
            .default_height(240.0)
            .show(ctx, |ui| {
                ui.heading(strings.chat_heading);

                let transcript_height = (ui.available_height() - 60.0).max(80.0);
                ScrollArea::vertical()
                    .id_salt("chat_transcript")
                    .max_height(transcript_height)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.with_layout(self.text_layout(), |ui| {
                            for entry in self.state.transcript() {
                                let (line, color) = self.transcript_line(entry);
                                ui.label(RichText::new(line).color(color));
                            }
                            if self.state.awaiting_reply() {
                                ui.with_layout(self.row_layout(), |ui| {
                                    ui.spinner();
                                    ui.label(
                                        RichText::new(strings.thinking)
                                            .color(self.theme.text_muted),
                                    );
                                });
                            }
                            if self.scroll_to_bottom {
                                ui.scroll_to_cursor(Some(Align::BOTTOM));
                            }
                        });
                    });
                self.scroll_to_bottom = false;

                ui.separator();
                let input_enabled = !self.state.awaiting_reply();
                ui.with_layout(self.row_layout(), |ui| {
                    let response = ui.add_enabled(
                        input_enabled,
                        egui::TextEdit::singleline(&mut self.question_buffer)
                            .desired_width(f32::INFINITY)
                            .hint_text(strings.ask_hint),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        send_now = true;
                    }
                    let clicked = ui
                        .add_enabled(
                            input_enabled && !self.question_buffer.trim().is_empty(),
                            egui::Button::new(strings.send),
                        )
                        .clicked();
                    send_now |= clicked;
                });
            });

        if send_now && !self.state.awaiting_reply() {
            let question = std::mem::take(&mut self.question_buffer);
            if let Some(messages) = self.state.ask(&question) {
                self.assistant.send(messages);
            }
            self.scroll_to_bottom = true;
        }
    }

    fn render_center(&mut self, ctx: &egui::Context) {
        let strings = self.locale.strings();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(strings.products_heading);
            self.render_filter_bar(ui);
            ui.separator();
            self.render_product_grid(ui);
        });
    }
}

impl eframe::App for GlowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            self.theme.apply_visuals(ctx);
            self.theme_applied = true;
        }

        self.drain_events(ctx);
        self.pump_debounce(ctx);

        self.render_top_bar(ctx);
        self.render_selection_panel(ctx);
        self.render_chat_panel(ctx);
        self.render_center(ctx);
    }
}
