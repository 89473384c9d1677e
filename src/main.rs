//*** START FILE: src/main.rs ***//
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use eframe::{egui, App, NativeOptions};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordquiz_rust_gui::config::{self, Config};
use wordquiz_rust_gui::quiz::{parse_requested_count, AnswerOutcome, QuizEngine, QuizMode, QuizSettings};
use wordquiz_rust_gui::repository::{NewWord, Selection, TaxonomyFilter, Word, WordId};
use wordquiz_rust_gui::{FileStore, VocabularyBook};

#[derive(Parser, Debug)]
#[command(name = "wordquiz")]
#[command(about = "Vocabulary flashcards organised by genre")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Overrides data_dir from the config file
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Home,
    Genres,
    Settings,
    Quiz,
    Result,
}

#[derive(Debug, Clone)]
enum PendingDelete {
    Genre(String),
    SubGenre(String, String),
    SubSubGenre(String, String, String),
    Word(WordId, String),
}

impl PendingDelete {
    fn question(&self) -> String {
        match self {
            PendingDelete::Genre(g) => {
                format!("Delete \"{}\"?\nEvery word in this genre is deleted too.", g)
            }
            PendingDelete::SubGenre(g, s) => {
                format!("Delete \"{} → {}\"?\nEvery word in this sub-genre is deleted too.", g, s)
            }
            PendingDelete::SubSubGenre(g, s, ss) => format!(
                "Delete \"{} → {} → {}\"?\nEvery word in this sub-sub-genre is deleted too.",
                g, s, ss
            ),
            PendingDelete::Word(_, word) => format!("Delete \"{}\"?", word),
        }
    }
}

#[derive(Debug, Clone)]
struct WordEdit {
    id: WordId,
    word: String,
    alts: String,
    meaning: String,
}

/// Everything the panels can ask for; applied after the frame is laid out.
#[derive(Debug, Clone)]
enum UiAction {
    Show(Page),
    AddGenre,
    AddSubGenre(String),
    AddSubSubGenre(String, String),
    RequestDelete(PendingDelete),
    ConfirmDelete,
    CancelDelete,
    RegisterWord,
    ToggleEnabled(WordId),
    BeginEdit(WordId),
    SaveEdit,
    CancelEdit,
    FilterChanged,
    StartQuiz,
    SubmitAnswer,
    NextQuestion,
    Restart,
}

struct WordQuizApp {
    book: VocabularyBook<FileStore>,
    quiz: QuizEngine,
    page: Page,
    status: Option<String>,
    pending_delete: Option<PendingDelete>,

    new_genre: String,
    /// Name inputs for new children, keyed by parent path
    child_names: HashMap<String, String>,

    search: String,
    new_word: NewWord,
    editing: Option<WordEdit>,
    /// Leaf whose headers are expanded on the next frame
    reveal_leaf: Option<(String, String, String)>,

    filter: TaxonomyFilter,
    quiz_mode: QuizMode,
    count_input: String,

    answer: String,
    last_outcome: Option<AnswerOutcome>,
}

fn child_key(genre: &str, sub_genre: Option<&str>) -> String {
    match sub_genre {
        Some(sub) => format!("{}\u{1f}{}", genre, sub),
        None => genre.to_string(),
    }
}

/// Whether `path` (genre, then sub-genre, then leaf) leads to the leaf being revealed.
fn is_revealed(reveal: Option<&(String, String, String)>, path: &[&str]) -> bool {
    reveal.map_or(false, |(genre, sub_genre, leaf)| {
        [genre, sub_genre, leaf]
            .iter()
            .zip(path)
            .all(|(want, have)| want.as_str() == *have)
    })
}

fn selection_label(selection: &Selection) -> String {
    match selection {
        Selection::All => "All".to_string(),
        Selection::Only(name) if name.is_empty() => "(none)".to_string(),
        Selection::Only(name) => name.clone(),
    }
}

/// Filter select box; returns true when the choice changed.
fn selection_combo(ui: &mut egui::Ui, id: &str, label: &str, current: &mut Selection, names: &[&str]) -> bool {
    let before = current.clone();
    ui.label(label);
    egui::ComboBox::from_id_source(id)
        .selected_text(selection_label(current))
        .show_ui(ui, |ui| {
            ui.selectable_value(current, Selection::All, "All");
            ui.selectable_value(current, Selection::Only(String::new()), "(none)");
            for name in names {
                ui.selectable_value(current, Selection::Only(name.to_string()), *name);
            }
        });
    *current != before
}

/// Registration select box over plain names; empty means "not chosen".
fn name_combo(ui: &mut egui::Ui, id: &str, placeholder: &str, current: &mut String, names: &[&str]) -> bool {
    let before = current.clone();
    let shown = if current.is_empty() { placeholder.to_string() } else { current.clone() };
    egui::ComboBox::from_id_source(id)
        .selected_text(shown)
        .show_ui(ui, |ui| {
            for name in names {
                ui.selectable_value(current, name.to_string(), *name);
            }
        });
    *current != before
}

fn word_table(
    ui: &mut egui::Ui,
    id_source: &str,
    words: &[&Word],
    editing: &mut Option<WordEdit>,
    actions: &mut Vec<UiAction>,
) {
    if words.is_empty() {
        ui.weak("No words.");
        return;
    }
    egui::Grid::new(id_source).striped(true).num_columns(6).show(ui, |ui| {
        ui.strong("Quiz");
        ui.strong("Word");
        ui.strong("Alternates");
        ui.strong("Meaning");
        ui.strong("");
        ui.strong("");
        ui.end_row();

        for word in words {
            let mut enabled = word.enabled;
            if ui.checkbox(&mut enabled, "").changed() {
                actions.push(UiAction::ToggleEnabled(word.id));
            }
            match editing {
                Some(edit) if edit.id == word.id => {
                    ui.add(egui::TextEdit::singleline(&mut edit.word).desired_width(120.0));
                    ui.add(egui::TextEdit::singleline(&mut edit.alts).desired_width(120.0));
                    ui.add(egui::TextEdit::singleline(&mut edit.meaning).desired_width(160.0));
                    if ui.button("Save").clicked() {
                        actions.push(UiAction::SaveEdit);
                    }
                    if ui.button("Cancel").clicked() {
                        actions.push(UiAction::CancelEdit);
                    }
                }
                _ => {
                    ui.label(word.word.as_str());
                    ui.label(word.alts_display());
                    ui.label(word.meaning.as_str());
                    if ui.button("Edit").clicked() {
                        actions.push(UiAction::BeginEdit(word.id));
                    }
                    if ui.button("Delete").clicked() {
                        actions.push(UiAction::RequestDelete(PendingDelete::Word(
                            word.id,
                            word.word.clone(),
                        )));
                    }
                }
            }
            ui.end_row();
        }
    });
}

fn install_font(ctx: &egui::Context, path: &Path) -> std::io::Result<()> {
    let bytes = std::fs::read(path)?;
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("user_font".to_owned(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, "user_font".to_owned());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push("user_font".to_owned());
    ctx.set_fonts(fonts);
    Ok(())
}

impl WordQuizApp {
    fn new(cc: &eframe::CreationContext<'_>, book: VocabularyBook<FileStore>, config: &Config) -> Self {
        if let Some(font_path) = &config.font_path {
            if let Err(e) = install_font(&cc.egui_ctx, font_path) {
                warn!("Could not load font {}: {}", font_path.display(), e);
            }
        }
        let filter = TaxonomyFilter::all();
        let count_input = book.max_quiz_count(&filter).to_string();
        Self {
            book,
            quiz: QuizEngine::new(),
            page: Page::Settings,
            status: None,
            pending_delete: None,
            new_genre: String::new(),
            child_names: HashMap::new(),
            search: String::new(),
            new_word: NewWord::default(),
            editing: None,
            reveal_leaf: None,
            filter,
            quiz_mode: config.default_quiz_mode,
            count_input,
            answer: String::new(),
            last_outcome: None,
        }
    }

    fn report<T>(&mut self, result: wordquiz_rust_gui::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("{}", e);
                self.status = Some(e.to_string());
                None
            }
        }
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Show(page) => {
                if self.quiz.is_in_progress() && page != Page::Quiz {
                    self.quiz.abandon();
                }
                if page == Page::Settings {
                    self.refresh_count();
                }
                self.editing = None;
                self.page = page;
            }
            UiAction::AddGenre => {
                let result = self.book.add_genre(&self.new_genre);
                match self.report(result) {
                    Some(true) => self.new_genre.clear(),
                    Some(false) => self.status = Some(format!("\"{}\" already exists", self.new_genre.trim())),
                    None => {}
                }
            }
            UiAction::AddSubGenre(genre) => {
                let name = self.child_names.remove(&child_key(&genre, None)).unwrap_or_default();
                let result = self.book.add_sub_genre(&genre, &name);
                self.report(result);
            }
            UiAction::AddSubSubGenre(genre, sub_genre) => {
                let name = self
                    .child_names
                    .remove(&child_key(&genre, Some(&sub_genre)))
                    .unwrap_or_default();
                let result = self.book.add_sub_sub_genre(&genre, &sub_genre, &name);
                self.report(result);
            }
            UiAction::RequestDelete(pending) => self.pending_delete = Some(pending),
            UiAction::CancelDelete => self.pending_delete = None,
            UiAction::ConfirmDelete => {
                if let Some(pending) = self.pending_delete.take() {
                    let result = match &pending {
                        PendingDelete::Genre(g) => self.book.delete_genre(g),
                        PendingDelete::SubGenre(g, s) => self.book.delete_sub_genre(g, s),
                        PendingDelete::SubSubGenre(g, s, ss) => self.book.delete_sub_sub_genre(g, s, ss),
                        PendingDelete::Word(id, _) => self.book.delete_word(*id).map(|_| 1),
                    };
                    if let Some(removed) = self.report(result) {
                        self.status = Some(format!("Deleted {} word(s)", removed));
                    }
                }
            }
            UiAction::RegisterWord => {
                let result = self.book.register_word(self.new_word.clone());
                if self.report(result).is_some() {
                    self.status = Some(format!("Registered \"{}\"", self.new_word.word.trim()));
                    self.reveal_leaf = Some((
                        self.new_word.genre.trim().to_string(),
                        self.new_word.sub_genre.trim().to_string(),
                        self.new_word.sub_sub_genre.trim().to_string(),
                    ));
                    self.new_word.word.clear();
                    self.new_word.alts.clear();
                    self.new_word.meaning.clear();
                }
            }
            UiAction::ToggleEnabled(id) => {
                let result = self.book.toggle_enabled(id);
                self.report(result);
            }
            UiAction::BeginEdit(id) => {
                self.editing = self.book.words().get(id).map(|w| WordEdit {
                    id,
                    word: w.word.clone(),
                    alts: w.alts_input(),
                    meaning: w.meaning.clone(),
                });
            }
            UiAction::SaveEdit => {
                if let Some(edit) = self.editing.take() {
                    let result = self.book.update_word(edit.id, &edit.word, &edit.alts, &edit.meaning);
                    if self.report(result).is_none() {
                        self.editing = Some(edit);
                    }
                }
            }
            UiAction::CancelEdit => self.editing = None,
            UiAction::FilterChanged => self.refresh_count(),
            UiAction::StartQuiz => {
                let settings = QuizSettings {
                    filter: self.filter.clone(),
                    mode: self.quiz_mode,
                    requested_count: parse_requested_count(&self.count_input),
                };
                let result = self.book.start_quiz(&mut self.quiz, settings);
                if let Some(total) = self.report(result) {
                    self.count_input = total.to_string();
                    self.answer.clear();
                    self.last_outcome = None;
                    self.status = None;
                    self.page = Page::Quiz;
                }
            }
            UiAction::SubmitAnswer => {
                let result = self.quiz.check_answer(&self.answer);
                self.last_outcome = self.report(result);
            }
            UiAction::NextQuestion => {
                let result = self.quiz.advance();
                match self.report(result) {
                    Some(Some(_)) => self.page = Page::Result,
                    Some(None) => {
                        self.answer.clear();
                        self.last_outcome = None;
                    }
                    None => {}
                }
            }
            UiAction::Restart => {
                self.quiz.abandon();
                self.refresh_count();
                self.page = Page::Settings;
            }
        }
    }

    /// Prefills the question count with the number of quizzable words.
    fn refresh_count(&mut self) {
        self.count_input = self.book.max_quiz_count(&self.filter).to_string();
    }

    fn home_page(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.heading("Register a word");
        let reveal = self.reveal_leaf.take();
        let tree = self.book.tree();
        ui.horizontal(|ui| {
            let genres = tree.genres();
            if name_combo(ui, "reg_genre", "Genre", &mut self.new_word.genre, &genres) {
                self.new_word.sub_genre.clear();
                self.new_word.sub_sub_genre.clear();
            }
            let subs = tree.sub_genres(&self.new_word.genre);
            if name_combo(ui, "reg_sub", "Sub-genre", &mut self.new_word.sub_genre, &subs) {
                self.new_word.sub_sub_genre.clear();
            }
            let leaves = tree.sub_sub_genres(&self.new_word.genre, &self.new_word.sub_genre);
            name_combo(ui, "reg_subsub", "Sub-sub-genre", &mut self.new_word.sub_sub_genre, &leaves);
        });
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut self.new_word.word).hint_text("Word"));
            ui.add(egui::TextEdit::singleline(&mut self.new_word.alts).hint_text("Alternates (comma separated)"));
            ui.add(egui::TextEdit::singleline(&mut self.new_word.meaning).hint_text("Meaning"));
            if ui.button("Register").clicked() {
                actions.push(UiAction::RegisterWord);
            }
        });
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.search);
        });
        ui.add_space(5.0);

        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            if !self.search.trim().is_empty() {
                let hits = self.book.list_words(&self.search);
                word_table(ui, "search_results", &hits, &mut self.editing, actions);
                return;
            }
            let reveal = reveal.as_ref();
            for genre in tree.genres() {
                let open_genre = is_revealed(reveal, &[genre]);
                egui::CollapsingHeader::new(genre)
                    .id_source(("word_tree", genre))
                    .open(open_genre.then_some(true))
                    .show(ui, |ui| {
                        for sub in tree.sub_genres(genre) {
                            let open_sub = is_revealed(reveal, &[genre, sub]);
                            egui::CollapsingHeader::new(sub)
                                .id_source(("word_tree", genre, sub))
                                .open(open_sub.then_some(true))
                                .show(ui, |ui| {
                                    for leaf in tree.sub_sub_genres(genre, sub) {
                                        let open_leaf = is_revealed(reveal, &[genre, sub, leaf]);
                                        egui::CollapsingHeader::new(leaf)
                                            .id_source(("word_tree", genre, sub, leaf))
                                            .open(open_leaf.then_some(true))
                                            .show(ui, |ui| {
                                                let words = self.book.words_in_leaf(genre, sub, leaf);
                                                let grid_id = format!("table_{}_{}_{}", genre, sub, leaf);
                                                word_table(ui, &grid_id, &words, &mut self.editing, actions);
                                            });
                                    }
                                });
                        }
                    });
            }
        });
    }

    fn genre_page(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.heading("Genres");
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut self.new_genre).hint_text("New genre"));
            if ui.button("Add genre").clicked() {
                actions.push(UiAction::AddGenre);
            }
        });
        ui.separator();

        let tree = self.book.tree();
        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            for genre in tree.genres() {
                egui::CollapsingHeader::new(genre).id_source(("genre_tree", genre)).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let name = self.child_names.entry(child_key(genre, None)).or_default();
                        ui.add(egui::TextEdit::singleline(name).hint_text("New sub-genre"));
                        if ui.button("Add sub-genre").clicked() {
                            actions.push(UiAction::AddSubGenre(genre.to_string()));
                        }
                        if ui.button("Delete genre").clicked() {
                            actions.push(UiAction::RequestDelete(PendingDelete::Genre(genre.to_string())));
                        }
                    });
                    for sub in tree.sub_genres(genre) {
                        egui::CollapsingHeader::new(sub)
                            .id_source(("genre_tree", genre, sub))
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    let name = self.child_names.entry(child_key(genre, Some(sub))).or_default();
                                    ui.add(egui::TextEdit::singleline(name).hint_text("New sub-sub-genre"));
                                    if ui.button("Add sub-sub-genre").clicked() {
                                        actions.push(UiAction::AddSubSubGenre(genre.to_string(), sub.to_string()));
                                    }
                                    if ui.button("Delete sub-genre").clicked() {
                                        actions.push(UiAction::RequestDelete(PendingDelete::SubGenre(
                                            genre.to_string(),
                                            sub.to_string(),
                                        )));
                                    }
                                });
                                for leaf in tree.sub_sub_genres(genre, sub) {
                                    ui.horizontal(|ui| {
                                        ui.label(leaf);
                                        if ui.small_button("Delete").clicked() {
                                            actions.push(UiAction::RequestDelete(PendingDelete::SubSubGenre(
                                                genre.to_string(),
                                                sub.to_string(),
                                                leaf.to_string(),
                                            )));
                                        }
                                    });
                                }
                            });
                    }
                });
            }
        });
    }

    fn settings_page(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.heading("Quiz settings");
        let tree = self.book.tree();

        let genre_names = tree.genres();
        let mut changed = false;
        ui.horizontal(|ui| {
            if selection_combo(ui, "filter_genre", "Genre:", &mut self.filter.genre, &genre_names) {
                self.filter.sub_genre = Selection::All;
                self.filter.sub_sub_genre = Selection::All;
                changed = true;
            }
        });

        let sub_names = self.filter.genre.as_name().map(|g| tree.sub_genres(g)).unwrap_or_default();
        ui.horizontal(|ui| {
            if selection_combo(ui, "filter_sub", "Sub-genre:", &mut self.filter.sub_genre, &sub_names) {
                self.filter.sub_sub_genre = Selection::All;
                changed = true;
            }
        });

        let leaf_names = match (self.filter.genre.as_name(), self.filter.sub_genre.as_name()) {
            (Some(g), Some(s)) if !s.is_empty() => tree.sub_sub_genres(g, s),
            _ => Vec::new(),
        };
        ui.horizontal(|ui| {
            if selection_combo(ui, "filter_subsub", "Sub-sub-genre:", &mut self.filter.sub_sub_genre, &leaf_names) {
                changed = true;
            }
        });
        if changed {
            actions.push(UiAction::FilterChanged);
        }

        ui.horizontal(|ui| {
            ui.label("Mode:");
            ui.radio_value(&mut self.quiz_mode, QuizMode::MeaningToWord, "Meaning → word");
            ui.radio_value(&mut self.quiz_mode, QuizMode::WordToMeaning, "Word → meaning");
        });

        let max = self.book.max_quiz_count(&self.filter);
        ui.horizontal(|ui| {
            ui.label("Questions:");
            ui.add(egui::TextEdit::singleline(&mut self.count_input).desired_width(60.0));
            ui.label(format!("(max {})", max));
        });
        ui.add_space(8.0);
        if ui.button("Start quiz").clicked() {
            actions.push(UiAction::StartQuiz);
        }
    }

    fn quiz_page(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let question = match self.quiz.current_question() {
            Some(q) => q,
            None => {
                ui.label("No quiz is running.");
                if ui.button("Back to settings").clicked() {
                    actions.push(UiAction::Restart);
                }
                return;
            }
        };
        ui.label(question.progress_text());
        ui.add_space(5.0);
        ui.label(egui::RichText::new(format!("Q: {}", question.prompt)).size(24.0));
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            let response = ui.add(egui::TextEdit::singleline(&mut self.answer).hint_text("Your answer"));
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (submitted || ui.button("Check").clicked()) && self.last_outcome.is_none() {
                actions.push(UiAction::SubmitAnswer);
            }
        });

        if let Some(outcome) = &self.last_outcome {
            let color = if outcome.correct {
                egui::Color32::DARK_GREEN
            } else {
                egui::Color32::RED
            };
            ui.colored_label(color, outcome.verdict_text());
            if ui.button("Next").clicked() {
                actions.push(UiAction::NextQuestion);
            }
        }
        ui.separator();
        if ui.button("Quit to settings").clicked() {
            actions.push(UiAction::Restart);
        }
    }

    fn result_page(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.heading("Result");
        match self.quiz.result() {
            Some(result) => {
                ui.label(egui::RichText::new(result.score_text()).size(24.0));
            }
            None => {
                ui.label("No finished quiz.");
            }
        }
        if ui.button("Restart").clicked() {
            actions.push(UiAction::Restart);
        }
    }
}

impl App for WordQuizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions: Vec<UiAction> = Vec::new();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (page, label) in [
                    (Page::Home, "Words"),
                    (Page::Genres, "Genres"),
                    (Page::Settings, "Quiz"),
                ] {
                    let selected = self.page == page
                        || (page == Page::Settings && matches!(self.page, Page::Quiz | Page::Result));
                    if ui.selectable_label(selected, label).clicked() && !selected {
                        actions.push(UiAction::Show(page));
                    }
                }
            });
            if let Some(status) = &self.status {
                ui.colored_label(egui::Color32::LIGHT_RED, status.as_str());
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Home => self.home_page(ui, &mut actions),
            Page::Genres => self.genre_page(ui, &mut actions),
            Page::Settings => self.settings_page(ui, &mut actions),
            Page::Quiz => self.quiz_page(ui, &mut actions),
            Page::Result => self.result_page(ui, &mut actions),
        });

        if let Some(pending) = &self.pending_delete {
            egui::Window::new("Confirm")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(pending.question());
                    ui.horizontal(|ui| {
                        if ui.button("Delete").clicked() {
                            actions.push(UiAction::ConfirmDelete);
                        }
                        if ui.button("Cancel").clicked() {
                            actions.push(UiAction::CancelDelete);
                        }
                    });
                });
        }

        for action in actions {
            self.apply(action);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match config::load_config_from_file(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}. Using default settings.", e);
            Config::default()
        }
    };
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = FileStore::new(config.data_dir.clone());
    info!("Using data directory {}", store.dir().display());
    let book = VocabularyBook::open(store)?;

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "WordQuiz",
        options,
        Box::new(move |cc| Box::new(WordQuizApp::new(cc, book, &config))),
    )?;
    Ok(())
}
//*** END FILE: src/main.rs ***//
