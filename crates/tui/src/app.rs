use std::{io, ops::Range, path::PathBuf, thread, time::Duration};

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tokio::{spawn, sync::mpsc, task};
use tracing::{debug, error, info};
use vault_core::{
    export::{export_site, ExportReport},
    format,
    library::{LibraryCard, LibraryStats, Thumbnail},
    GameRecord, GenreTag, LibraryView, Lookup, Route, Storefront,
};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_ADDRESS_LEN: usize = 128;
const MENU_ITEMS: [&str; 4] = ["Store", "Library", "Export site", "Quit"];
const TITLE_BANNER: &str = "C A M B R I A N   V A U L T";

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    accent_alt: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            accent_alt: Color::Magenta,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Store,
    Game,
    Library,
}

/// Single-line editor for a request target such as `game.php?id=arc`.
#[derive(Debug, Clone, Default)]
struct AddressPrompt {
    input: String,
    cursor: usize,
}

impl AddressPrompt {
    fn move_cursor(&mut self, delta: isize) {
        let len = self.input.len() as isize;
        let next = (self.cursor as isize + delta).clamp(0, len);
        self.cursor = next as usize;
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    fn insert(&mut self, ch: char) {
        if self.input.len() >= MAX_ADDRESS_LEN {
            return;
        }
        if ch.is_ascii() && !ch.is_ascii_control() {
            self.input.insert(self.cursor, ch);
            self.cursor += ch.len_utf8();
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 && self.cursor <= self.input.len() {
            self.cursor -= 1;
            self.input.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
        }
    }

    fn value(&self) -> Option<&str> {
        let trimmed = self.input.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Scroll position of a list whose length is owned elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ListCursor {
    cursor: usize,
    offset: usize,
    height: usize,
}

impl ListCursor {
    fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let idx = (self.cursor as isize + delta).clamp(0, len as isize - 1);
        self.cursor = idx as usize;
        self.ensure_visible(len);
    }

    fn move_to(&mut self, index: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = index.min(len - 1);
        self.ensure_visible(len);
    }

    fn move_to_end(&mut self, len: usize) {
        self.move_to(len.saturating_sub(1), len);
    }

    fn page(&mut self, direction: isize, len: usize) {
        if len == 0 || self.height == 0 {
            return;
        }
        let delta = self.height.min(len) as isize;
        self.move_by(direction * delta, len);
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.reset();
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
        self.ensure_visible(len);
    }

    fn ensure_visible(&mut self, len: usize) {
        if len == 0 || self.height == 0 {
            self.offset = 0;
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
        self.offset = self.offset.min(len.saturating_sub(self.height));
    }

    fn window(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        start..(start + self.height.max(1)).min(len)
    }
}

enum AppEvent {
    Input(Event),
    Tick,
    Exported(Result<ExportReport>),
}

struct UiState {
    status: String,
    mode: Mode,
    should_quit: bool,
    menu_cursor: usize,
    store: ListCursor,
    library: ListCursor,
    game_scroll: u16,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            mode: Mode::Browse,
            should_quit: false,
            menu_cursor: 0,
            store: ListCursor::default(),
            library: ListCursor::default(),
            game_scroll: 0,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    fn move_menu_cursor(&mut self, delta: isize) {
        let last = MENU_ITEMS.len() as isize - 1;
        self.menu_cursor = (self.menu_cursor as isize + delta).clamp(0, last) as usize;
    }
}

/// Terminal storefront: menu, store listing, game detail and library.
pub struct VaultApp {
    storefront: Storefront,
    library: LibraryView,
    export_dir: PathBuf,
    state: UiState,
    screen: Screen,
    game_id: String,
    game_return: Screen,
    address_prompt: Option<AddressPrompt>,
    pending_export: bool,
    event_tx: Option<mpsc::Sender<AppEvent>>,
    theme: Theme,
}

impl VaultApp {
    pub fn new(storefront: Storefront, export_dir: PathBuf) -> Self {
        let library = storefront.library_view();
        let game_id = storefront.catalog().default_record().id.clone();
        Self {
            storefront,
            library,
            export_dir,
            state: UiState::default(),
            screen: Screen::Menu,
            game_id,
            game_return: Screen::Store,
            address_prompt: None,
            pending_export: false,
            event_tx: None,
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.state.set_status(format!(
            "Loaded {} games and {} owned relics",
            self.storefront.catalog().len(),
            self.library.entries().len()
        ));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }

            if self.state.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        info!("Storefront closed");
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if self.address_prompt.is_some() {
                    if let Event::Key(key) = event {
                        self.handle_address_prompt_key(key);
                    }
                } else if let Err(err) = self.handle_input(event) {
                    self.state.set_status(format!("Error: {err}"));
                }
                true
            }
            Some(AppEvent::Tick) => {
                self.handle_tick();
                true
            }
            Some(AppEvent::Exported(result)) => {
                self.pending_export = false;
                match result {
                    Ok(report) => {
                        info!(dir = %report.dir.display(), pages = report.written.len(), "Export finished");
                        self.state.set_status(format!(
                            "Exported {} pages to {}",
                            report.written.len(),
                            report.dir.display()
                        ));
                    }
                    Err(err) => {
                        error!(?err, "Export failed");
                        self.state.set_status(format!("Export failed: {err:#}"));
                    }
                }
                true
            }
            None => false,
        }
    }

    fn handle_tick(&mut self) {
        if self.state.mode == Mode::Search {
            let query = &self.library.state().search_query;
            self.state.set_status(format!("Search: {query}"));
        }
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if self.state.mode == Mode::Search {
            return self.handle_search_key(key);
        }
        if self.handle_global_shortcut(&key) {
            return Ok(());
        }
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Store => self.handle_store_key(key),
            Screen::Game => self.handle_game_key(key),
            Screen::Library => self.handle_library_key(key),
        }
        Ok(())
    }

    fn handle_global_shortcut(&mut self, key: &KeyEvent) -> bool {
        if !(key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT) {
            return false;
        }
        match key.code {
            KeyCode::Char('q') => {
                self.state.should_quit = true;
                true
            }
            KeyCode::Char(':') => {
                self.address_prompt = Some(AddressPrompt::default());
                self.state.set_status("Enter a page address");
                true
            }
            KeyCode::Char('e') => {
                self.start_export();
                true
            }
            _ => false,
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.move_menu_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_menu_cursor(-1),
            KeyCode::Enter => match self.state.menu_cursor {
                0 => self.open_route(Route::Store),
                1 => self.open_route(Route::Profile),
                2 => self.start_export(),
                3 => self.state.should_quit = true,
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_store_key(&mut self, key: KeyEvent) {
        let len = self.storefront.catalog().len();
        let list = &mut self.state.store;
        match key.code {
            KeyCode::Esc => self.screen = Screen::Menu,
            KeyCode::Char('j') | KeyCode::Down => list.move_by(1, len),
            KeyCode::Char('k') | KeyCode::Up => list.move_by(-1, len),
            KeyCode::Char('g') | KeyCode::Home => list.move_to(0, len),
            KeyCode::Char('G') | KeyCode::End => list.move_to_end(len),
            KeyCode::PageDown => list.page(1, len),
            KeyCode::PageUp => list.page(-1, len),
            KeyCode::Enter => {
                if let Some(record) = self.selected_record() {
                    let id = record.id.clone();
                    self.open_game(Some(id), Screen::Store);
                }
            }
            _ => {}
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.screen = self.game_return,
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.game_scroll = self.state.game_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.game_scroll = self.state.game_scroll.saturating_sub(1);
            }
            KeyCode::PageDown => self.state.game_scroll = self.state.game_scroll.saturating_add(10),
            KeyCode::PageUp => self.state.game_scroll = self.state.game_scroll.saturating_sub(10),
            KeyCode::Char('g') | KeyCode::Home => self.state.game_scroll = 0,
            _ => {}
        }
    }

    fn handle_library_key(&mut self, key: KeyEvent) {
        let len = self.library.result().visible_count;
        match key.code {
            KeyCode::Esc => self.screen = Screen::Menu,
            KeyCode::Char('j') | KeyCode::Down => self.state.library.move_by(1, len),
            KeyCode::Char('k') | KeyCode::Up => self.state.library.move_by(-1, len),
            KeyCode::Char('g') | KeyCode::Home => self.state.library.move_to(0, len),
            KeyCode::Char('G') | KeyCode::End => self.state.library.move_to_end(len),
            KeyCode::Char('/') => {
                self.state.mode = Mode::Search;
                self.state.set_status("Search: type to filter, Enter keeps, Esc clears");
            }
            KeyCode::Tab => {
                let count = self.library.next_filter().visible_count;
                self.after_filter_change(count);
            }
            KeyCode::BackTab => {
                let count = self.library.previous_filter().visible_count;
                self.after_filter_change(count);
            }
            KeyCode::Char(ch @ '1'..='6') => {
                let idx = ch as usize - '1' as usize;
                if let Some(tag) = GenreTag::ALL.get(idx).copied() {
                    let count = self.library.on_filter_select(tag).visible_count;
                    self.after_filter_change(count);
                }
            }
            KeyCode::Char('r') => {
                let count = self.library.reset().visible_count;
                self.after_filter_change(count);
            }
            KeyCode::Enter => {
                let card = self
                    .library
                    .result()
                    .cards()
                    .into_iter()
                    .nth(self.state.library.cursor);
                if let Some(card) = card {
                    debug!(id = %card.id, href = %card.href, "Opening library card");
                    self.open_game(Some(card.id), Screen::Library);
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.state.mode = Mode::Browse;
                let count = self.library.on_query_change("").visible_count;
                self.state.library.reset();
                self.state
                    .set_status(format!("Search cleared • {count} visible"));
            }
            KeyCode::Enter => {
                self.state.mode = Mode::Browse;
                let query = self.library.state().search_query.trim().to_string();
                let count = self.library.result().visible_count;
                self.state
                    .set_status(format!("Search applied: {query} • {count} visible"));
            }
            KeyCode::Backspace => {
                let count = self.library.on_query_pop().visible_count;
                self.state.library.clamp(count);
            }
            KeyCode::Char(ch) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    let count = self.library.on_query_push(ch).visible_count;
                    self.state.library.clamp(count);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_address_prompt_key(&mut self, key: KeyEvent) {
        let mut submit: Option<String> = None;
        let mut cancel = false;
        if let Some(prompt) = self.address_prompt.as_mut() {
            match key.code {
                KeyCode::Esc => cancel = true,
                KeyCode::Enter => match prompt.value() {
                    Some(target) => submit = Some(target.to_string()),
                    None => cancel = true,
                },
                KeyCode::Left => prompt.move_cursor(-1),
                KeyCode::Right => prompt.move_cursor(1),
                KeyCode::Home => prompt.move_home(),
                KeyCode::End => prompt.move_end(),
                KeyCode::Backspace => prompt.backspace(),
                KeyCode::Delete => prompt.delete(),
                KeyCode::Char(ch) => {
                    if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                        prompt.insert(ch);
                    }
                }
                _ => {}
            }
        }

        if cancel {
            self.address_prompt = None;
            self.state.set_status("Navigation cancelled");
            return;
        }

        if let Some(target) = submit {
            self.address_prompt = None;
            let route = Route::parse(&target);
            info!(%target, ?route, "Address submitted");
            self.open_route(route);
        }
    }

    fn open_route(&mut self, route: Route) {
        match route {
            Route::Home => {
                self.screen = Screen::Menu;
                self.state.set_status("Home");
            }
            Route::Store => {
                self.screen = Screen::Store;
                self.state.mode = Mode::Browse;
                self.state.set_status("Browsing the vault");
            }
            Route::Game { id } => {
                let back = if self.screen == Screen::Game {
                    self.game_return
                } else {
                    self.screen
                };
                self.open_game(id, back);
            }
            Route::Profile => {
                self.screen = Screen::Library;
                self.state.mode = Mode::Browse;
                let count = self.library.result().visible_count;
                self.state.library.clamp(count);
                self.state.set_status(format!("{count} relics in view"));
            }
            Route::Header => {
                self.state
                    .set_status("The header partial is only available as an export");
            }
            Route::NotFound(path) => {
                self.state.set_status(format!("Nothing found at {path}"));
            }
        }
    }

    fn open_game(&mut self, id: Option<String>, back: Screen) {
        let requested = id.unwrap_or_default();
        let lookup = self.storefront.catalog().lookup(&requested);
        let record = lookup.record();
        self.game_id = record.id.clone();
        self.game_return = back;
        self.state.game_scroll = 0;
        self.screen = Screen::Game;
        match lookup {
            Lookup::Found(record) => self.state.set_status(record.display_name()),
            Lookup::Fallback(record) => self.state.set_status(format!(
                "Unknown game \"{requested}\"; showing {}",
                record.title
            )),
        }
    }

    fn after_filter_change(&mut self, count: usize) {
        self.state.library.reset();
        let tag = self.library.state().active_filter;
        self.state
            .set_status(format!("Filter: {} • {count} visible", tag.label()));
    }

    fn start_export(&mut self) {
        if self.pending_export {
            self.state.set_status("An export is already running");
            return;
        }
        let Some(sender) = self.event_tx.clone() else {
            self.state
                .set_status("Internal error: event channel unavailable");
            error!("event_channel_missing");
            return;
        };

        let storefront = self.storefront.clone();
        let dir = self.export_dir.clone();
        let year = Local::now().year();
        self.pending_export = true;
        info!(dir = %dir.display(), year, "Exporting site");
        self.state
            .set_status(format!("Exporting to {}…", dir.display()));
        spawn(async move {
            let result = task::spawn_blocking(move || export_site(&dir, &storefront, year))
                .await
                .map_err(|err| anyhow!("export task failed: {err}"))
                .and_then(|exported| exported.map_err(anyhow::Error::from));
            let _ = sender.send(AppEvent::Exported(result)).await;
        });
    }

    fn selected_record(&self) -> Option<&GameRecord> {
        self.storefront
            .catalog()
            .records()
            .get(self.state.store.cursor)
    }

    fn draw(&mut self, frame: &mut Frame) {
        match self.screen {
            Screen::Menu => self.draw_menu(frame),
            Screen::Store => self.draw_store(frame),
            Screen::Game => self.draw_game(frame),
            Screen::Library => self.draw_library(frame),
        }
        if let Some(prompt) = &self.address_prompt {
            self.render_address_prompt(frame, prompt);
        }
    }

    fn split_status(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);
        (chunks[0], chunks[1])
    }

    fn draw_menu(&mut self, frame: &mut Frame) {
        let (body, status) = Self::split_status(frame.size());
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)])
            .split(body);

        let banner = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                TITLE_BANNER,
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Ancient digital seas. Sudden explosion of life.",
                Style::default().fg(self.theme.muted),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(banner, layout[0]);

        let menu_height = (MENU_ITEMS.len() as u16)
            .saturating_mul(2)
            .saturating_add(2)
            .min(layout[1].height);
        let menu_width = 28.min(layout[1].width.max(1));
        let menu_area = centered_rect(menu_width, menu_height, layout[1]);

        let menu_lines: Vec<Line> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                if idx == self.state.menu_cursor {
                    Line::from(Span::styled(
                        format!("▶ {item}"),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {item}"),
                        Style::default().fg(self.theme.primary_fg),
                    ))
                }
            })
            .collect();

        let menu = Paragraph::new(menu_lines)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .alignment(Alignment::Center);
        frame.render_widget(menu, menu_area);
        self.render_status(frame, status);
    }

    fn draw_store(&mut self, frame: &mut Frame) {
        let (body, status) = Self::split_status(frame.size());
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(body);

        let len = self.storefront.catalog().len();
        self.state.store.height = body_chunks[0].height.saturating_sub(2) as usize;
        self.state.store.clamp(len);

        self.render_store_list(frame, body_chunks[0]);
        self.render_store_detail(frame, body_chunks[1]);
        self.render_status(frame, status);
    }

    fn render_store_list(&self, frame: &mut Frame, area: Rect) {
        let records = self.storefront.catalog().records();
        let list = self.state.store;
        let window = list.window(records.len());
        let offset = window.start;

        let mut list_state = ListState::default();
        if !window.is_empty() {
            list_state.select(Some(list.cursor.saturating_sub(offset)));
        }
        let items: Vec<ListItem> = records[window]
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let marker = if list.cursor == offset + idx {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                let title = Span::styled(
                    record.title.clone(),
                    Style::default()
                        .fg(self.theme.primary_fg)
                        .add_modifier(Modifier::BOLD),
                );
                let price = Span::styled(
                    format!(" · {}", record.final_price),
                    Style::default().fg(self.theme.muted),
                );
                let mut line = vec![marker, title, price];
                if record.is_discounted() {
                    line.push(Span::styled(
                        " SALE",
                        Style::default()
                            .fg(self.theme.success)
                            .add_modifier(Modifier::BOLD),
                    ));
                }
                ListItem::new(Line::from(line))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("The Vault"))
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_store_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Relic");
        let Some(record) = self.selected_record() else {
            frame.render_widget(Paragraph::new("The vault is empty").block(block), area);
            return;
        };

        let mut lines = vec![Line::from(Span::styled(
            record.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if !record.subtitle.is_empty() {
            lines.push(Line::from(Span::styled(
                record.subtitle.clone(),
                Style::default().fg(self.theme.muted),
            )));
        }
        lines.push(Line::from(""));
        lines.push(self.price_line(record));
        lines.push(Line::from(record.showcase_line()));
        lines.push(Line::from(format!("Release: {}", record.release_date)));
        lines.push(Line::from(format!("Developer: {}", record.developer)));
        lines.push(Line::from(format!("Genres: {}", record.genres.join(", "))));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter to open • : to jump to an address",
            Style::default().fg(self.theme.muted),
        )));

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn price_line(&self, record: &GameRecord) -> Line<'static> {
        match record.discount.as_deref() {
            Some(discount) => Line::from(vec![
                Span::styled(
                    format!("{discount} "),
                    Style::default()
                        .fg(self.theme.success)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    record.price.clone(),
                    Style::default()
                        .fg(self.theme.muted)
                        .add_modifier(Modifier::CROSSED_OUT),
                ),
                Span::raw(" "),
                Span::styled(
                    record.final_price.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            None => Line::from(Span::styled(
                record.final_price.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        }
    }

    fn draw_game(&mut self, frame: &mut Frame) {
        let (body, status) = Self::split_status(frame.size());
        let record = self.storefront.catalog().resolve(&self.game_id);
        let lines = self.game_lines(record);

        let max_scroll = (lines.len() as u16).saturating_sub(body.height.saturating_sub(2));
        self.state.game_scroll = self.state.game_scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(record.display_name()),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.state.game_scroll, 0));
        frame.render_widget(paragraph, body);
        self.render_status(frame, status);
    }

    fn game_lines(&self, record: &GameRecord) -> Vec<Line<'static>> {
        let heading = |text: &str| {
            Line::from(Span::styled(
                text.to_string(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
        };

        let mut lines = vec![
            self.price_line(record),
            Line::from(format!("Release Date: {}", record.release_date)),
            Line::from(format!("Developer: {}", record.developer)),
            Line::from(format!("Publisher: {}", record.publisher)),
            Line::from(format!("Genres: {}", record.genres.join(" • "))),
            Line::from(""),
            heading("About This Relic"),
        ];
        lines.extend(record.description.lines().map(|line| Line::from(line.to_string())));

        if !record.features.is_empty() {
            lines.push(Line::from(""));
            lines.push(heading("Key Features"));
            lines.extend(
                record
                    .features
                    .iter()
                    .map(|feature| Line::from(format!("  • {feature}"))),
            );
        }

        for (title, requirements) in [
            ("Minimum Requirements", &record.min_requirements),
            ("Recommended Requirements", &record.recommended_requirements),
        ] {
            if requirements.is_empty() {
                continue;
            }
            lines.push(Line::from(""));
            lines.push(heading(title));
            lines.extend(requirements.iter().map(|req| {
                Line::from(vec![
                    Span::styled(
                        format!("  {}: ", req.category),
                        Style::default().fg(self.theme.muted),
                    ),
                    Span::raw(req.value.clone()),
                ])
            }));
        }

        lines.push(Line::from(""));
        lines.push(heading("User Reviews"));
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", record.rating_percent),
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "{} • {} user reviews",
                record.rating,
                format::thousands(record.rating_count)
            )),
        ]));
        for review in &record.reviews {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(
                    review.user.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", review.date),
                    Style::default().fg(self.theme.muted),
                ),
            ]));
            lines.extend(review.text.lines().map(|line| Line::from(format!("  {line}"))));
        }

        if !record.screenshots.is_empty() {
            lines.push(Line::from(""));
            lines.push(heading("Gallery"));
            lines.extend(
                record
                    .screenshots
                    .iter()
                    .map(|shot| {
                        Line::from(Span::styled(
                            format!("  {shot}"),
                            Style::default().fg(self.theme.muted),
                        ))
                    }),
            );
        }
        lines
    }

    fn draw_library(&mut self, frame: &mut Frame) {
        let (body, status) = Self::split_status(frame.size());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(body);

        let count = self.library.result().visible_count;
        self.state.library.height = chunks[2].height.saturating_sub(2) as usize;
        self.state.library.clamp(count);

        self.render_library_tabs(frame, chunks[0]);
        self.render_library_search(frame, chunks[1]);
        self.render_library_cards(frame, chunks[2]);
        self.render_status(frame, status);
    }

    fn render_library_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = GenreTag::ALL
            .iter()
            .enumerate()
            .map(|(idx, tag)| Line::from(format!("{} {}", idx + 1, tag.label())))
            .collect();
        let stats = LibraryStats::collect(self.library.entries());
        let tabs = Tabs::new(titles)
            .select(self.library.state().active_filter.index())
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Relic Library • {} owned • {} played",
                stats.owned,
                format::thousands(stats.total_hours)
            )))
            .style(Style::default().fg(self.theme.primary_fg))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .divider("|");
        frame.render_widget(tabs, area);
    }

    fn render_library_search(&self, frame: &mut Frame, area: Rect) {
        let searching = self.state.mode == Mode::Search;
        let query = self.library.state().search_query.clone();
        let line = if query.is_empty() && !searching {
            Line::from(Span::styled(
                "Search your relics… (press /)",
                Style::default().fg(self.theme.muted),
            ))
        } else {
            Line::from(vec![
                Span::styled("/ ", Style::default().fg(self.theme.accent)),
                Span::raw(query.clone()),
            ])
        };
        let border = if searching {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default()
        };
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("Search"),
        );
        frame.render_widget(paragraph, area);
        if searching {
            let cursor_x = (area.x + 3 + query.chars().count() as u16)
                .min(area.x + area.width.saturating_sub(2));
            frame.set_cursor(cursor_x, area.y + 1);
        }
    }

    fn render_library_cards(&self, frame: &mut Frame, area: Rect) {
        let result = self.library.result();
        let title = format!("{} relics", result.visible_count);
        let block = Block::default().borders(Borders::ALL).title(title);

        if let Some(message) = result.empty_message() {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(self.theme.danger),
            )))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let cards = result.cards();
        let list = self.state.library;
        let window = list.window(cards.len());
        let offset = window.start;
        let mut list_state = ListState::default();
        if !window.is_empty() {
            list_state.select(Some(list.cursor.saturating_sub(offset)));
        }
        let items: Vec<ListItem> = cards[window]
            .iter()
            .map(|card| ListItem::new(self.card_line(card)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.selection_bg))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn card_line(&self, card: &LibraryCard) -> Line<'static> {
        let thumb = match &card.thumbnail {
            Thumbnail::Image(_) => Span::styled("▣ ", Style::default().fg(self.theme.accent_alt)),
            Thumbnail::Placeholder { emoji, .. } => Span::raw(format!("{emoji} ")),
        };
        Line::from(vec![
            thumb,
            Span::styled(
                card.title.clone(),
                Style::default()
                    .fg(self.theme.primary_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", card.kind),
                Style::default().fg(self.theme.muted),
            ),
            Span::styled(
                format!("  {}", card.hours),
                Style::default().fg(self.theme.success),
            ),
        ])
    }

    fn render_address_prompt(&self, frame: &mut Frame, prompt: &AddressPrompt) {
        let frame_area = frame.size();
        let width = frame_area.width.saturating_sub(4).clamp(24, 60);
        let height = 6_u16.min(frame_area.height.saturating_sub(2)).max(5);
        let area = centered_rect(width, height, frame_area);

        frame.render_widget(Clear, area);

        let input_line = Line::from(vec![
            Span::styled("> ", Style::default().fg(self.theme.accent)),
            Span::raw(prompt.input.clone()),
        ]);
        let helper = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" go  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]);
        let example = Line::from(Span::styled(
            "e.g. game.php?id=arc, store.php, profile.php",
            Style::default().fg(self.theme.muted),
        ));

        let paragraph = Paragraph::new(vec![input_line, Line::from(""), helper, example])
            .block(Block::default().borders(Borders::ALL).title("Go to"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);

        let cursor_x =
            (area.x + 3 + prompt.cursor as u16).min(area.x + area.width.saturating_sub(2));
        frame.set_cursor(cursor_x, area.y + 1);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let primary = if self.state.mode == Mode::Search {
            format!("Search: {}", self.library.state().search_query)
        } else {
            self.state.status.clone()
        };
        let hint = match self.screen {
            Screen::Menu => "j/k move • Enter select • : go to • e export • q quit",
            Screen::Store => "j/k move • Enter open • Esc back • : go to • e export • q quit",
            Screen::Game => "j/k scroll • Esc back • : go to • e export • q quit",
            Screen::Library => {
                "/ search • Tab/1-6 filter • r reset • Enter open • Esc back • q quit"
            }
        };
        let paragraph = Paragraph::new(vec![
            Line::from(primary),
            Line::from(Span::styled(hint, Style::default().fg(self.theme.muted))),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_core::seed;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> VaultApp {
        let storefront = Storefront::builtin(seed::DEFAULT_GAME_ID).expect("builtin storefront");
        VaultApp::new(storefront, PathBuf::from("site"))
    }

    fn send(app: &mut VaultApp, codes: &[KeyCode]) {
        for code in codes {
            assert!(app.process_app_event(Some(AppEvent::Input(key(*code)))));
        }
    }

    #[test]
    fn address_prompt_edits_in_place() {
        let mut prompt = AddressPrompt::default();
        for ch in "game.php?id=ac".chars() {
            prompt.insert(ch);
        }
        prompt.move_cursor(-1);
        prompt.insert('r');
        assert_eq!(prompt.value(), Some("game.php?id=arc"));

        prompt.move_home();
        prompt.delete();
        assert_eq!(prompt.input, "ame.php?id=arc");
        prompt.move_end();
        prompt.backspace();
        assert_eq!(prompt.input, "ame.php?id=ar");

        assert_eq!(AddressPrompt::default().value(), None);
    }

    #[test]
    fn list_cursor_stays_in_bounds() {
        let mut list = ListCursor {
            height: 2,
            ..ListCursor::default()
        };
        list.move_by(5, 3);
        assert_eq!(list.cursor, 2);
        assert_eq!(list.offset, 1);
        assert_eq!(list.window(3), 1..3);

        list.clamp(1);
        assert_eq!((list.cursor, list.offset), (0, 0));
        list.move_by(1, 0);
        assert_eq!(list.cursor, 0);
    }

    #[test]
    fn address_prompt_routes_to_game() {
        let mut app = app();
        send(&mut app, &[KeyCode::Char(':')]);
        assert!(app.address_prompt.is_some());
        let mut codes: Vec<KeyCode> = "game.php?id=arc".chars().map(KeyCode::Char).collect();
        codes.push(KeyCode::Enter);
        send(&mut app, &codes);

        assert!(app.address_prompt.is_none());
        assert_eq!(app.screen, Screen::Game);
        assert_eq!(app.game_id, "arc");
    }

    #[test]
    fn unknown_game_falls_back_to_default() {
        let mut app = app();
        app.open_route(Route::parse("game.php?id=zzz"));
        assert_eq!(app.screen, Screen::Game);
        assert_eq!(app.game_id, "gow");
        assert!(app.state.status.contains("zzz"));
    }

    #[test]
    fn library_card_opens_ids_with_reserved_characters() -> anyhow::Result<()> {
        let mut records = seed::catalog_records();
        let mut odd = records[1].clone();
        odd.id = "c++".to_string();
        odd.title = "Plus Plus".to_string();
        records.push(odd);
        let mut entries = seed::library_entries();
        entries[1].id = "c++".to_string();
        let catalog = vault_core::Catalog::new(records, seed::DEFAULT_GAME_ID)?;
        let mut app = VaultApp::new(Storefront::new(catalog, entries), PathBuf::from("site"));

        app.open_route(Route::Profile);
        send(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.screen, Screen::Game);
        assert_eq!(app.game_id, "c++");
        Ok(())
    }

    #[test]
    fn library_keys_drive_the_view() {
        let mut app = app();
        app.open_route(Route::Profile);
        assert_eq!(app.screen, Screen::Library);

        send(&mut app, &[KeyCode::Char('2')]);
        assert!(app.library.is_active(GenreTag::Action));
        assert_eq!(app.library.result().visible_count, 1);

        send(&mut app, &[KeyCode::Tab]);
        assert!(app.library.is_active(GenreTag::Rpg));
        assert!(app.library.result().is_empty);

        send(&mut app, &[KeyCode::BackTab, KeyCode::BackTab]);
        assert!(app.library.is_active(GenreTag::All));

        send(&mut app, &[KeyCode::Char('/')]);
        assert_eq!(app.state.mode, Mode::Search);
        send(&mut app, &[KeyCode::Char('a'), KeyCode::Char('r'), KeyCode::Char('c')]);
        assert_eq!(app.library.result().visible_count, 1);
        send(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.state.mode, Mode::Browse);
        assert_eq!(app.library.state().search_query, "arc");

        send(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.screen, Screen::Game);
        assert_eq!(app.game_id, "arc");
        send(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.screen, Screen::Library);

        send(&mut app, &[KeyCode::Char('/'), KeyCode::Esc]);
        assert_eq!(app.library.state().search_query, "");
        assert_eq!(app.library.result().visible_count, 2);
    }
}
