//! TUI application for browsing and editing tournaments.
//!
//! The app renders the latest store snapshot on every frame. Service calls
//! and prompt flows run on spawned tasks; their questions come back through
//! a [`ChannelPrompt`] and are shown as a modal.

use crate::{
    prompt::{ChannelPrompt, PromptAnswer, PromptKind, PromptRequest},
    presentation::{card_details, status_text},
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    layout::{Alignment, Constraint, Flex, Layout, Margin, Position, Rect},
    style::{Style, Stylize},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Clear, List, ListDirection, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
    },
};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tournament_hub::{
    AppState, Debouncer, FetchStatus, StoreHandle, Tournament, TournamentThunks,
    TournamentsSelector, TournamentsView, interaction, store::select_status,
};

mod widgets;

use widgets::{ScrollableList, UserInput};

const HELP: &str = "\
Ctrl+N
        Create a tournament.
Ctrl+E
        Rename the selected tournament.
Ctrl+D
        Remove the selected tournament.
Ctrl+R
        Retry, fetching all tournaments again.
Up / Down
        Select the previous or next tournament.
Enter
        Search right away instead of waiting for typing to settle.
Ctrl+Home / Ctrl+End
        Scroll to the oldest or newest history record.
Tab
        Toggle this help.
Esc
        Exit.
";
const MAX_LOG_RECORDS: usize = 1024;
const POLL_TIMEOUT: Duration = Duration::from_millis(50);
const GRID_COLUMNS: usize = 3;
/// Borders plus the four detail lines
const CARD_HEIGHT: u16 = 6;

#[derive(Clone, Copy)]
enum RecordKind {
    Error,
    Info,
    You,
}

/// A timestamped history message.
#[derive(Clone)]
struct Record {
    datetime: DateTime<Utc>,
    kind: RecordKind,
    content: String,
}

impl Record {
    fn new(kind: RecordKind, content: String) -> Self {
        Self {
            datetime: Utc::now(),
            kind,
            content,
        }
    }
}

impl From<Record> for ListItem<'_> {
    fn from(val: Record) -> Self {
        let repr = match val.kind {
            RecordKind::Error => "ERROR".light_red(),
            RecordKind::Info => "INFO".light_blue(),
            RecordKind::You => "YOU".light_green(),
        };

        let msg = vec![
            format!("[{} ", val.datetime.format("%H:%M:%S")).into(),
            Span::styled(format!("{repr:5}"), repr.style),
            format!("]: {}", val.content).into(),
        ];

        ListItem::new(Line::from(msg))
    }
}

/// Question currently shown on top of the page
struct Modal {
    request: PromptRequest,
    input: UserInput,
}

/// TUI App state
pub struct TuiApp {
    /// Whether to display the help menu window
    show_help_menu: bool,
    /// Helps scroll through the help menu window if the terminal is small
    help_handle: ScrollableList,
    /// History of recorded messages
    log_handle: ScrollableList,
    /// Search box
    search_input: UserInput,
    modal: Option<Modal>,
    /// Index of the selected card
    selected: usize,
    state: AppState,
    last_status: FetchStatus,
    selector: TournamentsSelector,
    state_rx: watch::Receiver<AppState>,
    thunks: TournamentThunks,
    prompt: ChannelPrompt,
    prompt_requests: mpsc::UnboundedReceiver<PromptRequest>,
    search: Debouncer<String>,
    records_tx: mpsc::UnboundedSender<Record>,
    records_rx: mpsc::UnboundedReceiver<Record>,
}

impl TuiApp {
    /// Must be called from within a Tokio runtime.
    pub fn new(store: &StoreHandle, thunks: TournamentThunks, search_debounce: Duration) -> Self {
        // Fill help menu with help text lines
        let mut help_handle = ScrollableList::new(MAX_LOG_RECORDS);
        help_handle.push("".into());
        for line in HELP.lines() {
            help_handle.push(line.to_string().into());
        }
        help_handle.push("".into());
        help_handle.jump_to_first();

        let (prompt, prompt_requests) = ChannelPrompt::new();
        let (records_tx, records_rx) = mpsc::unbounded_channel();
        let state_rx = store.subscribe();
        let state = state_rx.borrow().clone();

        Self {
            show_help_menu: false,
            help_handle,
            log_handle: ScrollableList::new(MAX_LOG_RECORDS),
            search_input: UserInput::new(),
            modal: None,
            selected: 0,
            last_status: select_status(&state),
            state,
            selector: TournamentsSelector::new(),
            state_rx,
            thunks,
            prompt,
            prompt_requests,
            search: Debouncer::new(search_debounce),
            records_tx,
            records_rx,
        }
    }

    /// Add log message
    fn add_log(&mut self, kind: RecordKind, content: String) {
        let record = Record::new(kind, content);
        self.log_handle.push(record.into());
    }

    fn view(&self) -> TournamentsView {
        self.selector.select_view(&self.state)
    }

    fn selected_tournament(&self) -> Option<Tournament> {
        self.selector
            .select_tournaments(&self.state)
            .get(self.selected)
            .cloned()
    }

    fn spawn_fetch(&self, query: Option<String>) {
        let thunks = self.thunks.clone();
        tokio::spawn(async move {
            thunks.fetch_tournaments(query.as_deref()).await;
        });
    }

    fn spawn_create(&mut self) {
        self.add_log(RecordKind::You, "create".to_string());
        let (prompt, thunks, records) = self.flow_parts();
        tokio::spawn(async move {
            if !interaction::create_tournament(&prompt, &thunks).await {
                let _ = records.send(Record::new(RecordKind::Info, "Create cancelled".into()));
            }
        });
    }

    fn spawn_edit(&mut self) {
        let Some(tournament) = self.selected_tournament() else {
            self.add_log(RecordKind::Error, "No tournament selected".to_string());
            return;
        };
        self.add_log(RecordKind::You, format!("edit {}", tournament.name));
        let (prompt, thunks, records) = self.flow_parts();
        tokio::spawn(async move {
            if !interaction::edit_tournament(&prompt, &thunks, &tournament).await {
                let _ = records.send(Record::new(RecordKind::Info, "Edit cancelled".into()));
            }
        });
    }

    fn spawn_remove(&mut self) {
        let Some(tournament) = self.selected_tournament() else {
            self.add_log(RecordKind::Error, "No tournament selected".to_string());
            return;
        };
        self.add_log(RecordKind::You, format!("remove {}", tournament.name));
        let (prompt, thunks, records) = self.flow_parts();
        tokio::spawn(async move {
            if !interaction::remove_tournament(&prompt, &thunks, &tournament.id).await {
                let _ = records.send(Record::new(RecordKind::Info, "Remove cancelled".into()));
            }
        });
    }

    fn flow_parts(&self) -> (ChannelPrompt, TournamentThunks, mpsc::UnboundedSender<Record>) {
        (
            self.prompt.clone(),
            self.thunks.clone(),
            self.records_tx.clone(),
        )
    }

    /// Search input changed; restart the quiet period
    fn search_changed(&mut self) {
        self.search.push(self.search_input.value.clone());
    }

    fn apply_state(&mut self, state: AppState) {
        let status = select_status(&state);
        if status != self.last_status {
            tracing::debug!(from = %self.last_status, to = %status, "Fetch status changed");
            match status {
                FetchStatus::Success => {
                    let count = state.tournaments.len();
                    self.add_log(RecordKind::Info, format!("Loaded {count} tournament(s)"));
                }
                FetchStatus::Error => {
                    self.add_log(RecordKind::Error, "Failed to load tournaments".to_string());
                }
                FetchStatus::Idle | FetchStatus::Loading => {}
            }
            self.last_status = status;
        }

        self.state = state;
        let count = self.selector.select_tournaments(&self.state).len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// Pull in everything that happened off the UI task
    fn tick(&mut self) {
        if self.modal.is_none()
            && let Ok(request) = self.prompt_requests.try_recv()
        {
            self.modal = Some(Modal {
                request,
                input: UserInput::new(),
            });
        }

        while let Some(query) = self.search.try_next() {
            tracing::debug!(query, "Search settled");
            self.spawn_fetch(Some(query));
        }

        if self.state_rx.has_changed().unwrap_or(false) {
            let state = self.state_rx.borrow_and_update().clone();
            self.apply_state(state);
        }

        while let Ok(record) = self.records_rx.try_recv() {
            self.log_handle.push(record.into());
        }
    }

    fn answer_modal(&mut self, answer: PromptAnswer) {
        if let Some(modal) = self.modal.take() {
            let _ = modal.request.response.send(answer);
        }
    }

    fn handle_modal_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };

        match modal.request.kind {
            PromptKind::Text => match code {
                KeyCode::Enter => {
                    let value = modal.input.submit();
                    self.answer_modal(PromptAnswer::Text(Some(value)));
                }
                KeyCode::Esc => self.answer_modal(PromptAnswer::Text(None)),
                KeyCode::Char(to_insert)
                    if matches!(modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT) =>
                {
                    modal.input.input(to_insert)
                }
                KeyCode::Backspace => modal.input.backspace(),
                KeyCode::Delete => modal.input.delete(),
                KeyCode::Left => modal.input.move_left(),
                KeyCode::Right => modal.input.move_right(),
                KeyCode::Home => modal.input.jump_to_first(),
                KeyCode::End => modal.input.jump_to_last(),
                _ => {}
            },
            PromptKind::Confirm => match code {
                KeyCode::Enter | KeyCode::Char('y' | 'Y') => {
                    self.answer_modal(PromptAnswer::Confirm(true))
                }
                KeyCode::Esc | KeyCode::Char('n' | 'N') => {
                    self.answer_modal(PromptAnswer::Confirm(false))
                }
                _ => {}
            },
        }
    }

    /// Handle a key press. Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.modal.is_some() {
            self.handle_modal_key(code, modifiers);
            return false;
        }

        match modifiers {
            KeyModifiers::CONTROL => match code {
                KeyCode::Char('n') => self.spawn_create(),
                KeyCode::Char('e') => self.spawn_edit(),
                KeyCode::Char('d') => self.spawn_remove(),
                KeyCode::Char('r') => {
                    self.add_log(RecordKind::You, "retry".to_string());
                    self.spawn_fetch(None);
                }
                KeyCode::Home => self.log_handle.jump_to_first(),
                KeyCode::End => self.log_handle.jump_to_last(),
                _ => {}
            },
            KeyModifiers::NONE | KeyModifiers::SHIFT => match code {
                KeyCode::Enter => {
                    let query = self.search_input.value.trim().to_string();
                    self.spawn_fetch((!query.is_empty()).then_some(query));
                }
                KeyCode::Char(to_insert) => {
                    self.search_input.input(to_insert);
                    self.search_changed();
                }
                KeyCode::Backspace => {
                    self.search_input.backspace();
                    self.search_changed();
                }
                KeyCode::Delete => {
                    self.search_input.delete();
                    self.search_changed();
                }
                KeyCode::Left => self.search_input.move_left(),
                KeyCode::Right => self.search_input.move_right(),
                KeyCode::Home => self.search_input.jump_to_first(),
                KeyCode::End => self.search_input.jump_to_last(),
                KeyCode::Up => {
                    if self.show_help_menu {
                        self.help_handle.move_up();
                    } else {
                        self.selected = self.selected.saturating_sub(1);
                    }
                }
                KeyCode::Down => {
                    if self.show_help_menu {
                        self.help_handle.move_down();
                    } else {
                        let count = self.selector.select_tournaments(&self.state).len();
                        self.selected = (self.selected + 1).min(count.saturating_sub(1));
                    }
                }
                KeyCode::Tab => self.show_help_menu = !self.show_help_menu,
                KeyCode::Esc => {
                    if !self.show_help_menu {
                        return true;
                    }
                    self.show_help_menu = false;
                }
                _ => {}
            },
            _ => {}
        }

        false
    }

    /// Render the search box
    fn draw_search(&self, frame: &mut Frame, area: Rect) {
        let search = Paragraph::new(self.search_input.value.as_str())
            .block(Block::bordered().title(" search  ".light_green()));
        frame.render_widget(search, area);
        if self.modal.is_none() {
            frame.set_cursor_position(Position::new(
                area.x + self.search_input.char_idx as u16 + 1,
                area.y + 1,
            ));
        }
    }

    /// Render the status region or the card grid
    fn draw_tournaments(&self, frame: &mut Frame, area: Rect) {
        let view = self.view();
        let TournamentsView::Grid(tournaments) = &view else {
            let mut lines = vec![Line::from(""), Line::from(status_text(&view).unwrap_or(""))];
            if view == TournamentsView::Error {
                lines.push(Line::from(vec![
                    "press ".into(),
                    "Ctrl+R".bold().white(),
                    " to retry".into(),
                ]));
            }
            let status = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::bordered().title(" tournaments  "));
            frame.render_widget(status, area);
            return;
        };

        let block = Block::bordered().title(format!(" tournaments ({})  ", tournaments.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Keep the selected card's row on screen
        let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
        let first_row = (self.selected / GRID_COLUMNS + 1).saturating_sub(visible_rows);

        let rows = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows]).split(inner);
        for (row_offset, row_area) in rows.iter().enumerate() {
            let columns =
                Layout::horizontal([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                    .split(*row_area);
            for (column, card_area) in columns.iter().enumerate() {
                let idx = (first_row + row_offset) * GRID_COLUMNS + column;
                if let Some(tournament) = tournaments.get(idx) {
                    self.draw_card(frame, *card_area, idx, tournament);
                }
            }
        }
    }

    fn draw_card(&self, frame: &mut Frame, area: Rect, idx: usize, tournament: &Tournament) {
        let mut block = Block::bordered().title(format!(" #{} {}  ", idx + 1, tournament.name));
        if idx == self.selected {
            block = block.border_style(Style::default().light_yellow().bold());
        }

        let lines: Vec<Line> = card_details(tournament)
            .into_iter()
            .map(Line::from)
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    /// Render the log/history window with scrollbar
    fn draw_log(&mut self, frame: &mut Frame, area: Rect) {
        let log_records = self.log_handle.list_items.clone();
        let log_records = List::new(log_records)
            .direction(ListDirection::BottomToTop)
            .block(Block::bordered().title(" history  "));
        frame.render_stateful_widget(log_records, area, &mut self.log_handle.list_state);

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.log_handle.scroll_state,
        );
    }

    /// Render the help/status bar at the bottom
    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let status_indicator = match self.last_status {
            FetchStatus::Idle => "● Idle".gray(),
            FetchStatus::Loading => "● Loading".yellow(),
            FetchStatus::Success => "● Ready".green(),
            FetchStatus::Error => "● Error".red(),
        };

        let help_message = vec![
            status_indicator,
            " | press ".into(),
            "Tab".bold().white(),
            " to view help, ".into(),
            "Ctrl+N".bold().white(),
            " to create, or ".into(),
            "Esc".bold().white(),
            " to exit".into(),
        ];
        frame.render_widget(Paragraph::new(Line::from(help_message)), area);
    }

    /// Render the help menu overlay
    fn draw_help_menu(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Max(24)]).flex(Flex::Center);
        let horizontal = Layout::horizontal([Constraint::Max(72)]).flex(Flex::Center);
        let [help_menu_area] = vertical.areas(frame.area());
        let [help_menu_area] = horizontal.areas(help_menu_area);
        frame.render_widget(Clear, help_menu_area);

        let help_items = self.help_handle.list_items.clone();
        let help_items = List::new(help_items)
            .direction(ListDirection::BottomToTop)
            .block(Block::bordered().title(" keys  "));
        frame.render_stateful_widget(help_items, help_menu_area, &mut self.help_handle.list_state);

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None),
            help_menu_area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.help_handle.scroll_state,
        );
    }

    /// Render the pending question
    fn draw_modal(&self, frame: &mut Frame, modal: &Modal) {
        let vertical = Layout::vertical([Constraint::Length(3)]).flex(Flex::Center);
        let horizontal = Layout::horizontal([Constraint::Max(64)]).flex(Flex::Center);
        let [area] = vertical.areas(frame.area());
        let [area] = horizontal.areas(area);
        frame.render_widget(Clear, area);

        let block = Block::bordered()
            .title(format!(" {}  ", modal.request.message).light_yellow())
            .border_style(Style::default().light_yellow());

        match modal.request.kind {
            PromptKind::Text => {
                let block = block.title_bottom(" Enter to accept, Esc to cancel  ");
                frame.render_widget(
                    Paragraph::new(modal.input.value.as_str()).block(block),
                    area,
                );
                frame.set_cursor_position(Position::new(
                    area.x + modal.input.char_idx as u16 + 1,
                    area.y + 1,
                ));
            }
            PromptKind::Confirm => {
                let answer = Line::from(vec![
                    "y".bold().white(),
                    " yes   ".into(),
                    "n".bold().white(),
                    " no".into(),
                ]);
                frame.render_widget(
                    Paragraph::new(answer)
                        .alignment(Alignment::Center)
                        .block(block),
                    area,
                );
            }
        }
    }

    /// Main draw function - orchestrates rendering of all UI components
    fn draw(&mut self, frame: &mut Frame) {
        let window = Layout::vertical([
            Constraint::Length(3), // Search box
            Constraint::Min(6),    // Tournaments
            Constraint::Length(8), // History
            Constraint::Length(1), // Help bar
        ]);
        let [search_area, tournaments_area, log_area, help_area] = window.areas(frame.area());

        self.draw_search(frame, search_area);
        self.draw_tournaments(frame, tournaments_area);
        self.draw_log(frame, log_area);
        self.draw_help_bar(frame, help_area);

        if self.show_help_menu {
            self.draw_help_menu(frame);
        }
        if let Some(modal) = &self.modal {
            self.draw_modal(frame, modal);
        }
    }

    /// Run the TUI application
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.spawn_fetch(None);

        loop {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(POLL_TIMEOUT)?
                && let Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                }) = event::read()?
                && kind == KeyEventKind::Press
                && self.handle_key(code, modifiers)
            {
                return Ok(());
            }

            self.tick();
            tokio::task::yield_now().await;
        }
    }
}
