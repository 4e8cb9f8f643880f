use std::{
    env, fs, io,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

mod config;
mod dropdown;
mod form;
mod host;
mod input;
mod matcher;
mod notify;
mod store;
mod theme;
mod trigger;

use config::{Config, PickerConfig};
use dropdown::{DropdownSession, ScrollOffset};
use form::{CommandForm, SubmitError};
use host::HostConfig;
use input::PromptInput;
use notify::Toasts;
use store::CommandStore;
use theme::Theme;

const TICK_RATE: Duration = Duration::from_millis(250);
const FORM_WIDTH: u16 = 46;
const FIELD_ROWS: u16 = 3;

fn main() -> Result<()> {
    run()
}

fn usage() {
    eprintln!(
        "Usage: snip-tui [OPTIONS] <prompt-file>\n\n\
         Options:\n\
         \x20 --no-wait             fail immediately when the prompt file is missing\n\
         \x20 --raw-commands        store command text exactly as typed\n\
         \x20 --allow-duplicates    skip duplicate name/command checks\n\
         \x20 --no-backdrop         do not dim the screen behind the form\n\
         \x20 --store <file>        command file to use"
    );
}

fn parse_args() -> Option<Config> {
    let mut picker = PickerConfig::default();
    let mut host = HostConfig::default();
    let mut store_path = None;
    let mut prompt_path = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-wait" => host.wait = false,
            "--raw-commands" => picker.normalize_command_text = false,
            "--allow-duplicates" => {
                picker.enforce_unique_name = false;
                picker.enforce_unique_command = false;
            }
            "--no-backdrop" => picker.use_backdrop = false,
            "--store" => store_path = Some(PathBuf::from(args.next()?)),
            _ if arg.starts_with('-') => return None,
            _ => {
                if prompt_path.is_some() {
                    return None;
                }
                prompt_path = Some(PathBuf::from(arg));
            }
        }
    }

    Some(Config {
        picker,
        host,
        store_path: store_path.unwrap_or_else(store::default_store_path),
        prompt_path: prompt_path?,
    })
}

fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = dirs::data_dir()?.join("snip");
    fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::never(&dir, "snip.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = tracing_subscriber::EnvFilter::try_from_env("SNIP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn run() -> Result<()> {
    let Some(config) = parse_args() else {
        usage();
        return Ok(());
    };
    let _log_guard = init_logging();

    let initial = host::attach(&config.prompt_path, &config.host)
        .with_context(|| format!("could not attach to {}", config.prompt_path.display()))?;
    let store = CommandStore::open(config.store_path.clone());
    let mut app = App::new(config, store, initial);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to initialize terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;
    terminal.clear().ok();

    let res = run_app(&mut terminal, &mut app).context("application error");

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit() {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout).context("event poll failed")? {
            let evt = event::read().context("failed to read event")?;
            app.handle_event(evt)?;
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Where a mouse press landed relative to the open dropdown.
enum DropdownHit {
    /// An option row; commit it.
    Option(usize),
    /// The delete control of an option row.
    Delete(usize),
    /// Overlay chrome (border, empty space below the rows).
    Inside,
}

struct App {
    config: Config,
    theme: Theme,
    store: CommandStore,
    input: PromptInput,
    dropdown: Option<DropdownSession>,
    form: Option<CommandForm>,
    toasts: Toasts,
    scroll: ScrollOffset,
    should_quit: bool,
    dirty: bool,
    // geometry from the last draw, for mouse hit testing
    input_area: Rect,
    dropdown_area: Option<Rect>,
    dropdown_offset: usize,
}

impl App {
    fn new(config: Config, store: CommandStore, initial: String) -> Self {
        Self {
            config,
            theme: Theme::new(),
            store,
            input: PromptInput::new(initial.trim_end_matches('\n').to_string()),
            dropdown: None,
            form: None,
            toasts: Toasts::default(),
            scroll: ScrollOffset::default(),
            should_quit: false,
            dirty: false,
            input_area: Rect::default(),
            dropdown_area: None,
            dropdown_offset: 0,
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height < 6 || area.width < 10 {
            return;
        }

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(2),
            ])
            .split(area);
        let preview_area = vertical[0];
        let input_box = vertical[1];
        let status_area = vertical[2];

        self.render_preview(frame, preview_area);

        let input_block = Block::default()
            .title(" Prompt ")
            .borders(Borders::ALL)
            .border_style(self.theme.input_border_style());
        let input_inner = input_block.inner(input_box);
        self.input_area = input_inner;
        let input_widget =
            Paragraph::new(self.input.visible_text(input_inner.width)).block(input_block);
        frame.render_widget(input_widget, input_box);

        let status_widget = Paragraph::new(self.status_line())
            .style(self.theme.status_bar_style())
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(status_widget, status_area);

        self.dropdown_area = None;
        self.dropdown_offset = 0;
        if self.dropdown.is_some() {
            let popup = dropdown::overlay_rect(input_inner, self.scroll, area, &self.config.picker);
            if popup.width >= 8 && popup.height >= 3 {
                self.dropdown_area = Some(popup);
                self.render_dropdown(frame, popup);
            }
        }

        if self.form.is_some() {
            if self.config.picker.use_backdrop {
                frame.render_widget(Block::default().style(self.theme.backdrop_style()), area);
            }
            self.render_form(frame, area);
        }

        self.render_toasts(frame, area);

        if self.form.is_none() && self.dropdown.is_none() {
            let cursor_x = input_inner
                .x
                .saturating_add(self.input.visible_cursor_column(input_inner.width))
                .min(input_inner.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(cursor_x, input_inner.y));
        }
    }

    fn render_preview(&self, frame: &mut Frame, area: Rect) {
        let text = if self.input.is_empty() {
            Text::from(vec![
                Line::from(""),
                Line::from("  Compose a prompt below."),
                Line::from(format!(
                    "  Start the input with {} to pick a saved command.",
                    self.config.picker.trigger
                )),
            ])
        } else {
            Text::from(self.input.text().to_string())
        };
        let preview = Paragraph::new(text)
            .style(self.theme.preview_style())
            .wrap(Wrap { trim: false });
        frame.render_widget(preview, area);
    }

    fn render_dropdown(&mut self, frame: &mut Frame, popup: Rect) {
        let (items, focus, title) = match &self.dropdown {
            Some(session) => (
                dropdown_items(session, &self.theme, popup.width),
                session.focus(),
                if session.query().is_empty() {
                    " Commands ".to_string()
                } else {
                    format!(" Commands · {} ", session.query())
                },
            ),
            None => return,
        };

        frame.render_widget(Clear, popup);
        let list = List::new(items)
            .highlight_style(self.theme.dropdown_focused_style())
            .style(self.theme.dropdown_style())
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .style(self.theme.dropdown_style())
                    .border_style(self.theme.dropdown_border_style()),
            );

        let mut state = ListState::default();
        state.select(Some(focus));
        frame.render_stateful_widget(list, popup, &mut state);
        self.dropdown_offset = state.offset();
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let Some(form) = &self.form else {
            return;
        };

        let height = (form.field_count() as u16 * FIELD_ROWS + 3).min(area.height);
        let width = FORM_WIDTH.min(area.width);
        let popup = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" New Command ")
            .borders(Borders::ALL)
            .style(self.theme.form_style())
            .border_style(self.theme.dropdown_border_style());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let field_width = inner.width.saturating_sub(2);
        let mut lines = Vec::new();
        for (index, (label, field_input, error)) in form.rows().enumerate() {
            let label_style = if index == form.focused_field() {
                self.theme.form_label_style()
            } else {
                self.theme.form_style()
            };
            lines.push(Line::from(Span::styled(label.to_string(), label_style)));
            lines.push(Line::from(format!(
                "> {}",
                field_input.visible_text(field_width)
            )));
            lines.push(Line::from(Span::styled(
                error.unwrap_or("").to_string(),
                self.theme.form_error_style(),
            )));
        }
        lines.push(Line::from(Span::styled(
            "Enter save · Tab next field · Esc cancel".to_string(),
            self.theme.preview_style(),
        )));
        frame.render_widget(Paragraph::new(Text::from(lines)), inner);

        let cursor_y = inner.y + form.focused_field() as u16 * FIELD_ROWS + 1;
        let cursor_x = inner
            .x
            .saturating_add(2 + form.active_input().visible_cursor_column(field_width))
            .min(inner.right().saturating_sub(1));
        if cursor_y < inner.bottom() {
            frame.set_cursor_position(Position::new(cursor_x, cursor_y));
        }
    }

    fn render_toasts(&self, frame: &mut Frame, area: Rect) {
        if self.toasts.is_empty() {
            return;
        }
        let mut row = area.y + 1;
        for toast in self.toasts.iter() {
            let width = (toast.message.width() as u16 + 2).min(area.width);
            if row >= area.bottom() {
                break;
            }
            let rect = Rect::new(area.right().saturating_sub(width + 1), row, width, 1);
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(format!(" {} ", toast.message))
                    .style(self.theme.toast_style(toast.kind)),
                rect,
            );
            row += 2;
        }
    }

    fn status_line(&self) -> Line<'_> {
        let marker = if self.dirty { "*" } else { "" };
        Line::from(vec![
            Span::styled(
                format!("{}{}", self.config.prompt_path.display(), marker),
                self.theme.host_path_style(),
            ),
            Span::raw(format!(
                " | {} commands | {} pick | Ctrl-N new | Ctrl-Y keep input | Ctrl-S write | Ctrl-Q quit",
                self.store.len(),
                self.config.picker.trigger
            )),
        ])
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code, modifiers),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        if self.form.is_some() {
            self.handle_form_key(code, modifiers);
            return;
        }

        if self.handle_dropdown_key(code) {
            return;
        }

        match (code, modifiers) {
            (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.save_prompt();
            }
            (KeyCode::Char('n'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.form = Some(CommandForm::new());
            }
            (KeyCode::Char('y'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.quick_save();
            }
            (KeyCode::Left, _) => {
                self.input.move_left();
            }
            (KeyCode::Right, _) => {
                self.input.move_right();
            }
            (KeyCode::Home, _) => self.input.move_home(),
            (KeyCode::End, _) => self.input.move_end(),
            (KeyCode::Backspace, _) => {
                if self.input.backspace() {
                    self.mark_dirty();
                    self.sync_dropdown();
                }
            }
            (KeyCode::Delete, _) => {
                if self.input.delete() {
                    self.mark_dirty();
                    self.sync_dropdown();
                }
            }
            (KeyCode::Char(ch), m)
                if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) =>
            {
                self.input.insert_char(ch);
                self.mark_dirty();
                self.sync_dropdown();
            }
            _ => {}
        }
    }

    /// Keys the open dropdown session intercepts before the input sees
    /// them. Returns true when the key was consumed.
    fn handle_dropdown_key(&mut self, code: KeyCode) -> bool {
        if self.dropdown.is_none() {
            return false;
        }

        match code {
            KeyCode::Esc => {
                // focus returns to the input, which is the only other
                // focusable surface
                self.dropdown = None;
                true
            }
            KeyCode::Up => {
                if let Some(session) = self.dropdown.as_mut() {
                    session.move_focus(-1);
                }
                true
            }
            KeyCode::Down => {
                if let Some(session) = self.dropdown.as_mut() {
                    session.move_focus(1);
                }
                true
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.commit_selection();
                true
            }
            KeyCode::Backspace => {
                self.dropdown_backspace();
                true
            }
            KeyCode::Delete => {
                let focus = self.dropdown.as_ref().map(|session| session.focus());
                if let Some(index) = focus {
                    self.delete_dropdown_entry(index);
                }
                true
            }
            _ => false,
        }
    }

    fn handle_form_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => {
                self.form = None;
                return;
            }
            KeyCode::Enter => {
                self.submit_form();
                return;
            }
            _ => {}
        }

        let Some(form) = self.form.as_mut() else {
            return;
        };
        match code {
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Backspace => {
                form.active_input_mut().backspace();
            }
            KeyCode::Delete => {
                form.active_input_mut().delete();
            }
            KeyCode::Left => {
                form.active_input_mut().move_left();
            }
            KeyCode::Right => {
                form.active_input_mut().move_right();
            }
            KeyCode::Home => form.active_input_mut().move_home(),
            KeyCode::End => form.active_input_mut().move_end(),
            KeyCode::Char(ch)
                if !modifiers.contains(KeyModifiers::CONTROL)
                    && !modifiers.contains(KeyModifiers::ALT) =>
            {
                form.active_input_mut().insert_char(ch);
            }
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, event: MouseEvent) {
        if self.form.is_some() {
            // the form is keyboard-driven
            return;
        }

        match event.kind {
            MouseEventKind::ScrollUp => {
                if let Some(session) = self.dropdown.as_mut() {
                    session.move_focus(-1);
                }
            }
            MouseEventKind::ScrollDown => {
                if let Some(session) = self.dropdown.as_mut() {
                    session.move_focus(1);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_mouse_down(event.column, event.row);
            }
            _ => {}
        }
    }

    fn handle_mouse_down(&mut self, column: u16, row: u16) {
        if self.dropdown.is_some() {
            match self.dropdown_hit(column, row) {
                Some(DropdownHit::Delete(index)) => self.delete_dropdown_entry(index),
                Some(DropdownHit::Option(index)) => {
                    if let Some(session) = self.dropdown.as_mut() {
                        session.set_focus(index);
                    }
                    self.commit_selection();
                }
                Some(DropdownHit::Inside) => {}
                None => {
                    // a click on the bound input leaves the session open
                    if self.input_area.contains(Position::new(column, row)) {
                        self.input
                            .click_at(self.input_area.width, column - self.input_area.x);
                    } else {
                        self.dropdown = None;
                    }
                }
            }
            return;
        }

        if self.input_area.contains(Position::new(column, row)) {
            self.input
                .click_at(self.input_area.width, column - self.input_area.x);
        }
    }

    fn dropdown_hit(&self, column: u16, row: u16) -> Option<DropdownHit> {
        let popup = self.dropdown_area?;
        let session = self.dropdown.as_ref()?;
        if !popup.contains(Position::new(column, row)) {
            return None;
        }
        let inner_y = popup.y + 1;
        let inner_height = popup.height.saturating_sub(2);
        if row < inner_y || row >= inner_y + inner_height {
            return Some(DropdownHit::Inside);
        }
        let index = self.dropdown_offset + (row - inner_y) as usize;
        if index >= session.entries().len() {
            return Some(DropdownHit::Inside);
        }
        if column >= popup.right().saturating_sub(3) {
            Some(DropdownHit::Delete(index))
        } else {
            Some(DropdownHit::Option(index))
        }
    }

    /// Re-runs trigger detection against the current input value. The
    /// single entry point after every input mutation.
    fn sync_dropdown(&mut self) {
        let change = dropdown::sync_session(
            &mut self.dropdown,
            self.input.text(),
            self.store.commands(),
            &self.config.picker,
        );
        if change != dropdown::SessionChange::Unchanged {
            debug!(?change, "dropdown session");
        }
    }

    fn commit_selection(&mut self) {
        let Some(command) = self
            .dropdown
            .as_ref()
            .and_then(|session| session.focused())
            .map(|entry| entry.command.clone())
        else {
            return;
        };
        self.input.set_text(command);
        self.dropdown = None;
        self.mark_dirty();
    }

    fn dropdown_backspace(&mut self) {
        let Some(session) = self.dropdown.as_mut() else {
            return;
        };
        let (value, now_empty) = session.backspace_query(self.config.picker.trigger);
        self.input.set_text(value);
        self.mark_dirty();
        if now_empty {
            self.dropdown = None;
        } else {
            self.sync_dropdown();
        }
    }

    fn delete_dropdown_entry(&mut self, index: usize) {
        let Some(id) = self
            .dropdown
            .as_ref()
            .and_then(|session| session.entries().get(index))
            .map(|entry| entry.id.clone())
        else {
            return;
        };
        if self.store.delete(&id) {
            self.toasts.success("Command deleted");
        }
        if let Some(session) = self.dropdown.as_mut() {
            session.refresh(self.store.commands(), "");
            if session.is_empty() {
                self.dropdown = None;
            }
        }
    }

    fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match form.submit(self.store.commands(), &self.config.picker) {
            Ok(command) => {
                self.store.append(command);
                self.toasts.success("Command saved");
                self.form = None;
            }
            Err(SubmitError::DuplicateName) => {
                self.toasts.error("A command with this name already exists");
            }
            Err(SubmitError::DuplicateCommand) => {
                self.toasts.error("A command with this text already exists");
            }
            Err(SubmitError::Invalid) => {}
        }
    }

    /// Saves the current input text as a command directly, without the
    /// form. No uniqueness checks apply on this path.
    fn quick_save(&mut self) {
        let value = self.input.text().trim().to_string();
        if value.is_empty() {
            self.toasts.error("Nothing to save");
            return;
        }
        let command_text = if self.config.picker.normalize_command_text {
            form::normalize_command(&value)
        } else {
            value.clone()
        };
        self.store.append(store::Command {
            id: CommandStore::generate_id(),
            name: value,
            command: command_text,
            description: None,
        });
        self.toasts.success("Command saved");
    }

    fn save_prompt(&mut self) {
        match host::write_back(&self.config.prompt_path, self.input.text()) {
            Ok(()) => {
                self.dirty = false;
                self.toasts.success("Prompt saved");
            }
            Err(err) => {
                tracing::error!(%err, path = %self.config.prompt_path.display(), "failed to write prompt file");
                self.toasts.error(format!("Save failed: {err}"));
            }
        }
    }

    fn on_tick(&mut self) {
        self.toasts.prune();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

fn dropdown_items(
    session: &DropdownSession,
    theme: &Theme,
    popup_width: u16,
) -> Vec<ListItem<'static>> {
    let inner_width = popup_width.saturating_sub(2) as usize;
    session
        .entries()
        .iter()
        .map(|entry| {
            let mut spans = Vec::new();
            for segment in &entry.segments {
                let style = if segment.emphasized {
                    theme.match_style()
                } else {
                    theme.dropdown_style()
                };
                spans.push(Span::styled(segment.text.clone(), style));
            }
            let padding = inner_width.saturating_sub(entry.name.width() + 2);
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::styled(" ✕", theme.delete_style()));
            ListItem::new(Line::from(spans))
        })
        .collect()
}
