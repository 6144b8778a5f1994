use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Terminal,
};

use todolist::application::todo_store::TodoStore;
use todolist::domain::slot::StateSlot;
use todolist::domain::todo::{StatusFilter, StoreError, TaskId};
use todolist::infrastructure::file_slot::FileSlot;
use todolist::view::projector::project;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let slot = FileSlot::open(todolist::slot_path_from_env())?;
    let store = TodoStore::open(slot)?;

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    View,
    Create,
    Search,
    ConfirmDelete,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ActiveField {
    Text,
    Date,
}

struct App<S: StateSlot> {
    store: TodoStore<S>,
    visible: Vec<TaskId>,
    selected: usize,
    list_state: ListState,
    mode: Mode,
    filter: StatusFilter,
    search: String,
    field: ActiveField,
    draft_text: String,
    draft_date: String,
    notice: Option<String>,
}

impl<S: StateSlot> App<S> {
    fn reproject(&mut self) {
        self.visible = project(self.store.load_all(), self.filter, &self.search)
            .iter()
            .map(|t| t.id)
            .collect();
        // Clamp selection within visible bounds
        let len = self.visible.len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            if self.selected >= len {
                self.selected = len - 1;
            }
            self.list_state.select(Some(self.selected));
        }
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.visible.get(self.selected).copied()
    }
}

fn run_app<S: StateSlot>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    store: TodoStore<S>,
) -> Result<()> {
    let mut app = App {
        store,
        visible: Vec::new(),
        selected: 0,
        list_state: ListState::default(),
        mode: Mode::View,
        filter: StatusFilter::All,
        search: String::new(),
        field: ActiveField::Text,
        draft_text: String::new(),
        draft_date: String::new(),
        notice: None,
    };
    app.reproject();

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let header = Paragraph::new(
                "Enter: toggle, n: new, d: delete, /: search, f: filter, q: quit  |  New: type task, Tab for date, Enter to save, Esc to cancel",
            )
            .block(Block::default().borders(Borders::ALL).title("todolist"));
            f.render_widget(header, chunks[0]);

            let middle = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);

            let list_items: Vec<ListItem> = app
                .visible
                .iter()
                .filter_map(|id| app.store.load_all().iter().find(|t| t.id == *id))
                .map(|t| {
                    let mark = if t.completed { "[x]" } else { "[ ]" };
                    ListItem::new(format!("{} {}", mark, t.text))
                })
                .collect();
            if app.visible.is_empty() {
                app.list_state.select(None);
            } else {
                app.list_state.select(Some(app.selected));
            }
            let list = List::new(list_items)
                .block(Block::default().borders(Borders::ALL).title(format!(
                    "tasks [{}]{}",
                    app.filter,
                    if app.search.is_empty() {
                        String::new()
                    } else {
                        format!(" /{}", app.search)
                    }
                )))
                .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, middle[0], &mut app.list_state);

            let detail = match app.selected_id().and_then(|id| app.store.load_all().iter().find(|t| t.id == id)) {
                Some(t) => format!(
                    "Task:\n{}\n\nDue: {}\n\nStatus: {}",
                    t.text,
                    t.date.as_deref().unwrap_or("-"),
                    if t.completed { "Completed" } else { "Active" },
                ),
                None => String::new(),
            };
            let details = Paragraph::new(detail)
                .block(Block::default().borders(Borders::ALL).title("details"));
            f.render_widget(details, middle[1]);

            let footer_text = match app.mode {
                Mode::View => format!(
                    "Filter=[{}]  Search=\"{}\"{}",
                    app.filter,
                    app.search,
                    app.notice.as_deref().map(|n| format!("  |  {n}")).unwrap_or_default()
                ),
                Mode::Create => format!(
                    "New — {}: {}_  |  (Tab to switch, Enter to save, Esc to cancel){}",
                    match app.field { ActiveField::Text => "Task", ActiveField::Date => "Date" },
                    match app.field { ActiveField::Text => &app.draft_text, ActiveField::Date => &app.draft_date },
                    app.notice.as_deref().map(|n| format!("  |  {n}")).unwrap_or_default(),
                ),
                Mode::Search => format!("Search: {}_  |  (Enter/Esc to finish)", app.search),
                Mode::ConfirmDelete => "Delete this task? (y to confirm, any other key to cancel)".to_string(),
            };
            let footer = Paragraph::new(footer_text).block(
                Block::default().borders(Borders::ALL).title(match app.mode {
                    Mode::View => "info",
                    Mode::Create => "create",
                    Mode::Search => "search",
                    Mode::ConfirmDelete => "confirm",
                }),
            );
            f.render_widget(footer, chunks[2]);
        })?;

        if !event::poll(std::time::Duration::from_millis(200))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            // Only act on key presses; ignore repeats and releases
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.mode {
                Mode::View => match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Up => {
                        if app.selected > 0 {
                            app.selected -= 1;
                        }
                    }
                    KeyCode::Down => {
                        if app.selected + 1 < app.visible.len() {
                            app.selected += 1;
                        }
                    }
                    KeyCode::Enter => {
                        if let Some(id) = app.selected_id() {
                            app.store.toggle_complete(id)?;
                            app.reproject();
                        }
                    }
                    KeyCode::Char('n') => {
                        app.mode = Mode::Create;
                        app.field = ActiveField::Text;
                        app.draft_text.clear();
                        app.draft_date.clear();
                        app.notice = None;
                    }
                    KeyCode::Char('d') => {
                        if app.selected_id().is_some() {
                            app.mode = Mode::ConfirmDelete;
                        }
                    }
                    KeyCode::Char('/') => {
                        app.mode = Mode::Search;
                        app.notice = None;
                    }
                    KeyCode::Char('f') => {
                        app.filter = app.filter.cycle();
                        app.reproject();
                    }
                    KeyCode::Esc => {
                        app.search.clear();
                        app.reproject();
                    }
                    _ => {}
                },
                Mode::Create => match key.code {
                    KeyCode::Esc => {
                        app.mode = Mode::View;
                        app.draft_text.clear();
                        app.draft_date.clear();
                    }
                    KeyCode::Enter => {
                        match app.store.add(&app.draft_text, Some(app.draft_date.as_str())) {
                            Ok(_) => {
                                app.mode = Mode::View;
                                app.notice = None;
                                app.draft_text.clear();
                                app.draft_date.clear();
                                app.reproject();
                            }
                            Err(StoreError::EmptyText) => {
                                // Stay in the form, tell the user
                                app.notice = Some("task text must not be empty".to_string());
                            }
                            Err(e) => return Err(e.into()),
                        }
                    }
                    KeyCode::Backspace => match app.field {
                        ActiveField::Text => {
                            app.draft_text.pop();
                        }
                        ActiveField::Date => {
                            app.draft_date.pop();
                        }
                    },
                    KeyCode::Char(c) => match app.field {
                        ActiveField::Text => app.draft_text.push(c),
                        ActiveField::Date => app.draft_date.push(c),
                    },
                    KeyCode::Tab => {
                        app.field = match app.field {
                            ActiveField::Text => ActiveField::Date,
                            ActiveField::Date => ActiveField::Text,
                        };
                    }
                    _ => {}
                },
                Mode::Search => match key.code {
                    KeyCode::Esc | KeyCode::Enter => {
                        app.mode = Mode::View;
                    }
                    KeyCode::Backspace => {
                        app.search.pop();
                        app.reproject();
                    }
                    KeyCode::Char(c) => {
                        app.search.push(c);
                        app.reproject();
                    }
                    _ => {}
                },
                Mode::ConfirmDelete => {
                    if key.code == KeyCode::Char('y') {
                        if let Some(id) = app.selected_id() {
                            app.store.delete(id)?;
                            if app.selected > 0 {
                                app.selected -= 1;
                            }
                            app.reproject();
                        }
                    }
                    app.mode = Mode::View;
                }
            }
        }
    }
    Ok(())
}
