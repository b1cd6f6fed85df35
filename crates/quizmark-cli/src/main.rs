use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info};
use quizmark_config::{Config, DisplayConfig};
use quizmark_engine::{
    BlockKey, OptionMark, ParseOptions, ParsedMessage, QuizPhase, QuizSessions, QuizView,
    parse_message,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{
    fs,
    io::{self, Read, Stdout, stdout},
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(version, about = "Split chat messages into text, code and quizzes", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/quizmark/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the segment sequence of a message as JSON
    Parse {
        /// Message file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// Answer the quizzes of a message in the terminal
    Quiz {
        /// Message file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Write a config file with default values
    InitConfig,
}

struct App {
    sessions: QuizSessions,
    keys: Vec<BlockKey>,
    quiz_list_state: ListState,
    option_index: usize,
    display: DisplayConfig,
    status: Option<String>,
}

impl App {
    fn new(message: &ParsedMessage, display: DisplayConfig) -> Self {
        let mut sessions = QuizSessions::new();
        let keys = sessions.sync(message);

        let mut quiz_list_state = ListState::default();
        // Select first quiz if available
        if !keys.is_empty() {
            quiz_list_state.select(Some(0));
        }

        Self {
            sessions,
            keys,
            quiz_list_state,
            option_index: 0,
            display,
            status: None,
        }
    }

    fn current_key(&self) -> Option<&BlockKey> {
        self.quiz_list_state
            .selected()
            .and_then(|i| self.keys.get(i))
    }

    fn current_view(&self) -> Option<QuizView> {
        self.current_key().and_then(|key| self.sessions.view(key))
    }

    fn next_quiz(&mut self) {
        if self.keys.is_empty() {
            return;
        }
        let i = match self.quiz_list_state.selected() {
            Some(i) => (i + 1) % self.keys.len(),
            None => 0,
        };
        self.select_quiz(i);
    }

    fn previous_quiz(&mut self) {
        if self.keys.is_empty() {
            return;
        }
        let i = match self.quiz_list_state.selected() {
            Some(0) | None => self.keys.len() - 1,
            Some(i) => i - 1,
        };
        self.select_quiz(i);
    }

    fn select_quiz(&mut self, i: usize) {
        self.quiz_list_state.select(Some(i));
        self.option_index = 0;
        self.status = None;
    }

    fn option_count(&self) -> usize {
        self.current_view().map_or(0, |v| v.options.len())
    }

    fn next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_index = (self.option_index + 1) % count;
        }
    }

    fn previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_index = self.option_index.checked_sub(1).unwrap_or(count - 1);
        }
    }

    fn choose_current(&mut self) {
        let Some(key) = self.current_key().cloned() else {
            return;
        };
        let Some(value) = self
            .current_view()
            .and_then(|v| v.options.get(self.option_index).map(|o| o.value.clone()))
        else {
            return;
        };
        self.status = self.sessions.choose(&key, &value).err().map(|e| e.to_string());
    }

    fn submit_current(&mut self) {
        let Some(key) = self.current_key().cloned() else {
            return;
        };
        self.status = match self.sessions.submit(&key) {
            Ok(_) => {
                info!("revealed {key}");
                None
            }
            Err(e) => Some(e.to_string()),
        };
    }

    fn quiz_lines(&self) -> Vec<Line<'static>> {
        let Some(view) = self.current_view() else {
            return vec![Line::from("No quiz selected")];
        };

        let mut lines = vec![];
        let question = if view.question.is_empty() {
            Span::styled(
                "(no question text)",
                Style::default().add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::styled(
                view.question.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )
        };
        lines.push(Line::from(vec![question]));
        lines.push(Line::from(""));

        for (i, option) in view.options.iter().enumerate() {
            let pointer = if i == self.option_index && !view.locked {
                "> "
            } else {
                "  "
            };
            let radio = if option.selected { "(•)" } else { "( )" };
            let (style, suffix) = match option.mark {
                OptionMark::Neutral => (Style::default(), ""),
                OptionMark::Correct => (Style::default().fg(Color::Green), " ✓"),
                OptionMark::Incorrect => (Style::default().fg(Color::Red), " ✗"),
            };
            lines.push(Line::from(vec![
                Span::raw(pointer),
                Span::styled(format!("{radio} {}{suffix}", option.label), style),
            ]));
        }
        lines.push(Line::from(""));

        if !view.locked {
            let style = if view.can_submit {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(vec![Span::styled("[s] Submit", style)]));
        } else if view.no_recorded_answer {
            lines.push(Line::from(vec![Span::styled(
                self.display.no_answer_text.clone(),
                Style::default().fg(Color::Yellow),
            )]));
        } else if self.display.show_answer_label
            && let Some(label) = &view.correct_label
        {
            lines.push(Line::from(vec![Span::styled(
                format!("Correct Answer: {label}"),
                Style::default().fg(Color::Green),
            )]));
        }

        lines
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Parse { input, pretty } => {
            let config = load_config(cli.config.as_deref())?;
            let content = read_input(input)?;
            let message = parse_message(&content, &parse_options(&config));
            let json = if *pretty {
                serde_json::to_string_pretty(&message)?
            } else {
                serde_json::to_string(&message)?
            };
            println!("{json}");
        }
        Command::Quiz { input } => {
            let config = load_config(cli.config.as_deref())?;
            let content = read_input(input)?;
            let message = parse_message(&content, &parse_options(&config));
            let app = App::new(&message, config.display);
            if app.keys.is_empty() {
                println!("No quiz blocks found in the message");
                return Ok(());
            }
            run_terminal(app)?;
        }
        Command::InitConfig => {
            let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
            if config_path.exists() {
                anyhow::bail!("Config file already exists at {}", config_path.display());
            }
            Config::default().save_to_path(&config_path)?;
            println!("Wrote default config to {}", config_path.display());
        }
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let loaded = match explicit {
        Some(path) => Some(
            Config::load_from_path(path)?
                .with_context(|| format!("Config file {} not found", path.display()))?,
        ),
        None => Config::load()?,
    };
    Ok(loaded.unwrap_or_else(|| {
        debug!("no config file at {}; using defaults", Config::config_path().display());
        Config::default()
    }))
}

fn parse_options(config: &Config) -> ParseOptions {
    ParseOptions {
        fallback_language: config.parsing.fallback_language.clone(),
        decode_entities: config.parsing.decode_entities,
    }
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read message from stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read message from {}", input.display()))
    }
}

fn run_terminal(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_quiz(),
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_quiz(),
                KeyCode::Down | KeyCode::Char('j') => app.next_option(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_option(),
                KeyCode::Enter | KeyCode::Char(' ') => app.choose_current(),
                KeyCode::Char('s') => app.submit_current(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    // Quiz list panel
    let quiz_items: Vec<ListItem> = app
        .keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let view = app.sessions.view(key);
            let icon = match &view {
                Some(v) if v.phase == QuizPhase::Revealed => {
                    if v.no_recorded_answer {
                        "? "
                    } else if v
                        .options
                        .iter()
                        .any(|o| o.selected && o.mark == OptionMark::Correct)
                    {
                        "✓ "
                    } else {
                        "✗ "
                    }
                }
                Some(v) if v.phase == QuizPhase::Selected => "• ",
                _ => "  ",
            };
            let question = view.map(|v| v.question).unwrap_or_default();
            let display_text = format!("{icon}{}. {question}", i + 1);
            ListItem::new(vec![Line::from(vec![Span::raw(display_text)])])
        })
        .collect();

    let quiz_list = List::new(quiz_items)
        .block(Block::default().borders(Borders::ALL).title("Quizzes"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(quiz_list, chunks[0], &mut app.quiz_list_state);

    // Quiz panel
    let content = Paragraph::new(app.quiz_lines())
        .block(Block::default().borders(Borders::ALL).title("Quiz"))
        .wrap(Wrap { trim: true });

    f.render_widget(content, chunks[1]);

    // Instructions, or the last rejected action
    let help_text = match &app.status {
        Some(status) => Line::from(vec![Span::styled(
            status.clone(),
            Style::default().fg(Color::Red),
        )]),
        None => Line::from(vec![
            Span::raw("q: Quit | "),
            Span::raw("Tab/→: Next quiz | "),
            Span::raw("↑/↓: Option | "),
            Span::raw("Enter/Space: Choose | s: Submit"),
        ]),
    };

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    f.render_widget(help, rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MESSAGE: &str = "First?<form>\
        <div><input value=\"A\"> A. one</div>\
        <div><input value=\"B\"> B. two</div>\
        </form><div class=\"answer\"><value>B</value></div>\
        Second?<form><div>A. three</div><div>B. four</div></form>";

    fn app() -> App {
        let message = parse_message(MESSAGE, &ParseOptions::default());
        App::new(&message, DisplayConfig::default())
    }

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn starts_on_first_quiz() {
        let app = app();
        assert_eq!(app.keys.len(), 2);
        assert_eq!(app.quiz_list_state.selected(), Some(0));
        assert_eq!(app.current_view().unwrap().question, "First?");
    }

    #[test]
    fn navigation_wraps() {
        let mut app = app();
        app.previous_quiz();
        assert_eq!(app.quiz_list_state.selected(), Some(1));
        app.next_quiz();
        assert_eq!(app.quiz_list_state.selected(), Some(0));

        app.previous_option();
        assert_eq!(app.option_index, 1);
        app.next_option();
        assert_eq!(app.option_index, 0);
    }

    #[test]
    fn choose_and_submit_show_answer_label() {
        let mut app = app();
        app.submit_current();
        assert!(app.status.is_some());

        app.choose_current();
        app.submit_current();
        assert_eq!(app.status, None);

        let lines = text(&app.quiz_lines());
        assert!(lines.contains(&"  (•) A. one ✗".to_string()));
        assert!(lines.contains(&"  ( ) B. two ✓".to_string()));
        assert_eq!(lines.last().unwrap(), "Correct Answer: B. two");
    }

    #[test]
    fn missing_answer_uses_configured_text() {
        let mut app = app();
        app.display.no_answer_text = "nobody knows".to_string();
        app.next_quiz();
        app.choose_current();
        app.submit_current();

        let lines = text(&app.quiz_lines());
        assert_eq!(lines.last().unwrap(), "nobody knows");
    }

    #[test]
    fn config_maps_to_parse_options() {
        let mut config = Config::default();
        config.parsing.fallback_language = "text".to_string();
        config.parsing.decode_entities = false;

        let options = parse_options(&config);

        assert_eq!(options.fallback_language, "text");
        assert!(!options.decode_entities);
    }
}
