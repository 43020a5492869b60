//! Terminal host for the command-block editor.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p cmdblock-tui -- <file|->
//! ```
//!
//! The command is read from the file (or stdin for `-`) and opened formatted. Ctrl+S restores the
//! terminal and prints the edited command to stdout as a single line; Esc prints the original text
//! unchanged.
//!
//! # Environment
//!
//! - `CMDBLOCK_IDE_CONFIG`: YAML config file (see `cmdblock_ide::EditorConfig`)
//! - `CMDBLOCK_IDE_LOG`: log file; nothing is logged when unset
//! - `RUST_LOG`: log filter (default `info`)
//!
//! # Keys
//!
//! - Arrows, Home/End: move the caret
//! - Enter, Tab, Backspace, Delete: edit
//! - Ctrl+Z / Ctrl+Y: undo / redo
//! - Ctrl+S: commit
//! - Esc: cancel
//! - Mouse: click or drag to place the caret, wheel to scroll

use cmdblock_ide::{
    Color as ChatColor, CommandEditor, ControlKey, EditorConfig, InputEvent, PointerEvent,
    RenderedLine,
};
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
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env,
    fs::{self, OpenOptions},
    io::{self, stdout},
    path::Path,
    process,
    sync::Mutex,
    time::Duration,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// How the session ended.
enum Outcome {
    Commit(String),
    Cancel,
}

struct App {
    editor: CommandEditor,
    /// Text as it was read, printed back on cancel.
    original: String,
    /// Shown in the title bar.
    source: String,
    /// Inner editor area of the last frame; mouse coordinates are relative to it.
    editor_area: Rect,
    status_message: String,
    outcome: Option<Outcome>,
}

impl App {
    fn new(original: String, source: String, config: EditorConfig) -> Self {
        let text = normalize(&original, config.tab_width);
        let editor = CommandEditor::with_config(&text, true, 80, 20, config);
        info!(
            lines = editor.buffer().line_count(),
            errors = editor.tokenizer().errors().count(),
            "opened command"
        );

        Self {
            editor,
            original,
            source,
            editor_area: Rect::default(),
            status_message: String::new(),
            outcome: None,
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.status_message.clear();

        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let input = match key.code {
            KeyCode::Char('s') if control => {
                self.outcome = Some(Outcome::Commit(self.editor.command(true)));
                return;
            }
            KeyCode::Esc => {
                self.outcome = Some(Outcome::Cancel);
                return;
            }
            KeyCode::Char('z') if control => {
                if !self.editor.history().can_undo() {
                    self.status_message = "nothing to undo".to_string();
                }
                ControlKey::Undo.into()
            }
            KeyCode::Char('y') if control => {
                if !self.editor.history().can_redo() {
                    self.status_message = "nothing to redo".to_string();
                }
                ControlKey::Redo.into()
            }
            KeyCode::Char(_) if control => return,
            KeyCode::Char(ch) => InputEvent::Char(ch),
            KeyCode::Enter => ControlKey::Enter.into(),
            KeyCode::Tab => ControlKey::Tab.into(),
            KeyCode::Backspace => ControlKey::Backspace.into(),
            KeyCode::Delete => ControlKey::Delete.into(),
            KeyCode::Up => ControlKey::Up.into(),
            KeyCode::Down => ControlKey::Down.into(),
            KeyCode::Left => ControlKey::Left.into(),
            KeyCode::Right => ControlKey::Right.into(),
            KeyCode::Home => ControlKey::Home.into(),
            KeyCode::End => ControlKey::End.into(),
            _ => return,
        };

        self.editor.handle(input);
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let area = self.editor_area;
        let inside = mouse.column >= area.x
            && mouse.column < area.right()
            && mouse.row >= area.y
            && mouse.row < area.bottom();
        let row = usize::from(mouse.row.saturating_sub(area.y));
        let column = usize::from(mouse.column.saturating_sub(area.x));

        let pointer = match mouse.kind {
            MouseEventKind::ScrollDown => PointerEvent::Scroll { delta: 1 },
            MouseEventKind::ScrollUp => PointerEvent::Scroll { delta: -1 },
            _ if !inside => return,
            MouseEventKind::Down(MouseButton::Left) => PointerEvent::Click { row, column },
            MouseEventKind::Drag(MouseButton::Left) => PointerEvent::Drag { row, column },
            MouseEventKind::Moved => PointerEvent::Move { row, column },
            _ => return,
        };

        self.editor.handle(pointer.into());
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.source));
        let inner = block.inner(chunks[0]);
        if inner != self.editor_area {
            self.editor_area = inner;
            self.editor.handle(InputEvent::Resize {
                width: usize::from(inner.width),
                height: usize::from(inner.height),
            });
        }

        self.render_editor(frame, chunks[0], block);
        self.render_status_line(frame, chunks[1]);
        self.render_shortcuts(frame, chunks[2]);
    }

    fn render_editor(&self, frame: &mut Frame, area: Rect, block: Block) {
        let gutter = self.editor.gutter_width();
        let rendered = self.editor.render();
        let lines: Vec<Line> = rendered
            .iter()
            .map(|line| display_line(line, gutter))
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);

        let inner = self.editor_area;
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let Some((row, cell)) = rendered
            .iter()
            .enumerate()
            .find_map(|(row, line)| line.cursor.map(|cell| (row, cell)))
        else {
            return;
        };

        let x = u16::try_from(gutter + cell)
            .unwrap_or(u16::MAX)
            .saturating_add(inner.x)
            .min(inner.right() - 1);
        let y = u16::try_from(row)
            .unwrap_or(u16::MAX)
            .saturating_add(inner.y)
            .min(inner.bottom() - 1);
        frame.set_cursor_position((x, y));
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let status_text = if self.status_message.is_empty() {
            let (line, column) = self.editor.cursor().unwrap_or_default();
            let history = self.editor.history();
            format!(
                "Ln {}, Col {} | {} lines | undo {} redo {} | bracket errors: {}",
                line + 1,
                column + 1,
                self.editor.buffer().line_count(),
                history.undo_depth(),
                history.redo_depth(),
                self.editor.tokenizer().errors().count(),
            )
        } else {
            self.status_message.clone()
        };

        let status_line = Paragraph::new(status_text).style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status_line, area);
    }

    fn render_shortcuts(&self, frame: &mut Frame, area: Rect) {
        let shortcuts = "Ctrl-S:commit  Esc:cancel  Ctrl-Z/Y:undo/redo  Tab:indent";
        let shortcuts_line =
            Paragraph::new(shortcuts).style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(shortcuts_line, area);
    }
}

/// Gutter plus highlighted spans for one rendered line.
fn display_line(line: &RenderedLine, gutter: usize) -> Line<'static> {
    let prefix_style = if line.focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled(format!("{:<gutter$}", line.prefix), prefix_style)];
    for span in &line.spans {
        let mut style = Style::default().fg(terminal_color(span.color));
        if span.emphasis {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(span.text.clone(), style));
    }

    let display = Line::from(spans);
    if line.hovered {
        display.style(Style::default().bg(Color::Rgb(0x26, 0x26, 0x26)))
    } else {
        display
    }
}

fn terminal_color(color: ChatColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// The editor works on `\n` line ends and spaces only.
fn normalize(text: &str, tab_width: usize) -> String {
    text.replace("\r\n", "\n")
        .replace('\t', &" ".repeat(tab_width))
}

fn read_command(arg: &str) -> io::Result<(String, String)> {
    if arg == "-" {
        return Ok((io::read_to_string(io::stdin())?, "<stdin>".to_string()));
    }
    let path = Path::new(arg);
    Ok((fs::read_to_string(path)?, path.display().to_string()))
}

/// Config from `CMDBLOCK_IDE_CONFIG`, or the defaults plus a status message when it cannot be
/// loaded.
fn load_config() -> (EditorConfig, String) {
    let Some(path) = env::var_os("CMDBLOCK_IDE_CONFIG") else {
        return (EditorConfig::default(), String::new());
    };

    match EditorConfig::load(&path) {
        Ok(config) => {
            info!(path = %Path::new(&path).display(), "loaded config");
            (config, String::new())
        }
        Err(err) => {
            warn!(%err, "using default config");
            (EditorConfig::default(), format!("config: {err}"))
        }
    }
}

/// Log to the file named by `CMDBLOCK_IDE_LOG`; the terminal belongs to the UI.
fn init_logging() {
    let Some(path) = env::var_os("CMDBLOCK_IDE_LOG") else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("cannot open log file {}: {err}", Path::new(&path).display());
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .init();
}

fn main() -> io::Result<()> {
    let Some(arg) = env::args().nth(1) else {
        eprintln!("usage: cmdblock-tui <file|->");
        eprintln!("\nexample:");
        eprintln!("  echo 'give @s stone{{Count:1b}}' | cmdblock-tui -");
        process::exit(1);
    };

    init_logging();
    let (original, source) = read_command(&arg)?;
    let (config, status_message) = load_config();
    let mut app = App::new(original, source, config);
    app.status_message = status_message;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(Outcome::Commit(command)) => {
            info!(chars = command.chars().count(), "committed");
            println!("{command}");
        }
        Ok(Outcome::Cancel) => {
            info!("cancelled");
            print!("{}", app.original);
            if !app.original.ends_with('\n') {
                println!();
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<Outcome> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if let Some(outcome) = app.outcome.take() {
            return Ok(outcome);
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse),
                // the next draw picks up the new size
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_ends_and_tabs() {
        assert_eq!(normalize("a\r\n\tb\r\n", 2), "a\n  b\n");
    }

    #[test]
    fn test_display_line_pads_gutter_and_marks_emphasis() {
        let mut editor = CommandEditor::new("a[b]", false, 40, 5);
        editor.handle(ControlKey::Right.into());
        editor.handle(ControlKey::Right.into());
        let rendered = editor.render();
        let line = display_line(&rendered[0], editor.gutter_width());

        assert_eq!(line.spans[0].content, "1 - ");
        let text: String = line.spans[1..]
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(text, "a[b]");
        let emphasized = line
            .spans
            .iter()
            .filter(|span| span.style.add_modifier.contains(Modifier::UNDERLINED))
            .count();
        assert_eq!(emphasized, 2);
    }
}
