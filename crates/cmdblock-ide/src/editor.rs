//! The editor façade: owns the buffer, the tokenizer and the undo history, and turns input events
//! into edits.

use crate::buffer::LineBuffer;
use crate::config::EditorConfig;
use crate::input::{ControlKey, InputEvent, PointerEvent};
use crate::undo::{EditClass, EditorSnapshot, UndoRedoManager};
use cmdblock_ide_format::auto_format;
use cmdblock_ide_syntax::{CursorPos, StyledSpan, Tokenizer};
use tracing::debug;

/// One visible line, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Zero-based line index.
    pub index: usize,
    /// Line-number prefix (e.g. `"12 -"`), drawn in the gutter.
    pub prefix: String,
    /// Highlighted fragments of the visible part of the line.
    pub spans: Vec<StyledSpan>,
    /// Whether this is the focused line.
    pub focused: bool,
    /// Whether the pointer hovers this line.
    pub hovered: bool,
    /// Caret cell inside the text area (after the gutter), on the focused line only.
    pub cursor: Option<usize>,
}

/// Headless multi-line command editor.
///
/// # Example
///
/// ```rust
/// use cmdblock_ide::{CommandEditor, ControlKey, InputEvent};
///
/// let mut editor = CommandEditor::new("data merge block ~ ~ ~ {}", false, 80, 20);
/// editor.handle(InputEvent::Key(ControlKey::End));
/// editor.handle(InputEvent::Key(ControlKey::Left));
/// editor.handle(InputEvent::Key(ControlKey::Enter));
///
/// assert_eq!(editor.command(false), "data merge block ~ ~ ~ {\n  \n}");
/// assert_eq!(editor.cursor(), Some((1, 2)));
/// assert_eq!(editor.command(true), "data merge block ~ ~ ~ {}");
/// ```
#[derive(Debug, Clone)]
pub struct CommandEditor {
    buffer: LineBuffer,
    tokenizer: Tokenizer,
    history: UndoRedoManager,
    config: EditorConfig,
    last_edit: Option<EditClass>,
    hovered: Option<usize>,
}

impl CommandEditor {
    /// Open `text` in a `width` x `height` cell viewport with the default config.
    pub fn new(text: &str, format_on_load: bool, width: usize, height: usize) -> Self {
        Self::with_config(text, format_on_load, width, height, EditorConfig::default())
    }

    /// Open `text` with an explicit config. With `format_on_load` the text is auto-formatted
    /// first. The initial state is recorded as the first undo boundary.
    pub fn with_config(
        text: &str,
        format_on_load: bool,
        width: usize,
        height: usize,
        config: EditorConfig,
    ) -> Self {
        let text = if format_on_load {
            auto_format(text, &config.format_policy())
        } else {
            text.to_string()
        };

        let buffer = LineBuffer::new(&text, width, height);
        let tokenizer = Tokenizer::parse(&buffer.text());
        let mut editor = Self {
            buffer,
            tokenizer,
            history: UndoRedoManager::new(config.undo_depth),
            config,
            last_edit: None,
            hovered: None,
        };
        let initial = editor.snapshot();
        editor.history.record(initial, false);
        editor
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Char('\n' | '\r') => self.handle_key(ControlKey::Enter),
            InputEvent::Char('\t') => self.handle_key(ControlKey::Tab),
            InputEvent::Char(ch) if ch.is_control() => {}
            InputEvent::Char(ch) => {
                let auto_close = self.config.auto_close_brackets;
                self.edit(EditClass::Insert, |buffer, _| {
                    buffer.insert_char(ch, auto_close)
                });
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer),
            InputEvent::Resize { width, height } => {
                debug!(width, height, "viewport resized");
                self.buffer.set_viewport(width, height);
            }
        }
    }

    fn handle_key(&mut self, key: ControlKey) {
        match key {
            ControlKey::Enter => {
                self.edit(EditClass::Newline, |buffer, config| {
                    buffer.split_line(config.tab_width)
                });
            }
            ControlKey::Backspace => {
                self.edit(EditClass::Erase, |buffer, _| buffer.backspace());
            }
            ControlKey::Delete => {
                self.edit(EditClass::Erase, |buffer, _| buffer.delete());
            }
            ControlKey::Tab => {
                self.edit(EditClass::Insert, |buffer, config| {
                    buffer.insert_tab(config.tab_width)
                });
            }
            ControlKey::Up => self.buffer.move_up(),
            ControlKey::Down => self.buffer.move_down(),
            ControlKey::Left => self.buffer.move_left(),
            ControlKey::Right => self.buffer.move_right(),
            ControlKey::Home => self.buffer.move_home(),
            ControlKey::End => self.buffer.move_end(),
            ControlKey::Undo => self.undo(),
            ControlKey::Redo => self.redo(),
        }
    }

    fn handle_pointer(&mut self, pointer: PointerEvent) {
        match pointer {
            PointerEvent::Move { row, .. } => {
                let line = self.buffer.scroll_top() + row;
                self.hovered = self.buffer.visible_lines().contains(&line).then_some(line);
            }
            PointerEvent::Click { row, column } | PointerEvent::Drag { row, column } => {
                self.buffer.click(row, column);
            }
            PointerEvent::Scroll { delta } => {
                let step = isize::try_from(self.config.scroll_step).unwrap_or(isize::MAX);
                self.buffer.scroll_by(delta.saturating_mul(step));
            }
        }
    }

    /// Run a text edit, recording an undo boundary when it starts a new run of edits.
    fn edit(
        &mut self,
        class: EditClass,
        apply: impl FnOnce(&mut LineBuffer, &EditorConfig) -> bool,
    ) {
        let before = self.snapshot();
        if !apply(&mut self.buffer, &self.config) {
            return;
        }

        if self.last_edit != Some(class) {
            self.history.record(before, false);
            self.last_edit = Some(class);
        }
        self.retokenize();
    }

    /// Restore the previous undo boundary.
    pub fn undo(&mut self) {
        let current = self.snapshot();
        if let Some(snapshot) = self.history.undo(current) {
            self.restore(snapshot);
        }
    }

    /// Re-apply the last undone state.
    pub fn redo(&mut self) {
        let current = self.snapshot();
        if let Some(snapshot) = self.history.redo(current) {
            self.restore(snapshot);
        }
    }

    /// Replace the whole text (optionally auto-formatted) as one undoable edit.
    pub fn set_text(&mut self, text: &str, format: bool) {
        let text = if format {
            auto_format(text, &self.config.format_policy())
        } else {
            text.to_string()
        };

        let before = self.snapshot();
        self.history.record(before, false);
        self.last_edit = None;
        self.buffer.set_text(&text);
        self.buffer.jump_to(0, 0);
        self.retokenize();
    }

    /// The edited command: lines joined with `\n`, or collapsed to a single line with `inline`.
    pub fn command(&self, inline: bool) -> String {
        self.buffer.joined_text(inline, &self.config.format_policy())
    }

    /// Visible lines with their highlighted spans.
    pub fn render(&self) -> Vec<RenderedLine> {
        let cursor = self
            .buffer
            .cursor()
            .map(|(line, column)| CursorPos::new(line, column));
        let cursor_cell = self.buffer.cursor_cell();

        self.buffer
            .visible_lines()
            .filter_map(|index| {
                let line = self.buffer.line(index)?;
                let focused = self.buffer.focused() == Some(index);
                let spans = self.tokenizer.styled_line(
                    index,
                    cursor,
                    self.buffer.visible_columns(index),
                    &self.config.palette,
                );
                Some(RenderedLine {
                    index,
                    prefix: line.prefix().to_string(),
                    spans,
                    focused,
                    hovered: self.hovered == Some(index),
                    cursor: if focused { cursor_cell } else { None },
                })
            })
            .collect()
    }

    /// `(line, column)` of the caret.
    pub fn cursor(&self) -> Option<(usize, usize)> {
        self.buffer.cursor()
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn history(&self) -> &UndoRedoManager {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Width of the line-number gutter in cells; pointer columns below it land on the gutter.
    pub fn gutter_width(&self) -> usize {
        self.buffer.gutter_width()
    }

    fn snapshot(&self) -> EditorSnapshot {
        let (line, cursor) = match self.buffer.cursor() {
            Some((line, cursor)) => (Some(line), cursor),
            None => (None, 0),
        };
        EditorSnapshot {
            cursor,
            line,
            text: self.buffer.text(),
        }
    }

    fn restore(&mut self, snapshot: EditorSnapshot) {
        self.buffer.set_text(&snapshot.text);
        match snapshot.line {
            Some(line) => self.buffer.jump_to(line, snapshot.cursor),
            None => self.buffer.unfocus(),
        }
        self.last_edit = None;
        self.retokenize();
    }

    fn retokenize(&mut self) {
        self.tokenizer.refresh(&self.buffer.text());
    }
}
