//! Printing diagnostics to a terminal, with colour when it's available.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use unicode_width::UnicodeWidthStr;

use crate::{Caret, Diagnostic, Inputs, Level};

use super::Emitter;

/// Writes diagnostics to stderr, with a short window into the source for each
/// highlight.
///
/// ```text
/// error: <arg 0>:1:5 - expected operand, found '}'
///   1 | x + }
///     |     ^ here
/// ```
pub struct TerminalEmitter {
    out: Box<dyn WriteColor>,
}

impl TerminalEmitter {
    /// Prints to stderr, colouring output if stderr looks like a terminal.
    pub fn stderr() -> Self {
        TerminalEmitter {
            out: Box::new(StandardStream::stderr(ColorChoice::Auto)),
        }
    }

    /// Emit to any coloured writer, which is mostly useful for tests.
    pub fn new(out: Box<dyn WriteColor>) -> Self {
        TerminalEmitter { out }
    }

    fn level_color(level: Level) -> Color {
        match level {
            Level::Error => Color::Red,
            Level::Warning => Color::Yellow,
            Level::Help => Color::Green,
            Level::Info => Color::Cyan,
        }
    }

    fn header(&mut self, d: &Diagnostic, inputs: &Inputs) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Self::level_color(d.get_level())))
            .set_bold(true);

        self.out.set_color(&spec)?;
        write!(self.out, "{}", d.get_level())?;
        self.out.reset()?;

        let name = d.get_input().map(|id| inputs.get_input_name(id));

        match (name, d.get_location()) {
            (None, None) => write!(self.out, ": ")?,
            (None, Some(l)) => write!(self.out, " {l}: ")?,
            (Some(n), None) => write!(self.out, ": {n} - ")?,
            (Some(n), Some(l)) => write!(self.out, ": {n}:{l} - ")?,
        }

        writeln!(self.out, "{}", d.get_text())
    }

    fn window(&mut self, d: &Diagnostic, inputs: &Inputs) -> io::Result<()> {
        let source = match d.get_input() {
            Some(id) => inputs.get_input_buffer(id),
            None => return Ok(()),
        };

        for highlight in d.get_highlights() {
            let span = highlight.span();
            let line_number = span.start().line();
            let line = match source.lines().nth(line_number as usize) {
                Some(line) => line,
                None => continue,
            };

            let gutter = format!("{:>3}", line_number + 1);
            let blank = " ".repeat(gutter.len());

            writeln!(self.out, "{gutter} | {line}")?;

            let (pad, width) = underline(line, span.start(), span.end());
            write!(self.out, "{blank} | {}", " ".repeat(pad))?;

            let mut spec = ColorSpec::new();
            spec.set_fg(Some(Self::level_color(d.get_level())));
            self.out.set_color(&spec)?;
            write!(self.out, "{}", "^".repeat(width.max(1)))?;
            self.out.reset()?;

            match highlight.note() {
                Some(note) => writeln!(self.out, " {note}")?,
                None => writeln!(self.out)?,
            }
        }

        Ok(())
    }
}

impl Emitter for TerminalEmitter {
    fn emit(&mut self, d: &Diagnostic, inputs: &Inputs) -> io::Result<()> {
        self.header(d, inputs)?;
        self.window(d, inputs)?;
        self.out.flush()
    }
}

/// The display width before the highlight starts, and the width of the
/// highlight itself, clamped to the one line we show.
fn underline(line: &str, start: Caret, end: Caret) -> (usize, usize) {
    let byte_at = |column: u32| {
        line.char_indices()
            .nth(column as usize)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    };

    let from = byte_at(start.column());
    let to = if end.line() == start.line() {
        byte_at(end.column())
    } else {
        line.len()
    };

    let pad = line[..from].width();
    let width = line[from..to.max(from)].width();

    (pad, width)
}

#[cfg(test)]
mod tests {
    use termcolor::Buffer;

    use super::*;
    use crate::Span;

    #[test]
    fn underline_ascii() {
        let (pad, width) = underline("x + }", Caret::new(0, 4), Caret::new(0, 5));
        assert_eq!((pad, width), (4, 1));
    }

    #[test]
    fn underline_wide_chars() {
        // Each of these is two columns wide in a terminal.
        let (pad, width) = underline("世界 x", Caret::new(0, 3), Caret::new(0, 4));
        assert_eq!((pad, width), (5, 1));
    }

    #[test]
    fn emit_plain() {
        let mut inputs = Inputs::default();
        let id = inputs.argument(0, "x + }".into());

        let d = Diagnostic::new("expected operand")
            .input(id)
            .location(Caret::new(0, 4))
            .highlight(Span::new(Caret::new(0, 4), Caret::new(0, 5)), "here");

        let mut emitter = TerminalEmitter::new(Box::new(Buffer::no_color()));
        assert!(emitter.emit(&d, &inputs).is_ok());
    }
}
