use crate::caret::Caret;
use crate::highlight::Highlight;
use crate::input::InputId;
use crate::level::Level;
use crate::Span;

/// Diagnostic messages, with a lot of trimmings.
///
/// The ultimate purpose of these is to be shown to the programmer at some
/// point. To that end, the `Display` implementation here just dumps un-wrapped
/// plain text.
///
/// Methods either use references and start with `get` or `set`, or consume
/// `self` and return it. The builder-style methods only allow setting, so they
/// don't take an [`Option`].
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The input the source text came from.
    input_id: Option<InputId>,

    /// Where in the source the problem begins.
    ///
    /// Not all errors have a location, for instance "file not found" can't.
    location: Option<Caret>,

    /// The highlighted regions relevant to this diagnostic.
    highlights: Vec<Highlight>,

    level: Level,

    text: String,
}

impl Diagnostic {
    /// Create a new diagnostic message with only a simple description.
    ///
    /// The [`Level`]'s [`Default`] is used.
    pub fn new(text: impl Into<String>) -> Self {
        Diagnostic {
            input_id: None,
            location: None,
            highlights: Vec::new(),
            level: Level::default(),
            text: text.into(),
        }
    }

    /// Add the id of the input that caused this issue.
    pub fn input(mut self, id: InputId) -> Self {
        self.input_id = Some(id);
        self
    }

    /// The id of the input that produced this issue.
    pub fn get_input(&self) -> Option<InputId> {
        self.input_id
    }

    /// The location where the issue started.
    pub fn location(mut self, location: Caret) -> Self {
        self.location = Some(location);
        self
    }

    /// Get the location where the issue arose. This may be `None` if it's not
    /// known, or wouldn't be meaningful.
    pub fn get_location(&self) -> Option<Caret> {
        self.location
    }

    /// Add a highlight to this diagnostic message.
    pub fn highlight(mut self, span: Span, note: impl Into<String>) -> Self {
        self.highlights.push(Highlight::new(span, note));
        self
    }

    /// View the list of highlights.
    pub fn get_highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Change the severity.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn get_level(&self) -> Level {
        self.level
    }

    /// Get the main diagnostic message.
    pub fn get_text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.location {
            Some(l) => write!(f, "{} {}: {}", self.level, l, self.text),
            None => write!(f, "{}: {}", self.level, self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_location() {
        let d = Diagnostic::new("cannot read stdin");
        assert_eq!(d.to_string(), "error: cannot read stdin");
    }

    #[test]
    fn display_with_location() {
        let d = Diagnostic::new("expected 'package'")
            .level(Level::Warning)
            .location(Caret::new(0, 0));
        assert_eq!(d.to_string(), "warning 1:1: expected 'package'");
    }
}
