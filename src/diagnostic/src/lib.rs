//! Diagnostics - user-readable messages about source text.
//!
//! Everything that points into a piece of input does it with a [`Caret`] or a
//! [`Span`]. The lexer and parser produce those, and the command line tools
//! turn errors into [`Diagnostic`]s and hand them to an [`Emitter`].

mod caret;
mod diagnostic;
mod emitter;
mod highlight;
mod input;
mod level;
mod span;

pub use self::{
    caret::Caret,
    diagnostic::Diagnostic,
    emitter::{Emitter, TerminalEmitter},
    highlight::Highlight,
    input::{InputId, Inputs},
    level::Level,
    span::Span,
};
