//! Emitters present [`Diagnostic`]s to the user.

mod terminal;

use std::io;

use crate::{Diagnostic, Inputs};

pub use self::terminal::TerminalEmitter;

/// An [`Emitter`] wraps up the ways you can output diagnostics.
pub trait Emitter {
    /// Emits the diagnostic, presenting it to the user/consumer.
    fn emit(&mut self, diagnostic: &Diagnostic, inputs: &Inputs) -> io::Result<()>;
}
