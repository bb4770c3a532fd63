//! Reading a fragment from standard input.

use std::{
    io::{self, Read},
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

/// At most this many bytes are read.
const LIMIT: u64 = 1_000_000;

/// How long to wait before telling the user we're blocked on stdin.
const NOTICE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error)]
pub enum StdinError {
    #[error("attempt to perform multiple reads from stdin")]
    MultipleReads,

    #[error("cannot read stdin: {0}")]
    Io(#[from] io::Error),
}

/// Why stdin is being read, which decides the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    NoArgs,
    Dash,
}

impl Reason {
    fn notice(self) -> &'static str {
        match self {
            Reason::NoArgs => "no args given, waiting for stdin...",
            Reason::Dash => "dash arg given, waiting for stdin...",
        }
    }
}

/// Standard input, which can be read once.
#[derive(Debug)]
pub struct StdinSource {
    reason: Reason,
    consumed: bool,
}

impl StdinSource {
    pub fn new(reason: Reason) -> Self {
        StdinSource {
            reason,
            consumed: false,
        }
    }

    /// Read all of stdin, up to [`LIMIT`] bytes.
    ///
    /// If nothing has finished arriving after a moment, a notice is printed
    /// on stderr so an accidental `astdump` doesn't look hung.
    pub fn read(&mut self) -> Result<String, StdinError> {
        if self.consumed {
            return Err(StdinError::MultipleReads);
        }
        self.consumed = true;

        let (done, waiting) = mpsc::channel::<()>();
        let notice = self.reason.notice();
        let timer = thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) =
                waiting.recv_timeout(NOTICE_DELAY)
            {
                eprintln!("{}", notice);
            }
        });

        let mut buf = Vec::new();
        let result = io::stdin().lock().take(LIMIT).read_to_end(&mut buf);

        drop(done);
        if timer.join().is_err() {
            tracing::warn!("stdin notice thread panicked");
        }

        result?;
        tracing::debug!(bytes = buf.len(), "read stdin");
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
