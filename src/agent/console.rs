//! Line-oriented console boundary used by interactive sessions and menus.

use std::future::Future;
use std::io::{BufRead, Write};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{Result, SimError};

/// One read from the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// A line of input, without its trailing newline.
    Line(String),
    /// The user sent an interrupt (Ctrl-C).
    Interrupted,
    /// Input is exhausted.
    Closed,
}

impl ConsoleInput {
    /// The line, or `None` for interrupts and end of input.
    pub fn into_line(self) -> Option<String> {
        match self {
            Self::Line(line) => Some(line),
            Self::Interrupted | Self::Closed => None,
        }
    }
}

/// Prompts, reads lines, and echoes output.
#[async_trait]
pub trait Console: Send {
    /// Show `prompt` and wait for the next line.
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<ConsoleInput>;

    /// Print one line of output.
    fn write_line(&mut self, line: &str);

    /// Resolves when an interrupt arrives while a provider call is in flight.
    ///
    /// The default never resolves.
    async fn interrupted(&mut self) {
        std::future::pending::<()>().await
    }
}

/// Read a line, trimmed.
///
/// `None` at end of input. An interrupt becomes [`SimError::Interrupted`] so
/// it unwinds through every menu level.
pub async fn prompt(console: &mut dyn Console, text: &str) -> Result<Option<String>> {
    match console.read_line(text).await? {
        ConsoleInput::Line(line) => Ok(Some(line.trim().to_string())),
        ConsoleInput::Interrupted => Err(SimError::Interrupted),
        ConsoleInput::Closed => Ok(None),
    }
}

/// Block until the user presses Enter.
pub async fn pause(console: &mut dyn Console) -> Result<()> {
    match console.read_line("Press Enter to continue...").await? {
        ConsoleInput::Interrupted => Err(SimError::Interrupted),
        ConsoleInput::Line(_) | ConsoleInput::Closed => Ok(()),
    }
}

/// Await `call` unless the console reports an interrupt first, in which case
/// the call is dropped and [`SimError::Interrupted`] is returned.
pub async fn interruptible<T>(
    console: &mut dyn Console,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        result = call => result,
        _ = console.interrupted() => Err(SimError::Interrupted),
    }
}

/// Console on the process's stdin/stdout, with Ctrl-C mapped to
/// [`ConsoleInput::Interrupted`].
///
/// Stdin is read on a dedicated thread that feeds a channel. A read abandoned
/// on interrupt stays parked on that thread and never holds up runtime
/// shutdown.
pub struct StdConsole {
    lines: mpsc::UnboundedReceiver<std::io::Result<String>>,
}

impl StdConsole {
    pub fn new() -> std::io::Result<Self> {
        Self::spawn_reader(|| std::io::stdin().lock())
    }

    /// Console reading from `reader` instead of stdin.
    pub fn from_reader<R>(reader: R) -> std::io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        Self::spawn_reader(move || reader)
    }

    fn spawn_reader<R, F>(open: F) -> std::io::Result<Self>
    where
        R: BufRead,
        F: FnOnce() -> R + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("console-input".into())
            .spawn(move || {
                for line in open().lines() {
                    let failed = line.is_err();
                    if tx.send(line).is_err() || failed {
                        return;
                    }
                }
            })?;
        Ok(Self { lines: rx })
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<ConsoleInput> {
        print!("{prompt}");
        std::io::stdout().flush()?;

        tokio::select! {
            line = self.lines.recv() => match line {
                Some(Ok(line)) => Ok(ConsoleInput::Line(line)),
                Some(Err(err)) => Err(err),
                None => Ok(ConsoleInput::Closed),
            },
            signal = tokio::signal::ctrl_c() => {
                signal?;
                Ok(ConsoleInput::Interrupted)
            }
        }
    }

    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }

    async fn interrupted(&mut self) {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await
        }
    }
}
