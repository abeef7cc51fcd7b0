//! Interaction port: the blocking request/response boundary between the
//! session loop and whatever presents the game.
//!
//! The session runs on its own logic thread and blocks on `request_line`
//! until the presentation side hands over exactly one line. The handoff is a
//! single-slot channel: at most one line in flight, and deliveries while the
//! slot is full are dropped rather than queued. A closed feed (stdin EOF,
//! presentation thread gone) surfaces as `None` so the session can wind
//! down instead of spinning on empty input.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex};

use log::debug;

/// Abstract blocking boundary to the presentation layer. `emit` is
/// append-only with no backpressure contract; `request_line` blocks the
/// calling thread until a line arrives, with no cancellation or timeout,
/// and returns `None` once the input side has disconnected for good.
pub trait InteractionPort {
    fn emit(&self, text: &str);
    fn request_line(&self) -> Option<String>;
}

/// Presentation-side handle: submit completed input lines to the session.
#[derive(Clone)]
pub struct LineFeed {
    tx: SyncSender<String>,
}

impl LineFeed {
    /// Hand one line to the session. Returns false when the slot is already
    /// full or the session is gone; the line is dropped in both cases.
    pub fn submit(&self, line: &str) -> bool {
        match self.tx.try_send(line.trim().to_string()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("dropping unsolicited input line (slot full)");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Session-side port writing output to `out` and receiving lines from the
/// paired [`LineFeed`].
pub struct ChannelPort<W> {
    rx: Receiver<String>,
    out: Mutex<W>,
}

/// Build a connected port/feed pair with a single-slot line channel.
pub fn channel_port<W: Write>(out: W) -> (ChannelPort<W>, LineFeed) {
    let (tx, rx) = sync_channel(1);
    (
        ChannelPort {
            rx,
            out: Mutex::new(out),
        },
        LineFeed { tx },
    )
}

impl<W: Write> InteractionPort for ChannelPort<W> {
    fn emit(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }
    }

    fn request_line(&self) -> Option<String> {
        // Every feed handle dropped means input is closed permanently; the
        // session treats that as its cue to end.
        self.rx.recv().ok()
    }
}

/// Scripted port for tests: feeds a fixed sequence of input lines and
/// records everything the session emits. Clones share the script and the
/// transcript, so a test can keep a handle while the engine owns the port.
/// An exhausted script reads as closed input, the same as stdin EOF.
#[derive(Clone, Default)]
pub struct ScriptedPort {
    lines: Arc<Mutex<VecDeque<String>>>,
    transcript: Arc<Mutex<String>>,
}

impl ScriptedPort {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Arc::new(Mutex::new(lines.into_iter().map(Into::into).collect())),
            transcript: Arc::new(Mutex::new(String::new())),
        }
    }

    /// Everything emitted so far.
    pub fn transcript(&self) -> String {
        self.transcript.lock().expect("transcript lock").clone()
    }
}

impl InteractionPort for ScriptedPort {
    fn emit(&self, text: &str) {
        self.transcript.lock().expect("transcript lock").push_str(text);
    }

    fn request_line(&self) -> Option<String> {
        self.lines.lock().expect("script lock").pop_front()
    }
}
