//! Keyboard listener that lets the user finish a sweep early with `q` or Ctrl-C.
//!
//! The terminal is in raw mode while the listener runs, so Ctrl-C arrives as a
//! key event instead of a signal.

use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tokio_util::sync::CancellationToken;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct InputHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl InputHandle {
    /// Starts listening, or returns `None` when stdin is not an interactive terminal.
    pub fn start(cancel: CancellationToken) -> Option<Self> {
        if !std::io::stdin().is_terminal() {
            return None;
        }
        if let Err(e) = enable_raw_mode() {
            debug!("keyboard listener disabled: {e}");
            return None;
        }

        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let thread = thread::spawn(move || {
            while !thread_stop.load(Ordering::Relaxed) && !cancel.is_cancelled() {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => {
                        if let Ok(Event::Key(key_event)) = event::read()
                            && is_interrupt(&key_event)
                        {
                            cancel.cancel();
                            break;
                        }
                    }
                    Ok(false) => {}
                    Err(_) => break,
                }
            }
        });

        Some(Self {
            stop,
            thread: Some(thread),
        })
    }
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        let _ = disable_raw_mode();
    }
}

fn is_interrupt(key_event: &KeyEvent) -> bool {
    let is_q = key_event.code == KeyCode::Char('q');
    let is_ctrl_c = key_event.code == KeyCode::Char('c')
        && key_event.modifiers.contains(KeyModifiers::CONTROL);

    (is_q || is_ctrl_c) && key_event.kind == KeyEventKind::Press
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
