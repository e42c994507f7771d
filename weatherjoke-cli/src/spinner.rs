use std::{
    io::Write,
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Braille spinner drawn on its own thread until stopped.
///
/// Stopping joins the thread and clears the line, so whatever is printed next
/// starts at column 0 of a clean line. The cursor is never hidden, so a
/// process killed mid-spin leaves the terminal usable.
pub struct Spinner {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start<W>(mut out: W, message: String) -> Self
    where
        W: Write + Send + 'static,
    {
        let (stop, ticks) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            for frame in FRAMES.iter().cycle() {
                let _ = execute!(
                    out,
                    cursor::MoveToColumn(0),
                    Clear(ClearType::CurrentLine),
                    SetForegroundColor(Color::Yellow),
                    Print(frame),
                    ResetColor,
                    Print(" "),
                    Print(&message),
                );

                // A stop message or a dropped sender wakes the thread right away.
                match ticks.recv_timeout(FRAME_INTERVAL) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            let _ = execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine));
        });

        Self { stop: Some(stop), handle: Some(handle) }
    }

    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.halt();
    }
}
