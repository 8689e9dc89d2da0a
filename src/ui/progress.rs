//! ui::progress
//!
//! A spinner shown while a controller call is in flight.
//!
//! # Design
//!
//! The spinner is a tokio task drawing frames on standard output. Stopping it
//! sends on a oneshot channel and then awaits the task, so the frame is
//! erased before the caller prints `done`. When standard output is not a
//! terminal the spinner never starts.

use std::io::{IsTerminal, Write};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Handle to a running spinner.
#[derive(Debug)]
pub struct Spinner {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start a spinner if `interactive` and standard output is a terminal.
    pub fn start(interactive: bool) -> Self {
        if !interactive || !std::io::stdout().is_terminal() {
            return Self::inert();
        }

        let (stop, mut stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut stdout = std::io::stdout();
            let mut frame = 0;
            loop {
                let _ = write!(stdout, "{}\x08", FRAMES[frame % FRAMES.len()]);
                let _ = stdout.flush();
                frame += 1;

                tokio::select! {
                    _ = &mut stopped => break,
                    _ = tokio::time::sleep(FRAME_INTERVAL) => {}
                }
            }
            let _ = write!(stdout, " \x08");
            let _ = stdout.flush();
        });

        Self {
            stop: Some(stop),
            task: Some(task),
        }
    }

    /// A spinner that draws nothing.
    pub fn inert() -> Self {
        Self {
            stop: None,
            task: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Stop drawing and wait until the frame is erased.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn non_interactive_spinner_is_inert() {
        let spinner = Spinner::start(false);
        assert!(!spinner.is_running());
        spinner.stop().await;
    }
}
