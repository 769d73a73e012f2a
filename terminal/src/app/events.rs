//! # Application Events
//!
//! Events sent to the main loop from background tasks.

/// Messages delivered over the app's `async_channel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// One line typed at the prompt (without the trailing newline)
    Input(String),
    /// Stdin reached end of file or failed
    InputClosed,
}

/// Read stdin on a dedicated thread and forward each line as [`AppEvent::Input`].
///
/// A plain thread rather than `spawn_blocking`: a blocking stdin read would keep
/// the runtime from shutting down after `quit`.
pub fn spawn_stdin_reader(tx: async_channel::Sender<AppEvent>) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            let mut line = String::new();
            loop {
                line.clear();
                match stdin.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        let text = line.trim_end_matches(['\r', '\n']).to_string();
                        if tx.send_blocking(AppEvent::Input(text)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read stdin");
                        break;
                    }
                }
            }
            let _ = tx.send_blocking(AppEvent::InputClosed);
        })?;
    Ok(())
}
