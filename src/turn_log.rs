// Turn log for asynchronous round-by-round diagnostics
//
// The turn driver hands over a finished RoundReport and keeps playing. A single writer
// task owns the file and appends each report as one JSON line in the order received.
// flush() resolves once every report sent before it has been written.

use log::error;
use serde::Serialize;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};

use crate::turn::RoundReport;

/// Represents a single turn log line
#[derive(Debug, Serialize)]
struct TurnLogEntry<'a> {
    #[serde(flatten)]
    report: &'a RoundReport,
    timestamp: String,
}

enum LogCommand {
    Round {
        report: RoundReport,
        timestamp: String,
    },
    Flush(oneshot::Sender<()>),
}

/// Handle to the turn log writer. Clones feed the same writer.
#[derive(Clone)]
pub struct TurnLogger {
    sender: Option<mpsc::UnboundedSender<LogCommand>>,
}

impl TurnLogger {
    /// Creates a new turn log
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Turn logging enabled: {}", log_file_path);
                let (sender, receiver) = mpsc::unbounded_channel();
                tokio::spawn(run_writer(file, receiver));
                TurnLogger {
                    sender: Some(sender),
                }
            }
            Err(e) => {
                error!("Failed to create turn log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled turn log (no-op)
    pub fn disabled() -> Self {
        TurnLogger { sender: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Queues a round for the writer without waiting for it
    pub fn log_round(&self, report: RoundReport) {
        let Some(sender) = &self.sender else {
            return;
        };

        let command = LogCommand::Round {
            report,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        if sender.send(command).is_err() {
            error!("Turn log writer has stopped, dropping round");
        }
    }

    /// Waits until every round queued so far is on disk
    pub async fn flush(&self) {
        let Some(sender) = &self.sender else {
            return;
        };

        let (ack, done) = oneshot::channel();
        if sender.send(LogCommand::Flush(ack)).is_err() {
            error!("Turn log writer has stopped, nothing to flush");
            return;
        }
        if done.await.is_err() {
            error!("Turn log writer stopped before acknowledging the flush");
        }
    }
}

async fn run_writer(mut file: File, mut receiver: mpsc::UnboundedReceiver<LogCommand>) {
    while let Some(command) = receiver.recv().await {
        match command {
            LogCommand::Round { report, timestamp } => {
                let entry = TurnLogEntry {
                    report: &report,
                    timestamp,
                };

                match serde_json::to_string(&entry) {
                    Ok(json_line) => {
                        let line_with_newline = format!("{}\n", json_line);
                        if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                            error!("Failed to write turn log entry: {}", e);
                        }
                    }
                    Err(e) => {
                        error!("Failed to serialize turn log entry: {}", e);
                    }
                }
            }
            LogCommand::Flush(ack) => {
                if let Err(e) = file.flush().await {
                    error!("Failed to flush turn log: {}", e);
                }
                // The waiter may have given up
                let _ = ack.send(());
            }
        }
    }

    if let Err(e) = file.flush().await {
        error!("Failed to flush turn log on shutdown: {}", e);
    }
}
