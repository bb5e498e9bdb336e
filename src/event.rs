use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::system::snapshot::Snapshot;

/// Events driving the main loop: terminal input plus completion
/// notifications from the background collection task. There is no tick
/// variant; collection runs only on explicit refresh requests.
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    SnapshotReady(Box<Snapshot>),
    SnapshotFailed(String),
}

pub struct EventHandler {
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        let input_tx = tx.clone();
        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();

            while let Some(maybe_event) = reader.next().await {
                let Ok(evt) = maybe_event else { break };
                let mapped = match evt {
                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                    CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                    _ => None,
                };
                if let Some(e) = mapped
                    && input_tx.send(e).is_err()
                {
                    break;
                }
            }
        });

        Self {
            tx,
            rx,
            _task: task,
        }
    }

    /// Sender handle for the collection task to report results on.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
