use std::sync::Arc;

use tokio::{
    sync::{Mutex, broadcast, mpsc, oneshot},
    time::{self, Duration, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    core::traits::Sequencer,
    frame::Frame,
    manifest::{Manifest, ManifestError, ManifestSource},
};

use super::events::CollageEvent;

/// Failures reported by [`CollageHandle`] calls.
#[derive(Debug)]
pub enum RuntimeError {
    /// The manifest source failed; the grid was cleared.
    Manifest(ManifestError),
    /// A reload was requested but no source was configured.
    NoSource,
    /// The manifest fetch task panicked or was cancelled.
    FetchAborted,
    /// The rotation loop has stopped.
    ChannelClosed,
}

impl From<ManifestError> for RuntimeError {
    fn from(value: ManifestError) -> Self {
        Self::Manifest(value)
    }
}

/// Timer and channel sizing for [`spawn_collage`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Time between automatic rotations.
    pub rotation_period_ms: u64,
    /// Pending commands before callers wait.
    pub command_queue_bound: usize,
    /// Events buffered per subscriber before it lags.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rotation_period_ms: 20_000,
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Cloneable handle to a running rotation loop.
pub struct CollageHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<CollageEvent>,
}

impl Clone for CollageHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    SetManifest {
        manifest: Manifest,
        resp: oneshot::Sender<Frame>,
    },
    SetColumns {
        columns: usize,
        resp: oneshot::Sender<Frame>,
    },
    Reload {
        resp: oneshot::Sender<Result<usize, RuntimeError>>,
    },
    RotateNow {
        resp: oneshot::Sender<Frame>,
    },
    Current {
        resp: oneshot::Sender<Frame>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

type SharedSource = Arc<Mutex<Box<dyn ManifestSource>>>;

/// Spawns the rotation loop that owns `sequencer`.
///
/// When a `source` is given it is fetched once before the first command is
/// served. The timer stops when the loop exits, either on
/// [`CollageHandle::shutdown`] or when every handle is dropped.
pub fn spawn_collage<S: Sequencer>(
    sequencer: S,
    source: Option<Box<dyn ManifestSource>>,
    config: RuntimeConfig,
) -> CollageHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<CollageEvent>(config.event_capacity.max(1));

    let source: Option<SharedSource> = source.map(|s| Arc::new(Mutex::new(s)));
    let events_tx_loop = events_tx.clone();
    let period = Duration::from_millis(config.rotation_period_ms.max(1));

    tokio::spawn(async move {
        let mut sequencer = sequencer;
        let mut ticker = rotation_timer(period);

        if let Some(source) = source.as_ref() {
            let _ = reload(&mut sequencer, source, &events_tx_loop).await;
            ticker.reset();
        }

        info!(period_ms = period.as_millis() as u64, "collage rotation started");

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    let done = handle_command(
                        cmd,
                        &mut sequencer,
                        source.as_ref(),
                        &events_tx_loop,
                        &mut ticker,
                    ).await;

                    if done {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let frame = sequencer.advance();
                    debug!(rotation = frame.rotation, images = frame.image_count(), "rotated");
                    let _ = events_tx_loop.send(CollageEvent::Rotated { frame });
                }
            }
        }

        info!("collage rotation stopped");
    });

    CollageHandle { cmd_tx, events_tx }
}

impl CollageHandle {
    /// Subscribes to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<CollageEvent> {
        self.events_tx.subscribe()
    }

    /// Replaces the manifest and returns the first rebuilt frame.
    pub async fn set_manifest(&self, manifest: Manifest) -> Result<Frame, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SetManifest { manifest, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Changes the column count, e.g. after a viewport breakpoint.
    pub async fn set_columns(&self, columns: usize) -> Result<Frame, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SetColumns { columns, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Fetches the manifest source again and returns the image count.
    ///
    /// A failed fetch still clears the grid before the error is returned.
    pub async fn reload(&self) -> Result<usize, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Reload { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Rotates immediately without waiting for the timer.
    pub async fn rotate_now(&self) -> Result<Frame, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::RotateNow { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Frame currently on display.
    pub async fn current(&self) -> Result<Frame, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Current { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the rotation loop and its timer.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

async fn handle_command<S: Sequencer>(
    cmd: Command,
    sequencer: &mut S,
    source: Option<&SharedSource>,
    events_tx: &broadcast::Sender<CollageEvent>,
    ticker: &mut Interval,
) -> bool {
    match cmd {
        Command::SetManifest { manifest, resp } => {
            sequencer.set_manifest(&manifest);
            ticker.reset();
            let _ = resp.send(publish_rebuilt(sequencer, events_tx));
        }
        Command::SetColumns { columns, resp } => {
            if columns != sequencer.config().columns {
                sequencer.set_columns(columns);
                ticker.reset();
                let _ = resp.send(publish_rebuilt(sequencer, events_tx));
            } else {
                let _ = resp.send(sequencer.frame());
            }
        }
        Command::Reload { resp } => {
            let out = match source {
                Some(source) => {
                    let res = reload(sequencer, source, events_tx).await;
                    ticker.reset();
                    res
                }
                None => Err(RuntimeError::NoSource),
            };
            let _ = resp.send(out);
        }
        Command::RotateNow { resp } => {
            let frame = sequencer.advance();
            ticker.reset();
            let _ = events_tx.send(CollageEvent::Rotated {
                frame: frame.clone(),
            });
            let _ = resp.send(frame);
        }
        Command::Current { resp } => {
            let _ = resp.send(sequencer.frame());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

async fn reload<S: Sequencer>(
    sequencer: &mut S,
    source: &SharedSource,
    events_tx: &broadcast::Sender<CollageEvent>,
) -> Result<usize, RuntimeError> {
    let source_ref = Arc::clone(source);
    let fetched = match tokio::task::spawn_blocking(move || {
        let mut source = source_ref.blocking_lock();
        source.fetch()
    })
    .await
    {
        Ok(res) => res.map_err(RuntimeError::from),
        Err(err) => {
            warn!(%err, "manifest fetch task aborted");
            Err(RuntimeError::FetchAborted)
        }
    };

    match fetched {
        Ok(manifest) => {
            let images = manifest.len();
            info!(images, "manifest loaded");
            sequencer.set_manifest(&manifest);
            let _ = events_tx.send(CollageEvent::ManifestLoaded { images });
            publish_rebuilt(sequencer, events_tx);
            Ok(images)
        }
        Err(err) => {
            warn!(?err, "manifest fetch failed, showing no images");
            sequencer.set_manifest(&Manifest::default());
            let _ = events_tx.send(CollageEvent::ManifestFailed);
            publish_rebuilt(sequencer, events_tx);
            Err(err)
        }
    }
}

fn publish_rebuilt<S: Sequencer>(sequencer: &S, events_tx: &broadcast::Sender<CollageEvent>) -> Frame {
    let frame = sequencer.frame();
    let _ = events_tx.send(CollageEvent::Rebuilt {
        frame: frame.clone(),
    });
    frame
}

fn rotation_timer(period: Duration) -> Interval {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
