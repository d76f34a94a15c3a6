use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::ui::ProgressBoard;

pub(crate) const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

/// Redraws `board` on a fixed interval until `done_rx` fires, then runs the
/// final pass and hands the writer back.
pub(crate) fn spawn_progress_ticker<W>(
    board: Arc<ProgressBoard>,
    mut out: W,
    mut done_rx: oneshot::Receiver<()>,
) -> JoinHandle<W>
where
    W: Write + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(REDRAW_INTERVAL);

        loop {
            tokio::select! {
                _ = &mut done_rx => {
                    if let Err(err) = board.finish(&mut out) {
                        warn!("Failed to draw final progress: {}", err);
                    }
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(err) = board.tick(&mut out) {
                        warn!("Failed to redraw progress: {}", err);
                        break;
                    }
                }
            }
        }
        out
    })
}
