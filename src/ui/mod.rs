//! In-place terminal progress for a target whose jobs are still in flight.
//!
//! Every job owns one fixed line, printed as a placeholder before dispatch.
//! A timer redraws pending lines with a spinner frame; a completed line is
//! drawn once more with its final glyph and then left alone.
mod cursor;
mod progress;


pub use cursor::cursor_delta;
pub use progress::{LinePhase, ProgressBoard, ProgressTable, SPINNER_FRAMES};
