use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tracing::warn;

use crate::http::{EndpointResult, Job, JobObserver, Outcome};

use super::cursor::cursor_delta;

pub const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SUCCESS_GLYPH: char = '✓';
const FAILURE_GLYPH: char = '✗';
const ERROR_GLYPH: char = '!';

/// `Pending` covers both queued and in-flight jobs. `Complete` lines still
/// need their final draw; `Flushed` lines are never redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePhase {
    Pending,
    Complete,
    Flushed,
}

#[derive(Debug, Clone, Copy)]
struct Completion {
    outcome: Outcome,
    status: Option<u16>,
    duration: Duration,
}

#[derive(Debug)]
struct JobLine {
    line: usize,
    url: String,
    phase: LinePhase,
    frame: usize,
    completion: Option<Completion>,
}

/// Render state for one target block, addressed by job index.
#[derive(Debug)]
pub struct ProgressTable {
    lines: Vec<JobLine>,
    width: usize,
    no_color: bool,
}

impl ProgressTable {
    #[must_use]
    pub fn new(jobs: &[Job], width: usize, no_color: bool) -> Self {
        let lines = jobs
            .iter()
            .map(|job| JobLine {
                line: job.index,
                url: job.url.clone(),
                phase: LinePhase::Pending,
                frame: 0,
                completion: None,
            })
            .collect();
        Self {
            lines,
            width,
            no_color,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn phase(&self, index: usize) -> Option<LinePhase> {
        self.lines.get(index).map(|line| line.phase)
    }

    /// True once every line has received its final draw.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.lines
            .iter()
            .all(|line| line.phase == LinePhase::Flushed)
    }

    /// Moves a pending line to `Complete`. Returns `false` if the line is
    /// unknown or already past `Pending`.
    pub fn complete(&mut self, index: usize, result: &EndpointResult) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        if line.phase != LinePhase::Pending {
            return false;
        }
        line.completion = Some(Completion {
            outcome: result.outcome(),
            status: result.observed_status(),
            duration: result.duration,
        });
        line.phase = LinePhase::Complete;
        true
    }

    /// Prints one line per job, leaving the cursor on the last one.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to `out` fails.
    pub fn write_placeholders<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for (position, line) in self.lines.iter().enumerate() {
            if position > 0 {
                queue!(out, Print("\n"))?;
            }
            let (text, color) = render_line(line, self.width);
            print_segment(out, &text, color, self.no_color)?;
        }
        out.flush()
    }

    /// Redraws every line that is not yet flushed and returns how many lines
    /// got their final draw in this pass.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to `out` fails.
    pub fn redraw<W: Write>(&mut self, out: &mut W) -> std::io::Result<usize> {
        let total = self.lines.len();
        let width = self.width;
        let no_color = self.no_color;
        let mut flushed: usize = 0;

        for line in self
            .lines
            .iter_mut()
            .filter(|line| line.phase != LinePhase::Flushed)
        {
            let Some(up) = cursor_delta(total, line.line) else {
                continue;
            };
            if line.phase == LinePhase::Pending {
                line.frame = line
                    .frame
                    .saturating_add(1)
                    .checked_rem(SPINNER_FRAMES.len())
                    .unwrap_or(0);
            }
            let (text, color) = render_line(line, width);
            if up > 0 {
                queue!(out, cursor::MoveUp(up))?;
            }
            queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
            print_segment(out, &text, color, no_color)?;
            if up > 0 {
                queue!(out, cursor::MoveDown(up))?;
            }
            queue!(out, cursor::MoveToColumn(0))?;

            if line.phase == LinePhase::Complete {
                line.phase = LinePhase::Flushed;
                flushed = flushed.saturating_add(1);
            }
        }
        out.flush()?;
        Ok(flushed)
    }
}

fn render_line(line: &JobLine, width: usize) -> (String, Option<Color>) {
    let (text, color) = match (line.phase, line.completion) {
        (LinePhase::Complete | LinePhase::Flushed, Some(completion)) => {
            let (glyph, color) = match completion.outcome {
                Outcome::Success => (SUCCESS_GLYPH, Color::Green),
                Outcome::Failure => (FAILURE_GLYPH, Color::Red),
                Outcome::Error => (ERROR_GLYPH, Color::Yellow),
            };
            let status = completion
                .status
                .map_or_else(|| "ERROR".to_owned(), |status| status.to_string());
            (
                format!(
                    "{} GET {} {} {:.2}s",
                    glyph,
                    line.url,
                    status,
                    completion.duration.as_secs_f64()
                ),
                Some(color),
            )
        }
        (LinePhase::Pending | LinePhase::Complete | LinePhase::Flushed, _) => {
            let glyph = SPINNER_FRAMES.get(line.frame).copied().unwrap_or('-');
            (format!("{} GET {}", glyph, line.url), Some(Color::Cyan))
        }
    };
    (fit_width(&text, width), color)
}

// A wrapped line would shift every row above it.
fn fit_width(text: &str, width: usize) -> String {
    let limit = width.saturating_sub(1).max(1);
    if text.chars().count() <= limit {
        return text.to_owned();
    }
    text.chars().take(limit).collect()
}

fn print_segment<W: Write>(
    out: &mut W,
    text: &str,
    color: Option<Color>,
    no_color: bool,
) -> std::io::Result<()> {
    match color {
        Some(color) if !no_color => queue!(out, SetForegroundColor(color), Print(text), ResetColor),
        Some(_) | None => queue!(out, Print(text)),
    }
}

/// Shares a [`ProgressTable`] between completing workers and the redraw
/// timer. Every state change and every terminal write happens under the
/// same lock, so two sources never interleave cursor movements.
#[derive(Debug)]
pub struct ProgressBoard {
    table: Mutex<ProgressTable>,
}

impl ProgressBoard {
    #[must_use]
    pub const fn new(table: ProgressTable) -> Self {
        Self {
            table: Mutex::new(table),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProgressTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// # Errors
    ///
    /// Returns an error when writing to `out` fails.
    pub fn begin<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        self.lock().write_placeholders(out)
    }

    /// One timer-driven redraw pass.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to `out` fails.
    pub fn tick<W: Write>(&self, out: &mut W) -> std::io::Result<usize> {
        self.lock().redraw(out)
    }

    /// Final pass after the dispatcher reported completion: draws whatever
    /// completed since the last tick and moves the cursor below the block.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to `out` fails.
    pub fn finish<W: Write>(&self, out: &mut W) -> std::io::Result<usize> {
        let mut table = self.lock();
        let flushed = table.redraw(out)?;
        if !table.is_empty() {
            queue!(out, Print("\n"))?;
            out.flush()?;
        }
        Ok(flushed)
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.lock().is_settled()
    }

    #[must_use]
    pub fn phase(&self, index: usize) -> Option<LinePhase> {
        self.lock().phase(index)
    }
}

impl JobObserver for ProgressBoard {
    fn job_completed(&self, index: usize, result: &EndpointResult) {
        if !self.lock().complete(index, result) {
            warn!("Ignoring repeated completion for job {}", index);
        }
    }
}
