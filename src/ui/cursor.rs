/// Rows to move up from the last line of a block of `total_lines` lines to
/// reach the line of job `job_index`.
///
/// The cursor is expected to rest on the block's last line. Returns `None`
/// when the index lies outside the block or the distance does not fit a
/// cursor movement.
#[must_use]
pub fn cursor_delta(total_lines: usize, job_index: usize) -> Option<u16> {
    let last = total_lines.checked_sub(1)?;
    let up = last.checked_sub(job_index)?;
    u16::try_from(up).ok()
}
