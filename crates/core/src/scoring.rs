//! Scoring module - point awards and advance speed-up
//!
//! Points:
//! - Locking a piece pays `points_per_piece` to the piece's owner only.
//! - A clearing pass that removes N columns pays `N * points_per_line` to
//!   *both* players, once per pass.
//!
//! Every pass with N >= 1 also shortens the advance interval by one speed
//! step, never going below the configured floor.

/// Points paid to each player for a clearing pass.
pub fn line_clear_award(columns: u32, points_per_line: u32) -> u32 {
    columns.saturating_mul(points_per_line)
}

/// Interval after one speed-up step, clamped at `min_ms`.
pub fn next_interval(current_ms: u32, step_ms: u32, min_ms: u32) -> u32 {
    current_ms.saturating_sub(step_ms).max(min_ms)
}

/// Add an award to a running score without wrapping.
pub fn add_points(score: u32, points: u32) -> u32 {
    score.saturating_add(points)
}
