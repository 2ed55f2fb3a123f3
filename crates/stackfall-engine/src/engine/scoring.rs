use std::time::Duration;

/// Line-clear multipliers, indexed by the number of rows removed at once.
///
/// The reward is convex so clearing several rows with one piece is worth
/// more than clearing them one at a time.
const SCORE_MULTIPLIERS: [usize; 5] = [0, 1, 3, 6, 10];

/// Fall interval before any speed threshold is reached.
pub const INITIAL_FALL_INTERVAL: Duration = Duration::from_millis(1000);

/// `(minimum score, fall interval)` pairs, fastest last.
const SPEED_STEPS: [(usize, Duration); 4] = [
    (1000, Duration::from_millis(900)),
    (2000, Duration::from_millis(750)),
    (3000, Duration::from_millis(600)),
    (4000, Duration::from_millis(400)),
];

/// Returns the points awarded for clearing `cleared_lines` rows at once on a
/// grid `width` columns wide.
///
/// A single piece can clear at most four rows; larger counts score nothing.
///
/// ```
/// use stackfall_engine::score_for;
///
/// let scores: Vec<_> = (0..=4).map(|lines| score_for(lines, 20)).collect();
/// assert_eq!(scores, [0, 20, 60, 120, 200]);
/// ```
#[must_use]
pub fn score_for(cleared_lines: usize, width: usize) -> usize {
    SCORE_MULTIPLIERS
        .get(cleared_lines)
        .map_or(0, |multiplier| multiplier * width)
}

/// Returns the automatic fall interval for a total score.
///
/// ```
/// use std::time::Duration;
///
/// use stackfall_engine::speed_for;
///
/// assert_eq!(speed_for(999), Duration::from_millis(1000));
/// assert_eq!(speed_for(2500), Duration::from_millis(750));
/// ```
#[must_use]
pub fn speed_for(score: usize) -> Duration {
    SPEED_STEPS
        .iter()
        .rev()
        .find(|(threshold, _)| score >= *threshold)
        .map_or(INITIAL_FALL_INTERVAL, |(_, interval)| *interval)
}

/// Running counters of the current game.
///
/// All counters only grow while a game is played and return to zero when
/// the engine resets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    score: usize,
    cleared_lines: usize,
    locked_pieces: usize,
    elapsed: Duration,
}

impl ScoreState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            cleared_lines: 0,
            locked_pieces: 0,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Returns the number of pieces that have come to rest.
    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    /// Returns the play time accumulated from timer ticks.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Records a locked piece that removed `cleared_lines` rows.
    pub(crate) fn record_lock(&mut self, cleared_lines: usize, width: usize) {
        self.locked_pieces += 1;
        self.cleared_lines += cleared_lines;
        self.score += score_for(cleared_lines, width);
    }

    pub(crate) fn add_elapsed(&mut self, interval: Duration) {
        self.elapsed += interval;
    }

    #[must_use]
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.score,
            cleared_lines: self.cleared_lines,
            elapsed: self.elapsed,
        }
    }
}

/// Final figures of a finished game.
///
/// Rates are `None` when their denominator is zero, since there is no
/// meaningful number to report for them.
///
/// ```
/// use std::time::Duration;
///
/// use stackfall_engine::GameSummary;
///
/// let summary = GameSummary::new(60, 2, Duration::from_secs(30));
/// assert_eq!(summary.score_per_second(), Some(2.0));
/// assert_eq!(summary.score_per_line(), Some(30.0));
///
/// let no_lines = GameSummary::new(0, 0, Duration::from_secs(5));
/// assert_eq!(no_lines.score_per_line(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSummary {
    score: usize,
    cleared_lines: usize,
    elapsed: Duration,
}

impl GameSummary {
    #[must_use]
    pub const fn new(score: usize, cleared_lines: usize, elapsed: Duration) -> Self {
        Self {
            score,
            cleared_lines,
            elapsed,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn score_per_second(&self) -> Option<f64> {
        per_second(self.score, self.elapsed)
    }

    #[must_use]
    pub fn lines_per_second(&self) -> Option<f64> {
        per_second(self.cleared_lines, self.elapsed)
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn score_per_line(&self) -> Option<f64> {
        (self.cleared_lines > 0).then(|| self.score as f64 / self.cleared_lines as f64)
    }
}

#[expect(clippy::cast_precision_loss)]
fn per_second(count: usize, elapsed: Duration) -> Option<f64> {
    let secs = elapsed.as_secs_f64();
    (secs > 0.0).then(|| count as f64 / secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table_scales_with_width() {
        for width in [4, 10, 20] {
            assert_eq!(score_for(0, width), 0);
            assert_eq!(score_for(1, width), width);
            assert_eq!(score_for(2, width), 3 * width);
            assert_eq!(score_for(3, width), 6 * width);
            assert_eq!(score_for(4, width), 10 * width);
        }
    }

    #[test]
    fn test_score_for_more_than_four_lines() {
        assert_eq!(score_for(5, 20), 0);
    }

    #[test]
    fn test_speed_thresholds() {
        let ms = |score| speed_for(score).as_millis();
        assert_eq!(ms(0), 1000);
        assert_eq!(ms(999), 1000);
        assert_eq!(ms(1000), 900);
        assert_eq!(ms(1999), 900);
        assert_eq!(ms(2000), 750);
        assert_eq!(ms(3000), 600);
        assert_eq!(ms(3999), 600);
        assert_eq!(ms(4000), 400);
        assert_eq!(ms(100_000), 400);
    }

    #[test]
    fn test_record_lock_accumulates() {
        let mut state = ScoreState::new();
        state.record_lock(0, 20);
        state.record_lock(2, 20);
        state.record_lock(1, 20);

        assert_eq!(state.locked_pieces(), 3);
        assert_eq!(state.cleared_lines(), 3);
        assert_eq!(state.score(), 80);
    }

    #[test]
    fn test_summary_rates() {
        let mut state = ScoreState::new();
        state.record_lock(4, 10);
        state.add_elapsed(Duration::from_millis(2500));
        state.add_elapsed(Duration::from_millis(2500));

        let summary = state.summary();
        assert_eq!(summary.score(), 100);
        assert_eq!(summary.cleared_lines(), 4);
        assert_eq!(summary.elapsed(), Duration::from_secs(5));
        assert_eq!(summary.score_per_second(), Some(20.0));
        assert_eq!(summary.lines_per_second(), Some(0.8));
        assert_eq!(summary.score_per_line(), Some(25.0));
    }

    #[test]
    fn test_summary_rates_undefined_without_time() {
        let summary = GameSummary::new(40, 2, Duration::ZERO);
        assert_eq!(summary.score_per_second(), None);
        assert_eq!(summary.lines_per_second(), None);
        assert_eq!(summary.score_per_line(), Some(20.0));
    }
}
