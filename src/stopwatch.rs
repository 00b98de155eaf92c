use stopwatch_core::{TimerCore, TimerState};

/// One recorded split.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lap {
    /// Duration since the previous lap, or since start for the first one.
    pub lap_ms: u64,
    /// Elapsed time at the moment of capture.
    pub total_ms: u64,
}

pub struct StopwatchState {
    pub timer: TimerCore,
    pub laps: Vec<Lap>,
}

impl StopwatchState {
    pub fn new() -> Self {
        Self {
            timer: TimerCore::new(),
            laps: Vec::new(),
        }
    }

    pub fn state(&self) -> TimerState {
        self.timer.state
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.timer.elapsed_ms(now_ms)
    }

    /// Start from Stopped or resume from Paused. Returns whether anything changed.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.timer.is_running() {
            return false;
        }
        self.timer.start(now_ms);
        true
    }

    pub fn pause(&mut self, now_ms: u64) -> bool {
        if !self.timer.is_running() {
            return false;
        }
        self.timer.pause(now_ms);
        true
    }

    pub fn toggle(&mut self, now_ms: u64) -> TimerState {
        match self.timer.state {
            TimerState::Stopped | TimerState::Paused => self.timer.start(now_ms),
            TimerState::Running => self.timer.pause(now_ms),
        }
        self.timer.state
    }

    pub fn record_lap(&mut self, now_ms: u64) -> Option<Lap> {
        if !self.timer.is_running() {
            return None;
        }
        let total_ms = self.timer.tick(now_ms);
        let lap = Lap {
            lap_ms: total_ms.saturating_sub(self.laps_total_ms()),
            total_ms,
        };
        self.laps.push(lap);
        Some(lap)
    }

    pub fn laps_total_ms(&self) -> u64 {
        self.laps.iter().map(|lap| lap.lap_ms).sum()
    }

    /// Laps most recent first, paired with their 1-based number from the oldest.
    pub fn laps_newest_first(&self) -> impl Iterator<Item = (usize, &Lap)> + '_ {
        let count = self.laps.len();
        self.laps
            .iter()
            .rev()
            .enumerate()
            .map(move |(index, lap)| (count - index, lap))
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.laps.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_at(now_ms: u64) -> StopwatchState {
        let mut sw = StopwatchState::new();
        sw.start(now_ms);
        sw
    }

    #[test]
    fn lap_durations_sum_to_elapsed_at_capture() {
        let mut sw = running_at(1_000);
        let mut last = None;
        for now in [1_730, 2_005, 6_999, 7_000, 12_345] {
            last = sw.record_lap(now);
        }
        let last = last.unwrap();
        assert_eq!(sw.laps.len(), 5);
        assert_eq!(last.total_ms, 11_345);
        assert_eq!(sw.laps_total_ms(), last.total_ms);
    }

    #[test]
    fn lap_splits_are_differences() {
        let mut sw = running_at(0);
        sw.record_lap(500);
        sw.record_lap(1_250);
        assert_eq!(
            sw.laps,
            vec![
                Lap { lap_ms: 500, total_ms: 500 },
                Lap { lap_ms: 750, total_ms: 1_250 },
            ]
        );
    }

    #[test]
    fn lap_ignored_unless_running() {
        let mut sw = StopwatchState::new();
        assert_eq!(sw.record_lap(100), None);
        assert!(sw.laps.is_empty());

        sw.start(0);
        sw.record_lap(300);
        sw.pause(400);
        assert_eq!(sw.record_lap(900), None);
        assert_eq!(sw.laps.len(), 1);
    }

    #[test]
    fn laps_across_pause_exclude_paused_time() {
        let mut sw = running_at(0);
        sw.record_lap(1_000);
        sw.pause(1_500);
        sw.start(10_000);
        let lap = sw.record_lap(10_200).unwrap();
        assert_eq!(lap, Lap { lap_ms: 700, total_ms: 1_700 });
        assert!(sw.laps_total_ms() <= sw.elapsed_ms(10_300));
    }

    #[test]
    fn newest_first_numbers_from_oldest() {
        let mut sw = running_at(0);
        sw.record_lap(100);
        sw.record_lap(300);
        sw.record_lap(600);
        let rows: Vec<(usize, u64)> = sw
            .laps_newest_first()
            .map(|(number, lap)| (number, lap.lap_ms))
            .collect();
        assert_eq!(rows, vec![(3, 300), (2, 200), (1, 100)]);
    }

    #[test]
    fn toggle_flips_between_running_and_paused() {
        let mut sw = StopwatchState::new();
        assert_eq!(sw.toggle(0), TimerState::Running);
        assert_eq!(sw.toggle(250), TimerState::Paused);
        assert_eq!(sw.toggle(1_000), TimerState::Running);
        assert_eq!(sw.elapsed_ms(1_100), 350);
    }

    #[test]
    fn start_and_pause_report_changes() {
        let mut sw = StopwatchState::new();
        assert!(!sw.pause(0));
        assert!(sw.start(0));
        assert!(!sw.start(5));
        assert!(sw.pause(10));
    }

    #[test]
    fn reset_clears_everything() {
        let mut sw = running_at(0);
        sw.record_lap(100);
        sw.reset();
        assert_eq!(sw.state(), TimerState::Stopped);
        assert_eq!(sw.elapsed_ms(5_000), 0);
        assert!(sw.laps.is_empty());
    }
}
