//! Pure timing logic library with no platform dependencies.
//! Testable on host, drives the terminal app through explicit `now_ms` values.

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
}

/// Elapsed-time accounting for a pausable stopwatch.
///
/// Entering `Running` anchors a reference instant at `now - elapsed`, so the
/// elapsed time while running is always `now - reference`. Pause and resume
/// need no bookkeeping of the paused intervals.
#[derive(Clone, Debug)]
pub struct TimerCore {
    pub state: TimerState,
    elapsed_ms: u64,
    reference_start_ms: u64,
}

impl TimerCore {
    pub fn new() -> Self {
        Self {
            state: TimerState::Stopped,
            elapsed_ms: 0,
            reference_start_ms: 0,
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.state == TimerState::Running {
            return;
        }
        self.reference_start_ms = now_ms.saturating_sub(self.elapsed_ms);
        self.state = TimerState::Running;
    }

    pub fn pause(&mut self, now_ms: u64) {
        if self.state != TimerState::Running {
            return;
        }
        self.tick(now_ms);
        self.state = TimerState::Paused;
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
        self.reference_start_ms = 0;
        self.state = TimerState::Stopped;
    }

    /// Recompute the stored elapsed time. Frozen unless running.
    pub fn tick(&mut self, now_ms: u64) -> u64 {
        if self.state == TimerState::Running {
            self.elapsed_ms = now_ms.saturating_sub(self.reference_start_ms);
        }
        self.elapsed_ms
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.state {
            TimerState::Running => now_ms.saturating_sub(self.reference_start_ms),
            _ => self.elapsed_ms,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }
}

impl Default for TimerCore {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock fields of a millisecond count, read as a UTC offset from epoch zero.
///
/// Hours wrap at 24 the same way a wall clock does.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClockTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub centis: u8,
}

impl ClockTime {
    pub fn from_ms(ms: u64) -> Self {
        Self {
            hours: ((ms / MS_PER_HOUR) % 24) as u8,
            minutes: ((ms / MS_PER_MINUTE) % 60) as u8,
            seconds: ((ms / MS_PER_SECOND) % 60) as u8,
            centis: ((ms % MS_PER_SECOND) / 10) as u8,
        }
    }

    pub fn to_ms(self) -> u64 {
        self.hours as u64 * MS_PER_HOUR
            + self.minutes as u64 * MS_PER_MINUTE
            + self.seconds as u64 * MS_PER_SECOND
            + self.centis as u64 * 10
    }
}

/// The three renderings the display and the exporter use.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FormattedTime {
    pub main: String,
    pub centis: String,
    pub full: String,
}

pub fn format_time(ms: u64) -> FormattedTime {
    let t = ClockTime::from_ms(ms);
    let main = format!("{:02}:{:02}:{:02}", t.hours, t.minutes, t.seconds);
    let centis = format!("{:02}", t.centis);
    let full = format!("{}.{}", main, centis);
    FormattedTime { main, centis, full }
}

/// Format milliseconds as "HH:MM:SS"
pub fn format_hms(ms: u64) -> String {
    format_time(ms).main
}

/// Format the centisecond part of milliseconds as "cc"
pub fn format_cs(ms: u64) -> String {
    format_time(ms).centis
}

/// Format milliseconds as "HH:MM:SS.cc" (centiseconds, truncated)
pub fn format_hms_cs(ms: u64) -> String {
    format_time(ms).full
}

/// Parse "HH:MM:SS.cc" back into milliseconds.
pub fn parse_hms_cs(s: &str) -> Option<u64> {
    let (hms, cs) = s.split_once('.')?;
    let mut parts = hms.split(':');
    let hours = parse_field(parts.next()?, 24)?;
    let minutes = parse_field(parts.next()?, 60)?;
    let seconds = parse_field(parts.next()?, 60)?;
    if parts.next().is_some() {
        return None;
    }
    let centis = parse_field(cs, 100)?;
    Some(
        ClockTime {
            hours,
            minutes,
            seconds,
            centis,
        }
        .to_ms(),
    )
}

fn parse_field(field: &str, limit: u8) -> Option<u8> {
    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u8 = field.parse().ok()?;
    (value < limit).then_some(value)
}
