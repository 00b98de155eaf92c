use std::io::{self, Write};

use stopwatch_core::{format_hms_cs, format_time, TimerState};

use crate::actions::Action;
use crate::stopwatch::StopwatchState;

/// Running/paused flags, mutually exclusive and both off when stopped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Indicator {
    pub running: bool,
    pub paused: bool,
}

impl Indicator {
    pub fn from_state(state: TimerState) -> Self {
        Self {
            running: state == TimerState::Running,
            paused: state == TimerState::Paused,
        }
    }

    fn badge(self) -> &'static str {
        if self.running {
            "  [RUNNING]"
        } else if self.paused {
            "  [PAUSED]"
        } else {
            ""
        }
    }
}

pub fn primary_label(state: TimerState) -> &'static str {
    if state == TimerState::Running {
        Action::Pause.label()
    } else {
        Action::Start.label()
    }
}

pub fn window_title(state: TimerState, elapsed_ms: u64, original: &str) -> String {
    match state {
        TimerState::Running => format_hms_cs(elapsed_ms),
        TimerState::Paused => format!("Paused | {}", format_hms_cs(elapsed_ms)),
        TimerState::Stopped => original.to_string(),
    }
}

/// Lap number and split time, newest first.
pub fn lap_rows(state: &StopwatchState) -> Vec<(usize, String)> {
    state
        .laps_newest_first()
        .map(|(number, lap)| (number, format_hms_cs(lap.lap_ms)))
        .collect()
}

pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x1b[H\x1b[2J")
}

pub fn set_title<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    write!(out, "\x1b]0;{}\x07", title)?;
    out.flush()
}

pub fn draw_stopwatch<W: Write>(
    out: &mut W,
    state: &StopwatchState,
    now_ms: u64,
    laps_shown: usize,
    status: Option<&str>,
) -> io::Result<()> {
    clear_screen(out)?;

    let indicator = Indicator::from_state(state.state());
    writeln!(out, "STOPWATCH{}", indicator.badge())?;
    writeln!(out)?;

    let time = format_time(state.elapsed_ms(now_ms));
    writeln!(out, "    {}.{}", time.main, time.centis)?;
    writeln!(out)?;

    writeln!(
        out,
        "[s] {:<5}  [l] {}  [r] {}  [e] {}  [h] {}  [q] {}",
        primary_label(state.state()),
        Action::Lap.label(),
        Action::Reset.label(),
        Action::Export.label(),
        Action::Help.label(),
        Action::Quit.label(),
    )?;
    if let Some(status) = status {
        writeln!(out, "{}", status)?;
    }

    // Lap list (most recent first)
    let rows = lap_rows(state);
    if !rows.is_empty() {
        writeln!(out)?;
        for (number, lap_time) in rows.iter().take(laps_shown) {
            writeln!(out, "Lap {:2}  {}", number, lap_time)?;
        }
        if rows.len() > laps_shown {
            writeln!(out, "  ... {} more", rows.len() - laps_shown)?;
        }
    }

    out.flush()
}

pub fn draw_help<W: Write>(out: &mut W, help_text: &str) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "{}", help_text)?;
    writeln!(out)?;
    writeln!(out, "Press any key to close")?;
    out.flush()
}

pub fn draw_notice<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "{}", message)?;
    writeln!(out)?;
    writeln!(out, "Press any key to continue")?;
    out.flush()
}

pub fn draw_confirm_exit<W: Write>(out: &mut W) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "Stopwatch Running")?;
    writeln!(out)?;
    writeln!(out, "The stopwatch is still running.\nExit anyway?")?;
    writeln!(out)?;
    writeln!(out, "  y = Stop & exit\n  n = Cancel")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(state: &StopwatchState, now_ms: u64, laps_shown: usize) -> String {
        let mut out = Vec::new();
        draw_stopwatch(&mut out, state, now_ms, laps_shown, None).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn indicator_is_exclusive() {
        assert_eq!(
            Indicator::from_state(TimerState::Stopped),
            Indicator { running: false, paused: false }
        );
        assert_eq!(
            Indicator::from_state(TimerState::Running),
            Indicator { running: true, paused: false }
        );
        assert_eq!(
            Indicator::from_state(TimerState::Paused),
            Indicator { running: false, paused: true }
        );
    }

    #[test]
    fn primary_label_follows_state() {
        assert_eq!(primary_label(TimerState::Stopped), "Start");
        assert_eq!(primary_label(TimerState::Running), "Pause");
        assert_eq!(primary_label(TimerState::Paused), "Start");
    }

    #[test]
    fn titles() {
        assert_eq!(window_title(TimerState::Running, 3_661_450, "Stopwatch"), "01:01:01.45");
        assert_eq!(
            window_title(TimerState::Paused, 1_500, "Stopwatch"),
            "Paused | 00:00:01.50"
        );
        assert_eq!(window_title(TimerState::Stopped, 1_500, "Stopwatch"), "Stopwatch");
    }

    #[test]
    fn set_title_uses_osc() {
        let mut out = Vec::new();
        set_title(&mut out, "Paused | 00:00:01.50").unwrap();
        assert_eq!(out, b"\x1b]0;Paused | 00:00:01.50\x07");
    }

    #[test]
    fn stopwatch_screen_shows_time_and_laps_newest_first() {
        let mut sw = StopwatchState::new();
        sw.start(0);
        sw.record_lap(1_000);
        sw.record_lap(3_500);
        let screen = render(&sw, 4_010, 10);

        assert!(screen.contains("STOPWATCH  [RUNNING]"));
        assert!(screen.contains("00:00:04.01"));
        assert!(screen.contains("[s] Pause"));
        let lap2 = screen.find("Lap  2  00:00:02.50").unwrap();
        let lap1 = screen.find("Lap  1  00:00:01.00").unwrap();
        assert!(lap2 < lap1);
    }

    #[test]
    fn stopwatch_screen_when_stopped() {
        let screen = render(&StopwatchState::new(), 0, 10);
        assert!(screen.contains("STOPWATCH\n"));
        assert!(screen.contains("00:00:00.00"));
        assert!(screen.contains("[s] Start"));
        assert!(!screen.contains("Lap  1"));
    }

    #[test]
    fn lap_list_is_truncated() {
        let mut sw = StopwatchState::new();
        sw.start(0);
        for now in 1..=5 {
            sw.record_lap(now * 100);
        }
        let screen = render(&sw, 600, 2);
        assert!(screen.contains("Lap  5"));
        assert!(screen.contains("Lap  4"));
        assert!(!screen.contains("Lap  3"));
        assert!(screen.contains("... 3 more"));
    }
}
