mod actions;
mod alerts;
mod cli;
mod clock;
mod export;
mod stopwatch;
mod ui;

use std::io::{self, BufRead, Write};
use std::process::exit;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use clap::Parser;
use num_traits::{FromPrimitive, ToPrimitive};
use stopwatch_core::TimerState;

use crate::actions::{Action, HELP_TEXT};
use crate::alerts::{fire_alert, AlertConfig};
use crate::cli::{Args, Settings};
use crate::clock::{Clock, Ticktimer};
use crate::export::ExportError;
use crate::stopwatch::StopwatchState;

#[derive(Debug, num_derive::FromPrimitive, num_derive::ToPrimitive)]
enum AppOp {
    Redraw = 0,
    Rawkeys,
    Pump,
    Quit,
}

#[derive(Debug, num_derive::FromPrimitive, num_derive::ToPrimitive)]
enum PumpOp {
    Start = 0,
    Stop,
    Quit,
}

/// Opcode plus one argument, the only message shape the threads exchange.
#[derive(Clone, Copy, Debug)]
struct Scalar {
    id: usize,
    arg1: usize,
}

impl Scalar {
    fn new<T: ToPrimitive>(op: T, arg1: usize) -> Self {
        Self {
            id: op.to_usize().unwrap_or(usize::MAX),
            arg1,
        }
    }
}

struct StopwatchApp<C: Clock, W: Write> {
    tt: C,
    out: W,
    settings: Settings,
    alert_config: AlertConfig,
    stopwatch: StopwatchState,

    pump_conn: Option<Sender<Scalar>>,
    pump_running: bool,
    title: Option<String>,
    status: Option<String>,
    notice: Option<String>,
    help_visible: bool,
    confirm_exit: bool,
    quit: bool,
}

impl<C: Clock, W: Write> StopwatchApp<C, W> {
    fn new(
        tt: C,
        out: W,
        settings: Settings,
        alert_config: AlertConfig,
        pump_conn: Option<Sender<Scalar>>,
    ) -> Self {
        Self {
            tt,
            out,
            settings,
            alert_config,
            stopwatch: StopwatchState::new(),
            pump_conn,
            pump_running: false,
            title: None,
            status: None,
            notice: None,
            help_visible: false,
            confirm_exit: false,
            quit: false,
        }
    }

    fn now_ms(&self) -> u64 {
        self.tt.now_ms()
    }

    fn redraw(&mut self) {
        let result = if self.help_visible {
            ui::draw_help(&mut self.out, HELP_TEXT)
        } else if let Some(notice) = &self.notice {
            ui::draw_notice(&mut self.out, notice)
        } else if self.confirm_exit {
            ui::draw_confirm_exit(&mut self.out)
        } else {
            let now = self.now_ms();
            ui::draw_stopwatch(
                &mut self.out,
                &self.stopwatch,
                now,
                self.settings.laps_shown,
                self.status.as_deref(),
            )
        };
        if let Err(e) = result {
            log::error!("redraw failed: {}", e);
        }
    }

    fn update_title(&mut self) {
        if !self.settings.set_title {
            return;
        }
        let now = self.now_ms();
        let title = ui::window_title(
            self.stopwatch.state(),
            self.stopwatch.elapsed_ms(now),
            &self.settings.original_title,
        );
        if self.title.as_deref() == Some(title.as_str()) {
            return;
        }
        if let Err(e) = ui::set_title(&mut self.out, &title) {
            log::error!("can't set title: {}", e);
        }
        self.title = Some(title);
    }

    fn start_pump(&mut self, interval_ms: u64) {
        if !self.pump_running {
            self.pump_running = true;
            if let Some(conn) = &self.pump_conn {
                conn.send(Scalar::new(PumpOp::Start, interval_ms as usize)).ok();
            }
        }
    }

    fn stop_pump(&mut self) {
        if self.pump_running {
            self.pump_running = false;
            if let Some(conn) = &self.pump_conn {
                conn.send(Scalar::new(PumpOp::Stop, 0)).ok();
            }
        }
    }

    fn handle_pump(&mut self) {
        // A pump queued before a pause or reset lands here late.
        if self.stopwatch.state() != TimerState::Running {
            self.stop_pump();
            return;
        }
        let now = self.now_ms();
        self.stopwatch.timer.tick(now);
        self.update_title();
        self.redraw();
    }

    fn handle_key(&mut self, key: char) {
        // Overlays swallow the key that dismisses them
        if self.help_visible {
            self.help_visible = false;
            self.redraw();
            return;
        }
        if self.notice.is_some() {
            self.notice = None;
            self.redraw();
            return;
        }
        if self.confirm_exit {
            match key.to_ascii_lowercase() {
                'y' => {
                    let now = self.now_ms();
                    self.stopwatch.pause(now);
                    self.stop_pump();
                    self.confirm_exit = false;
                    self.quit = true;
                }
                _ => {
                    self.confirm_exit = false;
                    self.redraw();
                }
            }
            return;
        }

        match Action::from_key(key) {
            Some(action) => self.dispatch(action),
            None => log::debug!("unbound key {:?}", key),
        }
    }

    fn dispatch(&mut self, action: Action) {
        log::debug!("dispatch {:?}", action);
        self.status = None;
        let now = self.now_ms();

        match action {
            Action::Toggle => match self.stopwatch.toggle(now) {
                TimerState::Running => self.start_pump(self.settings.tick_ms),
                _ => self.stop_pump(),
            },
            Action::Start => {
                if self.stopwatch.start(now) {
                    self.start_pump(self.settings.tick_ms);
                }
            }
            Action::Pause => {
                if self.stopwatch.pause(now) {
                    self.stop_pump();
                }
            }
            Action::Reset => {
                self.stop_pump();
                self.stopwatch.reset();
            }
            Action::Lap => {
                if let Some(lap) = self.stopwatch.record_lap(now) {
                    log::debug!("lap {} recorded: {:?}", self.stopwatch.laps.len(), lap);
                }
            }
            Action::Export => self.export_laps(),
            Action::Help => self.help_visible = true,
            Action::Quit => {
                if self.stopwatch.state() == TimerState::Running {
                    self.confirm_exit = true;
                } else {
                    self.quit = true;
                    return;
                }
            }
        }

        self.update_title();
        self.redraw();
    }

    fn export_laps(&mut self) {
        match export::export_laps(&self.stopwatch.laps, &self.settings.export_dir) {
            Ok(path) => {
                self.status = Some(format!(
                    "Exported {} laps to {}",
                    self.stopwatch.laps.len(),
                    path.display()
                ));
            }
            Err(e @ ExportError::NoLaps) => {
                fire_alert(&self.alert_config, &mut self.out, &mut self.notice, &e.to_string());
            }
            Err(e) => {
                log::error!("export failed: {:?}", e);
                let message = format!("Export failed: {}", e);
                fire_alert(&self.alert_config, &mut self.out, &mut self.notice, &message);
            }
        }
    }

    fn shutdown(&mut self) {
        self.stop_pump();
        if let Some(conn) = &self.pump_conn {
            conn.send(Scalar::new(PumpOp::Quit, 0)).ok();
        }
        if self.settings.set_title {
            ui::set_title(&mut self.out, &self.settings.original_title).ok();
        }
        writeln!(self.out).ok();
        self.out.flush().ok();
    }
}

fn pump_thread(control: Receiver<Scalar>, main_conn: Sender<Scalar>) {
    let mut interval = Duration::from_millis(10);
    let mut running = false;

    loop {
        // Block-wait when stopped, tick on timeout when running
        let envelope = if running {
            match control.recv_timeout(interval) {
                Ok(msg) => Some(msg),
                Err(RecvTimeoutError::Timeout) => {
                    if main_conn.send(Scalar::new(AppOp::Pump, 0)).is_err() {
                        break;
                    }
                    None
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match control.recv() {
                Ok(msg) => Some(msg),
                Err(_) => break,
            }
        };

        if let Some(msg) = envelope {
            match FromPrimitive::from_usize(msg.id) {
                Some(PumpOp::Start) => {
                    interval = Duration::from_millis(msg.arg1.max(1) as u64);
                    running = true;
                }
                Some(PumpOp::Stop) => running = false,
                Some(PumpOp::Quit) => break,
                None => log::error!("unknown pump opcode: {:?}", msg),
            }
        }
    }
    log::debug!("pump thread exiting");
}

fn input_thread(main_conn: Sender<Scalar>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("can't read input: {}", e);
                break;
            }
        };
        // A bare Enter is a key of its own
        let keys: Vec<char> = if line.trim().is_empty() {
            vec!['\n']
        } else {
            line.chars().filter(|c| !c.is_whitespace()).collect()
        };
        for key in keys {
            if main_conn.send(Scalar::new(AppOp::Rawkeys, key as usize)).is_err() {
                return;
            }
        }
    }
    main_conn.send(Scalar::new(AppOp::Quit, 0)).ok();
}

fn main() {
    let args = Args::parse();
    env_logger::builder()
        .filter_level(args.log_level())
        .parse_env("STOPWATCH_LOG")
        .init();
    log::info!("Stopwatch PID is {}", std::process::id());

    let settings = args.settings();
    if !settings.export_dir.is_dir() {
        log::error!("Export directory does not exist: {}", settings.export_dir.display());
        exit(1);
    }

    let (main_conn, inbox) = mpsc::channel::<Scalar>();
    let (pump_conn, pump_inbox) = mpsc::channel::<Scalar>();

    let pump_main = main_conn.clone();
    let pump = thread::spawn(move || pump_thread(pump_inbox, pump_main));
    let input_main = main_conn.clone();
    thread::spawn(move || input_thread(input_main));

    let mut app = StopwatchApp::new(
        Ticktimer::new(),
        io::stdout(),
        settings,
        args.alert_config(),
        Some(pump_conn),
    );
    app.update_title();
    main_conn.send(Scalar::new(AppOp::Redraw, 0)).ok();

    while let Ok(msg) = inbox.recv() {
        match FromPrimitive::from_usize(msg.id) {
            Some(AppOp::Redraw) => app.redraw(),
            Some(AppOp::Rawkeys) => match char::from_u32(msg.arg1 as u32) {
                Some(key) => app.handle_key(key),
                None => log::error!("bad key code: {}", msg.arg1),
            },
            Some(AppOp::Pump) => app.handle_pump(),
            Some(AppOp::Quit) => break,
            None => log::error!("unknown opcode: {:?}", msg),
        }
        if app.quit {
            break;
        }
    }

    // Clean up
    app.shutdown();
    pump.join().ok();
    log::info!("Stopwatch exiting");
}
