use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::rc::Rc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::warn;
use uom::si::f64::Time;
use uom::si::time::{microsecond, second};

use crate::constants::climber::DATA_LOG_FLUSH_SAMPLES;
use crate::hardware::Actuator;
use crate::subsystems::climber::ClimberAxes;

/// A named log channel that takes timestamped scalar samples.
pub trait TelemetrySink {
    fn append(&mut self, value: f64);
}

pub const CURRENT_CHANNELS: [&str; 4] = [
    "climberRotateLeftCurrent",
    "climberRotateRightCurrent",
    "climberExtendLeftCurrent",
    "climberExtendRightCurrent",
];

/// Written once per open, value is wall-clock seconds since the unix epoch.
pub const SESSION_ENTRY: &str = "climberLogStart";

pub const VELOCITY_CHANNELS: [&str; 4] = [
    "climberRotateLeftVelocity",
    "climberRotateRightVelocity",
    "climberExtendLeftVelocity",
    "climberExtendRightVelocity",
];

#[derive(Serialize)]
struct Sample<'a> {
    timestamp_us: u64,
    entry: &'a str,
    value: f64,
}

/// Append-only sample log, one JSON object per line.
///
/// Opening an existing file keeps its contents, so a reboot mid-match doesn't
/// lose the samples from before it. Each open starts with a [`SESSION_ENTRY`] line.
pub struct DataLog {
    writer: Box<dyn Write>,
    start: Instant,
    flush_every: usize,
    unflushed: usize,
}

impl DataLog {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut log = Self::from_writer(BufWriter::new(file));

        let wall_clock = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        log.append(SESSION_ENTRY, wall_clock);
        log.flush();

        Ok(log)
    }

    pub fn from_writer(writer: impl Write + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            start: Instant::now(),
            flush_every: DATA_LOG_FLUSH_SAMPLES,
            unflushed: 0,
        }
    }

    /// Flush after this many samples instead of waiting for the buffer to fill.
    pub fn flush_every(mut self, samples: usize) -> Self {
        self.flush_every = samples.max(1);
        self
    }

    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    fn timestamp(&self) -> Time {
        Time::new::<second>(self.start.elapsed().as_secs_f64())
    }

    pub fn append(&mut self, entry: &str, value: f64) {
        let sample = Sample {
            timestamp_us: self.timestamp().get::<microsecond>() as u64,
            entry,
            value,
        };

        let written = serde_json::to_writer(&mut self.writer, &sample)
            .map_err(io::Error::from)
            .and_then(|_| self.writer.write_all(b"\n"));

        if let Err(e) = written {
            warn!("Dropped {entry} sample: {e}");
        }

        self.unflushed += 1;
        if self.unflushed >= self.flush_every {
            self.flush();
        }
    }

    pub fn flush(&mut self) {
        self.unflushed = 0;
        if let Err(e) = self.writer.flush() {
            warn!("Failed to flush data log: {e}");
        }
    }
}

#[derive(Clone)]
pub struct LogEntry {
    log: Rc<RefCell<DataLog>>,
    name: String,
}

impl LogEntry {
    pub fn new(log: &Rc<RefCell<DataLog>>, name: impl Into<String>) -> Self {
        Self {
            log: Rc::clone(log),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TelemetrySink for LogEntry {
    fn append(&mut self, value: f64) {
        match self.log.try_borrow_mut() {
            Ok(mut log) => log.append(&self.name, value),
            Err(_) => warn!("Dropped {} sample: data log busy", self.name),
        }
    }
}

/// Per-axis current and velocity channels.
pub struct ClimberTelemetry<S> {
    pub current: ClimberAxes<S>,
    pub velocity: ClimberAxes<S>,
}

impl ClimberTelemetry<LogEntry> {
    pub fn data_log(log: &Rc<RefCell<DataLog>>) -> Self {
        let [rl_current, rr_current, el_current, er_current] =
            CURRENT_CHANNELS.map(|name| LogEntry::new(log, name));
        let [rl_velocity, rr_velocity, el_velocity, er_velocity] =
            VELOCITY_CHANNELS.map(|name| LogEntry::new(log, name));

        Self {
            current: ClimberAxes {
                rotate_left: rl_current,
                rotate_right: rr_current,
                extend_left: el_current,
                extend_right: er_current,
            },
            velocity: ClimberAxes {
                rotate_left: rl_velocity,
                rotate_right: rr_velocity,
                extend_left: el_velocity,
                extend_right: er_velocity,
            },
        }
    }
}

impl<S: TelemetrySink> ClimberTelemetry<S> {
    /// Samples every axis. Runs every cycle, enabled or not.
    pub fn capture<A: Actuator>(&mut self, axes: &ClimberAxes<A>) {
        for (sink, axis) in self.current.iter_mut().zip(axes.iter()) {
            sink.append(axis.get_current());
        }

        for (sink, axis) in self.velocity.iter_mut().zip(axes.iter()) {
            sink.append(axis.get_velocity());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::mock::{FakeActuator, RecordingSink};
    use serde_json::Value;

    #[test]
    fn capture_appends_every_channel() {
        let sink = RecordingSink::default();
        let mut telemetry = ClimberTelemetry {
            current: ClimberAxes::splat(sink.clone()),
            velocity: ClimberAxes::splat(sink.clone()),
        };

        let axes = ClimberAxes {
            rotate_left: FakeActuator::with_readings(0., 1., 10.),
            rotate_right: FakeActuator::with_readings(0., 2., 20.),
            extend_left: FakeActuator::with_readings(0., 3., 30.),
            extend_right: FakeActuator::with_readings(0., 4., 40.),
        };

        telemetry.capture(&axes);

        assert_eq!(
            *sink.samples.borrow(),
            vec![10., 20., 30., 40., 1., 2., 3., 4.]
        );
    }

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn data_log_writes_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climber_log.jsonl");

        let log = DataLog::open(&path).unwrap().shared();
        let mut telemetry = ClimberTelemetry::data_log(&log);
        assert_eq!(telemetry.velocity.extend_right.name(), "climberExtendRightVelocity");

        let axes = ClimberAxes::splat(FakeActuator::with_readings(0., 5., 12.5));
        telemetry.capture(&axes);
        telemetry.capture(&axes);
        log.borrow_mut().flush();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[0]["entry"], SESSION_ENTRY);
        assert!(lines[0]["value"].as_f64().unwrap() > 0.);
        assert_eq!(lines[1]["entry"], "climberRotateLeftCurrent");
        assert_eq!(lines[1]["value"], 12.5);
        assert_eq!(lines[8]["entry"], "climberExtendRightVelocity");
        assert_eq!(lines[8]["value"], 5.);

        let first = lines[1]["timestamp_us"].as_u64().unwrap();
        let last = lines[16]["timestamp_us"].as_u64().unwrap();
        assert!(last >= first);
    }

    #[test]
    fn reopening_keeps_previous_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climber_log.jsonl");

        let mut log = DataLog::open(&path).unwrap();
        log.append("climberRotateLeftCurrent", 3.);
        log.flush();
        drop(log);

        let mut log = DataLog::open(&path).unwrap();
        log.append("climberRotateLeftCurrent", 4.);
        log.flush();

        let lines = read_lines(&path);
        let entries: Vec<&str> = lines.iter().map(|l| l["entry"].as_str().unwrap()).collect();
        assert_eq!(
            entries,
            vec![
                SESSION_ENTRY,
                "climberRotateLeftCurrent",
                SESSION_ENTRY,
                "climberRotateLeftCurrent",
            ]
        );
        assert_eq!(lines[1]["value"], 3.);
        assert_eq!(lines[3]["value"], 4.);
    }

    #[test]
    fn flushes_without_being_asked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climber_log.jsonl");

        let log = DataLog::open(&path).unwrap().flush_every(8).shared();
        let mut telemetry = ClimberTelemetry::data_log(&log);
        telemetry.capture(&ClimberAxes::splat(FakeActuator::with_readings(0., 1., 2.)));

        // still open, never flushed by hand
        assert_eq!(read_lines(&path).len(), 9);
    }

    #[test]
    fn busy_log_drops_sample() {
        let log = DataLog::from_writer(io::sink()).shared();
        let mut entry = LogEntry::new(&log, "climberRotateLeftCurrent");

        let held = log.borrow_mut();
        entry.append(1.);
        assert_eq!(held.unflushed, 0);
    }
}
