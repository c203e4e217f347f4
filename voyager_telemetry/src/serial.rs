/*
 * Copyright © 2026, the VoyagerX ground segment project. All rights reserved.
 *
 * The “VoyagerX” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::{io::Read, sync::Arc, thread, time::Duration};
use memchr::memchr;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use voyager_common::datetime::EpochMillis;
use crate::{TelemetryConfig, TelemetrySample, TelemetryStore, STATUS_DISCONNECTED, STATUS_LIVE};
use crate::errors::{parse_error, Result};

/// minimum number of comma separated fields per record line
pub const MIN_RECORD_FIELDS: usize = 9;

const READ_CHUNK_SIZE: usize = 512;

/// the byte source the ingestion worker polls. The production implementation is the serial
/// port; tests feed canned bytes through the same interface.
pub trait TelemetryLink: Send {
    fn bytes_available(&mut self) -> Result<usize>;
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// the configured hardware link at a fixed baud rate
pub struct SerialLink {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialLink {
    pub fn open(config: &TelemetryConfig) -> Result<Self> {
        let port = serialport::new(config.serial_port.as_str(), config.baud_rate)
            .timeout(Duration::from_millis(100))
            .open()?;
        info!("hardware link connected on {}", config.serial_port);
        Ok(SerialLink { port })
    }
}

impl TelemetryLink for SerialLink {
    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

/// incremental newline framer for the link byte stream. Records can arrive split across
/// reads so we buffer until a terminator shows up. CR before the terminator is dropped,
/// non-UTF8 bytes are replaced.
pub struct LineFramer {
    buf: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        LineFramer { buf: Vec::with_capacity(READ_CHUNK_SIZE) }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn next_line(&mut self) -> Option<String> {
        let eol = memchr(b'\n', &self.buf)?;
        let mut line: Vec<u8> = self.buf.drain(..=eol).collect();
        line.pop(); // the terminator
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}

impl Default for LineFramer {
    fn default() -> Self { Self::new() }
}

/// one parsed record of the link protocol, not yet timestamped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRecord {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
    pub height: f64,
    pub lat: f64,
    pub lon: f64,
}

impl RawRecord {
    pub fn into_sample(self, time: EpochMillis) -> TelemetrySample {
        TelemetrySample {
            time,
            ax: self.ax, ay: self.ay, az: self.az,
            pitch: self.pitch, roll: self.roll, yaw: self.yaw,
            height: self.height,
            lat: self.lat, lon: self.lon,
        }
    }
}

/// link protocol: one record per line, comma separated ASCII floats, at least 9 fields
/// in fixed order
///
///   0: ax      x acceleration (g)
///   1: ay      y acceleration (g)
///   2: az      z acceleration (g)
///   3: pitch   degrees
///   4: roll    degrees
///   5: yaw     degrees
///   6: height  meters above ground
///   7: lat     WGS84 degrees
///   8: long    WGS84 degrees
///
/// trailing extra fields are ignored
pub fn parse_record(line: &str) -> Result<RawRecord> {
    let mut fields = line.split(',');

    let mut next_field = |name: &'static str| -> Result<f64> {
        let raw = fields.next()
            .ok_or_else(|| parse_error!("missing field '{}' in record: {}", name, line))?;
        raw.trim().parse::<f64>()
            .map_err(|_| parse_error!("non-numeric field '{}' in record: {}", name, line))
    };

    Ok(RawRecord {
        ax: next_field("ax")?,
        ay: next_field("ay")?,
        az: next_field("az")?,
        pitch: next_field("pitch")?,
        roll: next_field("roll")?,
        yaw: next_field("yaw")?,
        height: next_field("height")?,
        lat: next_field("lat")?,
        lon: next_field("long")?,
    })
}

/// the live ingestion worker: polls the hardware link, parses record lines and publishes
/// them to the store under its session generation. Runs on a blocking thread since the
/// serial API is synchronous; supersession is observed via the cancellation token at loop
/// entry and via rejected store writes.
pub struct SerialIngestionWorker {
    store: Arc<TelemetryStore>,
    cancel: CancellationToken,
    generation: u64,
    poll_interval: Duration,
}

impl SerialIngestionWorker {
    pub fn new(store: Arc<TelemetryStore>, cancel: CancellationToken, generation: u64, poll_interval: Duration) -> Self {
        SerialIngestionWorker { store, cancel, generation, poll_interval }
    }

    /// spawn the worker for the configured serial port. Link failures (open or read) are
    /// terminal for the session and surface as HARDWARE DISCONNECTED - there is no retry.
    pub fn spawn(config: Arc<TelemetryConfig>, store: Arc<TelemetryStore>, cancel: CancellationToken, generation: u64) -> JoinHandle<()> {
        let worker = SerialIngestionWorker::new(store.clone(), cancel, generation, config.poll_interval);

        tokio::task::spawn_blocking(move || {
            let res = SerialLink::open(&config).and_then(|mut link| worker.run(&mut link));
            if let Err(e) = res {
                store.set_status(generation, STATUS_DISCONNECTED);
                error!("live ingestion terminated: {e}");
            }
        })
    }

    pub fn run(&self, link: &mut dyn TelemetryLink) -> Result<()> {
        self.store.set_status(self.generation, STATUS_LIVE);

        let mut framer = LineFramer::new();
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        while !self.cancel.is_cancelled() {
            if link.bytes_available()? > 0 {
                let n = link.read_bytes(&mut chunk)?;
                framer.push(&chunk[..n]);
                while let Some(line) = framer.next_line() {
                    self.process_line(&line);
                }
            } else {
                thread::sleep(self.poll_interval);
            }
        }
        Ok(())
    }

    /// a malformed record is a counted soft failure - the loop keeps running and neither
    /// the snapshot nor the flight log change
    pub fn process_line(&self, line: &str) {
        match parse_record(line) {
            Ok(rec) => {
                let sample = rec.into_sample(EpochMillis::now());
                self.store.append_sample(self.generation, sample);
            }
            Err(e) => {
                self.store.note_rejected();
                warn!("dropped record: {e}");
            }
        }
    }
}
