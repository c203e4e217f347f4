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

//! ground station telemetry engine for the VoyagerX vehicle: ingests real telemetry from the
//! serial hardware link or synthesizes it from the onboard kinematics model, and maintains the
//! current-state snapshot plus the per-session flight log read by reporting and export

use std::{
    fmt, fs,
    path::Path,
    str::FromStr,
    sync::{Mutex, atomic::{AtomicU64, Ordering}},
    time::Duration,
};
use serde::{Serialize, Deserialize};
use voyager_common::datetime::{EpochMillis, millis};

pub mod control;
pub mod engine;
pub mod export;
pub mod serial;
pub mod sim;

pub mod errors;
use errors::{Result, VoyagerTelemetryError};

pub const STATUS_STANDBY: &str = "STANDBY";
pub const STATUS_LIVE: &str = "LIVE FEED ACTIVE";
pub const STATUS_DISCONNECTED: &str = "HARDWARE DISCONNECTED";
pub const STATUS_SIMULATION: &str = "SIMULATION ACTIVE";

/// one telemetry record, either parsed from the hardware link or synthesized by the simulator.
/// Attitude angles are degrees, height is meters above ground, position is WGS84 degrees.
/// Immutable once constructed - workers stamp it and hand it to the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TelemetrySample {
    pub time: EpochMillis,
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
    pub height: f64,
    pub lat: f64,
    #[serde(rename = "long")]
    pub lon: f64,
}

impl TelemetrySample {
    /// the all-zero sample at the configured origin, used to reset the snapshot at session start
    pub fn at_origin(config: &TelemetryConfig, time: EpochMillis) -> Self {
        TelemetrySample {
            time,
            ax: 0.0, ay: 0.0, az: 0.0,
            pitch: 0.0, roll: 0.0, yaw: 0.0,
            height: 0.0,
            lat: config.origin_lat,
            lon: config.origin_lon,
        }
    }
}

/// which worker, if any, is the intended writer of the telemetry store
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SystemMode {
    Idle,
    Live,
    Simulation,
}

impl FromStr for SystemMode {
    type Err = VoyagerTelemetryError;

    // mode tokens are case-insensitive; anything but the three known tokens is rejected
    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "IDLE" => Ok(SystemMode::Idle),
            "LIVE" => Ok(SystemMode::Live),
            "SIMULATION" => Ok(SystemMode::Simulation),
            _ => Err(VoyagerTelemetryError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for SystemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemMode::Idle => write!(f, "IDLE"),
            SystemMode::Live => write!(f, "LIVE"),
            SystemMode::Simulation => write!(f, "SIMULATION"),
        }
    }
}

/// the snapshot read by reporting: most recent sample plus the active worker's status label.
/// Serializes to the flat object shape the reporting layer consumes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CurrentTelemetry {
    #[serde(flatten)]
    pub sample: TelemetrySample,
    pub status: String,
}

/// the shared telemetry sink: current-state snapshot plus the append-only session flight log.
/// All access is serialized through one mutex so snapshot reads are torn-free while a worker
/// is mid-update. Writes are stamped with the session generation they were spawned for and
/// are dropped once a newer session has started, so a not-yet-terminated worker of a previous
/// session cannot interleave with the current writer.
pub struct TelemetryStore {
    generation: AtomicU64,
    rejected: AtomicU64, // malformed ingestion records dropped since process start
    state: Mutex<StoreState>,
}

struct StoreState {
    current: CurrentTelemetry,
    log: Vec<TelemetrySample>,
}

impl TelemetryStore {
    pub fn new(initial: TelemetrySample) -> Self {
        TelemetryStore {
            generation: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            state: Mutex::new(StoreState {
                current: CurrentTelemetry { sample: initial, status: STATUS_STANDBY.to_string() },
                log: Vec::new(),
            }),
        }
    }

    /// start a new session generation: clear the flight log and reset the snapshot.
    /// Returns the new generation all writes of the session's worker have to carry.
    pub fn begin_session(&self, initial: TelemetrySample, status: &str) -> u64 {
        let mut state = self.state.lock().unwrap();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        state.current = CurrentTelemetry { sample: initial, status: status.to_string() };
        state.log = Vec::new();
        generation
    }

    /// publish a sample as current telemetry (status preserved) and append it to the flight
    /// log, both under the same lock. Returns false if `generation` is stale, in which case
    /// nothing is changed and the caller should wind down.
    pub fn append_sample(&self, generation: u64, sample: TelemetrySample) -> bool {
        let mut state = self.state.lock().unwrap();
        if generation != self.generation.load(Ordering::SeqCst) {
            return false;
        }
        state.current.sample = sample.clone();
        state.log.push(sample);
        true
    }

    /// update the status label of the current snapshot, same staleness guard as appends
    pub fn set_status(&self, generation: u64, status: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        if generation != self.generation.load(Ordering::SeqCst) {
            return false;
        }
        state.current.status = status.to_string();
        true
    }

    /// consistent copy of the current snapshot - never blocks on worker cadence
    pub fn snapshot(&self) -> CurrentTelemetry {
        self.state.lock().unwrap().current.clone()
    }

    /// point-in-time copy of the session flight log, for export
    pub fn log_snapshot(&self) -> Vec<TelemetrySample> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn log_len(&self) -> usize {
        self.state.lock().unwrap().log.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn note_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn rejected_count(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}

/// static engine configuration, loaded from a RON file
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TelemetryConfig {
    pub serial_port: String, // device path of the hardware link
    pub baud_rate: u32,
    pub poll_interval: Duration, // serial ingestion poll cadence
    pub sim_tick: Duration,      // simulation integrator cadence
    pub origin_lat: f64,         // session start position
    pub origin_lon: f64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        TelemetryConfig {
            serial_port: "/dev/ttyUSB0".to_string(),
            baud_rate: 115200,
            poll_interval: millis(5),
            sim_tick: millis(50),
            origin_lat: 12.9716,
            origin_lon: 77.5946,
        }
    }
}

pub fn load_config_path<C, P>(path: P) -> Result<C>
    where C: for<'a> Deserialize<'a>, P: AsRef<Path>
{
    let data = fs::read(path.as_ref())?;
    ron::de::from_bytes(data.as_slice())
        .map_err(|e| VoyagerTelemetryError::ConfigError(format!("{} in {}", e, path.as_ref().display())))
}
