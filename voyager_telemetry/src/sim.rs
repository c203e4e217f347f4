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

use std::{sync::Arc, time::{Duration, Instant}};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;
use voyager_common::{datetime::EpochMillis, geo::{meters_per_degree_lon, METERS_PER_DEGREE}};
use crate::{control::{ControlInputs, ControlInputChannel}, TelemetryConfig, TelemetrySample, TelemetryStore, STATUS_SIMULATION};

pub const GRAVITY: f64 = 9.8; // m/s² per commanded g

/// horizontal velocity decay applied once per tick (not time scaled)
pub const HORIZONTAL_DAMPING: f64 = 0.99;

/// ticks longer than this (scheduler pauses) are clamped to the nominal tick
pub const MAX_TICK_DT: f64 = 0.1;
pub const CLAMPED_TICK_DT: f64 = 0.05;

/// the kinematic state the simulation worker integrates. Owned exclusively by the active
/// worker - it is created at the configured origin on session start and never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64, // meters above ground
    pub vx: f64,  // east, m/s
    pub vy: f64,  // north, m/s
    pub vz: f64,  // up, m/s
}

impl SimState {
    pub fn at_origin(config: &TelemetryConfig) -> Self {
        SimState {
            lat: config.origin_lat,
            lon: config.origin_lon,
            alt: 0.0,
            vx: 0.0, vy: 0.0, vz: 0.0,
        }
    }

    /// advance the state by one tick of `dt` seconds under the given control inputs:
    /// commanded acceleration integrates into velocity, horizontal velocity decays per
    /// tick, the vehicle free-falls while airborne without upward thrust, and ground
    /// contact zeroes all motion. Horizontal velocity drifts the position through an
    /// equirectangular approximation (longitude scaled at the already-updated latitude).
    pub fn step(&mut self, inputs: &ControlInputs, dt: f64) {
        let dt = if dt > MAX_TICK_DT { CLAMPED_TICK_DT } else { dt };

        self.vx += inputs.ax * GRAVITY * dt;
        self.vy += inputs.ay * GRAVITY * dt;
        self.vz += inputs.az * GRAVITY * dt;

        self.vx *= HORIZONTAL_DAMPING;
        self.vy *= HORIZONTAL_DAMPING;

        if inputs.az <= 0.0 && self.alt > 0.0 {
            self.vz -= GRAVITY * dt;
        }

        self.alt += self.vz * dt;
        if self.alt < 0.0 { // ground contact
            self.alt = 0.0;
            self.vx = 0.0;
            self.vy = 0.0;
            self.vz = 0.0;
        }

        self.lat += (self.vy * dt) / METERS_PER_DEGREE;
        self.lon += (self.vx * dt) / meters_per_degree_lon(self.lat);
    }

    /// a telemetry sample carrying the commanded attitude/acceleration and the computed position
    pub fn sample(&self, inputs: &ControlInputs, time: EpochMillis) -> TelemetrySample {
        TelemetrySample {
            time,
            ax: inputs.ax, ay: inputs.ay, az: inputs.az,
            pitch: inputs.pitch, roll: inputs.roll, yaw: inputs.yaw,
            height: self.alt,
            lat: self.lat, lon: self.lon,
        }
    }
}

/// fixed-cadence simulation worker (~20 Hz for the default 50ms tick). The sleep does not
/// account for tick compute cost, so the effective rate drifts under load - acceptable for
/// a synthetic feed. Terminates on cancellation, checked at loop entry; writes of a
/// superseded instance are additionally dropped by the store's generation guard.
pub struct SimulationWorker {
    store: Arc<TelemetryStore>,
    inputs: ControlInputChannel,
    cancel: CancellationToken,
    generation: u64,
    tick: Duration,
    state: SimState,
}

impl SimulationWorker {
    pub fn new(config: &TelemetryConfig, store: Arc<TelemetryStore>, inputs: ControlInputChannel,
               cancel: CancellationToken, generation: u64) -> Self {
        SimulationWorker {
            store, inputs, cancel, generation,
            tick: config.sim_tick,
            state: SimState::at_origin(config),
        }
    }

    pub fn spawn(config: Arc<TelemetryConfig>, store: Arc<TelemetryStore>, inputs: ControlInputChannel,
                 cancel: CancellationToken, generation: u64) -> JoinHandle<()> {
        let worker = SimulationWorker::new(&config, store, inputs, cancel, generation);
        tokio::spawn(worker.run())
    }

    async fn run(mut self) {
        info!("simulation started (session generation {})", self.generation);
        self.store.set_status(self.generation, STATUS_SIMULATION);

        let mut last = Instant::now();
        while !self.cancel.is_cancelled() {
            let now = Instant::now();
            let dt = (now - last).as_secs_f64();
            last = now;

            let inputs = self.inputs.get();
            self.state.step(&inputs, dt);

            let sample = self.state.sample(&inputs, EpochMillis::now());
            if !self.store.append_sample(self.generation, sample) {
                break; // superseded
            }
            tokio::time::sleep(self.tick).await;
        }
        info!("simulation terminated (session generation {})", self.generation);
    }
}
