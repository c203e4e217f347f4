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

use std::sync::{Arc, Mutex};
use serde::{Serialize, Deserialize};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;
use voyager_common::datetime::EpochMillis;
use crate::{
    control::{ControlInputChannel, ControlInputUpdate},
    serial::SerialIngestionWorker,
    sim::SimulationWorker,
    CurrentTelemetry, SystemMode, TelemetryConfig, TelemetrySample, TelemetryStore, STATUS_STANDBY,
};
use crate::errors::Result;

/// session start acknowledgement returned to the external controller
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StartAck {
    pub status: String,
    pub mode: SystemMode,
    pub generation: u64,
}

struct ActiveWorker {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

struct SessionState {
    mode: SystemMode,
    worker: Option<ActiveWorker>,
}

/// the application context owning the telemetry store, the control input channel and the
/// worker lifecycle. At most one session is active system-wide; starting a session
/// supersedes the previous worker without waiting for it - the superseded instance
/// observes its cancellation token at the next loop entry, and any write it still issues
/// carries a stale generation the store rejects.
pub struct TelemetryEngine {
    config: Arc<TelemetryConfig>,
    store: Arc<TelemetryStore>,
    inputs: ControlInputChannel,
    session: Mutex<SessionState>,
}

impl TelemetryEngine {
    pub fn new(config: TelemetryConfig) -> Self {
        let initial = TelemetrySample::at_origin(&config, EpochMillis::now());
        TelemetryEngine {
            config: Arc::new(config),
            store: Arc::new(TelemetryStore::new(initial)),
            inputs: ControlInputChannel::new(),
            session: Mutex::new(SessionState { mode: SystemMode::Idle, worker: None }),
        }
    }

    /// start a session in the given mode: reset the store, then start the matching worker.
    /// Unknown mode tokens are rejected and change nothing. Control inputs deliberately
    /// survive session boundaries.
    pub fn start_session(&self, token: &str) -> Result<StartAck> {
        let mode: SystemMode = token.parse()?;

        let mut session = self.session.lock().unwrap();
        if let Some(prev) = session.worker.take() {
            prev.cancel.cancel(); // signal supersession, do not wait
        }

        let initial = TelemetrySample::at_origin(&self.config, EpochMillis::now());
        let generation = self.store.begin_session(initial, STATUS_STANDBY);

        let worker = match mode {
            SystemMode::Live => {
                let cancel = CancellationToken::new();
                let task = SerialIngestionWorker::spawn(
                    self.config.clone(), self.store.clone(), cancel.clone(), generation);
                Some(ActiveWorker { cancel, task })
            }
            SystemMode::Simulation => {
                let cancel = CancellationToken::new();
                let task = SimulationWorker::spawn(
                    self.config.clone(), self.store.clone(), self.inputs.clone(), cancel.clone(), generation);
                Some(ActiveWorker { cancel, task })
            }
            SystemMode::Idle => None,
        };

        session.mode = mode;
        session.worker = worker;
        info!("session {generation} started in mode {mode}");

        Ok(StartAck { status: "STARTED".to_string(), mode, generation })
    }

    /// merge a partial control update (validated per field) into the inputs the simulator reads
    pub fn update_controls(&self, update: ControlInputUpdate) -> Result<()> {
        self.inputs.update(update)
    }

    pub fn snapshot(&self) -> CurrentTelemetry {
        self.store.snapshot()
    }

    /// the session flight log as a CSV table
    pub fn export_log(&self) -> Result<Vec<u8>> {
        crate::export::export_log(&self.store.log_snapshot())
    }

    pub fn mode(&self) -> SystemMode {
        self.session.lock().unwrap().mode
    }

    pub fn store(&self) -> &Arc<TelemetryStore> {
        &self.store
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    /// true if there is no active worker task (Idle, or the worker already exited)
    pub fn worker_finished(&self) -> bool {
        let session = self.session.lock().unwrap();
        session.worker.as_ref().map_or(true, |w| w.task.is_finished())
    }

    /// cancel the active worker (if any) without starting a new session
    pub fn stop(&self) {
        let mut session = self.session.lock().unwrap();
        if let Some(prev) = session.worker.take() {
            prev.cancel.cancel();
        }
        session.mode = SystemMode::Idle;
    }
}
