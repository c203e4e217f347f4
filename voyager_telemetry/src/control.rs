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
use crate::errors::{Result, VoyagerTelemetryError};

/// acceleration commands are multiples of g
pub const MAX_ACCEL_CMD: f64 = 10.0;
/// pitch/roll commands are degrees
pub const MAX_PITCH_ROLL_CMD: f64 = 180.0;
/// yaw commands are degrees, either winding direction
pub const MAX_YAW_CMD: f64 = 360.0;

/// the commanded attitude/acceleration the simulator integrates every tick
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlInputs {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

/// a partial control update from the external control surface - only supplied fields are merged
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct ControlInputUpdate {
    pub ax: Option<f64>,
    pub ay: Option<f64>,
    pub az: Option<f64>,
    pub pitch: Option<f64>,
    pub roll: Option<f64>,
    pub yaw: Option<f64>,
}

impl ControlInputUpdate {
    // every supplied field has to pass before anything is merged
    fn validate(&self) -> Result<()> {
        check_field("ax", self.ax, MAX_ACCEL_CMD)?;
        check_field("ay", self.ay, MAX_ACCEL_CMD)?;
        check_field("az", self.az, MAX_ACCEL_CMD)?;
        check_field("pitch", self.pitch, MAX_PITCH_ROLL_CMD)?;
        check_field("roll", self.roll, MAX_PITCH_ROLL_CMD)?;
        check_field("yaw", self.yaw, MAX_YAW_CMD)?;
        Ok(())
    }
}

fn check_field(field: &'static str, value: Option<f64>, limit: f64) -> Result<()> {
    if let Some(value) = value {
        if !value.is_finite() || value.abs() > limit {
            return Err(VoyagerTelemetryError::InvalidControlInput { field, value });
        }
    }
    Ok(())
}

/// shared handle holding the latest control values. Written by the control surface, read by
/// the simulation worker every tick. A rejected update merges nothing.
#[derive(Clone)]
pub struct ControlInputChannel {
    inputs: Arc<Mutex<ControlInputs>>,
}

impl ControlInputChannel {
    pub fn new() -> Self {
        ControlInputChannel { inputs: Arc::new(Mutex::new(ControlInputs::default())) }
    }

    pub fn update(&self, update: ControlInputUpdate) -> Result<()> {
        update.validate()?;

        let mut inputs = self.inputs.lock().unwrap();
        if let Some(v) = update.ax { inputs.ax = v }
        if let Some(v) = update.ay { inputs.ay = v }
        if let Some(v) = update.az { inputs.az = v }
        if let Some(v) = update.pitch { inputs.pitch = v }
        if let Some(v) = update.roll { inputs.roll = v }
        if let Some(v) = update.yaw { inputs.yaw = v }
        Ok(())
    }

    pub fn get(&self) -> ControlInputs {
        *self.inputs.lock().unwrap()
    }
}

impl Default for ControlInputChannel {
    fn default() -> Self { Self::new() }
}
