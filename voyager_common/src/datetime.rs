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

use std::fmt;
use std::time::Duration;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Serialize, Deserialize};

/// millisecond-resolution wall clock timestamp. All telemetry records are stamped with this
/// (the hardware link does not carry timestamps so the ground station provides them)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpochMillis(i64);

impl EpochMillis {
    pub fn now() -> Self { EpochMillis(Utc::now().timestamp_millis()) }

    pub fn new(millis: i64) -> Self { EpochMillis(millis) }

    pub fn from_secs(secs: i64) -> Self { EpochMillis(secs * 1000) }

    pub fn millis(&self) -> i64 { self.0 }

    /// wall clock formatted as `HH:MM:SS.mmm` (UTC) - the row format of exported flight logs
    pub fn hh_mm_ss_millis(&self) -> String {
        DateTime::<Utc>::from(*self).format("%H:%M:%S%.3f").to_string()
    }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", DateTime::<Utc>::from(*self))
    }
}

impl<Tz> From<DateTime<Tz>> for EpochMillis where Tz: TimeZone {
    fn from(date: DateTime<Tz>) -> Self { EpochMillis(date.timestamp_millis()) }
}

impl From<EpochMillis> for DateTime<Utc> {
    fn from(ts: EpochMillis) -> Self {
        DateTime::<Utc>::from_timestamp_millis(ts.0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

#[inline] pub fn millis(n: u64) -> Duration { Duration::from_millis(n) }
#[inline] pub fn secs(n: u64) -> Duration { Duration::from_secs(n) }

#[inline]
pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}
