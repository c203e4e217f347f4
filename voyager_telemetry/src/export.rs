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

use crate::TelemetrySample;
use crate::errors::{Result, VoyagerTelemetryError};

/// attachment name and content type the serving layer delivers exports under
pub const EXPORT_FILE_NAME: &str = "voyager_log.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

/// fixed column order of exported flight logs (consumed by the offline trajectory tooling)
pub const EXPORT_HEADER: [&str; 10] = [
    "Timestamp", "Lat", "Long", "AX", "AY", "AZ", "Height", "Yaw", "Roll", "Pitch",
];

/// serialize a flight log snapshot to CSV. Fail-fast: a row with a non-representable
/// numeric value fails the whole export rather than producing a partial table.
pub fn export_log(log: &[TelemetrySample]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;

    for (row, sample) in log.iter().enumerate() {
        check_row(row, sample)?;
        writer.write_record(&[
            sample.time.hh_mm_ss_millis(),
            sample.lat.to_string(),
            sample.lon.to_string(),
            sample.ax.to_string(),
            sample.ay.to_string(),
            sample.az.to_string(),
            sample.height.to_string(),
            sample.yaw.to_string(),
            sample.roll.to_string(),
            sample.pitch.to_string(),
        ])?;
    }

    writer.into_inner().map_err(|e| VoyagerTelemetryError::IOError(e.into_error()))
}

fn check_row(row: usize, sample: &TelemetrySample) -> Result<()> {
    let fields = [
        ("Lat", sample.lat), ("Long", sample.lon),
        ("AX", sample.ax), ("AY", sample.ay), ("AZ", sample.az),
        ("Height", sample.height),
        ("Yaw", sample.yaw), ("Roll", sample.roll), ("Pitch", sample.pitch),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(VoyagerTelemetryError::ExportSchemaMismatch(
                format!("row {row}: field {name} is not a finite number ({value})")));
        }
    }
    Ok(())
}
