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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VoyagerTelemetryError>;

#[derive(Error, Debug)]
pub enum VoyagerTelemetryError {

    #[error("parse error {0}")]
    ParseError(String),

    #[error("hardware link unavailable {0}")]
    LinkUnavailable(String),

    #[error("unknown system mode '{0}'")]
    UnknownMode(String),

    #[error("invalid control input {field}={value}")]
    InvalidControlInput { field: &'static str, value: f64 },

    #[error("export schema mismatch {0}")]
    ExportSchemaMismatch(String),

    #[error("config error {0}")]
    ConfigError(String),

    #[error("IO error {0}")]
    IOError(#[from] std::io::Error),

    #[error("CSV error {0}")]
    CsvError(#[from] csv::Error),

    #[error("serial port error {0}")]
    SerialPortError(#[from] serialport::Error),
}

macro_rules! parse_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::VoyagerTelemetryError::ParseError( format!( $fmt $(, $arg)* ))
    };
}
pub(crate) use parse_error;
