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

#![allow(unused)]

use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;
use voyager_common::datetime::EpochMillis;
use voyager_telemetry::{
    serial::{parse_record, LineFramer, SerialIngestionWorker},
    TelemetryConfig, TelemetrySample, TelemetryStore, STATUS_STANDBY,
};

// run with "cargo test --test test_record -- --nocapture"

const RECORD: &str = "0.1,-0.2,1.05,2.5,-1.0,180.0,12.5,12.9716,77.5946";

#[test]
fn test_parse_valid_record() {
    let rec = parse_record(RECORD).unwrap();
    println!("parsed: {rec:?}");

    assert_eq!(rec.ax, 0.1);
    assert_eq!(rec.ay, -0.2);
    assert_eq!(rec.az, 1.05);
    assert_eq!(rec.pitch, 2.5);
    assert_eq!(rec.roll, -1.0);
    assert_eq!(rec.yaw, 180.0);
    assert_eq!(rec.height, 12.5);
    assert_eq!(rec.lat, 12.9716);
    assert_eq!(rec.lon, 77.5946);
}

#[test]
fn test_parse_ignores_trailing_fields() {
    let line = format!("{RECORD},42.0,checksum");
    let rec = parse_record(&line).unwrap();
    assert_eq!(rec.lon, 77.5946);
}

#[test]
fn test_parse_rejects_short_record() {
    let line = "0.1,-0.2,1.05,2.5,-1.0,180.0,12.5,12.9716"; // 8 fields
    let res = parse_record(line);
    println!("short record -> {res:?}");
    assert!(res.is_err());
}

#[test]
fn test_parse_rejects_non_numeric_field() {
    let line = "0.1,-0.2,bogus,2.5,-1.0,180.0,12.5,12.9716,77.5946";
    assert!(parse_record(line).is_err());
    assert!(parse_record("").is_err());
}

#[test]
fn test_framer_reassembles_split_lines() {
    let mut framer = LineFramer::new();

    framer.push(b"1,2,3,4");
    assert_eq!(framer.next_line(), None); // no terminator yet

    framer.push(b",5,6,7,8,9\r\n10,20");
    assert_eq!(framer.next_line().as_deref(), Some("1,2,3,4,5,6,7,8,9"));
    assert_eq!(framer.next_line(), None);

    framer.push(b",30\n");
    assert_eq!(framer.next_line().as_deref(), Some("10,20,30"));
}

fn ingestion_fixture() -> (Arc<TelemetryStore>, SerialIngestionWorker, u64) {
    let config = TelemetryConfig::default();
    let store = Arc::new(TelemetryStore::new(TelemetrySample::at_origin(&config, EpochMillis::new(0))));
    let generation = store.begin_session(TelemetrySample::at_origin(&config, EpochMillis::new(0)), STATUS_STANDBY);
    let worker = SerialIngestionWorker::new(store.clone(), CancellationToken::new(), generation, Duration::from_millis(5));
    (store, worker, generation)
}

#[test]
fn test_valid_record_is_published() {
    let (store, worker, _) = ingestion_fixture();

    worker.process_line(RECORD);

    assert_eq!(store.log_len(), 1);
    let snap = store.snapshot();
    assert_eq!(snap.sample.yaw, 180.0);
    assert_eq!(snap.sample.height, 12.5);
}

#[test]
fn test_malformed_record_changes_nothing() {
    let (store, worker, _) = ingestion_fixture();
    worker.process_line(RECORD);
    let before = store.snapshot();

    worker.process_line("1,2,3"); // too few fields
    worker.process_line("a,b,c,d,e,f,g,h,i"); // non-numeric

    assert_eq!(store.log_len(), 1);
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.rejected_count(), 2);
}
