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

use voyager_common::datetime::EpochMillis;
use voyager_common::geo::{meters_per_degree_lon, METERS_PER_DEGREE};

// run with "cargo test --test test_datetime -- --nocapture"

#[test]
fn test_epoch_millis_formatting() {
    // 2026-01-01 01:02:03.456 UTC
    let ts = EpochMillis::new(1767229323456);
    println!("ts = {ts}");
    assert_eq!(ts.hh_mm_ss_millis(), "01:02:03.456");
}

#[test]
fn test_epoch_millis_ordering() {
    let earlier = EpochMillis::from_secs(100);
    let later = EpochMillis::new(100_500);
    assert!(earlier < later);
    assert_eq!(earlier.millis(), 100_000);
}

#[test]
fn test_meters_per_degree_lon() {
    assert_eq!(meters_per_degree_lon(0.0), METERS_PER_DEGREE);
    // shrinks towards the poles
    assert!(meters_per_degree_lon(60.0) < 0.51 * METERS_PER_DEGREE);
    assert!(meters_per_degree_lon(60.0) > 0.49 * METERS_PER_DEGREE);
}
