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

/// geodetic constants and helpers for the equirectangular position approximation used
/// by the simulation integrator. Good enough over the short horizontal distances a small
/// vehicle covers within one session, not for long range navigation.

/// meters per degree of latitude (also the equatorial meters per degree of longitude)
pub const METERS_PER_DEGREE: f64 = 111000.0;

/// meters per degree of longitude at the given latitude (degrees)
#[inline]
pub fn meters_per_degree_lon(lat_deg: f64) -> f64 {
    METERS_PER_DEGREE * lat_deg.to_radians().cos()
}
