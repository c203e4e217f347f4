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

//! console monitor for the telemetry engine: run one session, print snapshots, export the log

use std::{fs, path::PathBuf, time::Duration};
use anyhow::Result;
use clap::Parser;
use voyager_telemetry::{
    control::ControlInputUpdate,
    engine::TelemetryEngine,
    export::EXPORT_FILE_NAME,
    load_config_path, SystemMode, TelemetryConfig,
};

#[derive(Parser)]
#[command(about = "VoyagerX ground station console monitor")]
struct Args {
    /// session mode to start (IDLE | LIVE | SIMULATION)
    mode: String,

    /// pathname of a RON engine config (defaults used if not given)
    #[arg(long)]
    config: Option<PathBuf>,

    /// vertical acceleration command fed to the simulator (multiples of g)
    #[arg(long, default_value_t = 0.0)]
    throttle: f64,

    /// seconds to run before exporting the flight log
    #[arg(long, default_value_t = 10)]
    duration: u64,

    /// file the flight log is written to on exit
    #[arg(long, default_value = EXPORT_FILE_NAME)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config: TelemetryConfig = match &args.config {
        Some(path) => load_config_path(path)?,
        None => TelemetryConfig::default(),
    };

    let engine = TelemetryEngine::new(config);
    let ack = engine.start_session(&args.mode)?;
    println!("session {} started in mode {}", ack.generation, ack.mode);

    if ack.mode == SystemMode::Simulation && args.throttle != 0.0 {
        engine.update_controls(ControlInputUpdate { az: Some(args.throttle), ..Default::default() })?;
    }

    for _ in 0..args.duration {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let snap = engine.snapshot();
        println!("[{}] alt={:7.1}m  lat={:10.5}  lon={:10.5}  samples={}  rejected={}",
                 snap.status, snap.sample.height, snap.sample.lat, snap.sample.lon,
                 engine.store().log_len(), engine.store().rejected_count());
    }

    engine.stop();
    let table = engine.export_log()?;
    fs::write(&args.out, &table)?;
    println!("flight log exported to {}", args.out.display());

    Ok(())
}
