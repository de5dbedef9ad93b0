// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Parse OBJ files and report the deduplicated buffer sizes
//!
//! Usage:
//!   obj-inspect <file.obj> [more.obj ...]
//!
//! Honors `OBJ_LITE_BALANCE_FACTOR`, `OBJ_LITE_MAX_FILE_SIZE_MB` and
//! `RUST_LOG`.

use std::env;
use std::process::ExitCode;

use obj_lite_geometry::{load_obj_file, FinalVertex, LoadConfig};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        print_usage();
        return ExitCode::SUCCESS;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = LoadConfig::from_env();
    let mut failed = false;

    for path in &args {
        match load_obj_file(path, &config) {
            Ok(geometry) => {
                let (min, max) = geometry.bounds();
                let corners = geometry.index_count();
                let ratio = if corners == 0 {
                    0.0
                } else {
                    geometry.vertex_count() as f64 / corners as f64
                };

                println!("{}", path);
                println!("  Triangles: {}", geometry.triangle_count());
                println!("  Vertices: {} ({:.1}% of corners)", geometry.vertex_count(), ratio * 100.0);
                println!("  Indices: {}", corners);
                println!(
                    "  Buffers: {} vertex bytes ({} per vertex), {} index bytes",
                    geometry.vertex_bytes().len(),
                    FinalVertex::STRIDE,
                    geometry.index_bytes().len()
                );
                println!(
                    "  Bounds: min=({:.3}, {:.3}, {:.3}), max=({:.3}, {:.3}, {:.3})",
                    min.x, min.y, min.z, max.x, max.y, max.z
                );
            }
            Err(e) => {
                eprintln!("{}: {}", path, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_usage() {
    println!("Usage: obj-inspect <file.obj> [more.obj ...]");
    println!();
    println!("Parses triangulated single-object OBJ files and prints the size of");
    println!("the deduplicated vertex and index buffers.");
    println!();
    println!("Environment:");
    println!("  OBJ_LITE_BALANCE_FACTOR    dedup tree balance factor in (0.5, 1), default 0.7");
    println!("  OBJ_LITE_MAX_FILE_SIZE_MB  largest accepted file, default 512");
    println!("  RUST_LOG                   log filter, e.g. obj_lite_geometry=debug");
}
