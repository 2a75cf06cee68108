//! Integration tests for the `route` subcommand against the fixture network.

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/mini_network.geojson")
}

fn seaway() -> Command {
    let mut cmd = cargo_bin_cmd!("seaway");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("SEAWAY_NETWORK")
        .env_remove("SEAWAY_DATA_DIR")
        .arg("--network")
        .arg(fixture_path());
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command runs");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn route_text_summarizes_the_leg() {
    seaway()
        .args(["route", "--waypoint", "0,0", "--waypoint", "20,0"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Route: 1 leg(s), 2223."))
        .stdout(predicate::str::contains("status: Complete"))
        .stdout(predicate::str::contains("(0,0) -> (20,0)"))
        .stdout(predicate::str::contains("3 vertices"));
}

#[test]
fn route_json_reports_each_leg() {
    let value = stdout_json(seaway().args([
        "--format",
        "json",
        "route",
        "-w",
        "0,0",
        "-w",
        "20,0",
        "-w",
        "40,30",
    ]));

    assert_eq!(value["status"], "complete");
    assert_eq!(value["algorithm"], "a-star");
    let legs = value["legs"].as_array().expect("legs array");
    assert_eq!(legs.len(), 2);
    assert!(legs.iter().all(|leg| leg["outcome"] == "routed"));
    assert_eq!(value["polylines"][0][0], serde_json::json!([0.0, 0.0]));
}

#[test]
fn dijkstra_and_a_star_agree_on_distance() {
    let distance = |algorithm: &str| {
        let value = stdout_json(seaway().args([
            "--format",
            "json",
            "route",
            "-w",
            "0,0",
            "-w",
            "40,30",
            "--algorithm",
            algorithm,
        ]));
        value["total_distance"].as_f64().expect("distance")
    };
    assert!((distance("a-star") - distance("dijkstra")).abs() < 1e-6);
}

#[test]
fn seam_route_exports_split_geojson() {
    let value = stdout_json(seaway().args([
        "--format",
        "geojson",
        "route",
        "-w",
        "179,10",
        "-w",
        "-179,10",
    ]));

    assert_eq!(value["type"], "FeatureCollection");
    let feature = &value["features"][0];
    assert_eq!(feature["properties"]["crossed"], true);
    let lines = feature["geometry"]["coordinates"]
        .as_array()
        .expect("multi line coordinates");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0][0], serde_json::json!([179.0, 10.0]));
    assert_eq!(lines[1][1], serde_json::json!([-179.0, 10.0]));
}

#[test]
fn nautical_miles_are_honoured() {
    seaway()
        .args(["--units", "nm", "route", "-w", "0,0", "-w", "20,0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" nm"));
}

#[test]
fn closed_canal_takes_the_detour() {
    let open = stdout_json(seaway().args([
        "--format", "json", "route", "-w", "30,30", "-w", "40,30",
    ]));
    let closed = stdout_json(seaway().args([
        "--format", "json", "route", "-w", "30,30", "-w", "40,30", "--no-suez",
    ]));

    let open_distance = open["total_distance"].as_f64().expect("distance");
    let closed_distance = closed["total_distance"].as_f64().expect("distance");
    assert!(closed_distance > open_distance);
    assert_eq!(closed["polylines"][0][1], serde_json::json!([35.0, 40.0]));
}

#[test]
fn partial_route_still_succeeds() {
    let value = stdout_json(seaway().args([
        "--format",
        "json",
        "route",
        "-w",
        "0,0",
        "-w",
        "20,0",
        "-w",
        "100,-40",
    ]));
    assert_eq!(value["status"], "partial");
    assert_eq!(value["legs"][1]["outcome"], "no_path");
}

#[test]
fn single_waypoint_is_rejected() {
    seaway()
        .args(["route", "-w", "0,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least two waypoints, got 1"));
}

#[test]
fn out_of_range_latitude_is_rejected() {
    seaway()
        .args(["route", "-w", "0,95", "-w", "20,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to plan route"));
}

#[test]
fn unreachable_route_lists_closed_passages() {
    seaway()
        .args(["route", "-w", "100,-40", "-w", "0,0", "--no-panama"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No route found between (100,-40) and (0,0).",
        ))
        .stderr(predicate::str::contains("Closed passages: Panama canal."))
        .stderr(predicate::str::contains("omit --no-panama"));
}

#[test]
fn missing_network_file_is_reported() {
    let mut cmd = cargo_bin_cmd!("seaway");
    cmd.env("RUST_LOG", "error")
        .args(["--network", "/nonexistent/network.geojson"])
        .args(["route", "-w", "0,0", "-w", "20,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load network"));
}
