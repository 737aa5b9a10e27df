//! Integration tests for the ecoroute binary
//!
//! Every test runs the compiled CLI. Most run with `--offline` so only the
//! built-in catalog is used; the geocoder tests point the binary at a local
//! mock server instead of the real service.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BINARY: &str = env!("CARGO_BIN_EXE_ecoroute");

/// Command with a clean environment: no token, no endpoint override, quiet logs
fn ecoroute() -> Command {
    let mut cmd = Command::new(BINARY);
    cmd.env_remove("MAPBOX_ACCESS_TOKEN")
        .env_remove("ECOROUTE_GEOCODER_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    ecoroute()
        .args(args)
        .output()
        .expect("Failed to run ecoroute binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_route_text_output() {
    let output = run(&["--offline", "route", "Delhi", "Mumbai"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Delhi → Mumbai"));
    let bike = text.lines().find(|l| l.starts_with("Bicycle")).unwrap();
    assert!(bike.contains("Eco choice"));
    assert!(text.contains("1148.1 km"));
    assert!(text.contains("30h 37m"));
    assert!(text.contains("Emissions (kg CO₂)"));
}

#[test]
fn test_route_json_output() {
    let output = run(&["--offline", "route", "Delhi", "Mumbai", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["source"], "Delhi");
    assert_eq!(json["eco_friendly"], "bike");

    let modes = json["modes"].as_array().unwrap();
    let ids: Vec<_> = modes.iter().map(|m| m["mode"].as_str().unwrap()).collect();
    assert_eq!(ids, ["car", "bus", "bike", "walk"]);
    assert_eq!(modes[0]["emissions_kg"], 137.77);
    assert_eq!(modes[1]["duration_min"], 3215);
    assert_eq!(modes[3]["duration_min"], 27554);
}

#[test]
fn test_route_with_coordinate_literals() {
    let output = run(&[
        "--offline",
        "route",
        "28.6139, 77.2090",
        "28.6139, 77.2090",
        "--json",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let durations: Vec<_> = json["modes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["duration_min"].as_u64().unwrap())
        .collect();
    assert_eq!(durations, [4, 7, 18, 60]);
    assert_eq!(json["modes"][0]["distance_km"], 0.0);
}

#[test]
fn test_unknown_place_suggests_correction() {
    let output = run(&["--offline", "route", "Delhi", "Mumbay"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());

    let err = stderr(&output);
    assert!(err.contains("Could not find coordinates for destination 'Mumbay'"));
    assert!(err.contains("Did you mean 'Mumbai'?"));
}

#[test]
fn test_blank_endpoint_is_rejected() {
    let output = run(&["--offline", "route", "  ", "Mumbai"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Please enter both source and destination"));
}

#[test]
fn test_output_file_overwrite_flags() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("route.json");
    let file_arg = file.to_str().unwrap();

    let output = run(&["--offline", "route", "Pune", "Thane", "-o", file_arg, "--no-clobber"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(saved["destination"], "Thane");

    let output = run(&["--offline", "route", "Delhi", "Lucknow", "-o", file_arg, "--no-clobber"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("use --force to overwrite"));

    let output = run(&["--offline", "route", "Delhi", "Lucknow", "-o", file_arg, "--force"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(saved["destination"], "Lucknow");
}

#[test]
fn test_conflicting_overwrite_flags() {
    let output = run(&["--offline", "route", "Delhi", "Lucknow", "--force", "--no-clobber"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force and --no-clobber cannot be used together"));
}

#[test]
fn test_dry_run_resolves_nothing() {
    let output = run(&["--offline", "route", "Nowhere", "Mumbai", "--dry-run"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("[DRY RUN] Would compare: Nowhere → Mumbai"));
}

#[test]
fn test_offline_search() {
    let output = run(&["--offline", "search", "chen"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("📍 Chennai, Tamil Nadu, India (city)"));

    let output = run(&["--offline", "search", "c"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());

    let output = run(&["--offline", "search", "zzzz"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No locations found for \"zzzz\""));
}

#[test]
fn test_offline_reverse_prints_coordinates() {
    let output = run(&["--offline", "reverse", "-33.8688", "151.2093"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "-33.8688, 151.2093");
}

#[test]
fn test_session_reads_stdin() {
    let mut child = ecoroute()
        .args(["--offline", "session"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"Delhi -> Jaipur\nPune -> Mumbay\nPune -> Thane\n:history\n:quit\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Delhi → Jaipur"));
    assert!(text.contains("Did you mean 'Mumbai'?"));
    assert!(text.contains("Total trips: 2"));
    assert!(text.contains("Pune → Thane"));
}

fn feature(text: &str, place_name: &str, lng: f64, lat: f64) -> Value {
    serde_json::json!({
        "text": text,
        "place_name": place_name,
        "center": [lng, lat],
        "place_type": ["locality"],
    })
}

async fn run_against(server: &MockServer, args: &[&str]) -> Output {
    tokio::process::Command::new(BINARY)
        .env_remove("RUST_LOG")
        .env("MAPBOX_ACCESS_TOKEN", "pk.test")
        .env("ECOROUTE_GEOCODER_URL", format!("{}/places", server.uri()))
        .args(args)
        .output()
        .await
        .expect("Failed to run ecoroute binary")
}

#[tokio::test]
async fn test_search_uses_geocoder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/places/Koregaon.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "features": [feature(
                "Koregaon Park",
                "Koregaon Park, Pune, Maharashtra, India",
                73.8938,
                18.5362,
            )]
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["search", "Koregaon"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("📍 Koregaon Park, Pune, India (locality)"));
}

#[tokio::test]
async fn test_search_falls_back_when_token_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let output = run_against(&server, &["search", "pune"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("API unavailable - showing saved locations"));
    assert!(text.contains("Pune, Maharashtra, India"));
}

#[tokio::test]
async fn test_route_uses_geocoded_coordinates() {
    let server = MockServer::start().await;
    for (name, lng, lat) in [("Delhi", 77.2090, 28.6139), ("Mumbai", 72.8777, 19.0760)] {
        Mock::given(method("GET"))
            .and(path(format!("/places/{name}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "features": [feature(name, &format!("{name}, India"), lng, lat)]
            })))
            .mount(&server)
            .await;
    }

    let output = run_against(&server, &["route", "Delhi", "Mumbai", "--json"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["destination"], "Mumbai");
    assert_eq!(json["modes"][0]["distance_km"], 1148.1);
}
