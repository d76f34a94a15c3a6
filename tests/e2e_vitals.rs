mod support;

use std::process::Output;

use tempfile::tempdir;

use support::{run_vitals, spawn_http_server, write_config};

fn config_for(url: &str) -> String {
    format!(
        r#"
[global]
timeout = 2

[targets.web]
name = "Web"
base_urls = ["{url}"]
endpoints = ["/health", "health"]

[targets.api]
base_urls = ["{url}/"]
endpoints = ["/health", "/missing"]
"#,
        url = url
    )
}

fn describe(output: &Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_table_output() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = write_config(dir.path(), "vitals.toml", &config_for(&url))?;

    let output = run_vitals(["-c", config.as_str(), "--no-color"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in [
        "[Web] from",
        "[api] from",
        "Total: 2, Success: 2, Failed: 0",
        "Total: 2, Success: 1, Failed: 1",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("Missing {:?}\n{}", expected, describe(&output)));
        }
    }
    let api = stdout.find("[api]").ok_or("api table missing")?;
    let web = stdout.find("[Web]").ok_or("web table missing")?;
    if api > web {
        return Err("Tables must be sorted by target key".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_piped_table_has_no_escape_codes() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = write_config(dir.path(), "vitals.toml", &config_for(&url))?;

    let output = run_vitals(["-c", config.as_str()])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Total: 2, Success: 1, Failed: 1") {
        return Err(describe(&output));
    }
    if stdout.contains('\x1b') {
        return Err(format!("Colour codes in piped output\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_json_output() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = write_config(dir.path(), "vitals.toml", &config_for(&url))?;

    let output = run_vitals(["-c", config.as_str(), "--json", "--concurrency", "1"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("{}: {}", err, describe(&output)))?;
    let targets = value
        .get("targets")
        .and_then(|targets| targets.as_object())
        .ok_or("missing targets")?;
    let api_key = format!("{}::api", config);
    let api = targets.get(&api_key).ok_or("missing api target")?;
    let summary = api.get("summary").ok_or("missing summary")?;
    if summary.get("total").and_then(|v| v.as_u64()) != Some(2)
        || summary.get("failed").and_then(|v| v.as_u64()) != Some(1)
    {
        return Err(format!("Unexpected summary: {}", summary));
    }
    let urls: Vec<&str> = api
        .get("results")
        .and_then(|results| results.as_array())
        .ok_or("missing results")?
        .iter()
        .filter_map(|result| result.get("url").and_then(|url| url.as_str()))
        .collect();
    let expected = vec![format!("{}/health", url), format!("{}/missing", url)];
    if urls != expected {
        return Err(format!("Unexpected URLs: {:?}", urls));
    }
    if String::from_utf8_lossy(&output.stdout).contains("response_body") {
        return Err("Bodies are only included with --verbose".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_html_output() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = write_config(dir.path(), "vitals.toml", &config_for(&url))?;

    let output = run_vitals(["-c", config.as_str(), "--html", "--verbose"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.starts_with("<!DOCTYPE html>") || !stdout.contains("<pre>healthy</pre>") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_fail_on_error_sets_exit_code() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = write_config(dir.path(), "vitals.toml", &config_for(&url))?;

    let output = run_vitals(["-c", config.as_str(), "--json", "--fail-on-error"])?;
    if output.status.success() {
        return Err(format!("Expected failure exit\n{}", describe(&output)));
    }
    if serde_json::from_slice::<serde_json::Value>(&output.stdout).is_err() {
        return Err(format!("Report must still be printed\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_live_falls_back_to_table_when_piped() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = write_config(dir.path(), "vitals.toml", &config_for(&url))?;

    let output = run_vitals(["-c", config.as_str(), "--live"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("┌") || stdout.contains('⠋') {
        return Err(format!("Expected a table, not live output\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_missing_config_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let missing = dir.path().join("absent.toml").to_string_lossy().into_owned();
    let output = run_vitals(["-c", missing.as_str()])?;
    if output.status.success() {
        return Err(format!("Expected failure exit\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_separate_files_keep_same_key_apart() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let first = write_config(dir.path(), "one.toml", &config_for(&url))?;
    let second = write_config(
        dir.path(),
        "two.json",
        &format!(
            r#"{{"targets": {{"api": {{"base_urls": ["{}"], "endpoints": ["/health"]}}}}}}"#,
            url
        ),
    )?;

    let output = run_vitals(["-c", first.as_str(), "-c", second.as_str(), "-j"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("{}: {}", err, describe(&output)))?;
    let targets = value
        .get("targets")
        .and_then(|targets| targets.as_object())
        .ok_or("missing targets")?;
    if targets.len() != 3 {
        return Err(format!("Expected 3 target reports, got {}", targets.len()));
    }
    let second_api = targets
        .get(&format!("{}::api", second))
        .ok_or("missing second api")?;
    if second_api.pointer("/summary/total").and_then(|v| v.as_u64()) != Some(1) {
        return Err(format!("Unexpected second api: {}", second_api));
    }
    Ok(())
}
