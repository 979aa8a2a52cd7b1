//! The desktop shell serves the page with the isolation headers.

use playground_pipelines::CROSS_ORIGIN_ISOLATION_HEADERS;
use serde_json::Value;

const TAURI_CONF: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../src-tauri/tauri.conf.json"
));

#[test]
fn test_shell_sends_isolation_headers() {
    let conf: Value = serde_json::from_str(TAURI_CONF).unwrap();
    let headers = &conf["app"]["security"]["headers"];

    for (name, value) in CROSS_ORIGIN_ISOLATION_HEADERS {
        assert_eq!(headers[name], value, "header {}", name);
    }
}

#[test]
fn test_window_title() {
    let conf: Value = serde_json::from_str(TAURI_CONF).unwrap();
    assert_eq!(conf["app"]["windows"][0]["title"], "AI Model Playground");
}
