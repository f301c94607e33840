//! Process-level behaviour of the `path-proxy` binary.

use std::io::Write;
use std::process::{Command, ExitStatus};
use std::time::{Duration, Instant};

fn proxy_command(config: &std::path::Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_path-proxy"));
    command
        .arg("--config")
        .arg(config)
        .env_remove("PORT")
        .env_remove("PATH_MAPPING")
        .env_remove("PROXY_CONFIG");
    command
}

/// Wait for the process to exit, killing it after `limit`.
fn wait_with_limit(command: &mut Command, limit: Duration) -> Option<ExitStatus> {
    let mut child = command.spawn().unwrap();
    let deadline = Instant::now() + limit;
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait().unwrap() {
            return Some(status);
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    let _ = child.kill();
    let _ = child.wait();
    None
}

#[test]
fn exits_with_one_when_port_is_taken() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = occupied.local_addr().unwrap();

    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[listener]\nbind_address = \"{}\"", addr).unwrap();

    let status = proxy_command(config.path()).status().unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn exits_with_one_on_invalid_config() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[routing.path_mapping]\n\"a/b\" = \"backend.internal\"").unwrap();

    let status = proxy_command(config.path()).status().unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn port_from_env_file_is_used() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), format!("PORT={}\n", port)).unwrap();
    let config_path = dir.path().join("proxy.toml");
    std::fs::write(&config_path, "[listener]\nbind_address = \"127.0.0.1:0\"\n").unwrap();

    let mut command = proxy_command(&config_path);
    command.current_dir(dir.path());

    let status = wait_with_limit(&mut command, Duration::from_secs(10))
        .expect("proxy kept running, so PORT from .env was not applied");
    assert_eq!(status.code(), Some(1));
}
