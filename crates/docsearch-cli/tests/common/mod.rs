#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

fn data_dir() -> &'static Path {
    static DATA_DIR: OnceLock<TempDir> = OnceLock::new();
    DATA_DIR
        .get_or_init(|| {
            let dir = tempfile::tempdir().expect("failed to create data dir for tests");
            std::fs::write(dir.path().join("config.toml"), "").expect("failed to write config");
            dir
        })
        .path()
}

/// The index the documentation generator wrote for a small tree library.
#[allow(dead_code)]
pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../docsearch-core/tests/fixtures/search_index.js")
}

#[allow(dead_code)]
pub fn fixture_text() -> String {
    std::fs::read_to_string(fixture_path()).expect("fixture should be readable")
}

/// Create a `docsearch` command isolated from the user's config and cache.
#[allow(dead_code)]
pub fn docsearch_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("docsearch"));
    cmd.timeout(CMD_TIMEOUT);
    let dir = data_dir();
    cmd.env("DOCSEARCH_DATA_DIR", dir.join("cache"));
    cmd.env("DOCSEARCH_CONFIG", dir.join("config.toml"));
    cmd.env_remove("DOCSEARCH_SOURCE");
    cmd.env_remove("DOCSEARCH_BASE_URL");
    cmd.env_remove("DOCSEARCH_FORMAT");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Like [`docsearch_cmd`], with its own cache directory and config file.
#[allow(dead_code)]
pub fn docsearch_cmd_with_dirs(data_dir: &Path, config: &Path) -> Command {
    let mut cmd = docsearch_cmd();
    cmd.env("DOCSEARCH_DATA_DIR", data_dir);
    cmd.env("DOCSEARCH_CONFIG", config);
    cmd
}

/// A `docsearch` command reading the fixture index.
#[allow(dead_code)]
pub fn fixture_cmd() -> Command {
    let mut cmd = docsearch_cmd();
    cmd.arg("--source").arg(fixture_path());
    cmd
}
