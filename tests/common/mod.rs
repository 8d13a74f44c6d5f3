//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which lays out a `static/` tree in a temporary
//! directory, builds an [`AppContext`] over it, and serves the full router on
//! a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use an_core::config::Config;
use an_server::context::AppContext;
use tokio_util::sync::CancellationToken;

/// Test harness wrapping a running server and its on-disk layout.
pub struct TestHarness {
    pub ctx: AppContext,
    pub addr: SocketAddr,
    dir: tempfile::TempDir,
    cancel: CancellationToken,
}

impl TestHarness {
    /// Start a server with default settings rooted in a fresh temp dir.
    pub async fn with_server() -> Self {
        Self::with_server_config(|_| {}).await
    }

    /// Start a server after letting the caller adjust the config.
    pub async fn with_server_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let config = Self::config_for(dir.path(), adjust);

        std::fs::create_dir_all(&config.storage.input_dir).expect("failed to create input dir");
        std::fs::write(
            config.server.static_dir.join("index.html"),
            "<html><body>annotator</body></html>",
        )
        .expect("failed to write index.html");

        let ctx = AppContext::new(config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        let cancel = CancellationToken::new();
        let server_ctx = ctx.clone();
        let server_cancel = cancel.clone();
        tokio::spawn(async move {
            an_server::serve(listener, server_ctx, server_cancel).await.ok();
        });

        Self {
            ctx,
            addr,
            dir,
            cancel,
        }
    }

    fn config_for(root: &Path, adjust: impl FnOnce(&mut Config)) -> Config {
        let static_dir = root.join("static");
        let mut config = Config::default();
        config.server.static_dir = static_dir.clone();
        config.storage.input_dir = static_dir.join("input_images");
        config.storage.binary_dir = static_dir.join("results").join("binary_data");
        config.storage.masked_dir = static_dir.join("results").join("masked_images");
        config.storage.predictions_file = static_dir.join("results").join("predictions.txt");
        adjust(&mut config);
        config
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Drop an input image (any bytes) into the input directory.
    pub fn add_input_file(&self, name: &str) -> PathBuf {
        let path = self.ctx.config.storage.input_dir.join(name);
        std::fs::write(&path, b"\x89PNG fake image").expect("failed to write input file");
        path
    }

    pub fn predictions_file(&self) -> &Path {
        &self.ctx.config.storage.predictions_file
    }

    pub fn binary_dir(&self) -> &Path {
        &self.ctx.config.storage.binary_dir
    }

    pub fn masked_dir(&self) -> &Path {
        &self.ctx.config.storage.masked_dir
    }

    /// Current contents of the predictions file, one entry per line.
    pub fn prediction_lines(&self) -> Vec<String> {
        self.ctx.predictions.records().expect("failed to read predictions")
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
