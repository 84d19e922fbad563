//! Live inspection of MCP servers over stdio.
//!
//! Spawns the server process, runs the JSON-RPC `initialize` handshake,
//! sends `notifications/initialized`, and asks for `tools/list`. Messages
//! are newline-delimited JSON on the child's stdin/stdout. The whole
//! exchange runs under a timeout and the child is killed afterwards
//! either way, so a misbehaving server cannot hang the CLI.

use crate::core::AxmError;
use crate::schema::ServerRecord;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{Value, json};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::debug;

/// MCP protocol version we advertise during the handshake.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// How long the full probe exchange may take.
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC error code for an unimplemented method.
const METHOD_NOT_FOUND: i64 = -32601;

/// One capability (tool) a server declared in `tools/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCapability {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// What a probed server reported about itself.
#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    /// Server name and version from the initialize response, if declared.
    pub server_name: Option<String>,
    pub server_version: Option<String>,
    /// Protocol version the server answered with.
    pub protocol_version: Option<String>,
    pub tools: Vec<ToolCapability>,
}

/// Spawn the server described by `record` and probe its capabilities.
///
/// `server` is the catalog key, used only for error reporting.
pub async fn probe_server(server: &str, record: &ServerRecord) -> Result<ProbeReport> {
    let mut child = spawn(record)
        .map_err(|e| probe_failed(server, format!("failed to start '{}': {e}", record.command)))?;

    let result = tokio::time::timeout(PROBE_TIMEOUT, exchange(server, &mut child)).await;

    // Kill regardless of outcome; servers have no reason to outlive the probe.
    let _ = child.kill().await;

    match result {
        Ok(report) => report,
        Err(_) => Err(probe_failed(
            server,
            format!("no response within {} seconds", PROBE_TIMEOUT.as_secs()),
        )),
    }
}

fn spawn(record: &ServerRecord) -> std::io::Result<Child> {
    let mut cmd = Command::new(&record.command);
    cmd.args(&record.args)
        .envs(&record.env)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    cmd.spawn()
}

async fn exchange(server: &str, child: &mut Child) -> Result<ProbeReport> {
    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| probe_failed(server, "child stdin unavailable".to_string()))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| probe_failed(server, "child stdout unavailable".to_string()))?;

    let mut session = Session { server, stdin, stdout: BufReader::new(stdout).lines() };

    let init = session
        .request(
            1,
            "initialize",
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {
                    "name": "axm",
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        )
        .await?;

    let mut report = ProbeReport::default();
    if let Some(result) = init.get("result") {
        report.protocol_version =
            result.get("protocolVersion").and_then(Value::as_str).map(String::from);
        if let Some(info) = result.get("serverInfo") {
            report.server_name = info.get("name").and_then(Value::as_str).map(String::from);
            report.server_version = info.get("version").and_then(Value::as_str).map(String::from);
        }
    } else if let Some(error) = init.get("error") {
        return Err(probe_failed(server, format!("initialize rejected: {error}")));
    }

    session
        .notify("notifications/initialized", json!({}))
        .await?;

    let listed = session.request(2, "tools/list", json!({})).await?;
    if let Some(error) = listed.get("error") {
        // Servers without tools may simply not implement the method.
        if error.get("code").and_then(Value::as_i64) == Some(METHOD_NOT_FOUND) {
            debug!(server, "tools/list not implemented; treating as no tools");
            return Ok(report);
        }
        return Err(probe_failed(server, format!("tools/list rejected: {error}")));
    }

    if let Some(tools) = listed.pointer("/result/tools").and_then(Value::as_array) {
        report.tools = tools
            .iter()
            .filter_map(|t| serde_json::from_value(t.clone()).ok())
            .collect();
    }

    Ok(report)
}

struct Session<'a> {
    server: &'a str,
    stdin: ChildStdin,
    stdout: tokio::io::Lines<BufReader<ChildStdout>>,
}

impl Session<'_> {
    async fn request(&mut self, id: u64, method: &str, params: Value) -> Result<Value> {
        self.send(json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        }))
        .await?;
        self.read_response(id).await
    }

    async fn notify(&mut self, method: &str, params: Value) -> Result<()> {
        self.send(json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
        }))
        .await
    }

    async fn send(&mut self, message: Value) -> Result<()> {
        let mut line = message.to_string();
        line.push('\n');
        self.stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|e| probe_failed(self.server, format!("write failed: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| probe_failed(self.server, format!("write failed: {e}")))?;
        Ok(())
    }

    /// Read lines until the response matching `id` arrives. Notifications
    /// and unparseable output from the server are skipped.
    async fn read_response(&mut self, id: u64) -> Result<Value> {
        loop {
            let line = self
                .stdout
                .next_line()
                .await
                .map_err(|e| probe_failed(self.server, format!("read failed: {e}")))?
                .ok_or_else(|| {
                    probe_failed(self.server, "server closed stdout before responding".to_string())
                })?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(message) if message.get("id").and_then(Value::as_u64) == Some(id) => {
                    return Ok(message);
                }
                Ok(_) => debug!(server = self.server, "skipping unrelated message"),
                Err(_) => debug!(server = self.server, "skipping non-JSON output line"),
            }
        }
    }
}

fn probe_failed(server: &str, reason: String) -> anyhow::Error {
    AxmError::ProbeFailed { server: server.to_string(), reason }.into()
}
