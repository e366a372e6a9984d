use anyhow::Context as _;
use serde_json::{Value, json};
use std::io::{BufRead as _, BufReader, Write as _};
use std::process::{ChildStdin, Command, Stdio};
use std::time::Duration;
use tokio::sync::mpsc;

pub use evolution_test_support::{KillOnDrop, MockGateway};

pub const INSTANCE: &str = "main";
pub const API_KEY: &str = "test-key";

const CREDENTIAL_VARS: [&str; 3] = [
    "EVOLUTION_BASE_URL",
    "EVOLUTION_API_KEY",
    "EVOLUTION_INSTANCE",
];

/// The server binary with a clean credential environment.
pub fn server_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_evolution-mcp"));
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd.env("EVOLUTION_MCP_LOG", "debug");
    cmd
}

/// A running server speaking newline-delimited JSON-RPC over its stdio.
pub struct StdioSession {
    _child: KillOnDrop,
    stdin: ChildStdin,
    lines: mpsc::Receiver<String>,
}

impl StdioSession {
    pub fn spawn(base_url: &str) -> anyhow::Result<Self> {
        let mut child = server_command()
            .env("EVOLUTION_BASE_URL", base_url)
            .env("EVOLUTION_API_KEY", API_KEY)
            .env("EVOLUTION_INSTANCE", INSTANCE)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .context("spawn evolution-mcp")?;

        let stdin = child.stdin.take().context("child stdin")?;
        let stdout = child.stdout.take().context("child stdout")?;

        let (tx, lines) = mpsc::channel(64);
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            _child: KillOnDrop(child),
            stdin,
            lines,
        })
    }

    pub fn send(&mut self, msg: &Value) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(msg)?;
        line.push('\n');
        self.stdin.write_all(line.as_bytes()).context("write to server stdin")?;
        self.stdin.flush().context("flush server stdin")?;
        Ok(())
    }

    /// Send a request and wait for the response carrying the same id.
    pub async fn request(&mut self, id: u64, method: &str, params: Value) -> anyhow::Result<Value> {
        self.send(&json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))?;
        loop {
            let line = tokio::time::timeout(Duration::from_secs(10), self.lines.recv())
                .await
                .with_context(|| format!("timed out waiting for response to {method}"))?
                .context("server closed stdout")?;
            let msg: Value = serde_json::from_str(&line)
                .with_context(|| format!("non-JSON line on stdout: {line}"))?;
            if msg.get("id") == Some(&json!(id)) {
                return Ok(msg);
            }
        }
    }

    pub async fn initialize(&mut self) -> anyhow::Result<Value> {
        let resp = self
            .request(
                0,
                "initialize",
                json!({
                    "protocolVersion": "2025-03-26",
                    "capabilities": {},
                    "clientInfo": {"name": "integration-test", "version": "0"}
                }),
            )
            .await?;
        self.send(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))?;
        Ok(resp)
    }

    pub async fn call_tool(
        &mut self,
        id: u64,
        name: &str,
        arguments: Value,
    ) -> anyhow::Result<Value> {
        let resp = self
            .request(id, "tools/call", json!({"name": name, "arguments": arguments}))
            .await?;
        resp.get("result")
            .cloned()
            .with_context(|| format!("tools/call {name} returned no result: {resp}"))
    }
}

/// Text of the single content block of a tool result.
pub fn result_text(result: &Value) -> anyhow::Result<&str> {
    result["content"][0]["text"]
        .as_str()
        .context("tool result has no text content")
}
