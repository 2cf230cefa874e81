//! Line protocol loop.
//!
//! Reads one JSON request per line from stdin and writes one JSON response
//! per line to stdout. A bad line gets an error response; the loop keeps going.

use anyhow::{Context, Result};
use calbridge_core::protocol::{Command, Request, Response};
use std::io::{self, BufRead, Write};

use crate::tools::{self, Tool, ToolContext};

pub async fn run(ctx: &ToolContext) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    tracing::info!("Waiting for tool requests on stdin");

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(&line, ctx).await;

        writeln!(stdout, "{}", response).context("Failed to write response")?;
        stdout.flush().context("Failed to flush stdout")?;
    }

    Ok(())
}

pub async fn handle_line(line: &str, ctx: &ToolContext) -> String {
    let request: Request = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => return Response::error(&format!("Failed to parse request: {}", e)),
    };

    let result = match request.command {
        Command::ListTools => Response::success(tools::definitions()),
        Command::CallTool => {
            let Some(name) = request.name.as_deref() else {
                return Response::error("Missing tool name");
            };
            let Some(tool) = Tool::from_name(name) else {
                return Response::error(&format!("Unknown tool: {}", name));
            };

            tracing::debug!(tool = name, "Calling tool");
            Response::success(tool.call(line, ctx).await)
        }
    };

    result.unwrap_or_else(|e| Response::error(&e.to_string()))
}
