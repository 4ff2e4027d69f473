//! JSON output handling for the CLI
//!
//! Every command prints a single JSON object to stdout:
//! `{"status": "ok", "data": ...}` or
//! `{"status": "error", "code": ..., "message": ...}`.
//! Logs go to stderr and never mix with these responses.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Build a success envelope
pub fn success(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

/// Build an error envelope
pub fn failure(code: &str, message: &str) -> Value {
    serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_line(&success(data))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_line(&failure(code, message))
}

fn write_line(response: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, response)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let response = success(json!({"count": 2}));
        assert_eq!(response["status"], "ok");
        assert_eq!(response["data"]["count"], 2);
    }

    #[test]
    fn test_failure_envelope() {
        let response = failure("PLAYER_NOT_FOUND", "Player with id 9 does not exist");
        assert_eq!(response["status"], "error");
        assert_eq!(response["code"], "PLAYER_NOT_FOUND");
        assert!(response.get("data").is_none());
    }
}
