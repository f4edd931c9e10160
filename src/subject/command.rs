//! Subject backed by an external parser process
//!
//! The process is started once per test as
//! `<program> <args…> --source-type <script|module> [--capability <name>]…`
//! with the source text on stdin.
//!
//! - exit status 0: the source was accepted
//! - exit status 1: the source was rejected; stdout may hold
//!   `{"phase": "parse", "message": "…"}`, otherwise stderr is the message
//! - anything else (other status, signal, spawn failure): the parser crashed

use serde::Deserialize;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use super::{ParseRequest, Rejection, Subject, SubjectError, SubjectResult};
use crate::corpus::Phase;
use crate::error::{Error, Result};

/// Exit status signalling a rejected source
pub const REJECT_EXIT_CODE: i32 = 1;

#[derive(Debug, Deserialize)]
struct RejectionReport {
    #[serde(default)]
    phase: Option<Phase>,
    #[serde(default)]
    message: Option<String>,
}

/// Runs an external command as the parser under test
#[derive(Debug, Clone)]
pub struct CommandSubject {
    program: String,
    args: Vec<String>,
}

impl CommandSubject {
    /// `command` is the program followed by its fixed arguments
    pub fn new<I, S>(command: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parts = command.into_iter().map(Into::into);
        let program = parts
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| Error::Subject("empty parser command".to_string()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command_for(&self, request: &ParseRequest<'_>) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command.arg("--source-type").arg(request.source_kind.as_str());
        for capability in request.capabilities {
            command.arg("--capability").arg(capability);
        }
        command.stdin(Stdio::piped());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        command
    }

    fn run(&self, request: &ParseRequest<'_>) -> std::result::Result<Output, String> {
        let mut child = self
            .command_for(request)
            .spawn()
            .map_err(|e| format!("failed to start '{}': {}", self.program, e))?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| "parser stdin unavailable".to_string())?;

        // Feed stdin from a separate thread so a parser that writes before
        // draining its input cannot deadlock against us.
        let source = request.source_text.as_bytes();
        let (output, written) = std::thread::scope(|s| {
            let writer = s.spawn(move || stdin.write_all(source));
            let output = child.wait_with_output();
            (output, writer.join())
        });

        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(format!("failed to write source: {}", e)),
            Err(_) => return Err("stdin writer panicked".to_string()),
        }
        output.map_err(|e| format!("failed to wait for parser: {}", e))
    }
}

/// Interpret a finished parser process
pub fn interpret_output(output: &Output) -> SubjectResult {
    match output.status.code() {
        Some(0) => Ok(()),
        Some(REJECT_EXIT_CODE) => match parse_rejection(&output.stdout, &output.stderr) {
            Ok(rejection) => Err(SubjectError::Rejected(rejection)),
            Err(message) => Err(SubjectError::Crashed(message)),
        },
        Some(code) => Err(SubjectError::Crashed(format!(
            "parser exited with status {}: {}",
            code,
            String::from_utf8_lossy(&output.stderr).trim()
        ))),
        None => Err(SubjectError::Crashed("parser terminated by signal".to_string())),
    }
}

fn parse_rejection(stdout: &[u8], stderr: &[u8]) -> std::result::Result<Rejection, String> {
    let stdout = String::from_utf8_lossy(stdout);
    let stdout = stdout.trim();
    let fallback_message = || {
        let stderr = String::from_utf8_lossy(stderr).trim().to_string();
        if stderr.is_empty() {
            "rejected".to_string()
        } else {
            stderr
        }
    };

    if stdout.is_empty() {
        return Ok(Rejection::syntax(fallback_message()));
    }

    let report: RejectionReport =
        serde_json::from_str(stdout).map_err(|e| format!("unreadable rejection report: {}", e))?;
    Ok(Rejection::new(
        report.phase.unwrap_or(Phase::Parse),
        report.message.unwrap_or_else(fallback_message),
    ))
}

impl Subject for CommandSubject {
    fn parse(&self, request: &ParseRequest<'_>) -> SubjectResult {
        let output = self.run(request).map_err(SubjectError::Crashed)?;
        interpret_output(&output)
    }
}
