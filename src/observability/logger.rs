//! Structured JSON logger
//!
//! - Structured logs (JSON), one log line = one event
//! - Deterministic key ordering: event, severity, ts, then fields
//!   sorted alphabetically
//! - Synchronous, no buffering

use std::fmt;
use std::io::{self, Write};

use chrono::{SecondsFormat, Utc};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::log_to_writer(severity, event, fields, &mut io::stderr());
    }

    /// Internal log implementation that writes to a given writer
    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        // Build JSON manually for deterministic key ordering
        let mut output = String::with_capacity(256);

        output.push_str("{\"event\":\"");
        Self::escape_json_string(&mut output, event);
        output.push('"');

        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        output.push_str(",\"ts\":\"");
        output.push_str(&Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            Self::escape_json_string(&mut output, key);
            output.push_str("\":\"");
            Self::escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push_str("}\n");

        // One write, then flush
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }

    /// Escape special characters for JSON strings
    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut buf = Vec::new();
        Logger::log_to_writer(severity, event, fields, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_event_and_severity_lead() {
        let line = render(Severity::Info, "connection_opened", &[("database", "bookstore")]);
        assert!(line.starts_with("{\"event\":\"connection_opened\",\"severity\":\"INFO\""));
        assert!(line.contains("\"database\":\"bookstore\""));
        assert!(line.ends_with("}\n"));
    }

    #[test]
    fn test_fields_sorted_alphabetically() {
        let line = render(
            Severity::Info,
            "op",
            &[("zulu", "1"), ("alpha", "2")],
        );
        let alpha = line.find("\"alpha\"").unwrap();
        let zulu = line.find("\"zulu\"").unwrap();
        assert!(alpha < zulu);
    }

    #[test]
    fn test_escaping() {
        let line = render(Severity::Warn, "odd \"name\"", &[("k", "a\nb")]);
        assert!(line.contains("odd \\\"name\\\""));
        assert!(line.contains("a\\nb"));
    }

    #[test]
    fn test_line_is_valid_json() {
        let line = render(Severity::Error, "op_failed", &[("code", "SHELF_QUERY_REJECTED")]);
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["severity"], "ERROR");
        assert!(parsed["ts"].is_string());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::Fatal.as_str(), "FATAL");
    }
}
