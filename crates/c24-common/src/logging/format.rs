//! Tab-delimited log line format
//!
//! Every record becomes one line of seven tab-separated columns:
//! timestamp, logger name, level, thread, call site, line, message.
//! Tabs and line breaks inside values are flattened to spaces so a line
//! always splits into exactly seven fields.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Timestamp layout of the first column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Header line for a layout pattern: the pattern minus its placeholder punctuation
pub fn header_line(layout: &str) -> String {
    layout.chars().filter(|c| !matches!(c, '$' | '(' | ')' | '%')).collect()
}

/// Event formatter producing the seven-column line
///
/// The header names the fifth column `funcName`, but `tracing` records no
/// function name. That column holds the emitting module path instead, or the
/// event target when the module path is unknown.
#[derive(Debug, Clone)]
pub struct TabFormat {
    name: String,
}

impl TabFormat {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl<S, N> FormatEvent<S, N> for TabFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        let thread = std::thread::current();
        let thread_name = match thread.name() {
            Some(name) => name.to_string(),
            None => format!("{:?}", thread.id()),
        };

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            chrono::Local::now().format(TIMESTAMP_FORMAT),
            flatten(&self.name),
            meta.level(),
            flatten(&thread_name),
            flatten(meta.module_path().unwrap_or_else(|| meta.target())),
            meta.line().unwrap_or(0),
            flatten(&visitor.finish()),
        )
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

fn flatten(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LOG_FORMAT;

    #[test]
    fn test_header_strips_placeholders() {
        let header = header_line(LOG_FORMAT);
        assert_eq!(
            header,
            "asctimes\tnames\tlevelnames\tthreadNames\tfuncNames\tlinenod\tmessages"
        );
        assert_eq!(header.split('\t').count(), 7);
    }

    #[test]
    fn test_flatten() {
        assert_eq!(flatten("a\tb\nc\r\nd"), "a b c  d");
    }

    #[test]
    fn test_visitor_joins_message_and_fields() {
        let visitor = LineVisitor {
            message: "bound".to_string(),
            fields: "port=9123".to_string(),
        };
        assert_eq!(visitor.finish(), "bound port=9123");
        assert_eq!(LineVisitor::default().finish(), "");
    }
}
