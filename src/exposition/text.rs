//! Text exposition format, version 0.0.4.
//!
//! ```text
//! # HELP <name> <help>
//! # TYPE <name> <counter|gauge>
//! <name>{<label>="<value>",...} <value>
//! ```
//!
//! Label values are escaped (`\\`, `\"`, `\n`), never rejected.

use std::fmt::Write;

use crate::registry::{FamilySnapshot, LabelSet};

/// Content type served alongside the encoded text.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Encode family snapshots, one block per family, in the given order.
pub fn encode(families: &[FamilySnapshot]) -> String {
    let mut output = String::with_capacity(families.len() * 128);

    for family in families {
        let descriptor = &family.descriptor;
        let name = descriptor.name();

        writeln!(output, "# HELP {} {}", name, escape_help(descriptor.help())).ok();
        writeln!(output, "# TYPE {} {}", name, descriptor.kind().as_str()).ok();

        for sample in &family.samples {
            writeln!(
                output,
                "{}{} {}",
                name,
                format_labels(descriptor.label_names(), &sample.labels),
                format_value(sample.value)
            )
            .ok();
        }
    }

    output
}

/// `{k="v",...}`, or nothing for an unlabeled series.
fn format_labels(names: &[String], labels: &LabelSet) -> String {
    if names.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = names
        .iter()
        .zip(labels.values())
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
        .collect();

    format!("{{{}}}", parts.join(","))
}

fn escape_label_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// HELP text only escapes backslash and newline.
fn escape_help(help: &str) -> String {
    let mut result = String::with_capacity(help.len());
    for c in help.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// Integral values print without a decimal point; everything else uses the
/// shortest representation that parses back to the same `f64`.
fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else {
        format!("{}", value)
    }
}
