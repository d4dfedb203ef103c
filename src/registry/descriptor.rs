//! Metric family identity.
//!
//! # Responsibilities
//! - Hold name, help text, kind and ordered label dimensions
//! - Validate names against the exposition grammar
//! - Check caller-supplied label values against the declared dimensions

use std::fmt;

use crate::error::RegistryError;

/// The kind of a metric family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Monotonically non-decreasing value.
    Counter,
    /// Point-in-time value that moves freely.
    Gauge,
}

impl MetricKind {
    /// Name used on the `# TYPE` line.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a metric family. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    name: String,
    help: String,
    kind: MetricKind,
    label_names: Vec<String>,
}

impl MetricDescriptor {
    /// Build a descriptor, validating the metric name and every label name.
    pub fn new(
        name: &str,
        help: &str,
        kind: MetricKind,
        label_names: &[&str],
    ) -> Result<Self, RegistryError> {
        if !is_valid_metric_name(name) {
            return Err(RegistryError::InvalidName {
                what: "metric",
                name: name.to_string(),
            });
        }

        for (i, label) in label_names.iter().enumerate() {
            // Duplicate dimensions would render two identical keys on one line.
            if !is_valid_label_name(label) || label_names[..i].contains(label) {
                return Err(RegistryError::InvalidName {
                    what: "label",
                    name: label.to_string(),
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            help: help.to_string(),
            kind,
            label_names: label_names.iter().map(|l| l.to_string()).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Declared label dimensions, in declaration order.
    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    /// True when `kind` and `label_names` match this descriptor exactly.
    /// Help text is documentation only and not part of the signature.
    pub fn same_signature(&self, kind: MetricKind, label_names: &[&str]) -> bool {
        self.kind == kind
            && self.label_names.len() == label_names.len()
            && self
                .label_names
                .iter()
                .zip(label_names)
                .all(|(a, b)| a == b)
    }

    /// Fail fast if the number of label values does not match the dimensions.
    pub fn check_arity(&self, actual: usize) -> Result<(), RegistryError> {
        if actual != self.label_names.len() {
            return Err(RegistryError::LabelArity {
                name: self.name.clone(),
                expected: self.label_names.len(),
                actual,
            });
        }
        Ok(())
    }

    /// Turn `(label, value)` pairs into positional label values.
    ///
    /// Pairs may come in any order but must name every declared dimension
    /// exactly once.
    pub fn label_values_from_pairs<'a>(
        &self,
        pairs: &[(&str, &'a str)],
    ) -> Result<Vec<&'a str>, RegistryError> {
        self.check_arity(pairs.len())?;

        let mut values: Vec<Option<&'a str>> = vec![None; self.label_names.len()];
        for (label, value) in pairs {
            let pos = self
                .label_names
                .iter()
                .position(|l| l == label)
                .ok_or_else(|| RegistryError::UnknownLabel {
                    name: self.name.clone(),
                    label: label.to_string(),
                })?;
            values[pos] = Some(*value);
        }

        // Same length and every label known: a missing slot means a repeated label.
        values
            .into_iter()
            .zip(&self.label_names)
            .map(|(v, label)| {
                v.ok_or_else(|| RegistryError::UnknownLabel {
                    name: self.name.clone(),
                    label: label.clone(),
                })
            })
            .collect()
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, with the `__` prefix reserved.
fn is_valid_label_name(name: &str) -> bool {
    if name.starts_with("__") {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
