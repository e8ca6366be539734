use std::collections::BTreeSet;

/// Severity of a violation. The discriminants are part of the report
/// contract, not an implementation detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Severity {
    /// Composition skew at a read position.
    Info = 0,
    /// Separator, header, read-count or quality-length anomaly.
    Structural = 1,
    /// A record was cut off part-way through.
    Truncation = 2,
    /// The underlying stream could not be read or decoded.
    StreamFault = 3,
}

/// Severity-collapsing set of violation messages for one file.
///
/// Only messages recorded at the highest severity ever seen are kept: a
/// recording above the current level discards everything gathered so far,
/// one below it is a no-op. So a fatal stream fault is never buried under
/// cosmetic composition findings. Within the surviving level, messages form
/// an ordered, deduplicated set.
#[derive(Debug)]
pub struct ViolationLedger {
    level: Severity,
    messages: BTreeSet<String>,
}

impl ViolationLedger {
    pub fn new() -> Self {
        Self {
            level: Severity::Info,
            messages: BTreeSet::new(),
        }
    }

    pub fn record(&mut self, level: Severity, message: impl Into<String>) {
        if level > self.level {
            self.messages.clear();
            self.level = level;
        }
        if level == self.level {
            self.messages.insert(message.into());
        }
    }

    /// Highest severity recorded so far (`Info` while empty).
    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Surviving messages in lexicographic order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}

impl Default for ViolationLedger {
    fn default() -> Self {
        Self::new()
    }
}
