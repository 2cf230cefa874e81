//! Attendee list normalization.

use serde_json::Value;

/// Deduplicated attendee addresses in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendeeSet(Vec<String>);

impl AttendeeSet {
    /// Add an address unless it is already present. Returns true if added.
    pub fn insert(&mut self, address: &str) -> bool {
        if self.0.iter().any(|a| a == address) {
            return false;
        }
        self.0.push(address.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Normalize raw attendee input into an [`AttendeeSet`].
///
/// Accepts a list of strings or one string delimited by `,` or `;`.
/// An item counts as an address when it contains `@`; the calendar service
/// rejects anything else it cannot deliver to.
pub fn parse_attendees(raw: Option<&Value>) -> AttendeeSet {
    let candidates: Vec<&str> = match raw {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(s)) => s.split([',', ';']).collect(),
        _ => Vec::new(),
    };

    let mut set = AttendeeSet::default();
    for candidate in candidates {
        let candidate = candidate.trim();
        if candidate.contains('@') {
            set.insert(candidate);
        }
    }
    set
}
