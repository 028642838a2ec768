use crate::error::{RaffleError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Class shown when a participant is added without one
pub const DEFAULT_CLASS: &str = "N/A";

static TICKET_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid ticket regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: u64,
    pub name: String,
    pub class: String,
    /// Number of tickets held in the draw
    pub weight: u32,
}

impl Participant {
    fn matches(&self, name: &str, class: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
            && self.class.to_lowercase() == class.to_lowercase()
    }
}

/// One `name[, class[, tickets]]` line of participant input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEntry {
    pub name: String,
    pub class: String,
    pub weight: u32,
}

impl ParticipantEntry {
    /// Parse a single input line. Blank lines yield `None`; a line whose name
    /// field is empty still parses and is rejected when added.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut fields = line.split(',').map(str::trim);
        let name = fields.next().unwrap_or_default();
        let class = fields.next().unwrap_or_default();
        let tickets = fields.next().unwrap_or_default();

        Some(ParticipantEntry {
            name: name.to_string(),
            class: normalize_class(class),
            weight: parse_tickets(tickets),
        })
    }
}

/// Parse a ticket count the lenient way form inputs do: a leading integer is
/// taken, anything non-numeric or not positive becomes 1.
pub fn parse_tickets(input: &str) -> u32 {
    let Some(caps) = TICKET_PREFIX.captures(input) else {
        return 1;
    };
    let digits = &caps[1];
    if digits.starts_with('-') {
        return 1;
    }

    let value = digits
        .trim_start_matches('+')
        .parse::<u64>()
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .unwrap_or(u32::MAX);

    value.max(1)
}

fn normalize_class(class: &str) -> String {
    let class = class.trim();
    if class.is_empty() {
        DEFAULT_CLASS.to_string()
    } else {
        class.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Created { id: u64 },
    Merged { id: u64, total: u32 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSummary {
    pub created: usize,
    pub merged: usize,
    pub skipped: usize,
}

impl BulkSummary {
    /// Status line in the wording the add form uses
    pub fn message(&self) -> String {
        let mut message = format!("Added {} new participant(s).", self.created);
        if self.merged > 0 {
            message.push_str(&format!(
                " Updated tickets for {} existing participant(s).",
                self.merged
            ));
        }
        message
    }
}

#[derive(Debug, Default, Clone)]
pub struct Roster {
    entries: Vec<Participant>,
    next_id: u64,
}

impl Roster {
    pub fn new() -> Self {
        Roster {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a participant, or add tickets to an existing one with the same
    /// name and class (case-insensitive).
    pub fn add_or_merge(&mut self, name: &str, class: &str, weight: u32) -> Result<AddOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RaffleError::EmptyName);
        }
        let class = normalize_class(class);
        let weight = weight.max(1);

        if let Some(existing) = self.entries.iter_mut().find(|p| p.matches(name, &class)) {
            existing.weight = existing.weight.saturating_add(weight);
            return Ok(AddOutcome::Merged {
                id: existing.id,
                total: existing.weight,
            });
        }

        let id = self.allocate_id();
        self.entries.push(Participant {
            id,
            name: name.to_string(),
            class,
            weight,
        });
        Ok(AddOutcome::Created { id })
    }

    pub fn add_entry(&mut self, entry: &ParticipantEntry) -> Result<AddOutcome> {
        self.add_or_merge(&entry.name, &entry.class, entry.weight)
    }

    /// Add every line of `lines`, skipping blanks and lines without a name
    pub fn bulk_add<I, S>(&mut self, lines: I) -> BulkSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = BulkSummary::default();

        for line in lines {
            let Some(entry) = ParticipantEntry::parse_line(line.as_ref()) else {
                continue;
            };
            match self.add_entry(&entry) {
                Ok(AddOutcome::Created { .. }) => summary.created += 1,
                Ok(AddOutcome::Merged { .. }) => summary.merged += 1,
                Err(_) => summary.skipped += 1,
            }
        }

        summary
    }

    pub fn remove(&mut self, id: u64) -> Option<Participant> {
        let index = self.entries.iter().position(|p| p.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Take one ticket from a participant, removing them once none are left.
    /// Returns the remaining ticket count.
    pub fn take_ticket(&mut self, id: u64) -> Option<u32> {
        let index = self.entries.iter().position(|p| p.id == id)?;
        let participant = &mut self.entries[index];
        participant.weight = participant.weight.saturating_sub(1);
        let remaining = participant.weight;
        if remaining == 0 {
            self.entries.remove(index);
        }
        Some(remaining)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_tickets(&self) -> u64 {
        self.entries.iter().map(|p| u64::from(p.weight)).sum()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }
}
