use std::fmt;

mod tests;

/// One (state, city) record. An empty `city` marks a state that was added
/// without any city yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub state: String,
    pub city: String,
}

impl Entry {
    pub fn new(state: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            city: city.into(),
        }
    }

    pub fn has_city(&self) -> bool {
        !self.city.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    State,
    City,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterError {
    EmptyInput(Field),
    NoStateSelected,
    DuplicateState,
    DuplicateCity,
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::EmptyInput(Field::State) => {
                write!(f, "State name cannot be empty.")
            }
            RosterError::EmptyInput(Field::City) => {
                write!(f, "City name cannot be empty.")
            }
            RosterError::NoStateSelected => write!(f, "Please select a state."),
            RosterError::DuplicateState => write!(f, "This state already exists."),
            RosterError::DuplicateCity => {
                write!(f, "This city already exists in the selected state.")
            }
        }
    }
}

impl std::error::Error for RosterError {}

pub type Result<T> = std::result::Result<T, RosterError>;

/// Outcome of [`Roster::edit_city`]. A missing or blank proposal is not an
/// error; the edit is simply skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityEdit {
    Applied,
    Skipped,
}

/// Ordered collection of entries. Entries keep insertion order; the only
/// in-place mutations are a city rename and removal by position.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<Entry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// The roster every session starts from.
    pub fn seeded() -> Self {
        Self {
            entries: vec![
                Entry::new("California", "Los Angeles"),
                Entry::new("Texas", "Houston"),
                Entry::new("New York", "New York City"),
                Entry::new("Florida", "Miami"),
                Entry::new("Illinois", "Chicago"),
            ],
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Distinct state names in first-occurrence order. Deduplication is an
    /// exact string match; two spellings of a state that differ only in case
    /// are listed separately.
    pub fn unique_states(&self) -> Vec<&str> {
        let mut states: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !states.contains(&entry.state.as_str()) {
                states.push(entry.state.as_str());
            }
        }
        states
    }

    /// Appends a new state with an empty city placeholder. The stored name is
    /// the trimmed input with its casing intact; the duplicate check is
    /// case-insensitive.
    pub fn add_state(&mut self, name: &str) -> Result<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RosterError::EmptyInput(Field::State));
        }
        let lowered = trimmed.to_lowercase();
        if self
            .unique_states()
            .iter()
            .any(|state| state.to_lowercase() == lowered)
        {
            return Err(RosterError::DuplicateState);
        }
        tracing::debug!(state = %trimmed, "state added");
        self.entries.push(Entry::new(trimmed, ""));
        Ok(())
    }

    /// Appends a city under `selected_state`. The selection is taken as-is:
    /// if it no longer matches any entry the state is effectively re-created,
    /// which mirrors how a stale dropdown selection behaves.
    pub fn add_city(&mut self, selected_state: &str, city: &str) -> Result<()> {
        if selected_state.is_empty() {
            return Err(RosterError::NoStateSelected);
        }
        let trimmed = city.trim();
        if trimmed.is_empty() {
            return Err(RosterError::EmptyInput(Field::City));
        }
        let state_lowered = selected_state.to_lowercase();
        let city_lowered = trimmed.to_lowercase();
        let duplicate = self.entries.iter().any(|entry| {
            entry.state.to_lowercase() == state_lowered
                && entry.city.to_lowercase() == city_lowered
        });
        if duplicate {
            return Err(RosterError::DuplicateCity);
        }
        tracing::debug!(state = %selected_state, city = %trimmed, "city added");
        self.entries.push(Entry::new(selected_state, trimmed));
        Ok(())
    }

    /// Renames the city of the entry at `index`. A `None` or blank proposal
    /// skips the edit without touching anything. The duplicate check covers
    /// every other entry in the same state, case-insensitively, so renaming a
    /// city to itself (or to a different casing of itself) is allowed.
    ///
    /// `index` must be in range.
    pub fn edit_city(&mut self, index: usize, proposal: Option<&str>) -> Result<CityEdit> {
        let Some(proposal) = proposal else {
            return Ok(CityEdit::Skipped);
        };
        let trimmed = proposal.trim();
        if trimmed.is_empty() {
            return Ok(CityEdit::Skipped);
        }
        let state_lowered = self.entries[index].state.to_lowercase();
        let city_lowered = trimmed.to_lowercase();
        let duplicate = self.entries.iter().enumerate().any(|(i, entry)| {
            i != index
                && entry.city.to_lowercase() == city_lowered
                && entry.state.to_lowercase() == state_lowered
        });
        if duplicate {
            return Err(RosterError::DuplicateCity);
        }
        tracing::debug!(index, city = %trimmed, "city renamed");
        self.entries[index].city = trimmed.to_string();
        Ok(CityEdit::Applied)
    }

    /// Removes and returns the entry at `index`, shifting later entries down.
    /// Callers are expected to have confirmed the removal already; an
    /// out-of-range index is a bug, not user input, and panics.
    pub fn remove(&mut self, index: usize) -> Entry {
        let entry = self.entries.remove(index);
        tracing::debug!(state = %entry.state, city = %entry.city, "entry removed");
        entry
    }
}
