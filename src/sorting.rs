use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::source::FileEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Date,
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    /// Apply a sort-button press: same field flips direction, a new field
    /// starts ascending.
    pub fn press(&mut self, field: SortField) {
        if self.field == field {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }

    /// Button label for a field; the active field shows its direction
    pub fn label(&self, field: SortField) -> &'static str {
        if self.field != field {
            return match field {
                SortField::Name => "Name",
                SortField::Date => "Date",
                SortField::Size => "Size",
            };
        }
        match (field, self.direction) {
            (SortField::Name, SortDirection::Asc) => "A → Z",
            (SortField::Name, SortDirection::Desc) => "Z → A",
            (SortField::Date, SortDirection::Asc) => "Oldest",
            (SortField::Date, SortDirection::Desc) => "Newest",
            (SortField::Size, SortDirection::Asc) => "Smallest",
            (SortField::Size, SortDirection::Desc) => "Largest",
        }
    }
}

fn compare(a: &FileEntry, b: &FileEntry, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Date => a.modified.cmp(&b.modified),
        SortField::Size => a.size.cmp(&b.size),
    }
}

/// Order entries by the given field and direction. Descending flips the
/// comparator sign rather than reversing the output, so equal keys keep
/// their relative order under the stable sort. Input is not mutated.
pub fn order(entries: &[FileEntry], field: SortField, direction: SortDirection) -> Vec<FileEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}
