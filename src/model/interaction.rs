use chrono::NaiveDate;

/// One observed interaction. `author` is the title-side key and may be
/// missing in the raw table; `counterpart` is the body-side key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRow {
    pub day: NaiveDate,
    pub author: Option<String>,
    pub counterpart: String,
}

impl InteractionRow {
    pub fn new(day: NaiveDate, author: Option<&str>, counterpart: &str) -> Self {
        Self {
            day,
            author: author.map(str::to_string),
            counterpart: counterpart.to_string(),
        }
    }
}
