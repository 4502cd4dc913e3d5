use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Editable fields of the transfer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FromAccount,
    ToAccount,
    Amount,
    Note,
    ScheduledDate,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FromAccount => "from",
            FormField::ToAccount => "to",
            FormField::Amount => "amount",
            FormField::Note => "note",
            FormField::ScheduledDate => "date",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{0}' (expected from, to, amount, note or date)")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "from" | "from_account" => Ok(FormField::FromAccount),
            "to" | "to_account" => Ok(FormField::ToAccount),
            "amount" => Ok(FormField::Amount),
            "note" => Ok(FormField::Note),
            "date" | "scheduled_date" => Ok(FormField::ScheduledDate),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Raw, user-entered transfer form state.
///
/// Values are kept exactly as typed; nothing is parsed until the form is
/// snapshotted into a [`TransferRequest`] and submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferForm {
    pub from_account: String,
    pub to_account: String,
    pub amount: String,
    pub note: String,
    pub scheduled_date: String,
}

impl TransferForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::FromAccount => self.from_account = value,
            FormField::ToAccount => self.to_account = value,
            FormField::Amount => self.amount = value,
            FormField::Note => self.note = value,
            FormField::ScheduledDate => self.scheduled_date = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FromAccount => &self.from_account,
            FormField::ToAccount => &self.to_account,
            FormField::Amount => &self.amount,
            FormField::Note => &self.note,
            FormField::ScheduledDate => &self.scheduled_date,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Freeze the current values into a request.
    pub fn to_request(&self) -> TransferRequest {
        TransferRequest {
            from: self.from_account.clone(),
            to: self.to_account.clone(),
            amount: self.amount.clone(),
            note: non_empty(&self.note),
            scheduled_date: non_empty(&self.scheduled_date),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Immutable snapshot of the form at the moment of submission.
///
/// This is also the shape of one entry in a replay file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
}

impl TransferRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount: amount.into(),
            note: None,
            scheduled_date: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = non_empty(&note.into());
        self
    }

    pub fn with_scheduled_date(mut self, date: impl Into<String>) -> Self {
        self.scheduled_date = non_empty(&date.into());
        self
    }

    /// The note, with an empty string treated as absent.
    pub fn note_text(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.is_empty())
    }

    /// The scheduled date, with an empty string treated as absent.
    pub fn scheduled_for(&self) -> Option<&str> {
        self.scheduled_date.as_deref().filter(|d| !d.is_empty())
    }
}
