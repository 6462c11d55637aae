use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub u32);

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Abierto,
    #[serde(rename = "En Progreso")]
    EnProgreso,
    Resuelto,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Abierto,
        TicketStatus::EnProgreso,
        TicketStatus::Resuelto,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Abierto => "Abierto",
            TicketStatus::EnProgreso => "En Progreso",
            TicketStatus::Resuelto => "Resuelto",
        }
    }

    /// The next state in the workflow, wrapping back to open
    pub fn next(self) -> TicketStatus {
        match self {
            TicketStatus::Abierto => TicketStatus::EnProgreso,
            TicketStatus::EnProgreso => TicketStatus::Resuelto,
            TicketStatus::Resuelto => TicketStatus::Abierto,
        }
    }

    /// Parse a status name. Accepts `en-progreso`/`progreso` for shell use.
    pub fn parse(s: &str) -> Option<TicketStatus> {
        match s.trim().to_lowercase().as_str() {
            "abierto" | "open" => Some(TicketStatus::Abierto),
            "en progreso" | "en-progreso" | "progreso" | "progress" => {
                Some(TicketStatus::EnProgreso)
            }
            "resuelto" | "resolved" => Some(TicketStatus::Resuelto),
            _ => None,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A support ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when opening a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub department_name: Option<String>,
    pub status: TicketStatus,
}

impl Default for NewTicket {
    fn default() -> Self {
        NewTicket {
            title: String::new(),
            description: String::new(),
            department_name: None,
            status: TicketStatus::Abierto,
        }
    }
}

impl NewTicket {
    pub(crate) fn into_ticket(self, id: TicketId, created_at: DateTime<Utc>) -> Ticket {
        Ticket {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
            department_name: self
                .department_name
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            created_at,
        }
    }
}
