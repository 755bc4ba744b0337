use std::fmt;

use crate::hibp::models::{Breach, Paste};
use crate::hibp::patterns;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    Breach,
    Paste,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::Breach => write!(f, "Breach"),
            FindingKind::Paste => write!(f, "Paste"),
        }
    }
}

/// Whether the matched source included passwords. Pastes never say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordExposure {
    Exposed,
    NotExposed,
    Unknown,
}

impl fmt::Display for PasswordExposure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordExposure::Exposed => write!(f, "True"),
            PasswordExposure::NotExposed => write!(f, "False"),
            PasswordExposure::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One breach or paste match for one email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub email: String,
    pub name: String,
    pub kind: FindingKind,
    pub date: String,
    pub has_passwords: PasswordExposure,
    pub url_or_id: String,
    pub title: String,
}

impl Finding {
    pub fn from_breach(email: &str, breach: &Breach) -> Self {
        let has_passwords = if breach.exposes_passwords() {
            PasswordExposure::Exposed
        } else {
            PasswordExposure::NotExposed
        };

        Self {
            email: email.to_string(),
            name: breach.name.clone(),
            kind: FindingKind::Breach,
            date: breach.breach_date.clone(),
            has_passwords,
            url_or_id: patterns::last_url(&breach.description)
                .unwrap_or_default()
                .to_string(),
            title: breach.title.clone(),
        }
    }

    pub fn from_paste(email: &str, paste: &Paste) -> Self {
        let date = paste
            .date
            .as_deref()
            .and_then(patterns::paste_date)
            .unwrap_or_default()
            .to_string();

        Self {
            email: email.to_string(),
            name: paste.source.clone(),
            kind: FindingKind::Paste,
            date,
            has_passwords: PasswordExposure::Unknown,
            url_or_id: paste.id.clone(),
            title: paste.title.clone().unwrap_or_default(),
        }
    }

    /// Columns written by the CSV exporter, in header order.
    pub fn csv_row(&self) -> [String; 6] {
        [
            self.email.clone(),
            self.name.clone(),
            self.kind.to_string(),
            self.date.clone(),
            self.has_passwords.to_string(),
            self.url_or_id.clone(),
        ]
    }

    /// Human-readable block used by the console summary.
    pub fn text_block(&self) -> String {
        let mut block = String::new();
        block.push_str(&format!("Email: {}\n", self.email));
        block.push_str(&format!("Type: {}\n", self.kind));
        block.push_str(&format!("Name: {}\n", self.name));
        if !self.title.is_empty() {
            block.push_str(&format!("Title: {}\n", self.title));
        }
        if !self.date.is_empty() {
            block.push_str(&format!("Date: {}\n", self.date));
        }
        block.push_str(&format!("Has Passwords: {}\n", self.has_passwords));
        match self.kind {
            FindingKind::Breach if !self.url_or_id.is_empty() => {
                block.push_str(&format!("URL: {}\n", self.url_or_id));
            }
            FindingKind::Paste => block.push_str(&format!("Paste ID: {}\n", self.url_or_id)),
            _ => {}
        }
        block
    }
}

/// Run-owned, append-only collection of findings.
#[derive(Debug, Default, Clone)]
pub struct Findings {
    items: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.items.push(finding);
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            self.push(finding);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.items.iter()
    }

    pub fn text_blocks(&self) -> Vec<String> {
        self.items.iter().map(Finding::text_block).collect()
    }
}
