use serde::Deserialize;

/// Breach object as returned by `breachedaccount` with `truncateResponse=false`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Breach {
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub breach_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data_classes: Vec<String>,
}

impl Breach {
    pub fn exposes_passwords(&self) -> bool {
        self.data_classes.iter().any(|c| c == "Passwords")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Paste {
    pub source: String,
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Body of a non-2xx response, e.g. `{"statusCode":429,"message":"..."}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
}
