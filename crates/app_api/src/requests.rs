use serde::Deserialize;

/// Autoload flags arrive as strings from forms, but JSON clients may send
/// booleans or 0/1.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AutoloadInput {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl AutoloadInput {
    pub fn as_raw(&self) -> String {
        match self {
            Self::Flag(flag) => flag.to_string(),
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OptionNameRequest {
    pub option_name: String,
}

#[derive(Debug, Deserialize)]
pub struct OptionNamesRequest {
    pub option_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAutoloadRequest {
    pub option_name: String,
    pub autoload: AutoloadInput,
}

#[derive(Debug, Deserialize)]
pub struct SetAutoloadOptionsRequest {
    pub option_names: Vec<String>,
    pub autoload: AutoloadInput,
}
