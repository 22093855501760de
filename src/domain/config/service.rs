use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub enum SourceFormat {
    #[serde(rename = "revolut")]
    Revolut,
}

impl SourceFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "revolut" => Some(SourceFormat::Revolut),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub source_format: SourceFormat,
    pub max_upload_size: u64,
    pub default_iban: Option<String>,
}
