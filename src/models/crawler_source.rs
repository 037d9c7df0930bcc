use serde::{Deserialize, Serialize};

use super::{supplied_id, Record};
use crate::store::Document;
use crate::utils::id::IdGenerator;

/// A search topic tracked for a crawler source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub topic: String,
    pub description: String,
    /// Search/query URL handed to the crawler
    pub request_url: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub last_sync: Option<i64>,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerSource {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub topics: Option<Vec<Topic>>,
    pub source_domain: String,
    pub crawler_schema: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub schedule_sync: Option<i64>,
    pub last_sync: Option<i64>,
    pub enabled: bool,
}

impl Record for CrawlerSource {
    const COLLECTION: &'static str = "crawler_source";
    const KIND: &'static str = "Crawler source";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerSourceForm {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub topics: Option<Vec<Topic>>,
    pub source_domain: String,
    pub crawler_schema: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub schedule_sync: Option<i64>,
    pub last_sync: Option<i64>,
    pub enabled: bool,
}

impl CrawlerSourceForm {
    /// Build the record to store, drawing a fresh id when none was supplied
    pub fn into_source(self, ids: &dyn IdGenerator) -> CrawlerSource {
        CrawlerSource {
            id: supplied_id(self.id).unwrap_or_else(|| ids.generate()),
            name: self.name,
            description: self.description,
            topics: self.topics,
            source_domain: self.source_domain,
            crawler_schema: self.crawler_schema,
            created_at: self.created_at,
            updated_at: self.updated_at,
            schedule_sync: self.schedule_sync,
            last_sync: self.last_sync,
            enabled: self.enabled,
        }
    }
}

/// Partial update; absent and null fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerSourceUpdateForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Topic>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawler_schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_sync: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl CrawlerSourceUpdateForm {
    /// The non-null fields of this form, keyed by their wire names
    pub fn to_fields(&self) -> Result<Document, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(fields) => Ok(fields),
            _ => Ok(Document::new()),
        }
    }
}
