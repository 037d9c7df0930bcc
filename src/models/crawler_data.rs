use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{supplied_id, Record};
use crate::store::Document;
use crate::utils::id::IdGenerator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub meta_key: String,
    pub meta_value: Vec<String>,
    pub available: bool,
}

/// One item harvested by the crawler from a crawler source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerData {
    #[serde(alias = "_id")]
    pub id: String,
    /// Id of the owning crawler source
    pub source_id: String,
    pub source_name: String,
    pub topic: String,
    pub source_url: String,
    pub source_updated_at: Option<i64>,
    pub source_available: bool,
    pub title: String,
    pub content: String,
    pub featured_image: String,
    pub images: Option<Vec<String>>,
    pub metas: Option<Vec<Meta>>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub last_sync: Option<i64>,
    pub available: bool,
}

impl Record for CrawlerData {
    const COLLECTION: &'static str = "crawler_data";
    const KIND: &'static str = "Crawler data";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerDataForm {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub source_id: String,
    pub source_name: String,
    pub topic: String,
    pub source_url: String,
    pub source_updated_at: Option<i64>,
    pub source_available: bool,
    pub title: String,
    pub content: String,
    pub featured_image: String,
    pub images: Option<Vec<String>>,
    pub metas: Option<Vec<Meta>>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub last_sync: Option<i64>,
    pub available: bool,
}

impl CrawlerDataForm {
    pub fn into_data(self, ids: &dyn IdGenerator) -> CrawlerData {
        CrawlerData {
            id: supplied_id(self.id).unwrap_or_else(|| ids.generate()),
            source_id: self.source_id,
            source_name: self.source_name,
            topic: self.topic,
            source_url: self.source_url,
            source_updated_at: self.source_updated_at,
            source_available: self.source_available,
            title: self.title,
            content: self.content,
            featured_image: self.featured_image,
            images: self.images,
            metas: self.metas,
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_sync: self.last_sync,
            available: self.available,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerDataUpdateForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_updated_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metas: Option<Vec<Meta>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl CrawlerDataUpdateForm {
    pub fn to_fields(&self) -> Result<Document, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(fields) => Ok(fields),
            _ => Ok(Document::new()),
        }
    }
}
