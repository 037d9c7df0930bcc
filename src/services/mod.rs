pub mod crawler_data;
pub mod crawler_source;

pub use crawler_data::CrawlerDataService;
pub use crawler_source::CrawlerSourceService;

use tracing::debug;

use crate::config::UnchangedUpdate;
use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::Record;
use crate::store::Document;

/// Merge `fields` into record `id` and return the record as stored afterwards.
///
/// An empty field set skips the write. A write that matches nothing is a 404;
/// a write that matches but changes nothing is handled per `unchanged`.
pub(crate) async fn merge_update<T: Record>(
    db: &Database,
    id: &str,
    fields: Document,
    unchanged: UnchangedUpdate,
) -> AppResult<T> {
    let collection = db.collection::<T>();

    if !fields.is_empty() {
        let outcome = collection.update_by_id(id, fields).await?;
        debug!(
            "Update of {} {}: matched {}, modified {}",
            T::COLLECTION,
            id,
            outcome.matched_count,
            outcome.modified_count
        );

        if !outcome.is_matched() {
            return Err(AppError::NotFound(T::not_found_message(id)));
        }
        if !outcome.is_modified() && unchanged == UnchangedUpdate::NotFound {
            return Err(AppError::NotFound(T::not_found_message(id)));
        }
    }

    collection
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(T::not_found_message(id)))
}
