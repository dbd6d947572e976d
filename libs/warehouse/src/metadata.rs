//! Lookup of stored message-collection metadata.
//!
//! Each database in the warehouse keeps a metadata collection with one entry
//! per stored message collection, documents of the form
//! `{name: <collection>, type: <message type>}`.

use mongodb::{
    Client,
    bson::{Document, doc},
};

use crate::common::{WarehouseError, WarehouseResult};

/// Name of the per-database metadata collection.
pub const MESSAGE_COLLECTIONS: &str = "ros_message_collections";

/// The message type string recorded for `collection` in `database`.
///
/// Returns [`WarehouseError::CollectionNotFound`] when no entry matches, and
/// [`WarehouseError::MissingMessageType`] when the entry carries no type
/// string.
pub async fn message_type(
    client: &Client,
    database: &str,
    collection: &str,
) -> WarehouseResult<String> {
    let entries = client
        .database(database)
        .collection::<Document>(MESSAGE_COLLECTIONS);

    let entry = entries
        .find_one(doc! { "name": collection })
        .await?
        .ok_or_else(|| WarehouseError::CollectionNotFound {
            database: database.to_string(),
            collection: collection.to_string(),
        })?;

    let message_type =
        entry
            .get_str("type")
            .map_err(|_| WarehouseError::MissingMessageType {
                collection: collection.to_string(),
            })?;

    Ok(message_type.to_string())
}
