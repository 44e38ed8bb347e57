//! Cascading deletion over the record graph.
//!
//! State → cities → places → reviews, user → places and reviews,
//! place → reviews. Deleting an amenity removes no other record but
//! unlinks it from every place that references it.

use std::collections::{HashSet, VecDeque};

use hbnb_domain::error::HbnbError;
use hbnb_domain::id::AmenityId;
use hbnb_domain::record::{Kind, Record, RecordKey};
use uuid::Uuid;

use crate::ports::{Objects, Storage};

/// Delete `root` and everything that depends on it, then save.
pub(super) async fn delete<S: Storage>(storage: &S, root: RecordKey) -> Result<(), HbnbError> {
    let objects = storage.all(None).await?;
    let doomed = dependents(&objects, root);

    // children before parents so foreign keys never dangle mid-flight
    for key in doomed.iter().rev() {
        storage.delete(*key).await?;
    }

    if root.kind == Kind::Amenity {
        for record in objects.values() {
            let Record::Place(place) = record else {
                continue;
            };
            if doomed.contains(&record.key()) {
                continue;
            }
            let mut place = place.clone();
            if place.unlink_amenity(AmenityId::from_uuid(root.id)) {
                storage.stage(Record::Place(place)).await?;
            }
        }
    }

    storage.save().await?;
    tracing::debug!(%root, removed = doomed.len(), "cascade delete");
    Ok(())
}

/// `root` followed by every transitive dependent, breadth first.
fn dependents(objects: &Objects, root: RecordKey) -> Vec<RecordKey> {
    let mut order = vec![root];
    let mut seen = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);

    while let Some(parent) = queue.pop_front() {
        for record in objects.values() {
            if !owned_by(record, parent) {
                continue;
            }
            let key = record.key();
            if seen.insert(key) {
                order.push(key);
                queue.push_back(key);
            }
        }
    }
    order
}

fn owned_by(record: &Record, parent: RecordKey) -> bool {
    let is = |id: Uuid| id == parent.id;
    match (record, parent.kind) {
        (Record::City(city), Kind::State) => is(city.state_id.into()),
        (Record::Place(place), Kind::City) => is(place.city_id.into()),
        (Record::Place(place), Kind::User) => is(place.user_id.into()),
        (Record::Review(review), Kind::Place) => is(review.place_id.into()),
        (Record::Review(review), Kind::User) => is(review.user_id.into()),
        _ => false,
    }
}
