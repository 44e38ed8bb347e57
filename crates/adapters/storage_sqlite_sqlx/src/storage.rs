//! `SQLite` implementation of [`Storage`].

use hbnb_app::ports::{Objects, Storage};
use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::error::HbnbError;
use hbnb_domain::place::Place;
use hbnb_domain::record::{Kind, Model, Record, RecordKey};
use hbnb_domain::review::Review;
use hbnb_domain::state::State;
use hbnb_domain::user::User;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::pool::Database;
use crate::tables::{self, Table, amenities, cities, places, reviews, states, users};

/// `SQLite`-backed storage with a single shared session.
///
/// Every statement runs under the session lock, so at most one pooled
/// connection is in use at any time.
pub struct SqliteStorage {
    pool: SqlitePool,
    session: Mutex<Option<Transaction<'static, Sqlite>>>,
}

impl SqliteStorage {
    /// Create a storage using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            session: Mutex::new(None),
        }
    }

    /// Create a storage from an initialized [`Database`].
    #[must_use]
    pub fn from_database(database: Database) -> Self {
        Self::new(database.into_pool())
    }
}

/// Open the session if needed and hand out its transaction.
async fn session<'a>(
    pool: &SqlitePool,
    slot: &'a mut Option<Transaction<'static, Sqlite>>,
) -> Result<&'a mut Transaction<'static, Sqlite>, sqlx::Error> {
    let tx = match slot.take() {
        Some(tx) => tx,
        None => pool.begin().await?,
    };
    Ok(slot.insert(tx))
}

fn extend<M: Model>(objects: &mut Objects, models: Vec<M>) {
    objects.extend(models.into_iter().map(|model| (model.key(), model.into_record())));
}

async fn load_kind(
    conn: &mut SqliteConnection,
    kind: Kind,
    objects: &mut Objects,
) -> Result<(), sqlx::Error> {
    match kind {
        Kind::Amenity => extend(objects, tables::fetch_all::<Amenity>(conn).await?),
        Kind::City => extend(objects, tables::fetch_all::<City>(conn).await?),
        Kind::Place => {
            let mut found = tables::fetch_all::<Place>(conn).await?;
            places::attach_amenities(conn, &mut found).await?;
            extend(objects, found);
        }
        Kind::Review => extend(objects, tables::fetch_all::<Review>(conn).await?),
        Kind::State => extend(objects, tables::fetch_all::<State>(conn).await?),
        Kind::User => extend(objects, tables::fetch_all::<User>(conn).await?),
    }
    Ok(())
}

async fn load_all(
    conn: &mut SqliteConnection,
    kind: Option<Kind>,
) -> Result<Objects, sqlx::Error> {
    let mut objects = Objects::new();
    match kind {
        Some(kind) => load_kind(conn, kind, &mut objects).await?,
        None => {
            for kind in Kind::ALL {
                load_kind(conn, kind, &mut objects).await?;
            }
        }
    }
    Ok(objects)
}

async fn load_one<T: Table>(
    conn: &mut SqliteConnection,
    key: RecordKey,
) -> Result<Option<Record>, sqlx::Error> {
    let found = tables::fetch_one::<T>(conn, key.id).await?;
    Ok(found.map(Model::into_record))
}

async fn load(conn: &mut SqliteConnection, key: RecordKey) -> Result<Option<Record>, sqlx::Error> {
    match key.kind {
        Kind::Amenity => load_one::<Amenity>(conn, key).await,
        Kind::City => load_one::<City>(conn, key).await,
        Kind::Place => {
            let Some(place) = tables::fetch_one::<Place>(conn, key.id).await? else {
                return Ok(None);
            };
            let mut found = [place];
            places::attach_amenities(conn, &mut found).await?;
            let [place] = found;
            Ok(Some(place.into_record()))
        }
        Kind::Review => load_one::<Review>(conn, key).await,
        Kind::State => load_one::<State>(conn, key).await,
        Kind::User => load_one::<User>(conn, key).await,
    }
}

async fn write(conn: &mut SqliteConnection, record: &Record) -> Result<(), sqlx::Error> {
    match record {
        Record::Amenity(amenity) => amenities::upsert(conn, amenity).await,
        Record::City(city) => cities::upsert(conn, city).await,
        Record::Place(place) => places::upsert(conn, place).await,
        Record::Review(review) => reviews::upsert(conn, review).await,
        Record::State(state) => states::upsert(conn, state).await,
        Record::User(user) => users::upsert(conn, user).await,
    }
}

impl Storage for SqliteStorage {
    async fn all(&self, kind: Option<Kind>) -> Result<Objects, HbnbError> {
        let mut slot = self.session.lock().await;
        let objects = match slot.as_mut() {
            Some(tx) => load_all(tx, kind).await,
            None => {
                let mut conn = self.pool.acquire().await.map_err(StorageError::from)?;
                load_all(&mut conn, kind).await
            }
        }
        .map_err(StorageError::from)?;
        Ok(objects)
    }

    async fn get(&self, key: RecordKey) -> Result<Option<Record>, HbnbError> {
        let mut slot = self.session.lock().await;
        let record = match slot.as_mut() {
            Some(tx) => load(tx, key).await,
            None => {
                let mut conn = self.pool.acquire().await.map_err(StorageError::from)?;
                load(&mut conn, key).await
            }
        }
        .map_err(StorageError::from)?;
        Ok(record)
    }

    async fn count(&self, kind: Option<Kind>) -> Result<usize, HbnbError> {
        let kinds = kind.map_or(Kind::ALL.to_vec(), |kind| vec![kind]);
        let mut slot = self.session.lock().await;
        let mut total = 0;
        match slot.as_mut() {
            Some(tx) => {
                for kind in kinds {
                    total += tables::count(tx, kind).await.map_err(StorageError::from)?;
                }
            }
            None => {
                let mut conn = self.pool.acquire().await.map_err(StorageError::from)?;
                for kind in kinds {
                    total += tables::count(&mut conn, kind)
                        .await
                        .map_err(StorageError::from)?;
                }
            }
        }
        Ok(total)
    }

    async fn stage(&self, record: Record) -> Result<(), HbnbError> {
        let mut slot = self.session.lock().await;
        let tx = session(&self.pool, &mut slot)
            .await
            .map_err(StorageError::from)?;
        write(tx, &record).await.map_err(StorageError::from)?;
        Ok(())
    }

    async fn save(&self) -> Result<(), HbnbError> {
        let mut slot = self.session.lock().await;
        if let Some(tx) = slot.take() {
            tx.commit().await.map_err(StorageError::from)?;
        }
        Ok(())
    }

    async fn delete(&self, key: RecordKey) -> Result<(), HbnbError> {
        let mut slot = self.session.lock().await;
        let tx = session(&self.pool, &mut slot)
            .await
            .map_err(StorageError::from)?;
        tables::delete(tx, key.kind, key.id)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    async fn close(&self) -> Result<(), HbnbError> {
        let mut slot = self.session.lock().await;
        if let Some(tx) = slot.take() {
            tracing::debug!("rolling back unsaved changes");
            tx.rollback().await.map_err(StorageError::from)?;
        }
        Ok(())
    }
}
