//! Record model: the vocabulary of the storage façade.
//!
//! Every persisted entity is addressed by a [`RecordKey`] (`"Kind.id"`) and
//! travels through storage as a [`Record`], a tagged union of the six
//! entity types. The [`Model`] trait links each concrete entity type to its
//! [`Kind`] so callers can work with typed values on top of the untyped
//! façade.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::amenity::Amenity;
use crate::city::City;
use crate::place::Place;
use crate::review::Review;
use crate::state::State;
use crate::user::User;

/// The entity types known to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Kind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl Kind {
    /// Every kind, in key order.
    pub const ALL: [Kind; 6] = [
        Kind::Amenity,
        Kind::City,
        Kind::Place,
        Kind::Review,
        Kind::State,
        Kind::User,
    ];

    /// Class name used in record keys and the `__class__` tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amenity => "Amenity",
            Self::City => "City",
            Self::Place => "Place",
            Self::Review => "Review",
            Self::State => "State",
            Self::User => "User",
        }
    }

    /// Plural collection name used by the stats endpoint.
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            Self::Amenity => "amenities",
            Self::City => "cities",
            Self::Place => "places",
            Self::Review => "reviews",
            Self::State => "states",
            Self::User => "users",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to parse a [`Kind`] or [`RecordKey`].
#[derive(Debug, thiserror::Error)]
pub enum ParseKeyError {
    #[error("unknown kind {0:?}")]
    UnknownKind(String),
    #[error("record key must look like Kind.id")]
    MissingSeparator,
    #[error("invalid record id")]
    InvalidId(#[from] uuid::Error),
}

impl FromStr for Kind {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKeyError::UnknownKind(s.to_string()))
    }
}

/// The `"Kind.id"` address of a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub kind: Kind,
    pub id: Uuid,
}

impl RecordKey {
    #[must_use]
    pub fn new(kind: Kind, id: impl Into<Uuid>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.id)
    }
}

impl FromStr for RecordKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s.split_once('.').ok_or(ParseKeyError::MissingSeparator)?;
        Ok(Self {
            kind: kind.parse()?,
            id: Uuid::parse_str(id)?,
        })
    }
}

impl Serialize for RecordKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Any stored entity, tagged with its class name under `__class__`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Record {
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Record {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Amenity(_) => Kind::Amenity,
            Self::City(_) => Kind::City,
            Self::Place(_) => Kind::Place,
            Self::Review(_) => Kind::Review,
            Self::State(_) => Kind::State,
            Self::User(_) => Kind::User,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Amenity(v) => v.id.into(),
            Self::City(v) => v.id.into(),
            Self::Place(v) => v.id.into(),
            Self::Review(v) => v.id.into(),
            Self::State(v) => v.id.into(),
            Self::User(v) => v.id.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.kind(), self.id())
    }
}

/// A concrete entity type that can travel through storage as a [`Record`].
pub trait Model: Clone + Send + Sync + Sized + 'static {
    /// Typed identifier of this entity.
    type Id: Copy + Into<Uuid> + fmt::Display + Send + Sync;

    /// Storage kind of this entity.
    const KIND: Kind;

    fn id(&self) -> Self::Id;

    fn into_record(self) -> Record;

    /// Extract the entity from a record of the matching kind.
    fn from_record(record: Record) -> Option<Self>;

    fn key(&self) -> RecordKey {
        RecordKey::new(Self::KIND, self.id())
    }
}

macro_rules! impl_model {
    ($ty:ident, $id:ty) => {
        impl Model for $ty {
            type Id = $id;
            const KIND: Kind = Kind::$ty;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn into_record(self) -> Record {
                Record::$ty(self)
            }

            fn from_record(record: Record) -> Option<Self> {
                match record {
                    Record::$ty(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

impl_model!(Amenity, crate::id::AmenityId);
impl_model!(City, crate::id::CityId);
impl_model!(Place, crate::id::PlaceId);
impl_model!(Review, crate::id::ReviewId);
impl_model!(State, crate::id::StateId);
impl_model!(User, crate::id::UserId);
