//! Hour entry types and the normalization of the intranet's response shapes.
//!
//! The intranet describes the same entry differently depending on the
//! endpoint:
//! - the hours listing sends integer ids, a flat `project { id, name, clientName }`
//!   and a nested `ticket { id }`, but no date
//! - create and update send string ids, `desc` instead of `description`,
//!   `project { name, client { name } }` without an id, and `ticketId`
//!
//! Both shapes are decoded into private wire structs here and converted into
//! the single public [`HourEntry`].

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

/// Date format used in query strings and request bodies.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats seen in response bodies, tried in order.
const RESPONSE_DATE_FORMATS: [&str; 3] = [DATE_FORMAT, "%d-%m-%Y", "%d.%m.%Y"];

/// Identifier of an hour entry.
///
/// The intranet sends ids as JSON integers from some endpoints and as strings
/// from others; both decode into this type. On the wire it is written as a
/// string, which is what the write endpoints expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntryId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for EntryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryIdVisitor;

        impl Visitor<'_> for EntryIdVisitor {
            type Value = EntryId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an hour entry id as an integer or a string of digits")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntryId, E> {
                Ok(EntryId(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<EntryId, E> {
                u64::try_from(v)
                    .map(EntryId)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<EntryId, E> {
                v.parse()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(EntryIdVisitor)
    }
}

/// A billable project, owned by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub client_name: String,
}

/// A timesheet record, in the same shape whichever operation returned it.
///
/// Serializes with an ISO date and a string id, and reads that form back, so
/// entries can be stored or exported and loaded again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub description: String,
    /// Logged time in hours, fractions included (0.25 is a quarter hour).
    pub time: f64,
    pub project: Project,
    pub ticket_id: Option<String>,
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_response_date(raw: &str) -> Option<NaiveDate> {
    RESPONSE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw.trim(), format).ok())
}

fn deserialize_response_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_response_date(&raw)
        .ok_or_else(|| <D::Error as de::Error>::custom(format!("unrecognized date format: {raw}")))
}

fn deserialize_optional_response_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            parse_response_date(&raw).ok_or_else(|| {
                <D::Error as de::Error>::custom(format!("unrecognized date format: {raw}"))
            })
        })
        .transpose()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(ticket: Option<String>) -> Option<String> {
    ticket.filter(|t| !t.trim().is_empty())
}

/// Body of `GET /intranet4/hours`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub entries: Vec<ListedEntry>,
}

/// Only `id` is required. A listed entry with missing or null fields still
/// decodes, so one sparse entry cannot hide the rest of the day.
#[derive(Debug, Deserialize)]
pub(crate) struct ListedEntry {
    id: EntryId,
    #[serde(default, deserialize_with = "deserialize_optional_response_date")]
    date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    time: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    project: ListedProject,
    #[serde(default)]
    ticket: Option<ListedTicket>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedProject {
    #[serde(default, deserialize_with = "null_as_default")]
    id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    client_name: String,
}

#[derive(Debug, Deserialize)]
struct ListedTicket {
    #[serde(default)]
    id: Option<String>,
}

impl ListedEntry {
    /// Listed entries carry no date of their own; they belong to the day
    /// that was queried.
    pub(crate) fn into_entry(self, listed_on: NaiveDate) -> HourEntry {
        HourEntry {
            id: self.id,
            date: self.date.unwrap_or(listed_on),
            description: self.description,
            time: self.time,
            project: Project {
                id: self.project.id,
                name: self.project.name,
                client_name: self.project.client_name,
            },
            ticket_id: non_empty(self.ticket.and_then(|t| t.id)),
        }
    }
}

/// Body returned by `POST` and `PUT /intranet4/user_times`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MutationResponse {
    id: EntryId,
    #[serde(deserialize_with = "deserialize_response_date")]
    date: NaiveDate,
    #[serde(alias = "description")]
    desc: String,
    time: f64,
    #[serde(default)]
    ticket_id: Option<String>,
    project: MutatedProject,
}

#[derive(Debug, Deserialize)]
struct MutatedProject {
    #[serde(default)]
    id: Option<u64>,
    name: String,
    #[serde(default)]
    client: Option<MutatedClient>,
}

#[derive(Debug, Deserialize)]
struct MutatedClient {
    name: String,
}

impl MutationResponse {
    /// The project id is missing from some responses; `requested_project_id`
    /// is the id the caller sent.
    pub(crate) fn into_entry(self, requested_project_id: u64) -> HourEntry {
        HourEntry {
            id: self.id,
            date: self.date,
            description: self.desc,
            time: self.time,
            project: Project {
                id: self.project.id.unwrap_or(requested_project_id),
                name: self.project.name,
                client_name: self.project.client.map(|c| c.name).unwrap_or_default(),
            },
            ticket_id: non_empty(self.ticket_id),
        }
    }
}
