use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum BookingError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("no slot selected")]
    NothingSelected,
}

/// Lifecycle state of a booking request. Everything this crate submits
/// starts out pending; a real backend would move it onward.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

/// Contact details the booking form collects.
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct ClientDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ClientDetails {
    pub fn new(name: &str, phone: &str, email: &str) -> ClientDetails {
        ClientDetails {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }
}

/// The payload a booking backend would receive.
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: NaiveDate,
    pub time: String,
    pub city: String,
    pub condominium: String,
    pub status: BookingStatus,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDateTime,
}

impl BookingRequest {
    /// Assembles a pending request, rejecting blank contact fields.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::booking::{BookingError, BookingRequest, BookingStatus, ClientDetails};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
    /// let created_at = date.and_hms_opt(7, 30, 0).unwrap();
    ///
    /// let client = ClientDetails::new("Ana", "+55 11 91234-5678", "ana@example.com");
    /// let request = BookingRequest::new(
    ///     client,
    ///     date,
    ///     "08:00",
    ///     "Jundiaí",
    ///     "Vila da Terra",
    ///     created_at,
    /// )
    /// .unwrap();
    /// assert_eq!(request.status, BookingStatus::Pending);
    ///
    /// let anonymous = ClientDetails::new("", "+55 11 91234-5678", "ana@example.com");
    /// assert_eq!(
    ///     BookingRequest::new(anonymous, date, "08:00", "Jundiaí", "Vila da Terra", created_at),
    ///     Err(BookingError::MissingField("name"))
    /// );
    /// ```
    pub fn new(
        client: ClientDetails,
        date: NaiveDate,
        time: &str,
        city: &str,
        condominium: &str,
        created_at: NaiveDateTime,
    ) -> Result<BookingRequest, BookingError> {
        if client.name.trim().is_empty() {
            return Err(BookingError::MissingField("name"));
        }
        if client.phone.trim().is_empty() {
            return Err(BookingError::MissingField("phone"));
        }
        if client.email.trim().is_empty() {
            return Err(BookingError::MissingField("email"));
        }

        Ok(BookingRequest {
            name: client.name,
            phone: client.phone,
            email: client.email,
            date,
            time: time.to_string(),
            city: city.to_string(),
            condominium: condominium.to_string(),
            status: BookingStatus::Pending,
            created_at,
        })
    }
}

/// What the gateway hands back when it accepts a request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookingReceipt {
    pub date: NaiveDate,
    pub time: String,
}

/// The seam where a real booking API would attach.
pub trait BookingGateway {
    fn submit(&mut self, request: &BookingRequest) -> Result<BookingReceipt, BookingError>;
}

/// Stand-in gateway: logs the request and accepts it unconditionally,
/// keeping a record so tests and demos can inspect what was sent.
#[derive(Debug, Default)]
pub struct SimulatedGateway {
    submitted: Vec<BookingRequest>,
}

impl SimulatedGateway {
    pub fn new() -> SimulatedGateway {
        SimulatedGateway::default()
    }

    /// Every request accepted so far, oldest first.
    pub fn submitted(&self) -> &[BookingRequest] {
        &self.submitted
    }
}

impl BookingGateway for SimulatedGateway {
    fn submit(&mut self, request: &BookingRequest) -> Result<BookingReceipt, BookingError> {
        info!(
            "submitting booking: {} at {} ({}, {})",
            request.date, request.time, request.condominium, request.city
        );

        let receipt = BookingReceipt {
            date: request.date,
            time: request.time.clone(),
        };
        self.submitted.push(request.clone());
        Ok(receipt)
    }
}
