use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use crate::api::dto::{AdditionalWorkDto, ServiceBookingDto};

use super::checkout::{round_money, CheckoutAmountModel};

#[derive(Debug, PartialEq, Eq)]
pub enum BookingModelError {
    ZeroCount(String),
    NegativePrice(String),
    CorruptedTimeStamp(String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum BookingPayStatus {
    Pending, Paid, Refunded, Unknown,
}

impl From<Option<&str>> for BookingPayStatus {
    fn from(value: Option<&str>) -> Self {
        match value.map(|s| s.to_lowercase()).as_deref() {
            Some("pending") => Self::Pending,
            Some("paid") | Some("completed") => Self::Paid,
            Some("refunded") => Self::Refunded,
            _others => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdditionalWorkModel {
    pub description: String,
    pub price: Decimal,
}

#[derive(Debug, Clone)]
pub struct ServiceBookingModel {
    pub booking_id: String,
    pub service_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub count: u32,
    pub scheduled_for: Option<DateTime<FixedOffset>>,
    pub status: Option<String>,
    pub payment_status: BookingPayStatus,
    pub additional_works: Vec<AdditionalWorkModel>,
    pub additional_work_paid: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceCartModel {
    pub bookings: Vec<ServiceBookingModel>,
}

impl TryFrom<ServiceBookingDto> for ServiceBookingModel {
    type Error = BookingModelError;
    fn try_from(value: ServiceBookingDto) -> Result<Self, Self::Error> {
        if value.count == 0 {
            return Err(BookingModelError::ZeroCount(value.id));
        }
        if value.price < Decimal::ZERO {
            return Err(BookingModelError::NegativePrice(value.id));
        }
        let scheduled_for = match value.scheduled_for.as_deref() {
            Some(raw) => {
                let t = DateTime::parse_from_rfc3339(raw).map_err(|_e| {
                    BookingModelError::CorruptedTimeStamp(value.id.clone(), raw.to_string())
                })?;
                Some(t)
            }
            None => None,
        };
        let payment_status = BookingPayStatus::from(value.payment_status.as_deref());
        Ok(Self {
            booking_id: value.id,
            service_id: value.service_id,
            name: value.name,
            unit_price: value.price,
            count: value.count,
            scheduled_for,
            status: value.status,
            payment_status,
            additional_works: value
                .additional_works
                .into_iter()
                .map(AdditionalWorkModel::from)
                .collect(),
            additional_work_paid: value.additional_work_paid,
        })
    } // end of fn try_from
}

impl From<AdditionalWorkDto> for AdditionalWorkModel {
    fn from(value: AdditionalWorkDto) -> Self {
        Self {
            description: value.description,
            price: value.price,
        }
    }
}

impl TryFrom<Vec<ServiceBookingDto>> for ServiceCartModel {
    type Error = Vec<BookingModelError>;
    fn try_from(value: Vec<ServiceBookingDto>) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        let bookings = value
            .into_iter()
            .filter_map(|d| ServiceBookingModel::try_from(d).map_err(|e| errors.push(e)).ok())
            .collect::<Vec<_>>();
        if errors.is_empty() {
            Ok(Self { bookings })
        } else {
            Err(errors)
        }
    }
}

impl ServiceBookingModel {
    pub fn line_amount(&self) -> Decimal {
        round_money(self.unit_price * Decimal::from(self.count))
    }
    // additional work billed separately after the visit, outstanding
    // until the settlement endpoint confirms it
    pub fn additional_work_due(&self) -> Decimal {
        if self.additional_work_paid {
            Decimal::ZERO
        } else {
            round_money(self.additional_works.iter().map(|w| w.price).sum::<Decimal>())
        }
    }
}

impl ServiceCartModel {
    pub fn subtotal(&self) -> Decimal {
        round_money(self.bookings.iter().map(|b| b.line_amount()).sum::<Decimal>())
    }
    pub fn amounts(&self) -> CheckoutAmountModel {
        CheckoutAmountModel::service_booking(self.subtotal())
    }
    pub fn num_bookings(&self) -> u32 {
        self.bookings.iter().map(|b| b.count).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
} // end of impl ServiceCartModel
