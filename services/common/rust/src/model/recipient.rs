use regex::Regex;
use std::result::Result as DefaultResult;

use crate::api::dto::{ContactDto, CountryCode, ShipAddrDto};
use crate::api::web::dto::{
    AddrNationErrorReason, AddrRegionErrorReason, ContactErrorDto, ContactErrorReason,
    RecipientErrorDto, ShipAddrErrorDto, ZipCodeErrorReason,
};
use crate::constant::{POSTAL_CODE_NUM_DIGITS, REGEX_EMAIL_RFC5322};

pub struct ContactModel {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}
pub struct ShipAddrModel {
    pub country: CountryCode,
    pub state: String,
    pub city: String,
    pub street: String,
    pub zip_code: String,
}
// delivery recipient of an order, both parts are mandatory here, unlike
// billing profiles where the address may be omitted
pub struct RecipientModel {
    pub contact: ContactModel,
    pub address: ShipAddrModel,
}

impl From<ContactModel> for ContactDto {
    fn from(value: ContactModel) -> ContactDto {
        ContactDto {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
        }
    }
}

impl TryFrom<ContactDto> for ContactModel {
    type Error = ContactErrorDto;
    fn try_from(value: ContactDto) -> DefaultResult<Self, Self::Error> {
        let error = Self::Error {
            first_name: Self::check_name(value.first_name.as_str()),
            last_name: Self::check_name(value.last_name.as_str()),
            email: Self::check_email(value.email.as_str()),
            phone: Self::check_phone(value.phone.as_str()),
        };
        if error.first_name.is_none()
            && error.last_name.is_none()
            && error.email.is_none()
            && error.phone.is_none()
        {
            Ok(Self {
                first_name: value.first_name,
                last_name: value.last_name,
                email: value.email,
                phone: value.phone,
            })
        } else {
            Err(error)
        }
    } // end of fn try_from
}
impl ContactModel {
    fn check_name(value: &str) -> Option<ContactErrorReason> {
        if value.is_empty() {
            Some(ContactErrorReason::Empty)
        } else if !value
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace())
        {
            Some(ContactErrorReason::InvalidChar)
        } else {
            None
        }
    }
    fn check_email(value: &str) -> Option<ContactErrorReason> {
        if value.is_empty() {
            return Some(ContactErrorReason::Empty);
        }
        let re = Regex::new(REGEX_EMAIL_RFC5322).unwrap();
        if let Some(m) = re.find(value) {
            if m.start() == 0 && m.end() == value.len() {
                None // given data should match the mail pattern exactly once
            } else {
                Some(ContactErrorReason::InvalidChar)
            }
        } else {
            Some(ContactErrorReason::InvalidChar)
        }
    }
    fn check_phone(value: &str) -> Option<ContactErrorReason> {
        if value.is_empty() {
            Some(ContactErrorReason::Empty)
        } else if !value.chars().all(|c| c.is_ascii_digit()) {
            Some(ContactErrorReason::InvalidChar)
        } else {
            None
        }
    }
} // end of impl ContactModel

impl From<ShipAddrModel> for ShipAddrDto {
    fn from(value: ShipAddrModel) -> ShipAddrDto {
        ShipAddrDto {
            country: value.country,
            state: value.state,
            city: value.city,
            street: value.street,
            zip_code: value.zip_code,
        }
    }
}

impl TryFrom<ShipAddrDto> for ShipAddrModel {
    type Error = ShipAddrErrorDto;
    fn try_from(value: ShipAddrDto) -> DefaultResult<Self, Self::Error> {
        let error = Self::Error {
            country: Self::check_country(&value.country),
            state: Self::check_region(value.state.as_str()),
            city: Self::check_region(value.city.as_str()),
            street: Self::check_street(value.street.as_str()),
            zip_code: Self::check_zip_code(value.zip_code.as_str()),
        };
        if error.country.is_none()
            && error.state.is_none()
            && error.city.is_none()
            && error.street.is_none()
            && error.zip_code.is_none()
        {
            Ok(Self {
                country: value.country,
                state: value.state,
                city: value.city,
                street: value.street,
                zip_code: value.zip_code,
            })
        } else {
            Err(error)
        }
    }
} // end of impl ShipAddrModel

impl ShipAddrModel {
    fn check_country(value: &CountryCode) -> Option<AddrNationErrorReason> {
        if matches!(value, CountryCode::Unknown) {
            Some(AddrNationErrorReason::NotSupport)
        } else {
            None
        }
    }
    fn check_region(value: &str) -> Option<AddrRegionErrorReason> {
        if value.is_empty() {
            Some(AddrRegionErrorReason::Empty)
        } else if !value
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace())
        {
            Some(AddrRegionErrorReason::InvalidChar)
        } else {
            None
        }
    }
    fn check_street(value: &str) -> Option<AddrRegionErrorReason> {
        if value.is_empty() {
            Some(AddrRegionErrorReason::Empty)
        } else if value.chars().any(char::is_control) {
            Some(AddrRegionErrorReason::InvalidChar)
        } else {
            None
        }
    }
    pub fn check_zip_code(value: &str) -> Option<ZipCodeErrorReason> {
        if value.is_empty() {
            Some(ZipCodeErrorReason::Empty)
        } else if !value.chars().all(|c| c.is_ascii_digit()) {
            Some(ZipCodeErrorReason::InvalidChar)
        } else if value.len() != POSTAL_CODE_NUM_DIGITS {
            Some(ZipCodeErrorReason::WrongNumDigits)
        } else {
            None
        }
    }
} // end of impl ShipAddrModel

impl From<RecipientModel> for (ContactDto, ShipAddrDto) {
    fn from(value: RecipientModel) -> Self {
        (value.contact.into(), value.address.into())
    }
}

impl TryFrom<(ContactDto, ShipAddrDto)> for RecipientModel {
    type Error = RecipientErrorDto;
    fn try_from(value: (ContactDto, ShipAddrDto)) -> DefaultResult<Self, Self::Error> {
        let results = (
            ContactModel::try_from(value.0),
            ShipAddrModel::try_from(value.1),
        );
        if let (Ok(contact), Ok(address)) = results {
            Ok(Self { contact, address })
        } else {
            let mut obj = Self::Error {
                contact: None,
                address: None,
            };
            if let Err(e) = results.0 {
                obj.contact = Some(e);
            }
            if let Err(e) = results.1 {
                obj.address = Some(e);
            }
            Err(obj)
        }
    }
} // end of impl RecipientModel
