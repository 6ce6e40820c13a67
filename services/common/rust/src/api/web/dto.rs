use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub enum ContactErrorReason {
    Empty,
    InvalidChar,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ContactErrorDto {
    pub first_name: Option<ContactErrorReason>,
    pub last_name: Option<ContactErrorReason>,
    pub email: Option<ContactErrorReason>,
    pub phone: Option<ContactErrorReason>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub enum AddrNationErrorReason {
    NotSupport,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub enum AddrRegionErrorReason {
    Empty,
    InvalidChar,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub enum ZipCodeErrorReason {
    Empty,
    WrongNumDigits,
    InvalidChar,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ShipAddrErrorDto {
    pub country: Option<AddrNationErrorReason>,
    pub state: Option<AddrRegionErrorReason>,
    pub city: Option<AddrRegionErrorReason>,
    pub street: Option<AddrRegionErrorReason>,
    pub zip_code: Option<ZipCodeErrorReason>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct RecipientErrorDto {
    pub contact: Option<ContactErrorDto>,
    pub address: Option<ShipAddrErrorDto>,
}

impl RecipientErrorDto {
    // flattened labels of every failing field, frontend shells present
    // the whole list in one notification rather than one at a time
    pub fn field_labels(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if let Some(c) = self.contact.as_ref() {
            if c.first_name.is_some() {
                out.push("first-name");
            }
            if c.last_name.is_some() {
                out.push("last-name");
            }
            if c.email.is_some() {
                out.push("email");
            }
            if c.phone.is_some() {
                out.push("phone");
            }
        }
        if let Some(a) = self.address.as_ref() {
            if a.street.is_some() {
                out.push("street");
            }
            if a.zip_code.is_some() {
                out.push("zip-code");
            }
            if a.city.is_some() {
                out.push("city");
            }
            if a.state.is_some() {
                out.push("state");
            }
            if a.country.is_some() {
                out.push("country");
            }
        }
        out
    }
}
