use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ContactDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ShipAddrDto {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: CountryCode,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum CountryCode {
    IN,
    Unknown,
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> String {
        let out = match value {
            CountryCode::IN => "IN",
            CountryCode::Unknown => "Unknown",
        };
        out.to_string()
    }
} // explicit conversion, not relying on serde
impl From<String> for CountryCode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "IN" => Self::IN,
            _others => Self::Unknown,
        }
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum CurrencyDto {
    INR,
    Unknown,
}

impl ToString for CurrencyDto {
    fn to_string(&self) -> String {
        let o = match self {
            Self::INR => "INR",
            Self::Unknown => "Unknown",
        };
        o.to_string()
    }
}
