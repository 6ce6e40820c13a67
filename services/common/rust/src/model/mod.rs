mod recipient;

pub use recipient::{ContactModel, RecipientModel, ShipAddrModel};
