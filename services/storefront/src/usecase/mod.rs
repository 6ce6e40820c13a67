mod cart_sync;
mod order_history;
mod pincode_autofill;
mod place_order;
mod service_cart;
mod session;

pub use cart_sync::{CartSyncUseCase, CartUcError, NewCartItemModel};
pub use order_history::{OrderHistoryModel, OrderHistoryUcError, OrderHistoryUseCase};
pub use pincode_autofill::{
    CityOptionModel, PincodeAutofillError, PincodeAutofillOutcome, PincodeAutofillUseCase,
};
pub use place_order::{PlaceOrderFailure, PlaceOrderState, PlaceOrderUseCase};
pub use service_cart::{NewBookingModel, ServiceCartUcError, ServiceCartUseCase};
pub use session::{SessionUcError, SessionUseCase};
