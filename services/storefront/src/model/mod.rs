mod booking;
mod cart;
mod checkout;
mod order;

pub use booking::{
    AdditionalWorkModel, BookingModelError, BookingPayStatus, ServiceBookingModel, ServiceCartModel,
};
pub use cart::{CartItemModel, CartModel, CartModelError};
pub use checkout::{discounted_unit_price, round_money, CheckoutAmountError, CheckoutAmountModel};
pub use order::{
    OrderKind, OrderProductRowModel, OrderRequestModel, OrderServiceRowModel, PaymentDetailModel,
    PaymentMethod, PendingOrderModel, ProductLineModel, ServiceLineModel,
};
