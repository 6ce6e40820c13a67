use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Every response from the application backend is wrapped in the same
// envelope, a boolean `success` flag plus either payload fields or a
// human-readable `message`.
#[derive(Deserialize, Debug)]
pub struct GenericRespDto {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct LoginReqDto {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct SignupReqDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UserProfileDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRespDto {
    pub success: bool,
    pub message: Option<String>,
    #[serde(rename = "sessionToken")]
    pub session_token: Option<String>,
    pub user: Option<UserProfileDto>,
}

#[derive(Serialize, Debug)]
pub struct SessionVerifyReqDto {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Deserialize, Debug)]
pub struct SessionVerifyRespDto {
    pub success: bool,
    pub message: Option<String>,
    pub user: Option<UserProfileDto>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CartItemDto {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    pub category: String,
    pub image: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CartDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub items: Vec<CartItemDto>,
    #[serde(rename = "totalAmount", with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

// older deployments of the backend label the payload `cart`, newer
// ones `cartData`
#[derive(Deserialize, Debug)]
pub struct CartRespDto {
    pub success: bool,
    pub message: Option<String>,
    #[serde(alias = "cartData")]
    pub cart: Option<CartDto>,
}

#[derive(Serialize, Debug)]
pub struct CartAddReqDto {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub image: String,
}

#[derive(Serialize, Debug)]
pub struct CartUpdateReqDto {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub quantity: u32,
}

#[derive(Serialize, Debug)]
pub struct CartRemoveReqDto {
    #[serde(rename = "itemId")]
    pub item_id: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AdditionalWorkDto {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServiceBookingDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "serviceId")]
    pub service_id: String,
    #[serde(rename = "serviceName")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub count: u32,
    #[serde(rename = "scheduledFor", default)]
    pub scheduled_for: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "paymentStatus", default)]
    pub payment_status: Option<String>,
    #[serde(rename = "additionalWorks", default)]
    pub additional_works: Vec<AdditionalWorkDto>,
    #[serde(rename = "additionalWorkPayment", default)]
    pub additional_work_paid: bool,
}

#[derive(Deserialize, Debug)]
pub struct ServiceCartRespDto {
    pub success: bool,
    pub message: Option<String>,
    #[serde(alias = "serviceCartData", alias = "serviceCart")]
    pub bookings: Option<Vec<ServiceBookingDto>>,
}

#[derive(Serialize, Debug)]
pub struct ServiceBookingCreateReqDto {
    #[serde(rename = "serviceId")]
    pub service_id: String,
    #[serde(rename = "serviceName")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub count: u32,
    #[serde(rename = "scheduledFor")]
    pub scheduled_for: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ServiceBookingUpdateReqDto {
    #[serde(rename = "bookingId")]
    pub booking_id: String,
    pub count: u32,
}

#[derive(Serialize, Debug)]
pub struct ServiceBookingRemoveReqDto {
    #[serde(rename = "bookingId")]
    pub booking_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderLineDto {
    pub product: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderServiceLineDto {
    #[serde(rename = "serviceId")]
    pub service_id: String,
    pub count: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderAddressDto {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "zipCode")]
    pub zip_code: String,
    pub country: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PaymentDetailDto {
    pub method: String,
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    #[serde(rename = "paidAt")]
    pub paid_at: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct OrderPlaceReqDto {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "orderFirstName")]
    pub first_name: String,
    #[serde(rename = "orderLastName")]
    pub last_name: String,
    #[serde(rename = "orderEmail")]
    pub email: String,
    pub phone: String,
    #[serde(rename = "orderType")]
    pub order_type: String,
    pub products: Vec<OrderLineDto>,
    pub services: Vec<OrderServiceLineDto>,
    #[serde(rename = "deliveryCharge", with = "rust_decimal::serde::float")]
    pub delivery_charge: Decimal,
    #[serde(rename = "totalAmount", with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: String,
    #[serde(rename = "paymentDetails")]
    pub payment_details: PaymentDetailDto,
    pub address: OrderAddressDto,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OrderReplicaDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: String,
    #[serde(rename = "paymentDetails")]
    pub payment_details: PaymentDetailDto,
    #[serde(default)]
    pub products: Vec<OrderLineDto>,
    #[serde(default)]
    pub services: Vec<ServiceBookingDto>,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Deserialize, Debug)]
pub struct OrderPlaceRespDto {
    pub success: bool,
    pub message: Option<String>,
    pub order: Option<OrderReplicaDto>,
}

#[derive(Deserialize, Debug)]
pub struct OrderListRespDto {
    pub success: bool,
    pub message: Option<String>,
    pub orders: Option<Vec<OrderReplicaDto>>,
}

#[derive(Serialize, Debug)]
pub struct OrderCancelReqDto {
    #[serde(rename = "orderId")]
    pub order_id: String,
}

#[derive(Serialize, Debug)]
pub struct ServiceCancelReqDto {
    #[serde(rename = "serviceId")]
    pub service_id: String,
}

#[derive(Serialize, Debug)]
pub struct AdditionalWorkPayReqDto {
    #[serde(rename = "serviceId")]
    pub service_id: String,
}

// the backend proxies gateway-order creation so the secret key never
// reaches this client, only the publishable key id comes back
#[derive(Serialize, Debug)]
pub struct GatewayOrderReqDto {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub receipt: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GatewayOrderDto {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    #[serde(rename = "keyId", default)]
    pub key_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct GatewayOrderRespDto {
    pub success: bool,
    pub message: Option<String>,
    pub order: Option<GatewayOrderDto>,
}

#[derive(Serialize, Debug)]
pub struct PaymentIntentReqDto {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PaymentIntentDto {
    pub id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[derive(Deserialize, Debug)]
pub struct PaymentIntentRespDto {
    pub success: bool,
    pub message: Option<String>,
    pub intent: Option<PaymentIntentDto>,
}
