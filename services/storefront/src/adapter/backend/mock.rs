use std::io::ErrorKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::api::dto::{
    CartAddReqDto, CartDto, CartItemDto, CartRemoveReqDto, CartUpdateReqDto, GatewayOrderDto,
    GatewayOrderReqDto, LoginReqDto, OrderPlaceReqDto, OrderReplicaDto, PaymentIntentDto,
    PaymentIntentReqDto, ServiceBookingCreateReqDto, ServiceBookingDto,
    ServiceBookingRemoveReqDto, ServiceBookingUpdateReqDto, SignupReqDto, UserProfileDto,
};

use super::super::base_client::{BaseClientError, BaseClientErrorReason};
use super::{AbstractStorefrontBackend, BackendApiError, BackendApiErrorReason};

#[derive(Debug, Clone)]
pub enum MockBackendFailure {
    Network,
    Rejected(String),
    Auth,
}

struct MockBackendState {
    cart: CartDto,
    bookings: Vec<ServiceBookingDto>,
    orders: Vec<OrderReplicaDto>,
    placed_reqs: Vec<OrderPlaceReqDto>,
    fail_next: Option<MockBackendFailure>,
    latency_plan: Vec<Duration>,
    next_order_seq: u32,
}

// stand-in for the remote backend, keeps the server-authoritative cart
// semantics, every mutation returns the full recomputed snapshot
pub struct MockStorefrontBackend {
    inner: Mutex<MockBackendState>,
    num_orders_placed: AtomicUsize,
    num_gateway_orders: AtomicUsize,
    num_payment_intents: AtomicUsize,
}

fn recompute_total(cart: &mut CartDto) {
    cart.total_amount = cart
        .items
        .iter()
        .map(|it| it.price * Decimal::from(it.quantity))
        .sum::<Decimal>();
}

impl MockBackendState {
    fn take_failure(&mut self) -> Option<BackendApiError> {
        self.fail_next.take().map(|f| {
            let reason = match f {
                MockBackendFailure::Network => BackendApiErrorReason::LowLvlNet(BaseClientError {
                    reason: BaseClientErrorReason::TcpNet(
                        ErrorKind::ConnectionRefused,
                        "mock-conn-refused".to_string(),
                    ),
                }),
                MockBackendFailure::Rejected(msg) => BackendApiErrorReason::RemoteRejected(msg),
                MockBackendFailure::Auth => BackendApiErrorReason::AuthRequired,
            };
            BackendApiError { reason }
        })
    }
    fn next_latency(&mut self) -> Option<Duration> {
        if self.latency_plan.is_empty() {
            None
        } else {
            Some(self.latency_plan.remove(0))
        }
    }
}

impl Default for MockStorefrontBackend {
    fn default() -> Self {
        Self::build()
    }
}

impl MockStorefrontBackend {
    pub fn build() -> Self {
        let state = MockBackendState {
            cart: CartDto {
                id: "ut-cart-0001".to_string(),
                items: Vec::new(),
                total_amount: Decimal::ZERO,
            },
            bookings: Vec::new(),
            orders: Vec::new(),
            placed_reqs: Vec::new(),
            fail_next: None,
            latency_plan: Vec::new(),
            next_order_seq: 1,
        };
        Self {
            inner: Mutex::new(state),
            num_orders_placed: AtomicUsize::new(0),
            num_gateway_orders: AtomicUsize::new(0),
            num_payment_intents: AtomicUsize::new(0),
        }
    }

    pub async fn seed_cart_item(&self, item: CartItemDto) {
        let mut guard = self.inner.lock().await;
        guard.cart.items.push(item);
        recompute_total(&mut guard.cart);
    }
    pub async fn seed_booking(&self, booking: ServiceBookingDto) {
        let mut guard = self.inner.lock().await;
        guard.bookings.push(booking);
    }
    pub async fn seed_order(&self, order: OrderReplicaDto) {
        let mut guard = self.inner.lock().await;
        guard.orders.push(order);
    }
    pub async fn corrupt_cart_total(&self, wrong_total: Decimal) {
        let mut guard = self.inner.lock().await;
        guard.cart.total_amount = wrong_total;
    }
    pub async fn set_fail_next(&self, failure: MockBackendFailure) {
        let mut guard = self.inner.lock().await;
        guard.fail_next = Some(failure);
    }
    // per-call delays, consumed in order, lets tests interleave
    // replies that arrive out of submission order
    pub async fn plan_latency(&self, delays: Vec<Duration>) {
        let mut guard = self.inner.lock().await;
        guard.latency_plan = delays;
    }
    pub async fn last_placed_request(&self) -> Option<OrderPlaceReqDto> {
        let guard = self.inner.lock().await;
        guard.placed_reqs.last().cloned()
    }
    pub fn num_orders_placed(&self) -> usize {
        self.num_orders_placed.load(Ordering::Relaxed)
    }
    pub fn num_gateway_orders(&self) -> usize {
        self.num_gateway_orders.load(Ordering::Relaxed)
    }
    pub fn num_payment_intents(&self) -> usize {
        self.num_payment_intents.load(Ordering::Relaxed)
    }

    async fn cart_mutate<F>(&self, mutate: F) -> Result<CartDto, BackendApiError>
    where
        F: FnOnce(&mut CartDto),
    {
        let (delay, snapshot) = {
            let mut guard = self.inner.lock().await;
            if let Some(e) = guard.take_failure() {
                return Err(e);
            }
            mutate(&mut guard.cart);
            recompute_total(&mut guard.cart);
            (guard.next_latency(), guard.cart.clone())
        }; // drop the lock before simulating reply latency
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        Ok(snapshot)
    }
} // end of impl MockStorefrontBackend

#[async_trait]
impl AbstractStorefrontBackend for MockStorefrontBackend {
    async fn verify_session(&self) -> Result<UserProfileDto, BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        Ok(UserProfileDto {
            id: "ut-usr-0187".to_string(),
            name: "Asha Iyer".to_string(),
            email: "asha.iyer@example.com".to_string(),
        })
    }

    async fn login(&self, req: LoginReqDto) -> Result<(String, UserProfileDto), BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        let user = UserProfileDto {
            id: "ut-usr-0187".to_string(),
            name: "Asha Iyer".to_string(),
            email: req.email,
        };
        Ok(("ut-session-token-0001".to_string(), user))
    }

    async fn signup(&self, _req: SignupReqDto) -> Result<(), BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        Ok(())
    }

    async fn fetch_cart(&self) -> Result<CartDto, BackendApiError> {
        let (delay, snapshot) = {
            let mut guard = self.inner.lock().await;
            if let Some(e) = guard.take_failure() {
                return Err(e);
            }
            (guard.next_latency(), guard.cart.clone())
        };
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        Ok(snapshot)
    }

    async fn add_cart_item(&self, req: CartAddReqDto) -> Result<CartDto, BackendApiError> {
        self.cart_mutate(|cart| {
            if let Some(existing) = cart.items.iter_mut().find(|it| it.item_id == req.item_id) {
                existing.quantity += 1;
            } else {
                cart.items.push(CartItemDto {
                    item_id: req.item_id,
                    name: req.name,
                    price: req.price,
                    quantity: 1,
                    category: req.category,
                    image: req.image,
                });
            }
        })
        .await
    }

    async fn update_cart_item(&self, req: CartUpdateReqDto) -> Result<CartDto, BackendApiError> {
        self.cart_mutate(|cart| {
            if req.quantity == 0 {
                cart.items.retain(|it| it.item_id != req.item_id);
            } else if let Some(existing) =
                cart.items.iter_mut().find(|it| it.item_id == req.item_id)
            {
                existing.quantity = req.quantity;
            }
        })
        .await
    }

    async fn remove_cart_item(&self, req: CartRemoveReqDto) -> Result<CartDto, BackendApiError> {
        // removal of an absent line is a no-op acknowledged with the
        // current snapshot
        self.cart_mutate(|cart| {
            cart.items.retain(|it| it.item_id != req.item_id);
        })
        .await
    }

    async fn fetch_service_bookings(&self) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        let (delay, snapshot) = {
            let mut guard = self.inner.lock().await;
            if let Some(e) = guard.take_failure() {
                return Err(e);
            }
            (guard.next_latency(), guard.bookings.clone())
        };
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        Ok(snapshot)
    }

    async fn create_service_booking(
        &self,
        req: ServiceBookingCreateReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        let seq = guard.bookings.len() + 1;
        guard.bookings.push(ServiceBookingDto {
            id: format!("ut-booking-{seq:04}"),
            service_id: req.service_id,
            name: req.name,
            price: req.price,
            count: req.count,
            scheduled_for: req.scheduled_for,
            status: Some("pending".to_string()),
            payment_status: Some("pending".to_string()),
            additional_works: Vec::new(),
            additional_work_paid: false,
        });
        Ok(guard.bookings.clone())
    }

    async fn update_service_booking(
        &self,
        req: ServiceBookingUpdateReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        if req.count == 0 {
            guard.bookings.retain(|b| b.id != req.booking_id);
        } else if let Some(b) = guard.bookings.iter_mut().find(|b| b.id == req.booking_id) {
            b.count = req.count;
        }
        Ok(guard.bookings.clone())
    }

    async fn remove_service_booking(
        &self,
        req: ServiceBookingRemoveReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        guard.bookings.retain(|b| b.id != req.booking_id);
        Ok(guard.bookings.clone())
    }

    async fn place_order(&self, req: OrderPlaceReqDto) -> Result<String, BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        let oid = format!("ut-order-{:04}", guard.next_order_seq);
        guard.next_order_seq += 1;
        guard.orders.push(OrderReplicaDto {
            id: oid.clone(),
            status: req.status.clone(),
            payment_details: req.payment_details.clone(),
            products: req.products.clone(),
            services: Vec::new(),
            updated_at: req.created_at.clone(),
        });
        guard.placed_reqs.push(req);
        self.num_orders_placed.fetch_add(1, Ordering::Relaxed);
        Ok(oid)
    }

    async fn list_orders(&self) -> Result<Vec<OrderReplicaDto>, BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        Ok(guard.orders.clone())
    }

    async fn cancel_order(&self, order_id: &str) -> Result<(), BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        match guard.orders.iter_mut().find(|o| o.id == order_id) {
            Some(o) => {
                o.status = "CANCELLED".to_string();
                Ok(())
            }
            None => Err(BackendApiError {
                reason: BackendApiErrorReason::RemoteRejected("order-not-found".to_string()),
            }),
        }
    }

    async fn cancel_service_booking(&self, booking_id: &str) -> Result<(), BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        let mut found = false;
        for order in guard.orders.iter_mut() {
            if let Some(s) = order.services.iter_mut().find(|s| s.id == booking_id) {
                s.status = Some("cancelled".to_string());
                found = true;
            }
        }
        if let Some(b) = guard.bookings.iter_mut().find(|b| b.id == booking_id) {
            b.status = Some("cancelled".to_string());
            found = true;
        }
        if found {
            Ok(())
        } else {
            Err(BackendApiError {
                reason: BackendApiErrorReason::RemoteRejected("booking-not-found".to_string()),
            })
        }
    }

    async fn settle_additional_work(&self, booking_id: &str) -> Result<(), BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        let mut found = false;
        for order in guard.orders.iter_mut() {
            if let Some(s) = order.services.iter_mut().find(|s| s.id == booking_id) {
                s.additional_work_paid = true;
                found = true;
            }
        }
        if let Some(b) = guard.bookings.iter_mut().find(|b| b.id == booking_id) {
            b.additional_work_paid = true;
            found = true;
        }
        if found {
            Ok(())
        } else {
            Err(BackendApiError {
                reason: BackendApiErrorReason::RemoteRejected("booking-not-found".to_string()),
            })
        }
    }

    async fn create_gateway_order(
        &self,
        req: GatewayOrderReqDto,
    ) -> Result<GatewayOrderDto, BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        self.num_gateway_orders.fetch_add(1, Ordering::Relaxed);
        Ok(GatewayOrderDto {
            id: "ut-rzp-order-0001".to_string(),
            amount: req.amount,
            currency: req.currency,
            key_id: Some("rzp_test_ut00000000001".to_string()),
        })
    }

    async fn create_payment_intent(
        &self,
        req: PaymentIntentReqDto,
    ) -> Result<PaymentIntentDto, BackendApiError> {
        let mut guard = self.inner.lock().await;
        if let Some(e) = guard.take_failure() {
            return Err(e);
        }
        let _amount = req.amount;
        self.num_payment_intents.fetch_add(1, Ordering::Relaxed);
        Ok(PaymentIntentDto {
            id: "pi_ut_0000000001".to_string(),
            client_secret: "pi_ut_0000000001_secret_ut".to_string(),
        })
    }
} // end of impl MockStorefrontBackend
