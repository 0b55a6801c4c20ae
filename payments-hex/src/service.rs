//! Payment Application Service
//!
//! Orchestrates the payment lifecycle across the local store and the remote
//! Order service. Contains NO infrastructure logic.
//!
//! Consistency contract, since the two systems share no transaction:
//! - create validates the remote order first, writes locally, then patches
//!   the remote order. If that last call fails the payment stays persisted
//!   and the caller gets `AppError::Diverged`.
//! - list degrades per item: a payment whose order cannot be fetched is
//!   dropped from the result, never failing the whole call.
//! - advance and cancel are local read-modify-write cycles guarded by the
//!   store's version check.
//!
//! No remote call is retried.

use payments_types::{
    AppError, CreatePaymentRequest, DomainError, NewPayment, Order, OrderError, OrderGateway,
    OrderId, Payment, PaymentId, PaymentRepository, PaymentResponse,
};

/// Outcome of attaching live order state to one stored payment.
#[derive(Debug)]
pub enum Enrichment {
    /// Order is in payment; the payment belongs in the listing.
    Included(PaymentResponse),
    /// Order was fetched but is in some other status.
    Filtered {
        payment_id: PaymentId,
        order_status: String,
    },
    /// Order could not be fetched.
    Unavailable {
        payment_id: PaymentId,
        error: OrderError,
    },
}

impl Enrichment {
    /// The listed payment, if this outcome includes one.
    pub fn into_included(self) -> Option<PaymentResponse> {
        match self {
            Enrichment::Included(p) => Some(p),
            _ => None,
        }
    }
}

/// Application service for the payment lifecycle.
///
/// Generic over the store `R` and the Order service accessor `O`; both are
/// injected at compile time, so tests swap in in-memory doubles.
pub struct PaymentService<R: PaymentRepository, O: OrderGateway> {
    repo: R,
    orders: O,
}

impl<R: PaymentRepository, O: OrderGateway> PaymentService<R, O> {
    /// Creates a new payment service.
    pub fn new(repo: R, orders: O) -> Self {
        Self { repo, orders }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the Order service accessor.
    pub fn orders(&self) -> &O {
        &self.orders
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists payments whose order is currently `IN_PAYMENT`, each enriched
    /// with the order just fetched.
    #[tracing::instrument(skip(self))]
    pub async fn list_in_payment(&self) -> Result<Vec<PaymentResponse>, AppError> {
        let payments = self.repo.find_all().await?;
        let total = payments.len();

        let mut listed: Vec<PaymentResponse> = Vec::with_capacity(total);
        for payment in payments {
            if let Some(item) = self.enrich(payment).await.into_included() {
                if !listed.contains(&item) {
                    listed.push(item);
                }
            }
        }

        tracing::info!(total, listed = listed.len(), "listed payments in payment");
        Ok(listed)
    }

    /// Fetches the order behind `payment` and decides whether it is listed.
    pub async fn enrich(&self, payment: Payment) -> Enrichment {
        let payment_id = payment.id;
        match self.orders.get_by_id(payment.order_id).await {
            Ok(order) if order.is_in_payment() => {
                Enrichment::Included(PaymentResponse::enriched(payment, order))
            }
            Ok(order) => Enrichment::Filtered {
                payment_id,
                order_status: order.order_status,
            },
            Err(error) => {
                tracing::warn!(
                    payment_id = %payment_id,
                    order_id = %payment.order_id,
                    error = %error,
                    "Error fetching order for payment, excluding it"
                );
                Enrichment::Unavailable { payment_id, error }
            }
        }
    }

    /// Gets a payment with its live order attached.
    ///
    /// Unlike the listing, an unreachable order fails the call.
    #[tracing::instrument(skip(self), fields(payment_id = %id))]
    pub async fn get_payment(&self, id: PaymentId) -> Result<PaymentResponse, AppError> {
        let payment = self.load(id).await?;

        let order = self.orders.get_by_id(payment.order_id).await.map_err(|e| {
            tracing::error!(order_id = %payment.order_id, error = %e, "Error fetching order for payment");
            AppError::service("Could not fetch order information for payment", e)
        })?;

        Ok(PaymentResponse::enriched(payment, order))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Starts a payment for an order that is currently `ORDERED`.
    ///
    /// Order of effects: read order, validate, insert payment, patch order.
    #[tracing::instrument(skip(self, req), fields(order_id = ?req.order_id()))]
    pub async fn create_payment(
        &self,
        req: CreatePaymentRequest,
    ) -> Result<PaymentResponse, AppError> {
        let order_id = req
            .order_id()
            .ok_or_else(|| AppError::InvalidArgument("Order ID must not be null".into()))?;

        let order = self.fetch_startable_order(order_id).await?;

        let payment = self.repo.insert(NewPayment::for_order(order.order_id)).await?;
        tracing::info!(payment_id = %payment.id, "payment persisted");

        if let Err(e) = self.orders.patch_status(order.order_id).await {
            tracing::error!(
                payment_id = %payment.id,
                order_id = %order.order_id,
                error = %e,
                "Payment saved but order status update failed"
            );
            return Err(AppError::Diverged {
                payment_id: payment.id,
                order_id: order.order_id,
                source: e,
            });
        }

        tracing::info!(order_id = %order.order_id, "Order status updated");
        Ok(PaymentResponse::enriched(payment, order))
    }

    async fn fetch_startable_order(&self, order_id: OrderId) -> Result<Order, AppError> {
        let order = match self.orders.get_by_id(order_id).await {
            Ok(order) => order,
            Err(e @ OrderError::NotFound(_)) => {
                return Err(AppError::service(
                    format!("Order with ID {} not found", order_id),
                    e,
                ));
            }
            Err(e) => {
                return Err(AppError::service(
                    format!("Error while processing payment: {}", e),
                    e,
                ));
            }
        };

        if order.order_id != order_id {
            let e = OrderError::InvalidResponse(format!(
                "requested order {} but received order {}",
                order_id, order.order_id
            ));
            return Err(AppError::service(
                format!("Error while processing payment: {}", e),
                e,
            ));
        }

        if !order.is_orderable() {
            return Err(DomainError::OrderNotStartable {
                order_id,
                status: order.order_status,
            }
            .into());
        }

        Ok(order)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────────

    /// Advances a payment exactly one step through its status machine.
    #[tracing::instrument(skip(self), fields(payment_id = %id))]
    pub async fn advance_payment(&self, id: PaymentId) -> Result<PaymentResponse, AppError> {
        let mut payment = self.load(id).await?;
        let from = payment.status;

        payment.advance()?;
        let updated = self.repo.update(&payment).await?;

        tracing::info!(%from, to = %updated.status, "payment status advanced");
        Ok(PaymentResponse::bare(updated))
    }

    /// Cancels a payment that is neither completed nor already canceled.
    ///
    /// A missing payment is reported as an invalid argument here, not as
    /// not-found.
    #[tracing::instrument(skip(self), fields(payment_id = %id))]
    pub async fn cancel_payment(&self, id: PaymentId) -> Result<(), AppError> {
        let mut payment = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::InvalidArgument(format!("Payment with id {} not found", id)))?;

        if let Err(e) = payment.cancel() {
            tracing::info!(status = %payment.status, "payment cannot be canceled");
            return Err(e.into());
        }

        self.repo.update(&payment).await?;
        tracing::info!("payment canceled");
        Ok(())
    }

    async fn load(&self, id: PaymentId) -> Result<Payment, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment with id: {} not found", id)))
    }
}
