//! Display boundary
//!
//! The sync loop hands every snapshot to a [`DisplaySink`]. `None` means the
//! endpoint could not be read this tick and is distinct from an empty cart or
//! an idle terminal, so the UI can show an offline indicator.

use shared::{Cart, PaymentStatus};
use std::fmt;
use tokio::sync::mpsc;

use crate::ClientError;

/// The two polled endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Cart,
    PaymentStatus,
}

impl Endpoint {
    /// Path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Cart => "cart",
            Endpoint::PaymentStatus => "cart/payment",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Consumer of display snapshots
///
/// Called from a single task, one tick at a time: `on_cart` always precedes
/// `on_payment_status` within a tick.
pub trait DisplaySink: Send {
    fn on_cart(&mut self, cart: Option<Cart>);

    fn on_payment_status(&mut self, status: Option<PaymentStatus>);

    /// Invoked before the corresponding `None` snapshot is forwarded
    fn on_fetch_failed(&mut self, _endpoint: Endpoint, _error: &ClientError) {}
}

/// Sink built from a pair of callbacks
pub struct DisplayCallbacks<C, P> {
    on_cart: C,
    on_payment_status: P,
}

impl<C, P> DisplayCallbacks<C, P>
where
    C: FnMut(Option<Cart>) + Send,
    P: FnMut(Option<PaymentStatus>) + Send,
{
    pub fn new(on_cart: C, on_payment_status: P) -> Self {
        Self {
            on_cart,
            on_payment_status,
        }
    }
}

impl<C, P> DisplaySink for DisplayCallbacks<C, P>
where
    C: FnMut(Option<Cart>) + Send,
    P: FnMut(Option<PaymentStatus>) + Send,
{
    fn on_cart(&mut self, cart: Option<Cart>) {
        (self.on_cart)(cart)
    }

    fn on_payment_status(&mut self, status: Option<PaymentStatus>) {
        (self.on_payment_status)(status)
    }
}

/// Event emitted to channel-based sinks
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    Cart(Option<Cart>),
    PaymentStatus(Option<PaymentStatus>),
    FetchFailed { endpoint: Endpoint, error: String },
}

/// Forward snapshots to a UI task; a closed receiver drops them
impl DisplaySink for mpsc::UnboundedSender<DisplayEvent> {
    fn on_cart(&mut self, cart: Option<Cart>) {
        if self.send(DisplayEvent::Cart(cart)).is_err() {
            tracing::debug!("Display receiver closed, dropping cart snapshot");
        }
    }

    fn on_payment_status(&mut self, status: Option<PaymentStatus>) {
        if self.send(DisplayEvent::PaymentStatus(status)).is_err() {
            tracing::debug!("Display receiver closed, dropping payment snapshot");
        }
    }

    fn on_fetch_failed(&mut self, endpoint: Endpoint, error: &ClientError) {
        let _ = self.send(DisplayEvent::FetchFailed {
            endpoint,
            error: error.to_string(),
        });
    }
}
