//! Display Client - customer display sync for the POS cart API
//!
//! Polls the cart and payment status endpoints and feeds every snapshot to
//! a display.
//!
//! ```no_run
//! use display_client::{DisplayConfig, DisplayEvent, DisplaySync};
//!
//! # async fn run() -> display_client::ClientResult<()> {
//! let config = DisplayConfig::new("http://localhost:3000/api");
//! let client = config.build_client()?;
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<DisplayEvent>();
//!
//! let handle = DisplaySync::new(client, tx, config.poll_interval()).start();
//! while let Some(event) = rx.recv().await {
//!     println!("{event:?}");
//! }
//! handle.stop().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod http;
pub mod logger;
pub mod sync;

pub use config::DisplayConfig;
pub use display::{DisplayCallbacks, DisplayEvent, DisplaySink, Endpoint};
pub use error::{ClientError, ClientResult};
pub use http::{CartApiClient, CartSource};
pub use sync::{DisplaySync, SyncHandle, SyncState};

// Re-export shared types for convenience
pub use shared::{Cart, CartItem, Customer, Discount, DiscountKind, PaymentState, PaymentStatus, Tax};
