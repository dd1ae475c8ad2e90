//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! external dependencies.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `cb-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases?**
//! 3. **Is it implemented by the infrastructure layer?**
//!
//! If all three answers are **yes**, place it here.

mod fetch;
mod history;
mod http;

pub use fetch::FetchPort;
pub use history::HistoryPort;
pub use http::{HttpResponse, HttpTransportPort};
