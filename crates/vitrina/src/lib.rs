//! Vitrina: a page-object end-to-end suite for an e-commerce demo
//! storefront, driven over the Chrome DevTools Protocol.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      VITRINA Architecture                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌──────────────┐    ┌────────────┐           │
//! │   │ Scenario   │    │ Page objects │    │ Headless   │           │
//! │   │ flows      │───►│ over a       │───►│ browser    │           │
//! │   │            │    │ DriverHandle │    │ (CDP)      │           │
//! │   └────────────┘    └──────────────┘    └────────────┘           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Five page components (home, product, cart, auth, contact) wrap one
//! screen each of the remote storefront. Every component depends only on a
//! [`DriverHandle`] (one exclusive browser tab) and reads remote state
//! fresh on each query. Native dialogs are captured by one-shot observers
//! registered before the triggering click. The [`scenario`] runner bounds
//! each flow with a timeout and attaches last-URL/screenshot diagnostics
//! to failures.

#![warn(missing_docs)]

pub mod browser;
pub mod check;
pub mod dialog;
pub mod driver;
pub mod fixture;
pub mod flows;
pub mod locator;
pub mod pages;
pub mod result;
pub mod scenario;
pub mod wait;

pub use browser::{Browser, BrowserConfig};
pub use dialog::{DialogKind, DialogObserver, ObservedDialog};
pub use driver::DriverHandle;
pub use result::{VitrinaError, VitrinaResult};
pub use scenario::{Scenario, ScenarioFailure, ScenarioReport};
