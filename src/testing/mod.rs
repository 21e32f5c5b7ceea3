//! Testing utilities for the relay
//!
//! - Alba-style HTTP endpoint testing without running a server
//! - `MockDispatcher`, a recording mail dispatcher with a scripted outcome
//! - `MemoryView` and `ScriptedClient` for driving the form controller
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hire_relay::{App, AppContext, ConfigBuilder, testing};
//!
//! #[tokio::test]
//! async fn test_rejects_get() {
//!     let ctx = AppContext::new(
//!         ConfigBuilder::new().build().unwrap(),
//!         Arc::new(testing::MockDispatcher::succeeding()),
//!     );
//!
//!     testing::get(App::new(ctx).into_router(), "/api/send-email")
//!         .execute()
//!         .await
//!         .assert_method_not_allowed()
//!         .assert_json_path("error", serde_json::json!("Method not allowed"))
//!         .await;
//! }
//! ```

mod doubles;
mod scenario;

pub use doubles::{MemoryView, MockDispatcher, ScriptedClient};
pub use scenario::{Scenario, ScenarioAssert, delete, get, options, patch, post, put};
