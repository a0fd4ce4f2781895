//! headerblock-http: the header filter for `http` crate requests
//!
//! This crate provides two layers:
//!
//! 1. **Headers**: [`HttpHeaders`] presents an `http::HeaderMap` to the
//!    engine, with canonical MIME header names
//! 2. **Middleware**: [`HeaderBlock`] sits in front of a [`Handler`] and
//!    forwards or rejects each request
//!
//! # Architecture
//!
//! ```text
//! EngineConfig (config)
//!         ↓ Engine::build()
//! HeaderBlock<next>
//!         ↓ handle(Request)
//! next.handle(Request)  |  403 + empty body
//! ```
//!
//! # Example
//!
//! ```
//! use headerblock_http::prelude::*;
//! use http::{Request, Response, StatusCode};
//!
//! let config = EngineConfig::new().allow(HeaderPattern::new("Cf-Ipcountry", "^VN$"));
//! let filter = HeaderBlock::new(&config, |_req: Request<()>| Response::new(()))
//!     .unwrap()
//!     .with_status(StatusCode::NOT_FOUND);
//!
//! let req = Request::builder().header("cf-ipcountry", "FR").body(()).unwrap();
//! assert_eq!(filter.handle(req).status(), StatusCode::NOT_FOUND);
//! ```

mod headers;
mod middleware;

pub use headers::{canonical_header_name, HttpHeaders, NameCase};
pub use middleware::{Handler, HeaderBlock};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{Handler, HeaderBlock, HttpHeaders};
    pub use headerblock::prelude::*;
}
