//! Client for the FACEIT data api (v4).
//!
//! ```no_run
//! # async fn run() -> Result<(), faceit::Error> {
//! use faceit::{FaceitClient, Params};
//!
//! let client = FaceitClient::new("api-key")?;
//! let players = client
//!     .search()
//!     .players(&Params::new().with("nickname", "DotJar").with("game", "csgo"))
//!     .await?;
//! println!("{players}");
//! # Ok(())
//! # }
//! ```

pub mod api_client;
pub mod catalog;
pub mod error;
pub mod namespaces;
pub mod params;
pub mod request;
pub mod transport;
pub mod validation;

pub use api_client::{FaceitClient, BASE_URL};
pub use catalog::{Endpoint, Kind, Operation};
pub use error::{Error, TypeError};
pub use params::{Params, Value};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
