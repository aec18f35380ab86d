//! Pankha HP iLO execution module
//!
//! Lets an orchestration agent issue out-of-band management commands to an
//! HP iLO baseboard management controller: power state and control, user
//! listing, product and firmware info, network settings and boot order.
//!
//! The iLO protocol itself is handled by `hpilo_cli` (python-hpilo). This
//! crate resolves credentials, makes one call per operation and reshapes the
//! result into plain JSON.
//!
//! # Example
//!
//! ```no_run
//! use pankha_ilo::config::types::ConfigOptions;
//! use pankha_ilo::credentials::ConnectionArgs;
//! use pankha_ilo::operations::{self, ExecContext, Outcome};
//!
//! # async fn example(options: ConfigOptions) -> pankha_ilo::error::Result<()> {
//! let ctx = ExecContext::with_cli(options);
//!
//! match operations::get_power_status(&ctx, &ConnectionArgs::profile("server1-ilo")).await? {
//!     Outcome::Completed(status) => println!("power on: {}", status.power),
//!     Outcome::Failed(failure) => println!("{} failed: {}", failure.hostname, failure.message),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod ilo;
pub mod operations;
pub mod system;

pub use error::{CredentialError, IloError, ModuleError, Result};
pub use operations::{invoke, ExecContext, Operation, Outcome, Request};
