//! # z/OSMF Files client
//!
//! Client for the z/OSMF Files REST API used by Zowe: list, read, write,
//! allocate and delete datasets, list PDS members, and list or read USS
//! files. Requests go through the `open-mainframe-zowe-core` request
//! executor, so transport, authentication and status validation live there.
//!
//! ## Example
//!
//! ```rust,no_run
//! use open_mainframe_zowe_files::{AllocationOptions, Files};
//! use open_mainframe_zowe_core::ZosmfProfile;
//!
//! # async fn example() -> open_mainframe_zowe_core::Result<()> {
//! let profile = ZosmfProfile::new("mainframe.example.com", "IBMUSER", "SYS1");
//! let files = Files::from_profile(&profile)?;
//!
//! let options = AllocationOptions::default().primary(10).recfm("VB");
//! files.allocate_dsn("IBMUSER.TEST.DATA", &options).await?;
//! files.write_to_dsn("IBMUSER.TEST.DATA", "hello").await?;
//! files.download_dsn("IBMUSER.TEST.DATA", "/tmp/test.txt").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod files;
pub mod types;

pub use files::{Files, FILES_ENDPOINT};
pub use types::{AllocationOptions, MemberListItem};
