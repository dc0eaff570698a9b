pub mod conf;
pub mod core;
pub mod io;
pub mod monitor;
pub mod notify;
pub mod snapshot;
pub mod state;

#[cfg(feature = "testutil")]
pub mod testutil;
