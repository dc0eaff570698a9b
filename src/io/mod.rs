mod store;

pub use store::{create_local_store, create_s3_store, create_store};
