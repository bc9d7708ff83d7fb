pub mod config;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod normalize;
pub mod remote;

mod memory;
pub use memory::{Call, MemoryStore};

pub use config::ClientConfig;
pub use endpoint::{Endpoint, Method};
pub use error::StoreError;
pub use models::{NewOption, NewPoll, NewUser, OptionUpdate, Poll, PollOption, User};
pub use remote::{Ack, RemoteStore};
