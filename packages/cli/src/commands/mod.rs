pub mod get;
pub mod init;
pub mod set;
pub mod show;
pub mod trail;

pub use get::{get, GetArgs};
pub use init::{init, InitArgs};
pub use set::{set, SetArgs};
pub use show::{show, ShowArgs};
pub use trail::{trail, TrailArgs};
