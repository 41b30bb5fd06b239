mod build;
mod dockerfile;
mod doctor;
mod init;
mod remove;

pub use build::build;
pub use dockerfile::dockerfile;
pub use doctor::doctor;
pub use init::init;
pub use remove::remove;
