pub mod deeplink;
pub mod remote;
pub mod repository;
