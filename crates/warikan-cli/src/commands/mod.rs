pub mod init;
pub mod split;
pub mod validate;
