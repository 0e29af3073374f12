mod command_result;
pub mod helper;
pub mod init;
pub mod msgfmt;
pub mod msgmerge;
pub mod xgettext;

pub use command_result::*;
