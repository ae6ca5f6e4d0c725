pub mod config;
pub mod format;
pub mod net;
pub mod shell;
pub mod storage;
pub mod tool;
