mod client;

pub use client::{LogClient, LogLevel, LogPackage, LogResponse, LogStack};
