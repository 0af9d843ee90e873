//! Types shared by the checkstats API server and CLI.

pub mod api;
