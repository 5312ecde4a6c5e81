mod common;
mod payload;
mod service;
