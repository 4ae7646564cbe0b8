mod catalog;
mod common;
mod intake;
mod policy;
