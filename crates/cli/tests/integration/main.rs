//! End-to-end CLI tests that run the full pipeline against fake git and
//! cmake scripts placed first on `PATH`.

#![cfg(unix)]

mod build_tests;
mod common;
