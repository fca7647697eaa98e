//! Integration tests for termynal

mod cli_test;
mod helpers;
mod playback_test;
