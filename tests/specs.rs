//! Behavioral specs for the `imgqa` binary.
//!
//! Everything here runs offline: commands are driven only as far as they get
//! without talking to openQA or OBS.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cli"]
mod cli {
    mod catalog;
    mod help;
    mod monitor;
    mod trigger;
}
