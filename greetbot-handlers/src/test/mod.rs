//! Unit test module
//!
//! Handler unit tests live here, separate from source files.
//! Tests interact with handlers via the public API and a recording Bot fake.
