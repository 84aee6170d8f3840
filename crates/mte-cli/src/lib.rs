// SPDX-License-Identifier: MIT OR Apache-2.0
//! mte-cli
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Library half of the `mte` binary: command implementations and output
//! formatting.

pub mod commands;
pub mod format;
