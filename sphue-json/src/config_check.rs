// SPDX-License-Identifier: Apache-2.0

//! Compile-time configuration validation
//!
//! Integer width features are mutually exclusive and one of them is required.

#[cfg(not(any(feature = "int32", feature = "int64")))]
compile_error!("No integer width features selected: choose one of 'int32' or 'int64'");

#[cfg(all(feature = "int32", feature = "int64"))]
compile_error!(
    "Cannot enable both 'int32' and 'int64' features simultaneously: choose one integer width"
);
