// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Confidential Sessions
//!
//! Session lifecycle: [`establish`] performs the key exchange against a
//! runtime and returns a [`SecureChannel`] whose `query`/`command`
//! operations carry encrypted payloads. Certificates authorizing
//! queries are issued elsewhere and consumed per call.

pub mod certificate;
pub mod channel;
pub mod establish;

pub use certificate::CertificateData;
pub use channel::SecureChannel;
pub use establish::establish;
