// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of the remote thermostat's state document.
//!
//! Every read fetches the full document and extracts a single field from
//! it. Nothing is cached between reads.

mod state;

pub(crate) use state::field;
pub use state::RemoteStateDocument;
