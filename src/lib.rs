// Copyright 2024 The slip39 Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Two-level Shamir secret sharing with mnemonic share encoding, as
//! specified by SLIP-0039.
//!
//! A master secret is encrypted under a passphrase-keyed Feistel network,
//! split into group shares, each group share split again into member
//! shares, and every member share rendered as a checksummed sequence of
//! words from a fixed 1024-word list. Any quorum of groups, each holding a
//! quorum of members, recovers the secret:
//!
//! ```
//! use slip39::{combine_mnemonics, generate_mnemonics};
//!
//! let master_secret = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P".to_vec();
//! let groups = generate_mnemonics(1, &[(2, 3)], &master_secret, "passphrase", 0, false)?;
//! let mnemonics = groups[0].mnemonic_list()?;
//! let recovered = combine_mnemonics(&mnemonics[0..2], "passphrase")?;
//! assert_eq!(recovered, master_secret);
//! # Ok::<(), slip39::Error>(())
//! ```

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

#[macro_use]
extern crate lazy_static;

mod error;
pub mod field;
pub mod shamir;
pub mod util;

pub use error::{Error, Result};
pub use shamir::{
	combine_mnemonics, generate_mnemonics, generate_mnemonics_random,
	generate_mnemonics_with_rng, GroupShare, Share, ShareConfig,
};
