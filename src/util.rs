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

//! Shared low-level helpers: bit packing, checksums, encryption and
//! passphrase handling

pub mod bitpacker;
pub mod encrypt;
pub mod passphrase;
pub mod rs1024;

use rand::RngCore;

/// Fill a new vector of the given length from the supplied random source
pub fn fill_vec_rand(rng: &mut dyn RngCore, len: usize) -> Vec<u8> {
	let mut v = vec![0u8; len];
	rng.fill_bytes(&mut v);
	v
}
