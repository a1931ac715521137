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

//! Master secret encryption: a four-round Feistel network whose round
//! function is PBKDF2-HMAC-SHA256

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

/// Config Struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterSecretEncConfig {
	/// The total number of PBKDF2 iterations across all rounds at exponent 0
	pub min_iteration_count: u32,
	/// The number of rounds to use in the Feistel cipher
	pub round_count: u8,
	/// Literal prefix of the PBKDF2 salt; the share identifier follows it
	/// unless the share set is extendable
	pub salt_prefix: Vec<u8>,
}

impl Default for MasterSecretEncConfig {
	fn default() -> Self {
		let min_iteration_count = 10000;
		let round_count = 4;
		let salt_prefix = b"shamir".to_vec();

		MasterSecretEncConfig {
			min_iteration_count,
			round_count,
			salt_prefix,
		}
	}
}

impl MasterSecretEncConfig {
	/// Just use defaults for now
	pub fn new() -> Self {
		MasterSecretEncConfig {
			..Default::default()
		}
	}
}

/// Struct, so that config values are held
pub struct MasterSecretEnc {
	pub config: MasterSecretEncConfig,
}

impl Default for MasterSecretEnc {
	fn default() -> Self {
		MasterSecretEnc {
			config: MasterSecretEncConfig::new(),
		}
	}
}

impl MasterSecretEnc {
	/// Create a new encoder with all defaults
	pub fn new() -> MasterSecretEnc {
		MasterSecretEnc {
			config: MasterSecretEncConfig::new(),
		}
	}

	/// Encrypt an even-length master secret. `passphrase` must already be
	/// normalized to bytes.
	pub fn encrypt(
		&self,
		master_secret: &[u8],
		passphrase: &[u8],
		iteration_exponent: u8,
		identifier: u16,
		extendable: bool,
	) -> Vec<u8> {
		let rounds: Vec<u8> = (0..self.config.round_count).collect();
		self.feistel(
			master_secret,
			passphrase,
			iteration_exponent,
			identifier,
			extendable,
			&rounds,
		)
	}

	/// Inverse of encrypt: the same network walked with reversed round order
	pub fn decrypt(
		&self,
		enc_master_secret: &[u8],
		passphrase: &[u8],
		iteration_exponent: u8,
		identifier: u16,
		extendable: bool,
	) -> Vec<u8> {
		let rounds: Vec<u8> = (0..self.config.round_count).rev().collect();
		self.feistel(
			enc_master_secret,
			passphrase,
			iteration_exponent,
			identifier,
			extendable,
			&rounds,
		)
	}

	fn feistel(
		&self,
		input: &[u8],
		passphrase: &[u8],
		iteration_exponent: u8,
		identifier: u16,
		extendable: bool,
		round_order: &[u8],
	) -> Vec<u8> {
		let mut l = input.to_owned();
		let mut r = l.split_off(l.len() / 2);
		let salt = self.get_salt(identifier, extendable);
		for i in round_order {
			let mut f = self.round_function(*i, passphrase, iteration_exponent, &salt, &r);
			let new_r: Vec<u8> = l.iter().zip(f.iter()).map(|(a, b)| a ^ b).collect();
			f.zeroize();
			l = std::mem::replace(&mut r, new_r);
		}
		r.append(&mut l);
		r
	}

	fn get_salt(&self, identifier: u16, extendable: bool) -> Vec<u8> {
		// extendable share sets leave the identifier out of the salt, so
		// mnemonics can be re-derived without it
		if extendable {
			return vec![];
		}
		let mut retval = self.config.salt_prefix.clone();
		retval.extend_from_slice(&identifier.to_be_bytes());
		retval
	}

	/// the round function used internally by the Feistel cipher
	fn round_function(&self, i: u8, passphrase: &[u8], e: u8, salt: &[u8], r: &[u8]) -> Vec<u8> {
		let iterations =
			(self.config.min_iteration_count / u32::from(self.config.round_count)) << u32::from(e);
		let mut full_salt = salt.to_owned();
		full_salt.extend_from_slice(r);
		let mut password = vec![i];
		password.extend_from_slice(passphrase);
		let mut out = vec![0; r.len()];
		pbkdf2_hmac::<Sha256>(&password, &full_salt, iterations, &mut out);
		password.zeroize();
		out
	}
}
