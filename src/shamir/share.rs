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

//! Definition of a share, as well as functions to
//! convert it to and from a given wordlist

use rand::RngCore;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::util::bitpacker::BitPacker;
use crate::util::rs1024;

lazy_static! {
	/// List of mnemonic words
	pub static ref WORDLIST: Vec<String> = { include_str!("wordlists/en.txt").split_whitespace().map(|s| s.into()).collect() };
	/// Inverted wordlist for lookup by word
	pub static ref WORD_INDEX_MAP: HashMap<String, usize> = {
		let mut retval = HashMap::new();
		for (i, item) in WORDLIST.iter().enumerate() {
			retval.insert(item.to_owned(), i);
		}
		retval
	};
}

/// Map mnemonic words to their wordlist indices, case-insensitively
pub fn words_to_indices(words: &[String]) -> Result<Vec<u16>> {
	let mut retval = Vec::with_capacity(words.len());
	for w in words {
		match WORD_INDEX_MAP.get(&w.to_lowercase()) {
			Some(idx) => retval.push(*idx as u16),
			None => {
				return Err(Error::InvalidWord(format!(
					"Word {} is not a valid mnemonic word",
					w,
				)));
			}
		}
	}
	Ok(retval)
}

/// Map wordlist indices back to words; every index must be below 1024
pub fn indices_to_words(indices: &[u16]) -> Result<Vec<String>> {
	indices
		.iter()
		.map(|i| {
			WORDLIST
				.get(*i as usize)
				.cloned()
				.ok_or_else(|| Error::InvalidWord(format!("Word index {} out of range", i)))
		})
		.collect()
}

/// Share-specific configuration values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareConfig {
	/// The length of the random Identifier in bits
	pub id_length_bits: u8,
	/// The length of the extendable backup flag in bits
	pub extendable_flag_length_bits: u8,
	/// The length of the iteration exponent in bits
	pub iteration_exp_length_bits: u8,
	/// The number of words in the word list
	pub radix: u16,
	/// The length of the radix in bits
	pub radix_bits: u8,
	/// The length of the identifier, flag and iteration exponent in words
	pub id_exp_length_words: u8,
	/// The customization string of the RS1024 checksum
	pub customization_string: Vec<u8>,
	/// The customization string when the extendable flag is set
	pub customization_string_extendable: Vec<u8>,
	/// The length of the RS1024 checksum in words
	pub checksum_length_words: u8,
	/// The length of the mnemonic in words without the share value
	pub metadata_length_words: u8,
	/// The minimum allowed length of the mnemonic in words
	pub min_mnemonic_length_words: u8,
	/// The maximum number of shares, and of groups
	pub max_share_count: u8,
	/// The minimum allowed entropy of the master secret
	pub min_strength_bits: u16,
}

impl Default for ShareConfig {
	fn default() -> Self {
		let radix_bits = 10;
		let id_length_bits = 15;
		let extendable_flag_length_bits = 1;
		let iteration_exp_length_bits = 4;
		let checksum_length_words = rs1024::CHECKSUM_LENGTH_WORDS as u8;
		let customization_string = b"shamir".to_vec();
		let customization_string_extendable = b"shamir_extendable".to_vec();
		let max_share_count = 16;
		let min_strength_bits = 128;

		// derived values
		let radix = 2u16.pow(radix_bits as u32);
		let id_exp_length_words =
			(id_length_bits + extendable_flag_length_bits + iteration_exp_length_bits) / radix_bits;
		let metadata_length_words = id_exp_length_words + 2 + checksum_length_words;
		let min_mnemonic_length_words =
			metadata_length_words + (min_strength_bits as f64 / 10f64).ceil() as u8;

		ShareConfig {
			id_length_bits,
			extendable_flag_length_bits,
			iteration_exp_length_bits,
			radix,
			radix_bits,
			id_exp_length_words,
			customization_string,
			customization_string_extendable,
			checksum_length_words,
			metadata_length_words,
			min_mnemonic_length_words,
			max_share_count,
			min_strength_bits,
		}
	}
}

impl ShareConfig {
	/// Just use defaults for now
	pub fn new() -> Self {
		ShareConfig {
			..Default::default()
		}
	}

	/// Checksum customization for the given extendable flag
	pub fn customization(&self, extendable: bool) -> &[u8] {
		if extendable {
			&self.customization_string_extendable
		} else {
			&self.customization_string
		}
	}
}

/// Main definition of a share and its mnemonic serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
	/// Random 15 bit value which is the same for all shares and is used to verify
	/// that the shares belong together; unless the extendable flag is set it is
	/// also used as salt in the encryption of the master secret. (15 bits)
	pub identifier: u16,
	/// When set, the identifier neither salts the encryption nor is needed to
	/// recover, and the checksum customization changes. (1 bit)
	pub extendable: bool,
	/// Indicates the total number of iterations to be used in PBKDF2. The number of
	/// iterations is calculated as 10000x2^e. (4 bits)
	pub iteration_exponent: u8,
	/// The x value of the group share (4 bits)
	pub group_index: u8,
	/// indicates how many group shares are needed to reconstruct the master secret.
	/// The actual value is encoded as Gt = GT - 1, so a value of 0 indicates that a
	/// single group share is needed (GT = 1), a value of 1 indicates that two group shares
	/// are needed (GT = 2) etc. (4 bits)
	pub group_threshold: u8,
	/// indicates the total number of groups. The actual value is encoded as g = G - 1
	/// (4 bits)
	pub group_count: u8,
	/// Member index, or x value of the member share in the given group (4 bits)
	pub member_index: u8,
	/// indicates how many member shares are needed to reconstruct the group share. The actual value
	/// is encoded as t = T − 1. (4 bits)
	pub member_threshold: u8,
	/// corresponds to a list of the SSS part's fk(x) values 1 ≤ k ≤ n. Each fk(x) value is encoded
	/// as a string of eight bits in big-endian order. The concatenation of these bit strings is
	/// the share value. This value is left-padded with "0" bits so that the length of the padded
	/// share value in bits becomes the nearest multiple of 10. (padding + 8n bits)
	pub share_value: Vec<u8>,
	/// configuration values
	pub config: ShareConfig,
}

impl Default for Share {
	fn default() -> Self {
		Share {
			identifier: 0,
			extendable: false,
			iteration_exponent: 0,
			group_index: 0,
			group_threshold: 0,
			group_count: 0,
			member_index: 0,
			member_threshold: 0,
			share_value: vec![],
			config: ShareConfig::new(),
		}
	}
}

impl Share {
	/// Create a new share with defaults
	pub fn new() -> Result<Share> {
		let s = Share::default();
		if WORDLIST.len() != s.config.radix as usize {
			return Err(Error::InvalidConfiguration(format!(
				"The wordlist should contain {} words, but it contains {} words",
				s.config.radix,
				WORDLIST.len()
			)));
		}
		Ok(s)
	}

	/// Draw a fresh identifier from the given random source
	pub fn generate_random_identifier(&mut self, rng: &mut dyn RngCore) {
		self.identifier = rng.next_u32() as u16 & ((1u16 << self.config.id_length_bits) - 1);
	}

	/// Range and consistency checks over the header fields and share value
	pub fn validate(&self) -> Result<()> {
		if u32::from(self.identifier) >= 1u32 << self.config.id_length_bits {
			return Err(Error::InvalidShare(format!(
				"Identifier {} out of range",
				self.identifier,
			)));
		}
		if u32::from(self.iteration_exponent) >= 1u32 << self.config.iteration_exp_length_bits {
			return Err(Error::InvalidShare(format!(
				"Iteration exponent {} out of range",
				self.iteration_exponent,
			)));
		}
		let max = self.config.max_share_count;
		if self.group_threshold < 1 || self.group_threshold > max {
			return Err(Error::InvalidShare(format!(
				"Group threshold {} out of range",
				self.group_threshold,
			)));
		}
		if self.group_count < 1 || self.group_count > max {
			return Err(Error::InvalidShare(format!(
				"Group count {} out of range",
				self.group_count,
			)));
		}
		if self.group_threshold > self.group_count {
			return Err(Error::InvalidShare(
				"Group threshold cannot be greater than group count".to_string(),
			));
		}
		if self.group_index >= self.group_count {
			return Err(Error::InvalidShare(format!(
				"Group index {} must be below the group count {}",
				self.group_index, self.group_count,
			)));
		}
		if self.member_threshold < 1 || self.member_threshold > max {
			return Err(Error::InvalidShare(format!(
				"Member threshold {} out of range",
				self.member_threshold,
			)));
		}
		if self.member_index >= max {
			return Err(Error::InvalidShare(format!(
				"Member index {} out of range",
				self.member_index,
			)));
		}
		if self.share_value.len() * 8 < self.config.min_strength_bits as usize {
			return Err(Error::InvalidShare(format!(
				"Share value must carry at least {} bits",
				self.config.min_strength_bits,
			)));
		}
		if self.share_value.len() % 2 != 0 {
			return Err(Error::InvalidShare(
				"Share value length must be an even number of bytes".to_string(),
			));
		}
		Ok(())
	}

	// create the packed bit array, checksum included
	fn pack_bits(&self) -> Result<BitPacker> {
		self.validate()?;
		let radix_bits = self.config.radix_bits;
		let padding_bit_count =
			(radix_bits - (self.share_value.len() * 8 % radix_bits as usize) as u8) % radix_bits;
		let mut bp = BitPacker::new();

		bp.append_u16(self.identifier, self.config.id_length_bits)?;
		bp.append_u8(
			self.extendable as u8,
			self.config.extendable_flag_length_bits,
		)?;
		bp.append_u8(
			self.iteration_exponent,
			self.config.iteration_exp_length_bits,
		)?;
		bp.append_u8(self.group_index, 4)?;
		bp.append_u8(self.group_threshold - 1, 4)?;
		bp.append_u8(self.group_count - 1, 4)?;
		bp.append_u8(self.member_index, 4)?;
		bp.append_u8(self.member_threshold - 1, 4)?;
		bp.append_padding(padding_bit_count);
		bp.append_vec_u8(&self.share_value)?;

		if bp.len() % radix_bits as usize != 0 {
			return Err(Error::InvalidShare(format!(
				"Incorrect share bit length. Must be a multiple of {}, actual length: {}",
				radix_bits,
				bp.len(),
			)));
		}

		// second pass: checksum over the finalized words
		let mut sum_data: Vec<u32> = vec![];
		for i in (0..bp.len()).step_by(radix_bits as usize) {
			sum_data.push(bp.get_u32(i, radix_bits as usize)?);
		}

		let checksum =
			rs1024::create_checksum(self.config.customization(self.extendable), &sum_data);

		for c in checksum {
			bp.append_u32(c, radix_bits)?;
		}

		Ok(bp)
	}

	/// Convert share data to a share mnemonic
	pub fn to_mnemonic(&self) -> Result<Vec<String>> {
		let bp = self.pack_bits()?;

		let mut indices: Vec<u16> = vec![];
		for i in (0..bp.len()).step_by(self.config.radix_bits as usize) {
			indices.push(bp.get_u16(i, self.config.radix_bits as usize)?);
		}

		indices_to_words(&indices)
	}

	/// Convert share data to a u8 vec. A trailing partial byte is
	/// left-aligned and zero-filled.
	pub fn to_u8_vec(&self) -> Result<Vec<u8>> {
		let bp = self.pack_bits()?;

		let mut ret_vec: Vec<u8> = vec![];
		let mut i = 0;
		while i < bp.len() {
			let n = std::cmp::min(8, bp.len() - i);
			ret_vec.push(bp.get_u8(i, n)? << (8 - n));
			i += 8;
		}

		Ok(ret_vec)
	}

	/// Parse a mnemonic word sequence back into a share
	pub fn from_mnemonic(mn: &[String]) -> Result<Share> {
		let config = ShareConfig::new();
		if mn.len() < config.min_mnemonic_length_words as usize {
			return Err(Error::InvalidShare(format!(
				"Invalid mnemonic length. The length of each mnemonic must be at least {} words",
				config.min_mnemonic_length_words,
			)));
		}
		let indices = words_to_indices(mn)?;

		let mut bp = BitPacker::new();
		for i in &indices {
			bp.append_u16(*i, config.radix_bits)?;
		}

		// the padded share value must split into whole 16-bit pairs
		let value_word_count = mn.len() - config.metadata_length_words as usize;
		let padding_bits = config.radix_bits as usize * value_word_count % 16;
		if padding_bits > 8 {
			return Err(Error::InvalidShare(
				"Invalid mnemonic length".to_string(),
			));
		}

		let extendable = bp.get_u8(config.id_length_bits as usize, 1)? == 1;

		let sum_data: Vec<u32> = indices.iter().map(|i| u32::from(*i)).collect();
		rs1024::verify_checksum(config.customization(extendable), &sum_data)?;

		let mut ret_share = Share::new()?;

		ret_share.identifier = bp.get_u16(0, config.id_length_bits as usize)?;
		ret_share.extendable = extendable;
		ret_share.iteration_exponent = bp.get_u8(
			(config.id_length_bits + config.extendable_flag_length_bits) as usize,
			config.iteration_exp_length_bits as usize,
		)?;
		ret_share.group_index = bp.get_u8(20, 4)?;
		ret_share.group_threshold = bp.get_u8(24, 4)? + 1;
		ret_share.group_count = bp.get_u8(28, 4)? + 1;
		ret_share.member_index = bp.get_u8(32, 4)?;
		ret_share.member_threshold = bp.get_u8(36, 4)? + 1;

		// padding bits precede the share value and must all be zero
		if !bp.all_zero(40, 40 + padding_bits) {
			return Err(Error::InvalidShare(
				"Invalid mnemonic padding".to_string(),
			));
		}

		bp.split_out(
			40 + padding_bits,
			bp.len() - config.radix_bits as usize * config.checksum_length_words as usize,
		);
		ret_share.share_value = bp.get_vec_u8(0, bp.len() / 8)?;

		ret_share.validate()?;

		Ok(ret_share)
	}

	/// Parse a whitespace-separated mnemonic string; surrounding whitespace
	/// and runs of separators are tolerated, case is ignored
	pub fn from_mnemonic_str(mn: &str) -> Result<Share> {
		let words: Vec<String> = mn.split_whitespace().map(|s| s.into()).collect();
		Share::from_mnemonic(&words)
	}
}
