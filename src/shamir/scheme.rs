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

//! The two-level sharing scheme: split a master secret into group and
//! member shares, and recover it from a quorum of mnemonics

use super::{Share, Splitter};
use crate::error::{Error, Result};
use crate::util;
use crate::util::encrypt::MasterSecretEnc;
use crate::util::passphrase;

use log::debug;
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::BTreeMap;
use std::fmt;
use zeroize::Zeroize;

/// Struct for returned shares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupShare {
	/// Group id
	pub group_id: u16,
	/// Whether the share set carries the extendable backup flag
	pub extendable: bool,
	/// iteration exponent
	pub iteration_exponent: u8,
	/// group index
	pub group_index: u8,
	/// group threshold
	pub group_threshold: u8,
	/// number of group shares
	pub group_count: u8,
	/// member threshold
	pub member_threshold: u8,
	/// Member shares for the group
	pub member_shares: Vec<Share>,
}

impl Default for GroupShare {
	fn default() -> Self {
		GroupShare {
			group_id: 0,
			extendable: false,
			iteration_exponent: 0,
			group_index: 0,
			group_threshold: 0,
			group_count: 0,
			member_threshold: 0,
			member_shares: vec![],
		}
	}
}

impl fmt::Display for GroupShare {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(
			f,
			"Group {} of {} - {} of {} shares required: ",
			self.group_index + 1,
			self.group_count,
			self.member_threshold,
			self.member_shares.len()
		)?;
		for s in &self.member_shares {
			if let Ok(words) = s.to_mnemonic() {
				writeln!(f, "{}", words.join(" "))?;
			}
		}
		Ok(())
	}
}

impl GroupShare {
	/// return list of mnemonics
	pub fn mnemonic_list(&self) -> Result<Vec<Vec<String>>> {
		let mut ret_vec = vec![];
		for s in &self.member_shares {
			ret_vec.push(s.to_mnemonic()?);
		}
		Ok(ret_vec)
	}

	/// recover the group share from threshold member shares
	pub fn decode_shares(&self) -> Result<Share> {
		let mut members = self.member_shares.clone();
		members.sort_by_key(|s| s.member_index);
		members.truncate(self.member_threshold as usize);
		let sp = Splitter::new(None);
		sp.recover_secret(&members, self.member_threshold)
	}
}

/// Split a master secret into mnemonic shares, drawing randomness from the
/// operating system.
/// group_threshold: The number of groups required to reconstruct the master secret
/// groups: A list of (member_threshold, member_count) pairs for each group, where member_count
/// is the number of shares to generate for the group and member_threshold is the number of
/// members required to reconstruct the group secret.
/// master_secret: The master secret to split.
/// passphrase: The passphrase used to encrypt the master secret.
/// iteration_exponent: The iteration exponent.
/// extendable: Leave the identifier out of the key stretch, so the same set
/// can later be extended without it.
/// return: List of group shares.
pub fn generate_mnemonics(
	group_threshold: u8,
	groups: &[(u8, u8)],
	master_secret: &[u8],
	passphrase: &str,
	iteration_exponent: u8,
	extendable: bool,
) -> Result<Vec<GroupShare>> {
	generate_mnemonics_with_rng(
		group_threshold,
		groups,
		master_secret,
		passphrase,
		iteration_exponent,
		extendable,
		&mut OsRng,
	)
}

/// As [`generate_mnemonics`], with an injected random source so fixtures can
/// be reproduced
pub fn generate_mnemonics_with_rng(
	group_threshold: u8,
	groups: &[(u8, u8)],
	master_secret: &[u8],
	passphrase: &str,
	iteration_exponent: u8,
	extendable: bool,
	rng: &mut dyn RngCore,
) -> Result<Vec<GroupShare>> {
	// Generate a 'proto share' so to speak, with identifier generated and group data filled
	let mut proto_share = Share::new()?;
	proto_share.generate_random_identifier(rng);
	proto_share.extendable = extendable;
	proto_share.iteration_exponent = iteration_exponent;
	proto_share.group_threshold = group_threshold;
	proto_share.group_count = groups.len() as u8;

	if master_secret.len() * 8 < proto_share.config.min_strength_bits as usize {
		return Err(Error::InvalidConfiguration(format!(
			"The length of the master secret ({} bytes) must be at least {} bytes",
			master_secret.len(),
			(proto_share.config.min_strength_bits as f64 / 8f64).ceil(),
		)));
	}
	if master_secret.len() % 2 != 0 {
		return Err(Error::InvalidConfiguration(
			"The length of the master secret in bytes must be an even number".to_string(),
		));
	}
	if u32::from(iteration_exponent) >= 1u32 << proto_share.config.iteration_exp_length_bits {
		return Err(Error::InvalidConfiguration(format!(
			"The iteration exponent ({}) must be below 16",
			iteration_exponent,
		)));
	}
	if group_threshold == 0 || groups.is_empty() {
		return Err(Error::InvalidConfiguration(
			"At least one group is required".to_string(),
		));
	}
	if group_threshold as usize > groups.len() {
		return Err(Error::InvalidConfiguration(format!(
			"The requested group threshold ({}) must not exceed the number of groups ({})",
			group_threshold,
			groups.len()
		)));
	}
	if groups.len() > proto_share.config.max_share_count as usize {
		return Err(Error::InvalidConfiguration(format!(
			"The number of groups must not exceed {}",
			proto_share.config.max_share_count,
		)));
	}
	for (threshold, count) in groups {
		if *threshold == 0 || threshold > count || *count > proto_share.config.max_share_count {
			return Err(Error::InvalidConfiguration(format!(
				"Group thresholds and counts must satisfy 1 <= threshold <= count <= {}",
				proto_share.config.max_share_count,
			)));
		}
		if *threshold == 1 && *count > 1 {
			return Err(Error::InvalidConfiguration(
				"Groups with member threshold 1 must have exactly one share".to_string(),
			));
		}
	}

	let mut passphrase_bytes = passphrase::normalize(passphrase)?;

	let encoder = MasterSecretEnc::new();
	let mut encrypted_master_secret = encoder.encrypt(
		master_secret,
		&passphrase_bytes,
		iteration_exponent,
		proto_share.identifier,
		extendable,
	);

	debug!(
		"splitting into {} groups, threshold {}",
		groups.len(),
		group_threshold
	);

	let sp = Splitter::new(None);

	let group_shares = sp.split_secret(
		&proto_share,
		group_threshold,
		groups.len() as u8,
		&encrypted_master_secret,
		rng,
	)?;
	encrypted_master_secret.zeroize();
	passphrase_bytes.zeroize();

	let mut retval: Vec<GroupShare> = vec![];

	let gs_len = group_shares.len();
	for (i, elem) in group_shares.into_iter().enumerate() {
		proto_share.group_index = i as u8;
		let (member_threshold, member_count) = groups[i];
		let member_shares = sp.split_secret(
			&proto_share,
			member_threshold,
			member_count,
			&elem.share_value,
			rng,
		)?;
		retval.push(GroupShare {
			group_id: proto_share.identifier,
			extendable,
			iteration_exponent,
			group_index: i as u8,
			group_threshold,
			group_count: gs_len as u8,
			member_threshold,
			member_shares,
		});
	}

	Ok(retval)
}

/// Generate a fresh master secret of the given strength and split it
pub fn generate_mnemonics_random(
	group_threshold: u8,
	groups: &[(u8, u8)],
	strength_bits: u16,
	passphrase: &str,
	iteration_exponent: u8,
	extendable: bool,
) -> Result<Vec<GroupShare>> {
	let proto_share = Share::new()?;
	if strength_bits < proto_share.config.min_strength_bits {
		return Err(Error::InvalidConfiguration(format!(
			"The requested strength of the master secret ({} bits) must be at least {} bits",
			strength_bits, proto_share.config.min_strength_bits,
		)));
	}
	if strength_bits % 16 != 0 {
		return Err(Error::InvalidConfiguration(format!(
			"The requested strength of the master secret ({} bits) must be a multiple of 16 bits",
			strength_bits,
		)));
	}
	let master_secret = util::fill_vec_rand(&mut OsRng, strength_bits as usize / 8);
	generate_mnemonics(
		group_threshold,
		groups,
		&master_secret,
		passphrase,
		iteration_exponent,
		extendable,
	)
}

/// Combines mnemonic shares to obtain the master secret which was previously
/// split using Shamir's secret sharing scheme.
/// mnemonics: List of mnemonics, one word list per share.
/// passphrase: The passphrase used to encrypt the master secret.
/// return: The master secret.
pub fn combine_mnemonics(mnemonics: &[Vec<String>], passphrase: &str) -> Result<Vec<u8>> {
	let group_shares = decode_mnemonics(mnemonics)?;
	let mut shares = vec![];
	for gs in group_shares {
		shares.push(gs.decode_shares()?);
	}
	debug!("recovering from {} groups", shares.len());
	// restore proper member index for groups
	let shares: Vec<Share> = shares
		.into_iter()
		.map(|mut s| {
			s.member_index = s.group_index;
			s
		})
		.collect();
	let sp = Splitter::new(None);
	let mut ems = sp.recover_secret(&shares, shares[0].group_threshold)?;
	let mut passphrase_bytes = passphrase::normalize(passphrase)?;
	let encoder = MasterSecretEnc::new();
	let dms = encoder.decrypt(
		&ems.share_value,
		&passphrase_bytes,
		ems.iteration_exponent,
		ems.identifier,
		ems.extendable,
	);
	ems.share_value.zeroize();
	passphrase_bytes.zeroize();
	Ok(dms)
}

/// Decodes all mnemonics to a list of group shares and performs error checking
fn decode_mnemonics(mnemonics: &[Vec<String>]) -> Result<Vec<GroupShare>> {
	let mut shares = vec![];
	if mnemonics.is_empty() {
		return Err(Error::InvalidShareSet(
			"List of mnemonics is empty".to_string(),
		));
	}
	let check_len = mnemonics[0].len();
	for m in mnemonics {
		if m.len() != check_len {
			return Err(Error::InvalidShareSet(
				"Invalid set of mnemonics. All mnemonics must have the same length".to_string(),
			));
		}
		shares.push(Share::from_mnemonic(m)?);
	}

	let check_share = shares[0].clone();
	for s in shares.iter() {
		if s.identifier != check_share.identifier {
			return Err(Error::InvalidShareSet(
				"Invalid set of mnemonics. All mnemonics must have the same identifier"
					.to_string(),
			));
		}
		if s.extendable != check_share.extendable {
			return Err(Error::InvalidShareSet(
				"Invalid set of mnemonics. All mnemonics must have the same extendable flag"
					.to_string(),
			));
		}
		if s.iteration_exponent != check_share.iteration_exponent {
			return Err(Error::InvalidShareSet(
				"Invalid set of mnemonics. All mnemonics must have the same iteration exponent"
					.to_string(),
			));
		}
		if s.group_threshold != check_share.group_threshold {
			return Err(Error::InvalidShareSet(
				"Invalid set of mnemonics. All mnemonics must have the same group threshold"
					.to_string(),
			));
		}
		if s.group_count != check_share.group_count {
			return Err(Error::InvalidShareSet(
				"Invalid set of mnemonics. All mnemonics must have the same group count"
					.to_string(),
			));
		}
		if s.share_value.len() != check_share.share_value.len() {
			return Err(Error::InvalidShareSet(
				"Invalid set of mnemonics. All share values must have the same length".to_string(),
			));
		}
	}

	let mut group_index_map: BTreeMap<u8, GroupShare> = BTreeMap::new();

	for s in shares {
		if let Some(e) = group_index_map.get_mut(&s.group_index) {
			e.member_shares.push(s);
		} else {
			let group_share = GroupShare {
				group_id: s.identifier,
				extendable: s.extendable,
				iteration_exponent: s.iteration_exponent,
				group_index: s.group_index,
				group_threshold: s.group_threshold,
				group_count: s.group_count,
				member_threshold: s.member_threshold,
				member_shares: vec![s.clone()],
			};
			group_index_map.insert(group_share.group_index, group_share);
		}
	}

	if group_index_map.len() < check_share.group_threshold as usize {
		return Err(Error::InvalidShareSet(format!(
			"Insufficient number of mnemonic groups ({}). The required number of groups is {}",
			group_index_map.len(),
			check_share.group_threshold,
		)));
	}
	if group_index_map.len() > check_share.group_threshold as usize {
		return Err(Error::InvalidShareSet(format!(
			"Wrong number of mnemonic groups ({}). Shares from exactly {} groups are expected",
			group_index_map.len(),
			check_share.group_threshold,
		)));
	}

	let groups: Vec<GroupShare> = group_index_map.into_values().collect();

	for g in groups.iter() {
		if g.member_shares.len() < g.member_threshold as usize {
			return Err(Error::InvalidShareSet(format!(
				"Insufficient number of mnemonics (Group {}). At least {} mnemonics are required",
				g.group_index, g.member_threshold,
			)));
		}
		let test_share = g.member_shares[0].clone();
		for ms in g.member_shares.iter() {
			if test_share.member_threshold != ms.member_threshold {
				return Err(Error::InvalidShareSet(
					"Invalid set of mnemonics. All mnemonics in a group must have the same \
					 member threshold"
						.to_string(),
				));
			}
		}
		for (i, ms) in g.member_shares.iter().enumerate() {
			if g.member_shares
				.iter()
				.skip(i + 1)
				.any(|other| other.member_index == ms.member_index)
			{
				return Err(Error::InvalidShareSet(format!(
					"Invalid set of mnemonics. Duplicate member index {} in group {}",
					ms.member_index, g.group_index,
				)));
			}
		}
	}

	Ok(groups)
}
