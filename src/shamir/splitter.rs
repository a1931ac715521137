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

//! Splitting and recovery of a byte-vector secret, with the digest share
//! woven in at a reserved x coordinate

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::field::lagrange;
use crate::shamir::Share;
use crate::util;

type HmacSha256 = Hmac<Sha256>;

/// Share split configuration values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitterConfig {
	/// The maximum number of shares that can be created
	pub max_share_count: u8,
	/// The length of the digest of the shared secret in bytes
	pub digest_length_bytes: u8,
	/// The index of the share containing the shared secret
	pub secret_index: u8,
	/// The index of the share containing the digest of the shared secret
	pub digest_index: u8,
}

impl Default for SplitterConfig {
	fn default() -> Self {
		SplitterConfig {
			max_share_count: 16,
			digest_length_bytes: 4,
			secret_index: 255,
			digest_index: 254,
		}
	}
}

impl SplitterConfig {
	/// Just use defaults for now
	pub fn new() -> Self {
		SplitterConfig {
			..Default::default()
		}
	}
}

/// Main Struct
pub struct Splitter {
	/// Configuration values
	config: SplitterConfig,
}

impl Splitter {
	/// Create new
	pub fn new(config: Option<&SplitterConfig>) -> Splitter {
		Splitter {
			config: match config {
				Some(c) => c.to_owned(),
				None => SplitterConfig::new(),
			},
		}
	}

	/// Split a secret of at least 16 bytes and even length into share_count
	/// share values, any threshold of which recover it. Random draws come
	/// from the supplied source.
	pub fn split_secret(
		&self,
		proto_share: &Share,
		threshold: u8,
		share_count: u8,
		shared_secret: &[u8],
		rng: &mut dyn RngCore,
	) -> Result<Vec<Share>> {
		if threshold == 0 || threshold > self.config.max_share_count {
			return Err(Error::InvalidConfiguration(format!(
				"Threshold must be between 1 and {}",
				self.config.max_share_count
			)));
		}
		if share_count < threshold || share_count > self.config.max_share_count {
			return Err(Error::InvalidConfiguration(format!(
				"Share count with given member threshold must be between {} and {}",
				threshold, self.config.max_share_count
			)));
		}
		if shared_secret.len() < 16 || shared_secret.len() % 2 != 0 {
			return Err(Error::InvalidConfiguration(
				"Secret must be at least 16 bytes in length and a multiple of 2".to_string(),
			));
		}

		let mut shares = vec![];
		// if the threshold is 1, then the digest of the shared secret is not used
		if threshold == 1 {
			for i in 0..share_count {
				let mut s = proto_share.clone();
				s.member_index = i;
				s.member_threshold = threshold;
				s.share_value = shared_secret.to_owned();
				shares.push(s);
			}
			return Ok(shares);
		}

		let random_share_count = threshold - 2;

		for i in 0..random_share_count {
			let mut s = proto_share.clone();
			s.member_index = i;
			s.member_threshold = threshold;
			s.share_value = util::fill_vec_rand(rng, shared_secret.len());
			shares.push(s);
		}

		let random_part = util::fill_vec_rand(
			rng,
			shared_secret.len() - self.config.digest_length_bytes as usize,
		);
		let mut digest = self.create_digest(&random_part, shared_secret);
		digest.extend_from_slice(&random_part);

		let mut base_shares = shares.clone();
		let mut s = proto_share.clone();
		s.member_index = self.config.digest_index;
		s.member_threshold = threshold;
		s.share_value = digest;
		base_shares.push(s);

		let mut s = proto_share.clone();
		s.member_index = self.config.secret_index;
		s.member_threshold = threshold;
		s.share_value = shared_secret.to_owned();
		base_shares.push(s);

		for i in random_share_count..share_count {
			let mut r = self.interpolate(&base_shares, i, proto_share)?;
			r.member_index = i;
			r.member_threshold = threshold;
			shares.push(r);
		}

		Ok(shares)
	}

	/// Recover a secret from threshold shares, validating the digest share
	pub fn recover_secret(&self, shares: &[Share], threshold: u8) -> Result<Share> {
		if shares.is_empty() {
			return Err(Error::InvalidShareSet(
				"Share set must not be empty".to_string(),
			));
		}
		let mut proto_share = shares[0].clone();
		proto_share.share_value = vec![];

		let shared_secret = self.interpolate(shares, self.config.secret_index, &proto_share)?;

		if threshold != 1 {
			self.check_digest(shares, &shared_secret, &proto_share)?;
		}

		Ok(shared_secret)
	}

	fn interpolate(&self, shares: &[Share], x: u8, proto_share: &Share) -> Result<Share> {
		let points: Vec<(u8, &[u8])> = shares
			.iter()
			.map(|s| (s.member_index, s.share_value.as_slice()))
			.collect();
		let value = lagrange::interpolate_vec(x, &points)?;
		let mut ret_share = proto_share.clone();
		ret_share.member_index = x;
		ret_share.share_value = value;
		Ok(ret_share)
	}

	fn create_digest(&self, random_data: &[u8], shared_secret: &[u8]) -> Vec<u8> {
		// any key length is valid for HMAC
		let mut mac = HmacSha256::new_from_slice(random_data).expect("HMAC key");
		mac.update(shared_secret);
		let mut ret_vec = mac.finalize().into_bytes().to_vec();
		ret_vec.truncate(self.config.digest_length_bytes as usize);
		ret_vec
	}

	fn check_digest(
		&self,
		shares: &[Share],
		shared_secret: &Share,
		proto_share: &Share,
	) -> Result<()> {
		let digest_share = self.interpolate(shares, self.config.digest_index, proto_share)?;
		let mut digest = digest_share.share_value;
		let mut random_part = digest.split_off(self.config.digest_length_bytes as usize);
		let matches = digest == self.create_digest(&random_part, &shared_secret.share_value);
		digest.zeroize();
		random_part.zeroize();
		if !matches {
			return Err(Error::InvalidShare(
				"Invalid digest of the shared secret".to_string(),
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{thread_rng, Rng};

	// run split and recover given shares and thresholds, then check random combinations of
	// threshold shares reconstruct the secret
	fn split_recover_impl(
		secret_length_bytes: usize,
		threshold: u8,
		total_shares: u8,
	) -> Result<()> {
		let sp = Splitter::new(None);
		let mut rng = thread_rng();
		let secret = util::fill_vec_rand(&mut rng, secret_length_bytes);
		let proto_share = Share::new()?;
		let mut shares = sp.split_secret(&proto_share, threshold, total_shares, &secret, &mut rng)?;
		for _ in threshold..total_shares {
			let recovered_secret = sp.recover_secret(&shares, threshold)?;
			assert_eq!(secret, recovered_secret.share_value);
			if threshold == 1 {
				return Ok(());
			}
			// randomly remove a share till we're at threshold
			let remove_index = thread_rng().gen_range(0..shares.len());
			shares.remove(remove_index);
		}
		// now remove one more, and recovery should fail
		if shares.len() > 1 {
			let remove_index = thread_rng().gen_range(0..shares.len());
			shares.remove(remove_index);
			assert!(sp.recover_secret(&shares, threshold).is_err());
		}
		Ok(())
	}

	#[test]
	fn split_recover() -> Result<()> {
		// test invalid inputs
		assert!(split_recover_impl(14, 3, 5).is_err());
		assert!(split_recover_impl(2047, 10, 12).is_err());
		assert!(split_recover_impl(16, 0, 5).is_err());
		assert!(split_recover_impl(16, 5, 3).is_err());
		assert!(split_recover_impl(16, 5, 0).is_err());
		// test a range of thresholds
		let config = SplitterConfig::new();
		for sc in 1..=config.max_share_count {
			for t in 1..=sc {
				split_recover_impl(16, t, sc)?;
			}
		}
		// test a range of lengths
		for sl in (16..32).step_by(2) {
			split_recover_impl(sl, 3, 5)?;
			split_recover_impl(sl, 2, 3)?;
		}
		// test a couple of nice long lengths
		split_recover_impl(2048, 3, 5)?;
		split_recover_impl(64, 10, 16)?;
		Ok(())
	}

	#[test]
	fn corrupt_share_fails_digest() -> Result<()> {
		let sp = Splitter::new(None);
		let mut rng = thread_rng();
		let proto_share = Share::new()?;
		for sl in [16usize, 32, 64] {
			let secret = util::fill_vec_rand(&mut rng, sl);
			let shares = sp.split_secret(&proto_share, 3, 3, &secret, &mut rng)?;
			for share_idx in 0..shares.len() {
				for byte_idx in [0, sl / 2, sl - 1] {
					let mut corrupted = shares.clone();
					corrupted[share_idx].share_value[byte_idx] ^= 0x01;
					match sp.recover_secret(&corrupted, 3) {
						Err(Error::InvalidShare(_)) => (),
						other => panic!("expected digest failure, got {:?}", other),
					}
				}
			}
		}
		Ok(())
	}

	#[test]
	fn threshold_one_copies_secret() -> Result<()> {
		let sp = Splitter::new(None);
		let mut rng = thread_rng();
		let secret = util::fill_vec_rand(&mut rng, 16);
		let proto_share = Share::new()?;
		let shares = sp.split_secret(&proto_share, 1, 1, &secret, &mut rng)?;
		assert_eq!(shares.len(), 1);
		assert_eq!(shares[0].share_value, secret);
		Ok(())
	}
}
