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

//! Reed-Solomon style checksum over GF(1024), on 10-bit symbols

use crate::error::{Error, Result};

const GEN: [u32; 10] = [
	0xe0e040, 0x1c1c080, 0x3838100, 0x7070200, 0xe0e0009, 0x1c0c2412, 0x38086c24, 0x3090fc48,
	0x21b1f890, 0x3f3f120,
];

/// The checksum is a fixed 30-bit quantity, three 10-bit words
pub const CHECKSUM_LENGTH_WORDS: usize = 3;

/// values interpreted as a list of 10 bit integers
fn polymod(values: &[u32]) -> u32 {
	let mut chk = 1;
	let mut b: u32;
	for v in values {
		b = chk >> 20;
		chk = (chk & 0xfffff) << 10 ^ v;
		for (i, g) in GEN.iter().enumerate() {
			if (b >> i) & 1 == 1 {
				chk ^= *g;
			}
		}
	}
	chk
}

/// Checksum over the given data words, seeded with the customization string
/// fed byte-wise ahead of the data. The three words come back highest bits
/// first.
pub fn create_checksum(custom_string: &[u8], data: &[u32]) -> Vec<u32> {
	let mut values: Vec<u32> = custom_string.iter().map(|d| u32::from(*d)).collect();
	values.extend_from_slice(data);
	for _ in 0..CHECKSUM_LENGTH_WORDS {
		values.push(0);
	}
	let polymod = polymod(&values) ^ 1;
	let mut retval = vec![];
	for i in 0..CHECKSUM_LENGTH_WORDS {
		retval.push(polymod >> (10 * (CHECKSUM_LENGTH_WORDS - 1 - i)) & 1023);
	}
	retval
}

/// Verify data words (checksum words included) against the customization
pub fn verify_checksum(custom_string: &[u8], data: &[u32]) -> Result<()> {
	let mut values: Vec<u32> = custom_string.iter().map(|d| u32::from(*d)).collect();
	values.extend_from_slice(data);
	if polymod(&values) != 1 {
		return Err(Error::InvalidChecksum(format!(
			"Error verifying checksum: {:?}",
			data,
		)));
	}
	Ok(())
}
