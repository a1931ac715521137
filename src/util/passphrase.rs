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

//! Passphrase normalization and validation

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// Substituted for an empty passphrase before normalization
const DEFAULT_PASSPHRASE: &str = "TREZOR";

/// Maximum passphrase length in code points, counted after normalization
const MAX_PASSPHRASE_LENGTH: usize = 1000;

/// NFKD-normalize a passphrase and return its UTF-8 bytes. An empty
/// passphrase is replaced by "TREZOR". Control characters other than
/// tab, newline and carriage return are rejected, as are normalized
/// passphrases longer than 1000 code points.
pub fn normalize(passphrase: &str) -> Result<Vec<u8>> {
	let effective = if passphrase.is_empty() {
		DEFAULT_PASSPHRASE
	} else {
		passphrase
	};
	let normalized: String = effective.nfkd().collect();
	if normalized.chars().count() > MAX_PASSPHRASE_LENGTH {
		return Err(Error::InvalidPassphrase(format!(
			"Passphrase must not exceed {} code points",
			MAX_PASSPHRASE_LENGTH,
		)));
	}
	for c in normalized.chars() {
		if c.is_control() && !matches!(c, '\t' | '\n' | '\r') {
			return Err(Error::InvalidPassphrase(format!(
				"Passphrase contains a control character: {:?}",
				c,
			)));
		}
	}
	Ok(normalized.into_bytes())
}
