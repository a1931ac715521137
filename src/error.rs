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

//! Error types for the crate

/// Convenience alias over the crate error type
pub type Result<T> = std::result::Result<T, Error>;

/// All failure classes surfaced by share generation, combination and the
/// primitives underneath them. Every variant carries a descriptive cause.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// Bad group/member counts or thresholds, bad secret length, bad
	/// iteration exponent
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// Passphrase failed validation after normalization
	#[error("invalid passphrase: {0}")]
	InvalidPassphrase(String),

	/// A single share is malformed: field out of range, non-zero padding,
	/// short share value, or a digest mismatch on recovery
	#[error("invalid share: {0}")]
	InvalidShare(String),

	/// RS1024 checksum verification failed
	#[error("invalid checksum: {0}")]
	InvalidChecksum(String),

	/// A mnemonic token is not in the wordlist
	#[error("invalid word: {0}")]
	InvalidWord(String),

	/// Shares in a set disagree, or the set has the wrong shape
	#[error("invalid share set: {0}")]
	InvalidShareSet(String),

	/// Division by zero in GF(256)
	#[error("division by zero in GF(256)")]
	DivisionByZero,

	/// Zero has no multiplicative inverse in GF(256)
	#[error("zero has no inverse in GF(256)")]
	NoInverse,

	/// Negative exponent passed to GF(256) exponentiation
	#[error("negative exponent in GF(256)")]
	NegativeExponent,
}
