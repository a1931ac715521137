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

//! Execution of the official reference test vectors

use serde::Deserialize;

use slip39::{combine_mnemonics, Result};

// test vector entry, for deser from reference json:
// [description, mnemonics, master secret hex]
#[derive(Deserialize, Debug, Clone)]
struct TVEntry(String, Vec<String>, String);

impl TVEntry {
	// get mnemonics as word lists
	fn mnemonics_to_vecs(&self) -> Vec<Vec<String>> {
		self.1
			.iter()
			.map(|mn| mn.split_whitespace().map(|s| s.into()).collect())
			.collect()
	}
	// master secret to bytes (decoding should fail when empty)
	fn master_secret_to_u8_vec(&self) -> Vec<u8> {
		if self.2.is_empty() {
			vec![]
		} else {
			hex::decode(&self.2).unwrap()
		}
	}
}

#[test]
fn test_vectors() -> Result<()> {
	let src = include_str!("fixtures/vectors/vectors.json");
	let tv_list: Vec<TVEntry> = serde_json::from_str(src).unwrap();
	for tv in tv_list {
		let ref_ms = tv.master_secret_to_u8_vec();
		let result = combine_mnemonics(&tv.mnemonics_to_vecs(), "TREZOR");
		if !ref_ms.is_empty() {
			let returned_ms = result.unwrap_or_else(|e| {
				panic!("vector {:?} should combine, but failed: {}", tv.0, e)
			});
			assert_eq!(ref_ms, returned_ms, "vector {:?}", tv.0);
		} else {
			assert!(result.is_err(), "vector {:?} should fail", tv.0);
		}
	}
	Ok(())
}
