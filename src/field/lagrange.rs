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

//! Lagrange interpolation over GF(256), evaluated at a single point

use crate::error::{Error, Result};
use crate::field::gf256::Gf256;

/// Evaluates the polynomial through the given `points` at `x`, using the
/// first-form Lagrange basis. The x coordinates must be pairwise distinct.
pub fn interpolate_at(x: Gf256, points: &[(Gf256, Gf256)]) -> Result<Gf256> {
	if points.is_empty() {
		return Err(Error::InvalidShare(
			"Interpolation requires at least one point".to_string(),
		));
	}
	for (i, (xi, _)) in points.iter().enumerate() {
		if points.iter().skip(i + 1).any(|(xj, _)| xj == xi) {
			return Err(Error::InvalidShare(format!(
				"Duplicate x coordinate in interpolation points: {}",
				xi.to_byte(),
			)));
		}
	}

	let mut sum = Gf256::zero();
	for &(xi, yi) in points {
		let mut basis = Gf256::one();
		for &(xj, _) in points.iter().filter(|(xj, _)| *xj != xi) {
			basis *= (x - xj).checked_div(xi - xj)?;
		}
		sum += yi * basis;
	}
	Ok(sum)
}

/// Component-wise interpolation of byte-vector points at `x`. All y vectors
/// must share one length; an x coordinate already present short-circuits to
/// its y value.
pub fn interpolate_vec(x: u8, points: &[(u8, &[u8])]) -> Result<Vec<u8>> {
	if points.is_empty() {
		return Err(Error::InvalidShare(
			"Interpolation requires at least one point".to_string(),
		));
	}
	let len = points[0].1.len();
	if points.iter().any(|(_, y)| y.len() != len) {
		return Err(Error::InvalidShare(
			"Invalid set of shares. All share values must have the same length".to_string(),
		));
	}
	for (i, (xi, _)) in points.iter().enumerate() {
		if points.iter().skip(i + 1).any(|(xj, _)| xj == xi) {
			return Err(Error::InvalidShare(format!(
				"Duplicate x coordinate in interpolation points: {}",
				xi,
			)));
		}
	}
	if let Some((_, y)) = points.iter().find(|(xi, _)| *xi == x) {
		return Ok(y.to_vec());
	}

	let mut ret = Vec::with_capacity(len);
	for i in 0..len {
		let elems: Vec<(Gf256, Gf256)> = points
			.iter()
			.map(|(xi, y)| (Gf256::from_byte(*xi), Gf256::from_byte(y[i])))
			.collect();
		ret.push(interpolate_at(Gf256::from_byte(x), &elems)?.to_byte());
	}
	Ok(ret)
}
