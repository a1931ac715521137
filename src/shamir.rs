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

//! The sharing scheme itself: shares, the secret splitter, and the
//! two-level orchestration over them

pub mod scheme;
pub mod share;
pub mod splitter;

pub use scheme::{
	combine_mnemonics, generate_mnemonics, generate_mnemonics_random,
	generate_mnemonics_with_rng, GroupShare,
};
pub use share::{Share, ShareConfig};
pub use splitter::{Splitter, SplitterConfig};
