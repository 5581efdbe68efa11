// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! The container types in one flat namespace.

pub use palisade_list::{CursorMut, List};
pub use palisade_string::{ByteString, int_to_string, uint_to_string};
pub use palisade_vec::Vector;
