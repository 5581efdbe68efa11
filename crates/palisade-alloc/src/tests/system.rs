// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{AllocError, AllocFlags, BlockAlloc, BlockLayout, SystemAlloc};

// =============================================================================
// BlockLayout
// =============================================================================

#[test]
fn test_layout_bytes() {
    let layout = BlockLayout::bytes(48);
    assert_eq!(layout.size(), 48);
    assert_eq!(layout.align(), 1);
}

#[test]
fn test_layout_array() {
    let layout = BlockLayout::array::<u64>(4);
    assert_eq!(layout.size(), 32);
    assert_eq!(layout.align(), core::mem::align_of::<u64>());
}

#[test]
fn test_layout_array_overflow_saturates() {
    let layout = BlockLayout::array::<u64>(usize::MAX);
    assert_eq!(layout.size(), usize::MAX);

    // The impossible request fails at allocation time, not at the call site.
    let result = SystemAlloc.allocate(layout, AllocFlags::ANY);
    assert!(result.is_err());
}

// =============================================================================
// AllocFlags
// =============================================================================

#[test]
fn test_flags_clear() {
    assert!(!AllocFlags::ANY.is_clear());
    assert!(AllocFlags::CLEAR.is_clear());
    assert!((AllocFlags::ANY | AllocFlags::CLEAR).is_clear());
}

// =============================================================================
// SystemAlloc
// =============================================================================

#[test]
fn test_allocate_and_release() {
    let layout = BlockLayout::bytes(64);
    let ptr = SystemAlloc.allocate(layout, AllocFlags::ANY).unwrap();

    unsafe {
        ptr.as_ptr().write_bytes(0xab, 64);
        SystemAlloc.release(ptr, layout);
    }
}

#[test]
fn test_allocate_clear_zero_fills() {
    let layout = BlockLayout::bytes(128);
    let ptr = SystemAlloc.allocate(layout, AllocFlags::CLEAR).unwrap();

    unsafe {
        let payload = core::slice::from_raw_parts(ptr.as_ptr(), 128);
        assert!(payload.iter().all(|&b| b == 0));
        SystemAlloc.release(ptr, layout);
    }
}

#[test]
fn test_zero_sized_request_rejected() {
    let result = SystemAlloc.allocate(BlockLayout::bytes(0), AllocFlags::ANY);
    assert_eq!(result, Err(AllocError::ZeroSized));
}

#[test]
fn test_alignment_honored() {
    #[repr(align(64))]
    struct Wide([u8; 64]);

    let layout = BlockLayout::single::<Wide>();
    let ptr = SystemAlloc.allocate(layout, AllocFlags::ANY).unwrap();

    assert_eq!(ptr.as_ptr() as usize % 64, 0);
    unsafe { SystemAlloc.release(ptr, layout) };
}
