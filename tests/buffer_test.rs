// Integration tests for ByteBuffer and the duplicator
// Tests cover: marker invariants, direct storage, duplicate/duplicate_all independence

use directbuf::pattern::{increasing_buffer, increasing_bytes, is_increasing, is_increasing_buffer};
use directbuf::{BufferError, ByteBuffer, duplicate, duplicate_all};
use proptest::prelude::*;

// ============================================================================
// Buffer Model Tests
// ============================================================================

#[test]
fn test_direct_buffer_roundtrip() {
    let mut buf = ByteBuffer::allocate_direct(4096).unwrap();
    assert!(buf.is_direct());

    buf.put_slice(&increasing_bytes(0, 100)).unwrap();
    buf.flip();

    assert_eq!(buf.remaining(), 100);
    assert!(is_increasing(0, 100, buf.remaining_slice()));
}

#[test]
fn test_markers_reject_out_of_range() {
    let mut buf = ByteBuffer::allocate(16);

    assert!(matches!(
        buf.set_limit(17),
        Err(BufferError::InvalidArgument { .. })
    ));
    buf.set_limit(8).unwrap();
    assert!(matches!(
        buf.set_position(9),
        Err(BufferError::InvalidArgument { .. })
    ));
    assert!(matches!(
        buf.advance(9),
        Err(BufferError::Underflow { .. })
    ));
    assert_eq!(buf.position(), 0);
}

#[test]
fn test_overflow_reports_remaining() {
    let mut buf = ByteBuffer::allocate(4);
    buf.put_u8(1).unwrap();

    match buf.put_slice(&[0; 8]) {
        Err(BufferError::Overflow {
            requested,
            remaining,
        }) => {
            assert_eq!(requested, 8);
            assert_eq!(remaining, 3);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_freeze_returns_remaining() {
    let mut buf = increasing_buffer(0, 10);
    buf.advance(4).unwrap();

    let bytes = buf.freeze();
    assert_eq!(&bytes[..], &increasing_bytes(4, 6)[..]);
}

// ============================================================================
// Duplicator Tests
// ============================================================================

#[test]
fn test_duplicate_copies_remaining_window() {
    let mut src = increasing_buffer(0, 64);
    src.set_position(10).unwrap();
    src.set_limit(50).unwrap();

    let copy = duplicate(&src);

    assert_eq!(copy.position(), 0);
    assert_eq!(copy.limit(), 40);
    assert_eq!(copy.capacity(), 40);
    assert!(is_increasing(10, 40, copy.remaining_slice()));

    assert_eq!(src.position(), 10);
    assert_eq!(src.limit(), 50);
}

#[test]
fn test_duplicate_outlives_direct_source() {
    let mut src = ByteBuffer::allocate_direct(256).unwrap();
    src.put_slice(&increasing_bytes(100, 256)).unwrap();
    src.flip();

    let copy = duplicate(&src);
    directbuf::force_release(src).unwrap();

    assert!(!copy.is_direct());
    assert!(is_increasing_buffer(100, 256, &copy));
}

#[test]
fn test_duplicate_mutation_does_not_leak() {
    let src = increasing_buffer(0, 8);
    let mut copy = duplicate(&src);

    copy.clear();
    copy.put_slice(&[0xFF; 8]).unwrap();

    assert!(is_increasing_buffer(0, 8, &src));
}

#[test]
fn test_duplicate_all_mixed_storage() {
    let mut direct = ByteBuffer::allocate_direct(32).unwrap();
    direct.put_slice(b"direct").unwrap();
    direct.flip();

    let sources = vec![
        ByteBuffer::copy_from_slice(b"first"),
        ByteBuffer::allocate(0),
        direct,
    ];
    let copies = duplicate_all(&sources);

    assert_eq!(copies.len(), 3);
    assert_eq!(copies[0].remaining_slice(), b"first");
    assert_eq!(copies[1].remaining(), 0);
    assert_eq!(copies[2].remaining_slice(), b"direct");
    assert!(copies.iter().all(|c| !c.is_direct()));
    assert_eq!(copies, sources);
}

#[test]
fn test_duplicate_all_empty_list() {
    assert!(duplicate_all(&[]).is_empty());
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_duplicate_matches_window(
        len in 0usize..2048,
        start in any::<i32>(),
        skip in 0usize..2048,
        direct in any::<bool>(),
    ) {
        let data = increasing_bytes(start, len);
        let mut src = if direct {
            let mut buf = ByteBuffer::allocate_direct(len).unwrap();
            buf.put_slice(&data).unwrap();
            buf.flip();
            buf
        } else {
            ByteBuffer::from(data)
        };
        let skip = skip.min(len);
        src.advance(skip).unwrap();

        let copy = duplicate(&src);

        prop_assert_eq!(copy.remaining(), len - skip);
        prop_assert!(is_increasing(start.wrapping_add(skip as i32), len - skip, copy.remaining_slice()));
        prop_assert_eq!(src.position(), skip);
    }

    #[test]
    fn prop_markers_stay_ordered(ops in proptest::collection::vec((0u8..6, 0usize..40), 0..64)) {
        let mut buf = ByteBuffer::allocate(32);
        for (op, arg) in ops {
            let _ = match op {
                0 => buf.set_position(arg),
                1 => buf.set_limit(arg),
                2 => buf.advance(arg),
                3 => {
                    buf.flip();
                    Ok(())
                }
                4 => {
                    buf.compact();
                    Ok(())
                }
                _ => buf.put_slice(&vec![1; arg]),
            };
            prop_assert!(buf.position() <= buf.limit());
            prop_assert!(buf.limit() <= buf.capacity());
        }
    }
}
