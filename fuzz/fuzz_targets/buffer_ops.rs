#![no_main]

use directbuf::{ByteBuffer, duplicate, force_release};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u16, bool, Vec<(u8, u16)>)| {
    let (capacity, direct, ops) = input;
    let capacity = usize::from(capacity);

    let mut buf = if direct {
        ByteBuffer::allocate_direct(capacity).unwrap()
    } else {
        ByteBuffer::allocate(capacity)
    };

    for (op, arg) in ops {
        let arg = usize::from(arg);
        let _ = match op % 8 {
            0 => buf.set_position(arg),
            1 => buf.set_limit(arg),
            2 => buf.advance(arg),
            3 => buf.put_slice(&vec![op; arg % 512]),
            4 => buf.get_u8().map(|_| ()),
            5 => {
                buf.flip();
                Ok(())
            }
            6 => {
                buf.compact();
                Ok(())
            }
            _ => {
                buf.clear();
                Ok(())
            }
        };

        // Verify: markers stay ordered
        assert!(buf.position() <= buf.limit());
        assert!(buf.limit() <= buf.capacity());
    }

    // Verify: a duplicate is an independent copy of the window
    let copy = duplicate(&buf);
    assert_eq!(copy.remaining_slice(), buf.remaining_slice());
    assert!(!copy.is_direct());

    if direct {
        force_release(buf).unwrap();
    }
    assert_eq!(copy.capacity(), copy.remaining());
});
