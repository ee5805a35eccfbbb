use std::io::Cursor;

use buffered_file_reader::{BufferedFileReader, BUF_SIZE};
use proptest::collection::vec;
use proptest::prelude::*;

fn reader(data: &[u8]) -> BufferedFileReader<Cursor<Vec<u8>>> {
    BufferedFileReader::from_handle(Cursor::new(data.to_vec()))
}

/// Small alphabet so delimiters actually show up.
fn content() -> impl Strategy<Value = Vec<u8>> {
    vec(prop_oneof![Just(b','), Just(b' '), Just(b'\n'), b'a'..=b'e', any::<u8>()], 0..BUF_SIZE * 4)
}

fn delimiters() -> impl Strategy<Value = Vec<u8>> {
    vec(prop_oneof![Just(b','), Just(b' '), Just(b'\n'), any::<u8>()], 0..4)
}

proptest! {
    #[test]
    fn tokens_rejoin_to_content(data in content(), delims in delimiters()) {
        let mut r = reader(&data);
        let mut rebuilt = Vec::with_capacity(data.len());
        let mut offset = 0usize;

        while let Some(token) = r.get_token(&delims) {
            rebuilt.extend_from_slice(&token);
            offset += token.len();
            if offset < data.len() {
                prop_assert!(delims.contains(&data[offset]));
                rebuilt.push(data[offset]);
                offset += 1;
            }
            prop_assert_eq!(r.tell(), Some(offset as u64));
        }

        prop_assert_eq!(rebuilt, data);
        prop_assert_eq!(r.get_token(&delims), None);
    }

    #[test]
    fn tell_counts_consumed_bytes(data in vec(any::<u8>(), 0..BUF_SIZE * 4)) {
        let mut r = reader(&data);
        for (k, &b) in data.iter().enumerate() {
            prop_assert_eq!(r.tell(), Some(k as u64));
            prop_assert_eq!(r.get_char(), Some(b));
        }
        prop_assert_eq!(r.tell(), Some(data.len() as u64));
        prop_assert_eq!(r.get_char(), None);
        prop_assert_eq!(r.tell(), Some(data.len() as u64));
    }

    #[test]
    fn rewind_restarts_from_first_byte(data in vec(any::<u8>(), 1..BUF_SIZE * 3), skip in 0usize..BUF_SIZE * 4) {
        let mut r = reader(&data);
        for _ in 0..skip {
            r.get_char();
        }
        r.rewind();
        prop_assert!(r.good());
        prop_assert_eq!(r.get_char(), Some(data[0]));
    }

    #[test]
    fn take_is_transparent(data in vec(any::<u8>(), 0..BUF_SIZE * 3), split in 0usize..BUF_SIZE * 3) {
        let mut moved = reader(&data);
        let mut stayed = reader(&data);
        for _ in 0..split {
            prop_assert_eq!(moved.get_char(), stayed.get_char());
        }

        let mut taken = moved.take();
        prop_assert!(!moved.is_open());
        loop {
            prop_assert_eq!(taken.tell(), stayed.tell());
            let (a, b) = (taken.get_char(), stayed.get_char());
            prop_assert_eq!(a, b);
            if a.is_none() {
                break;
            }
        }
    }
}
