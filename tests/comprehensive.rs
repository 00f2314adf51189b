use yay0::{DecodeError, EncodeError, Header, Operation, decode, encode, pack, plan};

// --- Helpers ---

/// Performs a full encode-decode cycle and asserts bit-exact reconstruction.
#[track_caller]
fn assert_round_trip(input: &[u8]) {
    let compressed = encode(input).expect("input should be large enough to encode");
    match decode(&compressed) {
        Ok(output) => assert_eq!(output, input, "Round-trip output mismatches input"),
        Err(e) => panic!("Decompression failed during round-trip: {e:?}"),
    }
}

fn link_count(ops: &[Operation]) -> usize {
    ops.iter().filter(|op| matches!(op, Operation::Link(_))).count()
}

fn read_u16(data: &[u8], pos: usize) -> u16 {
    u16::from_be_bytes([data[pos], data[pos + 1]])
}

/// `run` (distinct bytes), 20 separator bytes, `run` again, then 30 fresh bytes.
/// The only back-reference possible is the repeated run.
fn repeated_run(len: usize) -> Vec<u8> {
    let run: Vec<u8> = (100..100 + len as u8).collect();
    let mut input = run.clone();
    input.extend(200..220);
    input.extend_from_slice(&run);
    input.extend(30..60);
    input
}

/// Deterministic LCG noise.
fn noise(size: usize) -> Vec<u8> {
    let mut seed: u64 = 0xDEAD_BEEF;
    (0..size)
        .map(|_| {
            seed = (seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)) & 0xFFFF_FFFF;
            (seed >> 24) as u8
        })
        .collect()
}

// --- Boundaries ---

#[test]
fn t01_minimum_size() {
    assert_eq!(encode(&[0; 63]), Err(EncodeError::TooSmall { len: 63 }));
    assert_eq!(encode(b""), Err(EncodeError::TooSmall { len: 0 }));
    assert_round_trip(&[0; 64]);
}

#[test]
fn t02_bad_magic() {
    let mut compressed = encode(&[7; 64]).unwrap();
    compressed[..4].copy_from_slice(b"Yaz0");
    assert_eq!(decode(&compressed), Err(DecodeError::BadMagic));
}

#[test]
fn t03_header_layout() {
    let input = noise(1000);
    let compressed = encode(&input).unwrap();
    let header = Header::parse(&compressed).unwrap();

    assert_eq!(header.decompressed_size, 1000);
    assert_eq!(header.link_offset % 4, 0);
    assert!(header.link_offset as usize >= 0x10);
    assert!(header.chunk_offset >= header.link_offset);
    assert!(compressed.len() >= header.chunk_offset as usize);
    assert_eq!(compressed.len() % 2, 0);
}

#[test]
fn t04_streams_match_operations() {
    let input: Vec<u8> = b"stream sizes follow the plan. ".iter().copied().cycle().take(700).collect();
    let ops = plan(&input);
    let compressed = encode(&input).unwrap();
    let header = Header::parse(&compressed).unwrap();

    let mask_bytes = ops.len().div_ceil(8);
    assert_eq!(header.link_offset as usize, (0x10 + mask_bytes).next_multiple_of(4));
    assert_eq!(
        (header.chunk_offset - header.link_offset) as usize,
        2 * link_count(&ops)
    );
}

// --- Encoder behaviour ---

#[test]
fn t05_self_referential_run() {
    let input = [b'A'; 80];
    let ops = plan(&input);

    assert_eq!(ops, vec![Operation::Copy(b'A'), Operation::link(79, 1).unwrap()]);
    assert_round_trip(&input);
}

#[test]
fn t06_overflow_length_18() {
    let input = repeated_run(18);
    let ops = plan(&input);
    assert_eq!(ops[38], Operation::link(18, 38).unwrap());
    assert_eq!(link_count(&ops), 1);

    let compressed = encode(&input).unwrap();
    let header = Header::parse(&compressed).unwrap();
    let link = read_u16(&compressed, header.link_offset as usize);

    // Zero length nibble, distance 38 - 1.
    assert_eq!(link, 0x0025);
    // 38 literals precede the overflow byte (18 - 2 - 16).
    assert_eq!(compressed[header.chunk_offset as usize + 38], 0);
    assert_round_trip(&input);
}

#[test]
fn t07_direct_length_17() {
    let input = repeated_run(17);
    let ops = plan(&input);
    assert_eq!(ops[37], Operation::link(17, 37).unwrap());
    assert_eq!(link_count(&ops), 1);

    let compressed = encode(&input).unwrap();
    let header = Header::parse(&compressed).unwrap();
    let link = read_u16(&compressed, header.link_offset as usize);

    assert_eq!(link, 0xF024);
    // Chunk table holds literals only.
    let chunks = input.len() - 17;
    assert_eq!(
        compressed.len(),
        (header.chunk_offset as usize + chunks).next_multiple_of(2)
    );
    assert_round_trip(&input);
}

#[test]
fn t08_mixed_pattern() {
    let input = b"AB".repeat(40);
    let ops = plan(&input);

    let copies = ops.iter().filter(|op| matches!(op, Operation::Copy(_))).count();
    assert!(copies < 80);
    assert_eq!(ops[2], Operation::link(78, 2).unwrap());
    assert_round_trip(&input);
}

#[test]
fn t09_deterministic() {
    let input = b"The quick brown fox jumps over the lazy dog. ".repeat(30);
    assert_eq!(encode(&input).unwrap(), encode(&input).unwrap());
}

#[test]
fn t10_encode_is_plan_then_pack() {
    let input = noise(512);
    let ops = plan(&input);
    assert_eq!(encode(&input).unwrap(), pack(&ops, input.len()));
}

#[test]
fn t11_links_stay_in_bounds() {
    let mut input = noise(3000);
    input.extend(b"0123456789".repeat(100));
    input.extend(vec![0u8; 700]);

    let ops = plan(&input);
    let mut pos = 0;
    for op in &ops {
        if let Operation::Link(link) = op {
            assert!((3..=273).contains(&link.length()));
            assert!((1..=4096).contains(&link.distance()));
            assert!(link.distance() <= pos);
        }
        pos += op.decoded_len();
    }
    assert_eq!(pos, input.len());
}

// --- Round trips ---

#[test]
fn t12_repeating_phrases() {
    let input = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
    let compressed = encode(&input).unwrap();
    assert!(compressed.len() < input.len() / 5);
    assert_round_trip(&input);
}

#[test]
fn t13_random_noise() {
    assert_round_trip(&noise(8192));
}

#[test]
fn t14_long_zero_run() {
    let input = vec![0u8; 5000];
    let compressed = encode(&input).unwrap();
    assert!(compressed.len() < 100);
    assert_round_trip(&input);
}

#[test]
fn t15_match_outside_window() {
    let mut input = b"distant-pattern".to_vec();
    input.extend(noise(4200));
    input.extend_from_slice(b"distant-pattern");
    assert_round_trip(&input);
}

#[test]
fn t16_all_byte_values() {
    let input: Vec<u8> = (0..=255).chain(0..=255).collect();
    assert_round_trip(&input);
}

#[test]
fn t17_fibonacci_content() {
    let mut input = vec![1u8, 1];
    for _ in 0..1000 {
        let next = input[input.len() - 1].wrapping_add(input[input.len() - 2]);
        input.push(next);
    }
    assert_round_trip(&input);
}

#[test]
fn t18_sparse_data() {
    let mut input = vec![0u8; 64 * 1024];
    input[500] = 0xFF;
    input[40000] = 0xAA;
    let compressed = encode(&input).unwrap();
    assert!(compressed.len() < 2000);
    assert_round_trip(&input);
}

#[test]
fn t19_mixed_corpus() {
    let mut input: Vec<u8> = Vec::new();
    input.extend(vec![0u8; 100]);
    input.extend(b"Literal string");
    input.extend(vec![b'A'; 50]);
    input.extend((0..100).map(|i| i as u8));
    input.extend(b"Literal string");
    input.extend(b"ABCABCABCABD".repeat(9));
    assert_round_trip(&input);
}

#[test]
fn t20_unicode_text() {
    assert_round_trip("おはようございます。こんにちは。おはようございます。".as_bytes());
}

#[test]
fn t21_recursive_compression() {
    let mut input = noise(100);
    input.extend(b"Hello world repeated ".repeat(10));
    let once = encode(&input).unwrap();
    let twice = encode(&once).unwrap();

    let out_once = decode(&twice).unwrap();
    assert_eq!(out_once, once);
    assert_eq!(decode(&out_once).unwrap(), input);
}

// --- Corrupt containers ---

#[test]
fn t22_truncated_container() {
    let input = b"truncate me, truncate me, truncate me, truncate me! ".repeat(3);
    let compressed = encode(&input).unwrap();

    assert_eq!(decode(&compressed[..8]), Err(DecodeError::Truncated));
    assert_eq!(
        decode(&compressed[..compressed.len() - 4]),
        Err(DecodeError::Truncated)
    );
}

#[test]
fn t23_every_prefix_fails_cleanly() {
    let input = noise(300);
    let compressed = encode(&input).unwrap();
    for len in 0..compressed.len() - 2 {
        assert!(decode(&compressed[..len]).is_err(), "prefix {len} decoded");
    }
}

#[test]
fn t24_bit_flips_never_panic() {
    let input = b"flip flop flip flop ".repeat(10);
    let compressed = encode(&input).unwrap();
    for pos in 4..compressed.len() {
        for bit in 0..8 {
            let mut corrupt = compressed.clone();
            corrupt[pos] ^= 1 << bit;
            let _ = decode(&corrupt);
        }
    }
}

#[test]
fn t25_not_a_container() {
    assert_eq!(decode(b"Yay"), Err(DecodeError::Truncated));
    assert_eq!(decode(b"PK\x03\x04 not yay0"), Err(DecodeError::BadMagic));
}
