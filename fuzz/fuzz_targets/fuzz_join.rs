#![no_main]

use libfuzzer_sys::fuzz_target;
use nimshare::{Config, QuorumPolicy, Scheme};

// join_slices must return a Result for any point set and buffer shape:
// duplicate points, point 0, ragged lengths, too few shares.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let m = data[0].max(1) as u16;
    let k = (data[1] as u16 % m) + 1;
    let quorum = if data[2] & 1 == 1 {
        QuorumPolicy::Permissive
    } else {
        QuorumPolicy::Enforce
    };
    let scheme = match Scheme::builder(m, k)
        .with_config(Config::new().with_quorum(quorum))
        .build()
    {
        Ok(scheme) => scheme,
        Err(_) => return,
    };

    let mut shares: Vec<(u8, &[u8])> = Vec::new();
    let mut offset = 3;
    while offset + 2 <= data.len() && shares.len() < 32 {
        let point = data[offset];
        let len = (data[offset + 1] as usize % 64).min(data.len() - offset - 2);
        offset += 2;
        shares.push((point, &data[offset..offset + len]));
        offset += len;
    }

    if let Ok(out) = scheme.join_slices(&shares) {
        assert_eq!(out.len(), shares[0].1.len());
    }
});
