#![no_main]

use libfuzzer_sys::fuzz_target;
use nimshare::Scheme;

// Any secret, split with fuzzer-chosen padding, joins back from the last k shares.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let m = data[0].max(1) as u16;
    let k = (data[1] as u16 % m) + 1;
    let scheme = Scheme::new(m, k).unwrap();

    let body = &data[2..];
    let len = body.len() / k as usize;
    let (secret, rest) = body.split_at(len);
    let padding = &rest[..len * (k as usize - 1)];

    let shares = scheme.split_with_padding(secret, padding).unwrap();
    let joined = scheme.join(&shares[shares.len() - k as usize..]).unwrap();
    assert_eq!(joined, secret);
});
