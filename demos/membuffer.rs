//! Splits an in-memory buffer into 5 shares and joins 3 of them back.

use nimshare::{Config, QuorumPolicy, Scheme};

const M: u16 = 5;
const K: u16 = 3;

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> nimshare::Result<()> {
    // permissive so the below-threshold join at the end still runs
    let scheme = Scheme::builder(M, K)
        .with_config(Config::new().with_quorum(QuorumPolicy::Permissive))
        .build()?;

    let input: Vec<u8> = (b'A'..=b'Z').collect();
    println!("INPUT: {}", String::from_utf8_lossy(&input));

    let shares = scheme.split(&input)?;
    println!("OUTPUT");
    for share in &shares {
        println!("{:>3}: {}", share.point, hex(&share.data));
    }

    // shares are numbered from 1
    let picked = [
        (1, shares[0].data.as_slice()),
        (3, shares[2].data.as_slice()),
        (4, shares[3].data.as_slice()),
    ];
    let joined = scheme.join_slices(&picked)?;
    println!("JOINED: {}", String::from_utf8_lossy(&joined));

    // fewer than K shares do not reconstitute the secret
    let gibberish = scheme.join_slices(&picked[..2])?;
    println!("Does NOT contain 41 42 43 ...");
    println!("{}", hex(&gibberish));

    Ok(())
}
