//! Walk through the hash and Base58Check steps behind an address
//!
//! Run with: cargo run --example hash_demo

use btckey::base58::encode_check;
use btckey::ripemd160::ripemd160;
use btckey::sha256::{checksum, hash256, sha256};
use btckey::{Network, public_to_address};

fn main() -> btckey::Result<()> {
    let pubkey_hex = "0450863ad64a87ae8a2fe83c1af1a8403cb53f53e486d8511dad8a04887e5b23522cd470243453a299fa9e77237716103abc11a1df38855ed6f2ee187e9c582ba6";
    let pubkey = hex::decode(pubkey_hex)?;

    println!("1. Uncompressed Public Key:");
    println!("   {pubkey_hex}\n");

    let step2 = sha256(&pubkey);
    println!("2. SHA-256:");
    println!("   {}\n", hex::encode(step2));

    let step3 = ripemd160(&step2);
    println!("3. RIPEMD-160 (HASH160):");
    println!("   {}\n", hex::encode(step3));

    let mut versioned = vec![Network::Testnet.address_prefix()];
    versioned.extend_from_slice(&step3);
    println!("4. Prepend testnet version byte:");
    println!("   {}\n", hex::encode(&versioned));

    println!("5. HASH256 of the versioned payload, first 4 bytes are the checksum:");
    println!("   {}", hex::encode(hash256(&versioned)));
    println!("   {}\n", hex::encode(checksum(&versioned)));

    println!("6. Base58Check:");
    println!("   {}", encode_check(&versioned));
    println!("   {} (public_to_address)", public_to_address(pubkey_hex)?);
    Ok(())
}
