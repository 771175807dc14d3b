//! Generate a key pair and print its encodings for both networks
//!
//! Run with: cargo run --example keygen

use btckey::{Network, PrivateKey, generate_key_pair};

fn main() -> btckey::Result<()> {
    println!("=== Key Generation ===\n");

    let pair = generate_key_pair()?;
    let sk = pair.private_key();
    let pk = pair.public_key();

    println!("Private Key (hex):");
    println!("  {}\n", sk.to_hex());

    println!("Public Key (uncompressed):");
    println!("  {}\n", pk.to_hex(false));

    println!("Public Key (compressed):");
    println!("  {}\n", pk.to_hex(true));

    for net in [Network::Mainnet, Network::Testnet] {
        println!("{net}:");
        println!("  WIF:     {}", pair.wif(net, false));
        println!("  Address: {}", pair.address(net, false));
    }

    // Derive from known private key (Mastering Bitcoin example)
    println!("\n=== Known Key Derivation ===\n");
    let known_sk = "3aba4162c7251c891207b747840551a71939b0de081f85c4e44cf7c13e41daa6";
    let pk = PrivateKey::from_hex(known_sk)?.public_key();

    println!("Private Key: {known_sk}");
    println!("Address:     {}", pk.address(Network::Mainnet, true));
    println!("Expected:    14cxpo3MBCYYWCgF74SWTdcmxipnGUsPw3");
    Ok(())
}
