//! btckey - generate secp256k1 key pairs and print their WIF / address encodings

use anyhow::{Context, Result};
use btckey::{Network, generate_key_pair, private_to_wif_for, public_to_address_for};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use log::{LevelFilter, debug};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Subcommands>,
    #[clap(
        long,
        global = true,
        env = "BTCKEY_NETWORK",
        default_value = "testnet",
        help = "Network whose version bytes to use (mainnet or testnet)"
    )]
    network: Network,
    #[clap(long, global = true, help = "Use compressed public keys and WIF")]
    compressed: bool,
    #[clap(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    #[clap(about = "Generate a new key pair (default)")]
    Generate,
    #[clap(about = "Convert a hex private key to WIF")]
    Wif {
        #[clap(help = "Private key as hex, without 0x prefix")]
        private_key: String,
    },
    #[clap(about = "Convert a hex SEC1 public key to an address")]
    Address {
        #[clap(help = "Public key as hex (04 || X || Y, or compressed)")]
        public_key: String,
    },
}

impl Cli {
    fn setup_logging(&self) {
        let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
        if self.verbose {
            builder.filter_module("btckey", LevelFilter::Debug);
        }
        builder.init();
    }
}

fn generate(network: Network, compressed: bool) -> Result<()> {
    let pair = generate_key_pair().context("failed to generate key pair")?;
    let sk = pair.private_key();
    let pk = pair.public_key();
    let (x, y) = pk.xy_decimal();

    println!("Network                     : {network}");
    println!("Your private key (Decimal)  : {}", sk.to_decimal());
    println!("Your private key (Hex)      : {}", sk.to_hex());
    println!("Your private key (WIF)      : {}", pair.wif(network, compressed));
    println!("Your public key (X,Y)       : ({x}, {y})");
    println!("Your public key (Hex)       : {}", pk.to_hex(compressed));
    println!("Your address                : {}", pair.address(network, compressed));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.setup_logging();
    debug!("network = {}, compressed = {}", cli.network, cli.compressed);

    match cli.command.unwrap_or(Subcommands::Generate) {
        Subcommands::Generate => generate(cli.network, cli.compressed)?,
        Subcommands::Wif { private_key } => {
            let wif = private_to_wif_for(cli.network, cli.compressed, &private_key)
                .context("invalid private key")?;
            println!("{wif}");
        }
        Subcommands::Address { public_key } => {
            let address =
                public_to_address_for(cli.network, &public_key).context("invalid public key")?;
            println!("{address}");
        }
    }

    Ok(())
}
