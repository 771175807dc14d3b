//! secp256k1 domain parameters
//!
//! Bitcoin uses secp256k1: http://www.oid-info.com/get/1.3.132.0.10

use crate::curves::{Curve, Generator, Point};
use crate::error::{KeyError, Result};
use log::debug;
use num_bigint::BigUint;
use std::sync::LazyLock;

const P: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F";
const A: &str = "0000000000000000000000000000000000000000000000000000000000000000";
const B: &str = "0000000000000000000000000000000000000000000000000000000000000007";
const GX: &str = "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798";
const GY: &str = "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8";
const N: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";
const H: &str = "01";

fn parse(name: &str, hex: &str) -> Result<BigUint> {
    BigUint::parse_bytes(hex.as_bytes(), 16)
        .ok_or_else(|| KeyError::InvalidCurveParameter(format!("{name} is not valid hex")))
}

/// Build and validate the secp256k1 generator
pub fn secp256k1() -> Result<Generator> {
    let curve = Curve::new(parse("p", P)?, parse("a", A)?, parse("b", B)?);
    let g = Point::new(parse("Gx", GX)?, parse("Gy", GY)?);
    let generator = Generator::new(curve, g, parse("n", N)?, parse("h", H)?);
    generator.validate()?;
    debug!("secp256k1 domain parameters validated");
    Ok(generator)
}

/// Process-wide secp256k1 parameters, validated on first use.
///
/// Invalid constants leave nothing to recover from, so this aborts.
pub static SECP256K1: LazyLock<Generator> =
    LazyLock::new(|| secp256k1().unwrap_or_else(|e| panic!("secp256k1 parameters: {e}")));
